//! # Cart Module
//!
//! One customer's shopping session: an ordered list of line items plus the
//! creation timestamp that drives session expiry.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Cart Operations                                │
//! │                                                                     │
//! │  Registry Call              Cart Method           State Change      │
//! │  ─────────────              ───────────           ────────────      │
//! │                                                                     │
//! │  add item ────────────────► add_item() ─────────► merge or append   │
//! │                                                                     │
//! │  remove by product ───────► remove_item() ──────► drop matching     │
//! │                                                                     │
//! │  remove by position ──────► remove_item_at() ───► drop items[i]     │
//! │                                                                     │
//! │  totals / checkout ───────► total_value() ──────► (read only)       │
//! │                             total_quantity()                        │
//! │                                                                     │
//! │  expiry sweep ────────────► is_expired_at() ────► (read only)       │
//! │                                                                     │
//! │  INVARIANTS: at most one line item per product code; every item     │
//! │  in the list has positive unit price and positive quantity.         │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Merge Rule
//! Adding a product the cart already holds never fails: the quantities are
//! summed and the unit price is overwritten with the newly supplied one.
//! Validation applies only when a *new* line item would be appended.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CartError, CoreResult};
use crate::money::Money;
use crate::types::Product;
use crate::validation::{validate_quantity, validate_unit_price};
use crate::SESSION_TTL_MINUTES;

// =============================================================================
// Line Item
// =============================================================================

/// A (product, unit price, quantity) entry inside one cart.
///
/// ## Ownership
/// Line items belong exclusively to the cart that holds them. There is no
/// public constructor and no public `&mut` access: all mutation goes through
/// [`Cart::add_item`] and the removal methods, which is what keeps the
/// positive-price/positive-quantity invariant airtight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// The product this line refers to.
    product: Product,

    /// Price per unit, as last supplied.
    unit_price: Money,

    /// Units of the product in the cart. Always positive.
    quantity: i64,
}

impl LineItem {
    fn new(product: Product, unit_price: Money, quantity: i64) -> Self {
        LineItem {
            product,
            unit_price,
            quantity,
        }
    }

    /// Returns the product on this line.
    #[inline]
    pub fn product(&self) -> &Product {
        &self.product
    }

    /// Returns the current unit price.
    #[inline]
    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    /// Returns the quantity.
    #[inline]
    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    /// Line total: unit price × quantity, exact.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price * self.quantity
    }
}

// =============================================================================
// Cart
// =============================================================================

/// One customer's shopping cart.
///
/// ## Invariants
/// - Items are unique by product code (adding the same product merges)
/// - Every held item has positive unit price and positive quantity
/// - Item order is insertion order; positions are meaningful for
///   [`Cart::remove_item_at`]
/// - `created_at` is set at construction and never updated
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// The customer who owns this session.
    customer_id: String,

    /// Line items in insertion order.
    items: Vec<LineItem>,

    /// When the session started. Drives expiry; never touched again.
    created_at: DateTime<Utc>,
}

impl Cart {
    /// Creates a new empty cart for a customer, stamped with the current time.
    pub fn new(customer_id: impl Into<String>) -> Self {
        Cart {
            customer_id: customer_id.into(),
            items: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Test-friendly constructor with an explicit creation instant.
    ///
    /// Expiry is a function of `created_at`; pinning it lets callers exercise
    /// the 15-minute boundary without sleeping.
    pub fn with_created_at(customer_id: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Cart {
            customer_id: customer_id.into(),
            items: Vec::new(),
            created_at,
        }
    }

    /// Adds a product to the cart.
    ///
    /// ## Behavior
    /// - Product already in the cart: quantity becomes the sum of the current
    ///   and supplied quantities, and the unit price is overwritten with the
    ///   supplied one. This path never fails.
    /// - Product not in the cart: the price and quantity are validated
    ///   (both must be positive) and a new line item is appended at the end.
    ///
    /// ## Errors
    /// [`CartError::InvalidProduct`] when a new line item would violate the
    /// positive-price/positive-quantity rule. The cart is left untouched.
    pub fn add_item(&mut self, product: Product, unit_price: Money, quantity: i64) -> CoreResult<()> {
        if let Some(item) = self
            .items
            .iter_mut()
            .find(|i| i.product.code() == product.code())
        {
            item.quantity += quantity;
            item.unit_price = unit_price;
            return Ok(());
        }

        validate_unit_price(unit_price).map_err(|source| CartError::InvalidProduct {
            code: product.code(),
            source,
        })?;
        validate_quantity(quantity).map_err(|source| CartError::InvalidProduct {
            code: product.code(),
            source,
        })?;

        self.items.push(LineItem::new(product, unit_price, quantity));
        Ok(())
    }

    /// Removes the line item holding this product, if any.
    ///
    /// Product equality is code equality, so the description on the argument
    /// is irrelevant. Returns whether a removal occurred; `false` leaves the
    /// cart unchanged.
    pub fn remove_item(&mut self, product: &Product) -> bool {
        match self.items.iter().position(|i| i.product() == product) {
            Some(position) => {
                self.items.remove(position);
                true
            }
            None => false,
        }
    }

    /// Removes the line item at a 0-based insertion position.
    ///
    /// ## Errors
    /// [`CartError::PositionOutOfRange`] when `position` is not a valid
    /// index; the cart is left unchanged. An invalid position is a caller
    /// bug worth reporting, not a panic.
    pub fn remove_item_at(&mut self, position: usize) -> CoreResult<()> {
        if position >= self.items.len() {
            return Err(CartError::PositionOutOfRange {
                position,
                len: self.items.len(),
            });
        }

        self.items.remove(position);
        Ok(())
    }

    /// Total value of the cart: Σ unit price × quantity, normalized to
    /// 7 significant digits with half-even rounding.
    ///
    /// The normalization mirrors the DECIMAL32 arithmetic totals have
    /// historically been carried in and is applied per cart, before any
    /// registry aggregation.
    pub fn total_value(&self) -> Money {
        self.items
            .iter()
            .map(LineItem::line_total)
            .sum::<Money>()
            .normalized()
    }

    /// Total number of units across all line items.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(LineItem::quantity).sum()
    }

    /// Whether this session has outlived the standard 15-minute TTL.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now(), SESSION_TTL_MINUTES)
    }

    /// Expiry check against an explicit clock and TTL.
    ///
    /// Elapsed time is truncated to whole minutes: with a 15-minute TTL a
    /// cart is still live at 14:59 of age and expired at exactly 15:00.
    pub fn is_expired_at(&self, now: DateTime<Utc>, ttl_minutes: i64) -> bool {
        (now - self.created_at).num_minutes() >= ttl_minutes
    }

    /// Returns the owning customer's identifier.
    #[inline]
    pub fn customer_id(&self) -> &str {
        &self.customer_id
    }

    /// Returns the line items in insertion order.
    #[inline]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Returns when the session started.
    #[inline]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Number of distinct line items.
    #[inline]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Checks whether the cart holds no items.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
