//! # Domain Types
//!
//! Core domain types shared across Trolley.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                │
//! │                                                                     │
//! │  ┌─────────────────┐      ┌─────────────────┐   ┌───────────────┐  │
//! │  │    Product      │      │    LineItem     │   │     Cart      │  │
//! │  │  ─────────────  │ 1..1 │  ─────────────  │ * │  ───────────  │  │
//! │  │  code (i64)     │◄─────│  product        │◄──│  customer_id  │  │
//! │  │  description    │      │  unit_price     │   │  items        │  │
//! │  │                 │      │  quantity       │   │  created_at   │  │
//! │  └─────────────────┘      └─────────────────┘   └───────────────┘  │
//! │     (this file)              (cart.rs)            (cart.rs)        │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! A product is identified by its numeric `code` alone. Two `Product` values
//! with the same code are the same product even if their descriptions differ
//! (descriptions are display text, not identity).

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

// =============================================================================
// Product
// =============================================================================

/// A purchasable item.
///
/// Immutable after construction; carts reference products by value and never
/// write through them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Numeric identifier, unique within the catalog.
    code: i64,

    /// Display text shown on line items and receipts.
    description: String,
}

impl Product {
    /// Creates a new product value.
    pub fn new(code: i64, description: impl Into<String>) -> Self {
        Product {
            code,
            description: description.into(),
        }
    }

    /// Returns the product code.
    #[inline]
    pub fn code(&self) -> i64 {
        self.code
    }

    /// Returns the product description.
    #[inline]
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Equality by `code` only.
///
/// Cart merge rules ("one line item per distinct product code") ride on this:
/// `Product::new(1, "Coffee")` and `Product::new(1, "Coffee 250g")` hit the
/// same line item.
impl PartialEq for Product {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
    }
}

impl Eq for Product {}

/// Hash must agree with the code-only equality.
impl Hash for Product {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.code.hash(state);
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}", self.code, self.description)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
