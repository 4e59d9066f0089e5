//! # Cart Registry
//!
//! Keeper of all live carts, keyed by customer id.
//!
//! ## Thread Safety
//! The cart map is wrapped in `Arc<Mutex<T>>` because:
//! 1. Foreground callers create/mutate/checkout carts
//! 2. The background sweeper removes expired carts concurrently
//! 3. One coarse lock is all the serialization this system needs
//!
//! ## Registry Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    Registry Operations                              │
//! │                                                                     │
//! │  Caller Action            Registry Method        State Change       │
//! │  ─────────────            ───────────────        ────────────       │
//! │                                                                     │
//! │  Open session ──────────► create() ────────────► insert if absent   │
//! │                                                                     │
//! │  Look up session ───────► find() ──────────────► (read only)        │
//! │                                                                     │
//! │  Add/remove items ──────► add_item() etc. ─────► mutate one cart    │
//! │                                                                     │
//! │  Pay and leave ─────────► checkout() ──────────► emit + remove      │
//! │                                                                     │
//! │  Abandon session ───────► invalidate() ────────► remove             │
//! │                                                                     │
//! │  Expiry sweep ──────────► evict_expired() ─────► remove expired     │
//! │                                                                     │
//! │  NOTE: All write operations acquire the Mutex lock exclusively.     │
//! │        Snapshots (Cart clones) are handed out, never references.    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use trolley_core::validation::validate_customer_id;
use trolley_core::{Cart, Money, Product};

use crate::config::RegistryConfig;
use crate::error::{RegistryError, RegistryResult};

// =============================================================================
// Checkout Summary
// =============================================================================

/// The observable outcome of a successful checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSummary {
    /// The customer who checked out.
    pub customer_id: String,

    /// Units across all line items at checkout time.
    pub total_quantity: i64,

    /// Cart total at checkout time (normalized per cart rules).
    pub total_value: Money,
}

// =============================================================================
// Checkout Emitter
// =============================================================================

/// Trait for observing checkouts (receipt printers, audit logs, metrics).
///
/// The registry calls this exactly once per successful checkout, after the
/// cart has been removed and the lock released.
pub trait CheckoutEmitter: Send + Sync {
    /// Called with the summary of a completed checkout.
    fn emit_checkout(&self, summary: &CheckoutSummary);
}

/// Default emitter: logs the summary through `tracing`.
pub struct TracingEmitter;

impl CheckoutEmitter for TracingEmitter {
    fn emit_checkout(&self, summary: &CheckoutSummary) {
        info!(
            customer_id = %summary.customer_id,
            total_quantity = summary.total_quantity,
            total_value = %summary.total_value,
            "checkout completed"
        );
    }
}

/// No-op emitter for testing.
pub struct NoOpEmitter;

impl CheckoutEmitter for NoOpEmitter {
    fn emit_checkout(&self, _summary: &CheckoutSummary) {}
}

// =============================================================================
// Cart Registry
// =============================================================================

/// Shared registry of live carts.
///
/// Cloning is cheap and every clone addresses the same underlying map, so
/// the sweeper and any number of foreground callers can hold their own
/// handle.
#[derive(Clone)]
pub struct CartRegistry {
    inner: Arc<RegistryInner>,
}

struct RegistryInner {
    /// Live carts keyed by customer id. At most one cart per customer.
    carts: Mutex<HashMap<String, Cart>>,

    /// TTL and sweep cadence.
    config: RegistryConfig,

    /// Checkout observer.
    emitter: Arc<dyn CheckoutEmitter>,
}

impl CartRegistry {
    /// Creates a registry with production defaults.
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Creates a registry with a custom configuration.
    pub fn with_config(config: RegistryConfig) -> Self {
        Self::with_emitter(config, Arc::new(TracingEmitter))
    }

    /// Creates a registry with a custom configuration and checkout emitter.
    pub fn with_emitter(config: RegistryConfig, emitter: Arc<dyn CheckoutEmitter>) -> Self {
        CartRegistry {
            inner: Arc::new(RegistryInner {
                carts: Mutex::new(HashMap::new()),
                config,
                emitter,
            }),
        }
    }

    /// Returns the configuration this registry runs under.
    pub fn config(&self) -> &RegistryConfig {
        &self.inner.config
    }

    // -------------------------------------------------------------------------
    // Lock helpers
    // -------------------------------------------------------------------------

    /// Executes a function with read access to the cart map.
    fn with_carts<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&HashMap<String, Cart>) -> R,
    {
        let carts = self.inner.carts.lock().expect("cart registry mutex poisoned");
        f(&carts)
    }

    /// Executes a function with write access to the cart map.
    fn with_carts_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut HashMap<String, Cart>) -> R,
    {
        let mut carts = self.inner.carts.lock().expect("cart registry mutex poisoned");
        f(&mut carts)
    }

    // -------------------------------------------------------------------------
    // Session lifecycle
    // -------------------------------------------------------------------------

    /// Returns the live cart for a customer, creating an empty one first if
    /// none exists. Idempotent per customer id.
    ///
    /// The returned value is a snapshot; mutations go through the item
    /// operations below.
    ///
    /// ## Errors
    /// [`RegistryError::Validation`] when the customer id is blank.
    pub fn create(&self, customer_id: &str) -> RegistryResult<Cart> {
        validate_customer_id(customer_id)?;

        let cart = self.with_carts_mut(|carts| {
            carts
                .entry(customer_id.to_string())
                .or_insert_with(|| {
                    debug!(customer_id, "created new cart session");
                    Cart::new(customer_id)
                })
                .clone()
        });

        Ok(cart)
    }

    /// Returns a snapshot of the live cart for a customer, or `None`.
    pub fn find(&self, customer_id: &str) -> Option<Cart> {
        self.with_carts(|carts| carts.get(customer_id).cloned())
    }

    /// Removes the live cart for a customer. Returns whether one was removed.
    pub fn invalidate(&self, customer_id: &str) -> bool {
        let removed = self.with_carts_mut(|carts| carts.remove(customer_id).is_some());
        if removed {
            debug!(customer_id, "cart session invalidated");
        }
        removed
    }

    /// Checks out a customer's cart.
    ///
    /// On success the summary is emitted through the registry's
    /// [`CheckoutEmitter`], the cart is removed, and `Some(summary)` is
    /// returned. `None` means the customer had no live cart; nothing is
    /// emitted and nothing changes.
    pub fn checkout(&self, customer_id: &str) -> Option<CheckoutSummary> {
        let summary = self.with_carts_mut(|carts| {
            let cart = carts.get(customer_id)?;
            let summary = CheckoutSummary {
                customer_id: cart.customer_id().to_string(),
                total_quantity: cart.total_quantity(),
                total_value: cart.total_value(),
            };
            carts.remove(customer_id);
            Some(summary)
        })?;

        self.inner.emitter.emit_checkout(&summary);
        Some(summary)
    }

    // -------------------------------------------------------------------------
    // Item operations (routed to one customer's cart)
    // -------------------------------------------------------------------------

    /// Adds a product to a customer's live cart, applying the cart merge and
    /// validation rules.
    ///
    /// ## Errors
    /// - [`RegistryError::CustomerNotFound`] when no live cart exists
    /// - [`RegistryError::Cart`] for cart rule violations (the cart is
    ///   left unchanged)
    pub fn add_item(
        &self,
        customer_id: &str,
        product: Product,
        unit_price: Money,
        quantity: i64,
    ) -> RegistryResult<()> {
        self.with_carts_mut(|carts| {
            let cart = carts
                .get_mut(customer_id)
                .ok_or_else(|| RegistryError::CustomerNotFound {
                    customer_id: customer_id.to_string(),
                })?;
            cart.add_item(product, unit_price, quantity)?;
            Ok(())
        })
    }

    /// Removes the line item for a product from a customer's live cart.
    /// Returns whether a removal occurred.
    pub fn remove_item(&self, customer_id: &str, product: &Product) -> RegistryResult<bool> {
        self.with_carts_mut(|carts| {
            let cart = carts
                .get_mut(customer_id)
                .ok_or_else(|| RegistryError::CustomerNotFound {
                    customer_id: customer_id.to_string(),
                })?;
            Ok(cart.remove_item(product))
        })
    }

    /// Removes the line item at a 0-based position from a customer's cart.
    pub fn remove_item_at(&self, customer_id: &str, position: usize) -> RegistryResult<()> {
        self.with_carts_mut(|carts| {
            let cart = carts
                .get_mut(customer_id)
                .ok_or_else(|| RegistryError::CustomerNotFound {
                    customer_id: customer_id.to_string(),
                })?;
            cart.remove_item_at(position)?;
            Ok(())
        })
    }

    // -------------------------------------------------------------------------
    // Aggregates
    // -------------------------------------------------------------------------

    /// Total units across all live carts.
    pub fn total_quantity(&self) -> i64 {
        self.with_carts(|carts| carts.values().map(Cart::total_quantity).sum())
    }

    /// Total value across all live carts: the sum of the per-cart totals
    /// (each already normalized by the cart).
    pub fn total_value(&self) -> Money {
        self.with_carts(|carts| carts.values().map(Cart::total_value).sum())
    }

    /// Average ticket: total value across all carts divided by total unit
    /// quantity, rounded to 2 decimal places half-up.
    ///
    /// ## Errors
    /// [`RegistryError::AverageTicketUndefined`] when the total quantity is
    /// zero. The division is never attempted in that case.
    pub fn average_ticket(&self) -> RegistryResult<Money> {
        let (total_value, total_quantity) = self.with_carts(|carts| {
            (
                carts.values().map(Cart::total_value).sum::<Money>(),
                carts.values().map(Cart::total_quantity).sum::<i64>(),
            )
        });

        if total_quantity == 0 {
            return Err(RegistryError::AverageTicketUndefined);
        }

        total_value
            .checked_div(Money::new(Decimal::from(total_quantity)))
            .map(|avg| avg.round_cents())
            .ok_or(RegistryError::AverageTicketUndefined)
    }

    // -------------------------------------------------------------------------
    // Introspection & sweep support
    // -------------------------------------------------------------------------

    /// Number of live carts.
    pub fn cart_count(&self) -> usize {
        self.with_carts(|carts| carts.len())
    }

    /// Customer ids of all live carts, in no particular order.
    pub fn customer_ids(&self) -> Vec<String> {
        self.with_carts(|carts| carts.keys().cloned().collect())
    }

    /// Removes every expired cart and returns the evicted customer ids.
    ///
    /// One pass over the map: victims are collected first, then removed, so
    /// a surprise with one cart cannot leave the pass half-done for the
    /// rest. Called by the background sweeper on every tick; also public
    /// for callers that drive their own schedule.
    pub fn evict_expired(&self) -> Vec<String> {
        let now = chrono::Utc::now();
        let ttl = self.inner.config.session_ttl_minutes;

        let evicted = self.with_carts_mut(|carts| {
            let victims: Vec<String> = carts
                .iter()
                .filter(|(_, cart)| cart.is_expired_at(now, ttl))
                .map(|(customer_id, _)| customer_id.clone())
                .collect();

            for customer_id in &victims {
                carts.remove(customer_id);
            }
            victims
        });

        for customer_id in &evicted {
            info!(customer_id = %customer_id, "evicted expired cart session");
        }
        evicted
    }
}

impl Default for CartRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use std::sync::Mutex as StdMutex;

    fn money(s: &str) -> Money {
        Money::new(s.parse().unwrap())
    }

    fn product(code: i64) -> Product {
        Product::new(code, format!("Product {code}"))
    }

    /// Emitter that records every summary it sees.
    struct RecordingEmitter {
        seen: StdMutex<Vec<CheckoutSummary>>,
    }

    impl RecordingEmitter {
        fn new() -> Arc<Self> {
            Arc::new(RecordingEmitter {
                seen: StdMutex::new(Vec::new()),
            })
        }

        fn summaries(&self) -> Vec<CheckoutSummary> {
            self.seen.lock().unwrap().clone()
        }
    }

    impl CheckoutEmitter for RecordingEmitter {
        fn emit_checkout(&self, summary: &CheckoutSummary) {
            self.seen.lock().unwrap().push(summary.clone());
        }
    }

    #[test]
    fn test_create_is_idempotent_per_customer() {
        let registry = CartRegistry::new();

        registry.create("alice").unwrap();
        registry
            .add_item("alice", product(1), money("10.00"), 2)
            .unwrap();

        // Second create returns the same live cart, items intact
        let again = registry.create("alice").unwrap();
        assert_eq!(again.total_quantity(), 2);
        assert_eq!(registry.cart_count(), 1);
    }

    #[test]
    fn test_create_rejects_blank_customer_id() {
        let registry = CartRegistry::new();

        assert!(matches!(
            registry.create("  "),
            Err(RegistryError::Validation(_))
        ));
        assert_eq!(registry.cart_count(), 0);
    }

    #[test]
    fn test_find_returns_snapshot_or_none() {
        let registry = CartRegistry::new();
        assert!(registry.find("alice").is_none());

        registry.create("alice").unwrap();
        let cart = registry.find("alice").unwrap();
        assert_eq!(cart.customer_id(), "alice");
        assert!(cart.is_empty());
    }

    #[test]
    fn test_invalidate() {
        let registry = CartRegistry::new();
        registry.create("alice").unwrap();

        assert!(registry.invalidate("alice"));
        assert!(registry.find("alice").is_none());
        assert!(!registry.invalidate("alice"));
    }

    #[test]
    fn test_item_ops_require_live_cart() {
        let registry = CartRegistry::new();

        assert!(matches!(
            registry.add_item("ghost", product(1), money("1.00"), 1),
            Err(RegistryError::CustomerNotFound { .. })
        ));
        assert!(matches!(
            registry.remove_item("ghost", &product(1)),
            Err(RegistryError::CustomerNotFound { .. })
        ));
        assert!(matches!(
            registry.remove_item_at("ghost", 0),
            Err(RegistryError::CustomerNotFound { .. })
        ));
    }

    #[test]
    fn test_item_ops_route_to_the_cart() {
        let registry = CartRegistry::new();
        registry.create("alice").unwrap();

        registry
            .add_item("alice", product(1), money("10.00"), 2)
            .unwrap();
        registry
            .add_item("alice", product(2), money("5.00"), 1)
            .unwrap();

        assert!(registry.remove_item("alice", &product(1)).unwrap());
        assert!(!registry.remove_item("alice", &product(1)).unwrap());

        registry.remove_item_at("alice", 0).unwrap();
        assert!(registry.find("alice").unwrap().is_empty());

        assert!(matches!(
            registry.remove_item_at("alice", 0),
            Err(RegistryError::Cart(_))
        ));
    }

    #[test]
    fn test_checkout_unknown_customer_is_none_with_no_side_effects() {
        let emitter = RecordingEmitter::new();
        let registry = CartRegistry::with_emitter(RegistryConfig::default(), emitter.clone());
        registry.create("alice").unwrap();

        assert!(registry.checkout("bob").is_none());
        assert!(emitter.summaries().is_empty());
        assert_eq!(registry.cart_count(), 1);
    }

    #[test]
    fn test_checkout_emits_summary_and_invalidates() {
        let emitter = RecordingEmitter::new();
        let registry = CartRegistry::with_emitter(RegistryConfig::default(), emitter.clone());

        registry.create("alice").unwrap();
        registry
            .add_item("alice", product(1), money("12.00"), 5)
            .unwrap();

        let summary = registry.checkout("alice").unwrap();
        assert_eq!(summary.customer_id, "alice");
        assert_eq!(summary.total_quantity, 5);
        assert_eq!(summary.total_value, money("60.00"));

        assert_eq!(emitter.summaries(), vec![summary]);
        assert!(registry.find("alice").is_none());
    }

    #[test]
    fn test_aggregates_across_carts() {
        let registry = CartRegistry::with_emitter(RegistryConfig::default(), Arc::new(NoOpEmitter));

        registry.create("alice").unwrap();
        registry
            .add_item("alice", product(1), money("10.00"), 2)
            .unwrap();

        registry.create("bob").unwrap();
        registry
            .add_item("bob", product(2), money("15.00"), 3)
            .unwrap();

        assert_eq!(registry.total_quantity(), 5);
        assert_eq!(registry.total_value(), money("65.00"));
        assert_eq!(registry.average_ticket().unwrap(), money("13.00"));
    }

    #[test]
    fn test_average_ticket_rounds_half_up() {
        let registry = CartRegistry::new();

        // 0.025 × 2 = 0.05 total over 2 units → 0.025 each → 0.03 half-up
        registry.create("alice").unwrap();
        registry
            .add_item("alice", product(1), money("0.025"), 2)
            .unwrap();
        assert_eq!(registry.average_ticket().unwrap(), money("0.03"));

        // 10.00 over 3 units → 3.333… → 3.33
        let registry = CartRegistry::new();
        registry.create("carol").unwrap();
        registry
            .add_item("carol", product(1), money("10.00"), 1)
            .unwrap();
        registry.create("dave").unwrap();
        registry
            .add_item("dave", product(2), money("0.00001"), 2)
            .unwrap();
        // total 10.00002 over 3 units → 3.33334 → 3.33
        assert_eq!(registry.average_ticket().unwrap(), money("3.33"));
    }

    #[test]
    fn test_average_ticket_guards_division_by_zero() {
        let registry = CartRegistry::new();
        assert!(matches!(
            registry.average_ticket(),
            Err(RegistryError::AverageTicketUndefined)
        ));

        // A live but empty cart still has zero quantity
        registry.create("alice").unwrap();
        assert!(matches!(
            registry.average_ticket(),
            Err(RegistryError::AverageTicketUndefined)
        ));
    }

    #[test]
    fn test_evict_expired_removes_only_expired_carts() {
        let registry = CartRegistry::new();
        registry.create("fresh").unwrap();

        // Plant a cart born 20 minutes ago next to the fresh one
        let stale = Cart::with_created_at("stale", Utc::now() - Duration::minutes(20));
        registry.with_carts_mut(|carts| {
            carts.insert("stale".to_string(), stale);
        });

        let evicted = registry.evict_expired();
        assert_eq!(evicted, vec!["stale".to_string()]);
        assert!(registry.find("stale").is_none());
        assert!(registry.find("fresh").is_some());
    }

    #[test]
    fn test_evict_expired_with_zero_ttl_clears_everything() {
        let config = RegistryConfig {
            session_ttl_minutes: 0,
            ..Default::default()
        };
        let registry = CartRegistry::with_config(config);

        registry.create("alice").unwrap();
        registry.create("bob").unwrap();

        let mut evicted = registry.evict_expired();
        evicted.sort();
        assert_eq!(evicted, vec!["alice".to_string(), "bob".to_string()]);
        assert_eq!(registry.cart_count(), 0);
    }

    #[test]
    fn test_customer_ids_lists_live_carts() {
        let registry = CartRegistry::new();
        registry.create("alice").unwrap();
        registry.create("bob").unwrap();

        let mut ids = registry.customer_ids();
        ids.sort();
        assert_eq!(ids, vec!["alice".to_string(), "bob".to_string()]);
    }

    #[test]
    fn test_checkout_summary_serializes_camel_case() {
        let summary = CheckoutSummary {
            customer_id: "alice".to_string(),
            total_quantity: 5,
            total_value: money("60.00"),
        };

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["customerId"], "alice");
        assert_eq!(json["totalQuantity"], 5);
        assert_eq!(json["totalValue"], "60.00");
    }
}
