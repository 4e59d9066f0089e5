//! # Registry Error Types
//!
//! Error types for registry-level operations.
//!
//! ## What Is and Isn't an Error
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  Reported as values (frequent, expected):                           │
//! │    • find() miss                → Option::None                      │
//! │    • invalidate() miss          → false                             │
//! │    • checkout() miss            → Option::None                      │
//! │                                                                     │
//! │  Reported as RegistryError (caller asked for fail-fast):            │
//! │    • item ops on unknown customer → CustomerNotFound                │
//! │    • average ticket with no items → AverageTicketUndefined          │
//! │    • blank customer id on create  → Validation                      │
//! │    • cart rule violations         → Cart (from trolley-core)        │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use trolley_core::{CartError, ValidationError};

// =============================================================================
// Registry Error
// =============================================================================

/// Registry operation errors.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// An item operation referenced a customer with no live cart.
    ///
    /// This is the fail-fast counterpart of `find()` returning `None`:
    /// mutating the cart of a customer who doesn't have one is a caller bug,
    /// not an expected outcome.
    #[error("no live cart for customer {customer_id}")]
    CustomerNotFound { customer_id: String },

    /// Average ticket requested while the total quantity across all live
    /// carts is zero. The division is guarded, never performed.
    #[error("average ticket is undefined: live carts hold no items")]
    AverageTicketUndefined,

    /// Input validation failed before any state was touched.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A cart-level rule violation, forwarded as-is.
    #[error(transparent)]
    Cart(#[from] CartError),
}

/// Convenience type alias for Results with RegistryError.
pub type RegistryResult<T> = Result<T, RegistryError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_not_found_message() {
        let err = RegistryError::CustomerNotFound {
            customer_id: "bob".to_string(),
        };
        assert_eq!(err.to_string(), "no live cart for customer bob");
    }

    #[test]
    fn test_validation_error_converts() {
        let err: RegistryError = ValidationError::Required {
            field: "customer_id".to_string(),
        }
        .into();
        assert!(matches!(err, RegistryError::Validation(_)));
        assert_eq!(err.to_string(), "validation error: customer_id is required");
    }

    #[test]
    fn test_cart_error_is_transparent() {
        let err: RegistryError = CartError::PositionOutOfRange { position: 9, len: 0 }.into();
        assert_eq!(err.to_string(), "position 9 is out of range (cart holds 0 items)");
    }
}
