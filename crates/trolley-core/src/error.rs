//! # Error Types
//!
//! Domain-specific error types for trolley-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                 │
//! │                                                                     │
//! │  trolley-core errors (this file)                                    │
//! │  ├── CartError        - Cart operation failures                     │
//! │  └── ValidationError  - Input validation failures                   │
//! │                                                                     │
//! │  trolley-registry errors (separate crate)                           │
//! │  └── RegistryError    - Registry-level failures (wraps the above)   │
//! │                                                                     │
//! │  Flow: ValidationError → CartError → RegistryError → caller         │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product code, position, etc.)
//! 3. Errors are enum variants, never bare Strings
//! 4. Absence ("no such item") is a return value, not an error — only rule
//!    violations become errors

use thiserror::Error;

// =============================================================================
// Cart Error
// =============================================================================

/// Cart operation errors.
///
/// These represent business rule violations. "Not present" outcomes
/// (removing a product the cart doesn't hold) are reported as `bool`
/// returns on the cart itself, not through this enum.
#[derive(Debug, Error)]
pub enum CartError {
    /// A new line item was offered with a non-positive unit price or a
    /// non-positive quantity.
    ///
    /// ## When This Occurs
    /// - Adding a product the cart doesn't already hold with `price <= 0`
    /// - Adding such a product with `quantity <= 0`
    ///
    /// Never raised when merging into an existing line item: the quantity
    /// sum and price overwrite always succeed arithmetically.
    #[error("invalid product {code}: {source}")]
    InvalidProduct {
        code: i64,
        #[source]
        source: ValidationError,
    },

    /// Positional removal with an index past the end of the item list.
    #[error("position {position} is out of range (cart holds {len} items)")]
    PositionOutOfRange { position: usize, len: usize },
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when caller-supplied input doesn't meet requirements.
/// Used for early validation before any state is touched.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CartError.
pub type CoreResult<T> = Result<T, CartError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_product_message_carries_field() {
        let err = CartError::InvalidProduct {
            code: 3,
            source: ValidationError::MustBePositive {
                field: "unit_price".to_string(),
            },
        };
        assert_eq!(err.to_string(), "invalid product 3: unit_price must be positive");
    }

    #[test]
    fn test_position_out_of_range_message() {
        let err = CartError::PositionOutOfRange { position: 5, len: 2 };
        assert_eq!(
            err.to_string(),
            "position 5 is out of range (cart holds 2 items)"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "customer_id".to_string(),
        };
        assert_eq!(err.to_string(), "customer_id is required");

        let err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        assert_eq!(err.to_string(), "quantity must be positive");
    }
}
