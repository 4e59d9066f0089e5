//! # Validation Module
//!
//! Input validation utilities for Trolley.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                              │
//! │                                                                     │
//! │  Layer 1: Driving layer (shell / RPC surface)                       │
//! │  ├── Parses raw text into typed values                              │
//! │  └── Immediate user feedback                                        │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 2: THIS MODULE + cart rules                                  │
//! │  ├── Non-empty customer ids                                         │
//! │  └── Positive prices and quantities                                 │
//! │                                                                     │
//! │  The core never trusts the driving layer: well-formed input is the  │
//! │  caller's job, rejecting malformed input is ours.                   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Validators
// =============================================================================

/// Validates a customer identifier.
///
/// ## Rules
/// - Must not be empty or whitespace-only
///
/// ## Example
/// ```rust
/// use trolley_core::validation::validate_customer_id;
///
/// assert!(validate_customer_id("alice").is_ok());
/// assert!(validate_customer_id("   ").is_err());
/// ```
pub fn validate_customer_id(customer_id: &str) -> ValidationResult<()> {
    if customer_id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "customer_id".to_string(),
        });
    }

    Ok(())
}

/// Validates a unit price for a new line item.
pub fn validate_unit_price(price: Money) -> ValidationResult<()> {
    if !price.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "unit_price".to_string(),
        });
    }

    Ok(())
}

/// Validates a quantity for a new line item.
pub fn validate_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_id_rejects_blank() {
        assert!(validate_customer_id("alice").is_ok());
        assert!(validate_customer_id("").is_err());
        assert!(validate_customer_id("  \t ").is_err());
    }

    #[test]
    fn test_unit_price_must_be_positive() {
        assert!(validate_unit_price(Money::from_major_minor(0, 1)).is_ok());
        assert!(validate_unit_price(Money::zero()).is_err());
        assert!(validate_unit_price(Money::from_major_minor(-1, 0)).is_err());
    }

    #[test]
    fn test_quantity_must_be_positive() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-3).is_err());
    }
}
