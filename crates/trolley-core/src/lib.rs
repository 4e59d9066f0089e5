//! # trolley-core: Pure Business Logic for Trolley
//!
//! This crate is the **heart** of Trolley. It contains all cart business
//! logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Trolley Architecture                          │
//! │                                                                     │
//! │  ┌───────────────────────────────────────────────────────────────┐ │
//! │  │                 Driving Layer (not in workspace)              │ │
//! │  │     CLI shell, RPC surface, whatever embeds the registry      │ │
//! │  └─────────────────────────────┬─────────────────────────────────┘ │
//! │                                │                                    │
//! │  ┌─────────────────────────────▼─────────────────────────────────┐ │
//! │  │                 trolley-registry (async layer)                │ │
//! │  │     CartRegistry, checkout, aggregates, expiry sweeper        │ │
//! │  └─────────────────────────────┬─────────────────────────────────┘ │
//! │                                │                                    │
//! │  ┌─────────────────────────────▼─────────────────────────────────┐ │
//! │  │                ★ trolley-core (THIS CRATE) ★                  │ │
//! │  │                                                               │ │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌──────────┐  │ │
//! │  │   │   types   │  │   money   │  │   cart    │  │validation│  │ │
//! │  │   │  Product  │  │   Money   │  │   Cart    │  │  rules   │  │ │
//! │  │   │           │  │ rounding  │  │ LineItem  │  │  checks  │  │ │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └──────────┘  │ │
//! │  │                                                               │ │
//! │  │   NO I/O • NO LOCKS • NO CLOCK POLLING LOOPS • PURE LOGIC    │ │
//! │  └───────────────────────────────────────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product)
//! - [`money`] - Money type over exact decimal arithmetic
//! - [`cart`] - Cart and LineItem with merge/removal/total rules
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic given its inputs
//!    (expiry checks take the clock as an argument in their testable form)
//! 2. **No I/O**: Network, file system, database access is FORBIDDEN here
//! 3. **Decimal Money**: All monetary values are exact decimals, never floats
//! 4. **Explicit Errors**: All errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use trolley_core::Cart` instead of
// `use trolley_core::cart::Cart`

pub use cart::{Cart, LineItem};
pub use error::{CartError, CoreResult, ValidationError};
pub use money::Money;
pub use types::Product;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Minutes a cart session stays live before it is considered expired.
///
/// ## Business Reason
/// A customer who walked away should not hold a cart (and its aggregate
/// weight in average-ticket numbers) forever. The expiry check truncates to
/// whole minutes: a cart is live through 14:59 of elapsed time and expired
/// at exactly 15:00.
pub const SESSION_TTL_MINUTES: i64 = 15;

/// Significant digits kept when a cart total is normalized.
///
/// Matches the DECIMAL32 arithmetic the totals were historically computed
/// with: 7 significant digits, half-even rounding.
pub const TOTAL_SIGNIFICANT_DIGITS: u32 = 7;
