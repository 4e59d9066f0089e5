//! # trolley-registry: Live Carts and the Expiry Sweep
//!
//! The registry crate owns the system's shared state (all live carts, keyed
//! by customer) and its only background task (the expiry sweep).
//!
//! ## Components
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      trolley-registry                               │
//! │                                                                     │
//! │  ┌────────────────────────────┐     ┌────────────────────────────┐  │
//! │  │        CartRegistry        │◄────│       ExpirySweeper        │  │
//! │  │                            │tick │                            │  │
//! │  │  create / find /           │     │  interval + select! loop   │  │
//! │  │  invalidate / checkout     │     │  graceful shutdown handle  │  │
//! │  │  item ops / aggregates     │     │                            │  │
//! │  └────────────┬───────────────┘     └────────────────────────────┘  │
//! │               │                                                     │
//! │               ▼                                                     │
//! │  ┌────────────────────────────┐                                     │
//! │  │   trolley-core::Cart       │   (pure logic, no locks)            │
//! │  └────────────────────────────┘                                     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust,no_run
//! use trolley_core::{Money, Product};
//! use trolley_registry::{CartRegistry, ExpirySweeper};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = CartRegistry::new();
//! let sweeper = ExpirySweeper::spawn(registry.clone());
//!
//! registry.create("alice")?;
//! registry.add_item("alice", Product::new(1, "Coffee"), Money::from_major_minor(10, 0), 2)?;
//! let summary = registry.checkout("alice");
//! assert!(summary.is_some());
//!
//! sweeper.shutdown().await;
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod registry;
pub mod sweeper;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use config::RegistryConfig;
pub use error::{RegistryError, RegistryResult};
pub use registry::{CartRegistry, CheckoutEmitter, CheckoutSummary, NoOpEmitter, TracingEmitter};
pub use sweeper::{ExpirySweeper, SweeperHandle};
