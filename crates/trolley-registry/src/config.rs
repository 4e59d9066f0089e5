//! # Registry Configuration
//!
//! Runtime knobs for the registry and its sweeper. The defaults are the
//! production values; tests shorten them to make timing observable.

use std::time::Duration;

use trolley_core::SESSION_TTL_MINUTES;

// =============================================================================
// Registry Configuration
// =============================================================================

/// Configuration for a [`CartRegistry`](crate::CartRegistry) and the sweep
/// task attached to it.
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Whole minutes a cart session stays live. Elapsed time is truncated
    /// to minutes before comparison, so a cart is still live at 14:59 of
    /// age under the 15-minute default.
    pub session_ttl_minutes: i64,

    /// How often the background sweep scans for expired carts.
    pub sweep_interval: Duration,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        RegistryConfig {
            session_ttl_minutes: SESSION_TTL_MINUTES,
            sweep_interval: Duration::from_secs(1),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_carry_production_values() {
        let config = RegistryConfig::default();
        assert_eq!(config.session_ttl_minutes, 15);
        assert_eq!(config.sweep_interval, Duration::from_secs(1));
    }
}
