//! # Expiry Sweeper
//!
//! Background task that evicts expired cart sessions.
//!
//! ## Sweep Loop
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Expiry Sweeper Flow                            │
//! │                                                                     │
//! │  ┌─────────────────────────────────────────────────────────────┐   │
//! │  │                     ExpirySweeper                           │   │
//! │  │                                                             │   │
//! │  │  loop {                                                     │   │
//! │  │    select! {                                                │   │
//! │  │      tick     => registry.evict_expired()                   │   │
//! │  │      shutdown => break                                      │   │
//! │  │    }                                                        │   │
//! │  │  }                                                          │   │
//! │  └─────────────────────────────────────────────────────────────┘   │
//! │                                                                     │
//! │  TIMING:                                                           │
//! │  • Tick interval: 1 second (RegistryConfig.sweep_interval)         │
//! │  • A tick always completes its pass and reschedules                │
//! │                                                                     │
//! │  SHUTDOWN:                                                         │
//! │  • SweeperHandle::shutdown() stops the task gracefully             │
//! │  • Dropping every handle closes the channel and stops it too,      │
//! │    so the sweep cannot leak past its registry's users              │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::registry::CartRegistry;

// =============================================================================
// Expiry Sweeper
// =============================================================================

/// Periodic eviction task for one [`CartRegistry`].
pub struct ExpirySweeper {
    /// Handle on the shared cart map.
    registry: CartRegistry,

    /// Shutdown receiver.
    shutdown_rx: mpsc::Receiver<()>,
}

/// Handle for controlling a running sweeper.
#[derive(Clone)]
pub struct SweeperHandle {
    /// Shutdown sender.
    shutdown_tx: mpsc::Sender<()>,
}

impl SweeperHandle {
    /// Triggers graceful shutdown. Idempotent; later calls are no-ops once
    /// the task has stopped.
    pub async fn shutdown(&self) {
        let _ = self.shutdown_tx.send(()).await;
    }
}

impl ExpirySweeper {
    /// Spawns the sweep task for a registry and returns its handle.
    ///
    /// The task ticks at the registry's configured `sweep_interval` and
    /// removes every expired cart on each tick. It runs until
    /// [`SweeperHandle::shutdown`] is called or all handles are dropped.
    pub fn spawn(registry: CartRegistry) -> SweeperHandle {
        let (shutdown_tx, shutdown_rx) = mpsc::channel(1);

        let sweeper = ExpirySweeper {
            registry,
            shutdown_rx,
        };
        tokio::spawn(sweeper.run());

        SweeperHandle { shutdown_tx }
    }

    /// Main sweep loop.
    async fn run(mut self) {
        let mut interval = tokio::time::interval(self.registry.config().sweep_interval);
        // A slow pass must not cause a burst of catch-up ticks
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(
            interval_ms = interval.period().as_millis() as u64,
            ttl_minutes = self.registry.config().session_ttl_minutes,
            "expiry sweeper started"
        );

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    let evicted = self.registry.evict_expired();
                    if !evicted.is_empty() {
                        debug!(count = evicted.len(), "sweep pass evicted carts");
                    }
                }

                // Some(()) is an explicit shutdown; None means every handle
                // was dropped. Either way the task must end.
                _ = self.shutdown_rx.recv() => {
                    break;
                }
            }
        }

        info!("expiry sweeper stopped");
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RegistryConfig;
    use std::time::Duration;
    use tokio::time::sleep;

    fn instant_expiry_config() -> RegistryConfig {
        RegistryConfig {
            session_ttl_minutes: 0,
            sweep_interval: Duration::from_millis(10),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_evicts_expired_carts() {
        let registry = CartRegistry::with_config(instant_expiry_config());
        registry.create("alice").unwrap();
        registry.create("bob").unwrap();

        let handle = ExpirySweeper::spawn(registry.clone());

        // A few ticks worth of (auto-advanced) time
        sleep(Duration::from_millis(50)).await;
        assert_eq!(registry.cart_count(), 0);

        handle.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_keeps_live_carts() {
        let config = RegistryConfig {
            sweep_interval: Duration::from_millis(10),
            ..Default::default()
        };
        let registry = CartRegistry::with_config(config);
        registry.create("alice").unwrap();

        let handle = ExpirySweeper::spawn(registry.clone());

        sleep(Duration::from_millis(50)).await;
        assert_eq!(registry.cart_count(), 1);

        handle.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_stops_sweeping() {
        let registry = CartRegistry::with_config(instant_expiry_config());
        let handle = ExpirySweeper::spawn(registry.clone());

        // Let the task start, then stop it
        sleep(Duration::from_millis(20)).await;
        handle.shutdown().await;
        sleep(Duration::from_millis(20)).await;

        // New carts outlive their zero TTL: nobody is sweeping anymore
        registry.create("late").unwrap();
        sleep(Duration::from_millis(100)).await;
        assert_eq!(registry.cart_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_every_handle_stops_the_task() {
        let registry = CartRegistry::with_config(instant_expiry_config());

        let handle = ExpirySweeper::spawn(registry.clone());
        drop(handle);

        // Give the task a chance to observe the closed channel
        sleep(Duration::from_millis(50)).await;

        registry.create("late").unwrap();
        sleep(Duration::from_millis(100)).await;
        assert_eq!(registry.cart_count(), 1);
    }
}
