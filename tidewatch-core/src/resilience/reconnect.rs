//! Generic reconnect wrapper for streaming feeds.
//!
//! Generalizes `bog-core::resilience::reconnect::ResilientMarketFeed` (which
//! wraps a venue-specific `huginn::MarketFeed`) into a connection-state
//! machine over any `connect`/`disconnect` pair, paired with
//! `ExponentialBackoff` for the retry delay between attempts.

use std::time::Duration;
use tracing::{info, warn};

use crate::resilience::backoff::{BackoffConfig, ExponentialBackoff};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Connected,
    Reconnecting,
    Failed,
}

#[derive(Debug, Clone, Default)]
pub struct ReconnectionStats {
    pub total_disconnects: u64,
    pub total_reconnect_attempts: u64,
    pub total_reconnect_successes: u64,
}

/// Drives connect/disconnect attempts for a feed through a backoff
/// schedule, tracking the current `ConnectionState` and cumulative stats.
/// Does not own the feed itself — callers supply a connect closure so this
/// stays independent of any particular feed type.
pub struct Resilient {
    state: ConnectionState,
    backoff: ExponentialBackoff,
    stats: ReconnectionStats,
}

impl Resilient {
    pub fn new(backoff_config: BackoffConfig) -> Self {
        Self {
            state: ConnectionState::Reconnecting,
            backoff: ExponentialBackoff::with_config(backoff_config),
            stats: ReconnectionStats::default(),
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn stats(&self) -> &ReconnectionStats {
        &self.stats
    }

    /// Attempts `connect_fn` once; on success resets the backoff and marks
    /// `Connected`, on failure returns the delay to wait before the next
    /// attempt (or `None` once the retry budget, if any, is exhausted).
    pub fn try_connect<F, E>(&mut self, mut connect_fn: F) -> Result<(), Option<Duration>>
    where
        F: FnMut() -> Result<(), E>,
        E: std::fmt::Display,
    {
        self.stats.total_reconnect_attempts += 1;
        match connect_fn() {
            Ok(()) => {
                self.state = ConnectionState::Connected;
                self.stats.total_reconnect_successes += 1;
                self.backoff.reset();
                info!("feed reconnected");
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "feed connect attempt failed");
                self.state = ConnectionState::Reconnecting;
                match self.backoff.next_delay() {
                    Some(delay) => Err(Some(delay)),
                    None => {
                        self.state = ConnectionState::Failed;
                        Err(None)
                    }
                }
            }
        }
    }

    pub fn mark_disconnected(&mut self) {
        self.state = ConnectionState::Reconnecting;
        self.stats.total_disconnects += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn successful_connect_resets_backoff_and_marks_connected() {
        let mut r = Resilient::new(BackoffConfig::default());
        let result: Result<(), Option<Duration>> = r.try_connect(|| Ok::<(), &str>(()));
        assert!(result.is_ok());
        assert_eq!(r.state(), ConnectionState::Connected);
        assert_eq!(r.stats().total_reconnect_successes, 1);
    }

    #[test]
    fn repeated_failures_eventually_mark_failed() {
        let config = BackoffConfig {
            initial_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(2),
            multiplier: 1.0,
            max_retries: Some(2),
            jitter_factor: 0.0,
        };
        let mut r = Resilient::new(config);
        assert!(r.try_connect(|| Err::<(), &str>("down")).is_err());
        assert!(r.try_connect(|| Err::<(), &str>("down")).is_err());
        let last = r.try_connect(|| Err::<(), &str>("down"));
        assert_eq!(last, Err(None));
        assert_eq!(r.state(), ConnectionState::Failed);
    }
}
