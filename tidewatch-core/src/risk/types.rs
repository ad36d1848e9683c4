//! Configuration and limit types for the risk manager.

use serde::{Deserialize, Serialize};

/// Immutable risk configuration: daily-loss, position-size, and
/// open-trade-count limits feeding the one-way circuit breaker, over `f64`
/// throughout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskLimits {
    /// Carried for config round-tripping only — never enforced. Only
    /// `max_daily_loss_value` trips the breaker; see `DESIGN.md` Open
    /// Question 1.
    pub max_daily_loss_pct: f64,
    pub max_daily_loss_value: f64,
    pub max_position_size_pct: f64,
    pub max_open_trades: u32,
    pub circuit_breaker_enabled: bool,
}

impl Default for RiskLimits {
    fn default() -> Self {
        Self {
            max_daily_loss_pct: 5.0,
            max_daily_loss_value: 500.0,
            max_position_size_pct: 10.0,
            max_open_trades: 5,
            circuit_breaker_enabled: true,
        }
    }
}
