//! Domain-specific error types for the trading pipeline.
//!
//! Every component boundary in the engine returns one of these instead of a
//! stringly-typed failure, so callers can match on the kind of rejection
//! rather than parse a message.

use thiserror::Error;

/// Invalid arguments passed into a Position/Risk/Inventory operation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ArgumentError {
    #[error("trade size must be positive, got {size}")]
    NonPositiveSize { size: f64 },

    #[error("trade price must be positive, got {price}")]
    NonPositivePrice { price: f64 },

    #[error("account equity must be positive, got {equity}")]
    NonPositiveEquity { equity: f64 },

    #[error("LIMIT signal is missing a price")]
    MissingLimitPrice,

    #[error("invalid side: {0}")]
    InvalidSide(String),
}

/// Raised by the inventory manager when a hypothetical post-trade exposure
/// would breach a configured limit. Soft, per-signal: the engine logs it as
/// `SignalRejected` and moves on to the next signal.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InventoryError {
    #[error("{0}")]
    Argument(#[from] ArgumentError),

    #[error(
        "post-trade quantity {new_qty} would exceed max_abs_qty {max_abs_qty}"
    )]
    AbsQtyExceeded { new_qty: f64, max_abs_qty: f64 },

    #[error(
        "post-trade notional is {notional_pct:.4}% of equity, exceeds max_notional_pct {max_notional_pct}"
    )]
    NotionalExceeded {
        notional_pct: f64,
        max_notional_pct: f64,
    },
}

/// Session-fatal: once tripped, the risk manager never re-arms within a run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RiskError {
    #[error("{0}")]
    Argument(#[from] ArgumentError),

    #[error(
        "circuit breaker tripped: position size {position_pct:.4}% of equity exceeds max_position_size_pct {max_position_size_pct}"
    )]
    CircuitBreakerTripped {
        position_pct: f64,
        max_position_size_pct: f64,
    },

    #[error(
        "circuit breaker tripped: daily loss {daily_pnl:.2} breaches max_daily_loss_value {max_daily_loss_value}"
    )]
    DailyLossBreached {
        daily_pnl: f64,
        max_daily_loss_value: f64,
    },

    #[error(
        "circuit breaker tripped: open trades {open_trades} would exceed max_open_trades {max_open_trades}"
    )]
    OpenTradesExceeded {
        open_trades: u32,
        max_open_trades: u32,
    },

    #[error("risk manager already tripped, no further trading permitted this session")]
    AlreadyTripped,
}

impl RiskError {
    /// True for any variant that represents a circuit-breaker trip (as
    /// opposed to a plain argument error).
    pub fn is_circuit_breaker(&self) -> bool {
        matches!(
            self,
            RiskError::CircuitBreakerTripped { .. }
                | RiskError::DailyLossBreached { .. }
                | RiskError::OpenTradesExceeded { .. }
                | RiskError::AlreadyTripped
        )
    }
}

/// Raised by a `Strategy::on_tick` implementation. Caught by the engine and
/// turned into an `EngineEvent::Error`; the tick's remaining processing is
/// skipped but the engine keeps running.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("strategy error: {message}")]
pub struct StrategyError {
    pub message: String,
}

impl StrategyError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Transport-layer failures from a feed or execution client. Retried with
/// backoff at the transport layer (see `resilience`); not expected to reach
/// the engine unless the retry budget is exhausted.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("transport error: {message}")]
pub struct TransportError {
    pub message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn risk_error_classifies_circuit_breaker_variants() {
        assert!(RiskError::AlreadyTripped.is_circuit_breaker());
        assert!(RiskError::OpenTradesExceeded {
            open_trades: 4,
            max_open_trades: 3
        }
        .is_circuit_breaker());
        assert!(!RiskError::Argument(ArgumentError::NonPositiveEquity { equity: 0.0 })
            .is_circuit_breaker());
    }

    #[test]
    fn inventory_error_wraps_argument_error() {
        let err: InventoryError = ArgumentError::NonPositiveSize { size: -1.0 }.into();
        assert!(matches!(err, InventoryError::Argument(_)));
    }
}
