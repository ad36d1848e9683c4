//! Session risk manager: a one-way circuit breaker over daily loss,
//! position size, and concurrent open trades.
//!
//! Grounded on `original_source/core/risk.py::RiskManager`. The Python
//! original has no day-boundary concept here, so `daily_pnl` is kept as a
//! plain session accumulator rather than adding a midnight rollover (see
//! `DESIGN.md`).

use tracing::{info, warn};

use crate::core::errors::{ArgumentError, RiskError};
use crate::risk::types::RiskLimits;

/// `ARMED` until any breach trips it; `TRIPPED` is terminal for the life of
/// the manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakerState {
    Armed,
    Tripped,
}

#[derive(Debug, Clone)]
pub struct RiskManager {
    limits: RiskLimits,
    state: BreakerState,
    daily_pnl: f64,
    open_trades: u32,
}

impl RiskManager {
    pub fn new(limits: RiskLimits) -> Self {
        Self {
            limits,
            state: BreakerState::Armed,
            daily_pnl: 0.0,
            open_trades: 0,
        }
    }

    pub fn state(&self) -> BreakerState {
        self.state
    }

    pub fn is_tripped(&self) -> bool {
        self.state == BreakerState::Tripped
    }

    pub fn daily_pnl(&self) -> f64 {
        self.daily_pnl
    }

    pub fn open_trades(&self) -> u32 {
        self.open_trades
    }

    fn trip(&mut self, err: RiskError) -> RiskError {
        self.state = BreakerState::Tripped;
        warn!(reason = %err, "risk manager circuit breaker tripped");
        err
    }

    /// Checks a hypothetical trade's notional against `max_position_size_pct`
    /// of account equity. Trips the breaker (and returns the trip error) on
    /// breach; does not itself mutate any counter.
    pub fn validate_position_size(
        &mut self,
        equity: f64,
        notional: f64,
    ) -> Result<(), RiskError> {
        if self.is_tripped() {
            return Err(RiskError::AlreadyTripped);
        }
        if equity <= 0.0 {
            return Err(ArgumentError::NonPositiveEquity { equity }.into());
        }

        let position_pct = (notional.abs() / equity) * 100.0;
        if position_pct > self.limits.max_position_size_pct {
            let err = RiskError::CircuitBreakerTripped {
                position_pct,
                max_position_size_pct: self.limits.max_position_size_pct,
            };
            return Err(self.trip(err));
        }
        Ok(())
    }

    /// Folds a just-realized trade PnL into the daily accumulator. No-op
    /// (but still `Ok`) once tripped — registering PnL after a trip cannot
    /// un-trip or re-trip the breaker.
    pub fn register_trade_pnl(&mut self, pnl: f64) -> Result<(), RiskError> {
        if self.is_tripped() {
            return Ok(());
        }

        self.daily_pnl += pnl;

        if self.limits.circuit_breaker_enabled
            && self.daily_pnl < 0.0
            && self.daily_pnl.abs() >= self.limits.max_daily_loss_value
        {
            let err = RiskError::DailyLossBreached {
                daily_pnl: self.daily_pnl,
                max_daily_loss_value: self.limits.max_daily_loss_value,
            };
            self.trip(err);
        }
        Ok(())
    }

    /// Reserves a slot for an in-flight trade. Trips (rather than merely
    /// rejecting) when the cap would be exceeded, matching the original's
    /// treatment of the open-trades cap as a circuit-breaker condition.
    pub fn increment_open_trades(&mut self) -> Result<(), RiskError> {
        if self.is_tripped() {
            return Err(RiskError::AlreadyTripped);
        }

        let next = self.open_trades + 1;
        if next > self.limits.max_open_trades {
            let err = RiskError::OpenTradesExceeded {
                open_trades: next,
                max_open_trades: self.limits.max_open_trades,
            };
            return Err(self.trip(err));
        }

        self.open_trades = next;
        info!(open_trades = self.open_trades, "open trade slot reserved");
        Ok(())
    }

    pub fn decrement_open_trades(&mut self) {
        self.open_trades = self.open_trades.saturating_sub(1);
    }
}
