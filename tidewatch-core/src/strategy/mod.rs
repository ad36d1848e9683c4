//! The strategy contract.
//!
//! ## Pipeline position
//!
//! ```text
//!  Feed ──tick──▶ Engine ──▶ Strategy::on_tick ──▶ [Signal] ──▶ risk gates ──▶ execution
//! ```
//!
//! A strategy sees only the tick stream — never the position, equity, or
//! risk state. It is free to hold rolling-window state internally (ring
//! buffers sized at construction, never grown at runtime), but `on_tick`
//! must be deterministic given the tick sequence so replays and backtests
//! are reproducible.
//!
//! This crate favors static dispatch: the engine is generic over
//! `S: Strategy` rather than boxing a trait object, so the pipeline
//! monomorphizes per strategy/executor pair. The trait is still
//! object-safe, so a driver that wants to pick a strategy at runtime from
//! config can box one if it needs to.

use crate::core::errors::StrategyError;
use crate::core::types::{Fill, Signal, Tick};

/// Optional fill/error hooks a strategy may care about. Both default to a
/// no-op, mirroring `original_source/core/strategy.py::StrategyBase`'s
/// no-op `on_fill`/`on_error`.
pub trait Strategy {
    /// Called once per tick. Returns zero or more signals, in the order
    /// they should be processed; an empty vec means "no action this tick".
    fn on_tick(&mut self, tick: &Tick) -> Result<Vec<Signal>, StrategyError>;

    /// Called by the engine after a signal of this strategy's making was
    /// executed. Default no-op.
    fn on_fill(&mut self, _fill: &Fill) {}

    /// Called by the engine when this strategy's `on_tick` itself returned
    /// an error, right before the error is turned into an `EngineEvent::Error`.
    /// Default no-op.
    fn on_error(&mut self, _err: &StrategyError) {}

    /// Human-readable name for logging; defaults to the type name.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Fixed-capacity rolling window used by the mean-reversion, momentum, and
/// adaptive-spread strategies. Backed by a `VecDeque` pre-allocated to
/// capacity and never grown past it. The window length is a runtime config
/// parameter here, not a compile-time constant, so a const-generic array
/// doesn't fit; a capacity-capped `VecDeque` is the idiomatic middle ground.
#[derive(Debug, Clone)]
pub struct RollingWindow {
    capacity: usize,
    values: std::collections::VecDeque<f64>,
}

impl RollingWindow {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "rolling window capacity must be positive");
        Self {
            capacity,
            values: std::collections::VecDeque::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, value: f64) {
        if self.values.len() == self.capacity {
            self.values.pop_front();
        }
        self.values.push_back(value);
    }

    pub fn is_full(&self) -> bool {
        self.values.len() == self.capacity
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &f64> {
        self.values.iter()
    }

    pub fn front(&self) -> Option<f64> {
        self.values.front().copied()
    }

    pub fn back(&self) -> Option<f64> {
        self.values.back().copied()
    }

    /// Sample mean and standard deviation (Bessel's correction, `n-1` in the
    /// denominator, floored at 1 sample so a single-element window returns
    /// `(value, 0.0)` instead of dividing by zero).
    pub fn mean_stddev(&self) -> (f64, f64) {
        let n = self.values.len();
        if n == 0 {
            return (0.0, 0.0);
        }
        let mean = self.values.iter().sum::<f64>() / n as f64;
        if n < 2 {
            return (mean, 0.0);
        }
        let variance =
            self.values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
        (mean, variance.sqrt())
    }
}

/// How a directional strategy restricts the side it is willing to trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SideBias {
    #[default]
    Both,
    LongOnly,
    ShortOnly,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rolling_window_drops_oldest_on_overflow() {
        let mut w = RollingWindow::new(3);
        w.push(1.0);
        w.push(2.0);
        w.push(3.0);
        assert!(w.is_full());
        w.push(4.0);
        assert_eq!(w.front(), Some(2.0));
        assert_eq!(w.back(), Some(4.0));
        assert_eq!(w.len(), 3);
    }

    #[test]
    fn mean_stddev_of_constant_series_is_zero_variance() {
        let mut w = RollingWindow::new(4);
        for _ in 0..4 {
            w.push(100.0);
        }
        let (mean, stddev) = w.mean_stddev();
        assert_eq!(mean, 100.0);
        assert_eq!(stddev, 0.0);
    }

    #[test]
    fn mean_stddev_single_sample_has_zero_stddev() {
        let mut w = RollingWindow::new(4);
        w.push(42.0);
        let (mean, stddev) = w.mean_stddev();
        assert_eq!(mean, 42.0);
        assert_eq!(stddev, 0.0);
    }
}
