//! Average-price position accounting.
//!
//! This is a plain, single-threaded `f64` reimplementation of the weighted
//! average-price algorithm `bog-core` keeps as a lock-free fixed-point
//! `AtomicI64` structure in `core::types::Position` (`process_fill_fixed_with_fee`).
//! The engine here is cooperative and single-threaded, so there is no
//! lock-free requirement to carry over — only the arithmetic.

use crate::core::errors::ArgumentError;
use crate::core::types::{PositionSnapshot, Side};

/// Per-symbol linear position with average-price cost basis.
///
/// Invariant: `qty == 0.0 => avg_price == 0.0`. `avg_price` reflects the cost
/// basis of the currently open side only; closing trades never move it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Position {
    qty: f64,
    avg_price: f64,
    realized_pnl: f64,
}

impl Position {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn qty(&self) -> f64 {
        self.qty
    }

    pub fn avg_price(&self) -> f64 {
        self.avg_price
    }

    pub fn realized_pnl(&self) -> f64 {
        self.realized_pnl
    }

    pub fn is_flat(&self) -> bool {
        self.qty == 0.0
    }

    pub fn snapshot(&self) -> PositionSnapshot {
        PositionSnapshot {
            qty: self.qty,
            avg_price: self.avg_price,
            realized_pnl: self.realized_pnl,
        }
    }

    /// Mark-to-market PnL on the currently open quantity. Zero when flat.
    pub fn unrealized_pnl(&self, current_price: f64) -> f64 {
        if self.qty == 0.0 {
            return 0.0;
        }
        (current_price - self.avg_price) * self.qty.abs() * self.qty.signum()
    }

    /// Apply one fill to the position.
    ///
    /// Same-direction fills fold into a new size-weighted average price.
    /// Opposite-direction fills close `min(|qty|, size)` of the open
    /// position at the fill price, realizing PnL, then either reduce,
    /// zero, or flip-and-reopen the remainder depending on how the fill
    /// size compares to the open quantity.
    pub fn on_trade(&mut self, side: Side, size: f64, price: f64) -> Result<(), ArgumentError> {
        if size <= 0.0 {
            return Err(ArgumentError::NonPositiveSize { size });
        }
        if price <= 0.0 {
            return Err(ArgumentError::NonPositivePrice { price });
        }

        let dir = side.sign();

        if self.qty == 0.0 {
            self.qty = dir * size;
            self.avg_price = price;
            return Ok(());
        }

        let cur_dir = self.qty.signum();
        let cur_abs = self.qty.abs();

        if (cur_dir - dir).abs() < f64::EPSILON {
            // Same direction: weighted-average the cost basis.
            let new_abs = cur_abs + size;
            self.avg_price = (self.avg_price * cur_abs + price * size) / new_abs;
            self.qty = cur_dir * new_abs;
            return Ok(());
        }

        // Opposite direction: close, then reduce / zero / flip.
        let close_qty = cur_abs.min(size);
        self.realized_pnl += (price - self.avg_price) * close_qty * cur_dir;

        if size == cur_abs {
            self.qty = 0.0;
            self.avg_price = 0.0;
        } else if size < cur_abs {
            self.qty = cur_dir * (cur_abs - size);
            // avg_price unchanged: remaining open quantity keeps its basis.
        } else {
            self.qty = dir * (size - cur_abs);
            self.avg_price = price;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn opens_flat_position() {
        let mut p = Position::new();
        p.on_trade(Side::Buy, 1.0, 100.0).unwrap();
        assert_eq!(p.qty(), 1.0);
        assert_eq!(p.avg_price(), 100.0);
        assert_eq!(p.realized_pnl(), 0.0);
    }

    #[test]
    fn same_direction_weighted_average() {
        let mut p = Position::new();
        p.on_trade(Side::Buy, 1.0, 100.0).unwrap();
        p.on_trade(Side::Buy, 1.0, 110.0).unwrap();
        assert_eq!(p.qty(), 2.0);
        assert_relative_eq!(p.avg_price(), 105.0);
        assert_eq!(p.realized_pnl(), 0.0);
    }

    #[test]
    fn exact_close_round_trip() {
        let mut p = Position::new();
        p.on_trade(Side::Buy, 1.0, 100.0).unwrap();
        p.on_trade(Side::Sell, 1.0, 110.0).unwrap();
        assert_eq!(p.qty(), 0.0);
        assert_eq!(p.avg_price(), 0.0);
        assert_relative_eq!(p.realized_pnl(), 10.0);
    }

    #[test]
    fn short_round_trip_flips_pnl_sign() {
        let mut p = Position::new();
        p.on_trade(Side::Sell, 1.0, 100.0).unwrap();
        p.on_trade(Side::Buy, 1.0, 90.0).unwrap();
        assert_relative_eq!(p.realized_pnl(), 10.0);
    }

    #[test]
    fn partial_close_keeps_avg_price() {
        let mut p = Position::new();
        p.on_trade(Side::Buy, 2.0, 100.0).unwrap();
        p.on_trade(Side::Sell, 1.0, 110.0).unwrap();
        assert_eq!(p.qty(), 1.0);
        assert_eq!(p.avg_price(), 100.0);
        assert_relative_eq!(p.realized_pnl(), 10.0);
    }

    #[test]
    fn flip_and_reopen() {
        let mut p = Position::new();
        p.on_trade(Side::Buy, 1.0, 100.0).unwrap();
        p.on_trade(Side::Sell, 2.0, 90.0).unwrap();
        assert_eq!(p.qty(), -1.0);
        assert_eq!(p.avg_price(), 90.0);
        assert_relative_eq!(p.realized_pnl(), -10.0);

        p.on_trade(Side::Buy, 1.0, 80.0).unwrap();
        assert_eq!(p.qty(), 0.0);
        assert_eq!(p.avg_price(), 0.0);
        assert_relative_eq!(p.realized_pnl(), 0.0);
    }

    #[test]
    fn unrealized_pnl_symmetry_for_shorts() {
        let mut p = Position::new();
        p.on_trade(Side::Sell, 1.0, 120.0).unwrap();
        assert_relative_eq!(p.unrealized_pnl(110.0), 10.0);
    }

    #[test]
    fn rejects_non_positive_size_and_price() {
        let mut p = Position::new();
        assert!(p.on_trade(Side::Buy, 0.0, 100.0).is_err());
        assert!(p.on_trade(Side::Buy, 1.0, 0.0).is_err());
    }
}
