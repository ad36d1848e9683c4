//! Stateless per-trade exposure admission gate.
//!
//! Grounded on `original_source/core/inventory.py::InventoryRiskManager`.
//! Unlike `RiskManager`, this carries no mutable state across calls — every
//! decision depends only on the arguments passed in.

use serde::{Deserialize, Serialize};

use crate::core::errors::{ArgumentError, InventoryError};
use crate::core::types::Side;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InventoryLimits {
    pub max_abs_qty: f64,
    pub max_notional_pct: f64,
}

/// Holds only its configured limits — no per-call state survives between
/// invocations, matching the original's stateless validator.
pub struct InventoryRiskManager {
    limits: InventoryLimits,
}

impl InventoryRiskManager {
    pub fn new(limits: InventoryLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> InventoryLimits {
        self.limits
    }

    /// Checks the hypothetical post-trade quantity and notional-as-%-of-equity
    /// against the configured limits.
    pub fn validate_inventory(
        &self,
        current_qty: f64,
        side: Side,
        trade_qty: f64,
        price: f64,
        equity: f64,
    ) -> Result<(), InventoryError> {
        if trade_qty <= 0.0 {
            return Err(ArgumentError::NonPositiveSize { size: trade_qty }.into());
        }
        if equity <= 0.0 {
            return Err(ArgumentError::NonPositiveEquity { equity }.into());
        }

        let new_qty = current_qty + side.sign() * trade_qty;

        if new_qty.abs() > self.limits.max_abs_qty {
            return Err(InventoryError::AbsQtyExceeded {
                new_qty,
                max_abs_qty: self.limits.max_abs_qty,
            });
        }

        let notional_pct = (new_qty.abs() * price / equity) * 100.0;
        if notional_pct > self.limits.max_notional_pct {
            return Err(InventoryError::NotionalExceeded {
                notional_pct,
                max_notional_pct: self.limits.max_notional_pct,
            });
        }

        Ok(())
    }
}
