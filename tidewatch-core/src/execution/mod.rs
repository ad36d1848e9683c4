//! Execution client contract.
//!
//! `send_order`/`get_account_equity` are the only two operations the
//! engine consumes. Signing, endpoint selection, symbol casing, and
//! tick/lot rounding are venue-specific and stay behind this trait.

use crate::core::errors::TransportError;
use crate::core::types::{OrderResponse, Signal};

pub trait ExecutionClient {
    fn send_order(&mut self, symbol: &str, signal: &Signal) -> Result<OrderResponse, TransportError>;
    fn get_account_equity(&mut self) -> Result<f64, TransportError>;
}

/// Execution client that performs all accounting but never talks to a
/// venue — grounded on `original_source/core/execution.py::ExecutionClient`,
/// which logs the order and returns a synthetic `FILLED` response with a
/// fixed mock equity.
pub struct DryRunExecutionClient {
    equity: f64,
}

impl DryRunExecutionClient {
    pub fn new(equity: f64) -> Self {
        Self { equity }
    }
}

impl Default for DryRunExecutionClient {
    fn default() -> Self {
        Self::new(1000.0)
    }
}

impl ExecutionClient for DryRunExecutionClient {
    fn send_order(&mut self, symbol: &str, signal: &Signal) -> Result<OrderResponse, TransportError> {
        let price = signal.price.unwrap_or(0.0);
        tracing::debug!(
            symbol,
            side = %signal.side,
            size = signal.size,
            order_type = ?signal.order_type,
            price,
            "dry-run order"
        );
        Ok(OrderResponse {
            status: "DRY_RUN".to_string(),
            symbol: symbol.to_string(),
            side: signal.side,
            order_type: signal.order_type,
            size: signal.size,
            price,
        })
    }

    fn get_account_equity(&mut self) -> Result<f64, TransportError> {
        Ok(self.equity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{OrderType, Side};

    #[test]
    fn dry_run_never_fails_and_reports_configured_equity() {
        let mut client = DryRunExecutionClient::new(5000.0);
        assert_eq!(client.get_account_equity().unwrap(), 5000.0);

        let signal = Signal {
            side: Side::Buy,
            size: 1.0,
            order_type: OrderType::Market,
            price: None,
            tag: "TEST".into(),
        };
        let resp = client.send_order("BTC-USD", &signal).unwrap();
        assert_eq!(resp.status, "DRY_RUN");
        assert_eq!(resp.price, 0.0);
    }
}
