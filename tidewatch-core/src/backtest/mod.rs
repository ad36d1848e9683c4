//! Backtest engine: the same pipeline as `engine::Engine` but with a
//! synthetic fill model (slippage + proportional fee) standing in for a
//! real execution client, plus equity-curve and summary-statistics
//! bookkeeping.
//!
//! Grounded on `original_source/core/backtest.py::BacktestEngine`.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::errors::{ArgumentError, RiskError};
use crate::core::position::Position;
use crate::core::types::{Fill, OrderType, Side, Signal, Tick};
use crate::risk::{InventoryRiskManager, RiskManager};
use crate::strategy::Strategy;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BacktestConfig {
    pub initial_equity: f64,
    pub fee_rate: f64,
    pub slippage_bps: f64,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        Self {
            initial_equity: 1000.0,
            fee_rate: 0.0004,
            slippage_bps: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestTrade {
    pub timestamp: f64,
    pub side: Side,
    pub size: f64,
    pub price: f64,
    pub fee: f64,
    pub pnl: f64,
    pub equity_after: f64,
    pub signal_tag: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquityPoint {
    pub timestamp: f64,
    pub equity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BacktestSummary {
    pub initial_equity: f64,
    pub final_equity: f64,
    pub net_pnl: f64,
    pub total_trades: u64,
    pub wins: u64,
    pub losses: u64,
    pub win_rate_pct: f64,
    pub max_drawdown: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestResult {
    pub trades: Vec<BacktestTrade>,
    pub equity_curve: Vec<EquityPoint>,
    pub summary: BacktestSummary,
}

pub struct BacktestEngine<S> {
    symbol: String,
    strategy: S,
    risk: RiskManager,
    inventory: InventoryRiskManager,
    config: BacktestConfig,

    position: Position,
    equity: f64,
    trades: Vec<BacktestTrade>,
    equity_curve: Vec<EquityPoint>,
}

impl<S> BacktestEngine<S>
where
    S: Strategy,
{
    pub fn new(
        symbol: impl Into<String>,
        strategy: S,
        risk: RiskManager,
        inventory: InventoryRiskManager,
        config: BacktestConfig,
    ) -> Self {
        let equity = config.initial_equity;
        Self {
            symbol: symbol.into(),
            strategy,
            risk,
            inventory,
            config,
            position: Position::new(),
            equity,
            trades: Vec::new(),
            equity_curve: Vec::new(),
        }
    }

    fn apply_slippage(&self, price: f64, side: Side) -> f64 {
        if self.config.slippage_bps <= 0.0 {
            return price;
        }
        let factor = self.config.slippage_bps / 10_000.0;
        match side {
            Side::Buy => price * (1.0 + factor),
            Side::Sell => price * (1.0 - factor),
        }
    }

    fn record_equity(&mut self, timestamp: f64) {
        self.equity_curve.push(EquityPoint {
            timestamp,
            equity: self.equity,
        });
    }

    /// Returns the resulting `Fill` when the signal filled,
    /// `Err(InventoryLimitExceeded-as-soft)` when the inventory gate
    /// rejected it (the replay continues), and propagates a circuit-breaker
    /// trip so `run` can stop the whole replay.
    fn execute_signal(&mut self, signal: &Signal, tick: &Tick) -> Result<Fill, SignalOutcome> {
        let fill_price = match signal.order_type {
            OrderType::Market => tick.last.expect("caller filters ticks without last"),
            OrderType::Limit => signal
                .price
                .ok_or(SignalOutcome::Argument(ArgumentError::MissingLimitPrice))?,
        };
        let fill_price = self.apply_slippage(fill_price, signal.side);

        let equity_before = self.equity;
        let notional = (signal.size * fill_price).abs();

        self.inventory
            .validate_inventory(
                self.position.qty(),
                signal.side,
                signal.size,
                fill_price,
                equity_before,
            )
            .map_err(SignalOutcome::InventoryRejected)?;

        self.risk
            .validate_position_size(equity_before, notional)
            .map_err(SignalOutcome::CircuitBreaker)?;
        self.risk
            .increment_open_trades()
            .map_err(SignalOutcome::CircuitBreaker)?;

        let fee = notional * self.config.fee_rate;

        let realized_before = self.position.realized_pnl();
        self.position
            .on_trade(signal.side, signal.size, fill_price)
            .map_err(SignalOutcome::Argument)?;
        let trade_pnl = self.position.realized_pnl() - realized_before - fee;

        self.equity += trade_pnl;

        self.risk
            .register_trade_pnl(trade_pnl)
            .map_err(SignalOutcome::CircuitBreaker)?;
        self.risk.decrement_open_trades();

        self.trades.push(BacktestTrade {
            timestamp: tick.timestamp,
            side: signal.side,
            size: signal.size,
            price: fill_price,
            fee,
            pnl: trade_pnl,
            equity_after: self.equity,
            signal_tag: signal.tag.clone(),
        });
        self.record_equity(tick.timestamp);

        Ok(Fill {
            side: signal.side,
            size: signal.size,
            price: fill_price,
            tag: signal.tag.clone(),
            trade_pnl,
        })
    }

    /// Replays an iterator of ticks through the strategy and synthetic
    /// fill model, stopping early (cleanly, not an error) if the risk
    /// manager's circuit breaker trips.
    pub fn run(mut self, ticks: impl IntoIterator<Item = Tick>) -> BacktestResult {
        'outer: for tick in ticks {
            let Some(last) = tick.last else {
                continue;
            };
            let _ = last;

            let signals = match self.strategy.on_tick(&tick) {
                Ok(signals) => signals,
                Err(err) => {
                    warn!(symbol = %self.symbol, error = %err, "strategy error during backtest replay");
                    continue;
                }
            };

            for signal in &signals {
                match self.execute_signal(signal, &tick) {
                    Ok(fill) => self.strategy.on_fill(&fill),
                    Err(SignalOutcome::InventoryRejected(_)) => continue,
                    Err(SignalOutcome::Argument(_)) => continue,
                    Err(SignalOutcome::CircuitBreaker(_)) => break 'outer,
                }
            }
        }

        if self.equity_curve.is_empty() {
            self.record_equity(0.0);
        }

        let summary = self.build_summary();

        BacktestResult {
            trades: self.trades,
            equity_curve: self.equity_curve,
            summary,
        }
    }

    fn build_summary(&self) -> BacktestSummary {
        let total_trades = self.trades.len() as u64;
        let wins = self.trades.iter().filter(|t| t.pnl > 0.0).count() as u64;
        let losses = self.trades.iter().filter(|t| t.pnl < 0.0).count() as u64;
        let win_rate_pct = if total_trades > 0 {
            (wins as f64 / total_trades as f64) * 100.0
        } else {
            0.0
        };
        let net_pnl = self.equity - self.config.initial_equity;
        let max_drawdown = Self::compute_max_drawdown(&self.equity_curve);

        BacktestSummary {
            initial_equity: self.config.initial_equity,
            final_equity: self.equity,
            net_pnl,
            total_trades,
            wins,
            losses,
            win_rate_pct,
            max_drawdown,
        }
    }

    fn compute_max_drawdown(equity_curve: &[EquityPoint]) -> f64 {
        let Some(first) = equity_curve.first() else {
            return 0.0;
        };
        let mut max_equity = first.equity;
        let mut max_dd = 0.0;
        for point in equity_curve {
            if point.equity > max_equity {
                max_equity = point.equity;
            }
            let drawdown = max_equity - point.equity;
            if drawdown > max_dd {
                max_dd = drawdown;
            }
        }
        max_dd
    }
}

enum SignalOutcome {
    InventoryRejected(crate::core::errors::InventoryError),
    CircuitBreaker(RiskError),
    Argument(ArgumentError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::errors::StrategyError;
    use crate::risk::{InventoryLimits, RiskLimits};

    struct ScriptedStrategy {
        signals: std::collections::VecDeque<Vec<Signal>>,
    }

    impl Strategy for ScriptedStrategy {
        fn on_tick(&mut self, _tick: &Tick) -> Result<Vec<Signal>, StrategyError> {
            Ok(self.signals.pop_front().unwrap_or_default())
        }
    }

    fn wide_risk() -> RiskManager {
        RiskManager::new(RiskLimits {
            max_daily_loss_pct: 100.0,
            max_daily_loss_value: 1_000_000.0,
            max_position_size_pct: 100.0,
            max_open_trades: 1000,
            circuit_breaker_enabled: true,
        })
    }

    fn wide_inventory() -> InventoryRiskManager {
        InventoryRiskManager::new(InventoryLimits {
            max_abs_qty: 1_000_000.0,
            max_notional_pct: 1_000_000.0,
        })
    }

    #[test]
    fn empty_stream_yields_zeroed_summary() {
        let strategy = ScriptedStrategy {
            signals: Default::default(),
        };
        let engine = BacktestEngine::new(
            "BTC-USD",
            strategy,
            wide_risk(),
            wide_inventory(),
            BacktestConfig::default(),
        );
        let result = engine.run(std::iter::empty());
        assert_eq!(result.summary.total_trades, 0);
        assert_eq!(result.summary.net_pnl, 0.0);
        assert_eq!(result.summary.max_drawdown, 0.0);
    }

    #[test]
    fn round_trip_with_no_fees_or_slippage_reports_net_pnl() {
        let strategy = ScriptedStrategy {
            signals: [
                vec![Signal::market(Side::Buy, 1.0, "OPEN")],
                vec![Signal::market(Side::Sell, 1.0, "CLOSE")],
            ]
            .into_iter()
            .collect(),
        };
        let engine = BacktestEngine::new(
            "BTC-USD",
            strategy,
            wide_risk(),
            wide_inventory(),
            BacktestConfig {
                initial_equity: 1000.0,
                fee_rate: 0.0,
                slippage_bps: 0.0,
            },
        );
        let ticks = vec![Tick::new("BTC-USD", 100.0, 1.0), Tick::new("BTC-USD", 110.0, 2.0)];
        let result = engine.run(ticks);
        assert_eq!(result.summary.total_trades, 2);
        assert_eq!(result.summary.wins, 1);
        assert_eq!(result.summary.losses, 0);
        assert_eq!(result.summary.net_pnl, 10.0);
        assert_eq!(result.summary.max_drawdown, 0.0);
    }

    #[test]
    fn higher_slippage_strictly_worsens_net_pnl() {
        let make_result = |slippage_bps: f64| {
            let strategy = ScriptedStrategy {
                signals: [
                    vec![Signal::market(Side::Buy, 1.0, "OPEN")],
                    vec![Signal::market(Side::Sell, 1.0, "CLOSE")],
                ]
                .into_iter()
                .collect(),
            };
            let engine = BacktestEngine::new(
                "BTC-USD",
                strategy,
                wide_risk(),
                wide_inventory(),
                BacktestConfig {
                    initial_equity: 1000.0,
                    fee_rate: 0.0,
                    slippage_bps,
                },
            );
            let ticks = vec![Tick::new("BTC-USD", 100.0, 1.0), Tick::new("BTC-USD", 110.0, 2.0)];
            engine.run(ticks).summary.net_pnl
        };

        let pnl_low = make_result(1.0);
        let pnl_high = make_result(50.0);
        assert!(pnl_high < pnl_low);
    }

    #[test]
    fn on_fill_is_invoked_with_trade_details() {
        use std::cell::RefCell;
        use std::rc::Rc;

        struct FillRecordingStrategy {
            signals: std::collections::VecDeque<Vec<Signal>>,
            fills: Rc<RefCell<Vec<Fill>>>,
        }

        impl Strategy for FillRecordingStrategy {
            fn on_tick(&mut self, _tick: &Tick) -> Result<Vec<Signal>, StrategyError> {
                Ok(self.signals.pop_front().unwrap_or_default())
            }

            fn on_fill(&mut self, fill: &Fill) {
                self.fills.borrow_mut().push(fill.clone());
            }
        }

        let fills = Rc::new(RefCell::new(Vec::new()));
        let strategy = FillRecordingStrategy {
            signals: [
                vec![Signal::market(Side::Buy, 1.0, "OPEN")],
                vec![Signal::market(Side::Sell, 1.0, "CLOSE")],
            ]
            .into_iter()
            .collect(),
            fills: fills.clone(),
        };
        let engine = BacktestEngine::new(
            "BTC-USD",
            strategy,
            wide_risk(),
            wide_inventory(),
            BacktestConfig {
                initial_equity: 1000.0,
                fee_rate: 0.0,
                slippage_bps: 0.0,
            },
        );
        let ticks = vec![Tick::new("BTC-USD", 100.0, 1.0), Tick::new("BTC-USD", 110.0, 2.0)];
        let result = engine.run(ticks);
        assert_eq!(result.summary.total_trades, 2);

        let recorded = fills.borrow();
        assert_eq!(recorded.len(), 2);
        assert_eq!(recorded[0].side, Side::Buy);
        assert_eq!(recorded[0].tag, "OPEN");
        assert_eq!(recorded[0].trade_pnl, 0.0);
        assert_eq!(recorded[1].side, Side::Sell);
        assert_eq!(recorded[1].tag, "CLOSE");
        assert_eq!(recorded[1].trade_pnl, 10.0);
    }

    #[test]
    fn inventory_rejection_is_skipped_not_fatal() {
        let strategy = ScriptedStrategy {
            signals: [vec![Signal::market(Side::Buy, 100.0, "TOO_BIG")]]
                .into_iter()
                .collect(),
        };
        let tight_inventory = InventoryRiskManager::new(InventoryLimits {
            max_abs_qty: 1.0,
            max_notional_pct: 1_000_000.0,
        });
        let engine = BacktestEngine::new(
            "BTC-USD",
            strategy,
            wide_risk(),
            tight_inventory,
            BacktestConfig::default(),
        );
        let result = engine.run(vec![Tick::new("BTC-USD", 100.0, 1.0)]);
        assert_eq!(result.summary.total_trades, 0);
    }
}
