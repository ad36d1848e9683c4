//! The trading engine: the orchestrator that drives one tick at a time
//! through strategy, risk, inventory, execution, and position accounting.
//!
//! ```text
//!  Feed ──tick──▶ Engine::process_tick
//!                     │
//!                     ▼
//!              Strategy::on_tick ──▶ [Signal]
//!                     │
//!         for each signal, in order:
//!                     ▼
//!          InventoryRiskManager::validate_inventory ──reject──▶ SignalRejected
//!                     │ ok
//!                     ▼
//!          RiskManager::validate_position_size ──trip──▶ CircuitBreaker, stop
//!                     │ ok
//!                     ▼
//!          RiskManager::increment_open_trades ──trip──▶ CircuitBreaker, stop
//!                     │ ok
//!                     ▼
//!          ExecutionClient::send_order
//!                     │
//!                     ▼
//!          Position::on_trade ──▶ trade_pnl
//!                     │
//!                     ▼
//!          RiskManager::register_trade_pnl, decrement_open_trades
//!                     │
//!                     ▼
//!                TradeExecuted event
//! ```
//!
//! Grounded on `original_source/core/engine.py::TradingEngine`. The engine
//! is generic over `S: Strategy` and `E: ExecutionClient` so the pipeline
//! monomorphizes per strategy/executor pair instead of boxing a
//! `dyn Strategy`.

use tracing::{error, info, warn};

use crate::core::errors::{ArgumentError, RiskError, StrategyError};
use crate::core::position::Position;
use crate::core::types::{
    CircuitBreakerEvent, EngineError, EngineEvent, Fill, OrderType, PositionSnapshot,
    RejectionReason, Side, Signal, SignalRejected, Tick, TradeExecuted,
};
use crate::execution::ExecutionClient;
use crate::risk::{InventoryRiskManager, RiskManager};
use crate::strategy::Strategy;

/// Immutable view of the engine's bookkeeping state, intended for a
/// driver's own observability surface (logging, a dashboard) without the
/// engine depending on that surface — mirrors
/// `original_source/core/engine.py::TradingEngine.snapshot`.
#[derive(Debug, Clone)]
pub struct EngineSnapshot {
    pub symbol: String,
    pub running: bool,
    pub tick_count: u64,
    pub trade_count: u64,
    pub last_price: Option<f64>,
    pub last_equity: Option<f64>,
    pub position: PositionSnapshot,
    pub last_error: Option<String>,
    pub last_signals: Vec<Signal>,
}

pub struct Engine<S, E> {
    symbol: String,
    strategy: S,
    risk: RiskManager,
    inventory: InventoryRiskManager,
    execution: E,
    position: Position,
    raise_on_circuit_breaker: bool,

    tick_count: u64,
    trade_count: u64,
    running: bool,
    last_price: Option<f64>,
    last_equity: Option<f64>,
    last_error: Option<String>,
    last_signals: Vec<Signal>,
}

impl<S, E> Engine<S, E>
where
    S: Strategy,
    E: ExecutionClient,
{
    pub fn new(
        symbol: impl Into<String>,
        strategy: S,
        risk: RiskManager,
        inventory: InventoryRiskManager,
        execution: E,
        raise_on_circuit_breaker: bool,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            strategy,
            risk,
            inventory,
            execution,
            position: Position::new(),
            raise_on_circuit_breaker,
            tick_count: 0,
            trade_count: 0,
            running: true,
            last_price: None,
            last_equity: None,
            last_error: None,
            last_signals: Vec::new(),
        }
    }

    pub fn running(&self) -> bool {
        self.running
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            symbol: self.symbol.clone(),
            running: self.running,
            tick_count: self.tick_count,
            trade_count: self.trade_count,
            last_price: self.last_price,
            last_equity: self.last_equity,
            position: self.position.snapshot(),
            last_error: self.last_error.clone(),
            last_signals: self.last_signals.clone(),
        }
    }

    /// Processes one tick and returns whatever events resulted. Returns
    /// `Err` only when the engine is configured with
    /// `raise_on_circuit_breaker = true` and a trip occurred mid-tick —
    /// the `CircuitBreaker` event is still included in the `Err`'s payload
    /// so the caller doesn't lose it.
    pub fn process_tick(&mut self, tick: &Tick) -> Result<Vec<EngineEvent>, Vec<EngineEvent>> {
        let mut events = Vec::new();

        if !self.running {
            return Ok(events);
        }

        self.tick_count += 1;
        self.last_error = None;

        let Some(last_price) = tick.last else {
            return Ok(events);
        };
        self.last_price = Some(last_price);

        let signals = match self.strategy.on_tick(tick) {
            Ok(signals) => signals,
            Err(err) => {
                self.strategy.on_error(&err);
                let msg = err.to_string();
                error!(symbol = %self.symbol, error = %msg, "strategy error");
                self.last_error = Some(msg.clone());
                events.push(EngineEvent::Error(EngineError {
                    symbol: self.symbol.clone(),
                    message: msg,
                }));
                return Ok(events);
            }
        };
        self.last_signals = signals.clone();

        for signal in &signals {
            match self.process_signal(signal, last_price) {
                Ok(event) => events.push(event),
                Err(SignalOutcome::Rejected(event)) => events.push(event),
                Err(SignalOutcome::CircuitBreaker(event)) => {
                    self.running = false;
                    events.push(event);
                    if self.raise_on_circuit_breaker {
                        return Err(events);
                    }
                    break;
                }
                Err(SignalOutcome::Error(event)) => events.push(event),
            }
        }

        Ok(events)
    }

    fn process_signal(
        &mut self,
        signal: &Signal,
        tick_last: f64,
    ) -> Result<EngineEvent, SignalOutcome> {
        let fill_price = match signal.order_type {
            OrderType::Market => tick_last,
            OrderType::Limit => match signal.price {
                Some(p) => p,
                None => {
                    let msg = ArgumentError::MissingLimitPrice.to_string();
                    return Err(SignalOutcome::Error(EngineEvent::Error(EngineError {
                        symbol: self.symbol.clone(),
                        message: msg,
                    })));
                }
            },
        };

        let equity = match self.execution.get_account_equity() {
            Ok(eq) => eq,
            Err(err) => {
                return Err(SignalOutcome::Error(EngineEvent::Error(EngineError {
                    symbol: self.symbol.clone(),
                    message: err.to_string(),
                })));
            }
        };
        self.last_equity = Some(equity);

        if let Err(inv_err) = self.inventory.validate_inventory(
            self.position.qty(),
            signal.side,
            signal.size,
            fill_price,
            equity,
        ) {
            warn!(symbol = %self.symbol, error = %inv_err, "signal rejected: inventory limit");
            return Err(SignalOutcome::Rejected(EngineEvent::SignalRejected(
                SignalRejected {
                    symbol: self.symbol.clone(),
                    signal: signal.clone(),
                    reason: RejectionReason::InventoryLimitExceeded {
                        detail: inv_err.to_string(),
                    },
                },
            )));
        }

        let notional = (signal.size * fill_price).abs();
        if let Err(risk_err) = self.risk.validate_position_size(equity, notional) {
            return Err(self.circuit_breaker_outcome(risk_err));
        }
        if let Err(risk_err) = self.risk.increment_open_trades() {
            return Err(self.circuit_breaker_outcome(risk_err));
        }

        let response = match self.execution.send_order(&self.symbol, signal) {
            Ok(resp) => resp,
            Err(err) => {
                self.risk.decrement_open_trades();
                return Err(SignalOutcome::Error(EngineEvent::Error(EngineError {
                    symbol: self.symbol.clone(),
                    message: err.to_string(),
                })));
            }
        };

        let realized_before = self.position.realized_pnl();
        if let Err(arg_err) = self.position.on_trade(signal.side, signal.size, fill_price) {
            self.risk.decrement_open_trades();
            return Err(SignalOutcome::Error(EngineEvent::Error(EngineError {
                symbol: self.symbol.clone(),
                message: arg_err.to_string(),
            })));
        }
        let trade_pnl = self.position.realized_pnl() - realized_before;

        if let Err(risk_err) = self.risk.register_trade_pnl(trade_pnl) {
            return Err(self.circuit_breaker_outcome(risk_err));
        }
        self.risk.decrement_open_trades();

        self.trade_count += 1;
        self.strategy.on_fill(&Fill {
            side: signal.side,
            size: signal.size,
            price: fill_price,
            tag: signal.tag.clone(),
            trade_pnl,
        });

        let position = self.position.snapshot();
        info!(
            symbol = %self.symbol,
            side = %signal.side,
            size = signal.size,
            price = fill_price,
            trade_pnl,
            qty = position.qty,
            "trade executed"
        );

        Ok(EngineEvent::TradeExecuted(TradeExecuted {
            symbol: self.symbol.clone(),
            side: signal.side,
            size: signal.size,
            price: fill_price,
            tag: signal.tag.clone(),
            response,
            trade_pnl,
            position,
            equity,
        }))
    }

    fn circuit_breaker_outcome(&self, err: RiskError) -> SignalOutcome {
        let msg = err.to_string();
        error!(symbol = %self.symbol, error = %msg, "circuit breaker tripped");
        SignalOutcome::CircuitBreaker(EngineEvent::CircuitBreaker(CircuitBreakerEvent {
            symbol: self.symbol.clone(),
            reason: msg,
            position: self.position.snapshot(),
        }))
    }
}

enum SignalOutcome {
    Rejected(EngineEvent),
    CircuitBreaker(EngineEvent),
    Error(EngineEvent),
}
