//! Core data types shared across the pipeline: ticks, signals, and the
//! structured events the engine emits.

use serde::{Deserialize, Serialize};

/// Which way an order (or a strategy's intent) faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// +1 for `Buy`, -1 for `Sell` — the sign convention used throughout
    /// position accounting.
    pub fn sign(self) -> f64 {
        match self {
            Side::Buy => 1.0,
            Side::Sell => -1.0,
        }
    }

    pub fn opposite(self) -> Side {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Buy => write!(f, "BUY"),
            Side::Sell => write!(f, "SELL"),
        }
    }
}

/// Whether a signal should fill at the prevailing tick price or at a
/// strategy-chosen limit price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderType {
    Market,
    Limit,
}

/// One price level in a depth-of-book snapshot: `(price, size)`.
pub type Level = (f64, f64);

/// A single market-data observation. `bid`/`ask`/`bids`/`asks` are optional —
/// top-of-book-only feeds leave the depth fields empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    pub symbol: String,
    /// Last traded price. A tick without this is skipped by the engine.
    pub last: Option<f64>,
    pub timestamp: f64,
    pub bid: Option<f64>,
    pub ask: Option<f64>,
    pub bid_size: Option<f64>,
    pub ask_size: Option<f64>,
    /// Ordered by distance from the top: index 0 is best bid/ask.
    #[serde(default)]
    pub bids: Vec<Level>,
    #[serde(default)]
    pub asks: Vec<Level>,
}

impl Tick {
    pub fn new(symbol: impl Into<String>, last: f64, timestamp: f64) -> Self {
        Self {
            symbol: symbol.into(),
            last: Some(last),
            timestamp,
            bid: None,
            ask: None,
            bid_size: None,
            ask_size: None,
            bids: Vec::new(),
            asks: Vec::new(),
        }
    }

    pub fn mid(&self) -> Option<f64> {
        match (self.bid, self.ask) {
            (Some(b), Some(a)) => Some((b + a) / 2.0),
            _ => None,
        }
    }
}

/// An immutable order intent emitted by a strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub side: Side,
    pub size: f64,
    pub order_type: OrderType,
    /// Required iff `order_type == Limit`.
    pub price: Option<f64>,
    pub tag: String,
}

impl Signal {
    pub fn market(side: Side, size: f64, tag: impl Into<String>) -> Self {
        Self {
            side,
            size,
            order_type: OrderType::Market,
            price: None,
            tag: tag.into(),
        }
    }

    pub fn limit(side: Side, size: f64, price: f64, tag: impl Into<String>) -> Self {
        Self {
            side,
            size,
            order_type: OrderType::Limit,
            price: Some(price),
            tag: tag.into(),
        }
    }
}

/// Details of an executed trade, handed back to the originating strategy
/// via `Strategy::on_fill` — mirrors `original_source/core/strategy.py`'s
/// `on_fill(fill: Dict[str, Any])` hook with a concrete payload instead of
/// a free-form dict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fill {
    pub side: Side,
    pub size: f64,
    pub price: f64,
    pub tag: String,
    pub trade_pnl: f64,
}

/// Immutable view of a Position at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionSnapshot {
    pub qty: f64,
    pub avg_price: f64,
    pub realized_pnl: f64,
}

/// Response returned from `ExecutionClient::send_order`. The dry-run client
/// fills this in synthetically; a live client would populate it from the
/// venue's order-ack payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderResponse {
    pub status: String,
    pub symbol: String,
    pub side: Side,
    pub order_type: OrderType,
    pub size: f64,
    pub price: f64,
}

/// Reason a signal was rejected locally without ever reaching the
/// execution client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RejectionReason {
    InventoryLimitExceeded { detail: String },
    ArgumentError { detail: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeExecuted {
    pub symbol: String,
    pub side: Side,
    pub size: f64,
    pub price: f64,
    pub tag: String,
    pub response: OrderResponse,
    pub trade_pnl: f64,
    pub position: PositionSnapshot,
    pub equity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalRejected {
    pub symbol: String,
    pub signal: Signal,
    pub reason: RejectionReason,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircuitBreakerEvent {
    pub symbol: String,
    pub reason: String,
    pub position: PositionSnapshot,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineError {
    pub symbol: String,
    pub message: String,
}

/// Tagged event emitted by the engine for each tick processed. Mirrors the
/// original free-form `{type, data}` dict one-for-one, but as a statically
/// destructurable enum: each variant carries its own payload struct instead
/// of a generic map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum EngineEvent {
    TradeExecuted(TradeExecuted),
    SignalRejected(SignalRejected),
    CircuitBreaker(CircuitBreakerEvent),
    Error(EngineError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_sign_matches_convention() {
        assert_eq!(Side::Buy.sign(), 1.0);
        assert_eq!(Side::Sell.sign(), -1.0);
        assert_eq!(Side::Buy.opposite(), Side::Sell);
    }

    #[test]
    fn tick_mid_requires_both_sides() {
        let mut t = Tick::new("BTC-USD", 100.0, 0.0);
        assert_eq!(t.mid(), None);
        t.bid = Some(99.0);
        t.ask = Some(101.0);
        assert_eq!(t.mid(), Some(100.0));
    }

    #[test]
    fn engine_event_round_trips_through_json() {
        let ev = EngineEvent::SignalRejected(SignalRejected {
            symbol: "BTC-USD".into(),
            signal: Signal::market(Side::Buy, 1.0, "TEST"),
            reason: RejectionReason::InventoryLimitExceeded {
                detail: "too big".into(),
            },
        });
        let json = serde_json::to_string(&ev).unwrap();
        let back: EngineEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(ev, back);
    }
}
