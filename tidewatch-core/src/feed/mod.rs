//! Market-data feed contract.
//!
//! Feeds are modeled as plain `Iterator<Item = Tick>` — finite for a
//! backtest replay or a recorded JSON-lines file, infinite for a live or
//! simulated stream. The engine's driver owns the feed and pulls ticks one
//! at a time; the engine itself has no notion of restartability.

pub mod dummy;
pub mod simulated;

use crate::core::types::Tick;

/// A source of market data. `connect`/`disconnect` are explicit lifecycle
/// hooks for feeds that hold a live network resource; a purely synthetic
/// feed (dummy, simulated) can leave them as no-ops.
pub trait Feed: Iterator<Item = Tick> {
    fn connect(&mut self) {}
    fn disconnect(&mut self) {}
}

pub use dummy::DummyDataFeed;
pub use simulated::SimulatedOrderBookFeed;
