//! Minimal random-walk feed.
//!
//! Grounded on `original_source/core/datafeed.py::DummyDataFeed` — a plain
//! random walk around a starting price with a random bid/ask spread, used
//! for smoke-testing the pipeline without the microstructure model of
//! `SimulatedOrderBookFeed`.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use crate::core::types::Tick;
use crate::feed::Feed;

pub struct DummyDataFeed {
    symbol: String,
    price: f64,
    rng: StdRng,
    tick_counter: u64,
    connected: bool,
}

impl DummyDataFeed {
    pub fn new(symbol: impl Into<String>, start_price: f64, seed: u64) -> Self {
        Self {
            symbol: symbol.into(),
            price: start_price,
            rng: StdRng::seed_from_u64(seed),
            tick_counter: 0,
            connected: false,
        }
    }
}

impl Feed for DummyDataFeed {
    fn connect(&mut self) {
        self.connected = true;
        info!(symbol = %self.symbol, "dummy feed connected");
    }

    fn disconnect(&mut self) {
        self.connected = false;
        info!(symbol = %self.symbol, "dummy feed disconnected");
    }
}

impl Iterator for DummyDataFeed {
    type Item = Tick;

    fn next(&mut self) -> Option<Tick> {
        self.tick_counter += 1;

        let delta = self.rng.gen_range(-5.0..5.0);
        self.price = (self.price + delta).max(1.0);

        let spread = self.rng.gen_range(0.5..2.0);
        let bid = self.price - spread / 2.0;
        let ask = self.price + spread / 2.0;

        Some(Tick {
            symbol: self.symbol.clone(),
            last: Some(self.price),
            timestamp: self.tick_counter as f64,
            bid: Some(bid),
            ask: Some(ask),
            bid_size: None,
            ask_size: None,
            bids: Vec::new(),
            asks: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_stays_positive_and_bid_below_ask() {
        let mut feed = DummyDataFeed::new("BTC-USD", 100.0, 1);
        for _ in 0..200 {
            let tick = feed.next().unwrap();
            assert!(tick.last.unwrap() >= 1.0);
            assert!(tick.bid.unwrap() < tick.ask.unwrap());
        }
    }
}
