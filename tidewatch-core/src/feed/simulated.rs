//! Simulated order-book feed with a microstructure model.
//!
//! Grounded on `original_source/core/datafeed_dummy_orderbook.py`
//! (`UltraDummyOrderBookFeed`), reimplemented as an infinite Rust iterator
//! with a seedable PRNG (`rand::rngs::StdRng`) so tests and backtests are
//! reproducible.
//!
//! ```text
//! each tick:
//!   1..=5 microstructure events (aggressive_buy 15% / aggressive_sell 15% / noise 70%)
//!     -> perturb mid_price multiplicatively
//!   build depth_levels+1 price levels per side (boosted top-of-book + decaying ladder)
//!   sample `last` from an independent draw of the same event distribution
//! ```

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::core::types::{Level, Tick};
use crate::feed::Feed;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MicroEvent {
    AggressiveBuy,
    AggressiveSell,
    Noise,
}

/// Configuration for `SimulatedOrderBookFeed`. Field names mirror the
/// Python constructor's keyword arguments.
#[derive(Debug, Clone, Copy)]
pub struct SimulatedFeedConfig {
    pub start_price: f64,
    pub volatility: f64,
    pub base_spread_ticks: f64,
    pub depth_levels: usize,
    pub base_liquidity: f64,
}

impl Default for SimulatedFeedConfig {
    fn default() -> Self {
        Self {
            start_price: 100_000.0,
            volatility: 0.0005,
            base_spread_ticks: 1.0,
            depth_levels: 5,
            base_liquidity: 1.0,
        }
    }
}

pub struct SimulatedOrderBookFeed {
    symbol: String,
    mid_price: f64,
    volatility: f64,
    base_spread_ticks: f64,
    depth_levels: usize,
    base_liquidity: f64,
    tick_size: f64,
    rng: StdRng,
    tick_counter: u64,
}

impl SimulatedOrderBookFeed {
    pub fn new(symbol: impl Into<String>, config: SimulatedFeedConfig, seed: u64) -> Self {
        let tick_size = config.start_price * 0.0001;
        Self {
            symbol: symbol.into(),
            mid_price: config.start_price,
            volatility: config.volatility,
            base_spread_ticks: config.base_spread_ticks,
            depth_levels: config.depth_levels,
            base_liquidity: config.base_liquidity,
            tick_size,
            rng: StdRng::seed_from_u64(seed),
            tick_counter: 0,
        }
    }

    fn sample_event(&mut self) -> MicroEvent {
        let r: f64 = self.rng.gen();
        if r < 0.15 {
            MicroEvent::AggressiveBuy
        } else if r < 0.30 {
            MicroEvent::AggressiveSell
        } else {
            MicroEvent::Noise
        }
    }

    fn simulate_micro_events(&mut self) {
        let n_events = self.rng.gen_range(1..=5);
        for _ in 0..n_events {
            let event = self.sample_event();
            let base_move = self.volatility * self.rng.gen_range(0.2..1.0);
            match event {
                MicroEvent::AggressiveBuy => self.mid_price *= 1.0 + base_move,
                MicroEvent::AggressiveSell => self.mid_price *= 1.0 - base_move,
                MicroEvent::Noise => {
                    let direction = if self.rng.gen::<f64>() < 0.5 { 1.0 } else { -1.0 };
                    self.mid_price *= 1.0 + direction * base_move * 0.3;
                }
            }
        }
        self.mid_price = self.mid_price.max(self.tick_size * 10.0);
    }

    /// Returns `(bids, asks)`, each `depth_levels + 1` levels long: index 0
    /// is the boosted top-of-book level, followed by the decaying ladder.
    fn build_order_book(&mut self) -> (Vec<Level>, Vec<Level>) {
        let base_spread = self.base_spread_ticks * self.tick_size;
        let spread_noise = self.rng.gen_range(0.5..2.0);
        let spread = (base_spread * spread_noise).max(self.tick_size * 0.5);

        let best_bid = self.mid_price - spread / 2.0;
        let best_ask = self.mid_price + spread / 2.0;

        let decay = self.rng.gen_range(0.6..0.9);

        let mut bids = Vec::with_capacity(self.depth_levels + 1);
        let mut asks = Vec::with_capacity(self.depth_levels + 1);

        for level in 0..self.depth_levels {
            let dist_ticks = (level + 1) as f64;
            let bid_price = best_bid - dist_ticks * self.tick_size;
            let ask_price = best_ask + dist_ticks * self.tick_size;

            let bid_liq = self.base_liquidity * decay.powi(level as i32) * self.rng.gen_range(0.8..1.2);
            let ask_liq = self.base_liquidity * decay.powi(level as i32) * self.rng.gen_range(0.8..1.2);

            bids.push((bid_price, bid_liq));
            asks.push((ask_price, ask_liq));
        }

        let top_bid_liq = self.base_liquidity * self.rng.gen_range(1.0..2.0);
        let top_ask_liq = self.base_liquidity * self.rng.gen_range(1.0..2.0);
        bids.insert(0, (best_bid, top_bid_liq));
        asks.insert(0, (best_ask, top_ask_liq));

        (bids, asks)
    }

    fn sample_last_trade(&mut self, best_bid: f64, best_ask: f64) -> f64 {
        let mid = (best_bid + best_ask) / 2.0;
        let spread = (best_ask - best_bid).max(self.tick_size * 0.5);
        let event = self.sample_event();

        let last = match event {
            MicroEvent::AggressiveBuy => best_ask * (1.0 + self.rng.gen_range(0.0..0.0002)),
            MicroEvent::AggressiveSell => best_bid * (1.0 - self.rng.gen_range(0.0..0.0002)),
            MicroEvent::Noise => {
                let offset = (self.rng.gen::<f64>() - 0.5) * spread * 0.8;
                mid + offset
            }
        };

        last.max(self.tick_size * 10.0)
    }
}

impl Iterator for SimulatedOrderBookFeed {
    type Item = Tick;

    fn next(&mut self) -> Option<Tick> {
        self.tick_counter += 1;

        self.simulate_micro_events();
        let (bids, asks) = self.build_order_book();

        let (best_bid, _) = bids[0];
        let (best_ask, _) = asks[0];
        let last = self.sample_last_trade(best_bid, best_ask);

        let total_bid_size: f64 = bids.iter().map(|(_, s)| s).sum();
        let total_ask_size: f64 = asks.iter().map(|(_, s)| s).sum();

        Some(Tick {
            symbol: self.symbol.clone(),
            last: Some(last),
            timestamp: self.tick_counter as f64,
            bid: Some(best_bid),
            ask: Some(best_ask),
            bid_size: Some(total_bid_size),
            ask_size: Some(total_ask_size),
            bids,
            asks,
        })
    }
}

impl Feed for SimulatedOrderBookFeed {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn produces_well_formed_ticks() {
        let mut feed =
            SimulatedOrderBookFeed::new("BTC-USD", SimulatedFeedConfig::default(), 42);
        for _ in 0..50 {
            let tick = feed.next().unwrap();
            assert!(tick.last.unwrap() > 0.0);
            assert!(tick.bid.unwrap() < tick.ask.unwrap());
            assert_eq!(tick.bids.len(), 6); // depth_levels(5) + boosted top
            assert_eq!(tick.asks.len(), 6);
        }
    }

    #[test]
    fn same_seed_is_deterministic() {
        let cfg = SimulatedFeedConfig::default();
        let mut a = SimulatedOrderBookFeed::new("BTC-USD", cfg, 7);
        let mut b = SimulatedOrderBookFeed::new("BTC-USD", cfg, 7);
        for _ in 0..20 {
            assert_eq!(a.next(), b.next());
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let cfg = SimulatedFeedConfig::default();
        let mut a = SimulatedOrderBookFeed::new("BTC-USD", cfg, 1);
        let mut b = SimulatedOrderBookFeed::new("BTC-USD", cfg, 2);
        let ta = a.next().unwrap();
        let tb = b.next().unwrap();
        assert_ne!(ta.last, tb.last);
    }
}
