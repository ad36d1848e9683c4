//! Symmetric market maker with a fixed or percent-of-mid spread.
//!
//! Grounded on `original_source/strategies/market_maker_v1.py`. No
//! open-order tracking or cancellation — every emission is an assumed-
//! filled LIMIT order (see `DESIGN.md` Open Question 3).

use tidewatch_core::core::errors::StrategyError;
use tidewatch_core::core::types::{Side, Signal, Tick};
use tidewatch_core::strategy::Strategy;

#[derive(Debug, Clone, Copy)]
pub struct MarketMakerV1Config {
    pub min_spread: f64,
    pub max_spread: f64,
    /// If `> 0`, used as a percent of mid instead of `min_spread` as the
    /// spread base.
    pub spread_pct: f64,
    pub quote_size: f64,
    pub tick_interval: u64,
}

impl Default for MarketMakerV1Config {
    fn default() -> Self {
        Self {
            min_spread: 1.0,
            max_spread: 10.0,
            spread_pct: 0.0,
            quote_size: 0.001,
            tick_interval: 5,
        }
    }
}

pub struct MarketMakerV1 {
    config: MarketMakerV1Config,
    counter: u64,
}

impl MarketMakerV1 {
    pub fn new(config: MarketMakerV1Config) -> Self {
        Self { config, counter: 0 }
    }
}

impl Strategy for MarketMakerV1 {
    fn on_tick(&mut self, tick: &Tick) -> Result<Vec<Signal>, StrategyError> {
        self.counter += 1;
        if self.counter % self.config.tick_interval != 0 {
            return Ok(Vec::new());
        }

        let (Some(bid), Some(ask)) = (tick.bid, tick.ask) else {
            return Ok(Vec::new());
        };

        let mid = (bid + ask) / 2.0;
        let base_spread = if self.config.spread_pct > 0.0 {
            (self.config.spread_pct / 100.0) * mid
        } else {
            self.config.min_spread
        };
        let desired_spread = base_spread
            .min(self.config.max_spread)
            .max(self.config.min_spread);

        let quote_bid = mid - desired_spread / 2.0;
        let quote_ask = mid + desired_spread / 2.0;

        Ok(vec![
            Signal::limit(Side::Buy, self.config.quote_size, quote_bid, "MM_BID"),
            Signal::limit(Side::Sell, self.config.quote_size, quote_ask, "MM_ASK"),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tick_with(bid: f64, ask: f64) -> Tick {
        let mut t = Tick::new("BTC-USD", (bid + ask) / 2.0, 0.0);
        t.bid = Some(bid);
        t.ask = Some(ask);
        t
    }

    #[test]
    fn emits_two_signals_symmetric_around_mid_at_interval() {
        let mut s = MarketMakerV1::new(MarketMakerV1Config {
            tick_interval: 1,
            min_spread: 2.0,
            ..Default::default()
        });
        let signals = s.on_tick(&tick_with(99.0, 101.0)).unwrap();
        assert_eq!(signals.len(), 2);
        assert_eq!(signals[0].side, Side::Buy);
        assert_eq!(signals[1].side, Side::Sell);
        let mid = 100.0;
        assert_eq!(signals[0].price.unwrap(), mid - 1.0);
        assert_eq!(signals[1].price.unwrap(), mid + 1.0);
    }

    #[test]
    fn spread_clamped_to_max() {
        let mut s = MarketMakerV1::new(MarketMakerV1Config {
            tick_interval: 1,
            spread_pct: 50.0, // would be enormous
            max_spread: 4.0,
            ..Default::default()
        });
        let signals = s.on_tick(&tick_with(99.0, 101.0)).unwrap();
        let spread = signals[1].price.unwrap() - signals[0].price.unwrap();
        assert!((spread - 4.0).abs() < 1e-9);
    }

    #[test]
    fn silent_off_interval_and_without_book() {
        let mut s = MarketMakerV1::new(MarketMakerV1Config {
            tick_interval: 3,
            ..Default::default()
        });
        assert!(s.on_tick(&Tick::new("BTC-USD", 100.0, 0.0)).unwrap().is_empty());
        assert!(s.on_tick(&Tick::new("BTC-USD", 100.0, 0.0)).unwrap().is_empty());
    }
}
