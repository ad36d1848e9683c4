//! Volatility-adaptive market maker: widens its spread with recent mid
//! volatility on top of the v1 base.
//!
//! Grounded on `original_source/strategies/market_maker_v2.py`.

use tidewatch_core::core::errors::StrategyError;
use tidewatch_core::core::types::{Side, Signal, Tick};
use tidewatch_core::strategy::{RollingWindow, Strategy};

#[derive(Debug, Clone, Copy)]
pub struct MarketMakerV2Config {
    pub min_spread: f64,
    pub max_spread: f64,
    pub spread_pct: f64,
    pub quote_size: f64,
    pub tick_interval: u64,
    pub vol_window: usize,
    pub vol_factor: f64,
}

impl Default for MarketMakerV2Config {
    fn default() -> Self {
        Self {
            min_spread: 1.0,
            max_spread: 15.0,
            spread_pct: 0.0,
            quote_size: 0.001,
            tick_interval: 5,
            vol_window: 50,
            vol_factor: 1.0,
        }
    }
}

pub struct MarketMakerV2 {
    config: MarketMakerV2Config,
    counter: u64,
    mid_history: RollingWindow,
}

impl MarketMakerV2 {
    pub fn new(config: MarketMakerV2Config) -> Self {
        let window = RollingWindow::new(config.vol_window.max(1));
        Self {
            config,
            counter: 0,
            mid_history: window,
        }
    }
}

impl Strategy for MarketMakerV2 {
    fn on_tick(&mut self, tick: &Tick) -> Result<Vec<Signal>, StrategyError> {
        self.counter += 1;

        let (Some(bid), Some(ask)) = (tick.bid, tick.ask) else {
            return Ok(Vec::new());
        };

        // The mid feeds the volatility window on every tick, even ticks
        // that don't produce a quote — the gate below is purely about
        // emission cadence, not about observing the market.
        let mid = (bid + ask) / 2.0;
        self.mid_history.push(mid);

        if self.counter % self.config.tick_interval != 0 {
            return Ok(Vec::new());
        }

        let base_spread = if self.config.spread_pct > 0.0 {
            (self.config.spread_pct / 100.0) * mid
        } else {
            self.config.min_spread
        };

        let (_, stddev) = self.mid_history.mean_stddev();
        let raw_spread = base_spread + self.config.vol_factor * stddev;
        let desired_spread = raw_spread.min(self.config.max_spread).max(self.config.min_spread);

        let quote_bid = mid - desired_spread / 2.0;
        let quote_ask = mid + desired_spread / 2.0;

        Ok(vec![
            Signal::limit(Side::Buy, self.config.quote_size, quote_bid, "MM_V2_BID"),
            Signal::limit(Side::Sell, self.config.quote_size, quote_ask, "MM_V2_ASK"),
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
    fn widens_spread_when_mid_is_volatile() {
        let mut s = MarketMakerV2::new(MarketMakerV2Config {
            tick_interval: 4,
            min_spread: 0.1,
            max_spread: 1000.0,
            vol_window: 4,
            vol_factor: 1.0,
            ..Default::default()
        });
        // Feed a wildly jumping mid for 3 ticks (no emission yet), then
        // a 4th tick triggers the quote.
        for mid in [100.0, 200.0, 100.0] {
            assert!(s.on_tick(&tick_with(mid - 1.0, mid + 1.0)).unwrap().is_empty());
        }
        let signals = s.on_tick(&tick_with(199.0, 201.0)).unwrap();
        assert_eq!(signals.len(), 2);
        let spread = signals[1].price.unwrap() - signals[0].price.unwrap();
        assert!(spread > 1.0); // wider than min_spread due to volatility
    }

    #[test]
    fn quiet_market_uses_min_spread() {
        let mut s = MarketMakerV2::new(MarketMakerV2Config {
            tick_interval: 1,
            min_spread: 2.0,
            vol_factor: 1.0,
            ..Default::default()
        });
        let signals = s.on_tick(&tick_with(99.0, 101.0)).unwrap();
        let spread = signals[1].price.unwrap() - signals[0].price.unwrap();
        assert!((spread - 2.0).abs() < 1e-9);
    }
}
