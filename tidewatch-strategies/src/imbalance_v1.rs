//! Top-of-book size imbalance: trades with the side that holds more size
//! at the best bid/ask once the skew clears a threshold.
//!
//! Grounded on `original_source/strategies/imbalance_v1.py`.

use tidewatch_core::core::errors::StrategyError;
use tidewatch_core::core::types::{Side, Signal, Tick};
use tidewatch_core::strategy::{SideBias, Strategy};

use crate::side_bias::bias_allows;

#[derive(Debug, Clone, Copy)]
pub struct ImbalanceV1Config {
    /// Fraction in `[0, 1]`; `(bid_size - ask_size) / (bid_size + ask_size)`
    /// must clear this in absolute value to trade.
    pub imbalance_threshold: f64,
    pub min_total_size: f64,
    pub order_size: f64,
    pub cooldown_ticks: u32,
    pub side_bias: SideBias,
}

impl Default for ImbalanceV1Config {
    fn default() -> Self {
        Self {
            imbalance_threshold: 0.6,
            min_total_size: 1.0,
            order_size: 0.001,
            cooldown_ticks: 5,
            side_bias: SideBias::Both,
        }
    }
}

pub struct ImbalanceV1 {
    config: ImbalanceV1Config,
    cooldown: u32,
}

impl ImbalanceV1 {
    pub fn new(config: ImbalanceV1Config) -> Self {
        Self {
            config,
            cooldown: 0,
        }
    }
}

impl Strategy for ImbalanceV1 {
    fn on_tick(&mut self, tick: &Tick) -> Result<Vec<Signal>, StrategyError> {
        if self.cooldown > 0 {
            self.cooldown -= 1;
            return Ok(Vec::new());
        }

        let (Some(bid_size), Some(ask_size)) = (tick.bid_size, tick.ask_size) else {
            return Ok(Vec::new());
        };
        if tick.bid.is_none() || tick.ask.is_none() {
            return Ok(Vec::new());
        }

        let total_size = bid_size + ask_size;
        if total_size <= 0.0 || total_size < self.config.min_total_size {
            return Ok(Vec::new());
        }

        let imbalance = (bid_size - ask_size) / total_size;
        if imbalance.abs() < self.config.imbalance_threshold {
            return Ok(Vec::new());
        }

        let side = if imbalance > 0.0 { Side::Buy } else { Side::Sell };

        if !bias_allows(self.config.side_bias, side) {
            return Ok(Vec::new());
        }

        self.cooldown = self.config.cooldown_ticks;
        Ok(vec![Signal::market(side, self.config.order_size, "IMBALANCE_V1")])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tick_with(bid: f64, ask: f64, bid_size: f64, ask_size: f64) -> Tick {
        let mut t = Tick::new("BTC-USD", (bid + ask) / 2.0, 0.0);
        t.bid = Some(bid);
        t.ask = Some(ask);
        t.bid_size = Some(bid_size);
        t.ask_size = Some(ask_size);
        t
    }

    #[test]
    fn buys_when_bid_side_heavier() {
        let mut s = ImbalanceV1::new(ImbalanceV1Config::default());
        let signals = s.on_tick(&tick_with(99.0, 101.0, 9.0, 1.0)).unwrap();
        assert_eq!(signals.len(), 1);
        assert_eq!(signals[0].side, Side::Buy);
        assert_eq!(signals[0].tag, "IMBALANCE_V1");
    }

    #[test]
    fn sells_when_ask_side_heavier() {
        let mut s = ImbalanceV1::new(ImbalanceV1Config::default());
        let signals = s.on_tick(&tick_with(99.0, 101.0, 1.0, 9.0)).unwrap();
        assert_eq!(signals[0].side, Side::Sell);
    }

    #[test]
    fn below_threshold_is_silent() {
        let mut s = ImbalanceV1::new(ImbalanceV1Config::default());
        assert!(s.on_tick(&tick_with(99.0, 101.0, 5.5, 4.5)).unwrap().is_empty());
    }

    #[test]
    fn below_min_total_size_is_silent_even_if_skewed() {
        let mut s = ImbalanceV1::new(ImbalanceV1Config {
            min_total_size: 10.0,
            ..Default::default()
        });
        assert!(s.on_tick(&tick_with(99.0, 101.0, 0.9, 0.1)).unwrap().is_empty());
    }

    #[test]
    fn cooldown_suppresses_next_tick() {
        let mut s = ImbalanceV1::new(ImbalanceV1Config {
            cooldown_ticks: 3,
            ..Default::default()
        });
        let first = s.on_tick(&tick_with(99.0, 101.0, 9.0, 1.0)).unwrap();
        assert_eq!(first.len(), 1);
        let second = s.on_tick(&tick_with(99.0, 101.0, 9.0, 1.0)).unwrap();
        assert!(second.is_empty());
    }
}
