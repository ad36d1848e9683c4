//! Z-score mean reversion over the last N trade prices.
//!
//! Grounded on `original_source/strategies/mean_reversion_v1.py`.

use tidewatch_core::core::errors::StrategyError;
use tidewatch_core::core::types::{Side, Signal, Tick};
use tidewatch_core::strategy::{RollingWindow, SideBias, Strategy};

use crate::side_bias::bias_allows;

#[derive(Debug, Clone, Copy)]
pub struct MeanReversionV1Config {
    pub lookback_ticks: usize,
    pub z_threshold: f64,
    pub order_size: f64,
    pub cooldown_ticks: u32,
    pub side_bias: SideBias,
    pub max_z_cap: f64,
}

impl Default for MeanReversionV1Config {
    fn default() -> Self {
        Self {
            lookback_ticks: 20,
            z_threshold: 2.0,
            order_size: 0.001,
            cooldown_ticks: 10,
            side_bias: SideBias::Both,
            max_z_cap: 5.0,
        }
    }
}

pub struct MeanReversionV1 {
    config: MeanReversionV1Config,
    prices: RollingWindow,
    cooldown: u32,
}

impl MeanReversionV1 {
    pub fn new(config: MeanReversionV1Config) -> Self {
        let window = RollingWindow::new(config.lookback_ticks.max(1));
        Self {
            config,
            prices: window,
            cooldown: 0,
        }
    }

    fn z_score(&self, last: f64) -> Option<f64> {
        if !self.prices.is_full() {
            return None;
        }
        let (mean, std) = self.prices.mean_stddev();
        if std <= 0.0 {
            return None;
        }
        let z = (last - mean) / std;
        Some(z.clamp(-self.config.max_z_cap, self.config.max_z_cap))
    }
}

impl Strategy for MeanReversionV1 {
    fn on_tick(&mut self, tick: &Tick) -> Result<Vec<Signal>, StrategyError> {
        let Some(last) = tick.last else {
            return Ok(Vec::new());
        };
        self.prices.push(last);

        if self.cooldown > 0 {
            self.cooldown -= 1;
            return Ok(Vec::new());
        }

        let Some(z) = self.z_score(last) else {
            return Ok(Vec::new());
        };

        if z.abs() < self.config.z_threshold {
            return Ok(Vec::new());
        }

        let side = if z <= -self.config.z_threshold {
            Side::Buy
        } else {
            Side::Sell
        };

        if !bias_allows(self.config.side_bias, side) {
            return Ok(Vec::new());
        }

        self.cooldown = self.config.cooldown_ticks;
        Ok(vec![Signal::market(side, self.config.order_size, "MEAN_REV_V1")])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tick(last: f64) -> Tick {
        Tick::new("BTC-USD", last, 0.0)
    }

    #[test]
    fn sell_signal_on_price_spike_above_mean() {
        let mut s = MeanReversionV1::new(MeanReversionV1Config {
            lookback_ticks: 5,
            z_threshold: 1.0,
            cooldown_ticks: 10,
            ..Default::default()
        });
        let mut signals = Vec::new();
        for p in [100.0, 100.0, 100.0, 100.0, 102.0] {
            signals = s.on_tick(&tick(p)).unwrap();
        }
        assert_eq!(signals.len(), 1);
        assert_eq!(signals[0].side, Side::Sell);
        assert_eq!(signals[0].tag, "MEAN_REV_V1");
    }

    #[test]
    fn cooldown_suppresses_further_signals() {
        let mut s = MeanReversionV1::new(MeanReversionV1Config {
            lookback_ticks: 3,
            z_threshold: 1.0,
            cooldown_ticks: 5,
            ..Default::default()
        });
        for p in [100.0, 100.0, 100.0] {
            s.on_tick(&tick(p)).unwrap();
        }
        let first = s.on_tick(&tick(200.0)).unwrap();
        assert_eq!(first.len(), 1);
        let second = s.on_tick(&tick(1.0)).unwrap();
        assert!(second.is_empty());
    }

    #[test]
    fn long_only_bias_blocks_sell_side() {
        let mut s = MeanReversionV1::new(MeanReversionV1Config {
            lookback_ticks: 5,
            z_threshold: 1.0,
            side_bias: SideBias::LongOnly,
            ..Default::default()
        });
        let mut last = Vec::new();
        for p in [100.0, 100.0, 100.0, 100.0, 200.0] {
            last = s.on_tick(&tick(p)).unwrap();
        }
        assert!(last.is_empty());
    }

    #[test]
    fn flat_series_has_zero_stddev_and_emits_nothing() {
        let mut s = MeanReversionV1::new(MeanReversionV1Config {
            lookback_ticks: 4,
            ..Default::default()
        });
        let mut last = Vec::new();
        for _ in 0..4 {
            last = s.on_tick(&tick(100.0)).unwrap();
        }
        assert!(last.is_empty());
    }
}
