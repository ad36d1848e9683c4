//! Consecutive-move micro-momentum: enters on a short run of same-direction
//! ticks backed by a minimum total return over the lookback window.
//!
//! Grounded on `original_source/strategies/micro_momentum_v1.py`.

use tidewatch_core::core::errors::StrategyError;
use tidewatch_core::core::types::{Side, Signal, Tick};
use tidewatch_core::strategy::{RollingWindow, SideBias, Strategy};

use crate::side_bias::bias_allows;

#[derive(Debug, Clone, Copy)]
pub struct MicroMomentumV1Config {
    pub lookback_ticks: usize,
    pub min_moves: u32,
    pub min_return: f64,
    pub order_size: f64,
    pub cooldown_ticks: u32,
    pub side_bias: SideBias,
}

impl Default for MicroMomentumV1Config {
    fn default() -> Self {
        Self {
            lookback_ticks: 10,
            min_moves: 3,
            min_return: 0.0005,
            order_size: 0.001,
            cooldown_ticks: 10,
            side_bias: SideBias::Both,
        }
    }
}

pub struct MicroMomentumV1 {
    config: MicroMomentumV1Config,
    prices: RollingWindow,
    cooldown: u32,
}

impl MicroMomentumV1 {
    pub fn new(config: MicroMomentumV1Config) -> Self {
        let window = RollingWindow::new(config.lookback_ticks.max(1));
        Self {
            config,
            prices: window,
            cooldown: 0,
        }
    }

    /// Counts the longest consecutive up/down run ending at the window's
    /// most recent sample and the total return across the window. A flat
    /// tick (equal consecutive prices) resets both run counters, mirroring
    /// the Python original.
    fn check_momentum(&self) -> Option<Side> {
        if !self.prices.is_full() {
            return None;
        }
        let prices: Vec<f64> = self.prices.iter().copied().collect();
        let p0 = prices[0];
        let p_last = *prices.last().unwrap();
        if p0 <= 0.0 {
            return None;
        }
        let ret = (p_last - p0) / p0;

        let mut up_moves = 0u32;
        let mut down_moves = 0u32;
        for w in prices.windows(2) {
            let (prev, cur) = (w[0], w[1]);
            if cur > prev {
                up_moves += 1;
                down_moves = 0;
            } else if cur < prev {
                down_moves += 1;
                up_moves = 0;
            } else {
                up_moves = 0;
                down_moves = 0;
            }
        }

        if up_moves >= self.config.min_moves && ret >= self.config.min_return {
            return Some(Side::Buy);
        }
        if down_moves >= self.config.min_moves && ret <= -self.config.min_return {
            return Some(Side::Sell);
        }
        None
    }
}

impl Strategy for MicroMomentumV1 {
    fn on_tick(&mut self, tick: &Tick) -> Result<Vec<Signal>, StrategyError> {
        let Some(last) = tick.last else {
            return Ok(Vec::new());
        };
        self.prices.push(last);

        if self.cooldown > 0 {
            self.cooldown -= 1;
            return Ok(Vec::new());
        }

        let Some(side) = self.check_momentum() else {
            return Ok(Vec::new());
        };

        if !bias_allows(self.config.side_bias, side) {
            return Ok(Vec::new());
        }

        self.cooldown = self.config.cooldown_ticks;
        Ok(vec![Signal::market(
            side,
            self.config.order_size,
            "MICRO_MOMENTUM_V1",
        )])
    }
}
