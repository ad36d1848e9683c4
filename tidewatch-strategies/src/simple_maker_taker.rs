//! Baseline strategy used mostly to exercise the pipeline end-to-end.
//!
//! Grounded on `original_source/strategies/simple_maker_taker.py`.

use tidewatch_core::core::errors::StrategyError;
use tidewatch_core::core::types::{Side, Signal, Tick};
use tidewatch_core::strategy::Strategy;

#[derive(Debug, Clone, Copy)]
pub struct SimpleMakerTakerConfig {
    pub min_spread: f64,
    pub order_size: f64,
    pub tick_interval: u64,
}

impl Default for SimpleMakerTakerConfig {
    fn default() -> Self {
        Self {
            min_spread: 1.0,
            order_size: 0.001,
            tick_interval: 5,
        }
    }
}

/// Every `tick_interval` ticks, if the spread clears `min_spread`, emits
/// one LIMIT signal alternating BUY at the bid / SELL at the ask.
pub struct SimpleMakerTaker {
    config: SimpleMakerTakerConfig,
    counter: u64,
    last_side: Side,
}

impl SimpleMakerTaker {
    pub fn new(config: SimpleMakerTakerConfig) -> Self {
        Self {
            config,
            counter: 0,
            last_side: Side::Buy,
        }
    }
}

impl Strategy for SimpleMakerTaker {
    fn on_tick(&mut self, tick: &Tick) -> Result<Vec<Signal>, StrategyError> {
        self.counter += 1;
        if self.counter % self.config.tick_interval != 0 {
            return Ok(Vec::new());
        }

        let (Some(bid), Some(ask)) = (tick.bid, tick.ask) else {
            return Ok(Vec::new());
        };

        if ask - bid < self.config.min_spread {
            return Ok(Vec::new());
        }

        self.last_side = self.last_side.opposite();
        let price = match self.last_side {
            Side::Buy => bid,
            Side::Sell => ask,
        };

        Ok(vec![Signal::limit(
            self.last_side,
            self.config.order_size,
            price,
            "SIMPLE_MAKER_TAKER",
        )])
    }
}
