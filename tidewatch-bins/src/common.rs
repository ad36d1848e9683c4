//! Shared CLI surface and wiring for the driver binaries.
//!
//! Grounded on `bog-bins::common` (`CommonArgs`, `init_logging`) and on
//! `bog-core::engine::generic::Engine::run`'s `ctrlc::set_handler` wiring,
//! generalized away from a single hardwired strategy/executor pair.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use clap::{Parser, ValueEnum};

use tidewatch_core::config::EngineConfig;
use tidewatch_core::strategy::Strategy;
use tidewatch_strategies::{
    ImbalanceV1, ImbalanceV1Config, MarketMakerV1, MarketMakerV1Config, MarketMakerV2,
    MarketMakerV2Config, MeanReversionV1, MeanReversionV1Config, MicroMomentumV1,
    MicroMomentumV1Config, SimpleMakerTaker, SimpleMakerTakerConfig,
};

/// Which packaged strategy a binary should run, selected by name instead of
/// wiring one binary per strategy as `bog-bins` does — the `Strategy`
/// trait stays object-safe specifically so a driver can make this choice
/// at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyKind {
    SimpleMakerTaker,
    MarketMakerV1,
    MarketMakerV2,
    MeanReversionV1,
    MicroMomentumV1,
    ImbalanceV1,
}

pub fn build_strategy(kind: StrategyKind) -> Box<dyn Strategy> {
    match kind {
        StrategyKind::SimpleMakerTaker => {
            Box::new(SimpleMakerTaker::new(SimpleMakerTakerConfig::default()))
        }
        StrategyKind::MarketMakerV1 => Box::new(MarketMakerV1::new(MarketMakerV1Config::default())),
        StrategyKind::MarketMakerV2 => Box::new(MarketMakerV2::new(MarketMakerV2Config::default())),
        StrategyKind::MeanReversionV1 => {
            Box::new(MeanReversionV1::new(MeanReversionV1Config::default()))
        }
        StrategyKind::MicroMomentumV1 => {
            Box::new(MicroMomentumV1::new(MicroMomentumV1Config::default()))
        }
        StrategyKind::ImbalanceV1 => Box::new(ImbalanceV1::new(ImbalanceV1Config::default())),
    }
}

/// CLI arguments common to every binary in this crate.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct CommonArgs {
    /// Symbol to trade.
    #[arg(short, long, default_value = "BTC-USD")]
    pub symbol: String,

    /// Which packaged strategy to run.
    #[arg(long, value_enum, default_value_t = StrategyKind::MarketMakerV1)]
    pub strategy: StrategyKind,

    /// Log level (overridden by `RUST_LOG` if set).
    #[arg(short, long, default_value = "info")]
    pub log_level: String,

    /// Emit structured JSON logs instead of the human-readable format.
    #[arg(long)]
    pub json_logs: bool,

    /// Seed for the simulated feed's PRNG.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Number of ticks to run before stopping (the simulated feed is
    /// otherwise infinite).
    #[arg(long, default_value_t = 2_000)]
    pub max_ticks: u64,

    /// Starting mid-price for the simulated feed.
    #[arg(long, default_value_t = 100_000.0)]
    pub start_price: f64,

    /// Starting account equity.
    #[arg(long, default_value_t = 10_000.0)]
    pub initial_equity: f64,
}

impl CommonArgs {
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig::new(self.symbol.clone())
    }
}

/// Installs a `ctrlc` handler that flips a shared flag, mirroring
/// `bog-core::engine::generic::Engine::run`'s shutdown wiring. A failure to
/// install is logged and otherwise ignored — the driver still runs, just
/// without a graceful Ctrl-C path.
pub fn install_shutdown_flag() -> Arc<AtomicBool> {
    let running = Arc::new(AtomicBool::new(true));
    let flag = running.clone();
    if let Err(err) = ctrlc::set_handler(move || {
        tracing::warn!("received shutdown signal");
        flag.store(false, Ordering::Release);
    }) {
        tracing::warn!(error = %err, "failed to install ctrl-c handler; shutdown via code only");
    }
    running
}

/// Forwards a boxed trait object to a concrete `Strategy` impl, so
/// `Engine<S, E>`/`BacktestEngine<S>` can monomorphize over a
/// runtime-selected strategy without the engine itself becoming dynamic.
pub struct StrategyBox(pub Box<dyn Strategy>);

impl Strategy for StrategyBox {
    fn on_tick(
        &mut self,
        tick: &tidewatch_core::core::types::Tick,
    ) -> Result<
        Vec<tidewatch_core::core::types::Signal>,
        tidewatch_core::core::errors::StrategyError,
    > {
        self.0.on_tick(tick)
    }

    fn on_fill(&mut self, fill: &tidewatch_core::core::types::Fill) {
        self.0.on_fill(fill)
    }

    fn on_error(&mut self, err: &tidewatch_core::core::errors::StrategyError) {
        self.0.on_error(err)
    }

    fn name(&self) -> &str {
        self.0.name()
    }
}
