//! Replays a packaged strategy against the simulated order-book feed
//! through `BacktestEngine` and prints the resulting trade log, equity
//! curve, and summary statistics as JSON.
//!
//! Grounded on `original_source/core/backtest.py`'s own CLI-style entry
//! point and `bog-bins`'s one-binary-per-mode layout.

use anyhow::Result;
use clap::Parser;

use tidewatch_bins::common::{build_strategy, CommonArgs, StrategyBox};
use tidewatch_core::backtest::{BacktestConfig, BacktestEngine};
use tidewatch_core::feed::simulated::SimulatedFeedConfig;
use tidewatch_core::feed::SimulatedOrderBookFeed;
use tidewatch_core::risk::{InventoryRiskManager, RiskManager};
use tidewatch_core::util::init_logger;

fn main() -> Result<()> {
    let args = CommonArgs::parse();
    init_logger(&args.log_level, args.json_logs);

    let config = args.engine_config();
    tracing::info!(symbol = %args.symbol, strategy = ?args.strategy, "starting backtest");

    let feed = SimulatedOrderBookFeed::new(
        &args.symbol,
        SimulatedFeedConfig {
            start_price: args.start_price,
            ..SimulatedFeedConfig::default()
        },
        args.seed,
    );
    let ticks = feed.take(args.max_ticks as usize);

    let strategy = build_strategy(args.strategy);
    let engine = BacktestEngine::new(
        args.symbol.clone(),
        StrategyBox(strategy),
        RiskManager::new(config.risk.limits),
        InventoryRiskManager::new(config.risk.inventory),
        BacktestConfig {
            initial_equity: args.initial_equity,
            ..BacktestConfig::default()
        },
    );

    let result = engine.run(ticks);

    tracing::info!(
        total_trades = result.summary.total_trades,
        net_pnl = result.summary.net_pnl,
        win_rate_pct = result.summary.win_rate_pct,
        max_drawdown = result.summary.max_drawdown,
        "backtest complete"
    );

    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}
