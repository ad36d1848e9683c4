//! Runs a packaged strategy against the simulated order-book feed with a
//! dry-run execution client — the reference way to watch the full
//! tick-to-execution pipeline end to end without any network dependency.
//!
//! Grounded on `bog-bins::bin::simple_spread_simulated`, generalized from a
//! single hardwired strategy/executor pair to a CLI-selected strategy.

use std::sync::atomic::Ordering;

use anyhow::Result;
use clap::Parser;

use tidewatch_bins::common::{build_strategy, install_shutdown_flag, CommonArgs, StrategyBox};
use tidewatch_core::engine::Engine;
use tidewatch_core::execution::DryRunExecutionClient;
use tidewatch_core::feed::simulated::SimulatedFeedConfig;
use tidewatch_core::feed::SimulatedOrderBookFeed;
use tidewatch_core::risk::{InventoryRiskManager, RiskManager};
use tidewatch_core::util::init_logger;

fn main() -> Result<()> {
    let args = CommonArgs::parse();
    init_logger(&args.log_level, args.json_logs);

    let config = args.engine_config();
    tracing::info!(symbol = %args.symbol, strategy = ?args.strategy, "starting simulated driver");

    let mut feed = SimulatedOrderBookFeed::new(
        &args.symbol,
        SimulatedFeedConfig {
            start_price: args.start_price,
            ..SimulatedFeedConfig::default()
        },
        args.seed,
    );

    let strategy = build_strategy(args.strategy);
    let risk = RiskManager::new(config.risk.limits);
    let inventory = InventoryRiskManager::new(config.risk.inventory);
    let execution = DryRunExecutionClient::new(args.initial_equity);

    let mut engine = Engine::new(
        args.symbol.clone(),
        StrategyBox(strategy),
        risk,
        inventory,
        execution,
        config.raise_on_circuit_breaker,
    );

    let running = install_shutdown_flag();

    for _ in 0..args.max_ticks {
        if !running.load(Ordering::Acquire) || !engine.running() {
            break;
        }
        let Some(tick) = feed.next() else {
            break;
        };
        match engine.process_tick(&tick) {
            Ok(events) => {
                for event in events {
                    tracing::debug!(event = ?event, "engine event");
                }
            }
            Err(events) => {
                tracing::error!(events = ?events, "engine stopped: circuit breaker propagated");
                break;
            }
        }
    }

    let snapshot = engine.snapshot();
    tracing::info!(
        tick_count = snapshot.tick_count,
        trade_count = snapshot.trade_count,
        qty = snapshot.position.qty,
        realized_pnl = snapshot.position.realized_pnl,
        running = snapshot.running,
        "simulated run complete"
    );

    Ok(())
}
