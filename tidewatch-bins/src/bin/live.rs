//! "Live" driver skeleton: wires the environment-hardening rules in front
//! of the same pipeline the other drivers run.
//!
//! Grounded on `original_source/app.py`'s environment-based hardening hint
//! (`dry_run` forced unless two env vars both express consent) and
//! `bog-bins::bin`'s one-binary-per-mode layout. Venue wiring (signing,
//! endpoints, symbol casing) isn't implemented here, so this binary still
//! runs against `DryRunExecutionClient` and `DummyDataFeed` — it exists to
//! exercise `harden_for_environment` and the `raise_on_circuit_breaker`
//! propagation path, not to place real orders. A real deployment swaps in a
//! venue-specific `ExecutionClient`/`Feed` pair behind the same traits.

use std::env;
use std::sync::atomic::Ordering;

use anyhow::Result;
use clap::Parser;

use tidewatch_bins::common::{build_strategy, install_shutdown_flag, CommonArgs, StrategyBox};
use tidewatch_core::config::harden_for_environment;
use tidewatch_core::engine::Engine;
use tidewatch_core::execution::DryRunExecutionClient;
use tidewatch_core::feed::dummy::DummyDataFeed;
use tidewatch_core::feed::Feed;
use tidewatch_core::risk::{InventoryRiskManager, RiskManager};
use tidewatch_core::util::init_logger;

/// Both must be set to a truthy value for a live run to leave `dry_run`
/// unforced — two separate environment variables so a single stray `true`
/// can't flip a deployment into live trading.
const ENV_FLAG: &str = "TIDEWATCH_LIVE_TRADING";
const CONFIRM_FLAG: &str = "TIDEWATCH_LIVE_CONFIRM";

fn env_truthy(name: &str) -> bool {
    matches!(
        env::var(name).ok().as_deref(),
        Some("1") | Some("true") | Some("TRUE") | Some("yes")
    )
}

fn main() -> Result<()> {
    let args = CommonArgs::parse();
    init_logger(&args.log_level, args.json_logs);

    let mut config = args.engine_config();
    let live_consent = env_truthy(ENV_FLAG) && env_truthy(CONFIRM_FLAG);
    harden_for_environment(&mut config, true, live_consent);

    tracing::info!(
        symbol = %args.symbol,
        strategy = ?args.strategy,
        dry_run = config.trading.dry_run,
        circuit_breaker_enabled = config.risk.limits.circuit_breaker_enabled,
        "starting live driver"
    );

    if !config.trading.dry_run {
        tracing::warn!(
            "dry_run disabled by explicit operator consent, but no venue-specific \
             ExecutionClient is wired in this core — falling back to dry-run accounting"
        );
    }

    let mut feed = DummyDataFeed::new(&args.symbol, args.start_price, args.seed);
    feed.connect();

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

    feed.disconnect();

    let snapshot = engine.snapshot();
    tracing::info!(
        tick_count = snapshot.tick_count,
        trade_count = snapshot.trade_count,
        qty = snapshot.position.qty,
        realized_pnl = snapshot.position.realized_pnl,
        running = snapshot.running,
        "live run complete"
    );

    Ok(())
}
