//! `tidewatch-core` — the tick-to-execution pipeline for the tidewatch
//! HFT bot framework: position accounting, the session risk manager and
//! its circuit breaker, the inventory admission gate, the trading engine,
//! the backtest engine, feeds (simulated and dummy), and the execution
//! client contract.
//!
//! ```text
//! Feed ──tick──▶ Engine ──▶ Strategy::on_tick ──▶ [Signal]
//!                   │
//!                   ▼
//!      InventoryRiskManager ──▶ RiskManager ──▶ ExecutionClient ──▶ Position
//!                   │
//!                   ▼
//!               EngineEvent
//! ```
//!
//! Strategies themselves live in the sibling `tidewatch-strategies` crate.

pub mod backtest;
pub mod config;
pub mod core;
pub mod engine;
pub mod execution;
pub mod feed;
pub mod resilience;
pub mod risk;
pub mod strategy;
pub mod util;
