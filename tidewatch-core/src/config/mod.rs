//! Configuration surface.
//!
//! This module defines only the serde-deserializable shape of recognized
//! config keys — reading a YAML/TOML file from disk and merging CLI flags
//! is a driver concern (`tidewatch-bins`), not a core one.

use serde::{Deserialize, Serialize};

use crate::risk::{InventoryLimits, RiskLimits};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TradingConfig {
    #[serde(default = "default_true")]
    pub dry_run: bool,
}

impl Default for TradingConfig {
    fn default() -> Self {
        Self { dry_run: true }
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RiskConfig {
    pub limits: RiskLimits,
    pub inventory: InventoryLimits,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            limits: RiskLimits::default(),
            inventory: InventoryLimits {
                max_abs_qty: 1.0,
                max_notional_pct: 50.0,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    pub symbol: String,
    pub trading: TradingConfig,
    pub risk: RiskConfig,
    pub raise_on_circuit_breaker: bool,
}

impl EngineConfig {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            trading: TradingConfig::default(),
            risk: RiskConfig {
                limits: RiskLimits::default(),
                inventory: InventoryLimits {
                    max_abs_qty: 1.0,
                    max_notional_pct: 50.0,
                },
            },
            raise_on_circuit_breaker: true,
        }
    }
}

/// Forces conservative defaults in a live environment unless the operator
/// has explicitly opted in via both `is_live` and `live_consent` being
/// `true`. Exposed as a free function a driver can call on a parsed
/// config; the core itself never reads environment variables anywhere
/// else.
pub fn harden_for_environment(config: &mut EngineConfig, is_live: bool, live_consent: bool) {
    if !is_live {
        return;
    }
    config.risk.limits.circuit_breaker_enabled = true;
    if !live_consent {
        config.trading.dry_run = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_round_trips_through_json() {
        let config = EngineConfig::new("BTC-USD");
        let json = serde_json::to_string(&config).unwrap();
        let back: EngineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config.symbol, back.symbol);
        assert_eq!(
            config.risk.limits.max_position_size_pct,
            back.risk.limits.max_position_size_pct
        );
    }

    #[test]
    fn hardening_forces_dry_run_without_explicit_consent() {
        let mut config = EngineConfig::new("BTC-USD");
        config.trading.dry_run = false;
        config.risk.limits.circuit_breaker_enabled = false;

        harden_for_environment(&mut config, true, false);

        assert!(config.trading.dry_run);
        assert!(config.risk.limits.circuit_breaker_enabled);
    }

    #[test]
    fn hardening_respects_explicit_live_consent() {
        let mut config = EngineConfig::new("BTC-USD");
        config.trading.dry_run = false;

        harden_for_environment(&mut config, true, true);

        assert!(!config.trading.dry_run);
    }

    #[test]
    fn hardening_is_a_noop_outside_live_environment() {
        let mut config = EngineConfig::new("BTC-USD");
        config.trading.dry_run = false;

        harden_for_environment(&mut config, false, false);

        assert!(!config.trading.dry_run);
    }
}
