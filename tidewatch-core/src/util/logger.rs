//! Library code never calls `tracing_subscriber::init` itself — that stays
//! a driver/binary concern. This helper is here for `tidewatch-bins` to
//! call at startup, matching `bog-core::utils::logger::init_logger`.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub fn init_logger(log_level: &str, json_logs: bool) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    if json_logs {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_target(true).with_thread_ids(true))
            .init();
    }
}
