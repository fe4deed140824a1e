//! Logger bootstrap for the runner binary and tests.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Initializes the global logger.
///
/// `verbose` lowers the default filter to `debug`, which surfaces per-frame
/// events such as spawns and power-up pickups. `RUST_LOG` always wins over the
/// default.
pub fn init(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let env = Env::default().default_filter_or(level.to_string());
    let mut builder = Builder::from_env(env);
    builder.format_timestamp_millis();

    // A logger may already be installed by an earlier test; keep the first.
    if builder.try_init().is_err() {
        log::debug!("logger already initialised");
    }
}
