use rail_config::definitions::ENV_DEBUG;
use std::env;
use tracing_subscriber::filter::LevelFilter;

pub fn debug_enabled() -> bool {
    env::var_os(ENV_DEBUG).is_some_and(|v| !v.is_empty())
}

pub fn tracing_level(verbose: bool) -> LevelFilter {
    if verbose || debug_enabled() {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    }
}

/// Installs the process-wide subscriber. A subscriber that is already
/// installed, for example by an application embedding the reporter, is kept.
pub fn init(verbose: bool) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing_level(verbose))
        .with_target(false)
        .try_init();
}
