use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, filter::Targets, fmt, prelude::__tracing_subscriber_SubscriberExt,
    util::SubscriberInitExt,
};

/// Crate log level: debug under `--verbose`, warnings only otherwise.
fn level_for(verbose: bool) -> (LevelFilter, &'static str) {
    if verbose {
        (LevelFilter::DEBUG, "debug")
    } else {
        (LevelFilter::WARN, "warn")
    }
}

/// Installs the global subscriber, writing to stderr. `verbose` turns on
/// debug output for this crate; `RUST_LOG` still applies on top.
pub fn init_logging(verbose: bool) {
    let (level_filter, level) = level_for(verbose);
    let app_filter = Targets::new().with_target("raisekit", level_filter);
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().pretty().without_time().with_writer(std::io::stderr))
        .with(app_filter)
        .with(env_filter)
        .init();
}
