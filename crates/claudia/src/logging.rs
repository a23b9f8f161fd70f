//! Logging setup

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use claudia_core::LogLevel;

/// Filter used when `RUST_LOG` is not set
pub fn default_filter(level: LogLevel) -> EnvFilter {
    EnvFilter::new(format!(
        "claudia={level},claudia_core={level},theme={level},zoom={level},settings={level},warn",
        level = level.as_str()
    ))
}

/// Install the global subscriber, logging to stderr
///
/// A second call is a no-op.
pub fn init(level: LogLevel) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .try_init()
        .ok();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_names_workspace_crates() {
        let filter = default_filter(LogLevel::Debug).to_string();
        assert!(filter.contains("theme=debug"));
        assert!(filter.contains("zoom=debug"));
    }

    #[test]
    fn test_init_twice() {
        init(LogLevel::Info);
        init(LogLevel::Trace);
    }
}
