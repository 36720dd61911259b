// SPDX-License-Identifier: GPL-3.0-only
use tracing_subscriber::{fmt, EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Build the level filter from the configured directive, never from the environment
pub fn build_filter(log_level: &str) -> EnvFilter {
    EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialize tracing subscriber with configuration
pub fn setup_logging(log_level: &str) -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(build_filter(log_level))
        .with(
            fmt::layer()
                .with_ansi(true)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
        )
        .try_init()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_filter_accepts_directive() {
        let filter = build_filter("election_fetch=debug,warn");
        assert!(filter.to_string().contains("election_fetch=debug"));
    }

    #[test]
    fn test_build_filter_falls_back_to_info() {
        let filter = build_filter("election_fetch=loud");
        assert_eq!(filter.to_string(), "info");
    }
}
