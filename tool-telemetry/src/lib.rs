//! Observability utilities for tools.
//!
//! The toolsmith crates only emit `tracing` events; installing a subscriber is
//! left to the embedding application. [`init_tracing`] is the stock choice.

#![warn(missing_docs, clippy::pedantic)]

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

/// Environment variable consulted before the fallback filter.
pub const LOG_ENV: &str = "RUST_LOG";

/// Filter used when neither `RUST_LOG` nor an explicit directive is given.
pub const DEFAULT_FILTER: &str = "info";

/// Builds the filter: `RUST_LOG` when set, otherwise `fallback`.
///
/// # Errors
///
/// Returns an error when the chosen directive string cannot be parsed.
pub fn env_filter(fallback: Option<&str>) -> Result<EnvFilter> {
    match std::env::var(LOG_ENV) {
        Ok(directives) if !directives.trim().is_empty() => EnvFilter::try_new(&directives)
            .with_context(|| format!("invalid {LOG_ENV} directives `{directives}`")),
        _ => {
            let directives = fallback.unwrap_or(DEFAULT_FILTER);
            EnvFilter::try_new(directives)
                .with_context(|| format!("invalid log filter `{directives}`"))
        }
    }
}

/// Installs a global `fmt` subscriber.
///
/// # Errors
///
/// Returns an error when the filter is malformed or a global subscriber is
/// already installed.
pub fn try_init_tracing(fallback: Option<&str>) -> Result<()> {
    let filter = env_filter(fallback)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to install tracing subscriber: {err}"))?;
    tracing::debug!(filter = fallback.unwrap_or(DEFAULT_FILTER), "tracing initialised");
    Ok(())
}

/// Installs a global `fmt` subscriber, ignoring a subscriber that is
/// already in place. Returns `true` when this call installed it.
#[must_use = "returns whether a subscriber was installed"]
pub fn init_tracing(fallback: Option<&str>) -> bool {
    try_init_tracing(fallback).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_fallback_is_rejected() {
        if std::env::var_os(LOG_ENV).is_some() {
            return;
        }
        assert!(env_filter(Some("tool_kernel=notalevel")).is_err());
    }

    #[test]
    fn fallback_filter_parses() {
        assert!(env_filter(Some("tool_kernel=debug,warn")).is_ok());
        assert!(env_filter(None).is_ok());
    }

    #[test]
    fn second_install_is_reported() {
        let _ = init_tracing(Some("warn"));
        assert!(try_init_tracing(Some("warn")).is_err());
        assert!(!init_tracing(Some("warn")));
    }
}
