//! Logging setup.
//!
//! The library only emits `tracing` events. Hosts that have no subscriber of
//! their own can install a formatted one here.

use crate::errors::FieldGroupError;
use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "fieldgroups=info";

/// Output format of the installed subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

/// Builds the filter from `RUST_LOG`, falling back to `default`.
pub fn env_filter(default: &str) -> Result<EnvFilter, FieldGroupError> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default))
        .map_err(|e| FieldGroupError::Config(format!("invalid log filter '{default}': {e}")))
}

/// Installs a global `tracing` subscriber.
///
/// # Errors
///
/// Fails if the filter is invalid or a global subscriber is already set.
pub fn init_tracing(default_filter: &str, format: LogFormat) -> Result<(), FieldGroupError> {
    let filter = env_filter(default_filter)?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let result = match format {
        LogFormat::Pretty => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    result.map_err(|e| FieldGroupError::Config(format!("tracing already initialised: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_filter_accepts_default() {
        assert!(env_filter(DEFAULT_FILTER).is_ok());
    }

    #[test]
    fn test_second_init_fails() {
        let _ = init_tracing("fieldgroups=debug", LogFormat::Pretty);
        let err = init_tracing("fieldgroups=debug", LogFormat::Json).unwrap_err();
        assert!(matches!(err, FieldGroupError::Config(_)));
    }
}
