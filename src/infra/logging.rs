use tracing_subscriber::EnvFilter;

use crate::infra::{config::LogConfig, error::AppError};

/// Installs the global fmt subscriber, tagging lines with the thread name so
/// listener workers are told apart from the caller.
pub fn init(config: &LogConfig) -> Result<(), AppError> {
    tracing_subscriber::fmt()
        .with_env_filter(resolve_filter(config)?)
        .with_target(true)
        .with_thread_names(true)
        .try_init()
        .map_err(AppError::LoggingInit)
}

/// `RUST_LOG` wins when set and parseable; otherwise the configured level
/// must be a valid filter directive.
fn resolve_filter(config: &LogConfig) -> Result<EnvFilter, AppError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    EnvFilter::try_new(&config.level).map_err(|source| AppError::LogFilter {
        directive: config.level.clone(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_configured_level_and_targets() {
        let config = LogConfig {
            level: "window_events=debug,warn".to_owned(),
        };

        assert!(resolve_filter(&config).is_ok());
    }

    #[test]
    fn rejects_malformed_level_when_env_is_unset() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        let config = LogConfig {
            level: "window_events=loud".to_owned(),
        };

        let error = resolve_filter(&config).expect_err("bad directive must be rejected");

        assert!(matches!(error, AppError::LogFilter { .. }));
        assert!(error.to_string().contains("window_events=loud"));
    }
}
