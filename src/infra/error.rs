use std::path::PathBuf;

use thiserror::Error;

/// Startup failures: everything that can go wrong before a window is created.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("cannot read {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{} is not valid TOML: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid config: {details}")]
    ConfigInvalid { details: String },
    #[error("invalid log filter `{directive}`: {source}")]
    LogFilter {
        directive: String,
        #[source]
        source: tracing_subscriber::filter::ParseError,
    },
    #[error("a global logger is already installed: {0}")]
    LoggingInit(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),
}
