//! Errors raised while wiring up logging.

use thiserror::Error;
use tracing::subscriber::SetGlobalDefaultError;
use tracing_subscriber::filter::ParseError;

use crate::severity::LevelError;
use crate::text::StyleError;

#[derive(Debug, Error)]
pub enum InstallError {
    #[error("failed to install the log bridge: {0}")]
    Logger(#[from] log::SetLoggerError),

    #[error("failed to set global default subscriber: {0}")]
    Subscriber(#[from] SetGlobalDefaultError),

    #[error("invalid level: {0}")]
    Level(#[from] LevelError),

    #[error("invalid style for '{name}': {source}")]
    Style {
        name: String,
        #[source]
        source: StyleError,
    },

    #[error("unknown traceback theme '{0}'")]
    UnknownTracebackTheme(String),

    #[error("invalid filter directives: {0}")]
    Filter(#[from] ParseError),
}
