//! Application-wide error types using thiserror.

use salesdash_common::DashError;
use salesdash_config::ConfigError;

/// Main application error type.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Loading, computation or rendering error.
    #[error(transparent)]
    Dash(#[from] DashError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// File watcher error.
    #[error("Watch error: {0}")]
    Watch(#[from] notify::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for the dashboard application.
pub type AppResult<T> = Result<T, AppError>;
