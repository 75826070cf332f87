//! Error types and utilities for the sales dashboard

use thiserror::Error;

/// Result type alias for dashboard operations
pub type Result<T> = std::result::Result<T, DashError>;

/// Main error type for dashboard operations
#[derive(Error, Debug)]
pub enum DashError {
    /// Malformed input: missing columns, unparseable dates or amounts
    #[error("Parse error{}: {message}", location(.row, .column))]
    Parse {
        message: String,
        /// 1-based data row, header excluded
        row: Option<usize>,
        column: Option<String>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Numeric failure while aggregating, e.g. a total that is not finite
    #[error("Computation error: {message}")]
    Computation { message: String },

    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Chart drawing and image encoding errors
    #[error("Chart error: {message}")]
    Chart {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internationalization and localization errors
    #[error("Localization error: {message}")]
    Localization {
        message: String,
        locale: Option<String>,
    },

    /// Validation errors for user input or configuration values
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    /// Generic error with custom message
    #[error("{message}")]
    Generic {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

fn location(row: &Option<usize>, column: &Option<String>) -> String {
    match (row, column.as_deref()) {
        (Some(row), Some(column)) => format!(" at row {row}, column '{column}'"),
        (Some(row), None) => format!(" at row {row}"),
        (None, Some(column)) => format!(" in column '{column}'"),
        (None, None) => String::new(),
    }
}

impl DashError {
    /// Create a new generic error with a custom message
    pub fn new(msg: impl Into<String>) -> Self {
        Self::Generic {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new generic error with a custom message and source
    pub fn with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Generic {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a parse error without location
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
            row: None,
            column: None,
            source: None,
        }
    }

    /// Create a parse error pointing at a column (e.g. a missing header)
    pub fn parse_column(msg: impl Into<String>, column: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
            row: None,
            column: Some(column.into()),
            source: None,
        }
    }

    /// Create a parse error pointing at a cell
    pub fn parse_at(msg: impl Into<String>, row: usize, column: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
            row: Some(row),
            column: Some(column.into()),
            source: None,
        }
    }

    /// Create a new computation error
    pub fn computation(msg: impl Into<String>) -> Self {
        Self::Computation {
            message: msg.into(),
        }
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new configuration error with source
    pub fn config_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new chart error
    pub fn chart(msg: impl Into<String>) -> Self {
        Self::Chart {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new chart error with source
    pub fn chart_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Chart {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new localization error with locale
    pub fn localization_with_locale(msg: impl Into<String>, locale: impl Into<String>) -> Self {
        Self::Localization {
            message: msg.into(),
            locale: Some(locale.into()),
        }
    }

    /// Create a new validation error with field name
    pub fn validation_field(msg: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: Some(field.into()),
        }
    }

    /// Whether the error comes from malformed input rather than from the program
    pub const fn is_input_error(&self) -> bool {
        matches!(self, Self::Parse { .. } | Self::Validation { .. })
    }
}

// Error conversion implementations for external types

/// Convert from csv::Error to DashError, keeping the record position when known
impl From<csv::Error> for DashError {
    fn from(err: csv::Error) -> Self {
        let row = err
            .position()
            .and_then(|pos| usize::try_from(pos.record()).ok());
        Self::Parse {
            message: "malformed CSV input".to_string(),
            row,
            column: None,
            source: Some(Box::new(err)),
        }
    }
}

/// Convert from serde_yaml::Error to DashError
impl From<serde_yaml::Error> for DashError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::config_with_source("YAML parsing error", err)
    }
}

#[cfg(feature = "plotters")]
/// Convert from plotters drawing errors to DashError
impl<T> From<plotters::drawing::DrawingAreaErrorKind<T>> for DashError
where
    T: std::error::Error + Send + Sync + 'static,
{
    fn from(err: plotters::drawing::DrawingAreaErrorKind<T>) -> Self {
        Self::chart_with_source("Chart rendering failed", err)
    }
}
