//! Error types for localization

use salesdash_common::DashError;
use thiserror::Error;

/// Errors that can occur while building bundles or formatting messages
#[derive(Error, Debug)]
pub enum I18nError {
    /// Failed to parse a language identifier
    #[error("Invalid language identifier: {0}")]
    InvalidLanguageId(String),

    /// The locale has no bundled translations
    #[error("Unsupported locale: {0}")]
    UnsupportedLocale(String),

    /// Failed to parse a Fluent resource
    #[error("Failed to parse Fluent resource for {locale}: {errors:?}")]
    FluentParseError { locale: String, errors: Vec<String> },

    /// Message not found in the bundle
    #[error("Message not found: {key}")]
    MessageNotFound { key: String },

    /// Failed to format a message
    #[error("Failed to format message '{key}': {errors:?}")]
    MessageFormatError { key: String, errors: Vec<String> },
}

/// Result type for i18n operations
pub type I18nResult<T> = Result<T, I18nError>;

impl From<I18nError> for DashError {
    fn from(err: I18nError) -> Self {
        match &err {
            I18nError::FluentParseError { locale, .. } => {
                DashError::localization_with_locale(err.to_string(), locale.clone())
            }
            _ => DashError::Localization {
                message: err.to_string(),
                locale: None,
            },
        }
    }
}
