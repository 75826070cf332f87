//! Validation helpers used by the schema derives

use once_cell::sync::Lazy;
use regex::Regex;
use salesdash_common::logging::LoggingConfig;
use std::path::Path;
use validator::ValidationError;

/// Regex pattern for validating hex color codes (e.g., #FFFFFF, #1f77b4)
pub static HEX_COLOR_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("Invalid hex color regex pattern"));

/// Locales with bundled translations.
pub const SUPPORTED_LOCALES: &[&str] = &["pt-BR", "en-US"];

/// Delimiters accepted for the sales file.
pub const SUPPORTED_DELIMITERS: &[char] = &[',', ';', '\t', '|'];

/// Validate a `#rrggbb` color
pub fn validate_hex_color(color: &str) -> Result<(), ValidationError> {
    if HEX_COLOR_REGEX.is_match(color) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_hex_color")
            .with_message("Color must be a hex value like #1f77b4".into()))
    }
}

/// Validate a locale tag against the bundled translations
pub fn validate_locale(locale: &str) -> Result<(), ValidationError> {
    if SUPPORTED_LOCALES.contains(&locale) {
        Ok(())
    } else {
        Err(ValidationError::new("unsupported_locale"))
    }
}

/// Validate a field delimiter
pub fn validate_delimiter(delimiter: &char) -> Result<(), ValidationError> {
    if SUPPORTED_DELIMITERS.contains(delimiter) {
        Ok(())
    } else {
        Err(ValidationError::new("unsupported_delimiter"))
    }
}

/// Validate the output directory path
pub fn validate_directory(path: &Path) -> Result<(), ValidationError> {
    if path.as_os_str().is_empty() {
        return Err(ValidationError::new("empty_directory"));
    }

    let invalid_chars = ['<', '>', '"', '|', '?', '*'];
    if path.to_string_lossy().chars().any(|c| invalid_chars.contains(&c)) {
        return Err(ValidationError::new("invalid_directory_characters"));
    }

    Ok(())
}

/// Validate the logging section
pub fn validate_logging(logging: &LoggingConfig) -> Result<(), ValidationError> {
    match logging.level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => {
            return Err(ValidationError::new("invalid_log_level")
                .with_message("Log level must be one of: trace, debug, info, warn, error".into()))
        }
    }

    if logging
        .file
        .as_ref()
        .is_some_and(|file| file.file_name().is_none())
    {
        return Err(ValidationError::new("invalid_log_file"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_hex_color() {
        assert!(validate_hex_color("#FFFFFF").is_ok());
        assert!(validate_hex_color("#1f77b4").is_ok());
        assert!(validate_hex_color("FFFFFF").is_err());
        assert!(validate_hex_color("#FFF").is_err());
        assert!(validate_hex_color("#GGGGGG").is_err());
    }

    #[test]
    fn test_locale() {
        assert!(validate_locale("pt-BR").is_ok());
        assert!(validate_locale("en-US").is_ok());
        assert!(validate_locale("fr-FR").is_err());
        assert!(validate_locale("").is_err());
    }

    #[test]
    fn test_delimiter() {
        assert!(validate_delimiter(&';').is_ok());
        assert!(validate_delimiter(&'\t').is_ok());
        assert!(validate_delimiter(&'x').is_err());
    }

    #[test]
    fn test_directory() {
        assert!(validate_directory(Path::new("out/charts")).is_ok());
        assert!(validate_directory(Path::new("")).is_err());
        assert!(validate_directory(Path::new("out?")).is_err());
    }

    #[test]
    fn test_logging() {
        let mut logging = LoggingConfig::default();
        assert!(validate_logging(&logging).is_ok());

        logging.level = "verbose".to_string();
        assert!(validate_logging(&logging).is_err());

        logging.level = "debug".to_string();
        logging.file = Some(PathBuf::from("logs/.."));
        assert!(validate_logging(&logging).is_err());
    }
}
