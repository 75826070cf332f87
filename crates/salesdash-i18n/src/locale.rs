//! Supported locales

use crate::error::{I18nError, I18nResult};
use salesdash_common::NumberFormat;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use unic_langid::LanguageIdentifier;

/// Locales with bundled translations
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Locale {
    /// Brazilian Portuguese, the dashboard's native language
    #[default]
    #[serde(rename = "pt-BR")]
    PortugueseBrazil,
    /// American English
    #[serde(rename = "en-US")]
    English,
}

impl Locale {
    /// BCP 47 tag of this locale
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::PortugueseBrazil => "pt-BR",
            Self::English => "en-US",
        }
    }

    /// Parse a locale from a language code; bare languages map to their region
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().replace('_', "-").as_str() {
            "pt" | "pt-BR" | "pt-br" => Some(Self::PortugueseBrazil),
            "en" | "en-US" | "en-us" => Some(Self::English),
            _ => None,
        }
    }

    /// Convert to a Fluent language identifier
    pub fn to_language_identifier(self) -> I18nResult<LanguageIdentifier> {
        self.code()
            .parse()
            .map_err(|_| I18nError::InvalidLanguageId(self.code().to_string()))
    }

    /// All supported locales
    #[must_use]
    pub const fn all() -> [Self; 2] {
        [Self::PortugueseBrazil, Self::English]
    }

    /// Separators used for amounts and percentages
    #[must_use]
    pub const fn number_format(self) -> NumberFormat {
        match self {
            Self::PortugueseBrazil => NumberFormat::BRAZILIAN,
            Self::English => NumberFormat::ENGLISH,
        }
    }

    /// Bundled Fluent source
    pub(crate) const fn resource(self) -> &'static str {
        match self {
            Self::PortugueseBrazil => include_str!("../locales/pt-BR/main.ftl"),
            Self::English => include_str!("../locales/en-US/main.ftl"),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = I18nError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| I18nError::UnsupportedLocale(s.to_string()))
    }
}
