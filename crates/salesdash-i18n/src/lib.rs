//! Localization for the sales dashboard.
//!
//! Messages live in Fluent resources embedded at compile time, one per
//! supported locale. Brazilian Portuguese is the default.
//!
//! # Example
//!
//! ```rust
//! use salesdash_i18n::{fluent_args, Locale, Localizer};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let localizer = Localizer::new(Locale::PortugueseBrazil)?;
//! let banner = localizer.message_with("upload-success", &fluent_args!["count" => 3]);
//! assert_eq!(banner, "3 registros carregados com sucesso!");
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod locale;
pub mod localizer;

pub use error::{I18nError, I18nResult};
pub use locale::Locale;
pub use localizer::{Localizer, MESSAGE_IDS};

// Re-export commonly used Fluent types
pub use fluent_bundle::{FluentArgs, FluentValue};

/// Build [`FluentArgs`] from `key => value` pairs
#[macro_export]
macro_rules! fluent_args {
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut args = $crate::FluentArgs::new();
        $(
            args.set($key, $value);
        )+
        args
    }};
}
