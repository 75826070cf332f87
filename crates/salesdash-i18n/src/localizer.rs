//! Message lookup and formatting over a thread-safe Fluent bundle

use crate::error::{I18nError, I18nResult};
use crate::Locale;
use chrono::Weekday;
use fluent_bundle::concurrent::FluentBundle;
use fluent_bundle::{FluentArgs, FluentResource};
use salesdash_common::NumberFormat;
use std::fmt;
use tracing::{debug, warn};

/// Every message id the dashboard looks up; each bundled locale defines all of them.
pub const MESSAGE_IDS: &[&str] = &[
    "app-title",
    "upload-label",
    "upload-success",
    "processing-error",
    "value-unavailable",
    "filter-products",
    "filter-start",
    "filter-end",
    "filter-summary",
    "filter-empty",
    "preview-title",
    "column-date",
    "column-product",
    "column-total",
    "column-year",
    "column-month",
    "column-weekday",
    "metric-total",
    "metric-average",
    "metric-growth",
    "chart-monthly-title",
    "chart-growth-title",
    "chart-combined-title",
    "chart-no-data",
    "axis-month",
    "axis-total-sold",
    "axis-total-sales",
    "axis-growth",
    "legend-sales",
    "legend-growth",
    "download-monthly",
    "download-growth",
    "download-combined",
    "chart-saved",
    "watch-started",
    "watch-reloaded",
    "watch-stopped",
    "weekday-monday",
    "weekday-tuesday",
    "weekday-wednesday",
    "weekday-thursday",
    "weekday-friday",
    "weekday-saturday",
    "weekday-sunday",
    "month-1",
    "month-2",
    "month-3",
    "month-4",
    "month-5",
    "month-6",
    "month-7",
    "month-8",
    "month-9",
    "month-10",
    "month-11",
    "month-12",
];

/// Localized strings for one locale.
pub struct Localizer {
    locale: Locale,
    bundle: FluentBundle<FluentResource>,
}

impl fmt::Debug for Localizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Localizer")
            .field("locale", &self.locale)
            .field("bundle", &"FluentBundle<FluentResource>")
            .finish()
    }
}

impl Localizer {
    /// Build the bundle for `locale` from the embedded resources
    pub fn new(locale: Locale) -> I18nResult<Self> {
        let lang_id = locale.to_language_identifier()?;

        let resource = FluentResource::try_new(locale.resource().to_string()).map_err(|(_, errors)| {
            I18nError::FluentParseError {
                locale: locale.code().to_string(),
                errors: errors.iter().map(|e| format!("{e:?}")).collect(),
            }
        })?;

        let mut bundle = FluentBundle::new_concurrent(vec![lang_id]);
        // Bidi isolation marks would end up in terminal output and PNG labels
        bundle.set_use_isolating(false);
        bundle
            .add_resource(resource)
            .map_err(|errors| I18nError::FluentParseError {
                locale: locale.code().to_string(),
                errors: errors.iter().map(|e| format!("{e:?}")).collect(),
            })?;

        debug!(locale = %locale, "Loaded localization bundle");
        Ok(Self { locale, bundle })
    }

    /// The locale this localizer formats for
    #[must_use]
    pub const fn locale(&self) -> Locale {
        self.locale
    }

    /// Separators for amounts in this locale
    #[must_use]
    pub const fn number_format(&self) -> NumberFormat {
        self.locale.number_format()
    }

    /// Whether the bundle defines `id`
    #[must_use]
    pub fn has_message(&self, id: &str) -> bool {
        self.bundle.has_message(id)
    }

    /// Format a message, reporting missing ids and formatting errors
    pub fn try_message(&self, id: &str, args: Option<&FluentArgs>) -> I18nResult<String> {
        let pattern = self
            .bundle
            .get_message(id)
            .and_then(|message| message.value())
            .ok_or_else(|| I18nError::MessageNotFound { key: id.to_string() })?;

        let mut errors = Vec::new();
        let formatted = self.bundle.format_pattern(pattern, args, &mut errors);

        if !errors.is_empty() {
            return Err(I18nError::MessageFormatError {
                key: id.to_string(),
                errors: errors.iter().map(|e| format!("{e:?}")).collect(),
            });
        }

        Ok(formatted.into_owned())
    }

    /// Format a message without arguments, falling back to its id
    #[must_use]
    pub fn message(&self, id: &str) -> String {
        self.lookup(id, None)
    }

    /// Format a message with arguments, falling back to its id
    #[must_use]
    pub fn message_with(&self, id: &str, args: &FluentArgs) -> String {
        self.lookup(id, Some(args))
    }

    fn lookup(&self, id: &str, args: Option<&FluentArgs>) -> String {
        self.try_message(id, args).unwrap_or_else(|e| {
            warn!(locale = %self.locale, error = %e, "Falling back to message id");
            id.to_string()
        })
    }

    /// Full weekday name, e.g. `Segunda-feira`
    #[must_use]
    pub fn weekday_name(&self, weekday: Weekday) -> String {
        let id = match weekday {
            Weekday::Mon => "weekday-monday",
            Weekday::Tue => "weekday-tuesday",
            Weekday::Wed => "weekday-wednesday",
            Weekday::Thu => "weekday-thursday",
            Weekday::Fri => "weekday-friday",
            Weekday::Sat => "weekday-saturday",
            Weekday::Sun => "weekday-sunday",
        };
        self.message(id)
    }

    /// Abbreviated month name for `month` in 1..=12
    #[must_use]
    pub fn month_abbrev(&self, month: u32) -> String {
        self.message(&format!("month-{month}"))
    }
}
