//! CSV parsing into sale records

use crate::{Dataset, SaleRecord};
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Weekday};
use salesdash_common::{ContentDigest, DashError, Result};
use salesdash_i18n::Localizer;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Date column header
pub const DATE_COLUMN: &str = "Data";
/// Product column header
pub const PRODUCT_COLUMN: &str = "Produto";
/// Amount column header
pub const TOTAL_COLUMN: &str = "Venda_Total";

const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
];

/// How to read the input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoaderOptions {
    /// Field delimiter; sniffed from the header line when `None`
    pub delimiter: Option<char>,
    /// Read ambiguous slash dates as day/month/year
    pub day_first: bool,
}

/// Parses uploads into [`Dataset`]s.
#[derive(Debug, Clone)]
pub struct RecordLoader {
    options: LoaderOptions,
    localizer: Arc<Localizer>,
}

struct Columns {
    date: usize,
    product: usize,
    total: usize,
}

impl RecordLoader {
    /// Create a loader; weekday names come from `localizer`
    #[must_use]
    pub const fn new(options: LoaderOptions, localizer: Arc<Localizer>) -> Self {
        Self { options, localizer }
    }

    /// Parse the raw bytes of one upload.
    ///
    /// A header-only file yields an empty dataset. Every parse error names the
    /// 1-based data row and the column when they are known.
    #[instrument(skip(self, bytes), fields(bytes = bytes.len()))]
    pub fn load(&self, bytes: &[u8]) -> Result<Dataset> {
        let digest = ContentDigest::of(bytes);
        let delimiter = match self.options.delimiter {
            Some(c) => delimiter_byte(c)?,
            None => sniff_delimiter(bytes),
        };
        debug!(delimiter = %char::from(delimiter), digest = %digest.short(), "Reading sales file");

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .trim(csv::Trim::All)
            .from_reader(bytes);

        let columns = resolve_columns(reader.headers()?)?;
        let weekday_names: Vec<String> = WEEK
            .iter()
            .map(|&day| self.localizer.weekday_name(day))
            .collect();

        let mut records = Vec::new();
        for (index, row) in reader.records().enumerate() {
            let row_number = index + 1;
            let row = row?;
            let field = |i: usize| row.get(i).unwrap_or_default();

            let raw_date = field(columns.date);
            let date = parse_date(raw_date, self.options.day_first).ok_or_else(|| {
                DashError::parse_at(format!("invalid date '{raw_date}'"), row_number, DATE_COLUMN)
            })?;

            let product = field(columns.product);
            if product.is_empty() {
                return Err(DashError::parse_at(
                    "product must not be empty",
                    row_number,
                    PRODUCT_COLUMN,
                ));
            }

            let total_sale = parse_amount(field(columns.total))
                .map_err(|message| DashError::parse_at(message, row_number, TOTAL_COLUMN))?;

            let weekday = weekday_names[date.weekday().num_days_from_monday() as usize].clone();
            records.push(SaleRecord::new(date, product, total_sale, weekday));
        }

        info!(records = records.len(), digest = %digest.short(), "Loaded sales records");
        Ok(Dataset::new(digest, records))
    }
}

fn resolve_columns(headers: &csv::StringRecord) -> Result<Columns> {
    let position = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim_start_matches('\u{feff}').trim() == name)
            .ok_or_else(|| DashError::parse_column("required column is missing", name))
    };

    Ok(Columns {
        date: position(DATE_COLUMN)?,
        product: position(PRODUCT_COLUMN)?,
        total: position(TOTAL_COLUMN)?,
    })
}

fn delimiter_byte(c: char) -> Result<u8> {
    u8::try_from(c)
        .ok()
        .filter(u8::is_ascii)
        .ok_or_else(|| DashError::validation_field(format!("delimiter '{c}' is not ASCII"), "delimiter"))
}

/// Guess the delimiter from the header line: `;` when it has semicolons but
/// no commas, otherwise `,`.
#[must_use]
pub fn sniff_delimiter(bytes: &[u8]) -> u8 {
    let header = bytes.split(|&b| b == b'\n').next().unwrap_or_default();
    let has = |needle: u8| header.contains(&needle);
    if has(b';') && !has(b',') {
        b';'
    } else {
        b','
    }
}

/// Parse a date cell.
///
/// Accepts ISO dates, ISO date-times, RFC 3339 and slash dates. Slash dates
/// are month-first unless `day_first`; when the preferred order is not a valid
/// date the other order is tried.
#[must_use]
pub fn parse_date(raw: &str, day_first: bool) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return Some(date);
        }
    }
    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(datetime.date());
        }
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(raw) {
        return Some(datetime.date_naive());
    }

    let (preferred, fallback) = if day_first {
        ("%d/%m/%Y", "%m/%d/%Y")
    } else {
        ("%m/%d/%Y", "%d/%m/%Y")
    };
    NaiveDate::parse_from_str(raw, preferred)
        .or_else(|_| NaiveDate::parse_from_str(raw, fallback))
        .ok()
}

/// Parse an amount cell, tolerating currency formatting such as `R$ 1.234,56`.
pub fn parse_amount(raw: &str) -> std::result::Result<f64, String> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, ',' | '.' | '-'))
        .collect();

    if cleaned.is_empty() || !cleaned.chars().any(|c| c.is_ascii_digit()) {
        return Err(format!("invalid amount '{raw}'"));
    }
    if cleaned.contains('-') {
        return Err(format!("amount must not be negative: '{raw}'"));
    }

    let normalized = normalize_separators(&cleaned);
    let value: f64 = normalized
        .parse()
        .map_err(|_| format!("invalid amount '{raw}'"))?;

    if value.is_finite() {
        Ok(value)
    } else {
        Err(format!("amount out of range: '{raw}'"))
    }
}

fn normalize_separators(digits: &str) -> String {
    let last_comma = digits.rfind(',');
    let last_dot = digits.rfind('.');

    match (last_comma, last_dot) {
        (Some(comma), Some(dot)) => {
            let (decimal, thousands) = if comma > dot { (',', '.') } else { ('.', ',') };
            digits
                .chars()
                .filter(|&c| c != thousands)
                .map(|c| if c == decimal { '.' } else { c })
                .collect()
        }
        (Some(_), None) => normalize_single(digits, ','),
        // a lone dot is always the decimal point
        (None, Some(_)) if digits.matches('.').count() == 1 => digits.to_string(),
        (None, Some(_)) => normalize_single(digits, '.'),
        (None, None) => digits.to_string(),
    }
}

fn normalize_single(digits: &str, separator: char) -> String {
    let groups: Vec<&str> = digits.split(separator).collect();
    let (head, tail) = groups.split_first().map_or(("", &[][..]), |(h, t)| (*h, t));

    let grouped = !head.is_empty()
        && head.len() <= 3
        && !head.starts_with('0')
        && tail.iter().all(|g| g.len() == 3);

    if grouped {
        groups.concat()
    } else {
        digits.replace(separator, ".")
    }
}
