//! Number formatting and string helpers shared by the view and the charts.

/// Separators used when writing numbers for a locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberFormat {
    /// Decimal separator
    pub decimal: char,
    /// Thousands separator
    pub thousands: char,
}

impl NumberFormat {
    /// `1.234,56`
    pub const BRAZILIAN: Self = Self {
        decimal: ',',
        thousands: '.',
    };

    /// `1,234.56`
    pub const ENGLISH: Self = Self {
        decimal: '.',
        thousands: ',',
    };
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self::BRAZILIAN
    }
}

/// Formats `value` with a fixed number of decimals and grouped thousands.
#[must_use]
pub fn format_number(value: f64, decimals: usize, format: NumberFormat) -> String {
    let fixed = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(format.thousands);
        }
        grouped.push(digit);
    }

    // "-0,00" reads as noise
    let negative = value.is_sign_negative() && fixed.chars().any(|c| c.is_ascii_digit() && c != '0');
    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if !frac_part.is_empty() {
        out.push(format.decimal);
        out.push_str(frac_part);
    }
    out
}

/// Formats a monetary amount as `R$ 1.234,56`.
#[must_use]
pub fn format_currency(value: f64, symbol: &str, format: NumberFormat) -> String {
    let number = format_number(value, 2, format);
    match number.strip_prefix('-') {
        Some(abs) => format!("-{symbol} {abs}"),
        None => format!("{symbol} {number}"),
    }
}

/// Formats a percentage with two decimals, e.g. `-25,00%`.
#[must_use]
pub fn format_percent(value: f64, format: NumberFormat) -> String {
    format!("{}%", format_number(value, 2, format))
}

/// Truncates a string to a maximum number of characters with ellipsis.
#[must_use]
pub fn truncate_string(input: &str, max_chars: usize) -> String {
    if input.chars().count() <= max_chars {
        input.to_string()
    } else {
        let kept: String = input.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number_grouping() {
        assert_eq!(format_number(0.0, 2, NumberFormat::BRAZILIAN), "0,00");
        assert_eq!(format_number(999.5, 2, NumberFormat::BRAZILIAN), "999,50");
        assert_eq!(format_number(1234.561, 2, NumberFormat::BRAZILIAN), "1.234,56");
        assert_eq!(
            format_number(1_234_567.0, 2, NumberFormat::ENGLISH),
            "1,234,567.00"
        );
        assert_eq!(format_number(-0.001, 2, NumberFormat::ENGLISH), "0.00");
        assert_eq!(format_number(12345.0, 0, NumberFormat::BRAZILIAN), "12.345");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(325.0, "R$", NumberFormat::BRAZILIAN), "R$ 325,00");
        assert_eq!(
            format_currency(1234.56, "R$", NumberFormat::ENGLISH),
            "R$ 1,234.56"
        );
        assert_eq!(format_currency(-50.0, "R$", NumberFormat::BRAZILIAN), "-R$ 50,00");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(-25.0, NumberFormat::BRAZILIAN), "-25,00%");
        assert_eq!(format_percent(50.0, NumberFormat::ENGLISH), "50.00%");
    }

    #[test]
    fn test_truncate_string() {
        let input = "This is a very long string that should be truncated";
        assert_eq!(truncate_string(input, 20), "This is a very lo...");
        assert_eq!(truncate_string("Short", 20), "Short");
        assert_eq!(truncate_string("Café com pão", 8), "Café ...");
    }
}
