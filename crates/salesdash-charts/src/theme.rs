//! Resolved chart styling

use plotters::style::{Color, RGBAColor, RGBColor, BLACK};
use salesdash_common::{DashError, Result};
use salesdash_config::ChartsConfig;
use std::ops::Range;

/// Every visual setting a renderer needs, with colors already parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartTheme {
    pub font_family: String,
    pub title_size: u32,
    pub label_size: u32,
    pub grid: bool,
    pub grid_opacity: f64,
    pub background: RGBColor,
    pub line: RGBColor,
    pub bar: RGBColor,
    pub bar_opacity: f64,
    pub positive: RGBColor,
    pub negative: RGBColor,
    pub growth_bar_opacity: f64,
    pub growth_line: RGBColor,
    /// Width of every chart
    pub width: u32,
    /// Height of the monthly sales and growth charts
    pub height: u32,
    /// Height of the combined chart
    pub combined_height: u32,
}

impl ChartTheme {
    /// Resolve the chart section of the configuration
    pub fn from_config(config: &ChartsConfig) -> Result<Self> {
        let style = &config.style;
        Ok(Self {
            font_family: style.font_family.clone(),
            title_size: style.title_size,
            label_size: style.label_size,
            grid: style.grid,
            grid_opacity: style.grid_opacity,
            background: parse_color(&style.background)?,
            line: parse_color(&style.line_color)?,
            bar: parse_color(&style.bar_color)?,
            bar_opacity: style.bar_opacity,
            positive: parse_color(&style.positive_color)?,
            negative: parse_color(&style.negative_color)?,
            growth_bar_opacity: style.growth_bar_opacity,
            growth_line: parse_color(&style.growth_line_color)?,
            width: config.width,
            height: config.height,
            combined_height: config.combined_height,
        })
    }

    /// Caption font
    pub fn title_font(&self) -> (&str, u32) {
        (self.font_family.as_str(), self.title_size)
    }

    /// Axis and legend font
    pub fn label_font(&self) -> (&str, u32) {
        (self.font_family.as_str(), self.label_size)
    }

    /// Grid line color
    pub fn grid_color(&self) -> RGBAColor {
        BLACK.mix(self.grid_opacity)
    }

    /// Fill of a growth bar, green for growth and red for decline
    pub fn growth_color(&self, pct: f64) -> RGBAColor {
        let base = if pct >= 0.0 { self.positive } else { self.negative };
        base.mix(self.growth_bar_opacity)
    }

    /// Fill of a monthly total bar
    pub fn bar_fill(&self) -> RGBAColor {
        self.bar.mix(self.bar_opacity)
    }
}

/// Parse `#rrggbb`.
pub fn parse_color(hex: &str) -> Result<RGBColor> {
    let invalid = || DashError::validation_field(format!("invalid color '{hex}'"), "color");
    let digits = hex.strip_prefix('#').filter(|d| d.len() == 6).ok_or_else(invalid)?;
    let channel = |range: Range<usize>| {
        digits
            .get(range)
            .and_then(|pair| u8::from_str_radix(pair, 16).ok())
            .ok_or_else(invalid)
    };
    Ok(RGBColor(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Axis range spanning zero and every value, with headroom.
///
/// Never returns a zero-width range.
pub(crate) fn padded_range(values: impl IntoIterator<Item = f64>) -> Range<f64> {
    let (lo, hi) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((0.0_f64, 0.0_f64), |(lo, hi), v| (lo.min(v), hi.max(v)));
    let span = hi - lo;
    if span <= f64::EPSILON {
        return lo..lo + 1.0;
    }
    let pad = span * 0.1;
    let lo = if lo < 0.0 { lo - pad } else { lo };
    let hi = if hi > 0.0 { hi + pad } else { hi };
    lo..hi
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("#1f77b4").unwrap(), RGBColor(31, 119, 180));
        assert_eq!(parse_color("#FFA500").unwrap(), RGBColor(255, 165, 0));
        assert!(parse_color("1f77b4").is_err());
        assert!(parse_color("#12345").is_err());
        assert!(parse_color("#gg0000").is_err());
        assert!(parse_color("#ééé").is_err());
    }

    #[test]
    fn test_from_default_config() {
        let theme = ChartTheme::from_config(&ChartsConfig::default()).unwrap();
        assert_eq!(theme.line, RGBColor(0, 0, 255));
        assert_eq!(theme.bar, RGBColor(135, 206, 235));
        assert_eq!(theme.positive, RGBColor(0, 128, 0));
        assert_eq!(theme.negative, RGBColor(255, 0, 0));
        assert_eq!(theme.growth_line, RGBColor(255, 165, 0));
        assert_eq!((theme.width, theme.height, theme.combined_height), (1200, 500, 600));
        assert_eq!(theme.title_font(), ("DejaVu Sans", 22));
    }

    #[test]
    fn test_growth_color_by_sign() {
        let theme = ChartTheme::from_config(&ChartsConfig::default()).unwrap();
        assert_eq!(theme.growth_color(0.0), theme.positive.mix(0.8));
        assert_eq!(theme.growth_color(-0.1), theme.negative.mix(0.8));
    }

    #[test]
    fn test_padded_range() {
        assert_eq!(padded_range([]), 0.0..1.0);
        assert_eq!(padded_range([0.0, 0.0]), 0.0..1.0);

        let range = padded_range([100.0, 150.0]);
        assert_eq!(range.start, 0.0);
        assert!((range.end - 165.0).abs() < 1e-9);

        let range = padded_range([-50.0, 50.0]);
        assert!((range.start + 60.0).abs() < 1e-9);
        assert!((range.end - 60.0).abs() < 1e-9);

        let range = padded_range([f64::NAN, 10.0]);
        assert!((range.end - 11.0).abs() < 1e-9);
    }
}
