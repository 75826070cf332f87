//! Localized chart text

use salesdash_common::ChartKind;
use salesdash_data::YearMonth;
use salesdash_i18n::{fluent_args, Localizer};

/// Titles, axis names and legend entries in the active locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartLabels {
    pub monthly_title: String,
    pub growth_title: String,
    pub combined_title: String,
    pub no_data: String,
    pub axis_month: String,
    /// Y axis of the monthly sales chart
    pub axis_total_sold: String,
    /// Left axis of the combined chart
    pub axis_total_sales: String,
    pub axis_growth: String,
    pub legend_sales: String,
    pub legend_growth: String,
    month_abbrevs: Vec<String>,
}

impl ChartLabels {
    /// Resolve every label; amounts are tagged with `currency_symbol`
    pub fn new(localizer: &Localizer, currency_symbol: &str) -> Self {
        let symbol = fluent_args!["symbol" => currency_symbol.to_string()];
        Self {
            monthly_title: localizer.message("chart-monthly-title"),
            growth_title: localizer.message("chart-growth-title"),
            combined_title: localizer.message("chart-combined-title"),
            no_data: localizer.message("chart-no-data"),
            axis_month: localizer.message("axis-month"),
            axis_total_sold: localizer.message_with("axis-total-sold", &symbol),
            axis_total_sales: localizer.message_with("axis-total-sales", &symbol),
            axis_growth: localizer.message("axis-growth"),
            legend_sales: localizer.message_with("legend-sales", &symbol),
            legend_growth: localizer.message("legend-growth"),
            month_abbrevs: (1..=12).map(|m| localizer.month_abbrev(m)).collect(),
        }
    }

    /// Caption of `kind`
    pub fn title(&self, kind: ChartKind) -> &str {
        match kind {
            ChartKind::MonthlySales => &self.monthly_title,
            ChartKind::Growth => &self.growth_title,
            ChartKind::Combined => &self.combined_title,
        }
    }

    /// Tick label of a month, e.g. `jan/2024`
    pub fn month(&self, month: YearMonth) -> String {
        let abbrev = month
            .month
            .checked_sub(1)
            .and_then(|i| self.month_abbrevs.get(i as usize));
        match abbrev {
            Some(abbrev) => format!("{abbrev}/{}", month.year),
            None => month.to_string(),
        }
    }
}
