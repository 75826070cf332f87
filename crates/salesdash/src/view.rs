//! Everything one pipeline run shows the user

use chrono::NaiveDate;
use salesdash_charts::RenderedChart;
use salesdash_common::{format_currency, format_number, format_percent, truncate_string, ChartKind};
use salesdash_data::{MetricsReport, SaleRecord, Selection, SummaryMetrics};
use salesdash_i18n::{fluent_args, Locale, Localizer};
use std::fmt;
use std::sync::Arc;

const PRODUCT_WIDTH: usize = 32;

/// A labelled headline figure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricCard {
    pub label: String,
    pub value: String,
}

/// The three headline figures, already formatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryCards {
    pub total: MetricCard,
    pub average: MetricCard,
    pub growth: MetricCard,
}

impl SummaryCards {
    /// Format `summary` for `localizer`'s locale; absent figures read "n/d"
    pub fn new(summary: &SummaryMetrics, localizer: &Localizer, currency_symbol: &str) -> Self {
        let format = localizer.number_format();
        let unavailable = || localizer.message("value-unavailable");
        let card = |id: &str, value: String| MetricCard {
            label: localizer.message(id),
            value,
        };

        Self {
            total: card(
                "metric-total",
                format_currency(summary.grand_total, currency_symbol, format),
            ),
            average: card(
                "metric-average",
                summary
                    .monthly_average
                    .map_or_else(unavailable, |v| format_currency(v, currency_symbol, format)),
            ),
            growth: card(
                "metric-growth",
                summary
                    .overall_growth_pct
                    .map_or_else(unavailable, |v| format_percent(v, format)),
            ),
        }
    }

    /// Cards in display order
    pub fn iter(&self) -> impl Iterator<Item = &MetricCard> {
        [&self.total, &self.average, &self.growth].into_iter()
    }
}

/// First rows of the filtered data, as text cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewTable {
    pub title: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl PreviewTable {
    pub fn new<'a>(records: impl IntoIterator<Item = &'a SaleRecord>, localizer: &Localizer) -> Self {
        let format = localizer.number_format();
        let headers = [
            "column-date",
            "column-product",
            "column-total",
            "column-year",
            "column-month",
            "column-weekday",
        ]
        .iter()
        .map(|id| localizer.message(id))
        .collect();

        let rows = records
            .into_iter()
            .map(|r| {
                vec![
                    r.date.format("%Y-%m-%d").to_string(),
                    truncate_string(&r.product, PRODUCT_WIDTH),
                    format_number(r.total_sale, 2, format),
                    r.year.to_string(),
                    r.month_number.to_string(),
                    r.weekday_name.clone(),
                ]
            })
            .collect();

        Self {
            title: localizer.message("preview-title"),
            headers,
            rows,
        }
    }

    fn column_widths(&self) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .map(|(i, header)| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(i))
                    .chain(std::iter::once(header))
                    .map(|cell| cell.chars().count())
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }
}

impl fmt::Display for PreviewTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths = self.column_widths();
        writeln!(f, "{}", self.title)?;
        write_row(f, &self.headers, &widths)?;
        let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
        writeln!(f, "|-{}-|", rule.join("-|-"))?;
        for row in &self.rows {
            write_row(f, row, &widths)?;
        }
        Ok(())
    }
}

fn write_row(f: &mut fmt::Formatter<'_>, cells: &[String], widths: &[usize]) -> fmt::Result {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &w)| format!("{cell:<w$}"))
        .collect();
    writeln!(f, "| {} |", padded.join(" | "))
}

/// Result of one successful run: summary, preview and charts.
#[derive(Debug, Clone)]
pub struct DashboardView {
    pub title: String,
    /// "N registros carregados com sucesso!"
    pub banner: String,
    pub record_count: usize,
    pub selection: Selection,
    pub filter_summary: String,
    /// Set when the filters leave nothing to show
    pub empty_notice: Option<String>,
    pub cards: SummaryCards,
    pub preview: PreviewTable,
    pub report: Arc<MetricsReport>,
    pub charts: Vec<RenderedChart>,
}

impl DashboardView {
    /// Chart of the given kind, if rendered
    pub fn chart(&self, kind: ChartKind) -> Option<&RenderedChart> {
        self.charts.iter().find(|c| c.kind == kind)
    }
}

impl fmt::Display for DashboardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "{}", self.banner)?;
        writeln!(f, "{}", self.filter_summary)?;
        if let Some(notice) = &self.empty_notice {
            writeln!(f, "{notice}")?;
        }
        writeln!(f)?;
        write!(f, "{}", self.preview)?;
        writeln!(f)?;
        for card in self.cards.iter() {
            writeln!(f, "{}: {}", card.label, card.value)?;
        }
        Ok(())
    }
}

/// "Produtos: A, B | Período: 01/01/2024 a 31/03/2024"
pub fn filter_summary(selection: &Selection, localizer: &Localizer) -> String {
    let date = |d: NaiveDate| {
        if d == NaiveDate::MIN || d == NaiveDate::MAX {
            localizer.message("value-unavailable")
        } else {
            d.format(date_pattern(localizer.locale())).to_string()
        }
    };
    let products = if selection.products.is_empty() {
        localizer.message("value-unavailable")
    } else {
        selection.products.iter().cloned().collect::<Vec<_>>().join(", ")
    };

    localizer.message_with(
        "filter-summary",
        &fluent_args![
            "products" => products,
            "start" => date(selection.start),
            "end" => date(selection.end),
        ],
    )
}

const fn date_pattern(locale: Locale) -> &'static str {
    match locale {
        Locale::PortugueseBrazil => "%d/%m/%Y",
        Locale::English => "%Y-%m-%d",
    }
}
