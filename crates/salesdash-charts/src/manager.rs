//! Renders the three dashboard charts together

use crate::{
    ChartLabels, ChartRenderer, ChartTheme, CombinedChart, GrowthChart, MonthlySalesChart,
    RenderedChart,
};
use salesdash_common::{ChartKind, Result};
use salesdash_config::ChartsConfig;
use salesdash_data::MonthlyAggregate;
use salesdash_i18n::Localizer;
use tracing::{info, instrument};

/// Owns the style and labels and renders every chart with them.
#[derive(Debug, Clone)]
pub struct ChartManager {
    theme: ChartTheme,
    labels: ChartLabels,
}

impl ChartManager {
    /// Create a manager from resolved style and labels
    pub const fn new(theme: ChartTheme, labels: ChartLabels) -> Self {
        Self { theme, labels }
    }

    /// Resolve style from `config` and labels from `localizer`
    pub fn from_config(
        config: &ChartsConfig,
        localizer: &Localizer,
        currency_symbol: &str,
    ) -> Result<Self> {
        Ok(Self::new(
            ChartTheme::from_config(config)?,
            ChartLabels::new(localizer, currency_symbol),
        ))
    }

    /// Colors and fonts every chart is drawn with
    pub const fn theme(&self) -> &ChartTheme {
        &self.theme
    }

    /// Localized titles and axis labels
    pub const fn labels(&self) -> &ChartLabels {
        &self.labels
    }

    /// Render one chart
    pub fn render(&self, kind: ChartKind, months: &[MonthlyAggregate]) -> Result<RenderedChart> {
        match kind {
            ChartKind::MonthlySales => MonthlySalesChart.render_png(months, &self.theme, &self.labels),
            ChartKind::Growth => GrowthChart.render_png(months, &self.theme, &self.labels),
            ChartKind::Combined => CombinedChart.render_png(months, &self.theme, &self.labels),
        }
    }

    /// Render every chart in display order
    #[instrument(skip_all, fields(months = months.len()))]
    pub fn render_all(&self, months: &[MonthlyAggregate]) -> Result<Vec<RenderedChart>> {
        let charts = ChartKind::ALL
            .iter()
            .map(|&kind| self.render(kind, months))
            .collect::<Result<Vec<_>>>()?;
        info!(charts = charts.len(), "Rendered dashboard charts");
        Ok(charts)
    }
}
