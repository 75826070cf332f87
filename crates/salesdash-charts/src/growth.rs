//! Bar chart of month-over-month growth

use crate::renderer::{draw_empty, month_axis, month_ticks, slot, style_grid, tick_text};
use crate::theme::padded_range;
use crate::{ChartLabels, ChartRenderer, ChartTheme};
use plotters::coord::Shift;
use plotters::prelude::*;
use salesdash_common::{ChartKind, Result};
use salesdash_data::MonthlyAggregate;

/// Growth bars colored by sign over a dashed zero line.
///
/// The first month has nothing to grow from and gets no slot. Months whose
/// growth is undefined keep their slot without a bar.
#[derive(Debug, Default, Clone, Copy)]
pub struct GrowthChart;

impl ChartRenderer for GrowthChart {
    fn kind(&self) -> ChartKind {
        ChartKind::Growth
    }

    fn draw<DB>(
        &self,
        root: &DrawingArea<DB, Shift>,
        months: &[MonthlyAggregate],
        theme: &ChartTheme,
        labels: &ChartLabels,
    ) -> Result<()>
    where
        DB: DrawingBackend,
        DB::ErrorType: 'static,
    {
        let title = labels.title(self.kind());
        let Some((_, slots)) = months.split_first().filter(|(_, rest)| !rest.is_empty()) else {
            return draw_empty(root, title, &labels.no_data, theme);
        };

        let bars: Vec<(u32, f64)> = slots
            .iter()
            .enumerate()
            .filter_map(|(i, m)| m.growth.percent().map(|pct| (slot(i), pct)))
            .collect();

        let ticks = month_ticks(slots, labels);
        let mut chart = ChartBuilder::on(root)
            .caption(title, theme.title_font())
            .margin(20)
            .x_label_area_size(60)
            .y_label_area_size(80)
            .build_cartesian_2d(
                month_axis(slots.len()),
                padded_range(bars.iter().map(|&(_, pct)| pct)),
            )?;

        let format_month = |v: &SegmentValue<u32>| tick_text(&ticks, v);
        let mut mesh = chart.configure_mesh();
        mesh.x_desc(labels.axis_month.as_str())
            .y_desc(labels.axis_growth.as_str())
            .x_labels(slots.len())
            .x_label_formatter(&format_month)
            .label_style(theme.label_font())
            .axis_desc_style(theme.label_font());
        style_grid(&mut mesh, theme);
        mesh.draw()?;

        chart.draw_series(
            Histogram::vertical(&chart)
                .style_func(|_, pct: &f64| theme.growth_color(*pct).filled())
                .margin(10)
                .data(bars.iter().copied()),
        )?;

        chart.draw_series(DashedLineSeries::new(
            vec![(SegmentValue::Exact(0), 0.0), (SegmentValue::Last, 0.0)],
            8,
            6,
            BLACK.mix(0.5).stroke_width(1),
        ))?;
        Ok(())
    }
}
