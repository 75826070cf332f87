//! Line chart of monthly totals

use crate::renderer::{draw_empty, month_axis, month_ticks, slot, style_grid, tick_text};
use crate::theme::padded_range;
use crate::{ChartLabels, ChartRenderer, ChartTheme};
use plotters::coord::Shift;
use plotters::prelude::*;
use salesdash_common::{ChartKind, Result};
use salesdash_data::MonthlyAggregate;

/// Monthly totals joined by a line, one marker per month.
#[derive(Debug, Default, Clone, Copy)]
pub struct MonthlySalesChart;

impl ChartRenderer for MonthlySalesChart {
    fn kind(&self) -> ChartKind {
        ChartKind::MonthlySales
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
        if months.is_empty() {
            return draw_empty(root, title, &labels.no_data, theme);
        }

        let ticks = month_ticks(months, labels);
        let mut chart = ChartBuilder::on(root)
            .caption(title, theme.title_font())
            .margin(20)
            .x_label_area_size(60)
            .y_label_area_size(100)
            .build_cartesian_2d(
                month_axis(months.len()),
                padded_range(months.iter().map(|m| m.total_sales)),
            )?;

        let format_month = |v: &SegmentValue<u32>| tick_text(&ticks, v);
        let mut mesh = chart.configure_mesh();
        mesh.x_desc(labels.axis_month.as_str())
            .y_desc(labels.axis_total_sold.as_str())
            .x_labels(months.len())
            .x_label_formatter(&format_month)
            .label_style(theme.label_font())
            .axis_desc_style(theme.label_font());
        style_grid(&mut mesh, theme);
        mesh.draw()?;

        let points: Vec<(SegmentValue<u32>, f64)> = months
            .iter()
            .enumerate()
            .map(|(i, m)| (SegmentValue::CenterOf(slot(i)), m.total_sales))
            .collect();

        chart.draw_series(LineSeries::new(points.clone(), theme.line.stroke_width(2)))?;
        chart.draw_series(
            points
                .iter()
                .map(|p| Circle::new(p.clone(), 5, theme.line.filled())),
        )?;
        Ok(())
    }
}
