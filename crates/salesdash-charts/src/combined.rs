//! Dual-axis chart of monthly totals and growth

use crate::renderer::{draw_empty, month_axis, month_ticks, slot, style_grid, tick_text};
use crate::theme::padded_range;
use crate::{ChartLabels, ChartRenderer, ChartTheme};
use plotters::coord::Shift;
use plotters::prelude::*;
use salesdash_common::{ChartKind, Result};
use salesdash_data::MonthlyAggregate;

/// Total bars on the left axis, growth line on the right axis.
#[derive(Debug, Default, Clone, Copy)]
pub struct CombinedChart;

impl ChartRenderer for CombinedChart {
    fn kind(&self) -> ChartKind {
        ChartKind::Combined
    }

    fn dimensions(&self, theme: &ChartTheme) -> (u32, u32) {
        (theme.width, theme.combined_height)
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

        let growth: Vec<(usize, f64)> = months
            .iter()
            .enumerate()
            .filter_map(|(i, m)| m.growth.percent().map(|pct| (i, pct)))
            .collect();

        let ticks = month_ticks(months, labels);
        let mut chart = ChartBuilder::on(root)
            .caption(title, theme.title_font())
            .margin(20)
            .x_label_area_size(60)
            .y_label_area_size(100)
            .right_y_label_area_size(80)
            .build_cartesian_2d(
                month_axis(months.len()),
                padded_range(months.iter().map(|m| m.total_sales)),
            )?;

        let format_month = |v: &SegmentValue<u32>| tick_text(&ticks, v);
        let sales_desc = TextStyle::from(theme.label_font()).color(&theme.line);
        let mut mesh = chart.configure_mesh();
        mesh.x_desc(labels.axis_month.as_str())
            .y_desc(labels.axis_total_sales.as_str())
            .x_labels(months.len())
            .x_label_formatter(&format_month)
            .label_style(theme.label_font())
            .axis_desc_style(sales_desc);
        style_grid(&mut mesh, theme);
        mesh.draw()?;

        let bar_fill = theme.bar_fill();
        chart
            .draw_series(
                Histogram::vertical(&chart)
                    .style(bar_fill.filled())
                    .margin(10)
                    .data(months.iter().enumerate().map(|(i, m)| (slot(i), m.total_sales))),
            )?
            .label(labels.legend_sales.as_str())
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 12, y + 5)], bar_fill.filled()));

        let mut chart = chart.set_secondary_coord(
            month_axis(months.len()),
            padded_range(growth.iter().map(|&(_, pct)| pct)),
        );
        let growth_desc = TextStyle::from(theme.label_font()).color(&theme.growth_line);
        chart
            .configure_secondary_axes()
            .y_desc(labels.axis_growth.as_str())
            .label_style(theme.label_font())
            .axis_desc_style(growth_desc)
            .draw()?;

        // Undefined growth breaks the line
        let line_style = theme.growth_line.stroke_width(2);
        for run in contiguous_runs(&growth) {
            chart.draw_secondary_series(LineSeries::new(run, line_style))?;
        }

        let marker = theme.growth_line.filled();
        chart
            .draw_secondary_series(
                growth
                    .iter()
                    .map(|&(i, pct)| Circle::new((SegmentValue::CenterOf(slot(i)), pct), 5, marker)),
            )?
            .label(labels.legend_growth.as_str())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 12, y)], line_style)
            });

        chart
            .configure_series_labels()
            .label_font(theme.label_font())
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK.mix(0.3))
            .position(SeriesLabelPosition::UpperLeft)
            .draw()?;
        Ok(())
    }
}

/// Split `(index, value)` pairs into runs of consecutive indexes.
fn contiguous_runs(points: &[(usize, f64)]) -> Vec<Vec<(SegmentValue<u32>, f64)>> {
    let mut runs: Vec<Vec<(SegmentValue<u32>, f64)>> = Vec::new();
    let mut previous: Option<usize> = None;
    for &(i, pct) in points {
        let point = (SegmentValue::CenterOf(slot(i)), pct);
        match (previous, runs.last_mut()) {
            (Some(p), Some(run)) if p + 1 == i => run.push(point),
            _ => runs.push(vec![point]),
        }
        previous = Some(i);
    }
    runs
}
