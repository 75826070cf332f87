//! Chart renderer trait and shared drawing helpers

use crate::{encode_png, ChartLabels, ChartTheme, RenderedChart};
use plotters::chart::MeshStyle;
use plotters::coord::ranged1d::SegmentedCoord;
use plotters::coord::types::RangedCoordu32;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use salesdash_common::{ChartKind, Result};
use salesdash_data::MonthlyAggregate;
use tracing::{debug, instrument};

/// Draws one of the dashboard charts from the monthly aggregates.
///
/// Implementors only describe the drawing; [`ChartRenderer::render_png`]
/// owns the pixel buffer and the encoding.
pub trait ChartRenderer {
    /// Which chart this is
    fn kind(&self) -> ChartKind;

    /// Pixel size under `theme`
    fn dimensions(&self, theme: &ChartTheme) -> (u32, u32) {
        (theme.width, theme.height)
    }

    /// Draw onto a background-filled `root`
    fn draw<DB>(
        &self,
        root: &DrawingArea<DB, Shift>,
        months: &[MonthlyAggregate],
        theme: &ChartTheme,
        labels: &ChartLabels,
    ) -> Result<()>
    where
        DB: DrawingBackend,
        DB::ErrorType: 'static;

    /// Render to PNG bytes without touching disk
    #[instrument(skip_all, fields(chart = %self.kind(), months = months.len()))]
    fn render_png(
        &self,
        months: &[MonthlyAggregate],
        theme: &ChartTheme,
        labels: &ChartLabels,
    ) -> Result<RenderedChart> {
        let (width, height) = self.dimensions(theme);
        let mut rgb = vec![0u8; width as usize * height as usize * 3];
        {
            let root = BitMapBackend::with_buffer(&mut rgb, (width, height)).into_drawing_area();
            root.fill(&theme.background)?;
            self.draw(&root, months, theme, labels)?;
            root.present()?;
        }

        let png = encode_png(&rgb, width, height)?;
        debug!(bytes = png.len(), "Rendered chart");
        Ok(RenderedChart {
            kind: self.kind(),
            width,
            height,
            png,
        })
    }
}

/// Title plus a centered notice, for selections without data.
pub(crate) fn draw_empty<DB>(
    root: &DrawingArea<DB, Shift>,
    title: &str,
    notice: &str,
    theme: &ChartTheme,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let area = root.titled(title, theme.title_font())?;
    let (w, h) = area.dim_in_pixel();
    let style = TextStyle::from(theme.label_font()).pos(Pos::new(HPos::Center, VPos::Center));
    let center = (
        i32::try_from(w / 2).unwrap_or(0),
        i32::try_from(h / 2).unwrap_or(0),
    );
    area.draw_text(notice, &style, center)?;
    Ok(())
}

/// Grid lines per theme, or none
pub(crate) fn style_grid<X, Y, DB>(mesh: &mut MeshStyle<'_, '_, X, Y, DB>, theme: &ChartTheme)
where
    X: Ranged,
    Y: Ranged,
    DB: DrawingBackend,
{
    if theme.grid {
        mesh.bold_line_style(theme.grid_color())
            .light_line_style(TRANSPARENT);
    } else {
        mesh.disable_mesh();
    }
}

/// One segment per month, indexed from zero.
pub(crate) fn month_axis(count: usize) -> SegmentedCoord<RangedCoordu32> {
    let last = u32::try_from(count.saturating_sub(1)).unwrap_or(u32::MAX);
    (0..last).into_segmented()
}

/// Segment index of the `i`th month
pub(crate) fn slot(i: usize) -> u32 {
    u32::try_from(i).unwrap_or(u32::MAX)
}

/// Tick labels of `months`, looked up by segment
pub(crate) fn month_ticks(months: &[MonthlyAggregate], labels: &ChartLabels) -> Vec<String> {
    months.iter().map(|m| labels.month(m.month)).collect()
}

/// Formatter body for a month axis
pub(crate) fn tick_text(ticks: &[String], value: &SegmentValue<u32>) -> String {
    match value {
        SegmentValue::CenterOf(i) | SegmentValue::Exact(i) => {
            ticks.get(*i as usize).cloned().unwrap_or_default()
        }
        SegmentValue::Last => String::new(),
    }
}
