//! Writes exported charts to disk

use salesdash_charts::RenderedChart;
use salesdash_common::{ChartKind, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// Write every chart into `directory` under its download name.
///
/// The directory is created when missing; existing files are replaced.
#[instrument(skip(charts), fields(charts = charts.len()))]
pub fn save_charts(charts: &[RenderedChart], directory: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(directory)?;
    charts
        .iter()
        .map(|chart| {
            let path = directory.join(chart.file_name());
            fs::write(&path, chart.bytes())?;
            debug!(path = %path.display(), bytes = chart.bytes().len(), "Chart written");
            Ok(path)
        })
        .collect()
}

/// Message id of the download button label for `kind`
pub const fn download_label_id(kind: ChartKind) -> &'static str {
    match kind {
        ChartKind::MonthlySales => "download-monthly",
        ChartKind::Growth => "download-growth",
        ChartKind::Combined => "download-combined",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use salesdash_common::test_utils::create_temp_dir;

    #[test]
    fn test_save_creates_directory() {
        let temp = create_temp_dir();
        let target = temp.path().join("nested").join("charts");
        let charts = vec![RenderedChart {
            kind: ChartKind::Growth,
            width: 1,
            height: 1,
            png: vec![1, 2, 3],
        }];

        let paths = save_charts(&charts, &target).unwrap();

        assert_eq!(paths, vec![target.join("grafico_crescimento_percentual.png")]);
        assert_eq!(fs::read(&paths[0]).unwrap(), vec![1, 2, 3]);
    }
}
