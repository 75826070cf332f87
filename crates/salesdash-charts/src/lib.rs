//! # Salesdash Charts
//!
//! Draws the monthly sales line chart, the growth bar chart and the combined
//! dual-axis chart with plotters, and encodes each one as PNG in memory.
//!
//! Styling is passed in as a [`ChartTheme`]; no renderer reads global state.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod combined;
pub mod export;
pub mod growth;
pub mod labels;
pub mod manager;
pub mod monthly_sales;
pub mod renderer;
pub mod theme;

pub use combined::CombinedChart;
pub use export::{encode_png, RenderedChart};
pub use growth::GrowthChart;
pub use labels::ChartLabels;
pub use manager::ChartManager;
pub use monthly_sales::MonthlySalesChart;
pub use renderer::ChartRenderer;
pub use theme::{parse_color, ChartTheme};
