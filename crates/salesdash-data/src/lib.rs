//! # Salesdash Data
//!
//! Turns an uploaded sales CSV into records, narrows them by product and
//! date range, and groups what remains into monthly totals with growth
//! figures. Loaded datasets and computed reports are memoized by content
//! digest.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod cache;
pub mod filter;
pub mod loader;
pub mod metrics;
pub mod month;
pub mod record;

pub use cache::{CacheMetrics, CacheStats, MemoCache};
pub use filter::{Selection, SelectionFingerprint};
pub use loader::{LoaderOptions, RecordLoader};
pub use metrics::{Growth, MetricsAggregator, MetricsReport, MonthlyAggregate, SummaryMetrics};
pub use month::YearMonth;
pub use record::{Dataset, SaleRecord};
