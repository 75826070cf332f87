//! # Salesdash
//!
//! Sales growth dashboard for the command line.
//!
//! A [`DashboardSession`] owns one upload and its memo caches and runs the
//! pipeline Loader, Filter, Aggregator and charts, turning every failure into
//! a single localized message. [`Dashboard`] binds a session to an input file,
//! prints the view and writes the chart PNGs; [`watch()`] refreshes it on every
//! change of the input or of the configuration file.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod cli;
pub mod controls;
pub mod dashboard;
pub mod error;
pub mod output;
pub mod session;
pub mod view;
pub mod watch;

pub use cli::{Args, ConfigOverrides};
pub use controls::FilterControls;
pub use dashboard::Dashboard;
pub use error::{AppError, AppResult};
pub use session::{DashboardOutcome, DashboardSession};
pub use view::{DashboardView, MetricCard, PreviewTable, SummaryCards};
pub use watch::{watch, Changes, FileWatcher, WatchTargets};
