//! # Salesdash Config
//!
//! Type-safe configuration management for the sales dashboard.
//!
//! This crate provides the YAML schema, defaults, validation, loading with
//! environment overrides, and a lock-free cache that watch mode swaps on
//! every reload.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cache;
pub mod defaults;
pub mod loader;
pub mod schema;
pub mod validation;

pub use cache::*;
pub use loader::*;
pub use schema::*;
pub use validation::*;
