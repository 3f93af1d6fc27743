//! Shared utilities for the energy simulation warehouse crates.
//!
//! This crate provides helpers used across the workspace:
//!
//! - **polars**: `AnyValue` conversions to strings, numbers and timestamps
//! - **timestamp**: parsing textual timestamps and encoding them as
//!   polars Datetime columns

pub mod polars;
pub mod timestamp;

pub use polars::{any_to_datetime, any_to_f64, any_to_i64, any_to_string, format_numeric, parse_f64};
pub use timestamp::{datetime_column, parse_timestamp};
