//! Shared utilities for sforce-normalize crates.
//!
//! This crate provides common utilities used across the workspace,
//! including Polars DataFrame helpers.

pub mod polars;

// Re-export commonly used functions at crate root for convenience
pub use polars::{any_to_string, cell_string, column_names, format_numeric};
