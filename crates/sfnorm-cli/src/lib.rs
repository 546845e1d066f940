//! CLI library components for sforce-normalize.

pub mod config;
pub mod logging;
pub mod table_io;
