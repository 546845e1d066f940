//! Normalization core for a record-oriented remote service.
//!
//! Sits between loosely-typed caller data and the service's wire dialects
//! (REST, SOAP, Bulk 1.0, Bulk 2.0, Metadata).
//!
//! # Overview
//!
//! - **Input coercion**: turn scalars, sequences, mappings or frames into one
//!   canonical record table ([`coerce`]).
//! - **Identifier resolution**: rename the column an operation addresses
//!   records by and reject requests that cannot be addressed ([`resolve`]).
//! - **Header negotiation**: merge caller overrides onto the documented
//!   defaults of every header valid for a dialect ([`HeaderRegistry`]).
//! - **Linked column repair**: drop the empty relationship columns SOAP emits
//!   for null related records ([`repair`]).
//!
//! # Example
//!
//! ```ignore
//! use serde_json::json;
//! use sfnorm_core::{prepare, CoerceOptions};
//! use sfnorm_model::Operation;
//!
//! let table = prepare(json!(["001A", "001B"]), &Operation::Delete, &CoerceOptions::default())?;
//! assert_eq!(table.get_column_index("Id"), Some(0));
//! ```
//!
//! All functions are synchronous and free of I/O. The only shared state is
//! the read-only header catalog.

mod headers;
mod identifier;
mod input;
mod linked;
mod pipeline;

pub use headers::{
    HeaderBundle, HeaderEntry, HeaderFields, HeaderOverrides, HeaderRegistry, headers,
};
pub use identifier::{ColumnMatch, ID_COLUMN, RENAME_RULES, RenameRule, resolve};
pub use input::{CoerceOptions, DEFAULT_VALUE_COLUMN, Input, coerce, coerce_with};
pub use linked::{relationship_markers, repair, repair_for};
pub use pipeline::prepare;
