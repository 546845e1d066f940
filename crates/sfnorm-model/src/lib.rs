//! Shared vocabulary for the sforce-normalize workspace.
//!
//! Holds the closed tags every component dispatches on ([`Dialect`],
//! [`Operation`]) and the error taxonomy ([`NormalizeError`]).

pub mod dialect;
pub mod error;
pub mod operation;

pub use dialect::Dialect;
pub use error::{NormalizeError, Result};
pub use operation::Operation;
