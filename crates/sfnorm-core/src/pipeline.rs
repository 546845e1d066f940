//! Request-side normalization: coercion followed by identifier resolution.

use polars::prelude::DataFrame;
use tracing::{debug, info_span};

use sfnorm_model::{Operation, Result};

use crate::identifier::resolve;
use crate::input::{CoerceOptions, Input, coerce_with};

/// Coerce `input` and resolve its identifier column for `operation`.
///
/// Fails before any request could be built when the input cannot be coerced
/// or the operation's identifier is missing.
pub fn prepare(
    input: impl Into<Input>,
    operation: &Operation,
    options: &CoerceOptions,
) -> Result<DataFrame> {
    let span = info_span!("prepare", operation = %operation);
    let _guard = span.enter();
    let table = coerce_with(input, options).map_err(|e| e.for_operation(operation))?;
    let table = resolve(table, operation)?;
    debug!(
        rows = table.height(),
        columns = table.width(),
        "record table ready"
    );
    Ok(table)
}
