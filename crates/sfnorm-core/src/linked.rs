//! Repair of response tables whose relationship columns differ by dialect.
//!
//! SOAP serializes a null related record as an empty element named after the
//! related entity, which flattens into a marker column such as `sf:Account`
//! next to real fields such as `sf:Account.Name`. REST omits it.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use polars::prelude::{Column, DataFrame};
use regex::Regex;
use tracing::debug;

use sfnorm_model::{Dialect, NormalizeError, Result};

/// `prefix:Entity.Field`, with nested fields allowed after the first dot.
static RELATIONSHIP_FIELD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([^:.]+):([^:.]+)\.(.+)$").expect("Invalid relationship field regex")
});

/// Marker column names (`prefix:Entity`) implied by relationship fields in
/// `names`, whether or not those markers are present.
pub fn relationship_markers<'a>(names: impl IntoIterator<Item = &'a str>) -> BTreeSet<String> {
    names
        .into_iter()
        .filter_map(|name| RELATIONSHIP_FIELD.captures(name))
        .map(|caps| format!("{}:{}", &caps[1], &caps[2]))
        .collect()
}

/// Remove null-relationship artifacts from a parsed response table.
///
/// # Errors
///
/// Returns [`NormalizeError::UnsupportedDialect`] for dialects other than
/// REST and SOAP.
pub fn repair(table: DataFrame, dialect: Dialect) -> Result<DataFrame> {
    match dialect {
        Dialect::Rest => Ok(table),
        Dialect::Soap => drop_relationship_markers(table),
        other => Err(NormalizeError::unsupported_dialect(
            other,
            "linked column repair",
        )),
    }
}

/// Like [`repair`], for a raw dialect tag.
pub fn repair_for(table: DataFrame, dialect: &str) -> Result<DataFrame> {
    let dialect = dialect.parse::<Dialect>().map_err(|_| {
        NormalizeError::unsupported_dialect(dialect, "linked column repair")
    })?;
    repair(table, dialect)
}

fn drop_relationship_markers(table: DataFrame) -> Result<DataFrame> {
    let markers =
        relationship_markers(table.get_columns().iter().map(|column| column.name().as_str()));
    let is_marker = |column: &Column| markers.contains(column.name().as_str());
    if !table.get_columns().iter().any(is_marker) {
        return Ok(table);
    }

    let (dropped, kept): (Vec<Column>, Vec<Column>) =
        table.get_columns().iter().cloned().partition(is_marker);
    debug!(
        columns = ?dropped.iter().map(|c| c.name().as_str()).collect::<Vec<_>>(),
        "dropped null relationship columns"
    );
    Ok(DataFrame::new(kept)?)
}
