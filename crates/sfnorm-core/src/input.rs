//! Coercion of caller-supplied values into a record table.
//!
//! The shape of the input is decided once, when it is converted into an
//! [`Input`]; each variant then has its own conversion.

use std::collections::BTreeSet;

use polars::prelude::{Column, DataFrame, DataType, IntoColumn, NamedFrom, Series};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use sfnorm_model::{NormalizeError, Result};

/// Name given to the single column built from unnamed input.
pub const DEFAULT_VALUE_COLUMN: &str = "value";

/// Options for input coercion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoerceOptions {
    /// Column name used for scalar and unnamed sequence input.
    pub value_column: String,
}

impl Default for CoerceOptions {
    fn default() -> Self {
        Self {
            value_column: DEFAULT_VALUE_COLUMN.to_string(),
        }
    }
}

impl CoerceOptions {
    pub fn with_value_column(mut self, name: impl Into<String>) -> Self {
        self.value_column = name.into();
        self
    }
}

/// Caller input, classified by shape.
#[derive(Debug, Clone)]
pub enum Input {
    /// Already tabular; passed through untouched.
    Table(DataFrame),
    /// Named fields of one logical record.
    Mapping(Map<String, Value>),
    /// Unnamed values, possibly nested.
    Sequence(Vec<Value>),
    /// A single bare value, `null` included.
    Scalar(Value),
}

impl From<Value> for Input {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => Self::Mapping(map),
            Value::Array(items) => Self::Sequence(items),
            other => Self::Scalar(other),
        }
    }
}

impl From<DataFrame> for Input {
    fn from(df: DataFrame) -> Self {
        Self::Table(df)
    }
}

impl From<Map<String, Value>> for Input {
    fn from(map: Map<String, Value>) -> Self {
        Self::Mapping(map)
    }
}

impl From<Vec<Value>> for Input {
    fn from(items: Vec<Value>) -> Self {
        Self::Sequence(items)
    }
}

/// Coerce `input` into a record table using default options.
pub fn coerce(input: impl Into<Input>) -> Result<DataFrame> {
    coerce_with(input, &CoerceOptions::default())
}

/// Coerce `input` into a record table.
///
/// # Errors
///
/// Returns [`NormalizeError::Coercion`] when a mapping's fields have lengths
/// that cannot be laid out as one table.
pub fn coerce_with(input: impl Into<Input>, options: &CoerceOptions) -> Result<DataFrame> {
    let df = match input.into() {
        Input::Table(df) => return Ok(df),
        Input::Mapping(map) => mapping_to_table(map)?,
        Input::Sequence(items) => sequence_to_table(items, &options.value_column)?,
        Input::Scalar(value) => {
            DataFrame::new(vec![build_column(&options.value_column, vec![value])])?
        }
    };
    debug!(
        rows = df.height(),
        columns = df.width(),
        "coerced input into record table"
    );
    Ok(df)
}

fn mapping_to_table(map: Map<String, Value>) -> Result<DataFrame> {
    let fields: Vec<(String, Vec<Value>)> = map
        .into_iter()
        .map(|(name, value)| {
            let values = match value {
                Value::Array(items) => items,
                other => vec![other],
            };
            (name, values)
        })
        .collect();
    let height = common_height(&fields)?;
    let columns = fields
        .into_iter()
        .map(|(name, values)| {
            let values = if values.len() == 1 && height != 1 {
                vec![values[0].clone(); height]
            } else {
                values
            };
            build_column(&name, values)
        })
        .collect();
    Ok(DataFrame::new(columns)?)
}

/// Row count shared by every field once length-1 fields are recycled.
fn common_height(fields: &[(String, Vec<Value>)]) -> Result<usize> {
    let lengths: BTreeSet<usize> = fields.iter().map(|(_, values)| values.len()).collect();
    let longest = lengths.iter().copied().max().unwrap_or(0);
    let consistent = match lengths.len() {
        0 | 1 => true,
        2 => lengths.contains(&1) && longest > 1,
        _ => false,
    };
    if consistent {
        return Ok(longest);
    }
    let detail = fields
        .iter()
        .map(|(name, values)| format!("{name}={}", values.len()))
        .collect::<Vec<_>>()
        .join(", ");
    Err(NormalizeError::coercion(format!(
        "mapping fields have differing lengths ({detail})"
    )))
}

fn sequence_to_table(items: Vec<Value>, name: &str) -> Result<DataFrame> {
    let nested = items
        .iter()
        .any(|item| matches!(item, Value::Array(_) | Value::Object(_)));
    let values = if nested {
        let mut leaves = Vec::new();
        for item in items {
            flatten_into(item, &mut leaves);
        }
        leaves
    } else {
        items
    };
    Ok(DataFrame::new(vec![build_column(name, values)])?)
}

/// Depth-first collection of leaf values; mapping keys are discarded.
fn flatten_into(value: Value, out: &mut Vec<Value>) {
    match value {
        Value::Array(items) => {
            for item in items {
                flatten_into(item, out);
            }
        }
        Value::Object(map) => {
            for (_, item) in map {
                flatten_into(item, out);
            }
        }
        leaf => out.push(leaf),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellKind {
    Null,
    Bool,
    Int,
    Float,
    Text,
}

fn cell_kind(value: &Value) -> CellKind {
    match value {
        Value::Null => CellKind::Null,
        Value::Bool(_) => CellKind::Bool,
        Value::Number(n) if n.is_i64() => CellKind::Int,
        Value::Number(_) => CellKind::Float,
        Value::String(_) | Value::Array(_) | Value::Object(_) => CellKind::Text,
    }
}

/// Narrowest column type holding every value; mixed columns fall back to text.
fn column_kind(values: &[Value]) -> CellKind {
    values
        .iter()
        .map(cell_kind)
        .fold(CellKind::Null, |acc, kind| match (acc, kind) {
            (CellKind::Null, kind) | (kind, CellKind::Null) => kind,
            (a, b) if a == b => a,
            (CellKind::Int, CellKind::Float) | (CellKind::Float, CellKind::Int) => CellKind::Float,
            _ => CellKind::Text,
        })
}

fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn build_column(name: &str, values: Vec<Value>) -> Column {
    let series = match column_kind(&values) {
        CellKind::Null => Series::full_null(name.into(), values.len(), &DataType::Null),
        CellKind::Bool => Series::new(
            name.into(),
            values.iter().map(Value::as_bool).collect::<Vec<_>>(),
        ),
        CellKind::Int => Series::new(
            name.into(),
            values.iter().map(Value::as_i64).collect::<Vec<_>>(),
        ),
        CellKind::Float => Series::new(
            name.into(),
            values.iter().map(Value::as_f64).collect::<Vec<_>>(),
        ),
        CellKind::Text => Series::new(
            name.into(),
            values.iter().map(value_text).collect::<Vec<_>>(),
        ),
    };
    series.into_column()
}
