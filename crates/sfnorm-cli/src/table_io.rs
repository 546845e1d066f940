//! Reading and writing record tables at the edge of the CLI.
//!
//! Wire encodings belong to the transport layer; the CLI only needs JSON for
//! caller input and CSV for parsed responses and exported tables.

use std::fs::{self, File};
use std::path::Path;

use anyhow::{Context, Result};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};
use polars::prelude::{Column, CsvReadOptions, CsvWriter, DataFrame, DataType, SerReader, SerWriter};
use serde_json::Value;
use tracing::info;

use sfnorm_common::{cell_string, column_names};

/// Read a JSON document holding caller input.
pub fn read_json_value(path: &Path) -> Result<Value> {
    let content =
        fs::read_to_string(path).with_context(|| format!("read input {}", path.display()))?;
    let value = serde_json::from_str(&content)
        .with_context(|| format!("parse JSON input {}", path.display()))?;
    info!(path = %path.display(), "read input");
    Ok(value)
}

/// Read a parsed response table from CSV.
///
/// Every column is read as text so that all-empty relationship columns keep
/// their names and positions.
pub fn read_csv(path: &Path) -> Result<DataFrame> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .with_context(|| format!("open CSV {}", path.display()))?
        .finish()
        .with_context(|| format!("parse CSV {}", path.display()))?;
    info!(path = %path.display(), rows = df.height(), columns = df.width(), "read table");
    Ok(df)
}

/// Write `df` as CSV with a header row.
pub fn write_csv(df: &DataFrame, path: &Path) -> Result<()> {
    let mut out = printable(df)?;
    let mut file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut out)
        .with_context(|| format!("write CSV {}", path.display()))?;
    info!(path = %path.display(), rows = df.height(), "wrote table");
    Ok(())
}

/// Copy of `df` with untyped all-null columns cast to text.
fn printable(df: &DataFrame) -> Result<DataFrame> {
    let columns = df
        .get_columns()
        .iter()
        .map(|column| match column.dtype() {
            DataType::Null => column.cast(&DataType::String),
            _ => Ok(column.clone()),
        })
        .collect::<polars::prelude::PolarsResult<Vec<Column>>>()?;
    Ok(DataFrame::new(columns)?)
}

/// Render up to `limit` rows of `df` for the terminal.
pub fn render_table(df: &DataFrame, limit: usize) -> Table {
    let names = column_names(df);
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(names.iter().map(String::as_str).map(header_cell).collect::<Vec<_>>());
    for idx in 0..df.height().min(limit) {
        table.add_row(
            names
                .iter()
                .map(|name| cell_string(df, name, idx))
                .collect::<Vec<_>>(),
        );
    }
    table
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{IntoColumn, NamedFrom, Series};

    #[test]
    fn render_limits_rows() {
        let df = DataFrame::new(vec![
            Series::new("Id".into(), vec!["a", "b", "c"]).into_column(),
        ])
        .unwrap();
        let table = render_table(&df, 2);
        assert_eq!(table.row_count(), 2);
        assert!(table.to_string().contains("Id"));
    }

    #[test]
    fn printable_casts_null_columns() {
        let df = DataFrame::new(vec![
            Series::full_null("sf:Account".into(), 2, &DataType::Null).into_column(),
        ])
        .unwrap();
        let out = printable(&df).unwrap();
        assert_eq!(out.column("sf:Account").unwrap().dtype(), &DataType::String);
        assert_eq!(out.height(), 2);
    }
}
