//! Identifier column resolution.
//!
//! Renaming is driven by [`RENAME_RULES`], evaluated in order; the first rule
//! whose operation and column predicate both match decides the rename.

use polars::prelude::DataFrame;
use tracing::debug;

use sfnorm_model::{NormalizeError, Operation, Result};

/// Column name the remote service addresses records by.
pub const ID_COLUMN: &str = "Id";

/// Which column of a table a [`RenameRule`] targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnMatch {
    /// The table's only column; no match when the table is wider.
    SoleColumn,
    /// First column, in table order, equal to any alias ignoring ASCII case.
    NamedAny(&'static [&'static str]),
}

impl ColumnMatch {
    /// Name of the matched column, if any.
    pub fn find(&self, df: &DataFrame) -> Option<String> {
        let mut names = df.get_columns().iter().map(|column| column.name().as_str());
        match self {
            Self::SoleColumn if df.width() == 1 => names.next().map(str::to_string),
            Self::SoleColumn => None,
            Self::NamedAny(aliases) => names
                .find(|name| aliases.iter().any(|alias| name.eq_ignore_ascii_case(alias)))
                .map(str::to_string),
        }
    }
}

/// One declarative rename: for matching operations, rename the matched column
/// to `target`.
#[derive(Debug, Clone, Copy)]
pub struct RenameRule {
    pub name: &'static str,
    pub applies_to: fn(&Operation) -> bool,
    pub column: ColumnMatch,
    pub target: &'static str,
}

pub static RENAME_RULES: [RenameRule; 3] = [
    RenameRule {
        name: "describe-sole-column",
        applies_to: |op| matches!(op, Operation::DescribeSObjects),
        column: ColumnMatch::SoleColumn,
        target: "sObjectType",
    },
    RenameRule {
        name: "sole-column-is-id",
        applies_to: |op| {
            matches!(
                op,
                Operation::Delete | Operation::Retrieve | Operation::FindDuplicatesByIds
            )
        },
        column: ColumnMatch::SoleColumn,
        target: ID_COLUMN,
    },
    RenameRule {
        name: "id-alias",
        applies_to: |op| {
            matches!(
                op,
                Operation::Delete | Operation::Update | Operation::FindDuplicatesByIds
            )
        },
        column: ColumnMatch::NamedAny(&["ID", "IDS"]),
        target: ID_COLUMN,
    },
];

/// Resolve the identifier column of `table` for `operation`.
///
/// Renames at most one column and never touches rows or column order.
///
/// # Errors
///
/// Returns [`NormalizeError::MissingIdentifier`] when the operation addresses
/// existing records and no `Id` column exists after renaming.
pub fn resolve(table: DataFrame, operation: &Operation) -> Result<DataFrame> {
    let mut table = table;
    for rule in &RENAME_RULES {
        if !(rule.applies_to)(operation) {
            continue;
        }
        let Some(column) = rule.column.find(&table) else {
            continue;
        };
        if column == rule.target {
            break;
        }
        if table.get_column_index(rule.target).is_some() {
            debug!(
                rule = rule.name,
                column = %column,
                target = rule.target,
                "target column already present, rename skipped"
            );
            break;
        }
        table.rename(&column, rule.target.into())?;
        debug!(
            rule = rule.name,
            operation = %operation,
            from = %column,
            to = rule.target,
            "renamed column"
        );
        break;
    }

    if operation.requires_identifier() && table.get_column_index(ID_COLUMN).is_none() {
        return Err(NormalizeError::MissingIdentifier {
            operation: operation.to_string(),
            columns: table
                .get_columns()
                .iter()
                .map(|column| column.name().to_string())
                .collect(),
        });
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{Column, IntoColumn, NamedFrom, Series};

    fn table(columns: &[(&str, &[&str])]) -> DataFrame {
        let cols: Vec<Column> = columns
            .iter()
            .map(|(name, values)| Series::new((*name).into(), values.to_vec()).into_column())
            .collect();
        DataFrame::new(cols).unwrap()
    }

    fn names(df: &DataFrame) -> Vec<String> {
        df.get_columns()
            .iter()
            .map(|c| c.name().to_string())
            .collect()
    }

    #[test]
    fn describe_renames_sole_column() {
        let df = table(&[("value", &["Account", "Contact"])]);
        let out = resolve(df, &Operation::DescribeSObjects).unwrap();
        assert_eq!(names(&out), ["sObjectType"]);
        assert_eq!(out.height(), 2);
    }

    #[test]
    fn describe_leaves_wide_table_alone() {
        let df = table(&[("a", &["x"]), ("b", &["y"])]);
        let out = resolve(df, &Operation::DescribeSObjects).unwrap();
        assert_eq!(names(&out), ["a", "b"]);
    }

    #[test]
    fn retrieve_renames_sole_column() {
        let df = table(&[("value", &["001A"])]);
        let out = resolve(df, &Operation::Retrieve).unwrap();
        assert_eq!(names(&out), [ID_COLUMN]);
    }

    #[test]
    fn retrieve_does_not_require_id() {
        let df = table(&[("Name", &["x"]), ("Phone", &["1"])]);
        assert!(resolve(df, &Operation::Retrieve).is_ok());
    }

    #[test]
    fn update_renames_alias_and_keeps_other_columns() {
        let df = table(&[("Name", &["Acme", "Beta"]), ("IDS", &["1", "2"])]);
        let out = resolve(df, &Operation::Update).unwrap();
        assert_eq!(names(&out), ["Name", ID_COLUMN]);
        assert_eq!(out.height(), 2);
    }

    #[test]
    fn alias_match_is_exact_not_substring() {
        let df = table(&[("AccountId", &["1"]), ("Name", &["x"])]);
        let err = resolve(df, &Operation::Update).unwrap_err();
        assert!(matches!(err, NormalizeError::MissingIdentifier { .. }));
    }

    #[test]
    fn upsert_requires_literal_id() {
        let df = table(&[("id", &["1"]), ("Name", &["x"])]);
        let err = resolve(df, &Operation::Upsert).unwrap_err();
        match err {
            NormalizeError::MissingIdentifier { operation, columns } => {
                assert_eq!(operation, "upsert");
                assert_eq!(columns, ["id", "Name"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn create_is_untouched() {
        let df = table(&[("id", &["1"])]);
        let out = resolve(df, &Operation::Create).unwrap();
        assert_eq!(names(&out), ["id"]);
    }

    #[test]
    fn existing_id_is_not_overwritten() {
        let df = table(&[("ids", &["1"]), ("Id", &["2"])]);
        let out = resolve(df, &Operation::Delete).unwrap();
        assert_eq!(names(&out), ["ids", "Id"]);
    }

    #[test]
    fn unknown_operation_passes_through() {
        let df = table(&[("ID", &["1"])]);
        let out = resolve(df, &Operation::from("merge")).unwrap();
        assert_eq!(names(&out), ["ID"]);
    }
}
