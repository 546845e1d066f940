use thiserror::Error;

/// Errors raised while normalizing request or response tables.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum NormalizeError {
    /// Input could not be laid out as rows and columns.
    #[error("cannot coerce input into a record table: {message}")]
    Coercion { message: String },

    /// The operation needs an `Id` column and none could be resolved.
    #[error("operation '{operation}' requires an Id column; found columns [{}]", .columns.join(", "))]
    MissingIdentifier {
        operation: String,
        columns: Vec<String>,
    },

    /// A component was asked to act for a dialect it does not handle.
    #[error("{component} does not support dialect '{dialect}'")]
    UnsupportedDialect {
        dialect: String,
        component: &'static str,
    },

    /// Polars DataFrame operation error.
    #[error("DataFrame error: {0}")]
    Polars(#[from] polars::error::PolarsError),
}

impl NormalizeError {
    pub fn coercion(message: impl Into<String>) -> Self {
        Self::Coercion {
            message: message.into(),
        }
    }

    /// Name `operation` in a coercion failure; other errors pass through.
    pub fn for_operation(self, operation: impl std::fmt::Display) -> Self {
        match self {
            Self::Coercion { message } => Self::Coercion {
                message: format!("{message} (operation '{operation}')"),
            },
            other => other,
        }
    }

    pub fn unsupported_dialect(dialect: impl ToString, component: &'static str) -> Self {
        Self::UnsupportedDialect {
            dialect: dialect.to_string(),
            component,
        }
    }
}

pub type Result<T> = std::result::Result<T, NormalizeError>;
