//! Semantic operations a record table is prepared for.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Operation tag driving identifier resolution.
///
/// Names follow the remote service's camelCase spelling. Anything not listed
/// is kept verbatim in [`Operation::Other`] and passes through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Operation {
    Create,
    Update,
    Upsert,
    Delete,
    Retrieve,
    DescribeSObjects,
    FindDuplicatesByIds,
    Search,
    Other(String),
}

impl Operation {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Upsert => "upsert",
            Self::Delete => "delete",
            Self::Retrieve => "retrieve",
            Self::DescribeSObjects => "describeSObjects",
            Self::FindDuplicatesByIds => "findDuplicatesByIds",
            Self::Search => "search",
            Self::Other(name) => name,
        }
    }

    /// Operations that address existing records and cannot be sent without `Id`.
    pub fn requires_identifier(&self) -> bool {
        matches!(
            self,
            Self::Delete | Self::Update | Self::Upsert | Self::FindDuplicatesByIds
        )
    }
}

impl From<&str> for Operation {
    fn from(value: &str) -> Self {
        match value {
            "create" => Self::Create,
            "update" => Self::Update,
            "upsert" => Self::Upsert,
            "delete" => Self::Delete,
            "retrieve" => Self::Retrieve,
            "describeSObjects" => Self::DescribeSObjects,
            "findDuplicatesByIds" => Self::FindDuplicatesByIds,
            "search" => Self::Search,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for Operation {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<Operation> for String {
    fn from(value: Operation) -> Self {
        value.as_str().to_string()
    }
}

impl FromStr for Operation {
    type Err = Infallible;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(value))
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
