//! Wire dialects exposed by the remote service.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::NormalizeError;

/// Wire protocol a request is built for or a response was parsed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Dialect {
    #[serde(rename = "REST")]
    Rest,
    #[serde(rename = "SOAP")]
    Soap,
    #[serde(rename = "Bulk 1.0")]
    Bulk1,
    #[serde(rename = "Bulk 2.0")]
    Bulk2,
    Metadata,
}

impl Dialect {
    pub const ALL: [Dialect; 5] = [
        Dialect::Rest,
        Dialect::Soap,
        Dialect::Bulk1,
        Dialect::Bulk2,
        Dialect::Metadata,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rest => "REST",
            Self::Soap => "SOAP",
            Self::Bulk1 => "Bulk 1.0",
            Self::Bulk2 => "Bulk 2.0",
            Self::Metadata => "Metadata",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dialect {
    type Err = NormalizeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let key: String = value
            .trim()
            .chars()
            .filter(|ch| !ch.is_whitespace())
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "rest" => Ok(Self::Rest),
            "soap" => Ok(Self::Soap),
            "bulk1" | "bulk1.0" => Ok(Self::Bulk1),
            "bulk2" | "bulk2.0" => Ok(Self::Bulk2),
            "metadata" => Ok(Self::Metadata),
            _ => Err(NormalizeError::unsupported_dialect(value, "dialect parser")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_documented_spellings() {
        assert_eq!("REST".parse::<Dialect>().unwrap(), Dialect::Rest);
        assert_eq!("soap".parse::<Dialect>().unwrap(), Dialect::Soap);
        assert_eq!("Bulk 1.0".parse::<Dialect>().unwrap(), Dialect::Bulk1);
        assert_eq!("bulk2".parse::<Dialect>().unwrap(), Dialect::Bulk2);
        assert_eq!("Metadata".parse::<Dialect>().unwrap(), Dialect::Metadata);
    }

    #[test]
    fn rejects_unknown_tag() {
        let err = "GraphQL".parse::<Dialect>().unwrap_err();
        assert!(matches!(err, NormalizeError::UnsupportedDialect { .. }));
        assert!(err.to_string().contains("GraphQL"));
    }

    #[test]
    fn display_round_trips_through_parse() {
        for dialect in Dialect::ALL {
            assert_eq!(dialect.to_string().parse::<Dialect>().unwrap(), dialect);
        }
    }
}
