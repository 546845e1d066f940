//! `sfnorm.toml` configuration.
//!
//! ```toml
//! [coerce]
//! value_column = "value"
//!
//! [headers.QueryOptions]
//! batchSize = 1000
//! ```
//!
//! Header tables are caller overrides and are merged over the catalog
//! defaults; `--set` flags are applied on top of them.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use sfnorm_core::{CoerceOptions, HeaderOverrides};

/// File looked up in the working directory when `--config` is not given.
pub const CONFIG_FILENAME: &str = "sfnorm.toml";

/// Settings loaded from `sfnorm.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub coerce: CoerceOptions,
    pub headers: HeaderOverrides,
}

/// Load configuration.
///
/// An explicit `path` must exist. Without one, `./sfnorm.toml` is used when
/// present and defaults otherwise.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let (path, required) = match path {
        Some(path) => (path.to_path_buf(), true),
        None => (PathBuf::from(CONFIG_FILENAME), false),
    };
    match fs::read_to_string(&path) {
        Ok(content) => {
            let config = parse_config(&content)
                .with_context(|| format!("parse config {}", path.display()))?;
            tracing::info!(path = %path.display(), "loaded configuration");
            Ok(config)
        }
        Err(e) if e.kind() == ErrorKind::NotFound && !required => {
            tracing::debug!(path = %path.display(), "no configuration file, using defaults");
            Ok(Config::default())
        }
        Err(e) => Err(e).with_context(|| format!("read config {}", path.display())),
    }
}

pub fn parse_config(content: &str) -> Result<Config> {
    Ok(toml::from_str(content)?)
}

/// Parse a `Header.field=value` override.
///
/// The value is read as JSON when it parses, and as a plain string otherwise,
/// so `batchSize=1000` is a number and `language=en_US` a string.
pub fn parse_override(raw: &str) -> Result<(String, String, Value)> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| anyhow!("override '{raw}' is not of the form Header.field=value"))?;
    let (header, field) = key
        .trim()
        .split_once('.')
        .ok_or_else(|| anyhow!("override key '{key}' is not of the form Header.field"))?;
    if header.is_empty() || field.is_empty() {
        bail!("override key '{key}' has an empty header or field name");
    }
    let value = serde_json::from_str(value.trim())
        .unwrap_or_else(|_| Value::String(value.trim().to_string()));
    Ok((header.to_string(), field.to_string(), value))
}

/// Apply `Header.field=value` flags on top of `overrides`.
pub fn apply_overrides(overrides: &mut HeaderOverrides, raw: &[String]) -> Result<()> {
    for item in raw {
        let (header, field, value) = parse_override(item)?;
        overrides.entry(header).or_default().insert(field, value);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_config_is_default() {
        let config = parse_config("").unwrap();
        assert_eq!(config.coerce, CoerceOptions::default());
        assert!(config.headers.is_empty());
    }

    #[test]
    fn header_tables_become_overrides() {
        let config = parse_config(
            r#"
            [coerce]
            value_column = "ids"

            [headers.QueryOptions]
            batchSize = 1000

            [headers.LocaleOptions]
            language = "en_US"
            "#,
        )
        .unwrap();
        assert_eq!(config.coerce.value_column, "ids");
        assert_eq!(config.headers["QueryOptions"]["batchSize"], json!(1000));
        assert_eq!(config.headers["LocaleOptions"]["language"], json!("en_US"));
    }

    #[test]
    fn unknown_section_is_rejected() {
        assert!(parse_config("[transport]\ntimeout = 3\n").is_err());
    }

    #[test]
    fn override_values_are_json_or_text() {
        assert_eq!(
            parse_override("QueryOptions.batchSize=1000").unwrap(),
            (
                "QueryOptions".to_string(),
                "batchSize".to_string(),
                json!(1000)
            )
        );
        let (_, _, value) = parse_override("LocaleOptions.language=en_US").unwrap();
        assert_eq!(value, json!("en_US"));
        let (_, _, value) = parse_override("AllOrNoneHeader.allOrNone=true").unwrap();
        assert_eq!(value, json!(true));
    }

    #[test]
    fn malformed_overrides_are_rejected() {
        assert!(parse_override("QueryOptions=1").is_err());
        assert!(parse_override("QueryOptions.batchSize").is_err());
        assert!(parse_override(".batchSize=1").is_err());
    }

    #[test]
    fn flags_merge_into_file_overrides() {
        let mut overrides = parse_config("[headers.QueryOptions]\nbatchSize = 200\n")
            .unwrap()
            .headers;
        apply_overrides(
            &mut overrides,
            &["QueryOptions.batchSize=300".to_string(), "MruHeader.updateMru=true".to_string()],
        )
        .unwrap();
        assert_eq!(overrides["QueryOptions"]["batchSize"], json!(300));
        assert_eq!(overrides["MruHeader"]["updateMru"], json!(true));
    }
}
