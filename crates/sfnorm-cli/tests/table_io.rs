//! File round trips through the CLI table helpers.

use std::fs;

use serde_json::json;
use tempfile::TempDir;

use sfnorm_cli::config::load_config;
use sfnorm_cli::table_io::{read_csv, read_json_value, write_csv};
use sfnorm_core::{CoerceOptions, prepare, repair_for};
use sfnorm_model::Operation;

fn column_names(df: &polars::prelude::DataFrame) -> Vec<String> {
    df.get_columns()
        .iter()
        .map(|c| c.name().to_string())
        .collect()
}

#[test]
fn soap_response_csv_is_repaired() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("response.csv");
    let output = dir.path().join("repaired.csv");
    fs::write(
        &input,
        "sf:Id,sf:Account,sf:Account.Name\n001A,,Acme\n001B,,\n",
    )
    .unwrap();

    let table = read_csv(&input).unwrap();
    assert_eq!(column_names(&table), ["sf:Id", "sf:Account", "sf:Account.Name"]);

    let repaired = repair_for(table, "SOAP").unwrap();
    write_csv(&repaired, &output).unwrap();

    let written = fs::read_to_string(&output).unwrap();
    let mut lines = written.lines();
    assert_eq!(lines.next(), Some("sf:Id,sf:Account.Name"));
    assert_eq!(lines.count(), 2);
}

#[test]
fn json_input_prepares_and_exports() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("ids.json");
    let output = dir.path().join("ids.csv");
    fs::write(&input, json!(["001A", "001B"]).to_string()).unwrap();

    let value = read_json_value(&input).unwrap();
    let table = prepare(value, &Operation::Delete, &CoerceOptions::default()).unwrap();
    write_csv(&table, &output).unwrap();

    let written = fs::read_to_string(&output).unwrap();
    assert_eq!(written.lines().collect::<Vec<_>>(), ["Id", "001A", "001B"]);
}

#[test]
fn null_columns_export_as_empty_cells() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("nulls.csv");
    let table = prepare(
        json!({"Id": ["001A", "001B"], "Description": null}),
        &Operation::Update,
        &CoerceOptions::default(),
    )
    .unwrap();
    write_csv(&table, &output).unwrap();
    let written = fs::read_to_string(&output).unwrap();
    assert_eq!(written.lines().count(), 3);
}

#[test]
fn invalid_json_reports_path() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("broken.json");
    fs::write(&input, "{not json").unwrap();
    let err = read_json_value(&input).unwrap_err();
    assert!(format!("{err:#}").contains("broken.json"));
}

#[test]
fn explicit_config_must_exist() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("sfnorm.toml");
    assert!(load_config(Some(&missing)).is_err());
}

#[test]
fn explicit_config_is_loaded() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sfnorm.toml");
    fs::write(&path, "[headers.QueryOptions]\nbatchSize = 250\n").unwrap();
    let config = load_config(Some(&path)).unwrap();
    assert_eq!(config.headers["QueryOptions"]["batchSize"], json!(250));
}
