//! Subcommand handlers for the sfnorm binary.

use anyhow::{Context, Result};
use comfy_table::Table;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use tracing::{info, info_span};

use sfnorm_cli::config::{Config, apply_overrides};
use sfnorm_cli::table_io::{read_csv, read_json_value, render_table, write_csv};
use sfnorm_core::{HeaderRegistry, prepare, repair_for};
use sfnorm_model::{Dialect, Operation};

use crate::cli::{HeadersArgs, PrepareArgs, RepairArgs};

pub fn run_prepare(args: &PrepareArgs, config: &Config) -> Result<()> {
    let operation = Operation::from(args.operation.as_str());
    let _guard = info_span!("prepare_command", operation = %operation).entered();
    let input = read_json_value(&args.input)?;
    let table = prepare(input, &operation, &config.coerce)
        .with_context(|| format!("prepare {} for {operation}", args.input.display()))?;
    match &args.output {
        Some(path) => write_csv(&table, path)?,
        None => println!("{}", render_table(&table, args.limit)),
    }
    info!(rows = table.height(), "prepared record table");
    Ok(())
}

pub fn run_headers(args: &HeadersArgs, config: &Config) -> Result<()> {
    let mut overrides = config.headers.clone();
    apply_overrides(&mut overrides, &args.set)?;
    let bundle = HeaderRegistry::global().headers_for(&args.dialect, &overrides);
    println!("{}", serde_json::to_string_pretty(&bundle)?);
    Ok(())
}

pub fn run_repair(args: &RepairArgs) -> Result<()> {
    let _guard = info_span!("repair_command", dialect = %args.dialect).entered();
    let table = read_csv(&args.input)?;
    let before = table.width();
    let table = repair_for(table, &args.dialect)
        .with_context(|| format!("repair {}", args.input.display()))?;
    info!(removed = before - table.width(), "repaired response table");
    match &args.output {
        Some(path) => write_csv(&table, path)?,
        None => println!("{}", render_table(&table, args.limit)),
    }
    Ok(())
}

pub fn run_catalog() -> Result<()> {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec!["Header", "Dialects", "Defaults"]);
    for entry in HeaderRegistry::global().entries() {
        let dialects = entry
            .dialects
            .iter()
            .copied()
            .map(Dialect::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(vec![
            entry.name.to_string(),
            dialects,
            serde_json::to_string(&entry.defaults)?,
        ]);
    }
    println!("{table}");
    Ok(())
}
