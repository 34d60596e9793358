// qualitas/src/commands/rules.rs
//
// USE CASE: Show the rules a row is checked against.

use anyhow::Context;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use std::path::PathBuf;

use super::resolve_config;

pub fn execute(config: Option<PathBuf>) -> anyhow::Result<()> {
    let config = resolve_config(config.as_deref())?;
    let rules = config.rule_set().context("Invalid quality rules")?;

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Rule", "Conditions (all must hold)", "Description"]);

    for rule in rules.rules() {
        let conditions: Vec<String> = rule.conditions.iter().map(|c| c.to_string()).collect();
        table.add_row(vec![
            rule.name.clone(),
            conditions.join("\nAND "),
            rule.description.clone().unwrap_or_default(),
        ]);
    }

    println!("\n📏 {} rule(s). A row is bad when any rule matches.", rules.len());
    println!("   Required columns: {}", rules.required_columns().join(", "));
    println!("{table}");

    Ok(())
}
