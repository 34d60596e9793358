// qualitas/src/commands/assess.rs
//
// USE CASE: Assess the data quality of one or more files.

use anyhow::{Context, bail};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use serde_json::Value as JsonValue;
use std::path::PathBuf;
use std::sync::Arc;

use qualitas_core::application::{
    BatchReport, DatasetReport, FileOutcome, assess_files, write_report,
};
use qualitas_core::domain::Value;
use qualitas_core::infrastructure::{discover_files, unique_paths};

use super::resolve_config;
use crate::cli::OutputFormat;

pub struct AssessOptions {
    pub paths: Vec<PathBuf>,
    pub dir: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub group_by: Option<String>,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub show_bad: bool,
    pub min_quality: Option<f64>,
}

pub async fn execute(options: AssessOptions) -> anyhow::Result<()> {
    let config = resolve_config(options.config.as_deref())?;
    let rules = config.rule_set().context("Invalid quality rules")?;

    let mut files = options.paths;
    if let Some(dir) = &options.dir {
        let found = discover_files(dir)
            .with_context(|| format!("Failed to scan directory {:?}", dir))?;
        files.extend(found);
    }
    let files = unique_paths(files);
    tracing::debug!(files = files.len(), "Resolved input files");
    if files.is_empty() {
        bail!("❌ No input files.\n👉 Pass file paths or --dir <directory>.");
    }

    let report = assess_files(files, Arc::new(rules), options.group_by).await;

    if let Some(path) = &options.output {
        write_report(path, &report)
            .with_context(|| format!("Failed to write report to {:?}", path))?;
    }

    match options.format {
        OutputFormat::Json => println!("{}", report.to_json()?),
        OutputFormat::Table => {
            print_summary(&report);
            for dataset in report.reports() {
                print_breakdown(dataset);
                if options.show_bad {
                    print_bad_rows(dataset);
                }
            }
            if let Some(path) = &options.output {
                println!("📄 JSON report saved to {}", path.display());
            }
        }
    }

    let mut failed = false;
    for outcome in report.failures() {
        if let FileOutcome::Failed { file, error, .. } = outcome {
            eprintln!("❌ {}: {}", file, error);
            failed = true;
        }
    }
    if let Some(threshold) = options.min_quality {
        for dataset in report.below_threshold(threshold) {
            eprintln!(
                "⚠️  {}: quality {:.2}% is below the {:.2}% threshold",
                dataset.name, dataset.summary.quality_pct, threshold
            );
            failed = true;
        }
    }
    if failed {
        std::process::exit(1);
    }

    Ok(())
}

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn print_summary(report: &BatchReport) {
    let mut table = new_table();
    table.set_header(vec!["File", "Rows", "Bad", "Good", "Quality %"]);

    for outcome in &report.outcomes {
        match outcome {
            FileOutcome::Assessed(dataset) => {
                let s = &dataset.summary;
                table.add_row(vec![
                    dataset.name.clone(),
                    s.total.to_string(),
                    s.bad.to_string(),
                    s.good.to_string(),
                    format!("{:.2}", s.quality_pct),
                ]);
            }
            FileOutcome::Failed { file, .. } => {
                table.add_row(vec![
                    file.clone(),
                    "-".to_string(),
                    "-".to_string(),
                    "-".to_string(),
                    "failed".to_string(),
                ]);
            }
        }
    }

    let overall = &report.overall;
    table.add_row(vec![
        "TOTAL".to_string(),
        overall.total.to_string(),
        overall.bad.to_string(),
        overall.good.to_string(),
        format!("{:.2}", overall.quality_pct),
    ]);

    println!("\n📊 Data Quality");
    println!("{table}");
}

fn print_breakdown(dataset: &DatasetReport) {
    if let Some(error) = &dataset.breakdown_error {
        println!("\n⚠️  {}: no breakdown ({})", dataset.name, error);
    }
    let Some(breakdown) = &dataset.breakdown else {
        return;
    };
    let mut table = new_table();
    table.set_header(vec![breakdown.column.as_str(), "Bad rows"]);
    for entry in breakdown.sorted_by_count() {
        table.add_row(vec![cell_text(&entry.value), entry.bad.to_string()]);
    }
    println!("\n🔍 {} by {}", dataset.name, breakdown.column);
    println!("{table}");
}

fn print_bad_rows(dataset: &DatasetReport) {
    if dataset.bad_rows.is_empty() {
        println!("\n✅ {}: no bad rows", dataset.name);
        return;
    }
    let mut table = new_table();
    let mut header = vec!["#".to_string()];
    header.extend(dataset.columns.iter().cloned());
    header.push("Violations".to_string());
    table.set_header(header);

    for bad in &dataset.bad_rows {
        let mut row = vec![bad.index.to_string()];
        row.extend(
            dataset
                .columns
                .iter()
                .map(|c| json_text(bad.values.get(c).unwrap_or(&JsonValue::Null))),
        );
        row.push(bad.violations.join(", "));
        table.add_row(row);
    }
    println!("\n❌ {}: {} bad row(s)", dataset.name, dataset.bad_rows.len());
    println!("{table}");
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => "(empty)".to_string(),
        other => other.to_string(),
    }
}

fn json_text(value: &JsonValue) -> String {
    match value {
        JsonValue::Null => String::new(),
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}
