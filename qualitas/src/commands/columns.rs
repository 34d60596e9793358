// qualitas/src/commands/columns.rs
//
// USE CASE: List the columns of a data file.

use anyhow::Context;
use std::path::PathBuf;

use qualitas_core::infrastructure::reader_for_path;

pub async fn execute(file: PathBuf) -> anyhow::Result<()> {
    let reader = reader_for_path(&file)?;
    let dataset = reader
        .read(&file)
        .await
        .with_context(|| format!("Failed to read {:?}", file))?;

    println!(
        "\n📋 {} ({} columns, {} rows)",
        file.display(),
        dataset.columns().len(),
        dataset.len()
    );
    for (i, column) in dataset.columns().iter().enumerate() {
        println!("   {:>3}. {}", i + 1, column);
    }

    Ok(())
}
