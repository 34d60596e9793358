// qualitas/src/cli.rs
//
// Single source of truth for all CLI definitions (Clap structs).

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "qualitas")]
#[command(about = "Row-level data quality classification for spreadsheet exports", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 🔎 Classifies every row and reports the data quality of each file
    Assess {
        /// Files to assess (.csv, .tsv, .json)
        paths: Vec<PathBuf>,

        /// Also assess every supported file found under this directory
        #[arg(long)]
        dir: Option<PathBuf>,

        /// Rule configuration (default: qualitas.yaml in the current directory)
        #[arg(long, short)]
        config: Option<PathBuf>,

        /// Count bad rows per distinct value of this column
        #[arg(long, short = 'g')]
        group_by: Option<String>,

        /// Output format: table | json
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Write the JSON report to this file
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Print the bad rows of each file
        #[arg(long)]
        show_bad: bool,

        /// Fail when a file's quality percentage is below this value
        #[arg(long, value_parser = parse_percentage)]
        min_quality: Option<f64>,
    },

    /// 📋 Lists the columns of a data file
    Columns {
        /// Data file (.csv, .tsv, .json)
        file: PathBuf,
    },

    /// 📏 Prints the effective quality rules
    Rules {
        /// Rule configuration (default: qualitas.yaml in the current directory)
        #[arg(long, short)]
        config: Option<PathBuf>,
    },
}

fn parse_percentage(raw: &str) -> Result<f64, String> {
    let value: f64 = raw
        .parse()
        .map_err(|_| format!("'{}' is not a number", raw))?;
    if (0.0..=100.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("{} is not between 0 and 100", value))
    }
}
