// qualitas/src/main.rs

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // RUST_LOG=debug qualitas assess ... to see reader and rule details
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Assess {
            paths,
            dir,
            config,
            group_by,
            format,
            output,
            show_bad,
            min_quality,
        } => {
            let options = commands::assess::AssessOptions {
                paths,
                dir,
                config,
                group_by,
                format,
                output,
                show_bad,
                min_quality,
            };
            commands::assess::execute(options).await?;
        }
        Commands::Columns { file } => commands::columns::execute(file).await?,
        Commands::Rules { config } => commands::rules::execute(config)?,
    }

    Ok(())
}
