use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use docscope::cli::{Cli, Commands};
use docscope::config::Config;
use docscope::logging::{init_early_logging, init_logging};

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Commands::Schema = cli.command {
        return docscope::commands::schema::run();
    }

    let project_root = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let config = match Config::load(&project_root) {
        Ok(config) => config,
        Err(err) => {
            init_early_logging();
            return Err(err);
        }
    };

    // Held until exit so buffered log lines are flushed
    let _logging_guard = init_logging(&config.logging, &project_root)?;

    tracing::debug!("Loaded configuration from: {}", project_root.display());

    let source_path = match &cli.file {
        Some(file) => file.clone(),
        None => config.source_path(&project_root),
    };

    if let Some(request) = cli.command.to_request() {
        docscope::commands::query::run(&config, &source_path, request)?;
    }

    Ok(())
}
