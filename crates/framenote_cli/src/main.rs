//! `framenote` command-line entry point.
//!
//! Loads the configured model file, runs one command, and saves the model
//! when the command changed it.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{execute, Cli};
use framenote_core::{init_from_config, CoreConfig, EditorSession};
use log::info;
use std::process;

fn main() {
    let cli = Cli::parse();
    match run(cli) {
        Ok(output) => println!("{output}"),
        Err(err) => {
            eprintln!("Error: {err:#}");
            process::exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<String> {
    let config = CoreConfig::from_env().with_overrides(
        cli.model.clone(),
        cli.log_level.clone(),
        cli.log_dir.clone(),
    );
    init_from_config(&config).context("failed to initialize logging")?;
    info!(
        "event=cli_start module=cli status=ok version={}",
        framenote_core::core_version()
    );

    let mut session = EditorSession::from_config(&config)
        .with_context(|| format!("failed to open model `{}`", config.model_path.display()))?;
    let output = execute(&mut session, &cli.command)?;

    if cli.command.mutates() {
        session
            .save()
            .with_context(|| format!("failed to save model `{}`", session.path().display()))?;
    }
    Ok(output)
}
