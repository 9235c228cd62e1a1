// SPDX-FileCopyrightText: 2026 IcyHider Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! IcyHider - wraps plugin host nodes under a single IcyHider category.
//!
//! This is the binary entry point. It loads configuration, builds the Icy
//! registry once, and prints or exports the result.

mod pipeline;
mod report;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use icyhider_config::IcyHiderConfig;

/// IcyHider - builds the Icy wrapper registry for a node-based plugin host.
#[derive(Parser, Debug)]
#[command(name = "icyhider", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Build the registry and print a per-source summary.
    Build {
        /// Print the build report as JSON.
        #[arg(long)]
        json: bool,
    },
    /// List every registered wrapper.
    List {
        /// Print entries as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Export the class and display name mappings as JSON.
    Export {
        /// Write to this file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => icyhider_config::load_and_validate_path(path),
        None => icyhider_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            icyhider_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.log.level);

    if let Err(e) = run(cli.command, &config) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run(command: Option<Commands>, config: &IcyHiderConfig) -> Result<(), icyhider_core::IcyError> {
    let Some(command) = command else {
        println!("icyhider: use --help for available commands");
        return Ok(());
    };

    let build = pipeline::run_pipeline(config)?;

    match command {
        Commands::Build { json: true } => {
            println!("{}", report::to_json(build.report())?);
        }
        Commands::Build { json: false } => {
            print!("{}", report::render_summary(build.report()));
        }
        Commands::List { json } => {
            let entries = report::list_entries(build.registry());
            if json {
                println!("{}", report::to_json(&entries)?);
            } else {
                print!("{}", report::render_list(&entries));
            }
        }
        Commands::Export { output } => {
            let rendered = report::export_json(build.registry())?;
            match output {
                Some(path) => {
                    std::fs::write(&path, rendered + "\n")
                        .map_err(|source| icyhider_core::IcyError::Io { path, source })?;
                }
                None => println!("{rendered}"),
            }
        }
    }
    Ok(())
}

/// Logs go to stderr so stdout stays clean for list and export output.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("icyhider={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn config_flag_is_global() {
        let cli = Cli::parse_from(["icyhider", "list", "--config", "custom.toml", "--json"]);
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
        assert!(matches!(cli.command, Some(Commands::List { json: true })));
    }
}
