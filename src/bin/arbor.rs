//! Arbor shell binary
//!
//! Interactive front end over the session operation set: loads the persisted
//! tree on startup, loops over text commands, and writes the tree back out on
//! save/exit.

use anyhow::Context;
use arbor::config::{ArborConfig, ConfigLoader};
use arbor::logging::{init_logging, LoggingConfig};
use arbor::session::Session;
use arbor::shell::{self, Step};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process;
use tracing::{error, info};

/// Arbor - in-memory hierarchical filesystem shell
#[derive(Parser)]
#[command(name = "arbor")]
#[command(about = "In-memory hierarchical filesystem with a navigable cursor and clipboard")]
struct Cli {
    /// Persisted state file (overrides configuration)
    #[arg(long)]
    state_file: Option<PathBuf>,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable verbose logging (default: off)
    #[arg(long, default_value = "false")]
    verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    log_format: Option<String>,

    /// Disable colored listings
    #[arg(long)]
    no_color: bool,
}

fn main() {
    let cli = Cli::parse();

    let config = match ConfigLoader::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    let logging_config = build_logging_config(&cli, &config);
    if let Err(e) = init_logging(Some(&logging_config)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("Arbor shell starting");

    let state_file = cli
        .state_file
        .clone()
        .unwrap_or_else(|| config.storage.state_file.clone());
    let mut session = Session::open(&state_file);

    if let Err(e) = run(&mut session, &state_file, !cli.no_color) {
        error!("Shell loop failed: {}", e);
        eprintln!("{:#}", e);
        process::exit(1);
    }
}

/// Build logging configuration from CLI args, environment, and config file.
fn build_logging_config(cli: &Cli, config: &ArborConfig) -> LoggingConfig {
    // without --verbose the shell stays quiet
    if !cli.verbose {
        return LoggingConfig {
            level: "off".to_string(),
            ..LoggingConfig::default()
        };
    }

    let mut logging = config.logging.clone();
    if let Some(ref level) = cli.log_level {
        logging.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        logging.format = format.clone();
    }
    if cli.no_color {
        logging.color = false;
    }
    logging
}

fn run(session: &mut Session, state_file: &Path, color: bool) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        let listing = session.list_current_directory();
        print!("{}", shell::render_listing(&listing, color));
        print!("\nEnter command (newfile, copy, paste, remove, mkdir, cd, ls, save, exit): ");
        io::stdout().flush().context("flushing prompt")?;

        let line = match lines.next() {
            Some(line) => line.context("reading command")?,
            // EOF behaves like exit: one final persistence attempt
            None => {
                println!();
                return save_and_report(session, state_file).map(|_| ());
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match shell::parse_command(&line) {
            Ok(command) => command,
            Err(message) => {
                println!("{}", message);
                continue;
            }
        };

        match shell::execute(session, &command) {
            Step::Continue(Some(message)) => println!("{}", message),
            Step::Continue(None) => {}
            Step::Save => {
                save_and_report(session, state_file)?;
            }
            Step::Exit => {
                // a failed save keeps the shell alive so nothing is lost
                if save_and_report(session, state_file)? {
                    return Ok(());
                }
            }
        }
    }
}

/// Persist the tree, reporting the outcome. Returns whether the save
/// succeeded; a storage failure is recoverable, never fatal.
fn save_and_report(session: &Session, state_file: &Path) -> anyhow::Result<bool> {
    match session.persist(state_file) {
        Ok(()) => {
            println!("Directory structure saved to '{}'.", state_file.display());
            Ok(true)
        }
        Err(e) => {
            error!(error = %e, "failed to persist directory tree");
            println!(
                "Could not save to '{}': {}. The tree is kept in memory.",
                state_file.display(),
                e
            );
            Ok(false)
        }
    }
}
