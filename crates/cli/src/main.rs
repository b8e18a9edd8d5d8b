//! sift: line-oriented shell for the record search desk.
//!
//! Two modes:
//! - **REPL mode**: `sift [flags]` with a terminal on stdin: interactive prompt
//! - **Pipe mode**: `cat script | sift [flags]`: line-by-line from stdin
//!
//! `sift --init-config` writes a default `sift.toml` and exits.
//!
//! Logs go to stderr, filtered by `SIFT_LOG` (falls back to `RUST_LOG`,
//! then `warn`).

mod commands;
mod format;
mod parse;
mod repl;
mod state;

use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process;

use sift_engine::{SiftConfig, CONFIG_FILE_NAME};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use commands::build_cli;
use format::OutputMode;
use state::DeskState;

fn main() {
    init_logging();

    let matches = build_cli().get_matches();

    if matches.get_flag("init-config") {
        match init_config(&matches) {
            Ok(path) => {
                println!("Config: {}", path.display());
                process::exit(0);
            }
            Err(e) => {
                eprintln!("{}", e);
                process::exit(1);
            }
        }
    }

    let output_mode = if matches.get_flag("json") {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    let config = match load_config(&matches) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };
    debug!(?config, "Configuration loaded");

    let mut state = match DeskState::new(&config) {
        Ok(state) => state,
        Err(e) => {
            eprintln!("Failed to start desk: {}", e);
            process::exit(1);
        }
    };

    let exit_code = if std::io::stdin().is_terminal() {
        repl::run_repl(&mut state, output_mode);
        0
    } else {
        repl::run_pipe(&mut state, output_mode)
    };
    state.shutdown();
    process::exit(exit_code);
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("SIFT_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Config file from `--config`, else `./sift.toml` if present, else defaults;
/// then command-line overrides.
fn load_config(matches: &clap::ArgMatches) -> Result<SiftConfig, String> {
    let mut config = match matches.get_one::<String>("config") {
        Some(path) => SiftConfig::from_file(Path::new(path)).map_err(|e| e.to_string())?,
        None if Path::new(CONFIG_FILE_NAME).exists() => {
            SiftConfig::from_file(Path::new(CONFIG_FILE_NAME)).map_err(|e| e.to_string())?
        }
        None => SiftConfig::default(),
    };

    if let Some(page_size) = matches.get_one::<usize>("page-size") {
        config.page_size = *page_size;
    }
    if let Some(debounce_ms) = matches.get_one::<u64>("debounce-ms") {
        config.debounce_ms = *debounce_ms;
    }
    if let Some(seed) = matches.get_one::<usize>("seed") {
        config.seed_records = *seed;
    }
    config.validate().map_err(|e| e.to_string())?;
    Ok(config)
}

/// Write the default config to `--config` (or `./sift.toml`) unless a file
/// is already there.
fn init_config(matches: &clap::ArgMatches) -> Result<PathBuf, String> {
    let path = matches
        .get_one::<String>("config")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));
    SiftConfig::write_default_if_missing(&path).map_err(|e| e.to_string())?;
    info!(path = %path.display(), "Config file ready");
    Ok(path)
}
