//! # kb - Kanban Command Line Tool
//!
//! An interactive terminal kanban board. Projects and their tasks live in a
//! single JSON settings file; every view is drawn with box-drawing
//! characters straight onto the terminal and driven one keypress at a time.
//!
//! ## Quick Start
//!
//! ```bash
//! # Open the main menu (most recent project is the default entry)
//! kb
//!
//! # Print usage
//! kb -help
//!
//! # Use a different settings file
//! kb --settings ./work.json
//! ```
//!
//! ## Board Commands
//!
//! - `move <id> [column]` - move a task to a column, or one column forward
//! - `delete <id>` - delete a task
//! - `create` / `edit <id>` - open the task editor
//! - `backlog` - list backlog tasks and move them onto the board
//! - `complete` - archive every task in the Done column
//! - `home` / `quit`
//!
//! Data is stored in `~/.kb/settings.json`; the log goes to `kb.log` beside it.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use clap::Parser;
use log::{error, info, warn};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

pub mod cli;
pub mod cmd;
pub mod error;
pub mod fields;
pub mod project;
pub mod settings;
pub mod signals;
pub mod store;
pub mod task;
pub mod tui {
    pub mod app;
    pub mod board;
    pub mod board_view;
    pub mod colors;
    pub mod command;
    pub mod enums;
    pub mod geometry;
    pub mod input;
    pub mod keys;
    pub mod menu;
    pub mod task_form;
    pub mod utils;
}

use cli::Cli;
use cmd::*;
use store::Store;

fn default_settings_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".kb").join("settings.json")
}

/// Log to `kb.log` next to the settings file. Logging is best effort.
fn init_logging(settings_path: &Path, verbose: bool) {
    let dir = settings_path.parent().unwrap_or_else(|| Path::new("."));
    if fs::create_dir_all(dir).is_err() {
        return;
    }
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    if let Ok(log_file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("kb.log"))
    {
        let _ = WriteLogger::init(level, log_config, log_file);
    }
}

fn main() {
    let cli = Cli::parse();

    if cli.wants_help() {
        cmd_help();
        return;
    }

    let settings_path = cli.settings.clone().unwrap_or_else(default_settings_path);
    init_logging(&settings_path, cli.verbose);
    info!("kb {} starting", env!("CARGO_PKG_VERSION"));
    if !cli.args.is_empty() {
        warn!("Ignoring arguments {:?}; opening the main menu", cli.args);
    }

    let mut store = match Store::open(&settings_path) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Failed to open settings {}: {}", settings_path.display(), e);
            std::process::exit(1);
        }
    };

    if let Err(e) = signals::install() {
        warn!("Could not install signal handlers: {e}");
    }

    if let Err(e) = cmd_menu(&mut store) {
        error!("Terminal error: {e}");
        eprintln!("Error running kb: {e}");
        std::process::exit(1);
    }
    info!("kb exited normally");
}
