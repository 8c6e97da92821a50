//! Argument parsing for the `confita` binary.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Conference store maintenance tool.
///
/// Database path and logging come from `CONFITA_DB_PATH`,
/// `CONFITA_LOG_LEVEL` and `CONFITA_LOG_DIR`.
#[derive(Debug, Parser)]
#[command(name = "confita", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// One CLI invocation.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// List all conferences, or only one owner's
    List {
        /// Restrict the listing to this owner
        owner: Option<String>,
    },
    /// Print one conference as JSON, or `null` when it does not exist
    Get {
        /// Conference id in `owner/name` form
        id: String,
    },
    /// Insert a conference record read from a JSON file
    Add {
        /// Path to the conference JSON
        file: PathBuf,
    },
    /// Replace an existing conference record with one read from a JSON file
    Update {
        /// Conference id in `owner/name` form
        id: String,
        /// Path to the conference JSON
        file: PathBuf,
    },
    /// Delete a conference
    Delete {
        /// Conference id in `owner/name` form
        id: String,
    },
    /// Print the core library version
    Version,
}
