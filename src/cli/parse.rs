//! CLI parse: clap types for confcell. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// confcell CLI - inspect and edit typed JSON config files
#[derive(Parser, Debug)]
#[command(name = "confcell")]
#[command(about = "Inspect and edit typed JSON config files through a schema")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Settings file (layered over the global settings file)
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Configs directory store files are resolved against
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Schema file describing the store's values
    #[arg(long)]
    pub schema: Option<PathBuf>,

    /// Store file, relative to the configs directory (overrides the schema's `file`)
    #[arg(long)]
    pub file: Option<String>,

    /// Carry the default instead of the unsaved value across a load
    #[arg(long)]
    pub legacy_unsaved: bool,

    /// Enable debug logging
    #[arg(long)]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Reconcile the file with the schema and report what changed
    Load {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// List every value with its type, current value and default
    List {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Print one value
    Get {
        key: String,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Set a value and save the file
    Set {
        key: String,
        /// JSON literal; anything that is not valid JSON is taken as a string
        value: String,
    },
    /// Reset a value to its default and save the file
    Reset { key: String },
    /// Overwrite the file with every default
    WriteDefaults,
    /// Print the resolved path of the store file
    Path,
}
