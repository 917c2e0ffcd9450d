//! Command-line arguments
//!
//! Global options apply to every subcommand and take precedence over the
//! configuration file. Subcommands map one-to-one onto scan workflow actions.

use crate::core::validation::validate_sha256;
use crate::core::styles::palette_to_clap;
use clap::{ArgAction, CommandFactory, FromArgMatches, Parser, Subcommand};
use std::path::PathBuf;

pub const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];
pub const LOG_FORMATS: [&str; 3] = ["text", "ext", "json"];

#[derive(Parser, Debug, Clone)]
#[command(name = "vtdesk")]
#[command(about = "Submit files to VirusTotal and review their analysis")]
#[command(version)]
pub struct Args {
    /// Configuration file path
    #[arg(short = 'c', long = "config-file", value_name = "FILE", global = true)]
    pub config_file: Option<PathBuf>,

    /// Directory holding the API key and scan history
    #[arg(short = 'd', long = "data-dir", value_name = "DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Analysis service base URL
    #[arg(short = 'u', long = "base-url", value_name = "URL", global = true)]
    pub base_url: Option<String>,

    /// Log level
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = LOG_LEVELS, global = true)]
    pub log_level: Option<String>,

    /// Log output format
    #[arg(short = 'o', long = "log-format", value_name = "FORMAT", value_parser = LOG_FORMATS, global = true)]
    pub log_format: Option<String>,

    /// Log file path (use 'none' to disable file logging)
    #[arg(short = 'f', long = "log-file", value_name = "FILE", global = true)]
    pub log_file: Option<PathBuf>,

    /// Force coloured output
    #[arg(long = "color", action = ArgAction::SetTrue, conflicts_with = "no_color", global = true)]
    pub color: bool,

    /// Disable coloured output
    #[arg(long = "no-color", action = ArgAction::SetTrue, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show a file's name, extension and size without uploading it
    Select {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Upload a file for analysis and record its hash on success
    Upload {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Fetch the analysis report for a hash (defaults to the latest upload)
    Report {
        #[arg(value_name = "HASH", value_parser = validate_sha256, conflicts_with = "last")]
        hash: Option<String>,

        /// Use the most recent hash from the scan history
        #[arg(long = "last")]
        last: bool,

        /// Also list the engines that flagged the file
        #[arg(short = 'e', long = "engines")]
        engines: bool,
    },

    /// List previously uploaded hashes, most recent last
    History {
        /// Show full hashes instead of a 12-character prefix
        #[arg(long = "full")]
        full: bool,

        /// Erase the scan history
        #[arg(long = "clear", conflicts_with = "full")]
        clear: bool,
    },

    /// Manage the stored API key
    Key {
        #[command(subcommand)]
        action: KeyAction,
    },

    /// Show version and build information
    About,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// Store a new API key, replacing any previous one
    Set {
        #[arg(value_name = "TOKEN")]
        token: String,
    },
    /// Show the stored API key, masked
    Show,
    /// Remove the stored API key
    Clear,
}

impl Args {
    /// Parse the process arguments, colouring help output when enabled
    ///
    /// Exits the process with clap's usage message on invalid input.
    pub fn parse_with_styles(help_color: bool) -> Self {
        let matches = Self::command()
            .styles(palette_to_clap(help_color))
            .get_matches();
        Self::from_arg_matches(&matches).unwrap_or_else(|e| e.exit())
    }

    /// Explicit colour choice, if either flag was given
    pub fn color_override(&self) -> Option<bool> {
        match (self.color, self.no_color) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }

    /// Log file from the command line, with `none`/`-` meaning "no file"
    ///
    /// The outer `Option` is `None` when the flag was not given at all.
    pub fn log_file_override(&self) -> Option<Option<PathBuf>> {
        self.log_file.as_ref().map(|path| {
            let raw = path.to_string_lossy();
            if raw.eq_ignore_ascii_case("none") || raw == "-" {
                None
            } else {
                Some(path.clone())
            }
        })
    }
}
