//! CLI API - public exports for the CLI module

pub use super::args::{Args, Command, KeyAction};
pub use super::config::{ConfigError, FileConfig, Settings};
