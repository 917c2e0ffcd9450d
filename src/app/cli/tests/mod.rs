//! Tests for the CLI module
//!
//! Argument parsing, configuration precedence and output formatting.
