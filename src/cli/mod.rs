//! Command-line interface module
//!
//! This module handles CLI argument parsing using Clap and the subcommand glue.

pub mod args;
pub mod commands;

pub use args::{Cli, Commands, ScanArgs, SendTestEmailArgs, ServeArgs};
