//! Command-line interface for launchdash.
//!
//! This module provides the CLI structure for the `launchdash` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::logging::Verbosity;

pub use commands::{ConfigCommand, OutputFormat, QueryCommand, ServeCommand, SitesCommand};

/// launchdash - Interactive launch records dashboard
///
/// Loads a CSV of historical launches and serves a page with a site
/// selector, a payload range control, and two charts that follow them.
#[derive(Debug, Parser)]
#[command(name = "launchdash")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Path to the launch CSV (overrides config)
    #[arg(short, long, global = true, value_name = "CSV")]
    pub dataset: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start the dashboard web server
    Serve(ServeCommand),

    /// List the launch sites in the dataset
    Sites(SitesCommand),

    /// Compute the charts for one selection and print them
    Query(QueryCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.verbose)
    }

    /// Apply command-line overrides on top of loaded configuration.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(path) = &self.dataset {
            config.dataset.path.clone_from(path);
        }
        if let Command::Serve(serve) = &self.command {
            if let Some(bind) = &serve.bind {
                config.server.bind.clone_from(bind);
            }
            if let Some(port) = serve.port {
                config.server.port = port;
            }
        }
    }
}
