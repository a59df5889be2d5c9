//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `check`: Compare every locale's dictionaries against the reference locale
//! - `scan`: Find translation keys referenced in source but absent from a locale
//! - `init`: Initialize keycheck configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Check(cmd)) => cmd.common.verbose,
            Some(Command::Scan(cmd)) => cmd.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Reference locale (overrides config file)
    #[arg(long)]
    pub reference_locale: Option<String>,

    /// Project root directory (overrides current directory)
    #[arg(long)]
    pub source_root: Option<PathBuf>,

    /// Locale dictionaries directory (overrides config file)
    #[arg(long)]
    pub messages_root: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct CheckCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Only check this locale
    #[arg(long)]
    pub locale: Option<String>,

    /// Only check this namespace
    #[arg(long, visible_alias = "ns")]
    pub namespace: Option<String>,

    /// Print a JSON report instead of the console report
    #[arg(long)]
    pub json: bool,

    /// Copy missing keys from the reference locale into target dictionaries
    #[arg(long)]
    pub fix: bool,
}

#[derive(Debug, Args)]
pub struct ScanCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Check references against this locale (default: reference locale)
    #[arg(long)]
    pub locale: Option<String>,

    /// Also report keys rendered from an inline fallback
    #[arg(long)]
    pub all: bool,

    /// Print a JSON report instead of the console report
    #[arg(long)]
    pub json: bool,

    /// Report dictionary keys never referenced in source
    #[arg(long)]
    pub unused: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check locale dictionaries for missing, extra and empty keys
    Check(CheckCommand),
    /// Scan source files for translation keys missing from a locale
    Scan(ScanCommand),
    /// Initialize a new .keycheckrc.json configuration file
    Init,
}
