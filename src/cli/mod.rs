// postman-env: Postman Environments API Client
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! postman-env [global options] <command>
//! version
//! list
//! show
//! push <file>  [--target initial|current]
//! merge <file> [--target initial|current] [--strategy keep-current|use-new]
//! ```

pub mod global;


use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::cli::global::GlobalOptions;
use crate::client::UpdateTarget;
use crate::environment::strategy::MergeStrategy;

/// Postman environment sync tool.
///
/// Synchronizes a local environment file (JSON, `{"name": ..., "values":
/// {"KEY": "VALUE", ...}}`) with an environment held by the Postman API.
#[derive(Debug, Parser)]
#[command(
    name = "postman-env",
    author,
    version,
    about = "Postman environment sync tool",
    long_about = "Synchronizes a local environment file with an environment held\n\
                  by the Postman API.\n\n\
                  The environment to operate on is taken from --uid, the\n\
                  POSTMAN_ENVIRONMENT_UID environment variable, or the\n\
                  environment_uid key in postman-env.toml. The API key is taken\n\
                  from --api-key, POSTMAN_API_KEY, or the api_key config key.",
    arg_required_else_help = true
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    Version,

    /// Lists all environments visible to the API key.
    List,

    /// Prints the configured environment's variables.
    Show,

    /// Replaces the remote environment's values with a local file's values.
    Push(PushArgs),

    /// Merges a local file's values into the remote environment.
    Merge(MergeArgs),
}

/// Arguments for the push command.
#[derive(Debug, Clone, Args)]
pub struct PushArgs {
    /// Path to the local environment file (JSON).
    pub file: PathBuf,

    /// Which remote value set to replace.
    #[arg(short = 't', long, value_enum, default_value_t = TargetArg::Initial)]
    pub target: TargetArg,
}

/// Arguments for the merge command.
#[derive(Debug, Clone, Args)]
pub struct MergeArgs {
    /// Path to the local environment file (JSON).
    pub file: PathBuf,

    /// Which remote value set to replace with the merged result.
    #[arg(short = 't', long, value_enum, default_value_t = TargetArg::Initial)]
    pub target: TargetArg,

    /// How to resolve keys present both locally and remotely.
    #[arg(short = 's', long, value_enum, default_value_t = StrategyArg::UseNew)]
    pub strategy: StrategyArg,
}

/// Update target selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TargetArg {
    /// Replace the initial variables.
    Initial,
    /// Replace the current variables (recreates the environment).
    Current,
}

impl From<TargetArg> for UpdateTarget {
    fn from(target: TargetArg) -> Self {
        match target {
            TargetArg::Initial => Self::Initial,
            TargetArg::Current => Self::Current,
        }
    }
}

/// Built-in conflict strategy selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    /// On collision, keep the remote value.
    KeepCurrent,
    /// On collision, take the local file's value.
    UseNew,
}

impl From<StrategyArg> for MergeStrategy {
    fn from(strategy: StrategyArg) -> Self {
        match strategy {
            StrategyArg::KeepCurrent => Self::KeepCurrent,
            StrategyArg::UseNew => Self::UseNew,
        }
    }
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version
/// information was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
