// postman-env: Postman Environments API Client
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Global CLI options available for all commands.
//!
//! # Option Precedence
//!
//! ```text
//! --config FILE   ← Additional config files (can repeat)
//! --api-key KEY   ← API key override (or POSTMAN_API_KEY)
//! --uid UID       ← Environment uid override
//! --log-level N   ← Console verbosity (0-5)
//! --log-file FILE ← Mirror logs to a file
//!
//! Precedence: CLI flags > env vars > --config > postman-env.toml > defaults
//! ```

use clap::Args;
use std::path::PathBuf;

/// Global options available for all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalOptions {
    /// Path to additional TOML configuration file(s).
    /// Can be specified multiple times.
    #[arg(short = 'c', long = "config", value_name = "FILE", action = clap::ArgAction::Append)]
    pub configs: Vec<PathBuf>,

    /// Postman API key, forwarded as x-api-key on every request.
    #[arg(long = "api-key", value_name = "KEY", env = "POSTMAN_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Uid of the environment to operate on.
    #[arg(short = 'u', long = "uid", value_name = "UID")]
    pub uid: Option<String>,

    /// Console log level (0=silent, 1=errors, 2=warnings, 3=info, 4=debug, 5=trace).
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=5)
    )]
    pub log_level: Option<u8>,

    /// Path to log file.
    #[arg(long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}
