// postman-env: Postman Environments API Client
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Logging --> Command Dispatch
//!   Version | List | Show | Push | Merge
//! ```

use std::process::ExitCode;

use postman_env::cli::global::GlobalOptions;
use postman_env::cli::{self, Command};
use postman_env::cmd::{run_list_command, run_merge_command, run_push_command, run_show_command};
use postman_env::config::Config;
use postman_env::config::loader::ConfigLoader;
use postman_env::logging::{LogConfig, LogLevel, init_logging};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();

    let log_config = build_log_config(&cli.global);
    let _log_guard = match init_logging(&log_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    dispatch_command(&cli).await
}

fn build_log_config(global: &GlobalOptions) -> LogConfig {
    let console_level = global
        .log_level
        .and_then(LogLevel::from_u8)
        .unwrap_or(LogLevel::INFO);

    LogConfig::builder()
        .with_console_level(console_level)
        .maybe_with_log_file(global.log_file.as_ref().map(|p| p.display().to_string()))
        .build()
}

async fn dispatch_command(cli: &cli::Cli) -> ExitCode {
    let result = match &cli.command {
        Command::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Command::List => match load_config(&cli.global) {
            Ok(config) => run_list_command(&config).await,
            Err(e) => Err(e),
        },
        Command::Show => match load_config(&cli.global) {
            Ok(config) => run_show_command(&config).await,
            Err(e) => Err(e),
        },
        Command::Push(args) => match load_config(&cli.global) {
            Ok(config) => run_push_command(args, &config).await,
            Err(e) => Err(e),
        },
        Command::Merge(args) => match load_config(&cli.global) {
            Ok(config) => run_merge_command(args, &config).await,
            Err(e) => Err(e),
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn load_config(global: &GlobalOptions) -> postman_env::error::Result<Config> {
    let mut loader = ConfigLoader::new()
        .add_toml_file_optional("postman-env.toml")
        .with_env_prefix("POSTMAN");

    for config_path in &global.configs {
        loader = loader.add_toml_file(config_path);
    }

    if let Some(key) = &global.api_key {
        loader = loader.set("api_key", key.clone())?;
    }
    if let Some(uid) = &global.uid {
        loader = loader.set("environment_uid", uid.clone())?;
    }

    loader.build().map_err(|e| {
        eprintln!("Failed to load config: {e}");
        e
    })
}
