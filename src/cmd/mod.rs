// postman-env: Postman Environments API Client
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::run_* handlers
//!   list, show, push, merge
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;
use tracing::info;

use crate::cli::{MergeArgs, PushArgs};
use crate::client::PostmanClient;
use crate::config::Config;
use crate::environment::Environment;
use crate::error::Result;


/// Local environment file shape: values in map form, unlike the wire shape.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct EnvironmentFile {
    name: String,
    #[serde(default)]
    values: BTreeMap<String, String>,
}

/// Builds an unbound client from configuration.
fn build_client(config: &Config) -> Result<PostmanClient> {
    let api_key = config.require_api_key()?;
    Ok(PostmanClient::new(api_key).base_url(config.base_url.clone()))
}

/// Builds a client bound to the configured environment uid.
fn build_bound_client(config: &Config) -> Result<PostmanClient> {
    let uid = config.require_environment_uid()?;
    Ok(build_client(config)?.for_environment(uid))
}

/// Reads a local environment file in map form.
async fn load_environment_file(path: &Path) -> Result<Environment> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read environment file {}", path.display()))?;
    let file: EnvironmentFile = serde_json::from_str(&content)
        .with_context(|| format!("invalid environment file {}", path.display()))?;
    Ok(Environment::new(file.name, file.values))
}

/// Main handler for the list command.
///
/// # Errors
///
/// Returns an error if the API key is missing or the remote call fails.
pub async fn run_list_command(config: &Config) -> Result<()> {
    let client = build_client(config)?;
    let environments = client.list_environments().await?;

    if environments.is_empty() {
        println!("No environments found");
        return Ok(());
    }

    for environment in &environments {
        match &environment.uid {
            Some(uid) => println!("{uid}  {}", environment.name),
            None => println!("{}", environment.name),
        }
    }
    Ok(())
}

/// Main handler for the show command.
///
/// # Errors
///
/// Returns an error if the API key or environment uid is missing, or the
/// remote call fails.
pub async fn run_show_command(config: &Config) -> Result<()> {
    let client = build_bound_client(config)?;
    let environment = client.get_environment().await?;

    println!("{}", environment.name);
    for (key, value) in &environment.values {
        println!("  {key}={value}");
    }
    Ok(())
}

/// Main handler for the push command.
///
/// # Errors
///
/// Returns an error if the local file cannot be read or the remote write
/// fails.
pub async fn run_push_command(args: &PushArgs, config: &Config) -> Result<()> {
    let client = build_bound_client(config)?;
    let local = load_environment_file(&args.file).await?;

    info!(
        name = %local.name,
        count = local.values.len(),
        target = ?args.target,
        "pushing environment"
    );
    client.update_by_replacing(&local, args.target.into()).await?;

    println!("Replaced {:?} values with {}", args.target, args.file.display());
    Ok(())
}

/// Main handler for the merge command.
///
/// # Errors
///
/// Returns an error if the local file cannot be read, the merge fails, or a
/// remote call fails.
pub async fn run_merge_command(args: &MergeArgs, config: &Config) -> Result<()> {
    let client = build_bound_client(config)?;
    let local = load_environment_file(&args.file).await?;

    info!(
        name = %local.name,
        count = local.values.len(),
        target = ?args.target,
        strategy = ?args.strategy,
        "merging environment"
    );
    client
        .update_by_merging(&local, &args.strategy.into(), args.target.into())
        .await?;

    println!(
        "Merged {} into the remote environment ({:?} values, {:?} strategy)",
        args.file.display(),
        args.target,
        args.strategy
    );
    Ok(())
}
