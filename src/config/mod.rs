// postman-env: Postman Environments API Client
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. postman-env.toml (cwd, optional)
//! 3. --config FILE (repeatable)
//! 4. POSTMAN_* env vars
//! 5. CLI overrides (--api-key, --uid)
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! POSTMAN_API_KEY=PMAK-...       → api_key
//! POSTMAN_BASE_URL=http://...    → base_url
//! POSTMAN_ENVIRONMENT_UID=1-...  → environment_uid
//! ```

pub mod loader;


use serde::{Deserialize, Serialize};

use crate::client::DEFAULT_BASE_URL;
use crate::error::ConfigError;

/// Complete application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// API key forwarded as `x-api-key` on every request.
    pub api_key: Option<String>,
    /// Base URL of the remote API.
    pub base_url: String,
    /// Uid of the environment operations are bound to by default.
    pub environment_uid: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            environment_uid: None,
        }
    }
}

impl Config {
    /// The configured API key.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingKey` if no key came from any source.
    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        self.api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| ConfigError::MissingKey {
                key: "api_key".to_string(),
            })
    }

    /// The configured environment uid.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingKey` if no uid came from any source.
    pub fn require_environment_uid(&self) -> Result<&str, ConfigError> {
        self.environment_uid
            .as_deref()
            .filter(|uid| !uid.is_empty())
            .ok_or_else(|| ConfigError::MissingKey {
                key: "environment_uid".to_string(),
            })
    }
}
