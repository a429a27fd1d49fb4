// postman-env: Postman Environments API Client
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Remote environment client.
//!
//! ```text
//! PostmanClient::new(api_key)
//!   .base_url() .http_client() .for_environment(uid)
//!        |
//!        +------------+----------------+------------------+
//!        v            v                v                  v
//!   list_          get_          update_by_        update_by_
//!   environments   environment   replacing()       merging()
//!                                 |                 |
//!                                 v                 v
//!               Initial: one PUT            get -> merge -> replace
//!               Current: PUT(cleared),
//!                        then PUT(real)
//!
//! Every call: Content-Type: application/json + x-api-key header
//! Global client: OnceLock, connection pool, keep-alive
//! ```
//!
//! Composite operations chain dependent calls strictly in order; there are
//! no retries and no mutual exclusion across overlapping callers, so
//! last-write-wins at the remote is possible between a read and the write
//! that follows it.

use std::sync::OnceLock;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::environment::Environment;
use crate::environment::strategy::MergeStrategy;
use crate::environment::wire::{
    EnvironmentEnvelope, EnvironmentListEnvelope, ErrorEnvelope, WireEnvironment,
};
use crate::error::{ClientError, ClientResult, DecodeError};


/// Default base URL of the remote API.
pub const DEFAULT_BASE_URL: &str = "https://api.getpostman.com";

/// Global HTTP client - initialized once, reused across all clients.
/// Falls back to a basic client if custom configuration fails.
fn global_client() -> &'static Client {
    static CLIENT: OnceLock<Client> = OnceLock::new();
    CLIENT.get_or_init(|| {
        Client::builder()
            .user_agent(format!("postman-env/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| Client::new())
    })
}

/// Which remote value set an update replaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpdateTarget {
    /// The environment's *initial* variables, as originally defined.
    #[default]
    Initial,
    /// The environment's *current* variables. The remote API has no
    /// primitive for this, so it is emulated by recreating the environment.
    Current,
}

/// Client for the remote environments API.
///
/// One parameterized client covers both addressing shapes: construct it
/// unbound for account-wide operations ([`list_environments`](Self::list_environments),
/// [`update`](Self::update)), or bind it to a single environment with
/// [`for_environment`](Self::for_environment) for the per-environment
/// operations.
///
/// # Example
/// ```ignore
/// use postman_env::client::{PostmanClient, UpdateTarget};
///
/// let client = PostmanClient::new("api-key").for_environment("uid");
/// let remote = client.get_environment().await?;
/// client.update_by_replacing(&local, UpdateTarget::Initial).await?;
/// ```
#[derive(Debug, Clone)]
pub struct PostmanClient {
    http: Client,
    base_url: String,
    api_key: String,
    environment_uid: Option<String>,
}

impl PostmanClient {
    /// Creates a client with the given API key and default settings.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: global_client().clone(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            environment_uid: None,
        }
    }

    /// Overrides the base URL (without a trailing slash).
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        let mut url = url.into();
        while url.ends_with('/') {
            url.pop();
        }
        self.base_url = url;
        self
    }

    /// Uses a caller-supplied `reqwest` client instead of the shared one.
    /// Timeouts and pooling are the transport's concern, configured here.
    #[must_use]
    pub fn http_client(mut self, client: Client) -> Self {
        self.http = client;
        self
    }

    /// Returns a copy of this client bound to the given environment uid.
    ///
    /// All per-environment operations on the returned client address that
    /// environment.
    #[must_use]
    pub fn for_environment(&self, uid: impl Into<String>) -> Self {
        let mut bound = self.clone();
        bound.environment_uid = Some(uid.into());
        bound
    }

    fn bound_uid(&self) -> ClientResult<&str> {
        self.environment_uid.as_deref().ok_or_else(|| {
            ClientError::MissingUid(
                "client is not bound to an environment; use for_environment()".into(),
            )
        })
    }

    fn environments_url(&self) -> String {
        format!("{}/environments", self.base_url)
    }

    fn environment_url(&self, uid: &str) -> String {
        format!("{}/environments/{uid}", self.base_url)
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.http
            .request(method, url)
            .header(CONTENT_TYPE, "application/json")
            .header("x-api-key", &self.api_key)
    }

    /// Lists all environments visible to the API key.
    ///
    /// List entries carry identity and name only; their value sets decode
    /// as empty maps.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] on a non-success response and
    /// [`ClientError::Decode`] on a malformed body.
    pub async fn list_environments(&self) -> ClientResult<Vec<Environment>> {
        debug!("listing environments");
        let response = self
            .request(Method::GET, &self.environments_url())
            .send()
            .await?;
        let envelope: EnvironmentListEnvelope =
            read_success(response, "environment list envelope").await?;
        Ok(envelope
            .environments
            .into_iter()
            .map(Environment::from)
            .collect())
    }

    /// Fetches the bound environment's remote representation.
    ///
    /// The values are the *initial* environment variables, not the current.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingUid`] if the client is unbound,
    /// [`ClientError::Api`] on a non-success response, and
    /// [`ClientError::Decode`] on a malformed body.
    pub async fn get_environment(&self) -> ClientResult<Environment> {
        let uid = self.bound_uid()?;
        debug!(uid, "fetching environment");
        let response = self
            .request(Method::GET, &self.environment_url(uid))
            .send()
            .await?;
        let envelope: EnvironmentEnvelope = read_success(response, "environment envelope").await?;
        Ok(envelope.environment.into())
    }

    /// Replaces the bound environment's *initial* values with those of
    /// `new_environment`. Issues a single PUT without reading first.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingUid`] if the client is unbound and
    /// [`ClientError::Api`] on a non-success response.
    pub async fn replace_initial_values(&self, new_environment: &Environment) -> ClientResult<()> {
        let uid = self.bound_uid()?;
        debug!(uid, name = %new_environment.name, "replacing initial values");
        let body = EnvironmentEnvelope {
            environment: WireEnvironment::for_write(new_environment),
        };
        let response = self
            .request(Method::PUT, &self.environment_url(uid))
            .json(&body)
            .send()
            .await?;
        read_ok(response).await
    }

    /// Replaces the bound environment's *current* values with those of
    /// `new_environment`.
    ///
    /// The remote API has no atomic primitive for this, so the environment
    /// is recreated in two sequential writes: first a copy with an emptied
    /// value set, then the real environment. The second write only runs
    /// after the first succeeds. If the second write fails, the remote
    /// environment is left with empty values; there is no compensation.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingUid`] if the client is unbound and
    /// [`ClientError::Api`] if either write is rejected.
    pub async fn replace_current_values(&self, new_environment: &Environment) -> ClientResult<()> {
        let cleared = new_environment.with_cleared_values();
        self.replace_initial_values(&cleared).await?;
        self.replace_initial_values(new_environment).await
    }

    /// Replaces the targeted value set of the bound environment.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`replace_initial_values`](Self::replace_initial_values)
    /// and [`replace_current_values`](Self::replace_current_values).
    pub async fn update_by_replacing(
        &self,
        new_environment: &Environment,
        target: UpdateTarget,
    ) -> ClientResult<()> {
        match target {
            UpdateTarget::Initial => self.replace_initial_values(new_environment).await,
            UpdateTarget::Current => self.replace_current_values(new_environment).await,
        }
    }

    /// Fetches the bound environment, merges `other` into it under the
    /// given strategy, and writes the result to the targeted value set.
    ///
    /// Not atomic: the remote state may change between the read and the
    /// write, in which case the write wins.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Merge`] if a caller-supplied resolver fails
    /// (no write is issued), plus the failure modes of
    /// [`get_environment`](Self::get_environment) and
    /// [`update_by_replacing`](Self::update_by_replacing).
    pub async fn update_by_merging(
        &self,
        other: &Environment,
        strategy: &MergeStrategy,
        target: UpdateTarget,
    ) -> ClientResult<()> {
        let current = self.get_environment().await?;
        let merged = current.merging_values(other, strategy)?;
        self.update_by_replacing(&merged, target).await
    }

    /// Updates an environment addressed by its own `uid`, replacing its
    /// initial values.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingUid`] if `environment.uid` is `None`
    /// and [`ClientError::Api`] on a non-success response.
    pub async fn update(&self, environment: &Environment) -> ClientResult<()> {
        let uid = environment
            .uid
            .as_deref()
            .ok_or_else(|| ClientError::MissingUid("environment has no uid".into()))?;
        self.for_environment(uid)
            .replace_initial_values(environment)
            .await
    }
}

/// Decodes a success body as `T`; a non-success response decodes the error
/// envelope into [`ClientError::Api`].
async fn read_success<T: DeserializeOwned>(
    response: Response,
    what: &'static str,
) -> ClientResult<T> {
    let status = response.status();
    let body = response.bytes().await?;

    if status.is_success() {
        serde_json::from_slice(&body)
            .map_err(|source| DecodeError::Json { what, source }.into())
    } else {
        Err(decode_api_error(&body))
    }
}

/// Discards a success body; a non-success response decodes the error
/// envelope into [`ClientError::Api`].
async fn read_ok(response: Response) -> ClientResult<()> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }
    let body = response.bytes().await?;
    Err(decode_api_error(&body))
}

fn decode_api_error(body: &[u8]) -> ClientError {
    match serde_json::from_slice::<ErrorEnvelope>(body) {
        Ok(envelope) => envelope.error.into(),
        Err(source) => DecodeError::Json {
            what: "error envelope",
            source,
        }
        .into(),
    }
}
