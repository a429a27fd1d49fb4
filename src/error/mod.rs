// postman-env: Postman Environments API Client
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!              ClientError (boxed variants)
//!                     |
//!     +------+-------+-------+--------+---------+
//!     |      |       |       |        |         |
//!     v      v       v       v        v         v
//!    Api  Decode   Merge  Transport Config  MissingUid/Other
//!    Box   Box      Box   Box<reqwest>  Box   Box<str>
//!
//! Api     name/message pair from the remote error envelope
//! Decode  malformed JSON in a response body
//! Merge   a caller-supplied resolver failed mid-merge
//! Config  missing/invalid configuration values
//! ```

use thiserror::Error;

/// Convenience alias for `anyhow::Result`, used by CLI command handlers.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`ClientError`].
pub type ClientResult<T> = std::result::Result<T, ClientError>;

/// Failure produced by a caller-supplied merge resolver.
pub type ResolverError = Box<dyn std::error::Error + Send + Sync>;

/// Top-level error type for client operations.
///
/// All sub-errors are boxed to keep the enum small on the stack.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The remote API answered with a non-success status and an error envelope.
    #[error("postman api error: {0}")]
    Api(#[from] Box<ApiError>),

    /// A response body could not be decoded.
    #[error("decode error: {0}")]
    Decode(#[from] Box<DecodeError>),

    /// A value merge failed.
    #[error("merge error: {0}")]
    Merge(#[from] Box<MergeError>),

    /// The HTTP transport failed before a response was available.
    #[error("transport error: {0}")]
    Transport(Box<reqwest::Error>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// An operation needed an environment uid and none was available.
    #[error("no environment uid: {0}")]
    MissingUid(Box<str>),

    /// Generic error with message.
    #[error("{0}")]
    Other(Box<str>),
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for ClientError {
                fn from(err: $error) -> Self {
                    ClientError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    ApiError => Api,
    DecodeError => Decode,
    MergeError => Merge,
    ConfigError => Config,
    reqwest::Error => Transport,
}

// --- Remote API Errors ---

/// Error reported by the remote API.
///
/// Decoded from the `{"error": {"name", "message"}}` envelope whenever a
/// response status is not success. The `name` is whatever category the remote
/// reports and is not interpreted further.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, Error)]
#[error("{name}: {message}")]
pub struct ApiError {
    pub name: String,
    pub message: String,
}

// --- Decode Errors ---

/// Response body decoding errors.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// A response body was not the expected JSON shape.
    #[error("invalid {what} in response body: {source}")]
    Json {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

// --- Merge Errors ---

/// Value merge errors.
#[derive(Debug, Error)]
pub enum MergeError {
    /// A caller-supplied resolver failed for a colliding key.
    /// The merge is aborted as a whole; no partial merge is committed.
    #[error("resolver failed for key '{key}': {source}")]
    Resolver {
        key: String,
        #[source]
        source: ResolverError,
    },
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a configuration file.
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration sources.
    #[error("failed to parse config: {message}")]
    ParseError { message: String },

    /// Missing required configuration key.
    #[error("missing required config key '{key}'")]
    MissingKey { key: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

#[cfg(test)]
mod tests;
