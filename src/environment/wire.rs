// postman-env: Postman Environments API Client
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Wire shapes for the remote API.
//!
//! ```text
//! {"environment":  {"name", "values": [{"key","value"}, ...]}}  single
//! {"environments": [{"uid", "name", ...}, ...]}                 list
//! {"error":        {"name", "message"}}                         failure
//! ```
//!
//! `values` is wire-encoded as an array of key/value pairs, not a native
//! map; the [`kv_pairs`] module converts to and from map form at the
//! boundary. List entries carry no `values`, which decodes as an empty map.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Environment;
use crate::error::ApiError;

/// Single environment envelope.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct EnvironmentEnvelope {
    pub(crate) environment: WireEnvironment,
}

/// List envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct EnvironmentListEnvelope {
    pub(crate) environments: Vec<WireEnvironment>,
}

/// Error envelope for non-success responses.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorEnvelope {
    pub(crate) error: ApiError,
}

/// Environment as it appears on the wire.
///
/// `uid` shows up in reads but is never serialized on write bodies; the
/// environment being written is already addressed by the request URL.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct WireEnvironment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) uid: Option<String>,
    pub(crate) name: String,
    #[serde(default, with = "kv_pairs")]
    pub(crate) values: BTreeMap<String, String>,
}

impl WireEnvironment {
    /// Wire form of an environment for a write body.
    pub(crate) fn for_write(environment: &Environment) -> Self {
        Self {
            uid: None,
            name: environment.name.clone(),
            values: environment.values.clone(),
        }
    }
}

impl From<WireEnvironment> for Environment {
    fn from(wire: WireEnvironment) -> Self {
        Self {
            name: wire.name,
            values: wire.values,
            uid: wire.uid,
        }
    }
}

/// Serde adapter between map-form values and the wire array of pairs.
pub(crate) mod kv_pairs {
    use std::collections::BTreeMap;

    use serde::ser::SerializeSeq;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize)]
    struct PairRef<'a> {
        key: &'a str,
        value: &'a str,
    }

    #[derive(Deserialize)]
    struct Pair {
        key: String,
        value: String,
    }

    pub(crate) fn serialize<S>(
        values: &BTreeMap<String, String>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(values.len()))?;
        for (key, value) in values {
            seq.serialize_element(&PairRef {
                key: key.as_str(),
                value: value.as_str(),
            })?;
        }
        seq.end()
    }

    pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let pairs = Vec::<Pair>::deserialize(deserializer)?;
        Ok(pairs
            .into_iter()
            .map(|pair| (pair.key, pair.value))
            .collect())
    }
}
