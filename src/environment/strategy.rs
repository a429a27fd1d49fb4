// postman-env: Postman Environments API Client
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Conflict-resolution strategies for merging environment values.

use std::fmt;

use crate::error::{MergeError, ResolverError};

/// Caller-supplied resolver for colliding keys.
///
/// Invoked as `resolver(current, new)` and returns the value to keep.
pub type Resolver = Box<dyn Fn(&str, &str) -> Result<String, ResolverError> + Send + Sync>;

/// Policy for resolving key collisions when combining two value maps.
pub enum MergeStrategy {
    /// On collision, retain the value from the base environment.
    KeepCurrent,
    /// On collision, take the incoming environment's value.
    UseNew,
    /// On collision, ask a caller-supplied resolver. Invoked exactly once
    /// per colliding key; a failure aborts the merge as a whole.
    Resolver(Resolver),
}

impl MergeStrategy {
    /// Wraps a closure as a custom resolution strategy.
    pub fn resolver<F>(resolve: F) -> Self
    where
        F: Fn(&str, &str) -> Result<String, ResolverError> + Send + Sync + 'static,
    {
        Self::Resolver(Box::new(resolve))
    }

    /// Resolves a single key collision.
    pub(crate) fn resolve(
        &self,
        key: &str,
        current: &str,
        incoming: &str,
    ) -> Result<String, MergeError> {
        match self {
            Self::KeepCurrent => Ok(current.to_string()),
            Self::UseNew => Ok(incoming.to_string()),
            Self::Resolver(resolve) => {
                resolve(current, incoming).map_err(|source| MergeError::Resolver {
                    key: key.to_string(),
                    source,
                })
            }
        }
    }
}

impl fmt::Debug for MergeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::KeepCurrent => f.write_str("KeepCurrent"),
            Self::UseNew => f.write_str("UseNew"),
            Self::Resolver(_) => f.write_str("Resolver(..)"),
        }
    }
}
