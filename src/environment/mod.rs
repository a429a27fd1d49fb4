// postman-env: Postman Environments API Client
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Environment model and value merging.
//!
//! ```text
//! Environment { name, values: BTreeMap, uid? }
//!        |
//!        +-- merge_values(other, strategy)    in-place
//!        +-- merging_values(other, strategy)  copy-returning
//!        +-- with_cleared_values()            name/uid kept, values = {}
//!
//! Collision resolution per key: strategy(current, new) -> resolved
//!   KeepCurrent  current wins
//!   UseNew       incoming wins
//!   Resolver     caller closure, failure aborts the whole merge
//! ```
//!
//! The wire shape (`values` as an array of key/value pairs) lives in
//! [`wire`]; in memory the values are always a map, so duplicate keys are
//! impossible by construction.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use crate::error::MergeError;

pub mod strategy;
pub(crate) mod wire;


use strategy::MergeStrategy;

/// A named set of string key/value variables held by the remote system.
///
/// Constructed locally by the caller or decoded from a remote response.
/// The client never mutates an environment in place; updates always go
/// through [`merge_values`](Self::merge_values) or by writing a new copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    /// Environment name.
    pub name: String,
    /// Variables, keyed by name. `BTreeMap` keeps serialization deterministic.
    pub values: BTreeMap<String, String>,
    /// Remote identity. Absent for purely local instances.
    pub uid: Option<String>,
}

impl Environment {
    /// Creates a local environment with the given name and values.
    #[must_use]
    pub fn new(name: impl Into<String>, values: BTreeMap<String, String>) -> Self {
        Self {
            name: name.into(),
            values,
            uid: None,
        }
    }

    /// Attaches a remote identity.
    #[must_use]
    pub fn with_uid(mut self, uid: impl Into<String>) -> Self {
        self.uid = Some(uid.into());
        self
    }

    /// Returns a copy with `values` emptied, `name` and `uid` preserved.
    ///
    /// Used by the delete-then-recreate workaround for replacing the
    /// *current* value set, which the remote API has no primitive for.
    #[must_use]
    pub fn with_cleared_values(&self) -> Self {
        Self {
            name: self.name.clone(),
            values: BTreeMap::new(),
            uid: self.uid.clone(),
        }
    }

    /// Merges values from `other` into `self` under the given strategy.
    ///
    /// Keys present in only one environment carry through unchanged; keys
    /// present in both resolve via `strategy(current, new)`. `name` and
    /// `uid` are unaffected.
    ///
    /// The merged map is fully computed before being committed, so a
    /// resolver failure leaves `self` untouched.
    ///
    /// # Errors
    ///
    /// Returns a [`MergeError`] if a caller-supplied resolver fails for a
    /// colliding key.
    pub fn merge_values(
        &mut self,
        other: &Self,
        strategy: &MergeStrategy,
    ) -> Result<(), MergeError> {
        let mut merged = self.values.clone();

        for (key, incoming) in &other.values {
            match merged.entry(key.clone()) {
                Entry::Occupied(mut slot) => {
                    let resolved = strategy.resolve(key, slot.get(), incoming)?;
                    slot.insert(resolved);
                }
                Entry::Vacant(slot) => {
                    slot.insert(incoming.clone());
                }
            }
        }

        self.values = merged;
        Ok(())
    }

    /// Returns a new environment produced by merging `other` into `self`.
    ///
    /// Neither `self` nor `other` is mutated.
    ///
    /// # Errors
    ///
    /// Returns a [`MergeError`] if a caller-supplied resolver fails for a
    /// colliding key.
    pub fn merging_values(
        &self,
        other: &Self,
        strategy: &MergeStrategy,
    ) -> Result<Self, MergeError> {
        let mut copy = self.clone();
        copy.merge_values(other, strategy)?;
        Ok(copy)
    }
}
