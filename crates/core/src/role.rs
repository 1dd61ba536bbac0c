// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Role identifiers.
//!
//! A [`Role`] is a stable, operator-declared name (e.g. `architect`,
//! `developer`), unique within a run. Unlike the generated entity IDs in
//! [`crate::id`], roles are not random — they come from the Roster and are
//! used as map keys throughout the State Store.

use std::borrow::Borrow;
use std::fmt;

/// A validated, non-empty role name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Role(String);

/// A role name failed validation (empty or all-whitespace).
#[derive(Debug, Clone, thiserror::Error)]
#[error("role name must be non-empty")]
pub struct InvalidRole;

impl Role {
    pub fn new(name: impl Into<String>) -> Result<Self, InvalidRole> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(InvalidRole);
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Role {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Role {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Role {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Role {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl TryFrom<String> for Role {
    type Error = InvalidRole;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Role::new(value)
    }
}

impl TryFrom<&str> for Role {
    type Error = InvalidRole;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Role::new(value)
    }
}

impl serde::Serialize for Role {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for Role {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Role::new(s).map_err(serde::de::Error::custom)
    }
}

#[cfg(any(test, feature = "test-support"))]
impl From<&str> for Role {
    /// Infallible conversion for test fixtures; panics on an invalid name.
    fn from(s: &str) -> Self {
        Role::new(s).expect("valid role name in test fixture")
    }
}

#[cfg(test)]
#[path = "role_tests.rs"]
mod tests;
