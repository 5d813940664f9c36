// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Beacon and task identifiers.
//!
//! Both are 128-bit random ids rendered as 32-character lowercase hex on
//! the wire. Parsing is permissive about the textual form (`uuid` accepts
//! hyphenated and simple renderings) so ids survive whatever an operator
//! pastes in.

use thiserror::Error;

/// Error from parsing an id out of a path segment or JSON key.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid {what}: {value:?}")]
pub struct ParseIdError {
    what: &'static str,
    value: String,
}

/// Define a newtype ID wrapper around `uuid::Uuid`.
///
/// Generates `new()` for random v4 generation, `parse()` for permissive
/// parsing, `Display` in the simple-hex wire form, `FromStr`, and string
/// serde via Display/parse.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        pub struct $name:ident;
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(uuid::Uuid);

        impl $name {
            /// Generate a new random id.
            pub fn new() -> Self {
                Self(uuid::Uuid::new_v4())
            }

            /// Parse an id from any `uuid` textual form.
            pub fn parse(s: &str) -> Result<Self, ParseIdError> {
                uuid::Uuid::parse_str(s).map(Self).map_err(|_| ParseIdError {
                    what: stringify!($name),
                    value: s.to_string(),
                })
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0.simple())
            }
        }

        impl std::str::FromStr for $name {
            type Err = ParseIdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = <String as serde::Deserialize>::deserialize(deserializer)?;
                Self::parse(&s).map_err(serde::de::Error::custom)
            }
        }
    };
}

define_id! {
    /// Identity of one beacon session.
    ///
    /// Assigned by the server at bootstrap, or adopted from whatever id an
    /// agent (or operator) first presents — the registry never rejects an
    /// unseen id.
    pub struct BeaconId;
}

define_id! {
    /// Identity of one queued task, unique within the process.
    pub struct TaskId;
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
