// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wire codec: the reversible obfuscation transform framing every sync body.
//!
//! A value is JSON-serialized, rendered as lowercase hex, and the character
//! sequence reversed. This is obfuscation only: it provides no
//! confidentiality, integrity, or authenticity, and must not be mistaken
//! for encryption. A hardened deployment would layer authenticated
//! encryption underneath as a separate transform; the framing contract
//! here stays as-is for wire compatibility.

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// Errors from encoding or decoding a wire token.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("unserializable payload: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("malformed hex in token: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("malformed payload: {0}")]
    Parse(#[source] serde_json::Error),
}

/// Encode a value into a wire token.
pub fn encode<T: Serialize>(value: &T) -> Result<String, CodecError> {
    let json = serde_json::to_vec(value).map_err(CodecError::Serialize)?;
    Ok(hex::encode(json).chars().rev().collect())
}

/// Decode a wire token into a JSON value.
///
/// An empty token decodes to an empty object rather than failing: an agent
/// with nothing to report sends an empty body. Malformed hex or JSON is a
/// [`CodecError`]; callers at the sync boundary treat that as "drop and
/// proceed with an empty update", never as a reason to fail the exchange.
pub fn decode(token: &str) -> Result<Value, CodecError> {
    if token.is_empty() {
        return Ok(Value::Object(Map::new()));
    }
    let forward: String = token.chars().rev().collect();
    let bytes = hex::decode(forward)?;
    serde_json::from_slice(&bytes).map_err(CodecError::Parse)
}

#[cfg(test)]
#[path = "codec_tests.rs"]
mod tests;
