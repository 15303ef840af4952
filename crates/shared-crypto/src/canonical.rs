//! # Canonical JSON
//!
//! Deterministic serialization used as hash input.
//!
//! ## Rules
//!
//! - Object keys sorted lexicographically at every depth
//! - Arrays keep their order
//! - Excluded keys dropped at every depth
//! - No whitespace
//!
//! The writer does not depend on `serde_json`'s map ordering, so enabling
//! `preserve_order` anywhere in the dependency graph cannot change a hash.

use crate::CryptoError;
use serde::Serialize;
use serde_json::Value;
use std::fmt::Write;

/// Keys excluded when hashing an envelope.
pub const ENVELOPE_EXCLUDED: &[&str] = &["hash", "signature", "envelopeId"];

/// Keys excluded when hashing a router message.
pub const MESSAGE_EXCLUDED: &[&str] = &["hash", "signature", "id"];

/// Keys excluded from nothing; used for log chain hashing.
pub const NONE_EXCLUDED: &[&str] = &[];

/// Canonical form of `value` with `excluded` keys removed.
pub fn canonicalize(value: &Value, excluded: &[&str]) -> Value {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map
                .keys()
                .filter(|k| !excluded.contains(&k.as_str()))
                .collect();
            keys.sort();
            let mut out = serde_json::Map::new();
            for key in keys {
                out.insert(key.clone(), canonicalize(&map[key], excluded));
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(items.iter().map(|v| canonicalize(v, excluded)).collect()),
        other => other.clone(),
    }
}

/// Canonical JSON text of an already-parsed value.
pub fn canonical_string(value: &Value, excluded: &[&str]) -> String {
    let mut out = String::new();
    write_canonical(&mut out, value, excluded);
    out
}

/// Canonical JSON text of any serialisable value.
pub fn canonical_json<T: Serialize>(value: &T, excluded: &[&str]) -> Result<String, CryptoError> {
    let value =
        serde_json::to_value(value).map_err(|e| CryptoError::Serialization(e.to_string()))?;
    Ok(canonical_string(&value, excluded))
}

fn write_canonical(out: &mut String, value: &Value, excluded: &[&str]) {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map
                .keys()
                .filter(|k| !excluded.contains(&k.as_str()))
                .collect();
            keys.sort();
            out.push('{');
            for (i, key) in keys.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_string(out, key);
                out.push(':');
                write_canonical(out, &map[key], excluded);
            }
            out.push('}');
        }
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(out, item, excluded);
            }
            out.push(']');
        }
        Value::String(s) => write_string(out, s),
        Value::Number(n) => {
            let _ = write!(out, "{n}");
        }
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Null => out.push_str("null"),
    }
}

fn write_string(out: &mut String, s: &str) {
    // Display on a string value yields the escaped, quoted JSON literal.
    let _ = write!(out, "{}", Value::String(s.to_owned()));
}
