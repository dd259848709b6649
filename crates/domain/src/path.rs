//! Dot-path navigation over decoded JSON
//!
//! Resolves expressions like `data.0.email` against a [`serde_json::Value`]:
//! each segment is an object key or, when the cursor is an array, a base-10
//! index. Resolution is a typed descent returning a borrowed value or a
//! [`NavigationError`] that names the segment that broke and the trail
//! walked up to it.
//!
//! There is no escaping syntax for literal dots inside keys; such keys
//! cannot be addressed. Known limitation.

use serde_json::Value;
use thiserror::Error;

/// Why a path expression could not be resolved.
///
/// Every variant carries `prefix`, the trail of segments successfully walked
/// before the failure (`root` when the first segment failed), so a failing
/// test names the exact level that broke.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NavigationError {
    /// The cursor is an object but the segment is not one of its keys.
    #[error("key '{key}' not found at '{prefix}'; available keys: [{}]", .available.join(", "))]
    MissingKey {
        /// The segment that failed to match.
        key: String,
        /// Trail walked before the failure.
        prefix: String,
        /// Keys present at the failing level.
        available: Vec<String>,
    },

    /// The cursor is an array and the segment parsed as an index outside it.
    /// Negative indices always land here; there is no from-the-end syntax.
    #[error("index {index} out of bounds for array of length {len} at '{prefix}'")]
    IndexOutOfBounds {
        /// The parsed index, signed so a negative segment is echoed as written.
        index: i64,
        /// Trail walked before the failure.
        prefix: String,
        /// Length of the array at the failing level.
        len: usize,
    },

    /// The cursor is an array but the segment is not a base-10 integer.
    #[error("segment '{segment}' is not a valid index for array at '{prefix}'")]
    NotAnIndex {
        /// The non-numeric segment.
        segment: String,
        /// Trail walked before the failure.
        prefix: String,
    },

    /// The cursor is a scalar or null and segments remain.
    #[error("cannot descend into {kind} with segment '{segment}' at '{prefix}'")]
    ScalarDescent {
        /// The segment that could not be applied.
        segment: String,
        /// Trail walked before the failure.
        prefix: String,
        /// JSON type of the scalar cursor.
        kind: &'static str,
    },
}

/// Returns the JSON type name of a value, for diagnostics.
#[must_use]
pub const fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Resolves a dot-separated path against a decoded JSON value.
///
/// The empty path resolves to `root` itself. Array positions are rendered
/// as `[N]` in the error trail to keep index access visually distinct from
/// key access.
///
/// # Errors
///
/// Returns a [`NavigationError`] naming the first segment that could not be
/// applied, the trail walked before it, and the context at that level
/// (available keys or array length).
pub fn resolve<'a>(root: &'a Value, path: &str) -> Result<&'a Value, NavigationError> {
    if path.is_empty() {
        return Ok(root);
    }

    let mut cursor = root;
    let mut prefix = String::from("root");

    for segment in path.split('.') {
        match cursor {
            Value::Object(map) => {
                cursor = map.get(segment).ok_or_else(|| NavigationError::MissingKey {
                    key: segment.to_owned(),
                    prefix: prefix.clone(),
                    available: map.keys().cloned().collect(),
                })?;
                prefix.push('.');
                prefix.push_str(segment);
            }
            Value::Array(items) => {
                // Negative values parse fine and fail the bounds check below,
                // so the failure names the array length, not the syntax.
                let index: i64 =
                    segment.parse().map_err(|_| NavigationError::NotAnIndex {
                        segment: segment.to_owned(),
                        prefix: prefix.clone(),
                    })?;
                cursor = usize::try_from(index)
                    .ok()
                    .and_then(|i| items.get(i))
                    .ok_or_else(|| NavigationError::IndexOutOfBounds {
                        index,
                        prefix: prefix.clone(),
                        len: items.len(),
                    })?;
                prefix.push_str(&format!(".[{index}]"));
            }
            scalar => {
                return Err(NavigationError::ScalarDescent {
                    segment: segment.to_owned(),
                    prefix,
                    kind: json_type_name(scalar),
                });
            }
        }
    }

    Ok(cursor)
}
