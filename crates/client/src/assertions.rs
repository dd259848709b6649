//! Response assertion utilities
//!
//! Every assertion returns `Result<(), AssertionError>`; the error's
//! `Display` carries the whole diagnostic (failing segment, expected vs.
//! actual, available keys, truncated body), so a test only needs to
//! `unwrap`/`expect` the result to fail with a useful message. A body that
//! is not valid JSON is always a distinct failure, never an empty document.

use apicheck_domain::{json_type_name, path, NavigationError, ResponseSpec};
use serde_json::Value;
use thiserror::Error;

/// Bytes of response body included in truncated previews.
const BODY_PREVIEW_LIMIT: usize = 500;

/// A single mismatching field between payload and response body.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldMismatch {
    /// The payload key that did not match.
    pub key: String,
    /// The value the payload carried.
    pub expected: Value,
    /// The value found in the response body, if any.
    pub actual: Option<Value>,
}

impl std::fmt::Display for FieldMismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.actual {
            Some(actual) => write!(f, "'{}': expected {}, got {}", self.key, self.expected, actual),
            None => write!(f, "'{}': expected {}, key missing", self.key, self.expected),
        }
    }
}

/// An assertion against a response failed.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AssertionError {
    /// The body was required as JSON but did not decode.
    #[error("response from {url} is not valid JSON ({reason}); body: {preview}")]
    NotJson {
        /// Request URL, for locating the failing call.
        url: String,
        /// Parser diagnostic.
        reason: String,
        /// Truncated response body.
        preview: String,
    },

    /// The status code did not match.
    #[error("expected status {expected}, got {actual} from {url}; body: {preview}")]
    StatusMismatch {
        /// Expected status code.
        expected: u16,
        /// Actual status code.
        actual: u16,
        /// Request URL.
        url: String,
        /// Truncated response body.
        preview: String,
    },

    /// A dot-path expression could not be resolved against the body.
    #[error("path '{path}' failed: {source}; full body: {body}")]
    Navigation {
        /// The full path expression.
        path: String,
        /// Which segment broke and why.
        #[source]
        source: NavigationError,
        /// The decoded body, for context.
        body: String,
    },

    /// The resolved value did not equal the expected one.
    #[error(
        "expected {expected} ({expected_type}) at path '{path}', \
         got {actual} ({actual_type}); full body: {body}"
    )]
    ValueMismatch {
        /// The path that was resolved.
        path: String,
        /// Expected value.
        expected: Value,
        /// JSON type of the expected value.
        expected_type: &'static str,
        /// Actual resolved value.
        actual: Value,
        /// JSON type of the actual value.
        actual_type: &'static str,
        /// The decoded body, for context.
        body: String,
    },

    /// The body decoded to something other than an object.
    #[error("expected a JSON object from {url}, got {kind}")]
    NotAnObject {
        /// Request URL.
        url: String,
        /// JSON type actually found.
        kind: &'static str,
    },

    /// One or more required keys are absent from the body.
    #[error("missing expected keys: [{}]; available keys: [{}]", .missing.join(", "), .available.join(", "))]
    MissingKeys {
        /// Every key that was required but absent.
        missing: Vec<String>,
        /// Keys present in the body.
        available: Vec<String>,
    },

    /// One or more payload fields are not echoed by the body.
    #[error("payload mismatch in response: {}; full body: {body}", format_mismatches(.mismatches))]
    PayloadMismatch {
        /// Every mismatching field.
        mismatches: Vec<FieldMismatch>,
        /// The decoded body, for context.
        body: String,
    },

    /// The expected error message was not found in the response.
    #[error("expected error message '{expected}' not found in response; body: {preview}")]
    ErrorMessageMissing {
        /// The message that was expected.
        expected: String,
        /// Truncated response body.
        preview: String,
    },
}

fn format_mismatches(mismatches: &[FieldMismatch]) -> String {
    mismatches
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

fn decode_body(response: &ResponseSpec) -> Result<Value, AssertionError> {
    response.body_as_json().map_err(|e| AssertionError::NotJson {
        url: response.request_url.clone(),
        reason: e.reason,
        preview: response.body_preview(BODY_PREVIEW_LIMIT),
    })
}

fn decode_object(
    response: &ResponseSpec,
) -> Result<serde_json::Map<String, Value>, AssertionError> {
    match decode_body(response)? {
        Value::Object(map) => Ok(map),
        other => Err(AssertionError::NotAnObject {
            url: response.request_url.clone(),
            kind: json_type_name(&other),
        }),
    }
}

/// Asserts that the response carries the expected status code.
///
/// # Errors
///
/// Fails naming the request URL and a truncated response body.
pub fn assert_status_code(
    response: &ResponseSpec,
    expected: u16,
) -> Result<(), AssertionError> {
    tracing::info!(expected, actual = response.status, "verify status code");
    if response.status == expected {
        return Ok(());
    }
    Err(AssertionError::StatusMismatch {
        expected,
        actual: response.status,
        url: response.request_url.clone(),
        preview: response.body_preview(BODY_PREVIEW_LIMIT),
    })
}

/// Asserts that the value at a dot-path in the JSON body equals `expected`.
///
/// Comparison is deep structural equality over the decoded JSON, so
/// `{"id": 2}` never equals `{"id": "2"}`.
///
/// # Errors
///
/// Fails distinctly when the body is not JSON, when any path segment cannot
/// be resolved (carrying the failing segment, the trail before it, and the
/// context at that level), or when the resolved value differs from
/// `expected` (carrying both values and their JSON types).
pub fn assert_json_value(
    response: &ResponseSpec,
    json_path: &str,
    expected: &Value,
) -> Result<(), AssertionError> {
    tracing::info!(path = json_path, %expected, "verify JSON value");
    let body = decode_body(response)?;

    let actual = path::resolve(&body, json_path).map_err(|e| AssertionError::Navigation {
        path: json_path.to_owned(),
        source: e,
        body: body.to_string(),
    })?;

    if actual == expected {
        return Ok(());
    }
    Err(AssertionError::ValueMismatch {
        path: json_path.to_owned(),
        expected: expected.clone(),
        expected_type: json_type_name(expected),
        actual: actual.clone(),
        actual_type: json_type_name(actual),
        body: body.to_string(),
    })
}

/// Asserts that the JSON body is an object containing every key in `keys`.
///
/// # Errors
///
/// Fails listing every missing key at once, not just the first, plus the
/// keys actually available.
pub fn assert_json_keys_exist(
    response: &ResponseSpec,
    keys: &[&str],
) -> Result<(), AssertionError> {
    tracing::info!(?keys, "verify JSON keys exist");
    let map = decode_object(response)?;

    let missing: Vec<String> = keys
        .iter()
        .filter(|key| !map.contains_key(**key))
        .map(|key| (*key).to_owned())
        .collect();

    if missing.is_empty() {
        return Ok(());
    }
    Err(AssertionError::MissingKeys {
        missing,
        available: map.keys().cloned().collect(),
    })
}

/// Asserts that every key/value pair of `payload` is echoed by the body.
///
/// Extra keys in the body (generated ids, timestamps) are ignored.
///
/// # Errors
///
/// Fails listing every mismatching key with expected vs. actual, not just
/// the first. Also fails when `payload` or the body is not a JSON object.
pub fn assert_payload_in_response(
    response: &ResponseSpec,
    payload: &Value,
) -> Result<(), AssertionError> {
    tracing::info!("verify request payload is reflected in response");
    let Value::Object(payload_map) = payload else {
        return Err(AssertionError::NotAnObject {
            url: response.request_url.clone(),
            kind: json_type_name(payload),
        });
    };
    let body_map = decode_object(response)?;

    let mismatches: Vec<FieldMismatch> = payload_map
        .iter()
        .filter(|(key, expected)| body_map.get(key.as_str()) != Some(*expected))
        .map(|(key, expected)| FieldMismatch {
            key: key.clone(),
            expected: expected.clone(),
            actual: body_map.get(key).cloned(),
        })
        .collect();

    if mismatches.is_empty() {
        return Ok(());
    }
    Err(AssertionError::PayloadMismatch {
        mismatches,
        body: Value::Object(body_map).to_string(),
    })
}

/// Asserts that an error response carries the expected message.
///
/// The structured top-level `error` field is authoritative when present;
/// otherwise the check falls back to a substring match on the raw body.
/// The demo service's error shape is undocumented, so the loose fallback
/// is kept deliberately.
///
/// # Errors
///
/// Fails when neither the `error` field nor the raw body contains
/// `expected`.
pub fn assert_error_message(
    response: &ResponseSpec,
    expected: &str,
) -> Result<(), AssertionError> {
    tracing::info!(expected, "verify error message");
    let structured_hit = response
        .body_as_json()
        .ok()
        .as_ref()
        .and_then(|body| body.get("error"))
        .and_then(Value::as_str)
        .is_some_and(|message| message.contains(expected));

    if structured_hit || response.body.contains(expected) {
        return Ok(());
    }
    Err(AssertionError::ErrorMessageMissing {
        expected: expected.to_owned(),
        preview: response.body_preview(BODY_PREVIEW_LIMIT),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::collections::HashMap;
    use std::time::Duration;

    fn response(status: u16, body: &str) -> ResponseSpec {
        ResponseSpec::new(
            status,
            "https://reqres.in/api/users",
            HashMap::new(),
            body.as_bytes().to_vec(),
            Duration::from_millis(20),
        )
    }

    #[test]
    fn test_status_code_pass_and_fail() {
        let ok = response(200, "{}");
        assert!(assert_status_code(&ok, 200).is_ok());

        let err = assert_status_code(&ok, 404).unwrap_err();
        assert!(matches!(
            err,
            AssertionError::StatusMismatch { expected: 404, actual: 200, .. }
        ));
        let message = err.to_string();
        assert!(message.contains("https://reqres.in/api/users"));
    }

    #[test]
    fn test_json_value_resolves_nested_path() {
        let body = r#"{"data": {"id": 2, "first_name": "Janet"}}"#;
        let resp = response(200, body);
        assert!(assert_json_value(&resp, "data.id", &json!(2)).is_ok());
        assert!(assert_json_value(&resp, "data.first_name", &json!("Janet")).is_ok());
    }

    #[test]
    fn test_json_value_not_json_is_distinct() {
        let resp = response(200, "<html>gateway error</html>");
        let err = assert_json_value(&resp, "data.id", &json!(2)).unwrap_err();
        assert!(matches!(err, AssertionError::NotJson { .. }));
    }

    #[test]
    fn test_json_value_missing_key_names_segment() {
        let resp = response(200, r#"{"data": {"id": 2}}"#);
        let err = assert_json_value(&resp, "data.name", &json!("x")).unwrap_err();
        match err {
            AssertionError::Navigation { source, .. } => {
                assert_eq!(
                    source,
                    NavigationError::MissingKey {
                        key: "name".to_owned(),
                        prefix: "root.data".to_owned(),
                        available: vec!["id".to_owned()],
                    }
                );
            }
            other => panic!("expected navigation failure, got {other:?}"),
        }
    }

    #[test]
    fn test_json_value_structural_equality_is_strict() {
        // {"id": 2} at the path must not equal {"id": "2"}
        let resp = response(200, r#"{"data": {"id": 2}}"#);
        let err = assert_json_value(&resp, "data", &json!({"id": "2"})).unwrap_err();
        match err {
            AssertionError::ValueMismatch {
                expected_type,
                actual_type,
                ..
            } => {
                assert_eq!(expected_type, "object");
                assert_eq!(actual_type, "object");
            }
            other => panic!("expected value mismatch, got {other:?}"),
        }

        assert!(assert_json_value(&resp, "data", &json!({"id": 2})).is_ok());
    }

    #[test]
    fn test_json_value_mismatch_names_types() {
        let resp = response(200, r#"{"page": "2"}"#);
        let err = assert_json_value(&resp, "page", &json!(2)).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("number"));
        assert!(message.contains("string"));
        assert!(message.contains(r#"{"page":"2"}"#));
    }

    #[test]
    fn test_json_value_array_index() {
        let resp = response(200, r#"{"data": [{"email": "janet.weaver@reqres.in"}]}"#);
        assert!(
            assert_json_value(&resp, "data.0.email", &json!("janet.weaver@reqres.in")).is_ok()
        );

        let err = assert_json_value(&resp, "data.5.email", &json!("x")).unwrap_err();
        assert!(matches!(
            err,
            AssertionError::Navigation {
                source: NavigationError::IndexOutOfBounds { index: 5, len: 1, .. },
                ..
            }
        ));
    }

    #[test]
    fn test_keys_exist_reports_only_missing() {
        let resp = response(200, r#"{"data": {"id": 1}, "page": 1}"#);
        assert!(assert_json_keys_exist(&resp, &["data", "page"]).is_ok());

        let err = assert_json_keys_exist(&resp, &["data", "ghost"]).unwrap_err();
        assert_eq!(
            err,
            AssertionError::MissingKeys {
                missing: vec!["ghost".to_owned()],
                available: vec!["data".to_owned(), "page".to_owned()],
            }
        );
    }

    #[test]
    fn test_keys_exist_rejects_non_object_body() {
        let resp = response(200, "[1, 2, 3]");
        let err = assert_json_keys_exist(&resp, &["data"]).unwrap_err();
        assert!(matches!(err, AssertionError::NotAnObject { kind: "array", .. }));
    }

    #[test]
    fn test_payload_echo_passes_with_extra_keys() {
        let resp = response(
            201,
            r#"{"name": "morpheus", "job": "leader", "id": "123", "createdAt": "2026-01-01T00:00:00Z"}"#,
        );
        let payload = json!({"name": "morpheus", "job": "leader"});
        assert!(assert_payload_in_response(&resp, &payload).is_ok());
    }

    #[test]
    fn test_payload_mismatch_names_only_bad_keys() {
        let resp = response(201, r#"{"name": "morpheus", "job": "zion resident"}"#);
        let payload = json!({"name": "morpheus", "job": "leader"});
        let err = assert_payload_in_response(&resp, &payload).unwrap_err();
        match err {
            AssertionError::PayloadMismatch { mismatches, .. } => {
                assert_eq!(mismatches.len(), 1);
                assert_eq!(mismatches[0].key, "job");
                assert_eq!(mismatches[0].expected, json!("leader"));
                assert_eq!(mismatches[0].actual, Some(json!("zion resident")));
            }
            other => panic!("expected payload mismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_payload_mismatch_reports_missing_key() {
        let resp = response(201, r#"{"name": "morpheus"}"#);
        let payload = json!({"name": "morpheus", "job": "leader"});
        let err = assert_payload_in_response(&resp, &payload).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("'job'"));
        assert!(message.contains("key missing"));
    }

    #[test]
    fn test_error_message_structured_field_wins() {
        let resp = response(400, r#"{"error": "Missing name"}"#);
        assert!(assert_error_message(&resp, "Missing name").is_ok());
    }

    #[test]
    fn test_error_message_falls_back_to_raw_text() {
        let resp = response(400, "plain text: Missing name");
        assert!(assert_error_message(&resp, "Missing name").is_ok());
    }

    #[test]
    fn test_error_message_absent_fails() {
        let resp = response(400, r#"{"error": "Missing job"}"#);
        let err = assert_error_message(&resp, "Missing name").unwrap_err();
        assert!(matches!(err, AssertionError::ErrorMessageMissing { .. }));
    }
}
