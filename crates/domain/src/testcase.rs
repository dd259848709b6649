//! Data-driven test case records
//!
//! One record per scenario in `data/user_creation_data.yaml`. Records are
//! loaded before the run begins and each drives one invocation of the
//! generic create-resource scenario.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Externally supplied description of one data-driven scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCaseRecord {
    /// Stable identifier used purely for labeling, never for logic.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_id: Option<String>,
    /// Human-readable description of the scenario.
    pub description: String,
    /// Request body to send.
    pub payload: Value,
    /// Expected HTTP status code.
    pub expected_status: u16,
    /// Keys that must exist in a successful response body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_keys: Option<Vec<String>>,
    /// Error message expected in a failed response body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_error_msg: Option<String>,
}

impl TestCaseRecord {
    /// Returns the label for this case: its `test_id`, or a positional
    /// fallback when none was supplied.
    #[must_use]
    pub fn label(&self, index: usize) -> String {
        self.test_id
            .clone()
            .unwrap_or_else(|| format!("data_index_{index}"))
    }

    /// Returns true when the case expects a 2xx outcome.
    #[must_use]
    pub const fn expects_success(&self) -> bool {
        self.expected_status / 100 == 2
    }
}
