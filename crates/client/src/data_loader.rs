//! Data-driven test case loading
//!
//! Reads an ordered sequence of [`TestCaseRecord`]s from a YAML file before
//! the run begins. Each record drives one invocation of the generic
//! create-resource scenario.

use std::path::Path;

use apicheck_domain::TestCaseRecord;

use crate::config_loader::read_file;
use crate::error::LoadError;

/// Loads test case records from a YAML file.
///
/// # Errors
///
/// Returns [`LoadError::NotFound`] when the file is absent and
/// [`LoadError::Parse`] when it is not a YAML sequence of records.
pub fn load_test_cases(path: &Path) -> Result<Vec<TestCaseRecord>, LoadError> {
    tracing::debug!(path = %path.display(), "loading test case data");
    let text = read_file(path)?;
    let cases: Vec<TestCaseRecord> =
        serde_yaml::from_str(&text).map_err(|e| LoadError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    tracing::debug!(count = cases.len(), "test cases loaded");
    Ok(cases)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn test_load_ordered_records() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "- test_id: create_user_success\n  description: valid payload\n  payload:\n    name: morpheus\n    job: leader\n  expected_status: 201\n  expected_keys: [id, createdAt]\n- description: empty payload rejected\n  payload: {{}}\n  expected_status: 400\n  expected_error_msg: Missing name\n"
        )
        .unwrap();

        let cases = load_test_cases(file.path()).unwrap();
        assert_eq!(cases.len(), 2);
        assert_eq!(cases[0].label(0), "create_user_success");
        assert_eq!(cases[0].payload, json!({"name": "morpheus", "job": "leader"}));
        assert_eq!(cases[1].label(1), "data_index_1");
        assert_eq!(cases[1].expected_error_msg.as_deref(), Some("Missing name"));
    }

    #[test]
    fn test_non_sequence_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not_a_sequence: true").unwrap();

        let err = load_test_cases(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
    }
}
