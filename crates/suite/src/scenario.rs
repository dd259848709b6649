//! Shared test scenarios
//!
//! The data-driven create-user flow: one generic function, invoked once per
//! [`TestCaseRecord`] loaded from the data file.

use apicheck_client::{
    assert_error_message, assert_json_keys_exist, assert_payload_in_response,
    assert_status_code, ApiClient, RequestOptions,
};
use apicheck_domain::TestCaseRecord;

use crate::SuiteError;

/// Runs one create-user case: POST the payload, check the expected status,
/// then either the success contract (payload echo plus expected keys) or
/// the failure contract (expected error message).
///
/// # Errors
///
/// Returns the transport error or the first failing assertion; callers turn
/// this into a test failure labeled with the record's id.
pub async fn run_create_user_case(
    client: &ApiClient,
    record: &TestCaseRecord,
) -> Result<(), SuiteError> {
    tracing::info!(description = %record.description, "starting create-user case");

    let options = RequestOptions::new().with_json(record.payload.clone());
    let response = client.post("/users", &options).await?;

    assert_status_code(&response, record.expected_status)?;

    if record.expects_success() {
        assert_payload_in_response(&response, &record.payload)?;
        if let Some(keys) = &record.expected_keys {
            let keys: Vec<&str> = keys.iter().map(String::as_str).collect();
            assert_json_keys_exist(&response, &keys)?;
        }
    } else if let Some(expected) = &record.expected_error_msg {
        assert_error_message(&response, expected)?;
    } else {
        tracing::info!("no error-message assertion defined for this failure case");
    }

    tracing::info!(description = %record.description, "create-user case finished");
    Ok(())
}
