//! 応答契約検証のユニットテスト

use reqwest::StatusCode;
use spoilcheck::report::StepFailure;
use spoilcheck::workflow::Expectation;

#[test]
fn status_mismatch_is_a_contract_mismatch() {
    let expect = Expectation::with_message(StatusCode::OK, "Successfully edited");
    let failure = expect
        .check(StatusCode::NOT_FOUND, r#"{"msg":"No spoilers..."}"#)
        .unwrap_err();
    assert!(matches!(failure, StepFailure::ContractMismatch { .. }));
}

#[test]
fn matching_status_and_message_pass() {
    let expect = Expectation::with_message(StatusCode::OK, "Successfully edited");
    let story_id = expect
        .check(StatusCode::OK, r#"{"msg":"Successfully edited"}"#)
        .unwrap();
    assert!(story_id.is_none());
}

#[test]
fn message_mismatch_is_a_contract_mismatch() {
    let expect = Expectation::with_message(StatusCode::OK, "Successfully edited");
    let failure = expect
        .check(StatusCode::OK, r#"{"msg":"Something else"}"#)
        .unwrap_err();
    assert!(matches!(failure, StepFailure::ContractMismatch { .. }));
}

#[test]
fn message_field_casing_does_not_matter() {
    let expect = Expectation::with_message(StatusCode::OK, "Deleted successfully!");
    assert!(expect
        .check(StatusCode::OK, r#"{"Msg":"Deleted successfully!"}"#)
        .is_ok());
}

#[test]
fn created_contract_extracts_the_story_id() {
    let expect = Expectation::created("Successfully created!");
    let story_id = expect
        .check(
            StatusCode::CREATED,
            r#"{"msg":"Successfully created!","storyId":"abc-123"}"#,
        )
        .unwrap();
    assert_eq!(story_id.as_deref(), Some("abc-123"));
}

#[test]
fn created_contract_requires_a_non_empty_story_id() {
    let expect = Expectation::created("Successfully created!");

    let failure = expect
        .check(StatusCode::CREATED, r#"{"msg":"Successfully created!"}"#)
        .unwrap_err();
    assert!(matches!(failure, StepFailure::ContractMismatch { .. }));

    let failure = expect
        .check(
            StatusCode::CREATED,
            r#"{"msg":"Successfully created!","storyId":"  "}"#,
        )
        .unwrap_err();
    assert!(matches!(failure, StepFailure::ContractMismatch { .. }));
}

#[test]
fn unparseable_body_is_malformed_not_mismatch() {
    let expect = Expectation::with_message(StatusCode::OK, "Successfully edited");
    let failure = expect
        .check(StatusCode::OK, "<html>gateway timeout</html>")
        .unwrap_err();
    match failure {
        StepFailure::MalformedResponse { raw, .. } => {
            // 診断のために生ボディを携える
            assert!(raw.contains("gateway timeout"));
        }
        other => panic!("expected MalformedResponse, got {other:?}"),
    }
}

#[test]
fn status_only_contract_never_parses_the_body() {
    let expect = Expectation::status_only(StatusCode::BAD_REQUEST);
    assert!(expect
        .check(StatusCode::BAD_REQUEST, "not json at all")
        .is_ok());
}

#[test]
fn body_marker_matching_is_case_insensitive() {
    let expect = Expectation::with_marker(StatusCode::OK, "title");
    assert!(expect
        .check(StatusCode::OK, r#"[{"Title":"My Test Story"}]"#)
        .is_ok());

    let failure = expect.check(StatusCode::OK, "[]").unwrap_err();
    assert!(matches!(failure, StepFailure::ContractMismatch { .. }));
}
