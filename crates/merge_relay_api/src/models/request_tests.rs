//! Tests for request models

use super::*;

#[test]
fn test_absent_fields_decode_to_zero_values() {
    let payload: AcceptMergeRequestRequest = serde_json::from_str("{}").unwrap();
    assert_eq!(payload, AcceptMergeRequestRequest::default());
    assert!(!payload.auto_merge);
    assert!(!payload.delete_branch);
    assert!(!payload.squash);
    assert_eq!(payload.squash_message, "");
}

#[test]
fn test_full_payload_decodes_every_field() {
    let payload: AcceptMergeRequestRequest = serde_json::from_str(
        r#"{
            "auto_merge": true,
            "delete_branch": true,
            "squash_message": "tidy history",
            "squash": true
        }"#,
    )
    .unwrap();

    assert!(payload.auto_merge);
    assert!(payload.delete_branch);
    assert!(payload.squash);
    assert_eq!(payload.squash_message, "tidy history");
}

#[test]
fn test_unknown_fields_are_ignored() {
    // The plugin may send fields this server version does not know about.
    let payload: AcceptMergeRequestRequest =
        serde_json::from_str(r#"{"auto_merge": true, "future_flag": 1}"#).unwrap();
    assert!(payload.auto_merge);
}
