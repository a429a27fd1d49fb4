// postman-env: Postman Environments API Client
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{ApiError, ClientError, ClientResult, ConfigError, MergeError};

#[test]
fn test_api_error_display() {
    let err = ApiError {
        name: "AuthenticationError".to_string(),
        message: "Invalid API Key.".to_string(),
    };
    assert_eq!(err.to_string(), "AuthenticationError: Invalid API Key.");
}

#[test]
fn test_api_error_decodes_from_envelope_shape() {
    let err: ApiError =
        serde_json::from_str(r#"{"name":"instanceNotFoundError","message":"not found"}"#).unwrap();
    assert_eq!(err.name, "instanceNotFoundError");
    assert_eq!(err.message, "not found");
}

#[test]
fn test_config_error_display() {
    let err = ConfigError::MissingKey {
        key: "api_key".to_string(),
    };
    assert_eq!(err.to_string(), "missing required config key 'api_key'");
}

#[test]
fn test_client_error_boxes_sub_errors() {
    let err: ClientError = ApiError {
        name: "paramMissingError".to_string(),
        message: "Parameter is missing in the request.".to_string(),
    }
    .into();

    match err {
        ClientError::Api(boxed) => assert_eq!(boxed.name, "paramMissingError"),
        other => panic!("Expected ClientError::Api, got {other:?}"),
    }
}

#[test]
fn test_merge_error_carries_key_and_source() {
    let err = MergeError::Resolver {
        key: "HOST".to_string(),
        source: "values disagree".into(),
    };
    assert_eq!(
        err.to_string(),
        "resolver failed for key 'HOST': values disagree"
    );

    let err: ClientError = err.into();
    assert!(matches!(err, ClientError::Merge(_)));
}

#[test]
fn test_client_error_size() {
    // ClientError should be reasonably small
    // Box<str> variants (MissingUid, Other) are 16 bytes (fat pointer: ptr + len)
    // With discriminant + alignment = 24 bytes
    let size = std::mem::size_of::<ClientError>();
    assert!(size <= 24, "ClientError is {size} bytes, expected <= 24");
}

#[test]
fn test_client_result_size() {
    let size = std::mem::size_of::<ClientResult<()>>();
    assert!(size <= 24, "ClientResult<()> is {size} bytes, expected <= 24");
}
