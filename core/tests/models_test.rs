// Unit tests for models and token providers

use drowsiness_monitor_core::*;
use serde_json::json;

// ==================== PredictRequest Tests ====================

#[test]
fn test_predict_request_serializes_image_field() {
    let request = PredictRequest::new("data:image/jpeg;base64,AAAA");
    let value = serde_json::to_value(&request).unwrap();

    assert_eq!(value, json!({ "image": "data:image/jpeg;base64,AAAA" }));
}

#[test]
fn test_predict_request_from_bytes() {
    let request = PredictRequest::from_bytes(&[0xFF, 0xD8, 0xFF], image::DEFAULT_IMAGE_MIME);

    assert_eq!(request.image, "data:image/jpeg;base64,/9j/");
}

// ==================== SessionRecord Tests ====================

#[test]
fn test_session_record_omits_missing_client_session_id() {
    let session = SessionRecord {
        start_time: "2024-05-01T10:00:00Z".to_string(),
        end_time: "2024-05-01T10:30:00Z".to_string(),
        duration: 1800.0,
        awake_count: 120,
        drowsy_count: 4,
        alert_count: 1,
        avg_confidence: 87.5,
        client_session_id: None,
    };

    let value = serde_json::to_value(&session).unwrap();
    assert!(value.get("client_session_id").is_none());
    assert_eq!(value["drowsy_count"], 4);
    assert_eq!(value["avg_confidence"], 87.5);
}

#[test]
fn test_session_record_deserialize() {
    let value = json!({
        "start_time": "a",
        "end_time": "b",
        "duration": 12,
        "awake_count": 1,
        "drowsy_count": 2,
        "alert_count": 0,
        "avg_confidence": 50.0,
        "client_session_id": "abc"
    });

    let session: SessionRecord = serde_json::from_value(value).unwrap();
    assert_eq!(session.duration, 12.0);
    assert_eq!(session.client_session_id.as_deref(), Some("abc"));
}

// ==================== FrameRecord Tests ====================

#[test]
fn test_frame_record_with_client_session_only() {
    let frame = FrameRecord {
        session_id: None,
        client_session_id: Some("tmp-1".to_string()),
        frame_data: "AAAA".to_string(),
        timestamp: "2024-05-01T10:00:01Z".to_string(),
        prediction: "awake".to_string(),
        confidence: 91.2,
        frame_number: 3,
    };

    let value = serde_json::to_value(&frame).unwrap();
    assert!(value.get("session_id").is_none());
    assert_eq!(value["client_session_id"], "tmp-1");
    assert_eq!(value["frame_number"], 3);
}

// ==================== Credentials Tests ====================

#[test]
fn test_credentials_serialize() {
    let credentials = Credentials::new("alice", "secret");
    let value = serde_json::to_value(&credentials).unwrap();

    assert_eq!(value, json!({ "username": "alice", "password": "secret" }));
}

// ==================== TokenProvider Tests ====================

#[test]
fn test_no_token() {
    assert_eq!(NoToken.token(), None);
}

#[test]
fn test_static_token() {
    assert_eq!(StaticToken("abc".to_string()).token().as_deref(), Some("abc"));
}

#[test]
fn test_empty_static_token_is_absent() {
    assert_eq!(StaticToken(String::new()).token(), None);
}

#[test]
fn test_closure_provider_is_read_on_every_call() {
    use std::cell::Cell;

    let calls = Cell::new(0);
    let provider = || {
        calls.set(calls.get() + 1);
        Some(format!("token-{}", calls.get()))
    };

    assert_eq!(provider.token().as_deref(), Some("token-1"));
    assert_eq!(provider.token().as_deref(), Some("token-2"));
}

#[test]
fn test_auth_token_key() {
    assert_eq!(AUTH_TOKEN_KEY, "authToken");
}
