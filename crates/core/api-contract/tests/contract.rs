use api_contract::{
    CreateAlertRequest, CreateDeviceRequest, CreateTelemetryRequest, ErrorBody, LimitQuery,
    MessageResponse, UpdateDeviceRequest, INVALID_REQUEST,
};
use serde_json::{Value, json};

#[test]
fn error_body_shape() {
    let body = ErrorBody::new(INVALID_REQUEST, "name required");
    let value = serde_json::to_value(body).expect("serialize");
    assert_eq!(
        value,
        json!({ "error": "name required", "code": "INVALID.REQUEST" })
    );
}

#[test]
fn message_response_shape() {
    let value = serde_json::to_value(MessageResponse::new("device deleted")).expect("serialize");
    assert_eq!(value, json!({ "message": "device deleted" }));
}

#[test]
fn device_request_uses_type_key() {
    let payload = r#"{"name":"S1","type":"sensor","location":"L1","status":"online"}"#;
    let req: CreateDeviceRequest = serde_json::from_str(payload).expect("parse");
    assert_eq!(req.device_type.as_deref(), Some("sensor"));
    assert_eq!(req.status.as_deref(), Some("online"));
}

#[test]
fn update_request_fields_are_optional() {
    let req: UpdateDeviceRequest = serde_json::from_str("{}").expect("parse");
    assert!(req.name.is_none());
    assert!(req.device_type.is_none());
    assert!(req.location.is_none());
    assert!(req.status.is_none());

    let req: UpdateDeviceRequest =
        serde_json::from_str(r#"{"location":"Roof"}"#).expect("parse");
    assert_eq!(req.location.as_deref(), Some("Roof"));
}

#[test]
fn telemetry_request_is_camel_case() {
    let payload = json!({
        "deviceId": 7,
        "batteryLevel": 88.5,
        "temperature": 21.0,
        "cpuUsage": 12.0,
        "memoryUsage": 2048,
        "memoryTotal": 8192
    });
    let req: CreateTelemetryRequest = serde_json::from_value(payload).expect("parse");
    assert_eq!(req.device_id, Some(7));
    assert_eq!(req.memory_usage, Some(2048.0));
}

#[test]
fn mistyped_fields_fail_to_parse() {
    let payload = r#"{"deviceId":"seven","type":"x","message":"y","severity":"info"}"#;
    assert!(serde_json::from_str::<CreateAlertRequest>(payload).is_err());
}

#[test]
fn limit_query_keeps_raw_text() {
    let value: Value = json!({ "limit": "abc" });
    let query: LimitQuery = serde_json::from_value(value).expect("parse");
    assert_eq!(query.limit.as_deref(), Some("abc"));
}
