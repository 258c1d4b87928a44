use event_pipeline_core::contract::{normalize_user_record, validate_user_payload};
use serde_json::{json, Value};

use crate::adapters::record_store::RecordStore;
use crate::handlers::response::{
    error_response, success_response, validation_error_response, ApiGatewayResponse,
};

/// Validates the submitted user record, lowercases the email, and writes the
/// record to the key-value store. A single failed write is reported as 500,
/// not retried.
pub fn handle_user_intake_event(event: Value, store: &dyn RecordStore) -> ApiGatewayResponse {
    let payload = match extract_request_body(event) {
        Ok(value) => value,
        Err(message) => return validation_error_response(&message),
    };

    let record = match validate_user_payload(&payload) {
        Ok(value) => value,
        Err(error) => return validation_error_response(error.message()),
    };

    let record = normalize_user_record(record);

    if let Err(error) = store.put_user_record(&record) {
        tracing::error!(error = %error, "user record write failed");
        return error_response(
            500,
            json!({
                "error": "Failed to store user record",
                "details": error,
            }),
        );
    }

    success_response(
        200,
        json!({
            "message": "User data stored successfully",
            "data": record,
        }),
    )
}

/// Accepts either the bare JSON object or an API-Gateway-shaped wrapper with
/// a `body` field. A malformed JSON body is reported as a 400, never left to
/// propagate as an unhandled fault.
fn extract_request_body(event: Value) -> Result<Value, String> {
    let Some(object) = event.as_object() else {
        return Err("Request payload must be a JSON object".to_string());
    };

    let Some(body) = object.get("body") else {
        return Ok(event);
    };

    match body {
        Value::Null => Ok(json!({})),
        Value::Object(_) => Ok(body.clone()),
        Value::String(text) => {
            serde_json::from_str(text).map_err(|error| format!("Malformed JSON body: {error}"))
        }
        _ => Err("Request body must be a JSON object".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use event_pipeline_core::contract::UserRecord;

    use super::*;

    struct CapturingStore {
        records: Mutex<Vec<UserRecord>>,
    }

    impl CapturingStore {
        fn new() -> Self {
            Self {
                records: Mutex::new(Vec::new()),
            }
        }

        fn records(&self) -> Vec<UserRecord> {
            self.records.lock().expect("poisoned mutex").clone()
        }
    }

    impl RecordStore for CapturingStore {
        fn put_user_record(&self, record: &UserRecord) -> Result<(), String> {
            self.records
                .lock()
                .expect("poisoned mutex")
                .push(record.clone());
            Ok(())
        }
    }

    struct FailingStore {
        attempts: Mutex<usize>,
    }

    impl RecordStore for FailingStore {
        fn put_user_record(&self, _record: &UserRecord) -> Result<(), String> {
            *self.attempts.lock().expect("poisoned mutex") += 1;
            Err("table not reachable".to_string())
        }
    }

    #[test]
    fn stores_record_with_lowercased_email() {
        let store = CapturingStore::new();
        let response = handle_user_intake_event(
            json!({
                "body": "{\"username\":\"ada\",\"email\":\"Ada@Example.COM\",\"age\":36}"
            }),
            &store,
        );

        assert_eq!(response.status_code, 200);
        let records = store.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].email, "ada@example.com");

        let body: Value = serde_json::from_str(&response.body).expect("body should be json");
        assert_eq!(body["message"], "User data stored successfully");
        assert_eq!(body["data"]["email"], "ada@example.com");
        assert_eq!(body["data"]["age"], 36);
    }

    #[test]
    fn accepts_bare_object_events() {
        let store = CapturingStore::new();
        let response = handle_user_intake_event(
            json!({"username": "ada", "email": "ada@example.com", "age": 0}),
            &store,
        );

        assert_eq!(response.status_code, 200);
        assert_eq!(store.records().len(), 1);
    }

    #[test]
    fn names_the_missing_field_regardless_of_the_rest() {
        let store = CapturingStore::new();
        let cases = [
            (json!({"email": "a@b.c", "age": 1}), "username"),
            (json!({"username": "ada", "age": 1}), "email"),
            (json!({"username": "ada", "email": "a@b.c"}), "age"),
        ];

        for (payload, field) in cases {
            let response = handle_user_intake_event(payload, &store);
            assert_eq!(response.status_code, 400);
            let body: Value = serde_json::from_str(&response.body).expect("body should be json");
            assert_eq!(body["error"], format!("Missing required field: {field}"));
        }

        assert!(store.records().is_empty());
    }

    #[test]
    fn rejects_negative_and_non_numeric_ages() {
        let store = CapturingStore::new();
        for age in [json!(-3), json!("36"), json!(36.5)] {
            let response = handle_user_intake_event(
                json!({"username": "ada", "email": "a@b.c", "age": age}),
                &store,
            );

            assert_eq!(response.status_code, 400);
            let body: Value = serde_json::from_str(&response.body).expect("body should be json");
            assert_eq!(body["error"], "Age must be a non-negative integer.");
        }

        assert!(store.records().is_empty());
    }

    #[test]
    fn rejects_malformed_json_body_without_storing() {
        let store = CapturingStore::new();
        let response = handle_user_intake_event(json!({"body": "{not json"}), &store);

        assert_eq!(response.status_code, 400);
        let body: Value = serde_json::from_str(&response.body).expect("body should be json");
        assert!(body["error"]
            .as_str()
            .expect("error should be a string")
            .starts_with("Malformed JSON body"));
        assert!(store.records().is_empty());
    }

    #[test]
    fn store_failure_is_reported_once_with_details() {
        let store = FailingStore {
            attempts: Mutex::new(0),
        };
        let response = handle_user_intake_event(
            json!({"username": "ada", "email": "a@b.c", "age": 1}),
            &store,
        );

        assert_eq!(response.status_code, 500);
        let body: Value = serde_json::from_str(&response.body).expect("body should be json");
        assert_eq!(body["error"], "Failed to store user record");
        assert_eq!(body["details"], "table not reachable");
        assert_eq!(*store.attempts.lock().expect("poisoned mutex"), 1);
    }
}
