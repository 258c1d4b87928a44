use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Required fields of a user record, in validation order. The first missing
/// field is the one reported.
pub const USER_RECORD_FIELDS: [&str; 3] = ["username", "email", "age"];

/// A validated user record as it is persisted to the key-value store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserRecord {
    pub username: String,
    pub email: String,
    pub age: u64,
}

/// One batch of storage-event notifications.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StorageEvent {
    #[serde(rename = "Records")]
    pub records: Vec<StorageEventRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StorageEventRecord {
    pub s3: StorageEntity,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StorageEntity {
    pub bucket: StorageBucket,
    pub object: StorageObject,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StorageBucket {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StorageObject {
    /// URL-style encoded by the event source; decode with
    /// [`crate::object_keys::decode_object_key`] before use.
    pub key: String,
}

/// One batch of topic notifications.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotificationEvent {
    #[serde(rename = "Records")]
    pub records: Vec<NotificationRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotificationRecord {
    #[serde(rename = "Sns")]
    pub sns: NotificationPayload,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotificationPayload {
    #[serde(rename = "Message")]
    pub message: String,
}

/// Metadata persisted for an uploaded object.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UploadMetadataRecord {
    pub file_id: String,
    pub bucket: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Validates the user payload field by field. Presence is checked for all
/// required fields before any value is inspected, so a missing field is
/// always reported ahead of a malformed one.
pub fn validate_user_payload(payload: &Value) -> Result<UserRecord, ValidationError> {
    let Some(object) = payload.as_object() else {
        return Err(ValidationError::new("Request payload must be a JSON object"));
    };

    for field in USER_RECORD_FIELDS {
        if !object.contains_key(field) {
            return Err(ValidationError::new(format!(
                "Missing required field: {field}"
            )));
        }
    }

    let username = object["username"]
        .as_str()
        .ok_or_else(|| ValidationError::new("Field 'username' must be a string"))?;
    let email = object["email"]
        .as_str()
        .ok_or_else(|| ValidationError::new("Field 'email' must be a string"))?;
    let age = object["age"]
        .as_u64()
        .ok_or_else(|| ValidationError::new("Age must be a non-negative integer."))?;

    Ok(UserRecord {
        username: username.to_string(),
        email: email.to_string(),
        age,
    })
}

/// Lowercases the email address ahead of persistence.
pub fn normalize_user_record(mut record: UserRecord) -> UserRecord {
    record.email = record.email.to_lowercase();
    record
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn accepts_complete_payload() {
        let payload = json!({
            "username": "ada",
            "email": "Ada@Example.COM",
            "age": 36
        });

        let record = validate_user_payload(&payload).expect("payload should pass");
        assert_eq!(record.username, "ada");
        assert_eq!(record.email, "Ada@Example.COM");
        assert_eq!(record.age, 36);
    }

    #[test]
    fn reports_first_missing_field_in_declaration_order() {
        let payload = json!({ "age": 30 });

        let error = validate_user_payload(&payload).expect_err("payload should fail");
        assert_eq!(error.message(), "Missing required field: username");
    }

    #[test]
    fn reports_missing_age_even_when_other_fields_are_malformed() {
        let payload = json!({ "username": 1, "email": 2 });

        let error = validate_user_payload(&payload).expect_err("payload should fail");
        assert_eq!(error.message(), "Missing required field: age");
    }

    #[test]
    fn rejects_negative_age() {
        let payload = json!({
            "username": "ada",
            "email": "ada@example.com",
            "age": -1
        });

        let error = validate_user_payload(&payload).expect_err("payload should fail");
        assert_eq!(error.message(), "Age must be a non-negative integer.");
    }

    #[test]
    fn rejects_non_numeric_age() {
        let payload = json!({
            "username": "ada",
            "email": "ada@example.com",
            "age": "36"
        });

        let error = validate_user_payload(&payload).expect_err("payload should fail");
        assert_eq!(error.message(), "Age must be a non-negative integer.");
    }

    #[test]
    fn rejects_non_object_payload() {
        let error = validate_user_payload(&json!([1, 2, 3])).expect_err("payload should fail");
        assert_eq!(error.message(), "Request payload must be a JSON object");
    }

    #[test]
    fn normalization_lowercases_email_only() {
        let record = normalize_user_record(UserRecord {
            username: "Ada".to_string(),
            email: "Ada@Example.COM".to_string(),
            age: 36,
        });

        assert_eq!(record.username, "Ada");
        assert_eq!(record.email, "ada@example.com");
    }

    #[test]
    fn storage_event_parses_wire_shape() {
        let event: StorageEvent = serde_json::from_value(json!({
            "Records": [
                {"s3": {"bucket": {"name": "uploads"}, "object": {"key": "report.txt"}}}
            ]
        }))
        .expect("event should parse");

        assert_eq!(event.records.len(), 1);
        assert_eq!(event.records[0].s3.bucket.name, "uploads");
        assert_eq!(event.records[0].s3.object.key, "report.txt");
    }

    #[test]
    fn notification_event_parses_wire_shape() {
        let event: NotificationEvent = serde_json::from_value(json!({
            "Records": [
                {"Sns": {"Message": "{\"kind\":\"upload\"}"}}
            ]
        }))
        .expect("event should parse");

        assert_eq!(event.records.len(), 1);
        assert_eq!(event.records[0].sns.message, "{\"kind\":\"upload\"}");
    }
}
