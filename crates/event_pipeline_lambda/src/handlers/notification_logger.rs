use event_pipeline_core::contract::NotificationEvent;
use serde_json::{json, Value};

use crate::handlers::response::{error_response, success_response, ApiGatewayResponse};

/// Logs each notification verbatim, then as parsed JSON. Nothing is written
/// or forwarded; one malformed message fails the whole batch.
pub fn handle_notification_event(event: Value) -> ApiGatewayResponse {
    match log_notification_messages(event) {
        Ok(processed) => {
            tracing::info!(processed, "notification batch processed");
            success_response(200, json!({"message": "Messages processed successfully."}))
        }
        Err(error) => {
            tracing::error!(error = %error, "notification batch failed");
            error_response(500, json!({"error": "Failed to process messages."}))
        }
    }
}

fn log_notification_messages(event: Value) -> Result<usize, String> {
    let event: NotificationEvent = serde_json::from_value(event)
        .map_err(|error| format!("malformed notification event: {error}"))?;

    let mut processed = 0usize;
    for record in event.records {
        let raw = record.sns.message;
        tracing::info!(message = %raw, "received notification");
        let parsed = parse_notification_message(&raw)?;
        tracing::info!(parsed = %parsed, "parsed notification");
        processed += 1;
    }

    Ok(processed)
}

fn parse_notification_message(raw: &str) -> Result<Value, String> {
    serde_json::from_str(raw).map_err(|error| format!("malformed notification message: {error}"))
}
