use event_pipeline_core::contract::StorageEvent;
use event_pipeline_core::object_keys::decode_object_key;
use serde_json::{json, Value};

use crate::adapters::object_store::ObjectStore;
use crate::adapters::topic::TopicPublisher;
use crate::handlers::response::{error_response, success_response, ApiGatewayResponse};

/// For each storage record, in input order: decode the object key, fetch the
/// object text, and publish a notification embedding both. The first failure
/// aborts the whole batch; records already published stay published.
pub fn handle_upload_event(
    event: Value,
    objects: &dyn ObjectStore,
    topic: &dyn TopicPublisher,
) -> ApiGatewayResponse {
    match publish_upload_notifications(event, objects, topic) {
        Ok(published) => {
            tracing::info!(published, "upload batch processed");
            success_response(
                200,
                json!({"message": "Uploads processed and notifications published."}),
            )
        }
        Err(error) => {
            tracing::error!(error = %error, "upload batch failed");
            error_response(500, json!({"error": "Error processing uploads."}))
        }
    }
}

fn publish_upload_notifications(
    event: Value,
    objects: &dyn ObjectStore,
    topic: &dyn TopicPublisher,
) -> Result<usize, String> {
    let event: StorageEvent = serde_json::from_value(event)
        .map_err(|error| format!("malformed storage event: {error}"))?;

    let mut published = 0usize;
    for record in &event.records {
        let key = decode_object_key(&record.s3.object.key)
            .map_err(|error| error.message().to_string())?;
        let content = objects.read_object_text(&record.s3.bucket.name, &key)?;
        let message = format!("File uploaded: {key}\nContent:\n{content}");
        topic.publish(&message)?;
        tracing::info!(key = %key, message = %message, "published upload notification");
        published += 1;
    }

    Ok(published)
}
