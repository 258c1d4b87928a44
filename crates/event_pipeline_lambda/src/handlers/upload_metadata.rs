use event_pipeline_core::contract::{StorageEvent, UploadMetadataRecord};
use serde_json::{json, Value};

use crate::adapters::metadata_store::MetadataStore;
use crate::handlers::response::{error_response, success_response, ApiGatewayResponse};

/// Records `{file_id, bucket}` for an uploaded object. The event source
/// delivers one record per object notification; only the first is consumed.
pub fn handle_upload_metadata_event(
    event: Value,
    store: &dyn MetadataStore,
) -> ApiGatewayResponse {
    match store_first_record_metadata(event, store) {
        Ok(record) => success_response(
            200,
            json!({
                "message": "Metadata stored successfully.",
                "data": record,
            }),
        ),
        Err(error) => {
            tracing::error!(error = %error, "upload metadata write failed");
            error_response(
                500,
                json!({
                    "error": "Failed to store upload metadata.",
                    "details": error,
                }),
            )
        }
    }
}

fn store_first_record_metadata(
    event: Value,
    store: &dyn MetadataStore,
) -> Result<UploadMetadataRecord, String> {
    let event: StorageEvent = serde_json::from_value(event)
        .map_err(|error| format!("malformed storage event: {error}"))?;
    let record = event
        .records
        .into_iter()
        .next()
        .ok_or_else(|| "storage event carries no records".to_string())?;

    let metadata = UploadMetadataRecord {
        file_id: record.s3.object.key,
        bucket: record.s3.bucket.name,
    };
    store.put_metadata_record(&metadata)?;
    Ok(metadata)
}
