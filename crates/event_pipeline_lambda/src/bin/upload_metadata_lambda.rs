use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use event_pipeline_core::contract::UploadMetadataRecord;
use event_pipeline_lambda::adapters::metadata_store::MetadataStore;
use event_pipeline_lambda::handlers::response::ApiGatewayResponse;
use event_pipeline_lambda::handlers::upload_metadata::handle_upload_metadata_event;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;

struct DynamoMetadataStore {
    table_name: String,
    dynamodb_client: aws_sdk_dynamodb::Client,
}

impl MetadataStore for DynamoMetadataStore {
    fn put_metadata_record(&self, record: &UploadMetadataRecord) -> Result<(), String> {
        let table_name = self.table_name.clone();
        let client = self.dynamodb_client.clone();
        let item = HashMap::from([
            (
                "file_id".to_string(),
                AttributeValue::S(record.file_id.clone()),
            ),
            (
                "bucket".to_string(),
                AttributeValue::S(record.bucket.clone()),
            ),
        ]);

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .put_item()
                    .table_name(table_name)
                    .set_item(Some(item))
                    .send()
                    .await
                    .map(|_| ())
                    .map_err(|error| format!("failed to put metadata record to dynamodb: {error}"))
            })
        })
    }
}

async fn handle_request(event: LambdaEvent<Value>) -> Result<ApiGatewayResponse, Error> {
    let table_name = std::env::var("UPLOAD_METADATA_TABLE")
        .map_err(|_| Error::from("UPLOAD_METADATA_TABLE must be configured"))?;

    let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let store = DynamoMetadataStore {
        table_name,
        dynamodb_client: aws_sdk_dynamodb::Client::new(&config),
    };

    Ok(handle_upload_metadata_event(event.payload, &store))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .without_time()
        .init();

    lambda_runtime::run(service_fn(handle_request)).await
}
