use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use event_pipeline_core::contract::UserRecord;
use event_pipeline_lambda::adapters::record_store::RecordStore;
use event_pipeline_lambda::handlers::response::ApiGatewayResponse;
use event_pipeline_lambda::handlers::user_intake::handle_user_intake_event;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;

struct DynamoRecordStore {
    table_name: String,
    dynamodb_client: aws_sdk_dynamodb::Client,
}

impl RecordStore for DynamoRecordStore {
    fn put_user_record(&self, record: &UserRecord) -> Result<(), String> {
        let table_name = self.table_name.clone();
        let client = self.dynamodb_client.clone();
        let item = HashMap::from([
            (
                "username".to_string(),
                AttributeValue::S(record.username.clone()),
            ),
            ("email".to_string(), AttributeValue::S(record.email.clone())),
            ("age".to_string(), AttributeValue::N(record.age.to_string())),
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
                    .map_err(|error| format!("failed to put user record to dynamodb: {error}"))
            })
        })
    }
}

async fn handle_request(event: LambdaEvent<Value>) -> Result<ApiGatewayResponse, Error> {
    let table_name =
        std::env::var("USER_TABLE").map_err(|_| Error::from("USER_TABLE must be configured"))?;

    let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let store = DynamoRecordStore {
        table_name,
        dynamodb_client: aws_sdk_dynamodb::Client::new(&config),
    };

    Ok(handle_user_intake_event(event.payload, &store))
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
