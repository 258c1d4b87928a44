use event_pipeline_lambda::adapters::object_store::ObjectStore;
use event_pipeline_lambda::adapters::topic::TopicPublisher;
use event_pipeline_lambda::handlers::response::ApiGatewayResponse;
use event_pipeline_lambda::handlers::upload_notifier::handle_upload_event;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;

struct S3TextObjectStore {
    s3_client: aws_sdk_s3::Client,
}

impl ObjectStore for S3TextObjectStore {
    fn read_object_text(&self, bucket: &str, key: &str) -> Result<String, String> {
        let bucket = bucket.to_string();
        let object_key = key.to_string();
        let client = self.s3_client.clone();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                let output = client
                    .get_object()
                    .bucket(bucket)
                    .key(&object_key)
                    .send()
                    .await
                    .map_err(|error| format!("failed to fetch object from s3: {error}"))?;
                let bytes = output
                    .body
                    .collect()
                    .await
                    .map_err(|error| format!("failed to read object body: {error}"))?
                    .into_bytes();
                String::from_utf8(bytes.to_vec())
                    .map_err(|error| format!("object '{object_key}' is not UTF-8 text: {error}"))
            })
        })
    }
}

struct SnsTopicPublisher {
    topic_arn: String,
    sns_client: aws_sdk_sns::Client,
}

impl TopicPublisher for SnsTopicPublisher {
    fn publish(&self, message: &str) -> Result<(), String> {
        let topic_arn = self.topic_arn.clone();
        let message = message.to_string();
        let client = self.sns_client.clone();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .publish()
                    .topic_arn(topic_arn)
                    .message(message)
                    .send()
                    .await
                    .map(|_| ())
                    .map_err(|error| format!("failed to publish to sns topic: {error}"))
            })
        })
    }
}

async fn handle_request(event: LambdaEvent<Value>) -> Result<ApiGatewayResponse, Error> {
    let topic_arn = std::env::var("UPLOADS_TOPIC_ARN")
        .map_err(|_| Error::from("UPLOADS_TOPIC_ARN must be configured"))?;

    let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let objects = S3TextObjectStore {
        s3_client: aws_sdk_s3::Client::new(&config),
    };
    let topic = SnsTopicPublisher {
        topic_arn,
        sns_client: aws_sdk_sns::Client::new(&config),
    };

    Ok(handle_upload_event(event.payload, &objects, &topic))
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
