pub mod notification_logger;
pub mod response;
pub mod upload_metadata;
pub mod upload_notifier;
pub mod user_intake;
