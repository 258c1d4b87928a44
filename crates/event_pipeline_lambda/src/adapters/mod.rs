pub mod metadata_store;
pub mod object_store;
pub mod record_store;
pub mod topic;
