//! Shared event-pipeline domain primitives.
//!
//! This crate owns the request/response contracts, user-record validation,
//! and object-key decoding shared by the Lambda handlers. It intentionally
//! excludes AWS SDK and Lambda runtime concerns.

pub mod contract;
pub mod object_keys;
