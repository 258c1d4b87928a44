//! AWS-oriented adapters and Lambda handlers for the event pipeline.
//!
//! This crate owns runtime integration details (Lambda entry points and AWS
//! SDK adapters) layered over the pure contracts in `event_pipeline_core`.
//! Handlers take their downstream services as trait objects so tests can
//! substitute fakes.

pub mod adapters;
pub mod handlers;
