//! Integration workflows for disk placement analytics.
//!
//! These tests run multi-step scenarios against a file-backed database:
//! - Placement lifecycle through the service facade
//! - Concurrent writers competing for free space
//! - Error recovery paths

mod concurrency;
mod error_recovery;
mod placement_workflow;
