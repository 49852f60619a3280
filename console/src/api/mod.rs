//! Typed HTTP access to the admin backend.
//!
//! Contains the shared HTTP client, the jobs resource client and the common
//! response shapes used across resources.

pub mod client;
pub mod common;
pub mod jobs;

pub use client::HttpClient;
pub use common::{Acknowledgement, FieldError, PaginationResult};
pub use jobs::{JobApi, JobCollection};
