//! Entities the console displays and the payloads it sends.
//!
//! These mirror the backend's JSON shapes; field names are Rust-style and
//! serde renames map them onto the wire.

pub mod contact;
pub mod job;
pub mod project;

pub use contact::{ContactMessage, MessageStatus};
pub use job::{
    ExperienceLevel, JobFormData, JobPosting, JobStats, JobStatus, JobType, JobUpdate, ListQuery,
    SortOrder,
};
pub use project::{Project, ProjectFormData, ProjectStatus};
