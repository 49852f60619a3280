//! Module for the console's controllers and client-side services.
//!
//! Controllers own view state and talk to the backend through the `api`
//! seams; the in-memory services back pages that have no endpoint yet.

pub mod dashboard_service;
pub mod demo_data;
pub mod form_service;
pub mod inbox_service;
pub mod job_list;
pub mod notification_service;
pub mod project_service;

#[cfg(test)]
pub(crate) mod testing;

pub use dashboard_service::{DashboardService, DashboardSummary};
pub use demo_data::{demo_messages, demo_projects};
pub use form_service::{FormController, FormMode, FormTarget};
pub use inbox_service::Inbox;
pub use job_list::{JobListController, ListPhase, ListState};
pub use notification_service::{Notice, NoticeLevel, NotificationCenter};
pub use project_service::ProjectCatalog;
