//! Aggregates the figures shown on the dashboard.

use crate::api::jobs::JobCollection;
use crate::auth::Session;
use crate::models::job::{JobPosting, JobStatus, ListQuery};
use crate::services::inbox_service::Inbox;
use crate::services::project_service::ProjectCatalog;
use futures::future;
use std::sync::Arc;
use tracing::warn;

const RECENT_OPEN_JOBS: u32 = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub greeting_name: String,
    /// `None` when the stats endpoint was unavailable.
    pub total_jobs: Option<u64>,
    pub open_jobs: u64,
    pub recent_open_jobs: Vec<JobPosting>,
    pub total_projects: usize,
    pub running_projects: usize,
    pub unread_messages: usize,
}

pub struct DashboardService {
    jobs: Arc<dyn JobCollection>,
    projects: Arc<ProjectCatalog>,
    inbox: Arc<Inbox>,
}

impl DashboardService {
    pub fn new(jobs: Arc<dyn JobCollection>, projects: Arc<ProjectCatalog>, inbox: Arc<Inbox>) -> Self {
        Self {
            jobs,
            projects,
            inbox,
        }
    }

    /// Loads stats and the newest open jobs together.
    pub async fn summary(&self, session: &Session) -> DashboardSummary {
        let query = ListQuery::new(RECENT_OPEN_JOBS).with_status(Some(JobStatus::Open));
        let (stats, open_page) = future::join(self.jobs.stats(), self.jobs.list(&query)).await;

        let (total_jobs, open_jobs) = match stats {
            Ok(stats) => (Some(stats.total), stats.count_by_status(JobStatus::Open)),
            Err(e) => {
                warn!("Job stats unavailable, using open job listing: {}", e);
                (None, open_page.total_count)
            }
        };

        DashboardSummary {
            greeting_name: session.first_name().to_string(),
            total_jobs,
            open_jobs,
            recent_open_jobs: open_page.items,
            total_projects: self.projects.total().await,
            running_projects: self.projects.running_count().await,
            unread_messages: self.inbox.unread_count().await,
        }
    }
}
