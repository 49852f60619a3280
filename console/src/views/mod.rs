//! Plain-text renderers for the console's screens.
//!
//! Each view wraps borrowed data and implements [`Display`]; none of them
//! hold state or make decisions beyond layout.

use crate::api::common::PaginationResult;
use crate::models::job::JobPosting;
use crate::services::dashboard_service::DashboardSummary;
use crate::services::job_list::{ListPhase, ListState};
use std::fmt::{self, Display, Formatter};

const TITLE_WIDTH: usize = 28;

/// One row per job, or a placeholder when the page is empty.
pub struct JobTable<'a>(pub &'a [JobPosting]);

impl Display for JobTable<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No jobs found");
        }
        writeln!(
            f,
            "{:<28} {:<11} {:<7} {:<16} {:<10} {:<7} {:>5}",
            "TITLE", "TYPE", "LEVEL", "LOCATION", "DEADLINE", "STATUS", "APPS"
        )?;
        for job in self.0 {
            writeln!(
                f,
                "{:<28} {:<11} {:<7} {:<16} {:<10} {:<7} {:>5}",
                truncate(&job.title, TITLE_WIDTH),
                job.job_type.to_string(),
                job.experience_level.to_string(),
                truncate(&job.location, 16),
                job.deadline.format("%Y-%m-%d").to_string(),
                job.status.to_string(),
                job.applications_count
            )?;
        }
        Ok(())
    }
}

/// "Showing page 2 of 3 (25 total)"
pub struct PaginationLine<'a, T>(pub &'a PaginationResult<T>);

impl<T> Display for PaginationLine<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let page = self.0;
        write!(
            f,
            "Showing page {} of {} ({} total)",
            page.page,
            page.total_pages.max(1),
            page.total_count
        )
    }
}

/// The jobs screen: status line, table and pager.
pub struct JobListView<'a>(pub &'a ListState);

impl Display for JobListView<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let state = self.0;
        match (state.phase, &state.last_error) {
            (ListPhase::Loading, _) => writeln!(f, "Loading jobs...")?,
            (ListPhase::Failed, Some(error)) => writeln!(f, "! {}", error)?,
            _ => {}
        }
        write!(f, "{}", JobTable(&state.data.items))?;
        writeln!(f, "{}", PaginationLine(&state.data))
    }
}

pub struct DashboardView<'a>(pub &'a DashboardSummary);

impl Display for DashboardView<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let summary = self.0;
        writeln!(f, "Welcome back, {}!", summary.greeting_name)?;
        writeln!(f)?;
        writeln!(f, "Total Projects   {}", summary.total_projects)?;
        writeln!(f, "Active Projects  {}", summary.running_projects)?;
        match summary.total_jobs {
            Some(total) => writeln!(f, "Open Jobs        {} of {}", summary.open_jobs, total)?,
            None => writeln!(f, "Open Jobs        {}", summary.open_jobs)?,
        }
        writeln!(f, "Unread Messages  {}", summary.unread_messages)?;

        if !summary.recent_open_jobs.is_empty() {
            writeln!(f)?;
            writeln!(f, "Latest openings")?;
            for job in &summary.recent_open_jobs {
                writeln!(f, "  - {} ({}, {})", job.title, job.location, job.job_type)?;
            }
        }
        Ok(())
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(3)).collect();
    format!("{}...", kept)
}
