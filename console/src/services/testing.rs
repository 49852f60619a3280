//! In-memory jobs backend for controller tests.

use crate::api::common::{Acknowledgement, PaginationResult};
use crate::api::jobs::JobCollection;
use crate::errors::{ApiError, ApiResult};
use crate::models::job::{
    ExperienceLevel, JobFormData, JobPosting, JobStats, JobStatus, JobType, JobUpdate, ListQuery,
    parse_deadline,
};
use async_trait::async_trait;
use chrono::{NaiveDate, TimeZone, Utc};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

pub fn sample_job(n: usize, status: JobStatus) -> JobPosting {
    let stamp = Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap();
    JobPosting {
        id: format!("job-{:03}", n),
        title: format!("Developer {}", n),
        job_type: JobType::FullTime,
        experience_level: ExperienceLevel::Mid,
        salary_text: "$100,000".into(),
        location: "Remote".into(),
        deadline: NaiveDate::from_ymd_opt(2030, 6, 30).unwrap(),
        description: "Build things that matter.".into(),
        status,
        applications_count: 0,
        is_active: true,
        created_at: stamp,
        updated_at: stamp,
    }
}

pub fn job_form(title: &str) -> JobFormData {
    JobFormData {
        title: title.into(),
        salary: "$150,000".into(),
        location: "Lisbon".into(),
        deadline: "2030-01-31".into(),
        description: "Lead the platform team.".into(),
        ..JobFormData::default()
    }
}

fn status_for(n: usize) -> JobStatus {
    match n % 3 {
        0 => JobStatus::Open,
        1 => JobStatus::Closed,
        _ => JobStatus::Draft,
    }
}

#[derive(Default)]
pub struct MemoryJobs {
    jobs: Mutex<Vec<JobPosting>>,
    queries: Mutex<Vec<ListQuery>>,
    delays: Mutex<HashMap<JobStatus, Duration>>,
    failing: AtomicBool,
    creates: AtomicUsize,
    next_id: AtomicUsize,
}

impl MemoryJobs {
    pub fn with_jobs(count: usize) -> Self {
        let jobs = (0..count).map(|n| sample_job(n, status_for(n))).collect();
        Self {
            jobs: Mutex::new(jobs),
            next_id: AtomicUsize::new(count),
            ..Self::default()
        }
    }

    pub fn list_calls(&self) -> usize {
        self.queries.lock().unwrap().len()
    }

    pub fn create_calls(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
    }

    pub fn last_query(&self) -> Option<ListQuery> {
        self.queries.lock().unwrap().last().cloned()
    }

    pub fn delay_status(&self, status: JobStatus, delay: Duration) {
        self.delays.lock().unwrap().insert(status, delay);
    }

    pub fn fail_requests(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn remove_first(&self, count: usize) {
        self.jobs.lock().unwrap().drain(..count);
    }

    fn check(&self) -> ApiResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            Err(ApiError::server(500, "Internal Server Error"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl JobCollection for MemoryJobs {
    async fn create(&self, payload: &JobFormData) -> ApiResult<JobPosting> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        let n = self.next_id.fetch_add(1, Ordering::SeqCst);
        let mut job = sample_job(n, payload.status);
        job.title = payload.title.clone();
        job.job_type = payload.job_type;
        job.experience_level = payload.experience;
        job.salary_text = payload.salary.clone();
        job.location = payload.location.clone();
        job.description = payload.description.clone();
        job.deadline = parse_deadline(&payload.deadline).unwrap_or(job.deadline);
        self.jobs.lock().unwrap().insert(0, job.clone());
        Ok(job)
    }

    async fn try_list(&self, query: &ListQuery) -> ApiResult<PaginationResult<JobPosting>> {
        self.queries.lock().unwrap().push(query.clone());
        let delay = query
            .status_filter
            .and_then(|s| self.delays.lock().unwrap().get(&s).copied());
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.check()?;

        let matching: Vec<JobPosting> = self
            .jobs
            .lock()
            .unwrap()
            .iter()
            .filter(|j| query.status_filter.is_none_or(|s| j.status == s))
            .filter(|j| {
                query
                    .search_text
                    .as_deref()
                    .is_none_or(|needle| j.title.contains(needle))
            })
            .cloned()
            .collect();
        let total = matching.len() as u64;
        let size = query.page_size as usize;
        let items = matching
            .into_iter()
            .skip((query.page as usize - 1) * size)
            .take(size)
            .collect();
        Ok(PaginationResult::new(items, query.page, query.page_size, total))
    }

    async fn get_by_id(&self, id: &str) -> ApiResult<JobPosting> {
        self.check()?;
        self.jobs
            .lock()
            .unwrap()
            .iter()
            .find(|j| j.id == id)
            .cloned()
            .ok_or_else(|| ApiError::not_found("Job", id))
    }

    async fn update(&self, id: &str, update: &JobUpdate) -> ApiResult<JobPosting> {
        self.check()?;
        let mut jobs = self.jobs.lock().unwrap();
        let job = jobs
            .iter_mut()
            .find(|j| j.id == id)
            .ok_or_else(|| ApiError::not_found("Job", id))?;
        if let Some(title) = &update.title {
            job.title = title.clone();
        }
        if let Some(status) = update.status {
            job.status = status;
        }
        if let Some(description) = &update.description {
            job.description = description.clone();
        }
        Ok(job.clone())
    }

    async fn delete(&self, id: &str) -> ApiResult<Acknowledgement> {
        self.check()?;
        let mut jobs = self.jobs.lock().unwrap();
        let before = jobs.len();
        jobs.retain(|j| j.id != id);
        if jobs.len() == before {
            return Err(ApiError::not_found("Job", id));
        }
        Ok(Acknowledgement {
            message: "Job deleted successfully".into(),
        })
    }

    async fn stats(&self) -> ApiResult<JobStats> {
        self.check()?;
        let jobs = self.jobs.lock().unwrap();
        let mut stats = JobStats {
            total: jobs.len() as u64,
            ..JobStats::default()
        };
        for job in jobs.iter() {
            *stats.by_status.entry(job.status.to_string()).or_default() += 1;
            *stats.by_type.entry(job.job_type.to_string()).or_default() += 1;
            *stats
                .by_experience
                .entry(job.experience_level.to_string())
                .or_default() += 1;
        }
        Ok(stats)
    }

    async fn apply(&self, id: &str) -> ApiResult<JobPosting> {
        self.check()?;
        let mut jobs = self.jobs.lock().unwrap();
        let job = jobs
            .iter_mut()
            .find(|j| j.id == id)
            .ok_or_else(|| ApiError::not_found("Job", id))?;
        job.applications_count += 1;
        Ok(job.clone())
    }

    async fn try_search_free_text(&self, query: &str) -> ApiResult<Vec<JobPosting>> {
        self.check()?;
        Ok(self
            .jobs
            .lock()
            .unwrap()
            .iter()
            .filter(|j| j.title.contains(query))
            .cloned()
            .collect())
    }
}
