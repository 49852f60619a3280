//! Remote collection client for the jobs resource.
//!
//! [`JobCollection`] is the seam the controllers depend on; [`JobApi`] is the
//! HTTP implementation. Listing and free-text search degrade to an empty,
//! well-formed result on any failure. Every other operation propagates its
//! error to the caller.

use crate::api::client::HttpClient;
use crate::api::common::{Acknowledgement, PaginationResult};
use crate::errors::{ApiError, ApiResult};
use crate::models::job::{JobFormData, JobPosting, JobStats, JobUpdate, JobsListResponse, ListQuery};
use async_trait::async_trait;
use reqwest::Method;
use tracing::{info, warn};

#[async_trait]
pub trait JobCollection: Send + Sync {
    /// Creates a job posting; the server assigns its id.
    async fn create(&self, payload: &JobFormData) -> ApiResult<JobPosting>;

    /// Fetches one page, propagating failures.
    async fn try_list(&self, query: &ListQuery) -> ApiResult<PaginationResult<JobPosting>>;

    /// Fetches one page, degrading to an empty page on failure.
    async fn list(&self, query: &ListQuery) -> PaginationResult<JobPosting> {
        match self.try_list(query).await {
            Ok(page) => page,
            Err(e) => {
                warn!("Job listing failed, returning an empty page: {}", e);
                PaginationResult::empty(query.page_size)
            }
        }
    }

    async fn get_by_id(&self, id: &str) -> ApiResult<JobPosting>;

    /// Partial update; the server decides how fields merge.
    async fn update(&self, id: &str, update: &JobUpdate) -> ApiResult<JobPosting>;

    /// Soft delete. The id disappears from later listings.
    async fn delete(&self, id: &str) -> ApiResult<Acknowledgement>;

    async fn stats(&self) -> ApiResult<JobStats>;

    /// Records one application against the posting.
    async fn apply(&self, id: &str) -> ApiResult<JobPosting>;

    async fn try_search_free_text(&self, query: &str) -> ApiResult<Vec<JobPosting>>;

    /// Free-text search, degrading to no matches on failure.
    async fn search_free_text(&self, query: &str) -> Vec<JobPosting> {
        match self.try_search_free_text(query).await {
            Ok(jobs) => jobs,
            Err(e) => {
                warn!("Job search for '{}' failed, returning no matches: {}", query, e);
                Vec::new()
            }
        }
    }
}

/// HTTP implementation of [`JobCollection`].
#[derive(Debug, Clone)]
pub struct JobApi {
    http: HttpClient,
}

impl JobApi {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }
}

// A 404 on an id-addressed route means the job is gone.
fn job_error(id: &str, error: ApiError) -> ApiError {
    match error {
        ApiError::Server { status: 404, .. } => ApiError::not_found("Job", id),
        other => other,
    }
}

#[async_trait]
impl JobCollection for JobApi {
    async fn create(&self, payload: &JobFormData) -> ApiResult<JobPosting> {
        let request = self.http.request(Method::POST, &["jobs"])?.json(payload);
        let job: JobPosting = self.http.send(request).await?;
        info!("Created job {} ({})", job.id, job.title);
        Ok(job)
    }

    async fn try_list(&self, query: &ListQuery) -> ApiResult<PaginationResult<JobPosting>> {
        let request = self
            .http
            .request(Method::GET, &["jobs"])?
            .query(&query.to_params());
        let response: JobsListResponse = self.http.send(request).await?;

        // The server echoes page/limit; fall back to what was asked for.
        let page_size = if response.limit > 0 {
            response.limit
        } else {
            query.page_size
        };
        let page = if response.page > 0 {
            response.page
        } else {
            query.page
        };
        Ok(PaginationResult::new(
            response.jobs,
            page,
            page_size,
            response.total,
        ))
    }

    async fn get_by_id(&self, id: &str) -> ApiResult<JobPosting> {
        let request = self.http.request(Method::GET, &["jobs", id])?;
        self.http.send(request).await.map_err(|e| job_error(id, e))
    }

    async fn update(&self, id: &str, update: &JobUpdate) -> ApiResult<JobPosting> {
        let request = self.http.request(Method::PATCH, &["jobs", id])?.json(update);
        let job: JobPosting = self.http.send(request).await.map_err(|e| job_error(id, e))?;
        info!("Updated job {}", job.id);
        Ok(job)
    }

    async fn delete(&self, id: &str) -> ApiResult<Acknowledgement> {
        let request = self.http.request(Method::DELETE, &["jobs", id])?;
        let ack: Acknowledgement = self.http.send(request).await.map_err(|e| job_error(id, e))?;
        info!("Deleted job {}: {}", id, ack.message);
        Ok(ack)
    }

    async fn stats(&self) -> ApiResult<JobStats> {
        let request = self.http.request(Method::GET, &["jobs", "stats"])?;
        self.http.send(request).await
    }

    async fn apply(&self, id: &str) -> ApiResult<JobPosting> {
        let request = self.http.request(Method::POST, &["jobs", id, "apply"])?;
        self.http.send(request).await.map_err(|e| job_error(id, e))
    }

    async fn try_search_free_text(&self, query: &str) -> ApiResult<Vec<JobPosting>> {
        let request = self
            .http
            .request(Method::GET, &["jobs", "search"])?
            .query(&[("q", query)]);
        self.http.send(request).await
    }
}
