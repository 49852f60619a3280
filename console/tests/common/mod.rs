//! In-process mock of the admin backend, served by axum on an ephemeral port.

#![allow(dead_code)]

use admin_console::api::HttpClient;
use admin_console::config::Config;
use admin_console::models::job::{
    ExperienceLevel, JobFormData, JobPosting, JobStats, JobStatus, JobType, JobUpdate,
    JobsListResponse, parse_deadline,
};
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{NaiveDate, Utc};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const DEMO_EMAIL: &str = "admin@techstartup.com";
pub const DEMO_PASSWORD: &str = "password123";

type Failure = (StatusCode, Json<Value>);

#[derive(Default)]
pub struct MockState {
    jobs: Mutex<Vec<JobPosting>>,
    queries: Mutex<Vec<HashMap<String, String>>>,
    failing: AtomicBool,
    delay_ms: AtomicU64,
    requests: AtomicUsize,
    login_calls: AtomicUsize,
    next_id: AtomicUsize,
}

impl MockState {
    pub fn fail_requests(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn set_delay(&self, delay: Duration) {
        self.delay_ms.store(delay.as_millis() as u64, Ordering::SeqCst);
    }

    /// Every request that reached a jobs route.
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    pub fn login_calls(&self) -> usize {
        self.login_calls.load(Ordering::SeqCst)
    }

    pub fn last_query(&self) -> Option<HashMap<String, String>> {
        self.queries.lock().unwrap().last().cloned()
    }

    pub fn job_ids(&self) -> Vec<String> {
        self.jobs.lock().unwrap().iter().map(|j| j.id.clone()).collect()
    }

    async fn gate(&self) -> Result<(), Failure> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        let delay = Duration::from_millis(self.delay_ms.load(Ordering::SeqCst));
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        if self.failing.load(Ordering::SeqCst) {
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "message": "Database unavailable" })),
            ));
        }
        Ok(())
    }
}

pub struct MockBackend {
    pub base_url: String,
    pub state: Arc<MockState>,
}

impl MockBackend {
    pub fn config(&self) -> Config {
        Config::new(&self.base_url).unwrap()
    }

    pub fn client(&self) -> HttpClient {
        HttpClient::new(&self.config()).unwrap()
    }
}

pub fn seed_job(n: usize) -> JobPosting {
    let status = match n % 3 {
        0 => JobStatus::Open,
        1 => JobStatus::Closed,
        _ => JobStatus::Draft,
    };
    let now = Utc::now();
    JobPosting {
        id: format!("job-{:03}", n),
        title: format!("Developer {}", n),
        job_type: JobType::FullTime,
        experience_level: ExperienceLevel::Senior,
        salary_text: "$120,000".into(),
        location: "Remote".into(),
        deadline: NaiveDate::from_ymd_opt(2030, 3, 1).unwrap(),
        description: "Ship reliable services.".into(),
        status,
        applications_count: 0,
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}

/// Starts a backend holding `jobs` seeded postings.
pub async fn spawn(jobs: usize) -> MockBackend {
    let state = Arc::new(MockState {
        jobs: Mutex::new((0..jobs).map(seed_job).collect()),
        next_id: AtomicUsize::new(jobs),
        ..MockState::default()
    });

    let app = Router::new()
        .route("/jobs", get(list_jobs).post(create_job))
        .route("/jobs/stats", get(job_stats))
        .route("/jobs/search", get(search_jobs))
        .route(
            "/jobs/{id}",
            get(get_job).patch(update_job).delete(delete_job),
        )
        .route("/jobs/{id}/apply", post(apply_job))
        .route("/auth/login", post(login))
        .route("/auth/me", get(me))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockBackend {
        base_url: format!("http://{}", addr),
        state,
    }
}

/// A base URL nothing is listening on.
pub async fn unreachable_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

fn not_found(id: &str) -> Failure {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": format!("Job {} not found", id) })),
    )
}

async fn list_jobs(
    State(state): State<Arc<MockState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<JobsListResponse>, Failure> {
    state.queries.lock().unwrap().push(params.clone());
    state.gate().await?;

    let page: u32 = params.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);
    let limit: u32 = params.get("limit").and_then(|l| l.parse().ok()).unwrap_or(10);

    let matching: Vec<JobPosting> = state
        .jobs
        .lock()
        .unwrap()
        .iter()
        .filter(|j| params.get("status").is_none_or(|s| j.status.to_string() == *s))
        .filter(|j| params.get("type").is_none_or(|t| j.job_type.to_string() == *t))
        .filter(|j| params.get("search").is_none_or(|q| j.title.contains(q.as_str())))
        .cloned()
        .collect();

    let total = matching.len() as u64;
    let jobs = matching
        .into_iter()
        .skip(((page.max(1) - 1) * limit) as usize)
        .take(limit as usize)
        .collect();
    Ok(Json(JobsListResponse {
        jobs,
        total,
        page,
        limit,
        pages: total.div_ceil(limit as u64) as u32,
    }))
}

async fn create_job(
    State(state): State<Arc<MockState>>,
    Json(form): Json<JobFormData>,
) -> Result<(StatusCode, Json<JobPosting>), Failure> {
    state.gate().await?;
    let n = state.next_id.fetch_add(1, Ordering::SeqCst);
    let mut job = seed_job(n);
    job.title = form.title;
    job.job_type = form.job_type;
    job.experience_level = form.experience;
    job.salary_text = form.salary;
    job.location = form.location;
    job.description = form.description;
    job.status = form.status;
    job.deadline = parse_deadline(&form.deadline).unwrap_or(job.deadline);

    state.jobs.lock().unwrap().insert(0, job.clone());
    Ok((StatusCode::CREATED, Json(job)))
}

async fn get_job(
    State(state): State<Arc<MockState>>,
    Path(id): Path<String>,
) -> Result<Json<JobPosting>, Failure> {
    state.gate().await?;
    state
        .jobs
        .lock()
        .unwrap()
        .iter()
        .find(|j| j.id == id)
        .cloned()
        .map(Json)
        .ok_or_else(|| not_found(&id))
}

async fn update_job(
    State(state): State<Arc<MockState>>,
    Path(id): Path<String>,
    Json(update): Json<JobUpdate>,
) -> Result<Json<JobPosting>, Failure> {
    state.gate().await?;
    let mut jobs = state.jobs.lock().unwrap();
    let job = jobs
        .iter_mut()
        .find(|j| j.id == id)
        .ok_or_else(|| not_found(&id))?;
    if let Some(title) = update.title {
        job.title = title;
    }
    if let Some(status) = update.status {
        job.status = status;
    }
    if let Some(location) = update.location {
        job.location = location;
    }
    if let Some(description) = update.description {
        job.description = description;
    }
    job.updated_at = Utc::now();
    Ok(Json(job.clone()))
}

async fn delete_job(
    State(state): State<Arc<MockState>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, Failure> {
    state.gate().await?;
    let mut jobs = state.jobs.lock().unwrap();
    let before = jobs.len();
    jobs.retain(|j| j.id != id);
    if jobs.len() == before {
        return Err(not_found(&id));
    }
    Ok(Json(json!({ "message": "Job deleted successfully" })))
}

async fn apply_job(
    State(state): State<Arc<MockState>>,
    Path(id): Path<String>,
) -> Result<Json<JobPosting>, Failure> {
    state.gate().await?;
    let mut jobs = state.jobs.lock().unwrap();
    let job = jobs
        .iter_mut()
        .find(|j| j.id == id)
        .ok_or_else(|| not_found(&id))?;
    job.applications_count += 1;
    Ok(Json(job.clone()))
}

async fn job_stats(State(state): State<Arc<MockState>>) -> Result<Json<JobStats>, Failure> {
    state.gate().await?;
    let jobs = state.jobs.lock().unwrap();
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
    Ok(Json(stats))
}

async fn search_jobs(
    State(state): State<Arc<MockState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Vec<JobPosting>>, Failure> {
    state.gate().await?;
    let needle = params.get("q").cloned().unwrap_or_default();
    Ok(Json(
        state
            .jobs
            .lock()
            .unwrap()
            .iter()
            .filter(|j| j.title.contains(needle.as_str()))
            .cloned()
            .collect(),
    ))
}

fn demo_user() -> Value {
    json!({
        "id": "1",
        "name": "Alex Morgan",
        "email": DEMO_EMAIL,
        "avatar": "https://images.unsplash.com/photo-1472099645785-5658abf4ff4e?w=100",
        "role": "admin"
    })
}

async fn login(State(state): State<Arc<MockState>>, Json(body): Json<Value>) -> Response {
    state.login_calls.fetch_add(1, Ordering::SeqCst);
    if body["email"] == DEMO_EMAIL && body["password"] == DEMO_PASSWORD {
        (
            [(header::SET_COOKIE, "session=demo; Path=/; HttpOnly")],
            Json(json!({ "user": demo_user(), "expiresIn": 3600 })),
        )
            .into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Invalid credentials" })),
        )
            .into_response()
    }
}

async fn me(headers: HeaderMap) -> Response {
    let signed_in = headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|cookies| cookies.contains("session=demo"));
    if signed_in {
        Json(json!({ "user": demo_user() })).into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Not authenticated" })),
        )
            .into_response()
    }
}
