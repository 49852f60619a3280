//! Job posting entities and the payloads exchanged with the jobs endpoint.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use validator::Validate;

/// Wire format for deadlines sent to the backend.
pub const DEADLINE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum JobType {
    FullTime,
    PartTime,
    Contract,
    Internship,
}

impl std::fmt::Display for JobType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobType::FullTime => write!(f, "full-time"),
            JobType::PartTime => write!(f, "part-time"),
            JobType::Contract => write!(f, "contract"),
            JobType::Internship => write!(f, "internship"),
        }
    }
}

impl std::str::FromStr for JobType {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "full-time" => Ok(JobType::FullTime),
            "part-time" => Ok(JobType::PartTime),
            "contract" => Ok(JobType::Contract),
            "internship" => Ok(JobType::Internship),
            _ => Err(format!("Invalid job type: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    Entry,
    Mid,
    Senior,
    Lead,
}

impl std::fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExperienceLevel::Entry => write!(f, "entry"),
            ExperienceLevel::Mid => write!(f, "mid"),
            ExperienceLevel::Senior => write!(f, "senior"),
            ExperienceLevel::Lead => write!(f, "lead"),
        }
    }
}

impl std::str::FromStr for ExperienceLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "entry" => Ok(ExperienceLevel::Entry),
            "mid" => Ok(ExperienceLevel::Mid),
            "senior" => Ok(ExperienceLevel::Senior),
            "lead" => Ok(ExperienceLevel::Lead),
            _ => Err(format!("Invalid experience level: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Open,
    Closed,
    Draft,
}

impl JobStatus {
    /// Status a toggle moves to: open jobs close, anything else reopens.
    pub fn toggled(self) -> Self {
        match self {
            JobStatus::Open => JobStatus::Closed,
            JobStatus::Closed | JobStatus::Draft => JobStatus::Open,
        }
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobStatus::Open => write!(f, "open"),
            JobStatus::Closed => write!(f, "closed"),
            JobStatus::Draft => write!(f, "draft"),
        }
    }
}

impl std::str::FromStr for JobStatus {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(JobStatus::Open),
            "closed" => Ok(JobStatus::Closed),
            "draft" => Ok(JobStatus::Draft),
            _ => Err(format!("Invalid job status: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// A job posting as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPosting {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub job_type: JobType,
    #[serde(rename = "experience")]
    pub experience_level: ExperienceLevel,
    #[serde(rename = "salary")]
    pub salary_text: String,
    pub location: String,
    #[serde(
        deserialize_with = "deserialize_deadline",
        serialize_with = "serialize_deadline"
    )]
    pub deadline: NaiveDate,
    pub description: String,
    pub status: JobStatus,
    #[serde(default)]
    pub applications_count: u32,
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

/// Create payload, and the values a job form edits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct JobFormData {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,

    #[serde(rename = "type")]
    pub job_type: JobType,

    pub experience: ExperienceLevel,

    #[validate(length(min = 1, message = "Salary is required"))]
    pub salary: String,

    #[validate(length(min = 1, message = "Location is required"))]
    pub location: String,

    #[validate(custom(function = "validate_deadline"))]
    pub deadline: String,

    #[validate(length(min = 10, message = "Description must be at least 10 characters"))]
    pub description: String,

    pub status: JobStatus,
}

// Custom validation function
fn validate_deadline(deadline: &str) -> Result<(), validator::ValidationError> {
    if deadline.trim().is_empty() {
        return Err(validator::ValidationError::new("required")
            .with_message("Deadline is required".into()));
    }
    if NaiveDate::parse_from_str(deadline.trim(), DEADLINE_FORMAT).is_err() {
        return Err(validator::ValidationError::new("date")
            .with_message("Deadline must be a date (YYYY-MM-DD)".into()));
    }
    Ok(())
}

impl Default for JobFormData {
    fn default() -> Self {
        Self {
            title: String::new(),
            job_type: JobType::FullTime,
            experience: ExperienceLevel::Mid,
            salary: String::new(),
            location: String::new(),
            deadline: String::new(),
            description: String::new(),
            status: JobStatus::Open,
        }
    }
}

impl From<&JobPosting> for JobFormData {
    fn from(job: &JobPosting) -> Self {
        Self {
            title: job.title.clone(),
            job_type: job.job_type,
            experience: job.experience_level,
            salary: job.salary_text.clone(),
            location: job.location.clone(),
            deadline: job.deadline.format(DEADLINE_FORMAT).to_string(),
            description: job.description.clone(),
            status: job.status,
        }
    }
}

/// Partial update payload. Unset fields are left out of the request body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub job_type: Option<JobType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience: Option<ExperienceLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<JobStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applications_count: Option<u32>,
}

impl JobUpdate {
    pub fn status(status: JobStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

impl From<JobFormData> for JobUpdate {
    fn from(data: JobFormData) -> Self {
        Self {
            title: Some(data.title),
            job_type: Some(data.job_type),
            experience: Some(data.experience),
            salary: Some(data.salary),
            location: Some(data.location),
            deadline: Some(data.deadline),
            description: Some(data.description),
            status: Some(data.status),
            applications_count: None,
        }
    }
}

/// Filter, search and pagination state for one job listing.
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery {
    pub page: u32,
    pub page_size: u32,
    pub status_filter: Option<JobStatus>,
    pub search_text: Option<String>,
    pub job_type: Option<JobType>,
    pub experience: Option<ExperienceLevel>,
    pub location: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
}

impl ListQuery {
    pub fn new(page_size: u32) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
            status_filter: None,
            search_text: None,
            job_type: None,
            experience: None,
            location: None,
            sort_by: None,
            sort_order: None,
        }
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    pub fn with_status(mut self, status: Option<JobStatus>) -> Self {
        self.status_filter = status;
        self
    }

    pub fn with_search(mut self, text: &str) -> Self {
        self.search_text = normalize_search(text);
        self
    }

    /// Request parameters in the backend's naming.
    pub fn to_params(&self) -> ListParams<'_> {
        ListParams {
            page: self.page.max(1),
            limit: self.page_size.max(1),
            job_type: self.job_type,
            experience: self.experience,
            status: self.status_filter,
            location: self.location.as_deref(),
            search: self.search_text.as_deref(),
            sort_by: self.sort_by.as_deref(),
            sort_order: self.sort_order,
        }
    }
}

impl Default for ListQuery {
    fn default() -> Self {
        Self::new(10)
    }
}

/// Whitespace-only search text means "no search".
pub fn normalize_search(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Query string for `GET /jobs`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams<'a> {
    pub page: u32,
    pub limit: u32,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub job_type: Option<JobType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience: Option<ExperienceLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<JobStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<SortOrder>,
}

/// `GET /jobs` response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobsListResponse {
    pub jobs: Vec<JobPosting>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    #[serde(default)]
    pub pages: u32,
}

/// `GET /jobs/stats` response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobStats {
    pub total: u64,
    #[serde(default)]
    pub by_type: BTreeMap<String, u64>,
    #[serde(default)]
    pub by_status: BTreeMap<String, u64>,
    #[serde(default)]
    pub by_experience: BTreeMap<String, u64>,
}

impl JobStats {
    pub fn count_by_status(&self, status: JobStatus) -> u64 {
        self.by_status
            .get(&status.to_string())
            .copied()
            .unwrap_or(0)
    }
}

/// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp.
fn deserialize_deadline<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let raw = String::deserialize(deserializer)?;
    parse_deadline(&raw).ok_or_else(|| Error::custom(format!("Invalid deadline '{}'", raw)))
}

fn serialize_deadline<S>(deadline: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&deadline.format(DEADLINE_FORMAT).to_string())
}

pub fn parse_deadline(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, DEADLINE_FORMAT)
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.with_timezone(&Utc).date_naive())
        })
}
