//! Create/edit form handling independent of how lists are displayed.
//!
//! A [`FormController`] validates its payload locally (nothing reaches the
//! network on a validation failure), then hands it to a [`FormTarget`]. While
//! a submission is pending, further submissions are refused.

use crate::api::common::{FieldError, validation_errors_to_field_errors};
use crate::errors::{ApiError, ApiResult};
use crate::models::job::{JobFormData, JobPosting, JobUpdate};
use crate::models::project::{Project, ProjectFormData};
use crate::services::job_list::JobListController;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use validator::Validate;

/// Fixed for the lifetime of one form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { id: String },
}

/// Where a validated form payload goes.
#[async_trait]
pub trait FormTarget<F>: Send + Sync {
    async fn submit_create(&self, data: &F) -> ApiResult<()>;
    async fn submit_update(&self, id: &str, data: &F) -> ApiResult<()>;
}

pub struct FormController<F> {
    mode: FormMode,
    initial: F,
    target: Arc<dyn FormTarget<F>>,
    submitting: AtomicBool,
    errors: Mutex<Vec<FieldError>>,
}

// Clears the pending flag even if the submit future is dropped.
struct PendingGuard<'a>(&'a AtomicBool);

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl<F> FormController<F>
where
    F: Validate + Clone + Send + Sync,
{
    /// Empty form in create mode.
    pub fn create(target: Arc<dyn FormTarget<F>>) -> Self
    where
        F: Default,
    {
        Self::with_mode(FormMode::Create, F::default(), target)
    }

    /// Form pre-populated from an existing entity.
    pub fn edit(id: impl Into<String>, initial: F, target: Arc<dyn FormTarget<F>>) -> Self {
        Self::with_mode(FormMode::Edit { id: id.into() }, initial, target)
    }

    fn with_mode(mode: FormMode, initial: F, target: Arc<dyn FormTarget<F>>) -> Self {
        Self {
            mode,
            initial,
            target,
            submitting: AtomicBool::new(false),
            errors: Mutex::new(Vec::new()),
        }
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn initial_values(&self) -> &F {
        &self.initial
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::SeqCst)
    }

    /// Errors from the last validation, sorted by field.
    pub fn field_errors(&self) -> Vec<FieldError> {
        self.errors.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn error_for(&self, field: &str) -> Option<String> {
        self.field_errors()
            .into_iter()
            .find(|e| e.field == field)
            .map(|e| e.message)
    }

    pub fn validate(&self, data: &F) -> Result<(), Vec<FieldError>> {
        let result = data
            .validate()
            .map_err(validation_errors_to_field_errors);
        *self.errors.lock().unwrap_or_else(|e| e.into_inner()) = match &result {
            Ok(()) => Vec::new(),
            Err(fields) => fields.clone(),
        };
        result
    }

    pub async fn submit(&self, data: F) -> ApiResult<()> {
        if self.submitting.swap(true, Ordering::SeqCst) {
            return Err(ApiError::SubmissionPending);
        }
        let _pending = PendingGuard(&self.submitting);

        self.validate(&data).map_err(ApiError::validation)?;

        match &self.mode {
            FormMode::Create => self.target.submit_create(&data).await,
            FormMode::Edit { id } => self.target.submit_update(id, &data).await,
        }
    }
}

impl FormController<JobFormData> {
    pub fn for_job(job: &JobPosting, target: Arc<dyn FormTarget<JobFormData>>) -> Self {
        Self::edit(job.id.clone(), JobFormData::from(job), target)
    }
}

impl FormController<ProjectFormData> {
    pub fn for_project(project: &Project, target: Arc<dyn FormTarget<ProjectFormData>>) -> Self {
        Self::edit(project.id.clone(), ProjectFormData::from(project), target)
    }
}

#[async_trait]
impl FormTarget<JobFormData> for JobListController {
    async fn submit_create(&self, data: &JobFormData) -> ApiResult<()> {
        self.create(data).await.map(|_| ())
    }

    async fn submit_update(&self, id: &str, data: &JobFormData) -> ApiResult<()> {
        self.update(id, &JobUpdate::from(data.clone()))
            .await
            .map(|_| ())
    }
}
