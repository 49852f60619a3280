//! Service for the projects page.
//!
//! Projects have no backend endpoint; the catalog keeps them in memory and
//! assigns ids client-side.

use crate::api::common::validation_errors_to_field_errors;
use crate::errors::{ApiError, ApiResult};
use crate::models::project::{Project, ProjectFormData, ProjectStatus};
use crate::services::form_service::FormTarget;
use crate::services::notification_service::NotificationCenter;
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;
use validator::Validate;

pub struct ProjectCatalog {
    projects: RwLock<Vec<Project>>,
    notifications: NotificationCenter,
}

impl ProjectCatalog {
    pub fn new(notifications: NotificationCenter) -> Self {
        Self::with_projects(Vec::new(), notifications)
    }

    pub fn with_projects(projects: Vec<Project>, notifications: NotificationCenter) -> Self {
        Self {
            projects: RwLock::new(projects),
            notifications,
        }
    }

    /// Projects matching the optional status and search text, newest first.
    pub async fn list(&self, status: Option<ProjectStatus>, search: &str) -> Vec<Project> {
        let search = search.trim();
        self.projects
            .read()
            .await
            .iter()
            .filter(|p| status.is_none_or(|s| p.status == s))
            .filter(|p| search.is_empty() || p.matches(search))
            .cloned()
            .collect()
    }

    pub async fn get(&self, id: &str) -> ApiResult<Project> {
        self.projects
            .read()
            .await
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| ApiError::not_found("Project", id))
    }

    pub async fn create(&self, data: &ProjectFormData) -> ApiResult<Project> {
        data.validate()
            .map_err(|e| ApiError::validation(validation_errors_to_field_errors(e)))?;

        let project = Project {
            id: Uuid::now_v7().to_string(),
            title: data.title.trim().to_string(),
            description: data.description.clone(),
            tech_stack: data.tech_stack.clone(),
            github_url: data.github_url.clone(),
            live_url: data.live_url.clone(),
            status: data.status,
            image: data.image.clone(),
            created_at: Utc::now().date_naive(),
        };
        self.projects.write().await.insert(0, project.clone());
        debug!("Created project {}", project.id);

        self.notifications.success("Project created successfully!");
        Ok(project)
    }

    pub async fn update(&self, id: &str, data: &ProjectFormData) -> ApiResult<Project> {
        data.validate()
            .map_err(|e| ApiError::validation(validation_errors_to_field_errors(e)))?;

        let updated = {
            let mut projects = self.projects.write().await;
            let Some(project) = projects.iter_mut().find(|p| p.id == id) else {
                self.notifications.error("Project not found");
                return Err(ApiError::not_found("Project", id));
            };
            project.title = data.title.trim().to_string();
            project.description = data.description.clone();
            project.tech_stack = data.tech_stack.clone();
            project.github_url = data.github_url.clone();
            project.live_url = data.live_url.clone();
            project.status = data.status;
            project.image = data.image.clone();
            project.clone()
        };

        self.notifications.success("Project updated successfully!");
        Ok(updated)
    }

    pub async fn delete(&self, id: &str) -> ApiResult<()> {
        let removed = {
            let mut projects = self.projects.write().await;
            let before = projects.len();
            projects.retain(|p| p.id != id);
            projects.len() < before
        };
        if !removed {
            self.notifications.error("Project not found");
            return Err(ApiError::not_found("Project", id));
        }

        self.notifications.success("Project deleted successfully!");
        Ok(())
    }

    pub async fn total(&self) -> usize {
        self.projects.read().await.len()
    }

    /// Active plus in-progress.
    pub async fn running_count(&self) -> usize {
        self.projects
            .read()
            .await
            .iter()
            .filter(|p| p.is_running())
            .count()
    }
}

#[async_trait]
impl FormTarget<ProjectFormData> for ProjectCatalog {
    async fn submit_create(&self, data: &ProjectFormData) -> ApiResult<()> {
        self.create(data).await.map(|_| ())
    }

    async fn submit_update(&self, id: &str, data: &ProjectFormData) -> ApiResult<()> {
        self.update(id, data).await.map(|_| ())
    }
}
