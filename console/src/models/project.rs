//! Portfolio projects shown on the projects page.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    Active,
    Completed,
    InProgress,
    Archived,
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProjectStatus::Active => write!(f, "active"),
            ProjectStatus::Completed => write!(f, "completed"),
            ProjectStatus::InProgress => write!(f, "in-progress"),
            ProjectStatus::Archived => write!(f, "archived"),
        }
    }
}

impl std::str::FromStr for ProjectStatus {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(ProjectStatus::Active),
            "completed" => Ok(ProjectStatus::Completed),
            "in-progress" => Ok(ProjectStatus::InProgress),
            "archived" => Ok(ProjectStatus::Archived),
            _ => Err(format!("Invalid project status: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub title: String,
    pub description: String,
    pub tech_stack: Vec<String>,
    pub github_url: String,
    pub live_url: String,
    pub status: ProjectStatus,
    pub image: String,
    pub created_at: NaiveDate,
}

impl Project {
    /// Active and in-progress projects count as running on the dashboard.
    pub fn is_running(&self) -> bool {
        matches!(self.status, ProjectStatus::Active | ProjectStatus::InProgress)
    }

    pub fn matches(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.title.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
            || self
                .tech_stack
                .iter()
                .any(|tech| tech.to_lowercase().contains(&needle))
    }
}

pub const DEFAULT_PROJECT_IMAGE: &str =
    "https://images.unsplash.com/photo-1555066931-4365d14bab8c?w=400&h=250&fit=crop";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProjectFormData {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,

    #[validate(length(min = 10, message = "Description must be at least 10 characters"))]
    pub description: String,

    pub tech_stack: Vec<String>,

    #[validate(custom(function = "validate_optional_url"))]
    pub github_url: String,

    #[validate(custom(function = "validate_optional_url"))]
    pub live_url: String,

    pub status: ProjectStatus,

    #[validate(custom(function = "validate_url"))]
    pub image: String,
}

impl Default for ProjectFormData {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            tech_stack: Vec::new(),
            github_url: String::new(),
            live_url: String::new(),
            status: ProjectStatus::Active,
            image: DEFAULT_PROJECT_IMAGE.to_string(),
        }
    }
}

impl From<&Project> for ProjectFormData {
    fn from(project: &Project) -> Self {
        Self {
            title: project.title.clone(),
            description: project.description.clone(),
            tech_stack: project.tech_stack.clone(),
            github_url: project.github_url.clone(),
            live_url: project.live_url.clone(),
            status: project.status,
            image: project.image.clone(),
        }
    }
}

impl ProjectFormData {
    /// Adds a technology tag, ignoring blanks and duplicates.
    pub fn add_tech(&mut self, tech: &str) -> bool {
        let tech = tech.trim();
        if tech.is_empty() || self.tech_stack.iter().any(|t| t == tech) {
            return false;
        }
        self.tech_stack.push(tech.to_string());
        true
    }

    pub fn remove_tech(&mut self, tech: &str) {
        self.tech_stack.retain(|t| t != tech);
    }
}

fn validate_url(value: &str) -> Result<(), validator::ValidationError> {
    match url::Url::parse(value) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") && parsed.has_host() => Ok(()),
        _ => Err(validator::ValidationError::new("url").with_message("Must be a valid URL".into())),
    }
}

fn validate_optional_url(value: &str) -> Result<(), validator::ValidationError> {
    if value.is_empty() {
        return Ok(());
    }
    validate_url(value)
}
