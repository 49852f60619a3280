//! Main entry point for the admin console.
//!
//! Signs in against the configured backend, then prints the dashboard and
//! the first page of job postings.

use admin_console::api::{HttpClient, JobApi};
use admin_console::auth::{HttpAuthenticator, SessionStore};
use admin_console::config::Config;
use admin_console::services::{
    DashboardService, Inbox, JobListController, NotificationCenter, ProjectCatalog,
    demo_messages, demo_projects,
};
use admin_console::views::{DashboardView, JobListView};
use anyhow::{Context, Result, bail};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::fmt::init;

#[tokio::main]
async fn main() -> Result<()> {
    init();

    let config = Config::from_env()?;
    let http = HttpClient::new(&config).context("Failed to build HTTP client")?;
    info!("Using backend at {}", http.base_url());

    let sessions = SessionStore::new(Arc::new(HttpAuthenticator::new(http.clone())));
    if !sessions.restore().await {
        let (Some(email), Some(password)) = (&config.admin_email, &config.admin_password) else {
            bail!("No active session; set ADMIN_EMAIL and ADMIN_PASSWORD to sign in");
        };
        if !sessions.login(email, password).await? {
            bail!("Invalid email or password");
        }
    }
    let session = sessions.require_session()?;

    let notifications = NotificationCenter::new();
    let jobs = Arc::new(JobApi::new(http));
    let dashboard = DashboardService::new(
        jobs.clone(),
        Arc::new(ProjectCatalog::with_projects(
            demo_projects(),
            notifications.clone(),
        )),
        Arc::new(Inbox::new(demo_messages(), notifications.clone())),
    );
    println!("{}", DashboardView(&dashboard.summary(&session).await));

    let list = JobListController::new(
        jobs,
        notifications,
        config.page_size,
        config.search_debounce,
    );
    list.mount().await;
    print!("{}", JobListView(&list.state()));

    Ok(())
}
