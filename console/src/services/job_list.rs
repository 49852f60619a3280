//! View state for the jobs table.
//!
//! The controller owns the [`ListQuery`] and the last successful page, and
//! publishes every transition on a `watch` channel. Phases run
//! Idle → Loading → Loaded | Failed and re-enter Loading on any query change.
//!
//! Each fetch takes a sequence number when issued; a response is applied only
//! if its number is still the latest issued, so a slow response can never
//! overwrite a fresher one. Search input is debounced by a cancellable timer
//! task; every other trigger fetches immediately and cancels a pending search.

use crate::api::common::PaginationResult;
use crate::api::jobs::JobCollection;
use crate::errors::{ApiError, ApiResult};
use crate::models::job::{
    ExperienceLevel, JobFormData, JobPosting, JobStatus, JobType, JobUpdate, ListQuery, SortOrder,
    normalize_search,
};
use crate::services::notification_service::NotificationCenter;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListPhase {
    Idle,
    Loading,
    Loaded,
    Failed,
}

/// Everything the jobs table renders.
#[derive(Debug, Clone, PartialEq)]
pub struct ListState {
    pub phase: ListPhase,
    pub query: ListQuery,
    /// Last successful page, with local mutation results spliced in.
    pub data: PaginationResult<JobPosting>,
    pub last_error: Option<String>,
}

impl ListState {
    pub fn is_loading(&self) -> bool {
        self.phase == ListPhase::Loading
    }

    pub fn can_go_previous(&self) -> bool {
        self.query.page > 1
    }

    pub fn can_go_next(&self) -> bool {
        self.query.page < self.data.total_pages
    }
}

struct Shared {
    api: Arc<dyn JobCollection>,
    notifications: NotificationCenter,
    state: watch::Sender<ListState>,
    latest_seq: AtomicU64,
    pending_search: Mutex<Option<JoinHandle<()>>>,
    debounce: Duration,
}

#[derive(Clone)]
pub struct JobListController {
    shared: Arc<Shared>,
}

impl JobListController {
    pub fn new(
        api: Arc<dyn JobCollection>,
        notifications: NotificationCenter,
        page_size: u32,
        debounce: Duration,
    ) -> Self {
        let query = ListQuery::new(page_size);
        let (state, _) = watch::channel(ListState {
            phase: ListPhase::Idle,
            data: PaginationResult::empty(query.page_size),
            query,
            last_error: None,
        });

        Self {
            shared: Arc::new(Shared {
                api,
                notifications,
                state,
                latest_seq: AtomicU64::new(0),
                pending_search: Mutex::new(None),
                debounce,
            }),
        }
    }

    pub fn state(&self) -> ListState {
        self.shared.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ListState> {
        self.shared.state.subscribe()
    }

    /// Initial load.
    pub async fn mount(&self) {
        self.fetch_now().await;
    }

    pub async fn refresh(&self) {
        self.fetch_now().await;
    }

    pub async fn set_status_filter(&self, status: Option<JobStatus>) {
        self.requery(|q| q.status_filter = status).await;
    }

    pub async fn set_job_type(&self, job_type: Option<JobType>) {
        self.requery(|q| q.job_type = job_type).await;
    }

    pub async fn set_experience(&self, experience: Option<ExperienceLevel>) {
        self.requery(|q| q.experience = experience).await;
    }

    pub async fn set_location(&self, location: Option<&str>) {
        let location = location.and_then(normalize_search);
        self.requery(|q| q.location = location).await;
    }

    pub async fn set_sort(&self, sort_by: Option<&str>, sort_order: Option<SortOrder>) {
        let sort_by = sort_by.map(str::to_string);
        self.requery(|q| {
            q.sort_by = sort_by;
            q.sort_order = sort_order;
        })
        .await;
    }

    /// Records the search text and schedules a fetch after the quiet period.
    /// Each call restarts the timer. Must be called inside a Tokio runtime.
    pub fn set_search_text(&self, text: &str) {
        let search = normalize_search(text);
        let changed = self.shared.state.send_if_modified(|state| {
            if state.query.search_text == search {
                return false;
            }
            state.query.search_text = search;
            state.query.page = 1;
            true
        });
        if changed {
            self.schedule_search();
        }
    }

    /// Returns false when already on the last page.
    pub async fn next_page(&self) -> bool {
        if !self.state().can_go_next() {
            return false;
        }
        self.requery(|q| q.page += 1).await;
        true
    }

    /// Returns false when already on the first page.
    pub async fn previous_page(&self) -> bool {
        if !self.state().can_go_previous() {
            return false;
        }
        self.requery(|q| q.page -= 1).await;
        true
    }

    pub async fn create(&self, data: &JobFormData) -> ApiResult<JobPosting> {
        match self.shared.api.create(data).await {
            Ok(job) => {
                self.splice(|page| {
                    page.items.insert(0, job.clone());
                    page.set_total_count(page.total_count + 1);
                });
                self.shared.notifications.success("Job created successfully!");
                Ok(job)
            }
            Err(e) => Err(self.fail(e, "Failed to create job")),
        }
    }

    pub async fn update(&self, id: &str, update: &JobUpdate) -> ApiResult<JobPosting> {
        self.apply_update(id, update, "Job updated successfully!", "Failed to update job")
            .await
    }

    /// Flips open ↔ closed (drafts reopen).
    pub async fn toggle_status(&self, job: &JobPosting) -> ApiResult<JobPosting> {
        let status = job.status.toggled();
        let success = match status {
            JobStatus::Open => "Job reopened successfully!",
            _ => "Job closed successfully!",
        };
        self.apply_update(
            &job.id,
            &JobUpdate::status(status),
            success,
            "Failed to update job status",
        )
        .await
    }

    pub async fn delete(&self, id: &str) -> ApiResult<()> {
        match self.shared.api.delete(id).await {
            Ok(_) => {
                self.splice(|page| {
                    let before = page.items.len();
                    page.items.retain(|j| j.id != id);
                    if page.items.len() < before {
                        page.set_total_count(page.total_count.saturating_sub(1));
                    }
                });
                self.shared.notifications.success("Job deleted successfully!");
                Ok(())
            }
            Err(e) => Err(self.fail(e, "Failed to delete job")),
        }
    }

    async fn apply_update(
        &self,
        id: &str,
        update: &JobUpdate,
        success: &str,
        failure: &str,
    ) -> ApiResult<JobPosting> {
        match self.shared.api.update(id, update).await {
            Ok(job) => {
                self.splice(|page| {
                    if let Some(slot) = page.items.iter_mut().find(|j| j.id == job.id) {
                        *slot = job.clone();
                    }
                });
                self.shared.notifications.success(success);
                Ok(job)
            }
            Err(e) => Err(self.fail(e, failure)),
        }
    }

    fn splice(&self, edit: impl FnOnce(&mut PaginationResult<JobPosting>)) {
        self.shared.state.send_modify(|state| {
            edit(&mut state.data);
            if state.phase != ListPhase::Loading {
                state.phase = ListPhase::Loaded;
                // Removing the last row of the final page pulls the query back too.
                state.query.page = state.data.page;
            }
            state.last_error = None;
        });
    }

    /// Marks the list failed and notifies once. Data is left as it was.
    fn fail(&self, error: ApiError, fallback: &str) -> ApiError {
        let message = error.user_message(fallback);
        self.shared.state.send_modify(|state| {
            state.phase = ListPhase::Failed;
            state.last_error = Some(message.clone());
        });
        self.shared.notifications.error(message);
        error
    }

    async fn requery(&self, edit: impl FnOnce(&mut ListQuery)) {
        self.shared.state.send_modify(|state| {
            let page = state.query.page;
            edit(&mut state.query);
            // Any filter change starts over from the first page.
            if state.query.page == page {
                state.query.page = 1;
            }
        });
        self.fetch_now().await;
    }

    fn schedule_search(&self) {
        let controller = self.clone();
        let delay = self.shared.debounce;
        let timer = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Detached so a later keystroke cancels only the timer, never a
            // request already on the wire.
            tokio::spawn(async move { controller.fetch().await });
        });

        let mut pending = self
            .shared
            .pending_search
            .lock()
            .unwrap_or_else(|e| e.into_inner());
        if let Some(previous) = pending.replace(timer) {
            previous.abort();
            debug!("Search debounce restarted");
        }
    }

    fn cancel_pending_search(&self) {
        let pending = self
            .shared
            .pending_search
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take();
        if let Some(timer) = pending {
            timer.abort();
        }
    }

    async fn fetch_now(&self) {
        self.cancel_pending_search();
        self.fetch().await;
    }

    async fn fetch(&self) {
        loop {
            let seq = self.shared.latest_seq.fetch_add(1, Ordering::SeqCst) + 1;
            let mut query = ListQuery::default();
            self.shared.state.send_modify(|state| {
                state.phase = ListPhase::Loading;
                query = state.query.clone();
            });

            let result = self.shared.api.try_list(&query).await;

            let mut clamped = false;
            let mut failure = None;
            let applied = self.shared.state.send_if_modified(|state| {
                if self.shared.latest_seq.load(Ordering::SeqCst) != seq {
                    return false;
                }
                match result {
                    Ok(page) => {
                        let last = page.total_pages.max(1);
                        if query.page > last {
                            state.query.page = last;
                            clamped = true;
                        }
                        state.data = page;
                        state.phase = ListPhase::Loaded;
                        state.last_error = None;
                    }
                    Err(e) => {
                        let message = e.user_message("Failed to load jobs");
                        state.phase = ListPhase::Failed;
                        state.last_error = Some(message.clone());
                        failure = Some(message);
                    }
                }
                true
            });

            if !applied {
                debug!("Discarding stale job listing response #{}", seq);
                return;
            }
            if let Some(message) = failure {
                self.shared.notifications.error(message);
                return;
            }
            if !clamped {
                return;
            }
            debug!("Requested page is past the end, reloading the last page");
        }
    }
}
