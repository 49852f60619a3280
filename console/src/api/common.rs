//! Shared shapes for talking to the backend.
//!
//! Provides:
//! - Pagination results normalized from the backend's list envelope
//! - Field-scoped validation errors and their conversion from `validator`
//! - The error body the backend sends with non-2xx responses
//!
//! # Pagination
//! The backend reports `{ total, page, limit, pages }` alongside the items.
//! The client never trusts `pages`: `total_pages` is recomputed as
//! `ceil(total_count / page_size)` and `page` is clamped to
//! `[1, max(total_pages, 1)]`.

use serde::{Deserialize, Serialize};

/// One page of a remote collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginationResult<T> {
    /// Items for the current page, in server order
    pub items: Vec<T>,
    /// Current page number (1-indexed)
    pub page: u32,
    /// Number of items per page
    pub page_size: u32,
    /// Total number of items across all pages
    pub total_count: u64,
    /// Total number of pages
    pub total_pages: u32,
}

/// Field-specific validation error details
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Name of the field with validation error
    pub field: String,
    /// Description of the validation failure
    pub message: String,
}

/// Error payload the backend attaches to failed requests.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    pub message: Option<String>,
    pub error: Option<String>,
}

impl ErrorBody {
    pub fn into_message(self) -> Option<String> {
        self.message.or(self.error).filter(|m| !m.trim().is_empty())
    }
}

/// Acknowledgement returned by delete-style endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Acknowledgement {
    pub message: String,
}

/// `ceil(total_count / page_size)`; zero when nothing matched.
pub fn total_pages(total_count: u64, page_size: u32) -> u32 {
    let page_size = page_size.max(1) as u64;
    total_count.div_ceil(page_size) as u32
}

impl<T> PaginationResult<T> {
    /// Builds a result from server data, recomputing derived fields.
    pub fn new(items: Vec<T>, page: u32, page_size: u32, total_count: u64) -> Self {
        let page_size = page_size.max(1);
        let total_pages = total_pages(total_count, page_size);
        let page = page.clamp(1, total_pages.max(1));

        Self {
            items,
            page,
            page_size,
            total_count,
            total_pages,
        }
    }

    /// The well-formed empty page used when a listing degrades.
    pub fn empty(page_size: u32) -> Self {
        Self::new(Vec::new(), 1, page_size, 0)
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Adjusts counts after a local insert or removal.
    pub(crate) fn set_total_count(&mut self, total_count: u64) {
        self.total_count = total_count;
        self.total_pages = total_pages(total_count, self.page_size);
        self.page = self.page.clamp(1, self.total_pages.max(1));
    }
}

impl<T> Default for PaginationResult<T> {
    fn default() -> Self {
        Self::empty(1)
    }
}

/// Formats validator::ValidationErrors into field-specific error details
pub fn validation_errors_to_field_errors(errors: validator::ValidationErrors) -> Vec<FieldError> {
    let mut fields: Vec<FieldError> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| FieldError {
                field: field.to_string(),
                message: error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| error.code.to_string()),
            })
        })
        .collect();
    fields.sort_by(|a, b| a.field.cmp(&b.field));
    fields
}
