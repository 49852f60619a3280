//! Authentication and the session gate.
//!
//! This module provides the login payloads, the [`Authenticator`] seam with
//! its HTTP implementation, and the [`SessionStore`] protected views consult.

pub mod models;
pub mod service;
pub mod session;

// Re-exports for convenience
pub use models::{LoginRequest, Session, UserInfo};
pub use service::{Authenticator, HttpAuthenticator};
pub use session::{AuthState, SessionStore};
