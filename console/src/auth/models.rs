//! Data structures for authentication.
//!
//! This module defines the login payload, the backend's login and
//! current-user responses, and the [`Session`] the console keeps for the
//! signed-in operator.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Login request payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Please enter a valid email"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// User information returned by the auth endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub avatar: String,
    pub role: String,
}

/// Login response containing the user and session lifetime
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user: UserInfo,
    /// Session lifetime in seconds, when the backend reports one
    #[serde(default)]
    pub expires_in: Option<u64>,
}

/// `GET /auth/me` response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUserResponse {
    pub user: UserInfo,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

/// The signed-in operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    pub display_name: String,
    pub email: String,
    pub avatar_ref: String,
    pub role: String,
    pub expires_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn from_user(user: UserInfo, expires_in: Option<u64>) -> Self {
        let expires_at = expires_in.map(|secs| Utc::now() + Duration::seconds(secs as i64));
        Self {
            user_id: user.id,
            display_name: user.name,
            email: user.email,
            avatar_ref: user.avatar,
            role: user.role,
            expires_at,
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }

    /// First name, as used in the dashboard greeting.
    pub fn first_name(&self) -> &str {
        self.display_name
            .split_whitespace()
            .next()
            .unwrap_or(&self.display_name)
    }
}
