//! Talks to the authentication endpoint.

use crate::api::client::HttpClient;
use crate::auth::models::{CurrentUserResponse, LoginRequest, LoginResponse, Session};
use crate::errors::ApiResult;
use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use tracing::{debug, info};

/// Source of truth for credentials and session restore.
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// `Ok(None)` when the credentials are rejected.
    async fn login(&self, request: &LoginRequest) -> ApiResult<Option<Session>>;

    /// Looks up an existing session. `Ok(None)` when there is none or the
    /// backend does not support restore.
    async fn restore(&self) -> ApiResult<Option<Session>>;
}

/// Cookie-backed authentication against `/auth/login` and `/auth/me`.
#[derive(Debug, Clone)]
pub struct HttpAuthenticator {
    http: HttpClient,
}

impl HttpAuthenticator {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }
}

fn is_rejection(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN
    )
}

#[async_trait]
impl Authenticator for HttpAuthenticator {
    async fn login(&self, request: &LoginRequest) -> ApiResult<Option<Session>> {
        let builder = self
            .http
            .request(Method::POST, &["auth", "login"])?
            .json(request);
        let response = self.http.execute(builder).await?;

        if is_rejection(response.status()) {
            debug!("Login rejected for {} ({})", request.email, response.status());
            return Ok(None);
        }

        let response = self.http.check_status(response).await?;
        let body: LoginResponse = self.http.decode(response).await?;
        info!("Logged in as {}", body.user.email);
        Ok(Some(Session::from_user(body.user, body.expires_in)))
    }

    async fn restore(&self) -> ApiResult<Option<Session>> {
        let builder = self.http.request(Method::GET, &["auth", "me"])?;
        let response = self.http.execute(builder).await?;

        let status = response.status();
        if is_rejection(status) || status == StatusCode::NOT_FOUND {
            debug!("No session to restore ({})", status);
            return Ok(None);
        }

        let response = self.http.check_status(response).await?;
        let body: CurrentUserResponse = self.http.decode(response).await?;
        Ok(Some(Session::from_user(body.user, body.expires_in)))
    }
}

