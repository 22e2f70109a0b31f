//! Session management for the Pi-hole v6 API.
//!
//! A successful login yields an opaque session id and an anti-forgery token,
//! both of which must accompany every authenticated call. This module owns
//! that lifecycle: the login exchange with its retry/backoff loop, lazy
//! re-authentication when no live session exists, and invalidation when the
//! server rejects a session mid-flight.

use crate::config::ClientConfig;
use crate::constants::{
    AUTH_ENDPOINT, CSRF_HEADER, SESSION_EXPIRY_MARGIN_SECS, SESSION_ID_HEADER,
};
use crate::error::ClientError;
use crate::model::auth::{AuthRequest, AuthResponse};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, error, warn};

/// Server-issued credential pair proving the client has authenticated
#[derive(Debug, Clone)]
pub struct Session {
    /// Opaque session id sent in the `X-FTL-SID` header
    pub sid: String,
    /// Anti-forgery token sent in the `X-FTL-CSRF` header
    pub csrf: String,
    /// Validity window in seconds granted by the server at login
    pub validity_secs: i64,
    /// Timestamp when the session was created
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Creates a session stamped with the current time
    pub fn new(sid: String, csrf: String, validity_secs: i64) -> Self {
        Self {
            sid,
            csrf,
            validity_secs,
            created_at: Utc::now(),
        }
    }

    /// Checks whether the validity window has elapsed, or will elapse within
    /// the given margin
    ///
    /// # Arguments
    /// * `margin_secs` - Safety margin in seconds before actual expiry
    #[must_use]
    pub fn is_expired(&self, margin_secs: i64) -> bool {
        let expires_at = self.created_at + chrono::Duration::seconds(self.validity_secs);
        Utc::now() + chrono::Duration::seconds(margin_secs) >= expires_at
    }

    /// Returns the authentication header pair for this session
    #[must_use]
    pub fn headers(&self) -> [(&'static str, String); 2] {
        [
            (SESSION_ID_HEADER, self.sid.clone()),
            (CSRF_HEADER, self.csrf.clone()),
        ]
    }
}

/// Trait for authenticating with the Pi-hole API
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Performs a fresh login exchange and stores the resulting session.
    ///
    /// Any previously stored session is discarded before the exchange, so a
    /// failed login leaves the client unauthenticated.
    async fn login(&self) -> Result<Session, ClientError>;

    /// Returns the authentication header pair for the live session,
    /// logging in first when no usable session exists.
    ///
    /// This performs network I/O when re-authentication is needed, which is
    /// why it is a method rather than an accessor.
    async fn session_headers(&self) -> Result<[(&'static str, String); 2], ClientError>;

    /// Returns a copy of the current session, if one is live
    async fn current(&self) -> Option<Session>;

    /// Drops the stored session without contacting the server
    async fn invalidate(&self);
}

/// Authentication manager holding the session state for one client.
///
/// The session lives behind a write lock so that concurrent callers cannot
/// interleave the login exchange's read-modify-write; request dispatch
/// itself stays concurrent across distinct requests.
pub struct Auth {
    config: Arc<ClientConfig>,
    http: Client,
    session: Arc<RwLock<Option<Session>>>,
}

impl Auth {
    /// Creates a new authentication manager sharing the client's transport
    ///
    /// # Arguments
    /// * `config` - Client configuration
    /// * `http` - The transport shared with the request path, so login
    ///   reuses the same connection pool and TLS policy
    pub fn new(config: Arc<ClientConfig>, http: Client) -> Self {
        Self {
            config,
            http,
            session: Arc::new(RwLock::new(None)),
        }
    }

    /// Runs the login exchange with exponential backoff.
    ///
    /// Attempts are counted from 1 to `max_retries`; the delay between
    /// attempt `k` and `k+1` is `retry_delay * 2^(k-1)` seconds. The last
    /// captured failure is raised when the budget is exhausted.
    async fn authenticate_with_retry(&self) -> Result<Session, ClientError> {
        let url = format!("{}{}", self.config.base_url, AUTH_ENDPOINT);
        let payload = AuthRequest {
            password: self.config.password.clone(),
        };
        let mut last_failure: Option<ClientError> = None;

        for attempt in 1..=self.config.max_retries {
            debug!(
                "Authentication attempt {}/{}",
                attempt, self.config.max_retries
            );
            match self.try_authenticate(&url, &payload).await {
                Ok(session) => {
                    debug!("Authentication successful");
                    return Ok(session);
                }
                Err(e) => {
                    warn!("Authentication attempt {} failed: {}", attempt, e);
                    last_failure = Some(e);
                }
            }

            if attempt < self.config.max_retries {
                let shift = (attempt - 1).min(63);
                let delay = self.config.retry_delay_secs.saturating_mul(1u64 << shift);
                debug!("Retrying authentication in {} seconds...", delay);
                tokio::time::sleep(Duration::from_secs(delay)).await;
            }
        }

        let cause = match last_failure {
            Some(ClientError::Authentication(msg)) => msg,
            Some(other) => other.to_string(),
            None => String::from("no authentication attempts were made"),
        };
        error!("All authentication attempts failed: {}", cause);
        Err(ClientError::Authentication(cause))
    }

    /// Sends a single login request and interprets the response
    async fn try_authenticate(
        &self,
        url: &str,
        payload: &AuthRequest,
    ) -> Result<Session, ClientError> {
        let response = self
            .http
            .post(url)
            .json(payload)
            .send()
            .await
            .map_err(ClientError::classify)?;
        let status = response.status();

        if status != StatusCode::OK {
            // Try to extract an error message from the body
            let message = match response.json::<AuthResponse>().await {
                Ok(body) => body
                    .session
                    .and_then(|descriptor| descriptor.message)
                    .unwrap_or_else(|| String::from("unknown error")),
                Err(_) => format!(
                    "HTTP {}: {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("Unknown")
                ),
            };
            return Err(ClientError::Authentication(message));
        }

        let body: AuthResponse = response
            .json()
            .await
            .map_err(|_| ClientError::Authentication(String::from("malformed login response")))?;

        match body.session {
            Some(descriptor) if descriptor.valid && descriptor.validity > 0 => {
                match (descriptor.sid, descriptor.csrf) {
                    (Some(sid), Some(csrf)) => Ok(Session::new(sid, csrf, descriptor.validity)),
                    _ => Err(ClientError::Authentication(String::from(
                        "invalid session response",
                    ))),
                }
            }
            Some(descriptor) => {
                error!(
                    "{}",
                    descriptor
                        .message
                        .as_deref()
                        .unwrap_or("API failed without message")
                );
                Err(ClientError::Authentication(String::from(
                    "invalid session response",
                )))
            }
            // A 200 body with no session descriptor at all is an
            // authentication failure, never a guessed default session.
            None => Err(ClientError::Authentication(String::from(
                "missing session in response",
            ))),
        }
    }
}

#[async_trait]
impl Authenticator for Auth {
    async fn login(&self) -> Result<Session, ClientError> {
        let mut guard = self.session.write().await;
        // Unauthenticated until the exchange completes; a failed login must
        // not leave a stale session behind.
        *guard = None;
        let session = self.authenticate_with_retry().await?;
        *guard = Some(session.clone());
        Ok(session)
    }

    async fn session_headers(&self) -> Result<[(&'static str, String); 2], ClientError> {
        {
            let guard = self.session.read().await;
            if let Some(session) = guard.as_ref() {
                if !session.is_expired(SESSION_EXPIRY_MARGIN_SECS) {
                    return Ok(session.headers());
                }
                debug!("Session validity window elapsed, re-authenticating");
            }
        }

        let session = self.login().await?;
        Ok(session.headers())
    }

    async fn current(&self) -> Option<Session> {
        self.session.read().await.clone()
    }

    async fn invalidate(&self) {
        *self.session.write().await = None;
    }
}
