//! Session-aware client for the Pi-hole v6 API.
//!
//! This module provides the single entry point for talking to the
//! appliance. It handles:
//! - Automatic authentication and session header injection
//! - Transparent re-authentication and replay when a session expires
//! - Transport-level retry with exponential backoff
//! - Normalization of every response body into [`ApiResponse`]
//!
//! # Example
//! ```ignore
//! use pihole_client::client::PiHoleClient;
//! use pihole_client::config::ClientConfig;
//!
//! let config = ClientConfig::new("http://pi.hole", "my-app-password");
//! let client = PiHoleClient::new(config).await?;
//!
//! // Make requests - authentication is handled automatically
//! let blocking = client.get("dns/blocking", None).await?;
//! ```

use crate::auth::{Auth, Authenticator, Session};
use crate::config::ClientConfig;
use crate::constants::{AUTH_ENDPOINT, DEFAULT_POOL_SIZE, USER_AGENT};
use crate::error::ClientError;
use crate::model::requests::FilePart;
use crate::model::responses::ApiResponse;
use crate::model::retry::RetryPolicy;
use reqwest::{Client as HttpClient, Method, RequestBuilder, Response, StatusCode};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, warn};

/// Client for the Pi-hole management API with automatic authentication.
///
/// Owns the HTTP transport and the session state exclusively; dropping the
/// client tears down the connection pool.
pub struct PiHoleClient {
    auth: Arc<Auth>,
    http: HttpClient,
    config: Arc<ClientConfig>,
    retry: RetryPolicy,
}

impl PiHoleClient {
    /// Creates a new client and performs initial authentication.
    ///
    /// # Arguments
    /// * `config` - Configuration containing the base URL and credential
    ///
    /// # Returns
    /// * `Ok(PiHoleClient)` - Authenticated client ready to use
    /// * `Err(ClientError::Authentication)` - If authentication does not
    ///   succeed within the configured retry budget; no half-initialized
    ///   client is returned
    pub async fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let client = Self::new_lazy(config)?;

        // Authenticate upon initialization
        client.auth.login().await?;

        Ok(client)
    }

    /// Creates a new client without performing initial authentication.
    ///
    /// Authentication happens automatically on the first request.
    pub fn new_lazy(config: ClientConfig) -> Result<Self, ClientError> {
        let config = Arc::new(config);
        let http = build_transport(&config)?;
        let retry = RetryPolicy::from_config(&config);
        let auth = Arc::new(Auth::new(config.clone(), http.clone()));

        Ok(Self {
            auth,
            http,
            config,
            retry,
        })
    }

    /// Sends an authenticated request and normalizes the response.
    ///
    /// The endpoint is joined to the normalized base URL by simple
    /// concatenation; callers supply correctly formatted relative paths such
    /// as `"stats/summary"`.
    ///
    /// On a 401 the client re-authenticates exactly once and resends the
    /// identical request; a second consecutive 401 is surfaced through the
    /// 4xx normalization rules rather than retried again.
    ///
    /// # Arguments
    /// * `method` - HTTP method
    /// * `endpoint` - Relative path under the API root
    /// * `params` - Optional query parameters
    /// * `body` - Optional JSON body, or form fields when `files` is present
    /// * `files` - Optional file attachments; switches the body to multipart
    /// * `binary` - When true, a successful body is returned as raw bytes
    #[allow(clippy::too_many_arguments)]
    pub async fn request(
        &self,
        method: Method,
        endpoint: &str,
        params: Option<&[(&str, &str)]>,
        body: Option<&Value>,
        files: Option<&[FilePart]>,
        binary: bool,
    ) -> Result<ApiResponse, ClientError> {
        let url = format!("{}{}", self.config.base_url, endpoint);
        let headers = self.auth.session_headers().await?;

        debug!("Sending {} request to {}", method, url);
        let mut response = send_with_retry(
            &self.http,
            method.clone(),
            &url,
            &headers,
            params,
            body,
            files,
            &self.retry,
        )
        .await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            warn!("Session expired, re-authenticating");
            let session = self.auth.login().await?;
            let headers = session.headers();
            // One replay only; a second 401 falls through to the 4xx
            // normalization below.
            response = send_with_retry(
                &self.http,
                method,
                &url,
                &headers,
                params,
                body,
                files,
                &self.retry,
            )
            .await?;
        }

        normalize_response(response, binary).await
    }

    /// Sends a GET request
    pub async fn get(
        &self,
        endpoint: &str,
        params: Option<&[(&str, &str)]>,
    ) -> Result<ApiResponse, ClientError> {
        self.request(Method::GET, endpoint, params, None, None, false)
            .await
    }

    /// Sends a GET request expecting a binary body, e.g. a teleporter export
    pub async fn get_binary(
        &self,
        endpoint: &str,
        params: Option<&[(&str, &str)]>,
    ) -> Result<ApiResponse, ClientError> {
        self.request(Method::GET, endpoint, params, None, None, true)
            .await
    }

    /// Sends a POST request with an optional JSON body
    pub async fn post(
        &self,
        endpoint: &str,
        body: Option<&Value>,
    ) -> Result<ApiResponse, ClientError> {
        self.request(Method::POST, endpoint, None, body, None, false)
            .await
    }

    /// Sends a POST request as a multipart form carrying file attachments,
    /// with any `body` entries as ordinary form fields
    pub async fn post_files(
        &self,
        endpoint: &str,
        body: Option<&Value>,
        files: &[FilePart],
    ) -> Result<ApiResponse, ClientError> {
        self.request(Method::POST, endpoint, None, body, Some(files), false)
            .await
    }

    /// Sends a PUT request with an optional JSON body
    pub async fn put(
        &self,
        endpoint: &str,
        body: Option<&Value>,
    ) -> Result<ApiResponse, ClientError> {
        self.request(Method::PUT, endpoint, None, body, None, false)
            .await
    }

    /// Sends a DELETE request
    pub async fn delete(
        &self,
        endpoint: &str,
        params: Option<&[(&str, &str)]>,
        body: Option<&Value>,
    ) -> Result<ApiResponse, ClientError> {
        self.request(Method::DELETE, endpoint, params, body, None, false)
            .await
    }

    /// Sends a PATCH request with an optional JSON body
    pub async fn patch(
        &self,
        endpoint: &str,
        body: Option<&Value>,
    ) -> Result<ApiResponse, ClientError> {
        self.request(Method::PATCH, endpoint, None, body, None, false)
            .await
    }

    /// Returns a copy of the current session, if one is live
    pub async fn session(&self) -> Option<Session> {
        self.auth.current().await
    }

    /// Gets a reference to the underlying authentication manager
    pub fn auth(&self) -> &Auth {
        &self.auth
    }

    /// Deletes the current session on the server and clears it locally.
    ///
    /// Best-effort: logout failures are logged and folded into an error
    /// mapping, never raised. Idempotent - a second call has no live session
    /// to delete and returns [`ApiResponse::Empty`]. The connection pool is
    /// released when the client value is dropped; a later request on this
    /// client simply re-authenticates.
    pub async fn close(&self) -> ApiResponse {
        let result = match self.auth.current().await {
            Some(session) => {
                let url = format!("{}{}", self.config.base_url, AUTH_ENDPOINT);
                let outcome = send_with_retry(
                    &self.http,
                    Method::DELETE,
                    &url,
                    &session.headers(),
                    None,
                    None,
                    None,
                    &self.retry,
                )
                .await;
                match outcome {
                    Ok(response) => normalize_response(response, false)
                        .await
                        .unwrap_or_else(|e| {
                            warn!("Error during session exit: {}", e);
                            ApiResponse::error_mapping(&e.to_string())
                        }),
                    Err(e) => {
                        warn!("Error during session exit: {}", e);
                        ApiResponse::error_mapping(&e.to_string())
                    }
                }
            }
            None => ApiResponse::Empty,
        };

        self.auth.invalidate().await;
        result
    }
}

/// Builds the reqwest transport from the client configuration.
///
/// The pool collapses to a single connection when pooling is disabled. TLS
/// certificate validation follows `verify_tls`; the appliance commonly
/// serves a self-signed certificate, so the flag defaults to off.
fn build_transport(config: &ClientConfig) -> Result<HttpClient, ClientError> {
    let pool_size = if config.disable_connection_pooling {
        1
    } else {
        DEFAULT_POOL_SIZE
    };

    let mut builder = HttpClient::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(config.connection_timeout_secs))
        .connect_timeout(Duration::from_secs(config.connection_timeout_secs))
        .pool_max_idle_per_host(pool_size);

    if !config.verify_tls {
        builder = builder.danger_accept_invalid_certs(true);
    }

    Ok(builder.build()?)
}

/// Builds one attempt of a request from its parts.
///
/// Multipart forms cannot be reused across attempts, so each retry rebuilds
/// the form from the owned file parts.
fn build_request(
    client: &HttpClient,
    method: Method,
    url: &str,
    headers: &[(&'static str, String)],
    params: Option<&[(&str, &str)]>,
    body: Option<&Value>,
    files: Option<&[FilePart]>,
) -> RequestBuilder {
    let mut request = client.request(method, url);

    for (name, value) in headers {
        request = request.header(*name, value);
    }

    if let Some(params) = params {
        request = request.query(params);
    }

    if let Some(files) = files {
        let mut form = reqwest::multipart::Form::new();
        if let Some(Value::Object(fields)) = body {
            for (key, value) in fields {
                let text = match value {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                form = form.text(key.clone(), text);
            }
        }
        for file in files {
            let part = reqwest::multipart::Part::bytes(file.bytes.clone())
                .file_name(file.file_name.clone());
            form = form.part(file.field.clone(), part);
        }
        request = request.multipart(form);
    } else if let Some(body) = body {
        request = request.json(body);
    }

    request
}

/// Sends a request, retrying transient failures with exponential backoff.
///
/// Retries on the policy's status set and on timeout/connect errors, for
/// every verb. Any other response, including 4xx and a final retryable
/// status once the budget is exhausted, is returned to the caller for
/// normalization. 401 is not in the retryable set.
#[allow(clippy::too_many_arguments)]
pub(crate) async fn send_with_retry(
    client: &HttpClient,
    method: Method,
    url: &str,
    headers: &[(&'static str, String)],
    params: Option<&[(&str, &str)]>,
    body: Option<&Value>,
    files: Option<&[FilePart]>,
    retry: &RetryPolicy,
) -> Result<Response, ClientError> {
    let mut last_error: Option<ClientError> = None;

    for attempt in 0..=retry.max_retries {
        if attempt > 0 {
            let delay = retry.delay_for_attempt(attempt);
            warn!(
                "Retrying {} {} (attempt {}/{}) after {:.1}s",
                method,
                url,
                attempt + 1,
                retry.max_retries + 1,
                delay.as_secs_f64()
            );
            tokio::time::sleep(delay).await;
        }

        let request = build_request(client, method.clone(), url, headers, params, body, files);

        match request.send().await {
            Ok(response) => {
                let status = response.status();
                if retry.is_retryable_status(status) && attempt < retry.max_retries {
                    warn!("Retryable status {} from {}", status.as_u16(), url);
                    last_error = Some(ClientError::Unexpected(status));
                    continue;
                }
                return Ok(response);
            }
            Err(e) => {
                let retryable = e.is_timeout() || e.is_connect();
                let err = ClientError::classify(e);
                if retryable && attempt < retry.max_retries {
                    warn!("Retryable transport error on {}: {}", url, err);
                    last_error = Some(err);
                    continue;
                }
                return Err(err);
            }
        }
    }

    Err(last_error.unwrap_or_else(|| ClientError::Connection(String::from("retry budget exhausted"))))
}

/// Collapses a response into one of the four normalized shapes.
///
/// 4xx statuses and unparsable bodies are data, not errors; only statuses
/// outside 2xx/3xx/4xx surface as [`ClientError::Unexpected`].
pub(crate) async fn normalize_response(
    response: Response,
    binary: bool,
) -> Result<ApiResponse, ClientError> {
    let status = response.status();

    // Handle 4xx responses gracefully so callers can inspect API-level
    // validation errors without error handling
    if status.is_client_error() {
        let text = response.text().await.unwrap_or_default();
        return Ok(serde_json::from_str(&text)
            .map(ApiResponse::Structured)
            .unwrap_or_else(|_| ApiResponse::status_error_mapping(status)));
    }

    if !status.is_success() && !status.is_redirection() {
        error!("Request failed with status {}", status);
        return Err(ClientError::Unexpected(status));
    }

    if binary {
        let bytes = response.bytes().await.map_err(ClientError::classify)?;
        return Ok(ApiResponse::Binary(bytes.to_vec()));
    }

    let text = response.text().await.map_err(ClientError::classify)?;
    if text.trim().is_empty() {
        return Ok(ApiResponse::Empty);
    }

    match serde_json::from_str(&text) {
        Ok(value) => Ok(ApiResponse::Structured(value)),
        Err(_) => Ok(ApiResponse::Text(text)),
    }
}
