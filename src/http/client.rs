//! Low-level HTTP client — `IgHttp`.
//!
//! One thin method per HTTP verb; sub-clients own the endpoint paths and
//! wire types. This layer attaches the platform's required headers
//! (`X-IG-API-KEY`, per-endpoint `Version`, session tokens), maps non-2xx
//! responses to typed errors, and owns the session lifecycle: requests on a
//! stale or missing session log in first, and a 401 on a seemingly valid
//! session triggers exactly one re-login + replay before failing.

use crate::auth::{ApiCredentials, LoginRequest, LoginResponse, SessionTokens};
use crate::error::{AuthError, HttpError, IgError};
use crate::http::retry::{RetryConfig, RetryPolicy};

use async_lock::RwLock;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

const HEADER_API_KEY: &str = "X-IG-API-KEY";
const HEADER_CST: &str = "CST";
const HEADER_SECURITY_TOKEN: &str = "X-SECURITY-TOKEN";
const HEADER_VERSION: &str = "Version";
/// The gateway rejects bodies on real DELETEs; dealing deletes go over POST
/// with this override header instead.
const HEADER_METHOD_OVERRIDE: &str = "_method";
const HEADER_SESSION_MAX_AGE: &str = "Access-Control-Max-Age";

const JSON_UTF8: &str = "application/json; charset=UTF-8";

/// IG error bodies: `{"errorCode": "error.security.invalid-details"}`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiErrorBody {
    error_code: String,
}

/// Extract the machine-readable error code from a response body, falling
/// back to the raw text.
fn error_reason(body: &str) -> String {
    serde_json::from_str::<ApiErrorBody>(body)
        .map(|e| e.error_code)
        .unwrap_or_else(|_| body.trim().to_string())
}

fn map_error_status(status: u16, body: String) -> HttpError {
    match status {
        401 => HttpError::Unauthorized,
        403 => HttpError::Forbidden(error_reason(&body)),
        404 => HttpError::NotFound(error_reason(&body)),
        408 => HttpError::Timeout,
        429 => HttpError::RateLimited {
            retry_after_ms: None,
        },
        400..=499 => HttpError::BadRequest(error_reason(&body)),
        _ => HttpError::ServerError { status, body },
    }
}

/// Low-level HTTP client for the IG REST gateway.
pub struct IgHttp {
    base_url: String,
    client: Client,
    credentials: ApiCredentials,
    /// Session tokens. NEVER exposed publicly.
    session: Arc<RwLock<Option<SessionTokens>>>,
}

impl IgHttp {
    pub fn new(base_url: &str, credentials: ApiCredentials) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .pool_max_idle_per_host(4)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            credentials,
            session: Arc::new(RwLock::new(None)),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Whether a session is held that has not yet expired.
    pub(crate) async fn has_valid_session(&self) -> bool {
        self.session
            .read()
            .await
            .as_ref()
            .map(SessionTokens::is_valid)
            .unwrap_or(false)
    }

    /// When the current session (if any) expires.
    pub(crate) async fn session_expires_at(&self) -> Option<DateTime<Utc>> {
        self.session.read().await.as_ref().map(|t| t.expires_at)
    }

    /// Drop local session tokens without calling the gateway.
    pub(crate) async fn clear_session(&self) {
        *self.session.write().await = None;
    }

    // ── Verbs used by sub-clients ────────────────────────────────────────

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        version: u8,
        retry: RetryPolicy,
    ) -> Result<T, IgError> {
        self.request_with_retry(Method::GET, path, version, None::<&()>, None, retry)
            .await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        version: u8,
        body: &B,
    ) -> Result<T, IgError> {
        self.request_with_retry(
            Method::POST,
            path,
            version,
            Some(body),
            None,
            RetryPolicy::None,
        )
        .await
    }

    /// `POST` with a `_method: DELETE` override — the dealing API's spelling
    /// of a DELETE that carries a body.
    pub(crate) async fn delete_via_post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        version: u8,
        body: &B,
    ) -> Result<T, IgError> {
        self.request_with_retry(
            Method::POST,
            path,
            version,
            Some(body),
            Some("DELETE"),
            RetryPolicy::None,
        )
        .await
    }

    /// Body-less DELETE that expects `204 No Content` (session teardown).
    ///
    /// No re-login on 401: a rejected session is already torn down, which is
    /// the outcome the caller wanted.
    pub(crate) async fn delete_no_content(&self, path: &str, version: u8) -> Result<(), IgError> {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self
            .client
            .request(Method::DELETE, &url)
            .headers(self.base_headers(version));

        if let Some(tokens) = self.session.read().await.as_ref() {
            req = req
                .header(HEADER_CST, &tokens.cst)
                .header(HEADER_SECURITY_TOKEN, &tokens.security_token);
        }

        let resp = req.send().await.map_err(HttpError::Reqwest)?;
        let status = resp.status();
        if status.is_success() || status.as_u16() == 401 {
            return Ok(());
        }

        let body_text = resp.text().await.unwrap_or_default();
        Err(map_error_status(status.as_u16(), body_text).into())
    }

    // ── Session lifecycle ────────────────────────────────────────────────

    /// Authenticate against `POST /session` and store the issued tokens.
    ///
    /// Tokens arrive in the `CST` / `X-SECURITY-TOKEN` response headers;
    /// the session lifetime comes from `Access-Control-Max-Age`. A missing
    /// lifetime header leaves the session pre-expired, so the next request
    /// logs in again rather than replaying tokens of unknown age.
    pub(crate) async fn login(&self) -> Result<LoginResponse, IgError> {
        let url = format!("{}/session", self.base_url);
        let body = LoginRequest {
            identifier: self.credentials.username.clone(),
            password: self.credentials.password.clone(),
            encrypted_password: None,
        };

        tracing::debug!(identifier = %self.credentials.username, "logging in");

        let resp = self
            .client
            .post(&url)
            .headers(self.base_headers(2))
            .json(&body)
            .send()
            .await
            .map_err(HttpError::Reqwest)?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(AuthError::LoginFailed(error_reason(&text)).into());
        }

        let header_str = |name: &'static str| -> Result<String, AuthError> {
            resp.headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
                .ok_or(AuthError::MissingSessionToken(name))
        };

        let cst = header_str(HEADER_CST)?;
        let security_token = header_str(HEADER_SECURITY_TOKEN)?;
        let expires_at = resp
            .headers()
            .get(HEADER_SESSION_MAX_AGE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<i64>().ok())
            .map(|secs| Utc::now() + ChronoDuration::seconds(secs))
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH);

        let login: LoginResponse = resp.json().await.map_err(HttpError::Reqwest)?;

        tracing::info!(
            account = %login.current_account_id,
            expires_at = %expires_at,
            "session opened"
        );

        *self.session.write().await = Some(SessionTokens {
            cst,
            security_token,
            expires_at,
        });

        Ok(login)
    }

    // ── Internals ────────────────────────────────────────────────────────

    async fn request_with_retry<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        path: &str,
        version: u8,
        body: Option<&B>,
        method_override: Option<&str>,
        retry: RetryPolicy,
    ) -> Result<T, IgError> {
        let config = match &retry {
            RetryPolicy::None => {
                return self
                    .authed_request(&method, path, version, body, method_override)
                    .await;
            }
            RetryPolicy::Idempotent => RetryConfig::idempotent(),
            RetryPolicy::Custom(c) => c.clone(),
        };

        let mut last_error = None;

        for attempt in 0..=config.max_retries {
            match self
                .authed_request::<T, B>(&method, path, version, body, method_override)
                .await
            {
                Ok(resp) => return Ok(resp),
                Err(IgError::Http(e)) => {
                    let should_retry = match &e {
                        HttpError::ServerError { status, .. } => {
                            config.retryable_statuses.contains(status)
                        }
                        HttpError::RateLimited { retry_after_ms } => {
                            if let Some(ms) = retry_after_ms {
                                futures_timer::Delay::new(Duration::from_millis(*ms)).await;
                            }
                            config.retryable_statuses.contains(&429)
                        }
                        HttpError::Timeout => true,
                        HttpError::Reqwest(re) => {
                            re.is_connect() || re.is_timeout() || re.is_request()
                        }
                        _ => false,
                    };

                    if should_retry && attempt < config.max_retries {
                        let delay = config.delay_for_attempt(attempt);
                        tracing::debug!(
                            attempt = attempt + 1,
                            max = config.max_retries,
                            delay_ms = delay.as_millis() as u64,
                            "Retrying request to {}",
                            path
                        );
                        futures_timer::Delay::new(delay).await;
                        last_error = Some(e);
                    } else {
                        return Err(e.into());
                    }
                }
                Err(other) => return Err(other),
            }
        }

        Err(HttpError::MaxRetriesExceeded {
            attempts: config.max_retries + 1,
            last_error: last_error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "unknown".to_string()),
        }
        .into())
    }

    /// One authenticated request: log in if the session is stale, send, and
    /// on a 401 re-login once and replay. A second 401 means the gateway is
    /// rejecting fresh tokens — surfaced as an auth error, not retried.
    async fn authed_request<T: DeserializeOwned, B: Serialize>(
        &self,
        method: &Method,
        path: &str,
        version: u8,
        body: Option<&B>,
        method_override: Option<&str>,
    ) -> Result<T, IgError> {
        if !self.has_valid_session().await {
            self.login().await?;
        }

        match self
            .do_request(method, path, version, body, method_override)
            .await
        {
            Ok(resp) => Ok(resp),
            Err(HttpError::Unauthorized) => {
                tracing::warn!(path, "session rejected, re-authenticating");
                self.clear_session().await;
                self.login().await?;
                match self
                    .do_request(method, path, version, body, method_override)
                    .await
                {
                    Ok(resp) => Ok(resp),
                    Err(HttpError::Unauthorized) => Err(AuthError::SessionExpired.into()),
                    Err(e) => Err(e.into()),
                }
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn do_request<T: DeserializeOwned, B: Serialize>(
        &self,
        method: &Method,
        path: &str,
        version: u8,
        body: Option<&B>,
        method_override: Option<&str>,
    ) -> Result<T, HttpError> {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self
            .client
            .request(method.clone(), &url)
            .headers(self.base_headers(version));

        if let Some(tokens) = self.session.read().await.as_ref() {
            req = req
                .header(HEADER_CST, &tokens.cst)
                .header(HEADER_SECURITY_TOKEN, &tokens.security_token);
        }

        if let Some(verb) = method_override {
            req = req.header(HEADER_METHOD_OVERRIDE, verb);
        }

        if let Some(b) = body {
            req = req.json(b);
        }

        let resp = req.send().await?;
        let status = resp.status();

        if status.is_success() {
            return Ok(resp.json::<T>().await?);
        }

        let status_code = status.as_u16();
        let body_text = resp.text().await.unwrap_or_default();
        Err(map_error_status(status_code, body_text))
    }

    /// Headers sent on every request: API key, endpoint version, JSON types.
    fn base_headers(&self, version: u8) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Ok(key) = HeaderValue::from_str(&self.credentials.api_key) {
            headers.insert(HEADER_API_KEY, key);
        }
        headers.insert(HEADER_VERSION, HeaderValue::from(u16::from(version)));
        headers.insert(reqwest::header::ACCEPT, HeaderValue::from_static(JSON_UTF8));
        headers.insert(
            reqwest::header::CONTENT_TYPE,
            HeaderValue::from_static(JSON_UTF8),
        );
        headers
    }
}

impl Clone for IgHttp {
    fn clone(&self) -> Self {
        Self {
            base_url: self.base_url.clone(),
            client: self.client.clone(),
            credentials: self.credentials.clone(),
            session: self.session.clone(),
        }
    }
}
