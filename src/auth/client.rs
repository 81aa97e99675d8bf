//! Auth sub-client — login, session details, logout.

use chrono::{DateTime, Utc};

use crate::auth::{LoginResponse, SessionDetails};
use crate::client::IgClient;
use crate::error::IgError;
use crate::http::RetryPolicy;

/// Sub-client for session operations.
pub struct Auth<'a> {
    pub(crate) client: &'a IgClient,
}

impl<'a> Auth<'a> {
    /// Log in explicitly and return the account summary from the gateway.
    ///
    /// Calling this is optional: any request on a stale session logs in
    /// first. It is useful for validating credentials up front or reading
    /// the funds snapshot the login response carries.
    pub async fn login(&self) -> Result<LoginResponse, IgError> {
        self.client.http.login().await
    }

    /// Fetch details of the current session (`GET /session`).
    pub async fn details(&self) -> Result<SessionDetails, IgError> {
        self.client
            .http
            .get("/session", 1, RetryPolicy::Idempotent)
            .await
    }

    /// Log out (`DELETE /session`) and drop the local tokens.
    ///
    /// The gateway call is best-effort: a dead session is already logged
    /// out, so transport failures only produce a warning.
    pub async fn logout(&self) -> Result<(), IgError> {
        if self.client.http.has_valid_session().await {
            if let Err(e) = self.client.http.delete_no_content("/session", 1).await {
                tracing::warn!(error = %e, "logout request failed; dropping local session");
            }
        }
        self.client.http.clear_session().await;
        Ok(())
    }

    /// Whether a not-yet-expired session is held locally.
    ///
    /// For a gateway-validated check, use [`Auth::details`].
    pub async fn is_authenticated(&self) -> bool {
        self.client.http.has_valid_session().await
    }

    /// When the current session expires, if one is held.
    pub async fn session_expires_at(&self) -> Option<DateTime<Utc>> {
        self.client.http.session_expires_at().await
    }
}
