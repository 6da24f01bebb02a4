//! Session lifecycle: login, logout and silent renewal.
//!
//! The access token lives only in memory; the longer-lived refresh
//! credential is an HTTP-only cookie the server sets on login, carried
//! transparently by the reqwest cookie store. A reload of the client
//! therefore recovers its session with a single `/auth/refresh` call,
//! or lands anonymous if the cookie is gone.

use reqwest::{Client, Method, Response, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::api::ApiError;
use crate::models::User;

use super::device;

/// HTTP request timeout in seconds.
/// 30s allows for slow API responses while failing fast enough for good UX.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Lifecycle of a client session.
///
/// `Uninitialized → Initializing → {Authenticated | Anonymous}` on first
/// use; afterwards only `Authenticated ↔ Anonymous` transitions occur
/// (login/refresh up, logout/failed refresh down).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Uninitialized,
    Initializing,
    Authenticated,
    Anonymous,
}

/// In-memory session: bearer token and the profile it was issued for.
/// Always set and cleared together.
#[derive(Debug, Clone)]
pub struct Session {
    pub access_token: String,
    pub user: User,
}

#[derive(Debug, Deserialize)]
struct AuthResponse {
    #[serde(rename = "accessToken")]
    access_token: String,
    user: User,
}

/// Owns all authentication state. Consumers read the session through the
/// accessors and never mutate it directly; resource calls go through
/// [`SessionManager::execute`], which attaches the bearer token and
/// performs at most one silent renewal on a 401.
pub struct SessionManager {
    client: Client,
    base_url: String,
    state: SessionState,
    session: Option<Session>,
}

impl SessionManager {
    /// Create a session manager for the API at `base_url`.
    ///
    /// The cookie store is enabled so the server-set refresh cookie is
    /// retained and resent automatically.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .cookie_store(true)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            state: SessionState::Uninitialized,
            session: None,
        })
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_authenticated(&self) -> bool {
        self.state == SessionState::Authenticated
    }

    /// Get the bearer token if a session is established
    pub fn access_token(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.access_token.as_str())
    }

    /// Get the authenticated user's profile if a session is established
    pub fn current_user(&self) -> Option<&User> {
        self.session.as_ref().map(|s| &s.user)
    }

    /// Recover a prior session before first use.
    ///
    /// Attempts exactly one silent refresh; subsequent calls are no-ops.
    /// Returns whether the session ended up authenticated.
    pub async fn initialize(&mut self) -> bool {
        if self.state != SessionState::Uninitialized {
            return self.is_authenticated();
        }
        self.state = SessionState::Initializing;
        debug!("initializing session via silent refresh");
        self.refresh().await
    }

    /// Exchange credentials for a session.
    ///
    /// Returns `Ok(true)` and stores token + profile on success. A
    /// rejected login returns `Ok(false)` and leaves existing session
    /// state untouched. Empty credentials fail locally without a
    /// network call.
    pub async fn login(&mut self, identifier: &str, secret: &str) -> Result<bool, ApiError> {
        if identifier.trim().is_empty() || secret.is_empty() {
            return Err(ApiError::Validation(
                "identifier and secret must not be empty".to_string(),
            ));
        }

        let body = serde_json::json!({
            "identifier": identifier,
            "secret": secret,
            "device": device::descriptor(),
        });

        let response = self
            .client
            .post(format!("{}/auth/login", self.base_url))
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            warn!(status = %response.status(), "login rejected");
            return Ok(false);
        }

        let auth: AuthResponse = response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("login response: {}", e)))?;

        debug!(user = %auth.user.email, "login succeeded");
        self.set_session(auth);
        Ok(true)
    }

    /// End the session.
    ///
    /// The server call is best-effort: in-memory state is cleared and the
    /// state moves to `Anonymous` even when the call fails, so the client
    /// never believes it is still authenticated after logout. Returns
    /// whether the server acknowledged.
    pub async fn logout(&mut self) -> bool {
        let mut request = self.client.post(format!("{}/auth/logout", self.base_url));
        if let Some(token) = self.access_token() {
            request = request.bearer_auth(token);
        }

        let server_ok = match request.send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                warn!(error = %e, "logout request failed");
                false
            }
        };

        self.clear_session();
        server_ok
    }

    /// Renew the access token using the ambient refresh cookie.
    ///
    /// On success the token and profile are replaced together; on any
    /// failure (network or status) both are cleared and the session is
    /// `Anonymous`. Idempotent from the caller's perspective.
    pub async fn refresh(&mut self) -> bool {
        let body = serde_json::json!({ "device": device::descriptor() });

        let result = self
            .client
            .post(format!("{}/auth/refresh", self.base_url))
            .json(&body)
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => {
                match response.json::<AuthResponse>().await {
                    Ok(auth) => {
                        debug!(user = %auth.user.email, "session renewed");
                        self.set_session(auth);
                        true
                    }
                    Err(e) => {
                        warn!(error = %e, "refresh response unparseable");
                        self.clear_session();
                        false
                    }
                }
            }
            Ok(response) => {
                debug!(status = %response.status(), "refresh rejected");
                self.clear_session();
                false
            }
            Err(e) => {
                warn!(error = %e, "refresh request failed");
                self.clear_session();
                false
            }
        }
    }

    /// Send an authenticated request, renewing the token once if needed.
    ///
    /// Attaches the current bearer token; on a 401 performs exactly one
    /// `refresh()` and retries the original request with the new token.
    /// If the renewal fails, or the retry is rejected again, the caller
    /// gets [`ApiError::Unauthorized`] and the session is `Anonymous`.
    /// Never retries more than once.
    pub async fn execute(
        &mut self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> Result<Response, ApiError> {
        if self.state == SessionState::Uninitialized {
            self.initialize().await;
        }

        let response = self.send_once(method.clone(), path, query, body).await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        debug!(path, "access token rejected, attempting renewal");
        if !self.refresh().await {
            return Err(ApiError::Unauthorized);
        }

        let retry = self.send_once(method, path, query, body).await?;
        if retry.status() == StatusCode::UNAUTHORIZED {
            // One renewal per request; a second rejection is terminal
            self.clear_session();
            return Err(ApiError::Unauthorized);
        }
        Ok(retry)
    }

    async fn send_once(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> Result<Response, ApiError> {
        let mut request = self
            .client
            .request(method, format!("{}{}", self.base_url, path));
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(token) = self.access_token() {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        Ok(request.send().await?)
    }

    fn set_session(&mut self, auth: AuthResponse) {
        self.session = Some(Session {
            access_token: auth.access_token,
            user: auth.user,
        });
        self.state = SessionState::Authenticated;
    }

    fn clear_session(&mut self) {
        self.session = None;
        self.state = SessionState::Anonymous;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fake_auth() -> AuthResponse {
        AuthResponse {
            access_token: "tok-123".to_string(),
            user: User {
                id: 7,
                name: "Ana".to_string(),
                email: "ana@fazenda.br".to_string(),
                role: None,
            },
        }
    }

    #[test]
    fn test_token_and_user_set_together() {
        let mut manager = SessionManager::new("http://localhost").unwrap();
        assert_eq!(manager.state(), SessionState::Uninitialized);
        assert!(manager.access_token().is_none());
        assert!(manager.current_user().is_none());

        manager.set_session(fake_auth());
        assert_eq!(manager.state(), SessionState::Authenticated);
        assert_eq!(manager.access_token(), Some("tok-123"));
        assert_eq!(manager.current_user().unwrap().id, 7);
    }

    #[test]
    fn test_clear_drops_both() {
        let mut manager = SessionManager::new("http://localhost").unwrap();
        manager.set_session(fake_auth());
        manager.clear_session();

        assert_eq!(manager.state(), SessionState::Anonymous);
        assert!(manager.access_token().is_none());
        assert!(manager.current_user().is_none());
    }
}
