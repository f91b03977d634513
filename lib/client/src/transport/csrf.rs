//! Double-submit CSRF token coordination.
//!
//! The backend sets a `csrf_token` cookie and rejects mutating
//! requests that do not echo it in the `X-CSRF-Token` header. The
//! coordinator guarantees a token exists before any mutating request,
//! priming it via `GET /auth/csrf` at most once per process.

use reqwest::header::{HeaderMap, SET_COOKIE};
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::ApiError;

/// Cookie the backend stores the CSRF token in.
pub const CSRF_COOKIE: &str = "csrf_token";

/// Header mutating requests echo the token in.
pub const CSRF_HEADER: &str = "X-CSRF-Token";

/// Caches the CSRF token for the life of the client.
///
/// Concurrent callers that race the first prime are coalesced: the
/// mutex is held across the priming request, so later callers queue
/// and then observe the cached token instead of issuing duplicate
/// priming calls.
#[derive(Debug, Default)]
pub struct CsrfCoordinator {
    token: Mutex<Option<String>>,
}

impl CsrfCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached token, priming it first if absent.
    pub async fn ensure_token(
        &self,
        http: &reqwest::Client,
        base_url: &str,
    ) -> Result<String, ApiError> {
        let mut slot = self.token.lock().await;
        if let Some(token) = slot.as_ref() {
            return Ok(token.clone());
        }

        let url = format!("{base_url}/auth/csrf");
        let resp = http.get(&url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::from_status(status.as_u16(), body));
        }

        let token = cookie_value(resp.headers(), CSRF_COOKIE).ok_or_else(|| {
            ApiError::Csrf("priming response did not set the csrf_token cookie".to_string())
        })?;

        debug!("primed CSRF token");
        *slot = Some(token.clone());
        Ok(token)
    }

    /// Pick up a rotated token from any response's `Set-Cookie`
    /// headers. Auth responses rotate the cookie; the cached value has
    /// to follow it or the next double-submit check fails.
    pub async fn absorb(&self, headers: &HeaderMap) {
        if let Some(token) = cookie_value(headers, CSRF_COOKIE) {
            let mut slot = self.token.lock().await;
            if slot.as_deref() != Some(token.as_str()) {
                debug!("CSRF token rotated");
                *slot = Some(token);
            }
        }
    }

    /// Drop the cached token so the next mutating request re-primes.
    /// Call after a [`ApiError::Csrf`] mismatch.
    pub async fn invalidate(&self) {
        *self.token.lock().await = None;
    }
}

/// Extract a cookie's value from `Set-Cookie` response headers.
fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    for header in headers.get_all(SET_COOKIE) {
        let Ok(raw) = header.to_str() else {
            continue;
        };
        let pair = raw.split(';').next().unwrap_or("");
        if let Some((key, value)) = pair.split_once('=')
            && key.trim() == name
            && !value.is_empty()
        {
            return Some(value.to_string());
        }
    }
    None
}
