//! HTTP transport to the HMS backend.
//!
//! Wraps `reqwest` with base-URL joining, cookie-based credentials,
//! CSRF priming for mutating verbs, and mapping of error responses to
//! the [`ApiError`] taxonomy.

mod csrf;

pub use csrf::{CSRF_COOKIE, CSRF_HEADER, CsrfCoordinator};

use reqwest::RequestBuilder;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::ApiError;

/// HTTP transport shared by the session context and resource APIs.
///
/// Cookies (the session and CSRF cookies) are stored in the client's
/// cookie jar and sent with every request.
pub struct Transport {
    http: reqwest::Client,
    base_url: String,
    csrf: CsrfCoordinator,
}

impl Transport {
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            csrf: CsrfCoordinator::new(),
        })
    }

    /// The CSRF coordinator, exposed so callers can invalidate the
    /// cached token after a [`ApiError::Csrf`] rejection.
    pub fn csrf(&self) -> &CsrfCoordinator {
        &self.csrf
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Non-mutating GET. Carries no CSRF header.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let resp = self.http.get(self.url(path)).send().await?;
        self.parse(resp).await
    }

    /// Mutating POST with a JSON body.
    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let req = self.http.post(self.url(path)).json(body);
        let resp = self.send_mutating(req).await?;
        self.parse(resp).await
    }

    /// Mutating POST without a body.
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let req = self.http.post(self.url(path));
        let resp = self.send_mutating(req).await?;
        self.parse(resp).await
    }

    /// Mutating PUT with a JSON body.
    pub async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let req = self.http.put(self.url(path)).json(body);
        let resp = self.send_mutating(req).await?;
        self.parse(resp).await
    }

    /// Mutating POST with an opaque body. The caller-supplied content
    /// type is used as-is and never overridden; with `None` the request
    /// carries no content type at all.
    pub async fn post_bytes<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Vec<u8>,
        content_type: Option<&str>,
    ) -> Result<T, ApiError> {
        let mut req = self.http.post(self.url(path)).body(body);
        if let Some(content_type) = content_type {
            req = req.header(reqwest::header::CONTENT_TYPE, content_type);
        }
        let resp = self.send_mutating(req).await?;
        self.parse(resp).await
    }

    /// Prime the CSRF token (coalesced) and attach it before sending a
    /// state-changing request. The priming call itself goes through
    /// [`CsrfCoordinator::ensure_token`] and is exempt.
    async fn send_mutating(&self, req: RequestBuilder) -> Result<reqwest::Response, ApiError> {
        let token = self.csrf.ensure_token(&self.http, &self.base_url).await?;
        Ok(req.header(CSRF_HEADER, token).send().await?)
    }

    /// Decode a response, absorbing CSRF cookie rotation and mapping
    /// non-2xx statuses to typed errors. Empty bodies decode as JSON
    /// `null`, so `()` and `Option<T>` targets accept them.
    async fn parse<T: DeserializeOwned>(&self, resp: reqwest::Response) -> Result<T, ApiError> {
        self.csrf.absorb(resp.headers()).await;

        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(ApiError::from_status(status.as_u16(), body));
        }

        if body.is_empty() {
            return serde_json::from_value(serde_json::Value::Null)
                .map_err(|e| ApiError::Decode(format!("empty body: {e}")));
        }
        serde_json::from_str(&body).map_err(|e| ApiError::Decode(format!("response body: {e}")))
    }
}
