//! HTTP client for the portal API

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, Response};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, info, instrument, warn};

use portal_core::{PortalConfig, TokenStore};

use crate::error::{Error, Result};

pub const LOGIN_PATH: &str = "/api/login";

/// API handle shared by every page
///
/// Authenticated calls go through [`ApiClient::authorized_request`], which
/// reads the bearer token from client storage on every call.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    tokens: Arc<dyn TokenStore>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, tokens: Arc<dyn TokenStore>) -> Result<Self> {
        Self::with_timeout(base_url, tokens, None)
    }

    /// `timeout` of `None` lets requests wait indefinitely
    pub fn with_timeout(
        base_url: impl Into<String>,
        tokens: Arc<dyn TokenStore>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            tokens,
        })
    }

    pub fn from_config(config: &PortalConfig, tokens: Arc<dyn TokenStore>) -> Result<Self> {
        Self::with_timeout(config.api_base_url.clone(), tokens, config.request_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn has_token(&self) -> Result<bool> {
        Ok(self.tokens.token()?.is_some())
    }

    /// Send a request carrying the stored bearer token.
    ///
    /// Fails with [`Error::Unauthenticated`] before touching the network
    /// when no token is stored. `Authorization` and `Content-Type` always
    /// take the helper's values; other caller headers pass through.
    #[instrument(skip(self, headers, body))]
    pub async fn authorized_request(
        &self,
        method: Method,
        path: &str,
        mut headers: HeaderMap,
        body: Option<Vec<u8>>,
    ) -> Result<Response> {
        let token = self.tokens.token()?.ok_or(Error::Unauthenticated)?;
        let bearer =
            HeaderValue::from_str(&format!("Bearer {token}")).map_err(|_| Error::InvalidToken)?;

        headers.insert(AUTHORIZATION, bearer);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let url = self.url(path);
        debug!(url = %url, "Sending request");

        let mut request = self.http.request(method, url).headers(headers);
        if let Some(body) = body {
            request = request.body(body);
        }
        Ok(request.send().await?)
    }

    /// Authorized GET, returning the parsed JSON body of a 2xx response
    pub async fn get_json(&self, path: &str) -> Result<Value> {
        let response = self
            .authorized_request(Method::GET, path, HeaderMap::new(), None)
            .await?;
        let response = ensure_success(response).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Authorized POST of a JSON body; the response must be 2xx
    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Response> {
        let payload = serde_json::to_vec(body)?;
        let response = self
            .authorized_request(Method::POST, path, HeaderMap::new(), Some(payload))
            .await?;
        ensure_success(response).await
    }

    /// Authorized POST returning the parsed response body, `Null` when empty
    pub async fn post_json<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value> {
        let response = self.post(path, body).await?;
        let bytes = response.bytes().await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Exchange credentials for a token and keep it in client storage
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<String> {
        let response = self
            .http
            .post(self.url(LOGIN_PATH))
            .header(CONTENT_TYPE, "application/json")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;

        if !response.status().is_success() {
            let text = response.text().await.unwrap_or_default();
            warn!(email, "Login rejected");
            return Err(Error::Login(format!("Login failed: {text}")));
        }

        let data: Value = response.json().await?;
        let token = data
            .get("token")
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| Error::Login("No token returned from login".to_string()))?;

        self.tokens.set_token(token)?;
        info!(email, "Logged in");
        Ok(token.to_string())
    }

    pub fn logout(&self) -> Result<()> {
        self.tokens.clear_token()?;
        info!("Logged out");
        Ok(())
    }
}

/// Turn a non-2xx response into [`Error::Http`] carrying status and body
pub async fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    warn!(status = status.as_u16(), "Request failed");
    Err(Error::Http {
        status: status.as_u16(),
        status_text: status.canonical_reason().unwrap_or_default().to_string(),
        body,
    })
}
