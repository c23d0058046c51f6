//! Midart HTTP client

pub mod auth;
pub mod csrf;
pub mod error;
pub mod messages;
pub mod posts;
pub mod profiles;
pub mod projects;

use csrf::{CsrfSource, NoCsrf};
use error::ClientError;
use midart_core::Upload;
use reqwest::multipart::Part;
use reqwest::{Client, ClientBuilder, Method, Response};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Header Django reads the CSRF token from
pub const CSRF_HEADER: &str = "X-CSRFToken";

/// Called whenever a response comes back 401
pub type UnauthorizedHook = Arc<dyn Fn() + Send + Sync>;

/// Midart API client
#[derive(Clone)]
pub struct MidartClient {
    client: Client,
    base_url: String,
    csrf: Arc<dyn CsrfSource>,
    on_unauthorized: Option<UnauthorizedHook>,
}

impl fmt::Debug for MidartClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MidartClient")
            .field("base_url", &self.base_url)
            .field("on_unauthorized", &self.on_unauthorized.is_some())
            .finish_non_exhaustive()
    }
}

impl MidartClient {
    /// Create a new client with default configuration
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::builder().base_url(base_url).build()
    }

    pub fn builder() -> MidartClientBuilder {
        MidartClientBuilder::default()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Start a request to `{base_url}{path}`. Mutating methods carry the
    /// CSRF header; every request carries the session cookie.
    pub fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mutating = !matches!(method, Method::GET | Method::HEAD | Method::OPTIONS);
        let mut request = self.client.request(method, url);

        #[cfg(target_arch = "wasm32")]
        {
            request = request.fetch_credentials_include();
        }

        if mutating {
            if let Some(token) = self.csrf.token() {
                request = request.header(CSRF_HEADER, token);
            }
        }

        request
    }

    /// Execute a request and decode the JSON body
    pub async fn execute<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ClientError> {
        let response = self.send(request).await?;
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Execute a request whose response body is irrelevant
    pub async fn execute_empty(&self, request: reqwest::RequestBuilder) -> Result<(), ClientError> {
        self.send(request).await?;
        Ok(())
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Response, ClientError> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let url = response.url().path().to_string();
        let body = response.text().await.unwrap_or_default();
        let error = ClientError::from_status(status, &body);
        debug!(status = status.as_u16(), path = %url, %error, "Request rejected");

        if error.is_auth_expired() {
            if let Some(hook) = &self.on_unauthorized {
                hook();
            }
        }
        Err(error)
    }
}

/// Multipart part for an in-memory file. The form sets its own boundary.
pub(crate) fn file_part(upload: &Upload) -> Result<Part, ClientError> {
    let part = Part::bytes(upload.bytes.clone()).file_name(upload.file_name.clone());
    if upload.mime.is_empty() {
        Ok(part)
    } else {
        Ok(part.mime_str(&upload.mime)?)
    }
}

/// Percent-encode a user-supplied path segment (usernames, manifestation
/// names)
pub(crate) fn segment(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

/// Builder for [`MidartClient`]
#[derive(Default)]
pub struct MidartClientBuilder {
    base_url: Option<String>,
    csrf: Option<Arc<dyn CsrfSource>>,
    on_unauthorized: Option<UnauthorizedHook>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl MidartClientBuilder {
    /// Absolute API root, e.g. `https://midart.studio/api`
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn csrf(mut self, source: impl CsrfSource + 'static) -> Self {
        self.csrf = Some(Arc::new(source));
        self
    }

    /// Hook run on every 401, before the error is returned to the caller
    pub fn on_unauthorized(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_unauthorized = Some(Arc::new(hook));
        self
    }

    /// Request timeout. Ignored in the browser.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    pub fn build(self) -> Result<MidartClient, ClientError> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::Configuration("base_url is required".into()))?;

        url::Url::parse(&base_url)
            .map_err(|err| ClientError::Configuration(format!("invalid base_url `{base_url}`: {err}")))?;
        let base_url = base_url.trim_end_matches('/').to_string();

        #[cfg_attr(target_arch = "wasm32", allow(unused_mut))]
        let mut client_builder = ClientBuilder::new();

        #[cfg(not(target_arch = "wasm32"))]
        {
            client_builder = client_builder.cookie_store(true);
            if let Some(timeout) = self.timeout {
                client_builder = client_builder.timeout(timeout);
            }
            client_builder = client_builder.user_agent(
                self.user_agent
                    .unwrap_or_else(|| concat!("midart-client/", env!("CARGO_PKG_VERSION")).into()),
            );
        }

        #[cfg(target_arch = "wasm32")]
        {
            // The browser owns timeouts and the user agent
            let _ = (self.timeout, self.user_agent);
        }

        let client = client_builder.build()?;

        Ok(MidartClient {
            client,
            base_url,
            csrf: self.csrf.unwrap_or_else(|| Arc::new(NoCsrf)),
            on_unauthorized: self.on_unauthorized,
        })
    }
}
