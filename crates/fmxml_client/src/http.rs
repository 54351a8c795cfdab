//! HTTP transport implementation.
//!
//! Requests go out as `GET` calls against the configured server URL with
//! the command map encoded as the query string, the way the gateway reads
//! its parameters. The HTTP library itself is abstracted via [`HttpClient`]
//! so other implementations (hyper, ureq, in-process gateways) can be used.

use crate::config::HttpConfig;
use crate::transport::Transport;
use async_trait::async_trait;
use fmxml_core::{ClientError, ClientResult, Credentials, RawResponse, RequestDescriptor, Value};
use tracing::{debug, trace};
use url::Url;

/// HTTP client abstraction.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Sends a GET request and returns the response body.
    ///
    /// Non-success statuses are reported as errors.
    async fn get(&self, url: &str, credentials: &Credentials) -> Result<Vec<u8>, String>;
}

/// [`HttpClient`] backed by `reqwest`, using HTTP basic authentication.
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    inner: reqwest::Client,
}

impl ReqwestClient {
    /// Creates a client with the given settings.
    pub fn new(config: &HttpConfig) -> ClientResult<Self> {
        let inner = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| ClientError::transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { inner })
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn get(&self, url: &str, credentials: &Credentials) -> Result<Vec<u8>, String> {
        let mut request = self.inner.get(url);
        if !credentials.is_anonymous() {
            request = request.basic_auth(&credentials.user, Some(&credentials.pass));
        }

        let response = request.send().await.map_err(|e| e.to_string())?;
        let status = response.status();
        if !status.is_success() {
            return Err(format!("HTTP status {status}"));
        }

        let body = response.bytes().await.map_err(|e| e.to_string())?;
        Ok(body.to_vec())
    }
}

/// HTTP-based gateway transport.
///
/// Expects the endpoint to answer with the JSON response envelope.
pub struct HttpTransport<C: HttpClient> {
    client: C,
}

impl<C: HttpClient> HttpTransport<C> {
    /// Creates a new HTTP transport.
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Returns the underlying HTTP client.
    pub fn client(&self) -> &C {
        &self.client
    }
}

impl HttpTransport<ReqwestClient> {
    /// Creates a `reqwest`-backed transport.
    pub fn with_config(config: &HttpConfig) -> ClientResult<Self> {
        Ok(Self::new(ReqwestClient::new(config)?))
    }
}

#[async_trait]
impl<C: HttpClient> Transport for HttpTransport<C> {
    async fn send(&self, request: &RequestDescriptor) -> ClientResult<RawResponse> {
        let url = request_url(request)?;
        debug!(url = %url, user = %request.auth.user, "gateway GET");

        let body = self
            .client
            .get(url.as_str(), &request.auth)
            .await
            .map_err(ClientError::transport)?;

        let response: RawResponse =
            serde_json::from_slice(&body).map_err(|e| ClientError::Decode(e.to_string()))?;
        trace!(?response, "gateway envelope");
        Ok(response)
    }
}

/// Encodes a request as the gateway URL.
///
/// Directive flags set to `true` become bare parameters (`-find=`), flags set
/// to `false` are left out, and every other value is sent as text.
pub fn request_url(request: &RequestDescriptor) -> ClientResult<Url> {
    let mut url = Url::parse(&request.server)
        .map_err(|e| ClientError::InvalidUrl(format!("{}: {e}", request.server)))?;

    if url.cannot_be_a_base() {
        return Err(ClientError::InvalidUrl(request.server.clone()));
    }

    let params: Vec<(&str, String)> = request
        .command
        .iter()
        .filter_map(|(key, value)| match value {
            Value::Bool(true) => Some((key.as_str(), String::new())),
            Value::Bool(false) => None,
            other => Some((key.as_str(), other.to_string())),
        })
        .collect();

    if !params.is_empty() {
        url.query_pairs_mut().extend_pairs(params);
    }
    Ok(url)
}
