//! HTTP transport seam for the protocol client
//!
//! The protocol client issues every request through the [`Transport`] trait
//! and only ever sees a normalized [`Response`]. The default implementation,
//! [`ReqwestTransport`], wraps a shared `reqwest::Client`; tests or embedders
//! can substitute their own implementation through
//! [`crate::ClientBuilder::transport`].
//!
//! A transport resolves with a [`Response`] for every HTTP exchange that
//! produced one, whatever its status code, and fails only on network-level
//! errors. Mapping non-2xx statuses to protocol errors is the client's job:
//! authorization discovery must read headers off 401/403 responses, so the
//! transport never swallows them.

use crate::error::{Error, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;
use url::Url;

/// HTTP methods used by the RadioTAG protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// HTTP GET
    Get,
    /// HTTP POST
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Method::Get => "GET",
            Method::Post => "POST",
        })
    }
}

/// An outbound request, one per protocol operation
#[derive(Debug, Clone)]
pub struct Request {
    /// HTTP method
    pub method: Method,
    /// Absolute request URL
    pub url: Url,
    /// Request headers, in insertion order
    pub headers: Vec<(String, String)>,
    /// Request body, if any
    pub body: Option<String>,
}

/// A normalized HTTP response
#[derive(Debug, Clone)]
pub struct Response {
    /// HTTP status code
    pub status: u16,
    /// Response headers with lower-cased names
    pub headers: HashMap<String, String>,
    /// Response body
    pub body: String,
}

impl Response {
    /// Whether the status code is in the 2xx range
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Look up a response header, case-insensitively
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }
}

/// Asynchronous HTTP transport
///
/// One request in, one normalized response out. Implementations must not
/// retry, reorder or otherwise reinterpret exchanges; cancellation and
/// timeouts are theirs to enforce.
#[async_trait]
pub trait Transport: fmt::Debug + Send + Sync {
    /// Perform the HTTP exchange described by `request`
    async fn execute(&self, request: Request) -> Result<Response>;
}

/// Default [`Transport`] over a `reqwest::Client`
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    timeout: Duration,
}

impl ReqwestTransport {
    /// Wrap a `reqwest::Client` with a per-request timeout
    pub fn new(client: reqwest::Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    /// Wrap a `reqwest::Client` with the default timeout
    ///
    /// Useful for sharing HTTP connection pools or custom proxy settings
    pub fn with_client(client: reqwest::Client) -> Self {
        Self::new(
            client,
            Duration::from_secs(crate::client::DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::with_client(reqwest::Client::new())
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: Request) -> Result<Response> {
        let mut builder = match request.method {
            Method::Get => self.client.get(request.url),
            Method::Post => self.client.post(request.url),
        }
        .timeout(self.timeout);

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(Error::Http)?;

        let status = response.status().as_u16();
        let mut headers = HashMap::new();
        for (name, value) in response.headers() {
            headers.insert(
                name.as_str().to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            );
        }
        let body = response.text().await?;

        Ok(Response {
            status,
            headers,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response_with_header(name: &str, value: &str) -> Response {
        let mut headers = HashMap::new();
        headers.insert(name.to_string(), value.to_string());
        Response {
            status: 200,
            headers,
            body: String::new(),
        }
    }

    #[test]
    fn test_is_success_bounds() {
        let mut response = response_with_header("content-type", "application/xml");
        assert!(response.is_success());
        response.status = 299;
        assert!(response.is_success());
        response.status = 300;
        assert!(!response.is_success());
        response.status = 401;
        assert!(!response.is_success());
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let response = response_with_header("www-authenticate", "CPA uri=\"x\" modes=\"client\"");
        assert!(response.header("WWW-Authenticate").is_some());
        assert!(response.header("www-authenticate").is_some());
        assert!(response.header("location").is_none());
    }

    #[test]
    fn test_method_display() {
        assert_eq!(Method::Get.to_string(), "GET");
        assert_eq!(Method::Post.to_string(), "POST");
    }
}
