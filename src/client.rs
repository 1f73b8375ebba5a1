//! HTTP client for the RadioTAG protocol
//!
//! This module provides the protocol client: post a tag against a service
//! provider, list the tag history, and discover the authorization provider
//! announced by the service's challenge header.
//!
//! # Example
//!
//! ```no_run
//! use radiotag::{RadioTagClient, TimeSource};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = RadioTagClient::new().await?;
//!
//!     // Discover where to obtain credentials
//!     let provider = client
//!         .get_auth_provider("https://radiotag.example.com")
//!         .await?;
//!     println!("AP: {} (client mode: {})", provider.base_url, provider.modes.client);
//!
//!     // Tag the current moment of a broadcast
//!     let tag = client
//!         .tag_now(
//!             "https://radiotag.example.com",
//!             "dab:ce1.ce15.c221.0",
//!             Some(TimeSource::Broadcast),
//!             Some("access-token"),
//!         )
//!         .await?;
//!     println!("{}: {} - {}", tag.author, tag.title, tag.summary);
//!
//!     Ok(())
//! }
//! ```

use crate::challenge;
use crate::definition;
use crate::error::{Error, Result};
use crate::feed;
use crate::models::{AuthProvider, Tag, TimeSource};
use crate::transport::{Method, Request, ReqwestTransport, Transport};
use crate::urls;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use url::form_urlencoded;

/// Default timeout for HTTP requests (30 seconds)
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Default User-Agent
pub const DEFAULT_USER_AGENT: &str = "radiotag/0.1.0";

/// Content type of tag and discovery POST requests
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// RadioTAG protocol client
///
/// The client is stateless across invocations: every operation takes the
/// service base URL (and optional access token) as arguments and issues
/// exactly one request through the transport. Calls are independent and may
/// run concurrently; cloning the client shares the underlying transport.
#[derive(Debug, Clone)]
pub struct RadioTagClient {
    transport: Arc<dyn Transport>,
}

impl RadioTagClient {
    /// Create a new client with default settings
    pub async fn new() -> Result<Self> {
        Self::builder().build().await
    }

    /// Create a builder for configuring the client
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Create a client over a custom transport implementation
    pub fn with_transport(transport: impl Transport + 'static) -> Self {
        Self {
            transport: Arc::new(transport),
        }
    }

    /// Create a client with a custom `reqwest::Client`
    ///
    /// Useful for sharing HTTP connection pools or custom proxy settings
    pub fn with_client(client: reqwest::Client) -> Self {
        Self::with_transport(ReqwestTransport::with_client(client))
    }

    // ========================================================================
    // Protocol Operations
    // ========================================================================

    /// Tag a moment in a broadcast
    ///
    /// Posts a form-encoded request to the service's tag endpoint and returns
    /// the tag the service echoes back.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL of the RadioTAG service provider
    /// * `bearer` - Identifier URI of the station/programme being tagged
    ///   (e.g., `dab:ce1.ce15.c221.0`)
    /// * `time` - Moment being tagged; sent as floored epoch seconds
    /// * `time_source` - Where the time came from, if the device knows
    /// * `access_token` - Bearer credential; sent as an `Authorization`
    ///   header when present, omitted entirely otherwise
    pub async fn tag(
        &self,
        base_url: &str,
        bearer: &str,
        time: DateTime<Utc>,
        time_source: Option<TimeSource>,
        access_token: Option<&str>,
    ) -> Result<Tag> {
        let url = urls::build_url(base_url, definition::SP_TAG_ENDPOINT)?;

        let mut form = form_urlencoded::Serializer::new(String::new());
        form.append_pair("bearer", bearer);
        form.append_pair("time", &time.timestamp().to_string());
        if let Some(source) = time_source {
            form.append_pair("time_source", source.as_str());
        }
        let body = form.finish();

        #[cfg(feature = "logging")]
        tracing::debug!("Posting tag for {} to {}", bearer, url);

        let response = self
            .transport
            .execute(Request {
                method: Method::Post,
                url,
                headers: request_headers(Some(FORM_CONTENT_TYPE), access_token),
                body: Some(body),
            })
            .await?;

        if !response.is_success() {
            return Err(Error::ErrorResponse {
                status: response.status,
                body: response.body,
            });
        }

        feed::parse_first_tag(&response.body)
    }

    /// Tag the current moment of a broadcast
    ///
    /// Convenience over [`tag`](Self::tag) with the current system time.
    pub async fn tag_now(
        &self,
        base_url: &str,
        bearer: &str,
        time_source: Option<TimeSource>,
        access_token: Option<&str>,
    ) -> Result<Tag> {
        self.tag(base_url, bearer, Utc::now(), time_source, access_token)
            .await
    }

    /// Retrieve the tag history for the device or user the token represents
    ///
    /// Returns the full list in document order; an empty list is the normal
    /// shape for a device with no tag history yet.
    pub async fn get_tags(
        &self,
        base_url: &str,
        access_token: Option<&str>,
    ) -> Result<Vec<Tag>> {
        let url = urls::build_url(base_url, definition::SP_LIST_TAGS_ENDPOINT)?;

        #[cfg(feature = "logging")]
        tracing::debug!("Fetching tag list from {}", url);

        let response = self
            .transport
            .execute(Request {
                method: Method::Get,
                url,
                headers: request_headers(None, access_token),
                body: None,
            })
            .await?;

        if !response.is_success() {
            return Err(Error::ErrorResponse {
                status: response.status,
                body: response.body,
            });
        }

        feed::parse_tags(&response.body)
    }

    /// Discover the authorization provider responsible for a service
    ///
    /// Discovery piggybacks on the tag endpoint: an unauthenticated POST is
    /// expected to be rejected with a challenge. The HTTP status of the
    /// response is deliberately ignored — a 401 is a failure at the transport
    /// layer but a success at the protocol layer — and the
    /// `WWW-Authenticate` header is inspected on every response the service
    /// sends back, 2xx or not.
    pub async fn get_auth_provider(&self, base_url: &str) -> Result<AuthProvider> {
        let url = urls::build_url(base_url, definition::SP_TAG_ENDPOINT)?;

        #[cfg(feature = "logging")]
        tracing::debug!("Discovering authorization provider via {}", url);

        let response = self
            .transport
            .execute(Request {
                method: Method::Post,
                url,
                headers: request_headers(Some(FORM_CONTENT_TYPE), None),
                body: None,
            })
            .await?;

        let Some(challenge_value) = response.header("www-authenticate") else {
            #[cfg(feature = "logging")]
            tracing::warn!(
                "Discovery response (status {}) carried no WWW-Authenticate header",
                response.status
            );
            return Err(Error::MissingChallengeHeader);
        };

        challenge::parse_challenge(challenge_value)
    }
}

fn request_headers(
    content_type: Option<&str>,
    access_token: Option<&str>,
) -> Vec<(String, String)> {
    let mut headers = Vec::new();
    if let Some(content_type) = content_type {
        headers.push(("Content-Type".to_string(), content_type.to_string()));
    }
    if let Some(token) = access_token {
        headers.push(("Authorization".to_string(), format!("Bearer {}", token)));
    }
    headers
}

/// Builder for configuring a RadioTagClient
#[derive(Debug)]
pub struct ClientBuilder {
    transport: Option<Arc<dyn Transport>>,
    client: Option<reqwest::Client>,
    timeout: Duration,
    user_agent: String,
    proxy: Option<String>,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self {
            transport: None,
            client: None,
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            proxy: None,
        }
    }
}

impl ClientBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a custom transport; all other HTTP settings are ignored
    pub fn transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    /// Set a custom HTTP client for the default transport
    pub fn client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set a custom User-Agent header
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set a proxy URL
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Build the client
    pub async fn build(self) -> Result<RadioTagClient> {
        if let Some(transport) = self.transport {
            return Ok(RadioTagClient { transport });
        }

        let client = if let Some(client) = self.client {
            client
        } else {
            let mut builder = reqwest::Client::builder()
                .user_agent(&self.user_agent)
                .timeout(self.timeout);

            if let Some(proxy_url) = &self.proxy {
                let proxy = reqwest::Proxy::all(proxy_url)
                    .map_err(|e| Error::other(format!("Invalid proxy: {}", e)))?;
                builder = builder.proxy(proxy);
            }

            builder.build()?
        };

        Ok(RadioTagClient {
            transport: Arc::new(ReqwestTransport::new(client, self.timeout)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::Response;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Transport that replays a canned response and records the request
    #[derive(Debug)]
    struct StubTransport {
        response: Response,
        seen: Mutex<Option<Request>>,
    }

    impl StubTransport {
        fn new(status: u16, headers: &[(&str, &str)], body: &str) -> Self {
            let headers = headers
                .iter()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect::<HashMap<_, _>>();
            Self {
                response: Response {
                    status,
                    headers,
                    body: body.to_string(),
                },
                seen: Mutex::new(None),
            }
        }
    }

    #[async_trait::async_trait]
    impl Transport for StubTransport {
        async fn execute(&self, request: Request) -> Result<Response> {
            *self.seen.lock().unwrap() = Some(request);
            Ok(self.response.clone())
        }
    }

    const CHALLENGE: &str =
        "CPA version=\"1.0\" name=\"Example AP\" uri=\"https://ap.example.com\" modes=\"client\"";

    #[test]
    fn test_builder_defaults() {
        let builder = ClientBuilder::default();
        assert_eq!(
            builder.timeout,
            Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS)
        );
        assert_eq!(builder.user_agent, DEFAULT_USER_AGENT);
    }

    #[tokio::test]
    async fn test_discovery_reads_header_off_unauthorized_response() {
        let client = RadioTagClient::with_transport(StubTransport::new(
            401,
            &[("www-authenticate", CHALLENGE)],
            "",
        ));

        let provider = client
            .get_auth_provider("https://sp.example.com")
            .await
            .unwrap();
        assert_eq!(provider.base_url, "https://ap.example.com/");
        assert!(provider.modes.client);
        assert!(!provider.modes.user);
    }

    #[tokio::test]
    async fn test_discovery_reads_header_off_success_response() {
        let client = RadioTagClient::with_transport(StubTransport::new(
            200,
            &[("www-authenticate", CHALLENGE)],
            "",
        ));

        let provider = client
            .get_auth_provider("https://sp.example.com")
            .await
            .unwrap();
        assert_eq!(provider.base_url, "https://ap.example.com/");
    }

    #[tokio::test]
    async fn test_discovery_without_header_fails_whatever_the_status() {
        for status in [200, 401] {
            let client = RadioTagClient::with_transport(StubTransport::new(status, &[], ""));
            let result = client.get_auth_provider("https://sp.example.com").await;
            assert!(matches!(result, Err(Error::MissingChallengeHeader)));
        }
    }

    #[tokio::test]
    async fn test_discovery_post_is_unauthenticated_and_bodyless() {
        let transport = Arc::new(StubTransport::new(
            401,
            &[("www-authenticate", CHALLENGE)],
            "",
        ));
        let client = RadioTagClient {
            transport: transport.clone(),
        };

        client
            .get_auth_provider("https://sp.example.com")
            .await
            .unwrap();

        let request = transport.seen.lock().unwrap().take().unwrap();
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.url.as_str(), "https://sp.example.com/tag");
        assert!(request.body.is_none());
        assert!(
            !request
                .headers
                .iter()
                .any(|(name, _)| name.eq_ignore_ascii_case("authorization"))
        );
    }

    #[tokio::test]
    async fn test_tag_body_carries_floored_time_and_source() {
        use chrono::TimeZone;

        let feed = r#"<feed>
  <author><name>BBC</name></author>
  <entry>
    <title>Show</title>
    <summary>desc</summary>
    <published>2020-01-01T00:00:00Z</published>
  </entry>
</feed>"#;
        let transport = Arc::new(StubTransport::new(201, &[], feed));
        let client = RadioTagClient {
            transport: transport.clone(),
        };

        let time = Utc.timestamp_opt(1_600_000_000, 500_000_000).unwrap();
        let tag = client
            .tag(
                "https://sp.example.com",
                "dab:ce1.ce15.c221.0",
                time,
                Some(TimeSource::Broadcast),
                Some("secret"),
            )
            .await
            .unwrap();
        assert_eq!(tag.title, "Show");

        let request = transport.seen.lock().unwrap().take().unwrap();
        assert_eq!(
            request.body.as_deref(),
            Some("bearer=dab%3Ace1.ce15.c221.0&time=1600000000&time_source=broadcast")
        );
        assert!(request.headers.contains(&(
            "Authorization".to_string(),
            "Bearer secret".to_string()
        )));
    }

    #[tokio::test]
    async fn test_error_status_propagates_unchanged() {
        let client = RadioTagClient::with_transport(StubTransport::new(500, &[], "boom"));
        let result = client.get_tags("https://sp.example.com", None).await;
        match result {
            Err(Error::ErrorResponse { status, body }) => {
                assert_eq!(status, 500);
                assert_eq!(body, "boom");
            }
            other => panic!("expected ErrorResponse, got {:?}", other),
        }
    }
}
