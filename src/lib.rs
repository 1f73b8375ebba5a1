//! RadioTAG protocol client library
//!
//! This crate provides a Rust client for the RadioTAG protocol: tagging a
//! moment in a live radio broadcast against a service provider, retrieving
//! the tag history, and discovering the authorization provider that issues
//! the bearer credentials the other two operations use.
//!
//! # Features
//!
//! - **Tagging**: Post a tag (`bearer` + `time` + optional `time_source`)
//!   and get back the created tag record
//! - **Tag History**: List the tags recorded for a device or user
//! - **AP Discovery**: Parse the `WWW-Authenticate` challenge a service
//!   returns to unauthenticated requests, yielding the authorization
//!   provider's base URL and supported modes
//! - **Pluggable Transport**: All HTTP goes through a narrow [`Transport`]
//!   trait; the default implementation wraps `reqwest`
//!
//! # Example
//!
//! ```no_run
//! use radiotag::RadioTagClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = RadioTagClient::new().await?;
//!
//!     // Where do credentials for this service come from?
//!     let provider = client
//!         .get_auth_provider("https://radiotag.example.com")
//!         .await?;
//!     println!("Authorization provider: {}", provider.base_url);
//!
//!     // What has this device tagged so far?
//!     let tags = client
//!         .get_tags("https://radiotag.example.com", Some("access-token"))
//!         .await?;
//!     for tag in &tags {
//!         println!("{} - {} ({})", tag.title, tag.summary, tag.published);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Protocol Notes
//!
//! Service responses are Atom-style feeds; both the tag echo and the tag
//! list go through the same parser ([`feed::parse_tags`]), so the two
//! operations can never disagree on field extraction. Discovery reads the
//! challenge header off the response whatever its HTTP status: a 401 is the
//! *expected* vehicle for the challenge, not a failure.
//!
//! The client enforces no timeouts beyond the transport's own and exposes no
//! cancellation path; each operation is one request, one response.

pub mod challenge;
pub mod client;
pub mod definition;
pub mod error;
pub mod feed;
pub mod models;
pub mod transport;
pub mod urls;

// Re-exports
pub use client::{ClientBuilder, RadioTagClient};
pub use error::{Error, Result};
pub use models::{AuthProvider, Modes, Tag, TimeSource};
pub use transport::{Method, Request, Response, ReqwestTransport, Transport};
