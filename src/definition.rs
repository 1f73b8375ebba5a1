//! RadioTAG service endpoint definitions
//!
//! Static catalog of the relative paths exposed by a RadioTAG service
//! provider, plus the fixed error messages used by the protocol client.
//! Absolute request URLs are built from these by [`crate::urls::build_url`].

/// Relative path of the "post a tag" endpoint
pub const SP_TAG_ENDPOINT: &str = "tag";

/// Relative path of the "list tags" endpoint
pub const SP_LIST_TAGS_ENDPOINT: &str = "tags";

/// Message reported when a discovery response carries no `WWW-Authenticate`
/// header. Intermediary proxies commonly strip the header, and browsers hide
/// it cross-origin unless the service exposes it.
pub const HEADER_NOT_FOUND: &str = "Missing WWW-Authenticate header. Please make sure CORS \
     headers are correctly sent (\"Access-Control-Expose-Headers: WWW-Authenticate\")";
