//! URL construction helpers
//!
//! Builds absolute request URLs from a service base URL and the relative
//! endpoint paths of [`crate::definition`], plus small helpers for going
//! between bare domains and service URLs.

use crate::error::Result;
use url::Url;

/// Build an absolute request URL from a service base URL and an endpoint path
///
/// The endpoint path replaces whatever path the base URL carries; scheme,
/// host and port are preserved, query and fragment are discarded.
///
/// # Example
///
/// ```
/// use radiotag::urls::build_url;
///
/// let url = build_url("https://sp.example.com:8080", "tag").unwrap();
/// assert_eq!(url.as_str(), "https://sp.example.com:8080/tag");
/// ```
pub fn build_url(base_url: &str, endpoint: &str) -> Result<Url> {
    let mut url = Url::parse(base_url)?;
    url.set_path(endpoint);
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}

/// Build a service base URL from a bare domain
///
/// Uses `https` unless `use_http` is set.
pub fn service_url(domain: &str, use_http: bool) -> Result<Url> {
    let scheme = if use_http { "http" } else { "https" };
    Ok(Url::parse(&format!("{}://{}", scheme, domain))?)
}

/// Return the `host:port` form of a service URL
///
/// The port falls back to the scheme's default when the URL does not carry
/// an explicit one.
pub fn domain(url: &Url) -> String {
    match (url.host_str(), url.port_or_known_default()) {
        (Some(host), Some(port)) => format!("{}:{}", host, port),
        (Some(host), None) => host.to_string(),
        (None, _) => String::new(),
    }
}
