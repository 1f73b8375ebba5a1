//! Parser for RadioTAG service feeds
//!
//! Tag and list responses are Atom-style XML documents with one top-level
//! author and zero or more entries. The document is deserialized through
//! serde into a raw wire shape, then validated into [`Tag`] records: the
//! author name is taken once from the document root and applied to every
//! entry (a feed has exactly one author, shared by all entries).

use crate::error::{Error, Result};
use crate::models::Tag;
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Raw wire shape of a service feed
#[derive(Debug, Deserialize)]
struct FeedDocument {
    author: Option<AuthorElement>,
    #[serde(rename = "entry", default)]
    entries: Vec<EntryElement>,
}

#[derive(Debug, Deserialize)]
struct AuthorElement {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EntryElement {
    title: Option<String>,
    summary: Option<String>,
    published: Option<String>,
}

/// Parse a service feed into tag records, in document order
///
/// Zero entries is a valid feed and yields an empty list; that is the
/// expected shape of a list request with no tag history. Re-parsing the same
/// body yields an identical sequence.
///
/// # Errors
///
/// [`Error::MalformedFeed`] when the document does not parse, has no author
/// name, or an entry is missing any of title/summary/published or carries an
/// unparsable published date. Downstream code depends on every field being
/// present, so nothing is silently omitted.
pub fn parse_tags(body: &str) -> Result<Vec<Tag>> {
    let document: FeedDocument = quick_xml::de::from_str(body)
        .map_err(|e| Error::malformed_feed(format!("invalid feed document: {}", e)))?;

    let author = document
        .author
        .and_then(|author| author.name)
        .ok_or_else(|| Error::malformed_feed("feed has no author name"))?;

    document
        .entries
        .into_iter()
        .map(|entry| build_tag(&author, entry))
        .collect()
}

/// Parse a service feed and return its first tag
///
/// A tag post is expected to echo back exactly the tag just created, so the
/// feed must contain at least one entry. Thin projection over
/// [`parse_tags`]; the two operations can never disagree on field
/// extraction.
pub fn parse_first_tag(body: &str) -> Result<Tag> {
    parse_tags(body)?
        .into_iter()
        .next()
        .ok_or(Error::EmptyResponse)
}

fn build_tag(author: &str, entry: EntryElement) -> Result<Tag> {
    let title = entry
        .title
        .ok_or_else(|| Error::malformed_feed("entry has no title"))?;
    let summary = entry
        .summary
        .ok_or_else(|| Error::malformed_feed("entry has no summary"))?;
    let published_text = entry
        .published
        .ok_or_else(|| Error::malformed_feed("entry has no published date"))?;

    let published = DateTime::parse_from_rfc3339(&published_text)
        .map_err(|e| {
            Error::malformed_feed(format!(
                "invalid published date \"{}\": {}",
                published_text, e
            ))
        })?
        .with_timezone(&Utc);

    Ok(Tag {
        author: author.to_string(),
        title,
        summary,
        published,
    })
}
