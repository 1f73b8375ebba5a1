//! Data models for RadioTAG protocol exchanges
//!
//! This module contains the structures returned by the protocol client:
//! tag records extracted from service feeds and the authorization-provider
//! information extracted from discovery challenges.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Tag Records
// ============================================================================

/// A tagged broadcast moment
///
/// Produced from one entry of a service feed. The author is shared by every
/// tag of the same feed (a feed has exactly one author). Immutable once
/// constructed; the caller owns it after the operation completes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tag {
    /// Name of the service provider, from the feed's top-level author
    pub author: String,
    /// Title of the entry (e.g., programme name)
    pub title: String,
    /// Descriptive text (e.g., artist/track or programme description)
    pub summary: String,
    /// Published time of the entry
    pub published: DateTime<Utc>,
}

// ============================================================================
// Authorization Discovery Models
// ============================================================================

/// Result of an authorization-discovery exchange
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthProvider {
    /// Absolute base URL of the authorization provider, always terminated
    /// with a trailing slash so relative paths can be appended
    pub base_url: String,
    /// Authentication modes the provider supports
    pub modes: Modes,
}

/// Authentication modes announced by an authorization provider
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Modes {
    /// Device (client) mode supported
    pub client: bool,
    /// User mode supported
    pub user: bool,
    /// Anonymous mode. Reserved: always false in this protocol version
    pub anonymous: bool,
}

// ============================================================================
// Tag Request Parameters
// ============================================================================

/// Source of the time reported with a tag
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TimeSource {
    /// Time taken from the broadcast signal
    Broadcast,
    /// Time entered by the user
    User,
    /// Time from an NTP-synchronized clock
    Ntp,
}

impl TimeSource {
    /// Wire token for the `time_source` form parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeSource::Broadcast => "broadcast",
            TimeSource::User => "user",
            TimeSource::Ntp => "ntp",
        }
    }
}

impl fmt::Display for TimeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
