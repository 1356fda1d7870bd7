use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::format::OutputFormat;

/// Canonical numeric identifier of an account.
pub type AccountId = i64;

/// An id-shaped account selector, before resolution against the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountIdentifier {
    Numeric(i64),
    Uuid(Uuid),
}

/// Optional restriction of a feed to one account's videos.
///
/// When both `accountId` and `accountName` are supplied, the id wins and the
/// name is never consulted. A numeric id is an unambiguous, cheaper lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountSelector {
    ById(AccountIdentifier),
    ByName(String),
}

/// Catalog-wide restriction applied to unscoped listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentFilter {
    /// Only videos originating on this instance.
    Local,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoSort {
    NewestFirst,
}

/// Pagination and ordering of a listing call. Feeds always serve the latest
/// page, so the window is fixed and caller-supplied pagination is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingWindow {
    pub offset: u32,
    pub limit: u32,
    pub sort: VideoSort,
}

/// Number of items a feed page carries.
pub const FEED_PAGE_SIZE: u32 = 10;

impl ListingWindow {
    pub fn feed_defaults() -> Self {
        Self {
            offset: 0,
            limit: FEED_PAGE_SIZE,
            sort: VideoSort::NewestFirst,
        }
    }
}

/// A validated feed request, ready for scope resolution and listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedRequest {
    pub format: OutputFormat,
    pub scope: Option<AccountSelector>,
    pub filter: Option<ContentFilter>,
}

/// A person referenced by a feed (item author or instance admin).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedPerson {
    pub name: String,
    pub email: Option<String>,
    pub link: String,
}

/// A downloadable-resource descriptor attached to a feed item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enclosure {
    pub title: String,
    pub url: String,
    pub mime_type: String,
    pub size_bytes: u64,
}

/// One syndicated entry, derived from one video record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedItem {
    pub title: String,
    /// Canonical video URL; identical to `link` so the identifier stays
    /// stable and dereferenceable.
    pub id: String,
    pub link: String,
    pub description: String,
    pub content: String,
    pub authors: Vec<FeedPerson>,
    pub date: DateTime<Utc>,
    /// Still image advertised alongside the item.
    pub thumbnail_url: String,
    pub enclosures: Vec<Enclosure>,
}

/// Format-independent metadata wrapper around the item list. Built once per
/// request from instance configuration; identical across all items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEnvelope {
    pub title: String,
    pub description: String,
    pub id: String,
    pub link: String,
    pub image: String,
    pub favicon: String,
    pub copyright: String,
    pub generator: String,
    pub author: FeedPerson,
}

impl FeedEnvelope {
    /// Self link advertised for a given output format.
    pub fn self_link(&self, format: OutputFormat) -> String {
        format!("{}/feeds/{}", self.link, format.self_link_suffix())
    }
}

/// Instance-level presentation values consumed when building the envelope.
/// Passed in explicitly so the assembler reads no ambient global state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstanceInfo {
    pub name: String,
    pub short_description: String,
    pub admin_email: String,
    /// Scheme + host of this instance, no trailing slash.
    pub webserver_url: String,
}
