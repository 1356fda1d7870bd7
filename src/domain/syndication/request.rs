use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;
use uuid::Uuid;

use super::error::SyndicationError;
use super::format::{self, FORMAT_TOKENS};
use super::model::{AccountIdentifier, AccountSelector, ContentFilter, FeedRequest};

/// Raw, untrusted query parameters of a feed request, as they arrive on the
/// wire (camelCase, all optional).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawFeedQuery {
    pub format: Option<String>,
    pub account_id: Option<String>,
    pub account_name: Option<String>,
    pub filter: Option<String>,
}

static ACCOUNT_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9._]+$").expect("account name regex"));

const ACCOUNT_NAME_MAX: usize = 50;

/// Name-validity predicate for local account names.
pub fn is_valid_account_name(name: &str) -> bool {
    !name.is_empty() && name.len() <= ACCOUNT_NAME_MAX && ACCOUNT_NAME_RE.is_match(name)
}

/// Validate raw request parameters into a typed [`FeedRequest`].
///
/// Rejects malformed input before any data access; resolving the selector
/// against the store happens later. When both `accountId` and `accountName`
/// are supplied, the id takes precedence and the name is dropped here.
pub fn validate(path: &str, query: &RawFeedQuery) -> Result<FeedRequest, SyndicationError> {
    if let Some(token) = query.format.as_deref() {
        if !FORMAT_TOKENS.contains(&token) {
            return Err(SyndicationError::InvalidRequest("format"));
        }
    }

    let scope = if let Some(raw_id) = query.account_id.as_deref() {
        Some(AccountSelector::ById(parse_account_identifier(raw_id)?))
    } else if let Some(name) = query.account_name.as_deref() {
        if !is_valid_account_name(name) {
            return Err(SyndicationError::InvalidRequest("accountName"));
        }
        Some(AccountSelector::ByName(name.to_string()))
    } else {
        None
    };

    let filter = match query.filter.as_deref() {
        None => None,
        Some("local") => Some(ContentFilter::Local),
        Some(_) => return Err(SyndicationError::InvalidRequest("filter")),
    };

    let format = format::resolve(path, query.format.as_deref());

    Ok(FeedRequest {
        format,
        scope,
        filter,
    })
}

fn parse_account_identifier(raw: &str) -> Result<AccountIdentifier, SyndicationError> {
    if let Ok(id) = raw.parse::<i64>() {
        if id >= 0 {
            return Ok(AccountIdentifier::Numeric(id));
        }
    }
    if let Ok(uuid) = Uuid::parse_str(raw) {
        return Ok(AccountIdentifier::Uuid(uuid));
    }
    Err(SyndicationError::InvalidRequest("accountId"))
}
