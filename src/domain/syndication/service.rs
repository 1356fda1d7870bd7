use async_trait::async_trait;
use std::sync::Arc;

use crate::infrastructure::repositories::{AccountRepository, VideoRepository};

use super::error::SyndicationError;
use super::format::OutputFormat;
use super::model::{AccountId, AccountSelector, InstanceInfo, ListingWindow};
use super::request::{self, RawFeedQuery};
use super::{assembler, render};

/// A feed body ready to be sent, together with the format it was rendered in.
#[derive(Debug, Clone)]
pub struct RenderedFeed {
    pub format: OutputFormat,
    pub body: String,
}

pub struct SyndicationService {
    accounts: Arc<dyn AccountRepository>,
    videos: Arc<dyn VideoRepository>,
    instance: InstanceInfo,
}

impl SyndicationService {
    pub fn new(
        accounts: Arc<dyn AccountRepository>,
        videos: Arc<dyn VideoRepository>,
        instance: InstanceInfo,
    ) -> Self {
        Self {
            accounts,
            videos,
            instance,
        }
    }
}

#[async_trait]
pub trait SyndicationServiceApi: Send + Sync {
    /// Run the whole pipeline for one request: validate, resolve the scope,
    /// list, assemble, render. Fails fast; a partial feed is never produced.
    async fn build_feed(
        &self,
        path: &str,
        query: RawFeedQuery,
    ) -> Result<RenderedFeed, SyndicationError>;
}

#[async_trait]
impl SyndicationServiceApi for SyndicationService {
    async fn build_feed(
        &self,
        path: &str,
        query: RawFeedQuery,
    ) -> Result<RenderedFeed, SyndicationError> {
        let feed_request = request::validate(path, &query)?;

        let scope = self.resolve_scope(feed_request.scope.as_ref()).await?;

        let window = ListingWindow::feed_defaults();
        let (videos, total) = match scope {
            // Feeds carry no authentication, so the scoped listing never
            // widens beyond public videos.
            Some(account_id) => self
                .videos
                .list_for_account(account_id, &window, false)
                .await,
            None => self.videos.list_globally(&window, feed_request.filter).await,
        }
        .map_err(|e| SyndicationError::ListingUnavailable(e.to_string()))?;

        tracing::debug!(
            total,
            returned = videos.len(),
            format = ?feed_request.format,
            scoped = scope.is_some(),
            "video listing fetched for feed"
        );

        let (envelope, items) = assembler::assemble(&self.instance, &videos);

        let body = render::render(feed_request.format, &envelope, &items)
            .map_err(|e| SyndicationError::Render(e.to_string()))?;

        Ok(RenderedFeed {
            format: feed_request.format,
            body,
        })
    }
}

impl SyndicationService {
    async fn resolve_scope(
        &self,
        selector: Option<&AccountSelector>,
    ) -> Result<Option<AccountId>, SyndicationError> {
        let selector = match selector {
            None => return Ok(None),
            Some(selector) => selector,
        };

        let resolved = match selector {
            AccountSelector::ById(identifier) => self
                .accounts
                .find_by_identifier(identifier)
                .await
                .map_err(|e| SyndicationError::Dependency(e.to_string()))?,
            AccountSelector::ByName(name) => self
                .accounts
                .find_local_by_name(name)
                .await
                .map_err(|e| SyndicationError::Dependency(e.to_string()))?,
        };

        resolved.map(Some).ok_or(SyndicationError::AccountNotFound)
    }
}
