use axum::{
    body::Body,
    extract::{Query, State},
    http::{header, StatusCode, Uri},
    response::Response,
};
use std::sync::Arc;

use crate::{
    domain::syndication::{RawFeedQuery, SyndicationService, SyndicationServiceApi},
    error::{AppError, AppResult},
};

pub struct FeedsController {
    syndication_service: Arc<SyndicationService>,
}

impl FeedsController {
    pub fn new(syndication_service: Arc<SyndicationService>) -> Self {
        Self {
            syndication_service,
        }
    }

    /// GET /feeds/videos.{xml,json,json1,rss,rss2,atom,atom1} - Syndicated
    /// video listing. The path extension and the `format` query parameter
    /// together select the output format.
    pub async fn videos(
        State(controller): State<Arc<FeedsController>>,
        uri: Uri,
        Query(query): Query<RawFeedQuery>,
    ) -> AppResult<Response> {
        let feed = controller
            .syndication_service
            .build_feed(uri.path(), query)
            .await?;

        Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, feed.format.content_type())
            .body(Body::from(feed.body))
            .map_err(|e| AppError::Internal(e.to_string()))
    }
}
