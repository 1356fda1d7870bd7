use crate::domain::syndication::model::{AccountId, ContentFilter, ListingWindow, VideoSort};
use crate::domain::video::{MediaVariant, VideoOwner, VideoRecord};
use crate::error::AppResult;
use crate::infrastructure::db::DbPool;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

/// Read access to the video catalog, as needed for feed generation.
#[async_trait]
pub trait VideoRepository: Send + Sync {
    /// List published videos across the whole catalog.
    async fn list_globally(
        &self,
        window: &ListingWindow,
        filter: Option<ContentFilter>,
    ) -> AppResult<(Vec<VideoRecord>, i64)>;

    /// List videos owned by one account. `include_non_public` widens the
    /// listing beyond public videos; the anonymous feed path never sets it.
    async fn list_for_account(
        &self,
        account_id: AccountId,
        window: &ListingWindow,
        include_non_public: bool,
    ) -> AppResult<(Vec<VideoRecord>, i64)>;
}

pub struct PgVideoRepository {
    pool: Arc<DbPool>,
}

#[derive(Debug, FromRow)]
struct VideoRow {
    id: i64,
    uuid: Uuid,
    name: String,
    description: String,
    url: String,
    thumbnail_url: String,
    published_at: DateTime<Utc>,
    owner_display_name: String,
    owner_url: String,
}

#[derive(Debug, FromRow)]
struct VariantRow {
    video_id: i64,
    label: String,
    file_url: String,
    mime_type: String,
    size_bytes: i64,
}

const VIDEO_SELECT: &str = r#"
    SELECT videos.id, videos.uuid, videos.name, videos.description, videos.url,
           videos.thumbnail_url, videos.published_at,
           accounts.display_name AS owner_display_name,
           accounts.url AS owner_url
    FROM videos
    INNER JOIN accounts ON accounts.id = videos.account_id
"#;

impl PgVideoRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    fn order_clause(sort: VideoSort) -> &'static str {
        match sort {
            VideoSort::NewestFirst => "videos.created_at DESC",
        }
    }

    /// Fetch the media variants of the listed videos and fold them in,
    /// preserving the listing order.
    async fn attach_variants(&self, rows: Vec<VideoRow>) -> AppResult<Vec<VideoRecord>> {
        let pool = self.pool.as_ref();
        let ids: Vec<i64> = rows.iter().map(|row| row.id).collect();

        let variant_rows = if ids.is_empty() {
            vec![]
        } else {
            sqlx::query_as::<_, VariantRow>(
                r#"
                SELECT video_id, label, file_url, mime_type, size_bytes
                FROM video_files
                WHERE video_id = ANY($1)
                ORDER BY size_bytes DESC
                "#,
            )
            .bind(&ids)
            .fetch_all(pool)
            .await?
        };

        let mut variants_by_video: HashMap<i64, Vec<MediaVariant>> = HashMap::new();
        for row in variant_rows {
            variants_by_video
                .entry(row.video_id)
                .or_default()
                .push(MediaVariant {
                    label: row.label,
                    file_url: row.file_url,
                    mime_type: row.mime_type,
                    size_bytes: row.size_bytes.max(0) as u64,
                });
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let variants = variants_by_video.remove(&row.id).unwrap_or_default();
                VideoRecord {
                    id: row.id,
                    uuid: row.uuid,
                    name: row.name,
                    description: row.description,
                    url: row.url,
                    thumbnail_url: row.thumbnail_url,
                    published_at: row.published_at,
                    owner: VideoOwner {
                        display_name: row.owner_display_name,
                        url: row.owner_url,
                    },
                    variants,
                }
            })
            .collect())
    }
}

#[async_trait]
impl VideoRepository for PgVideoRepository {
    async fn list_globally(
        &self,
        window: &ListingWindow,
        filter: Option<ContentFilter>,
    ) -> AppResult<(Vec<VideoRecord>, i64)> {
        let pool = self.pool.as_ref();

        let mut conditions = vec!["videos.privacy = 'public'"];
        if let Some(ContentFilter::Local) = filter {
            conditions.push("videos.is_local = TRUE");
        }
        let where_clause = conditions.join(" AND ");

        let rows = sqlx::query_as::<_, VideoRow>(&format!(
            "{} WHERE {} ORDER BY {} OFFSET $1 LIMIT $2",
            VIDEO_SELECT,
            where_clause,
            Self::order_clause(window.sort),
        ))
        .bind(window.offset as i64)
        .bind(window.limit as i64)
        .fetch_all(pool)
        .await?;

        let total = sqlx::query_scalar::<_, i64>(&format!(
            "SELECT COUNT(*) FROM videos WHERE {}",
            where_clause
        ))
        .fetch_one(pool)
        .await?;

        let records = self.attach_variants(rows).await?;
        Ok((records, total))
    }

    async fn list_for_account(
        &self,
        account_id: AccountId,
        window: &ListingWindow,
        include_non_public: bool,
    ) -> AppResult<(Vec<VideoRecord>, i64)> {
        let pool = self.pool.as_ref();

        let mut conditions = vec!["videos.account_id = $1"];
        if !include_non_public {
            conditions.push("videos.privacy = 'public'");
        }
        let where_clause = conditions.join(" AND ");

        let rows = sqlx::query_as::<_, VideoRow>(&format!(
            "{} WHERE {} ORDER BY {} OFFSET $2 LIMIT $3",
            VIDEO_SELECT,
            where_clause,
            Self::order_clause(window.sort),
        ))
        .bind(account_id)
        .bind(window.offset as i64)
        .bind(window.limit as i64)
        .fetch_all(pool)
        .await?;

        let total = sqlx::query_scalar::<_, i64>(&format!(
            "SELECT COUNT(*) FROM videos WHERE {}",
            where_clause
        ))
        .bind(account_id)
        .fetch_one(pool)
        .await?;

        let records = self.attach_variants(rows).await?;
        Ok((records, total))
    }
}
