use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Character budget for the short description used in feed summaries.
const TRUNCATED_DESCRIPTION_MAX: usize = 250;

/// The human-facing owner of a video, as recorded by the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoOwner {
    pub display_name: String,
    pub url: String,
}

/// One retrievable rendition of a video (resolution variant).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaVariant {
    pub label: String,
    pub file_url: String,
    pub mime_type: String,
    pub size_bytes: u64,
}

/// A published video as returned by the catalog store.
///
/// `url` is the canonical, dereferenceable address of the video and doubles
/// as its stable identifier in syndicated output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoRecord {
    pub id: i64,
    pub uuid: Uuid,
    pub name: String,
    pub description: String,
    pub url: String,
    pub thumbnail_url: String,
    pub published_at: DateTime<Utc>,
    pub owner: VideoOwner,
    pub variants: Vec<MediaVariant>,
}

impl VideoRecord {
    /// Short description shown in feed item summaries.
    pub fn truncated_description(&self) -> String {
        if self.description.chars().count() <= TRUNCATED_DESCRIPTION_MAX {
            return self.description.clone();
        }

        let cut: String = self
            .description
            .chars()
            .take(TRUNCATED_DESCRIPTION_MAX)
            .collect();
        format!("{}...", cut.trim_end())
    }
}
