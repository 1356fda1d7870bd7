use crate::domain::video::VideoRecord;

use super::model::{Enclosure, FeedEnvelope, FeedItem, FeedPerson, InstanceInfo};

/// Generator tag advertised in every envelope.
const GENERATOR: &str = "tubefeed";

/// Build the envelope and one feed item per video record.
///
/// The store's return order is preserved as-is (already newest first) and
/// records are trusted to be unique; no re-sorting, no deduplication.
pub fn assemble(instance: &InstanceInfo, videos: &[VideoRecord]) -> (FeedEnvelope, Vec<FeedItem>) {
    let envelope = build_envelope(instance);
    let items = videos.iter().map(to_item).collect();
    (envelope, items)
}

fn build_envelope(instance: &InstanceInfo) -> FeedEnvelope {
    let url = &instance.webserver_url;

    FeedEnvelope {
        title: instance.name.clone(),
        description: instance.short_description.clone(),
        id: url.clone(),
        link: url.clone(),
        image: format!("{}/client/assets/images/icon-96x96.png", url),
        favicon: format!("{}/client/assets/images/favicon.png", url),
        copyright: format!(
            "All rights reserved, unless otherwise specified in the terms specified at {}/about and potential licenses given by content",
            url
        ),
        generator: GENERATOR.to_string(),
        author: FeedPerson {
            name: format!("instance admin of {}", instance.name),
            email: Some(instance.admin_email.clone()),
            link: format!("{}/about", url),
        },
    }
}

fn to_item(video: &VideoRecord) -> FeedItem {
    let enclosures = video
        .variants
        .iter()
        .map(|variant| Enclosure {
            // Variants carry no human-facing name of their own.
            title: video.name.clone(),
            url: variant.file_url.clone(),
            mime_type: variant.mime_type.clone(),
            size_bytes: variant.size_bytes,
        })
        .collect();

    FeedItem {
        title: video.name.clone(),
        id: video.url.clone(),
        link: video.url.clone(),
        description: video.truncated_description(),
        content: video.description.clone(),
        authors: vec![FeedPerson {
            name: video.owner.display_name.clone(),
            email: None,
            link: video.owner.url.clone(),
        }],
        date: video.published_at,
        thumbnail_url: video.thumbnail_url.clone(),
        enclosures,
    }
}
