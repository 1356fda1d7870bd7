use anyhow::{anyhow, Result};
use atom_syndication::extension::ExtensionBuilder as AtomExtensionBuilder;
use atom_syndication::{
    ContentBuilder, Entry, EntryBuilder, FeedBuilder, GeneratorBuilder, Link, LinkBuilder, Person,
    PersonBuilder, Text,
};
use chrono::{DateTime, Utc};
use rss::extension::dublincore::DublinCoreExtensionBuilder;
use rss::extension::ExtensionBuilder;
use rss::validation::Validate;
use rss::{ChannelBuilder, EnclosureBuilder, GuidBuilder, ImageBuilder, ItemBuilder};
use serde::Serialize;
use std::collections::BTreeMap;

use super::format::OutputFormat;
use super::model::{FeedEnvelope, FeedItem, FeedPerson};

const MEDIA_RSS_NS: &str = "http://search.yahoo.com/mrss/";
const DUBLIN_CORE_NS: &str = "http://purl.org/dc/elements/1.1/";

/// Render the assembled feed into the chosen wire format.
///
/// Output contains no wall-clock timestamps: the same envelope and items
/// always serialize to the same bytes.
pub fn render(format: OutputFormat, envelope: &FeedEnvelope, items: &[FeedItem]) -> Result<String> {
    match format {
        OutputFormat::Rss2 => to_rss2(envelope, items),
        OutputFormat::Atom1 => to_atom1(envelope, items),
        OutputFormat::Json1 => to_json1(envelope, items),
    }
}

// ---------------------------------------------------------------------------
// RSS 2.0
// ---------------------------------------------------------------------------

fn to_rss2(envelope: &FeedEnvelope, items: &[FeedItem]) -> Result<String> {
    let rss_items: Vec<rss::Item> = items.iter().map(rss_item).collect();

    let image = ImageBuilder::default()
        .url(envelope.image.clone())
        .title(envelope.title.clone())
        .link(envelope.link.clone())
        .build();

    let namespaces = BTreeMap::from([
        ("media".to_string(), MEDIA_RSS_NS.to_string()),
        ("dc".to_string(), DUBLIN_CORE_NS.to_string()),
    ]);

    let channel = ChannelBuilder::default()
        .title(envelope.title.clone())
        .link(envelope.link.clone())
        .description(envelope.description.clone())
        .generator(envelope.generator.clone())
        .copyright(envelope.copyright.clone())
        .namespaces(namespaces)
        .image(image)
        .items(rss_items)
        .build();

    channel
        .validate()
        .map_err(|e| anyhow!("RSS validation failed: {e}"))?;
    Ok(channel.to_string())
}

fn rss_item(item: &FeedItem) -> rss::Item {
    let guid = GuidBuilder::default()
        .permalink(true)
        .value(item.id.clone())
        .build();

    let mut builder = ItemBuilder::default();
    builder
        .title(item.title.clone())
        .link(item.link.clone())
        .guid(guid)
        .description(item.description.clone())
        .content(item.content.clone())
        .pub_date(item.date.to_rfc2822());

    // RSS <author> expects "email (Name)"; skipped when the author has no
    // email. Attribution for readers comes from dc:creator instead.
    if let Some(author) = item.authors.first() {
        if let Some(email) = &author.email {
            builder.author(format!("{} ({})", email, author.name));
        }
        builder.dublin_core_ext(
            DublinCoreExtensionBuilder::default()
                .creators(vec![author.name.clone()])
                .build(),
        );
    }

    builder.extensions(rss_thumbnail(&item.thumbnail_url));

    // The RSS 2.0 item model carries at most one enclosure.
    if let Some(enclosure) = item.enclosures.first() {
        builder.enclosure(
            EnclosureBuilder::default()
                .url(enclosure.url.clone())
                .length(enclosure.size_bytes.to_string())
                .mime_type(enclosure.mime_type.clone())
                .build(),
        );
    }

    builder.build()
}

fn rss_thumbnail(url: &str) -> rss::extension::ExtensionMap {
    let thumbnail = ExtensionBuilder::default()
        .name("media:thumbnail")
        .attrs(BTreeMap::from([("url".to_string(), url.to_string())]))
        .build();

    BTreeMap::from([(
        "media".to_string(),
        BTreeMap::from([("thumbnail".to_string(), vec![thumbnail])]),
    )])
}

// ---------------------------------------------------------------------------
// Atom 1.0
// ---------------------------------------------------------------------------

fn to_atom1(envelope: &FeedEnvelope, items: &[FeedItem]) -> Result<String> {
    // Derived from the newest item so repeated requests stay byte-identical.
    let updated = items
        .iter()
        .map(|item| item.date)
        .max()
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH);

    let links = vec![
        LinkBuilder::default()
            .href(envelope.self_link(OutputFormat::Atom1))
            .rel("self")
            .build(),
        LinkBuilder::default()
            .href(envelope.link.clone())
            .rel("alternate")
            .build(),
    ];

    let feed = FeedBuilder::default()
        .namespaces(BTreeMap::from([(
            "media".to_string(),
            MEDIA_RSS_NS.to_string(),
        )]))
        .title(Text::plain(envelope.title.clone()))
        .subtitle(Text::plain(envelope.description.clone()))
        .id(envelope.id.clone())
        .updated(updated.fixed_offset())
        .generator(
            GeneratorBuilder::default()
                .value(envelope.generator.clone())
                .build(),
        )
        .icon(envelope.favicon.clone())
        .logo(envelope.image.clone())
        .rights(Text::plain(envelope.copyright.clone()))
        .links(links)
        .authors(vec![atom_person(&envelope.author)])
        .entries(items.iter().map(atom_entry).collect::<Vec<_>>())
        .build();

    Ok(feed.to_string())
}

fn atom_entry(item: &FeedItem) -> Entry {
    let mut links: Vec<Link> = vec![LinkBuilder::default()
        .href(item.link.clone())
        .rel("alternate")
        .build()];

    for enclosure in &item.enclosures {
        links.push(
            LinkBuilder::default()
                .href(enclosure.url.clone())
                .rel("enclosure")
                .mime_type(enclosure.mime_type.clone())
                .length(enclosure.size_bytes.to_string())
                .title(enclosure.title.clone())
                .build(),
        );
    }

    EntryBuilder::default()
        .title(Text::plain(item.title.clone()))
        .id(item.id.clone())
        .updated(item.date.fixed_offset())
        .published(item.date.fixed_offset())
        .summary(Text::plain(item.description.clone()))
        .content(
            ContentBuilder::default()
                .value(item.content.clone())
                .content_type("text".to_string())
                .build(),
        )
        .authors(item.authors.iter().map(atom_person).collect::<Vec<_>>())
        .links(links)
        .extensions(atom_thumbnail(&item.thumbnail_url))
        .build()
}

fn atom_thumbnail(url: &str) -> atom_syndication::extension::ExtensionMap {
    let thumbnail = AtomExtensionBuilder::default()
        .name("media:thumbnail")
        .attrs(BTreeMap::from([("url".to_string(), url.to_string())]))
        .build();

    BTreeMap::from([(
        "media".to_string(),
        BTreeMap::from([("thumbnail".to_string(), vec![thumbnail])]),
    )])
}

fn atom_person(person: &FeedPerson) -> Person {
    PersonBuilder::default()
        .name(person.name.clone())
        .email(person.email.clone())
        .uri(person.link.clone())
        .build()
}

// ---------------------------------------------------------------------------
// JSON Feed 1.0
// ---------------------------------------------------------------------------

const JSON_FEED_VERSION: &str = "https://jsonfeed.org/version/1";

#[derive(Debug, Serialize)]
struct JsonFeed<'a> {
    version: &'static str,
    title: &'a str,
    home_page_url: &'a str,
    feed_url: String,
    description: &'a str,
    icon: &'a str,
    favicon: &'a str,
    author: JsonAuthor<'a>,
    items: Vec<JsonItem<'a>>,
}

#[derive(Debug, Serialize)]
struct JsonAuthor<'a> {
    name: &'a str,
    url: &'a str,
}

#[derive(Debug, Serialize)]
struct JsonItem<'a> {
    id: &'a str,
    url: &'a str,
    title: &'a str,
    summary: &'a str,
    content_html: &'a str,
    image: &'a str,
    date_published: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    author: Option<JsonAuthor<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    attachments: Vec<JsonAttachment<'a>>,
}

#[derive(Debug, Serialize)]
struct JsonAttachment<'a> {
    url: &'a str,
    mime_type: &'a str,
    title: &'a str,
    size_in_bytes: u64,
}

fn to_json1(envelope: &FeedEnvelope, items: &[FeedItem]) -> Result<String> {
    let feed = JsonFeed {
        version: JSON_FEED_VERSION,
        title: &envelope.title,
        home_page_url: &envelope.link,
        feed_url: envelope.self_link(OutputFormat::Json1),
        description: &envelope.description,
        icon: &envelope.image,
        favicon: &envelope.favicon,
        author: JsonAuthor {
            name: &envelope.author.name,
            url: &envelope.author.link,
        },
        items: items.iter().map(json_item).collect(),
    };

    Ok(serde_json::to_string(&feed)?)
}

fn json_item(item: &FeedItem) -> JsonItem<'_> {
    JsonItem {
        id: &item.id,
        url: &item.link,
        title: &item.title,
        summary: &item.description,
        content_html: &item.content,
        image: &item.thumbnail_url,
        date_published: item.date.to_rfc3339(),
        author: item.authors.first().map(|author| JsonAuthor {
            name: &author.name,
            url: &author.link,
        }),
        attachments: item
            .enclosures
            .iter()
            .map(|enclosure| JsonAttachment {
                url: &enclosure.url,
                mime_type: &enclosure.mime_type,
                title: &enclosure.title,
                size_in_bytes: enclosure.size_bytes,
            })
            .collect(),
    }
}
