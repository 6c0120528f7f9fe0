use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::video::{best_thumbnail, parse_count, Thumbnails};

/// Recognized shape of a channel URL
///
/// `Id` resolves with zero API calls; `Handle` needs one lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelPath {
    Id(String),
    Handle(String),
}

/// `snippet` part of a channel resource
#[derive(Debug, Default, Deserialize, Clone)]
pub struct ChannelSnippet {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "publishedAt")]
    pub published_at: Option<String>,
    pub thumbnails: Option<Thumbnails>,
}

/// `statistics` part of a channel resource
#[derive(Debug, Default, Deserialize, Clone)]
pub struct ChannelStatistics {
    #[serde(rename = "subscriberCount")]
    pub subscriber_count: Option<String>,
    #[serde(rename = "viewCount")]
    pub view_count: Option<String>,
    #[serde(rename = "videoCount")]
    pub video_count: Option<String>,
}

/// `contentDetails.relatedPlaylists` part of a channel resource
#[derive(Debug, Default, Deserialize, Clone)]
pub struct RelatedPlaylists {
    pub uploads: Option<String>,
}

/// `contentDetails` part of a channel resource
#[derive(Debug, Default, Deserialize, Clone)]
pub struct ChannelContentDetails {
    #[serde(rename = "relatedPlaylists")]
    pub related_playlists: Option<RelatedPlaylists>,
}

/// `topicDetails` part of a channel resource
#[derive(Debug, Default, Deserialize, Clone)]
pub struct ChannelTopicDetails {
    #[serde(rename = "topicCategories")]
    pub topic_categories: Option<Vec<String>>,
}

/// One item of a `channels.list` response
#[derive(Debug, Deserialize, Clone)]
pub struct ChannelItem {
    pub id: String,
    pub snippet: Option<ChannelSnippet>,
    pub statistics: Option<ChannelStatistics>,
    #[serde(rename = "contentDetails")]
    pub content_details: Option<ChannelContentDetails>,
    #[serde(rename = "topicDetails")]
    pub topic_details: Option<ChannelTopicDetails>,
}

/// `channels.list` response envelope
#[derive(Debug, Default, Deserialize)]
pub struct ChannelListResponse {
    #[serde(default)]
    pub items: Vec<ChannelItem>,
}

/// Flat overview of a public channel
#[derive(Debug, Serialize, Clone)]
pub struct ChannelOverview {
    pub channel_id: String,
    pub title: String,
    pub description: String,
    pub subscriber_count: u64,
    pub total_views: u64,
    pub total_videos: u64,
    pub created_at: String,
    pub thumbnail_url: String,
}

/// Topic categories associated with a channel
#[derive(Debug, Serialize, Clone)]
pub struct ChannelTopics {
    pub channel_id: String,
    pub title: String,
    pub topics: Vec<String>,
    pub topic_category_urls: Vec<String>,
}

/// Classify a channel URL as a direct channel ID or a handle.
///
/// Supported formats:
///   - https://www.youtube.com/channel/UCxxxx
///   - https://www.youtube.com/@handle
///
/// Anything else is an error naming both accepted formats.
pub fn parse_channel_url(channel_url: &str) -> Result<ChannelPath, String> {
    let id_re = Regex::new(r"/channel/(UC[\w-]+)/?$").unwrap();
    if let Some(caps) = id_re.captures(channel_url) {
        return Ok(ChannelPath::Id(caps[1].to_string()));
    }

    let handle_re = Regex::new(r"/@([\w.-]+)/?$").unwrap();
    if let Some(caps) = handle_re.captures(channel_url) {
        return Ok(ChannelPath::Handle(caps[1].to_string()));
    }

    Err(format!(
        "Unsupported channel URL format: {channel_url}. \
         Use https://www.youtube.com/@handle or https://www.youtube.com/channel/UCxxxx"
    ))
}

/// Flatten a raw channel item into a [`ChannelOverview`].
pub fn build_overview(channel_id: &str, item: &ChannelItem) -> ChannelOverview {
    let snippet = item.snippet.clone().unwrap_or_default();
    let stats = item.statistics.clone().unwrap_or_default();

    ChannelOverview {
        channel_id: channel_id.to_string(),
        title: snippet.title.unwrap_or_default(),
        description: snippet.description.unwrap_or_default(),
        subscriber_count: parse_count(stats.subscriber_count.as_ref()),
        total_views: parse_count(stats.view_count.as_ref()),
        total_videos: parse_count(stats.video_count.as_ref()),
        created_at: snippet.published_at.unwrap_or_default(),
        thumbnail_url: snippet
            .thumbnails
            .as_ref()
            .map(best_thumbnail)
            .unwrap_or_default(),
    }
}

/// Derive a readable topic name from a Wikipedia category URL.
///
/// e.g. "https://en.wikipedia.org/wiki/Video_game_culture" -> "Video game culture"
pub fn readable_topic(category_url: &str) -> String {
    category_url
        .rsplit("/wiki/")
        .next()
        .unwrap_or(category_url)
        .replace('_', " ")
}

/// Build the topic output for a channel.
///
/// Raw Freebase topic IDs are never surfaced; only the Wikipedia category
/// URLs carry human-readable names.
pub fn build_topics(channel_id: &str, item: &ChannelItem) -> ChannelTopics {
    let raw_categories = item
        .topic_details
        .as_ref()
        .and_then(|t| t.topic_categories.clone())
        .unwrap_or_default();

    ChannelTopics {
        channel_id: channel_id.to_string(),
        title: item
            .snippet
            .as_ref()
            .and_then(|s| s.title.clone())
            .unwrap_or_default(),
        topics: raw_categories.iter().map(|u| readable_topic(u)).collect(),
        topic_category_urls: raw_categories,
    }
}
