use std::time::Duration;

use crate::error::Error;
use ytmcp_core::channel::ChannelPath;
use ytmcp_core::video::{VideoItem, VideoListResponse, VideoRecord};

pub mod channel;
pub mod transcript;
pub mod trending;
pub mod video;

/// YouTube Data API v3 base URL
pub const API_BASE: &str = "https://www.googleapis.com/youtube/v3";

/// Request timeout for all YouTube calls
const TIMEOUT: Duration = Duration::from_secs(10);

/// YouTube configuration from environment variables
#[derive(Debug, Clone)]
pub struct YouTubeConfig {
    pub api_key: String,
}

impl YouTubeConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, Error> {
        Ok(Self {
            api_key: std::env::var("YOUTUBE_API_KEY").map_err(|_| {
                Error::InvalidInput("YOUTUBE_API_KEY environment variable not set".to_string())
            })?,
        })
    }
}

/// Create an HTTP client with the standard timeout
pub fn create_client() -> Result<reqwest::Client, Error> {
    reqwest::Client::builder()
        .timeout(TIMEOUT)
        .build()
        .map_err(|e| Error::Upstream(format!("Failed to build HTTP client: {e}")))
}

/// Perform a GET against a YouTube Data API endpoint.
///
/// The API key is appended to the caller's query parameters. Non-success
/// responses are surfaced as `Error::Upstream` with the status and body.
pub async fn api_get(
    client: &reqwest::Client,
    config: &YouTubeConfig,
    endpoint: &str,
    params: &[(&str, &str)],
) -> Result<serde_json::Value, Error> {
    let url = format!("{API_BASE}/{endpoint}");
    let response = client
        .get(&url)
        .query(params)
        .query(&[("key", config.api_key.as_str())])
        .send()
        .await
        .map_err(|e| Error::Upstream(format!("Failed to reach YouTube API: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(Error::Upstream(format!(
            "YouTube API error [{status}]: {body}"
        )));
    }

    response
        .json()
        .await
        .map_err(|e| Error::Upstream(format!("Failed to parse YouTube API response: {e}")))
}

/// Fetch up to `limit` items from a paginated list endpoint.
///
/// Follows `nextPageToken` until the limit is reached or the API stops
/// returning one. Each page requests at most `page_size` items.
pub async fn fetch_paged(
    client: &reqwest::Client,
    config: &YouTubeConfig,
    endpoint: &str,
    base_params: &[(&str, &str)],
    limit: usize,
    page_size: usize,
) -> Result<Vec<serde_json::Value>, Error> {
    let mut items: Vec<serde_json::Value> = Vec::new();
    let mut page_token: Option<String> = None;

    while items.len() < limit {
        let batch = (limit - items.len()).min(page_size).to_string();

        let mut params: Vec<(&str, &str)> = base_params.to_vec();
        params.push(("maxResults", batch.as_str()));
        if let Some(token) = &page_token {
            params.push(("pageToken", token.as_str()));
        }

        let page = api_get(client, config, endpoint, &params).await?;

        if let Some(page_items) = page.get("items").and_then(|v| v.as_array()) {
            items.extend(page_items.iter().cloned());
        }

        page_token = page
            .get("nextPageToken")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string());
        if page_token.is_none() {
            break;
        }
    }

    items.truncate(limit);
    Ok(items)
}

/// Resolve a channel URL to a channel ID.
///
/// `/channel/UCxxxx` URLs resolve locally; `@handle` URLs cost one API call.
pub async fn resolve_channel_id(
    client: &reqwest::Client,
    config: &YouTubeConfig,
    channel_url: &str,
) -> Result<String, Error> {
    match ytmcp_core::channel::parse_channel_url(channel_url)
        .map_err(Error::InvalidInput)?
    {
        ChannelPath::Id(id) => Ok(id),
        ChannelPath::Handle(handle) => {
            let body = api_get(
                client,
                config,
                "channels",
                &[("part", "id"), ("forHandle", &handle), ("maxResults", "1")],
            )
            .await?;

            body.get("items")
                .and_then(|v| v.as_array())
                .and_then(|items| items.first())
                .and_then(|item| item.get("id"))
                .and_then(|v| v.as_str())
                .map(|s| s.to_string())
                .ok_or_else(|| Error::NotFound(format!("No channel found for handle: @{handle}")))
        }
    }
}

/// Look up the uploads playlist ID for a channel.
pub async fn uploads_playlist_id(
    client: &reqwest::Client,
    config: &YouTubeConfig,
    channel_id: &str,
) -> Result<String, Error> {
    let body = api_get(
        client,
        config,
        "channels",
        &[("part", "contentDetails"), ("id", channel_id)],
    )
    .await?;

    let item = body
        .get("items")
        .and_then(|v| v.as_array())
        .and_then(|items| items.first())
        .ok_or_else(|| Error::NotFound(format!("Channel not found: {channel_id}")))?;

    item.get("contentDetails")
        .and_then(|v| v.get("relatedPlaylists"))
        .and_then(|v| v.get("uploads"))
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .ok_or_else(|| Error::NotFound(format!("No uploads playlist for channel: {channel_id}")))
}

/// Fetch a channel's most recent uploads as normalized video records.
///
/// Walks the uploads playlist for video IDs, then hydrates them in batches of
/// 50 through `videos.list`. Upload order is preserved.
pub async fn fetch_channel_videos(
    client: &reqwest::Client,
    config: &YouTubeConfig,
    channel_url: &str,
    limit: usize,
) -> Result<Vec<VideoRecord>, Error> {
    let channel_id = resolve_channel_id(client, config, channel_url).await?;
    let playlist_id = uploads_playlist_id(client, config, &channel_id).await?;

    let playlist_items = fetch_paged(
        client,
        config,
        "playlistItems",
        &[("part", "contentDetails"), ("playlistId", &playlist_id)],
        limit,
        50,
    )
    .await?;

    let video_ids: Vec<String> = playlist_items
        .iter()
        .filter_map(|item| {
            item.get("contentDetails")
                .and_then(|v| v.get("videoId"))
                .and_then(|v| v.as_str())
                .map(|s| s.to_string())
        })
        .collect();

    if video_ids.is_empty() {
        return Ok(Vec::new());
    }

    let mut videos: Vec<VideoRecord> = Vec::with_capacity(video_ids.len());
    for chunk in video_ids.chunks(50) {
        let ids = chunk.join(",");
        let body = api_get(
            client,
            config,
            "videos",
            &[("part", "snippet,contentDetails,statistics"), ("id", &ids)],
        )
        .await?;

        let response: VideoListResponse = serde_json::from_value(body)
            .map_err(|e| Error::Upstream(format!("Failed to parse video list: {e}")))?;
        videos.extend(response.items.iter().map(ytmcp_core::video::normalize_video));
    }

    Ok(videos)
}

/// Fetch full video items for a batch of IDs, in one `videos.list` call.
pub async fn fetch_videos_by_ids(
    client: &reqwest::Client,
    config: &YouTubeConfig,
    video_ids: &[String],
) -> Result<Vec<VideoItem>, Error> {
    let ids = video_ids.join(",");
    let body = api_get(
        client,
        config,
        "videos",
        &[("part", "snippet,contentDetails,statistics"), ("id", &ids)],
    )
    .await?;

    let response: VideoListResponse = serde_json::from_value(body)
        .map_err(|e| Error::Upstream(format!("Failed to parse video list: {e}")))?;
    Ok(response.items)
}
