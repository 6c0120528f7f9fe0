use regex::Regex;
use serde::{Deserialize, Serialize};

/// One thumbnail variant from the API
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Thumbnail {
    pub url: String,
}

/// Thumbnail set keyed by resolution tier
#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct Thumbnails {
    pub maxres: Option<Thumbnail>,
    pub standard: Option<Thumbnail>,
    pub high: Option<Thumbnail>,
    pub medium: Option<Thumbnail>,
    pub default: Option<Thumbnail>,
}

/// `snippet` part of a video resource
#[derive(Debug, Default, Deserialize, Clone)]
pub struct VideoSnippet {
    pub title: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
    #[serde(rename = "publishedAt")]
    pub published_at: Option<String>,
    #[serde(rename = "channelTitle")]
    pub channel_title: Option<String>,
    pub thumbnails: Option<Thumbnails>,
}

/// `contentDetails` part of a video resource
#[derive(Debug, Default, Deserialize, Clone)]
pub struct VideoContentDetails {
    pub duration: Option<String>,
}

/// `statistics` part of a video resource
///
/// The API returns every count as a JSON string.
#[derive(Debug, Default, Deserialize, Clone)]
pub struct VideoStatistics {
    #[serde(rename = "viewCount")]
    pub view_count: Option<String>,
    #[serde(rename = "likeCount")]
    pub like_count: Option<String>,
    #[serde(rename = "commentCount")]
    pub comment_count: Option<String>,
}

/// One item of a `videos.list` response
#[derive(Debug, Deserialize, Clone)]
pub struct VideoItem {
    pub id: String,
    pub snippet: Option<VideoSnippet>,
    #[serde(rename = "contentDetails")]
    pub content_details: Option<VideoContentDetails>,
    pub statistics: Option<VideoStatistics>,
}

/// `videos.list` and `channels.list` style response envelope
#[derive(Debug, Default, Deserialize)]
pub struct VideoListResponse {
    #[serde(default)]
    pub items: Vec<VideoItem>,
}

/// Canonical video record used by every analytic
#[derive(Debug, Serialize, Clone)]
pub struct VideoRecord {
    pub video_id: String,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub published_at: String,
    pub duration_seconds: u64,
    pub views: u64,
    pub likes: u64,
    pub comments: u64,
    pub thumbnail_url: String,
}

/// Trending chart entry (carries the channel title instead of tags)
#[derive(Debug, Serialize, Clone)]
pub struct TrendingVideo {
    pub video_id: String,
    pub title: String,
    pub channel_title: String,
    pub published_at: String,
    pub duration_seconds: u64,
    pub views: u64,
    pub likes: u64,
    pub comments: u64,
    pub thumbnail_url: String,
}

/// Channel listing entry: a [`VideoRecord`] with the tag field stripped
#[derive(Debug, Serialize, Clone)]
pub struct ChannelVideo {
    pub video_id: String,
    pub title: String,
    pub description: String,
    pub published_at: String,
    pub duration_seconds: u64,
    pub views: u64,
    pub likes: u64,
    pub comments: u64,
    pub thumbnail_url: String,
}

/// Strip the tag field from a channel scan for the plain video listing.
pub fn strip_tags(videos: &[VideoRecord]) -> Vec<ChannelVideo> {
    videos
        .iter()
        .map(|v| ChannelVideo {
            video_id: v.video_id.clone(),
            title: v.title.clone(),
            description: v.description.clone(),
            published_at: v.published_at.clone(),
            duration_seconds: v.duration_seconds,
            views: v.views,
            likes: v.likes,
            comments: v.comments,
            thumbnail_url: v.thumbnail_url.clone(),
        })
        .collect()
}

/// Convert an ISO 8601 duration string (e.g. PT4M13S) to total seconds.
///
/// Missing components count as zero; unparsable or empty input is 0 seconds.
pub fn parse_duration(iso_duration: &str) -> u64 {
    let re = Regex::new(r"^PT(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?").unwrap();
    let Some(caps) = re.captures(iso_duration) else {
        return 0;
    };
    let component = |i: usize| {
        caps.get(i)
            .and_then(|m| m.as_str().parse::<u64>().ok())
            .unwrap_or(0)
    };
    component(1) * 3600 + component(2) * 60 + component(3)
}

/// Coerce a stringly-typed API count to an integer, defaulting to 0.
///
/// A malformed count must never fail the whole record: downstream analytics
/// depend on zero-filling to survive whole-channel scans over one bad item.
pub fn parse_count(value: Option<&String>) -> u64 {
    value.and_then(|v| v.parse().ok()).unwrap_or(0)
}

/// Pick the highest-resolution thumbnail available, or "" when none present.
pub fn best_thumbnail(thumbnails: &Thumbnails) -> String {
    [
        &thumbnails.maxres,
        &thumbnails.standard,
        &thumbnails.high,
        &thumbnails.medium,
        &thumbnails.default,
    ]
    .into_iter()
    .flatten()
    .next()
    .map(|t| t.url.clone())
    .unwrap_or_default()
}

/// Normalize one raw `videos.list` item into a [`VideoRecord`].
pub fn normalize_video(item: &VideoItem) -> VideoRecord {
    let snippet = item.snippet.clone().unwrap_or_default();
    let content = item.content_details.clone().unwrap_or_default();
    let stats = item.statistics.clone().unwrap_or_default();

    VideoRecord {
        video_id: item.id.clone(),
        title: snippet.title.unwrap_or_default(),
        description: snippet.description.unwrap_or_default(),
        tags: snippet.tags.unwrap_or_default(),
        published_at: snippet.published_at.unwrap_or_default(),
        duration_seconds: parse_duration(content.duration.as_deref().unwrap_or("PT0S")),
        views: parse_count(stats.view_count.as_ref()),
        likes: parse_count(stats.like_count.as_ref()),
        comments: parse_count(stats.comment_count.as_ref()),
        thumbnail_url: snippet
            .thumbnails
            .as_ref()
            .map(best_thumbnail)
            .unwrap_or_default(),
    }
}

/// Normalize trending chart items, keeping the channel title.
pub fn transform_trending(items: &[VideoItem]) -> Vec<TrendingVideo> {
    items
        .iter()
        .map(|item| {
            let record = normalize_video(item);
            let channel_title = item
                .snippet
                .as_ref()
                .and_then(|s| s.channel_title.clone())
                .unwrap_or_default();
            TrendingVideo {
                video_id: record.video_id,
                title: record.title,
                channel_title,
                published_at: record.published_at,
                duration_seconds: record.duration_seconds,
                views: record.views,
                likes: record.likes,
                comments: record.comments,
                thumbnail_url: record.thumbnail_url,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thumb(url: &str) -> Option<Thumbnail> {
        Some(Thumbnail {
            url: url.to_string(),
        })
    }

    #[test]
    fn test_parse_duration_full() {
        assert_eq!(parse_duration("PT1H2M3S"), 3723);
    }

    #[test]
    fn test_parse_duration_minutes_seconds() {
        assert_eq!(parse_duration("PT4M13S"), 253);
    }

    #[test]
    fn test_parse_duration_hours_only() {
        assert_eq!(parse_duration("PT2H"), 7200);
    }

    #[test]
    fn test_parse_duration_missing_components() {
        assert_eq!(parse_duration("PT0S"), 0);
        assert_eq!(parse_duration("PT"), 0);
    }

    #[test]
    fn test_parse_duration_unparsable() {
        assert_eq!(parse_duration(""), 0);
        assert_eq!(parse_duration("4m13s"), 0);
        assert_eq!(parse_duration("garbage"), 0);
    }

    #[test]
    fn test_parse_count_valid() {
        assert_eq!(parse_count(Some(&"12345".to_string())), 12345);
    }

    #[test]
    fn test_parse_count_absent_or_malformed() {
        assert_eq!(parse_count(None), 0);
        assert_eq!(parse_count(Some(&"not-a-number".to_string())), 0);
        assert_eq!(parse_count(Some(&"".to_string())), 0);
        assert_eq!(parse_count(Some(&"-5".to_string())), 0);
    }

    #[test]
    fn test_best_thumbnail_prefers_higher_tier() {
        let thumbnails = Thumbnails {
            maxres: thumb("https://img/maxres.jpg"),
            standard: thumb("https://img/standard.jpg"),
            high: thumb("https://img/high.jpg"),
            medium: None,
            default: thumb("https://img/default.jpg"),
        };
        assert_eq!(best_thumbnail(&thumbnails), "https://img/maxres.jpg");

        let thumbnails = Thumbnails {
            maxres: None,
            standard: None,
            high: thumb("https://img/high.jpg"),
            medium: thumb("https://img/medium.jpg"),
            default: thumb("https://img/default.jpg"),
        };
        assert_eq!(best_thumbnail(&thumbnails), "https://img/high.jpg");
    }

    #[test]
    fn test_best_thumbnail_empty() {
        assert_eq!(best_thumbnail(&Thumbnails::default()), "");
    }

    #[test]
    fn test_normalize_video_full() {
        let item = VideoItem {
            id: "abc123".to_string(),
            snippet: Some(VideoSnippet {
                title: Some("Test Video".to_string()),
                description: Some("A description".to_string()),
                tags: Some(vec!["rust".to_string(), "testing".to_string()]),
                published_at: Some("2024-01-15T12:00:00Z".to_string()),
                channel_title: Some("Test Channel".to_string()),
                thumbnails: Some(Thumbnails {
                    maxres: None,
                    standard: None,
                    high: thumb("https://img/high.jpg"),
                    medium: None,
                    default: None,
                }),
            }),
            content_details: Some(VideoContentDetails {
                duration: Some("PT10M30S".to_string()),
            }),
            statistics: Some(VideoStatistics {
                view_count: Some("1000".to_string()),
                like_count: Some("50".to_string()),
                comment_count: Some("10".to_string()),
            }),
        };

        let record = normalize_video(&item);
        assert_eq!(record.video_id, "abc123");
        assert_eq!(record.title, "Test Video");
        assert_eq!(record.tags.len(), 2);
        assert_eq!(record.duration_seconds, 630);
        assert_eq!(record.views, 1000);
        assert_eq!(record.likes, 50);
        assert_eq!(record.comments, 10);
        assert_eq!(record.thumbnail_url, "https://img/high.jpg");
    }

    #[test]
    fn test_normalize_video_all_parts_missing() {
        let item = VideoItem {
            id: "bare".to_string(),
            snippet: None,
            content_details: None,
            statistics: None,
        };

        let record = normalize_video(&item);
        assert_eq!(record.video_id, "bare");
        assert_eq!(record.title, "");
        assert_eq!(record.tags.len(), 0);
        assert_eq!(record.duration_seconds, 0);
        assert_eq!(record.views, 0);
        assert_eq!(record.likes, 0);
        assert_eq!(record.comments, 0);
        assert_eq!(record.thumbnail_url, "");
    }

    #[test]
    fn test_normalize_video_malformed_counts() {
        let item = VideoItem {
            id: "x".to_string(),
            snippet: None,
            content_details: None,
            statistics: Some(VideoStatistics {
                view_count: Some("oops".to_string()),
                like_count: None,
                comment_count: Some("".to_string()),
            }),
        };

        let record = normalize_video(&item);
        assert_eq!(record.views, 0);
        assert_eq!(record.likes, 0);
        assert_eq!(record.comments, 0);
    }

    #[test]
    fn test_transform_trending_channel_title() {
        let item = VideoItem {
            id: "t1".to_string(),
            snippet: Some(VideoSnippet {
                title: Some("Trending".to_string()),
                channel_title: Some("Big Channel".to_string()),
                ..Default::default()
            }),
            content_details: None,
            statistics: None,
        };

        let trending = transform_trending(&[item]);
        assert_eq!(trending.len(), 1);
        assert_eq!(trending[0].video_id, "t1");
        assert_eq!(trending[0].channel_title, "Big Channel");
    }

    #[test]
    fn test_wire_deserialization_camel_case() {
        let json = serde_json::json!({
            "id": "vid1",
            "snippet": {
                "title": "T",
                "publishedAt": "2024-01-01T00:00:00Z",
                "channelTitle": "C",
                "thumbnails": { "default": { "url": "https://img/d.jpg" } }
            },
            "contentDetails": { "duration": "PT1M" },
            "statistics": { "viewCount": "7", "likeCount": "2" }
        });

        let item: VideoItem = serde_json::from_value(json).unwrap();
        let record = normalize_video(&item);
        assert_eq!(record.published_at, "2024-01-01T00:00:00Z");
        assert_eq!(record.duration_seconds, 60);
        assert_eq!(record.views, 7);
        assert_eq!(record.likes, 2);
        assert_eq!(record.comments, 0);
        assert_eq!(record.thumbnail_url, "https://img/d.jpg");
    }
}
