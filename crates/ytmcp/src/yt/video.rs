use crate::prelude::{println, *};
use serde::{Deserialize, Serialize};

use ytmcp_core::analytics::VideoComparison;
use ytmcp_core::comments::{CommentRecord, CommentThread};
use ytmcp_core::keywords::KeywordCount;
use ytmcp_core::seo::SeoReport;
use ytmcp_core::video::{best_thumbnail, normalize_video, VideoRecord};

use super::{api_get, create_client, fetch_paged, fetch_videos_by_ids, YouTubeConfig};

/// Video module app - root command
#[derive(Debug, clap::Parser)]
#[command(name = "video")]
#[command(about = "Video-level analytics for public YouTube videos")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Show a video's full metadata and statistics
    #[clap(name = "details")]
    Details(VideoOptions),

    /// Fetch a video's comments, most relevant first
    #[clap(name = "comments")]
    Comments(CommentsOptions),

    /// Fetch a video's transcript as plain text
    #[clap(name = "transcript")]
    Transcript(VideoOptions),

    /// Inspect a video's best thumbnail
    #[clap(name = "thumbnail")]
    Thumbnail(VideoOptions),

    /// Score a video's metadata against SEO practices
    #[clap(name = "seo")]
    Seo(VideoOptions),

    /// Extract frequent keywords from a video's comments
    #[clap(name = "keywords")]
    Keywords(KeywordsOptions),

    /// Compare up to 10 videos side by side
    #[clap(name = "compare")]
    Compare(CompareOptions),
}

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct VideoOptions {
    /// Video ID (e.g., "dQw4w9WgXcQ")
    #[clap(env = "YT_VIDEO_ID")]
    video_id: String,
}

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct CommentsOptions {
    /// Video ID
    #[clap(env = "YT_VIDEO_ID")]
    video_id: String,

    /// Maximum number of comments to return (max 500)
    #[arg(short, long, default_value = "100")]
    limit: usize,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct KeywordsOptions {
    /// Video ID
    #[clap(env = "YT_VIDEO_ID")]
    video_id: String,

    /// Number of comments to analyze
    #[arg(short, long, default_value = "200")]
    limit: usize,

    /// Number of keywords to return
    #[arg(short, long, default_value = "30")]
    top_n: usize,
}

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct CompareOptions {
    /// Video IDs (2 to 10)
    #[clap(required = true)]
    video_ids: Vec<String>,
}

/// A video's comments plus the channel-reported total
#[derive(Debug, Serialize)]
pub struct CommentsOutput {
    pub video_id: String,
    pub total_comment_count: u64,
    pub returned_comment_count: usize,
    pub comments: Vec<CommentRecord>,
}

/// Keyword frequencies extracted from a video's comments
#[derive(Debug, Serialize)]
pub struct CommentKeywords {
    pub video_id: String,
    pub comments_analyzed: usize,
    pub top_keywords: Vec<KeywordCount>,
}

/// Best available thumbnail of a video, with measured dimensions
#[derive(Debug, Serialize)]
pub struct ThumbnailInfo {
    pub video_id: String,
    pub thumbnail_url: String,
    pub resolution: String,
    pub file_size_bytes: u64,
}

/// Fetches a single video's metadata and statistics
pub async fn details_data(video_id: &str) -> Result<VideoRecord, Error> {
    let config = YouTubeConfig::from_env()?;
    let client = create_client()?;

    let items = fetch_videos_by_ids(&client, &config, &[video_id.to_string()]).await?;
    let item = items
        .first()
        .ok_or_else(|| Error::NotFound(format!("No video found for ID: {video_id}")))?;

    Ok(normalize_video(item))
}

/// Fetches a video's comments ordered by relevance
pub async fn comments_data(video_id: &str, limit: usize) -> Result<CommentsOutput, Error> {
    let config = YouTubeConfig::from_env()?;
    let client = create_client()?;

    // The channel-reported total, which can exceed what the API will page out
    let stats = api_get(
        &client,
        &config,
        "videos",
        &[("part", "statistics"), ("id", video_id)],
    )
    .await?;
    let total_comment_count = stats
        .get("items")
        .and_then(|v| v.as_array())
        .and_then(|items| items.first())
        .and_then(|item| item.get("statistics"))
        .and_then(|s| s.get("commentCount"))
        .and_then(|c| c.as_str())
        .and_then(|c| c.parse().ok())
        .unwrap_or(0);

    let threads = fetch_paged(
        &client,
        &config,
        "commentThreads",
        &[
            ("part", "snippet"),
            ("videoId", video_id),
            ("order", "relevance"),
        ],
        limit.min(500),
        100,
    )
    .await?;

    let comments: Vec<CommentRecord> = threads
        .iter()
        .filter_map(|raw| serde_json::from_value::<CommentThread>(raw.clone()).ok())
        .map(|thread| ytmcp_core::comments::normalize_comment(&thread))
        .collect();

    Ok(CommentsOutput {
        video_id: video_id.to_string(),
        total_comment_count,
        returned_comment_count: comments.len(),
        comments,
    })
}

/// Scores a video's metadata against SEO practices
pub async fn seo_data(video_id: &str) -> Result<SeoReport, Error> {
    let video = details_data(video_id).await?;

    Ok(ytmcp_core::seo::score_video(
        &video.video_id,
        &video.title,
        &video.description,
        video.tags.len(),
        !video.thumbnail_url.is_empty(),
    ))
}

/// Extracts the dominant keywords from a video's comments
pub async fn keywords_data(
    video_id: &str,
    limit: usize,
    top_n: usize,
) -> Result<CommentKeywords, Error> {
    let comments = comments_data(video_id, limit).await?;

    let text = comments
        .comments
        .iter()
        .map(|c| c.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    Ok(CommentKeywords {
        video_id: video_id.to_string(),
        comments_analyzed: comments.returned_comment_count,
        top_keywords: ytmcp_core::keywords::extract_keywords(&text, top_n),
    })
}

/// Compares several videos side by side, declaring per-metric winners
pub async fn compare_videos_data(video_ids: &[String]) -> Result<VideoComparison, Error> {
    if video_ids.is_empty() {
        return Err(Error::InvalidInput(
            "video_ids must not be empty.".to_string(),
        ));
    }

    let config = YouTubeConfig::from_env()?;
    let client = create_client()?;

    let capped: Vec<String> = video_ids.iter().take(10).cloned().collect();
    let items = fetch_videos_by_ids(&client, &config, &capped).await?;
    let videos: Vec<VideoRecord> = items.iter().map(normalize_video).collect();

    Ok(ytmcp_core::analytics::compare_videos(&videos))
}

/// Inspects a video's best thumbnail: URL, measured resolution, and size
pub async fn thumbnail_data(video_id: &str) -> Result<ThumbnailInfo, Error> {
    let config = YouTubeConfig::from_env()?;
    let client = create_client()?;

    let body = api_get(
        &client,
        &config,
        "videos",
        &[("part", "snippet"), ("id", video_id)],
    )
    .await?;

    let response: ytmcp_core::video::VideoListResponse = serde_json::from_value(body)
        .map_err(|e| Error::Upstream(format!("Failed to parse video list: {e}")))?;
    let item = response
        .items
        .first()
        .ok_or_else(|| Error::NotFound(format!("No video found for ID: {video_id}")))?;

    let thumbnail_url = item
        .snippet
        .as_ref()
        .and_then(|s| s.thumbnails.as_ref())
        .map(best_thumbnail)
        .unwrap_or_default();
    if thumbnail_url.is_empty() {
        return Err(Error::NotFound(format!(
            "No thumbnail URL found for video: {video_id}"
        )));
    }

    // Content-Length from a HEAD probe; some CDN nodes omit it
    let head_size = client
        .head(&thumbnail_url)
        .send()
        .await
        .ok()
        .and_then(|r| r.content_length())
        .unwrap_or(0);

    let bytes = client
        .get(&thumbnail_url)
        .send()
        .await
        .map_err(|e| Error::Upstream(format!("Failed to fetch thumbnail: {e}")))?
        .bytes()
        .await
        .map_err(|e| Error::Upstream(format!("Failed to read thumbnail bytes: {e}")))?;

    use image::GenericImageView;
    let resolution = match image::load_from_memory(&bytes) {
        Ok(img) => {
            let (width, height) = img.dimensions();
            format!("{width}x{height}")
        }
        Err(_) => "unknown".to_string(),
    };

    let file_size_bytes = if head_size > 0 {
        head_size
    } else {
        bytes.len() as u64
    };

    Ok(ThumbnailInfo {
        video_id: video_id.to_string(),
        thumbnail_url,
        resolution,
        file_size_bytes,
    })
}

/// Module entry point
pub async fn run(app: App, global: crate::Global) -> Result<()> {
    if global.verbose {
        println!("Running video module...");
    }

    match app.command {
        Commands::Details(options) => {
            let video = details_data(&options.video_id).await?;
            println!("{}", serde_json::to_string_pretty(&video)?);
        }
        Commands::Comments(options) => {
            let output = comments_data(&options.video_id, options.limit).await?;
            if options.json {
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                let mut table = new_table();
                table.add_row(prettytable::row!["Author", "Likes", "Published", "Comment"]);
                for comment in &output.comments {
                    table.add_row(prettytable::row![
                        comment.author,
                        comment.like_count,
                        comment.published_at,
                        comment.text
                    ]);
                }
                table.printstd();
                println!(
                    "\nShowing {} of {} comments",
                    output.returned_comment_count, output.total_comment_count
                );
            }
        }
        Commands::Transcript(options) => {
            let transcript = super::transcript::transcript_data(&options.video_id).await?;
            println!("{}", serde_json::to_string_pretty(&transcript)?);
        }
        Commands::Thumbnail(options) => {
            let info = thumbnail_data(&options.video_id).await?;
            println!("{}", serde_json::to_string_pretty(&info)?);
        }
        Commands::Seo(options) => {
            let report = seo_data(&options.video_id).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Keywords(options) => {
            let keywords =
                keywords_data(&options.video_id, options.limit, options.top_n).await?;
            println!("{}", serde_json::to_string_pretty(&keywords)?);
        }
        Commands::Compare(options) => {
            let comparison = compare_videos_data(&options.video_ids).await?;
            println!("{}", serde_json::to_string_pretty(&comparison)?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_compare_videos_rejects_empty_input() {
        let err = compare_videos_data(&[]).await.unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert!(err.to_string().contains("video_ids"));
    }
}
