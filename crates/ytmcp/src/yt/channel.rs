use crate::prelude::{println, *};
use std::str::FromStr;

use ytmcp_core::analytics::{
    ChannelComparison, EngagementStats, Metric, RankedVideo, TagAnalysis,
};
use ytmcp_core::channel::{ChannelListResponse, ChannelOverview, ChannelTopics};
use ytmcp_core::schedule::UploadSchedule;
use ytmcp_core::video::ChannelVideo;

use super::{api_get, create_client, fetch_channel_videos, resolve_channel_id, YouTubeConfig};

/// Channel module app - root command
#[derive(Debug, clap::Parser)]
#[command(name = "channel")]
#[command(about = "Channel-level analytics for public YouTube channels")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Show a channel's public overview
    #[clap(name = "overview")]
    Overview(ChannelOptions),

    /// List a channel's most recent uploads
    #[clap(name = "videos")]
    Videos(VideosOptions),

    /// Show a channel's topic categories
    #[clap(name = "topics")]
    Topics(ChannelOptions),

    /// Rank a channel's videos by a metric
    #[clap(name = "top")]
    Top(TopOptions),

    /// Analyze a channel's upload schedule
    #[clap(name = "schedule")]
    Schedule(ScanOptions),

    /// Analyze a channel's tag usage
    #[clap(name = "tags")]
    Tags(ScanOptions),

    /// Show engagement statistics across recent uploads
    #[clap(name = "engagement")]
    Engagement(ScanOptions),

    /// Compare up to 5 channels side by side
    #[clap(name = "compare")]
    Compare(CompareOptions),
}

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct ChannelOptions {
    /// Channel URL (e.g., "https://www.youtube.com/@handle" or ".../channel/UCxxxx")
    #[clap(env = "YT_CHANNEL_URL")]
    channel_url: String,
}

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct VideosOptions {
    /// Channel URL
    #[clap(env = "YT_CHANNEL_URL")]
    channel_url: String,

    /// Maximum number of videos to return (max 200)
    #[arg(short, long, default_value = "50")]
    limit: usize,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct TopOptions {
    /// Channel URL
    #[clap(env = "YT_CHANNEL_URL")]
    channel_url: String,

    /// Ranking metric: views, likes, comments, or engagement_rate
    #[arg(short, long, default_value = "views")]
    metric: String,

    /// Number of ranked videos to return
    #[arg(short, long, default_value = "10")]
    limit: usize,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct ScanOptions {
    /// Channel URL
    #[clap(env = "YT_CHANNEL_URL")]
    channel_url: String,

    /// Number of recent uploads to analyze
    #[arg(short, long, default_value = "50")]
    limit: usize,
}

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct CompareOptions {
    /// Channel URLs (2 to 5)
    #[clap(required = true)]
    channel_urls: Vec<String>,
}

/// Fetches a channel's snippet and statistics as a structured overview
pub async fn overview_data(channel_url: &str) -> Result<ChannelOverview, Error> {
    let config = YouTubeConfig::from_env()?;
    let client = create_client()?;

    let channel_id = resolve_channel_id(&client, &config, channel_url).await?;
    let body = api_get(
        &client,
        &config,
        "channels",
        &[("part", "snippet,statistics"), ("id", &channel_id)],
    )
    .await?;

    let response: ChannelListResponse = serde_json::from_value(body)
        .map_err(|e| Error::Upstream(format!("Failed to parse channel list: {e}")))?;
    let item = response
        .items
        .first()
        .ok_or_else(|| Error::NotFound(format!("No data returned for channel: {channel_id}")))?;

    Ok(ytmcp_core::channel::build_overview(&channel_id, item))
}

/// Fetches a channel's recent uploads, without per-video tags
pub async fn videos_data(channel_url: &str, limit: usize) -> Result<Vec<ChannelVideo>, Error> {
    let config = YouTubeConfig::from_env()?;
    let client = create_client()?;

    let videos = fetch_channel_videos(&client, &config, channel_url, limit.min(200)).await?;
    Ok(ytmcp_core::video::strip_tags(&videos))
}

/// Fetches a channel's topic categories
pub async fn topics_data(channel_url: &str) -> Result<ChannelTopics, Error> {
    let config = YouTubeConfig::from_env()?;
    let client = create_client()?;

    let channel_id = resolve_channel_id(&client, &config, channel_url).await?;
    let body = api_get(
        &client,
        &config,
        "channels",
        &[("part", "snippet,topicDetails"), ("id", &channel_id)],
    )
    .await?;

    let response: ChannelListResponse = serde_json::from_value(body)
        .map_err(|e| Error::Upstream(format!("Failed to parse channel list: {e}")))?;
    let item = response
        .items
        .first()
        .ok_or_else(|| Error::NotFound(format!("No data returned for channel: {channel_id}")))?;

    Ok(ytmcp_core::channel::build_topics(&channel_id, item))
}

/// Scan window for ranking: recent uploads beyond this are never considered
const TOP_VIDEOS_SCAN: usize = 200;

/// Ranks a channel's recent uploads by the requested metric
pub async fn top_videos_data(
    channel_url: &str,
    metric: &str,
    limit: usize,
) -> Result<Vec<RankedVideo>, Error> {
    let metric = Metric::from_str(metric).map_err(Error::InvalidInput)?;

    let config = YouTubeConfig::from_env()?;
    let client = create_client()?;

    let videos = fetch_channel_videos(&client, &config, channel_url, TOP_VIDEOS_SCAN).await?;
    if videos.is_empty() {
        return Err(Error::InvalidInput(
            "No videos found for this channel.".to_string(),
        ));
    }

    Ok(ytmcp_core::analytics::rank_top_videos(&videos, metric, limit))
}

/// Analyzes upload cadence over a channel's recent uploads
pub async fn schedule_data(channel_url: &str, limit: usize) -> Result<UploadSchedule, Error> {
    let config = YouTubeConfig::from_env()?;
    let client = create_client()?;

    let videos = fetch_channel_videos(&client, &config, channel_url, limit).await?;
    ytmcp_core::schedule::analyze_schedule(&videos)
        .ok_or_else(|| Error::InvalidInput("No videos found for this channel.".to_string()))
}

/// Analyzes tag usage over a channel's recent uploads
pub async fn tags_data(channel_url: &str, limit: usize) -> Result<TagAnalysis, Error> {
    let config = YouTubeConfig::from_env()?;
    let client = create_client()?;

    let videos = fetch_channel_videos(&client, &config, channel_url, limit).await?;
    ytmcp_core::analytics::tag_analysis(&videos)
        .ok_or_else(|| Error::InvalidInput("No videos found for this channel.".to_string()))
}

/// Computes engagement statistics over a channel's recent uploads
pub async fn engagement_data(channel_url: &str, limit: usize) -> Result<EngagementStats, Error> {
    let config = YouTubeConfig::from_env()?;
    let client = create_client()?;

    let videos = fetch_channel_videos(&client, &config, channel_url, limit).await?;
    ytmcp_core::analytics::engagement_stats(&videos)
        .ok_or_else(|| Error::InvalidInput("No videos found for this channel.".to_string()))
}

/// Fetches overviews for several channels and declares per-metric winners
pub async fn compare_channels_data(
    channel_urls: &[String],
) -> Result<ChannelComparison, Error> {
    if channel_urls.is_empty() {
        return Err(Error::InvalidInput(
            "channel_urls must not be empty.".to_string(),
        ));
    }

    let mut overviews: Vec<ChannelOverview> = Vec::new();
    for url in channel_urls.iter().take(5) {
        overviews.push(overview_data(url).await?);
    }

    Ok(ytmcp_core::analytics::compare_channels(overviews))
}

/// Module entry point
pub async fn run(app: App, global: crate::Global) -> Result<()> {
    if global.verbose {
        println!("Running channel module...");
    }

    match app.command {
        Commands::Overview(options) => {
            let overview = overview_data(&options.channel_url).await?;
            println!("{}", serde_json::to_string_pretty(&overview)?);
        }
        Commands::Videos(options) => {
            let videos = videos_data(&options.channel_url, options.limit).await?;
            if options.json {
                println!("{}", serde_json::to_string_pretty(&videos)?);
            } else {
                let mut table = new_table();
                table.add_row(prettytable::row!["ID", "Title", "Published", "Views", "Likes"]);
                for video in &videos {
                    table.add_row(prettytable::row![
                        video.video_id,
                        video.title,
                        video.published_at,
                        video.views,
                        video.likes
                    ]);
                }
                table.printstd();
            }
        }
        Commands::Topics(options) => {
            let topics = topics_data(&options.channel_url).await?;
            println!("{}", serde_json::to_string_pretty(&topics)?);
        }
        Commands::Top(options) => {
            let ranked =
                top_videos_data(&options.channel_url, &options.metric, options.limit).await?;
            if options.json {
                println!("{}", serde_json::to_string_pretty(&ranked)?);
            } else {
                let mut table = new_table();
                table.add_row(prettytable::row![
                    "Rank",
                    "ID",
                    "Title",
                    "Views",
                    "Likes",
                    "Engagement %"
                ]);
                for video in &ranked {
                    table.add_row(prettytable::row![
                        video.rank,
                        video.video_id,
                        video.title,
                        video.views,
                        video.likes,
                        video.engagement_rate_pct
                    ]);
                }
                table.printstd();
            }
        }
        Commands::Schedule(options) => {
            let schedule = schedule_data(&options.channel_url, options.limit).await?;
            println!("{}", serde_json::to_string_pretty(&schedule)?);
        }
        Commands::Tags(options) => {
            let tags = tags_data(&options.channel_url, options.limit).await?;
            println!("{}", serde_json::to_string_pretty(&tags)?);
        }
        Commands::Engagement(options) => {
            let stats = engagement_data(&options.channel_url, options.limit).await?;
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        Commands::Compare(options) => {
            let comparison = compare_channels_data(&options.channel_urls).await?;
            println!("{}", serde_json::to_string_pretty(&comparison)?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_compare_channels_rejects_empty_input() {
        let err = compare_channels_data(&[]).await.unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert!(err.to_string().contains("channel_urls"));
    }
}
