use crate::prelude::{println, *};

use ytmcp_core::video::{transform_trending, TrendingVideo, VideoListResponse};

use super::{api_get, create_client, YouTubeConfig};

#[derive(Debug, clap::Parser)]
#[command(name = "trending")]
#[command(about = "Trending chart listings by region and category")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// List the trending chart for a region
    #[clap(name = "list")]
    List(ListOptions),
}

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct ListOptions {
    /// ISO 3166-1 alpha-2 region code
    #[arg(short, long, env = "YT_REGION", default_value = "US")]
    region_code: String,

    /// Video category ID; "0" means all categories
    #[arg(short, long, default_value = "0")]
    category_id: String,

    /// Maximum number of videos to return (max 50)
    #[arg(short, long, default_value = "25")]
    limit: usize,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Fetches the trending chart for a region, optionally filtered by category
pub async fn trending_data(
    region_code: &str,
    category_id: &str,
    limit: usize,
) -> Result<Vec<TrendingVideo>, Error> {
    let config = YouTubeConfig::from_env()?;
    let client = create_client()?;

    let region = region_code.to_uppercase();
    let max_results = limit.min(50).to_string();

    let mut params: Vec<(&str, &str)> = vec![
        ("part", "snippet,contentDetails,statistics"),
        ("chart", "mostPopular"),
        ("regionCode", &region),
        ("maxResults", &max_results),
    ];
    if category_id != "0" {
        params.push(("videoCategoryId", category_id));
    }

    let body = api_get(&client, &config, "videos", &params).await?;
    let response: VideoListResponse = serde_json::from_value(body)
        .map_err(|e| Error::Upstream(format!("Failed to parse video list: {e}")))?;

    Ok(transform_trending(&response.items))
}

/// Module entry point
pub async fn run(app: App, global: crate::Global) -> Result<()> {
    if global.verbose {
        println!("Running trending module...");
    }

    match app.command {
        Commands::List(options) => {
            let videos =
                trending_data(&options.region_code, &options.category_id, options.limit).await?;
            if options.json {
                println!("{}", serde_json::to_string_pretty(&videos)?);
            } else {
                let mut table = new_table();
                table.add_row(prettytable::row!["ID", "Title", "Channel", "Views", "Likes"]);
                for video in &videos {
                    table.add_row(prettytable::row![
                        video.video_id,
                        video.title,
                        video.channel_title,
                        video.views,
                        video.likes
                    ]);
                }
                table.printstd();
            }
        }
    }

    Ok(())
}
