use crate::prelude::{eprintln, *};
use serde::Deserialize;

use super::{parse_arguments, tool_response, JsonRpcError, ToolId};

#[derive(Deserialize)]
struct ChannelArgs {
    channel_url: String,
}

#[derive(Deserialize)]
struct ChannelScanArgs {
    channel_url: String,
    limit: Option<usize>,
}

pub async fn handle_channel_overview(
    tool: ToolId,
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    let args: ChannelArgs = parse_arguments(arguments)?;

    if global.verbose {
        eprintln!("Calling {}: channel_url={}", tool.name(), args.channel_url);
    }

    tool_response(tool, crate::yt::channel::overview_data(&args.channel_url).await)
}

pub async fn handle_channel_videos(
    tool: ToolId,
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    let args: ChannelScanArgs = parse_arguments(arguments)?;
    let limit = args.limit.unwrap_or(50);

    if global.verbose {
        eprintln!(
            "Calling {}: channel_url={}, limit={limit}",
            tool.name(),
            args.channel_url
        );
    }

    tool_response(
        tool,
        crate::yt::channel::videos_data(&args.channel_url, limit).await,
    )
}

pub async fn handle_channel_topics(
    tool: ToolId,
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    let args: ChannelArgs = parse_arguments(arguments)?;

    if global.verbose {
        eprintln!("Calling {}: channel_url={}", tool.name(), args.channel_url);
    }

    tool_response(tool, crate::yt::channel::topics_data(&args.channel_url).await)
}

pub async fn handle_compare_channels(
    tool: ToolId,
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct CompareChannelsArgs {
        channel_urls: Vec<String>,
    }

    let args: CompareChannelsArgs = parse_arguments(arguments)?;

    if global.verbose {
        eprintln!(
            "Calling {}: channel_urls={:?}",
            tool.name(),
            args.channel_urls
        );
    }

    tool_response(
        tool,
        crate::yt::channel::compare_channels_data(&args.channel_urls).await,
    )
}

pub async fn handle_top_videos(
    tool: ToolId,
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct TopVideosArgs {
        channel_url: String,
        metric: Option<String>,
        limit: Option<usize>,
    }

    let args: TopVideosArgs = parse_arguments(arguments)?;
    let metric = args.metric.unwrap_or_else(|| "views".to_string());
    let limit = args.limit.unwrap_or(10);

    if global.verbose {
        eprintln!(
            "Calling {}: channel_url={}, metric={metric}, limit={limit}",
            tool.name(),
            args.channel_url
        );
    }

    tool_response(
        tool,
        crate::yt::channel::top_videos_data(&args.channel_url, &metric, limit).await,
    )
}

pub async fn handle_upload_schedule(
    tool: ToolId,
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    let args: ChannelScanArgs = parse_arguments(arguments)?;
    let limit = args.limit.unwrap_or(50);

    if global.verbose {
        eprintln!(
            "Calling {}: channel_url={}, limit={limit}",
            tool.name(),
            args.channel_url
        );
    }

    tool_response(
        tool,
        crate::yt::channel::schedule_data(&args.channel_url, limit).await,
    )
}

pub async fn handle_tag_analysis(
    tool: ToolId,
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    let args: ChannelScanArgs = parse_arguments(arguments)?;
    let limit = args.limit.unwrap_or(50);

    if global.verbose {
        eprintln!(
            "Calling {}: channel_url={}, limit={limit}",
            tool.name(),
            args.channel_url
        );
    }

    tool_response(
        tool,
        crate::yt::channel::tags_data(&args.channel_url, limit).await,
    )
}

pub async fn handle_engagement_stats(
    tool: ToolId,
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    let args: ChannelScanArgs = parse_arguments(arguments)?;
    let limit = args.limit.unwrap_or(50);

    if global.verbose {
        eprintln!(
            "Calling {}: channel_url={}, limit={limit}",
            tool.name(),
            args.channel_url
        );
    }

    tool_response(
        tool,
        crate::yt::channel::engagement_data(&args.channel_url, limit).await,
    )
}
