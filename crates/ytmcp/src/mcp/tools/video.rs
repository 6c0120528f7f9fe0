use crate::prelude::{eprintln, *};
use serde::Deserialize;

use super::{parse_arguments, tool_response, JsonRpcError, ToolId};

#[derive(Deserialize)]
struct VideoArgs {
    video_id: String,
}

pub async fn handle_video_details(
    tool: ToolId,
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    let args: VideoArgs = parse_arguments(arguments)?;

    if global.verbose {
        eprintln!("Calling {}: video_id={}", tool.name(), args.video_id);
    }

    tool_response(tool, crate::yt::video::details_data(&args.video_id).await)
}

pub async fn handle_video_comments(
    tool: ToolId,
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct VideoCommentsArgs {
        video_id: String,
        limit: Option<usize>,
    }

    let args: VideoCommentsArgs = parse_arguments(arguments)?;
    let limit = args.limit.unwrap_or(100);

    if global.verbose {
        eprintln!(
            "Calling {}: video_id={}, limit={limit}",
            tool.name(),
            args.video_id
        );
    }

    tool_response(
        tool,
        crate::yt::video::comments_data(&args.video_id, limit).await,
    )
}

pub async fn handle_video_transcript(
    tool: ToolId,
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    let args: VideoArgs = parse_arguments(arguments)?;

    if global.verbose {
        eprintln!("Calling {}: video_id={}", tool.name(), args.video_id);
    }

    tool_response(
        tool,
        crate::yt::transcript::transcript_data(&args.video_id).await,
    )
}

pub async fn handle_analyze_thumbnail(
    tool: ToolId,
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    let args: VideoArgs = parse_arguments(arguments)?;

    if global.verbose {
        eprintln!("Calling {}: video_id={}", tool.name(), args.video_id);
    }

    tool_response(tool, crate::yt::video::thumbnail_data(&args.video_id).await)
}

pub async fn handle_compare_videos(
    tool: ToolId,
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct CompareVideosArgs {
        video_ids: Vec<String>,
    }

    let args: CompareVideosArgs = parse_arguments(arguments)?;

    if global.verbose {
        eprintln!("Calling {}: video_ids={:?}", tool.name(), args.video_ids);
    }

    tool_response(
        tool,
        crate::yt::video::compare_videos_data(&args.video_ids).await,
    )
}

pub async fn handle_video_seo_score(
    tool: ToolId,
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    let args: VideoArgs = parse_arguments(arguments)?;

    if global.verbose {
        eprintln!("Calling {}: video_id={}", tool.name(), args.video_id);
    }

    tool_response(tool, crate::yt::video::seo_data(&args.video_id).await)
}

pub async fn handle_comment_keywords(
    tool: ToolId,
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct CommentKeywordsArgs {
        video_id: String,
        limit: Option<usize>,
        top_n: Option<usize>,
    }

    let args: CommentKeywordsArgs = parse_arguments(arguments)?;
    let limit = args.limit.unwrap_or(200);
    let top_n = args.top_n.unwrap_or(30);

    if global.verbose {
        eprintln!(
            "Calling {}: video_id={}, limit={limit}, top_n={top_n}",
            tool.name(),
            args.video_id
        );
    }

    tool_response(
        tool,
        crate::yt::video::keywords_data(&args.video_id, limit, top_n).await,
    )
}
