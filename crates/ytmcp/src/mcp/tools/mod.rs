mod channel;
mod trending;
mod video;

use serde::{Deserialize, Serialize};

// Re-export types needed by tool handlers
pub use super::{JsonRpcError, Tool};

// MCP Protocol types for tools
#[derive(Debug, Serialize)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Serialize)]
pub struct ServerCapabilities {
    pub tools: Option<ToolsCapability>,
}

#[derive(Debug, Serialize)]
pub struct ToolsCapability {}

#[derive(Debug, Serialize)]
pub struct InitializeResult {
    #[serde(rename = "protocolVersion")]
    pub protocol_version: String,
    pub capabilities: ServerCapabilities,
    #[serde(rename = "serverInfo")]
    pub server_info: ServerInfo,
}

#[derive(Debug, Serialize)]
pub struct ToolsList {
    pub tools: Vec<Tool>,
}

#[derive(Debug, Deserialize)]
pub struct CallToolParams {
    pub name: String,
    pub arguments: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct CallToolResult {
    pub content: Vec<Content>,
    #[serde(rename = "isError", skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub enum Content {
    #[serde(rename = "text")]
    Text { text: String },
}

/// The closed set of tools this server exposes.
///
/// Dispatch, listing, and naming all go through this enum, so adding a tool
/// without wiring it everywhere is a compile error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolId {
    GetChannelOverview,
    GetChannelVideos,
    GetVideoDetails,
    GetVideoComments,
    GetVideoTranscript,
    AnalyzeThumbnail,
    GetTrendingVideos,
    CompareVideos,
    GetChannelTopics,
    CompareChannels,
    GetTopVideos,
    GetUploadSchedule,
    GetTagAnalysis,
    GetVideoSeoScore,
    GetEngagementStats,
    GetCommentKeywords,
}

impl ToolId {
    pub const ALL: [ToolId; 16] = [
        ToolId::GetChannelOverview,
        ToolId::GetChannelVideos,
        ToolId::GetVideoDetails,
        ToolId::GetVideoComments,
        ToolId::GetVideoTranscript,
        ToolId::AnalyzeThumbnail,
        ToolId::GetTrendingVideos,
        ToolId::CompareVideos,
        ToolId::GetChannelTopics,
        ToolId::CompareChannels,
        ToolId::GetTopVideos,
        ToolId::GetUploadSchedule,
        ToolId::GetTagAnalysis,
        ToolId::GetVideoSeoScore,
        ToolId::GetEngagementStats,
        ToolId::GetCommentKeywords,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ToolId::GetChannelOverview => "get_channel_overview",
            ToolId::GetChannelVideos => "get_channel_videos",
            ToolId::GetVideoDetails => "get_video_details",
            ToolId::GetVideoComments => "get_video_comments",
            ToolId::GetVideoTranscript => "get_video_transcript",
            ToolId::AnalyzeThumbnail => "analyze_thumbnail",
            ToolId::GetTrendingVideos => "get_trending_videos",
            ToolId::CompareVideos => "compare_videos",
            ToolId::GetChannelTopics => "get_channel_topics",
            ToolId::CompareChannels => "compare_channels",
            ToolId::GetTopVideos => "get_top_videos",
            ToolId::GetUploadSchedule => "get_upload_schedule",
            ToolId::GetTagAnalysis => "get_tag_analysis",
            ToolId::GetVideoSeoScore => "get_video_seo_score",
            ToolId::GetEngagementStats => "get_engagement_stats",
            ToolId::GetCommentKeywords => "get_comment_keywords",
        }
    }

    pub fn from_name(name: &str) -> Option<ToolId> {
        ToolId::ALL.into_iter().find(|tool| tool.name() == name)
    }

    pub fn definition(&self) -> Tool {
        let channel_url_property = serde_json::json!({
            "type": "string",
            "description": "YouTube channel URL. Supported formats: https://www.youtube.com/@handle or https://www.youtube.com/channel/UCxxxx"
        });
        let video_id_property = serde_json::json!({
            "type": "string",
            "description": "YouTube video ID (e.g. dQw4w9WgXcQ)."
        });

        let (description, input_schema) = match self {
            ToolId::GetChannelOverview => (
                "Returns a flat overview of a public YouTube channel. Includes subscriber count, total views, total videos, and creation date. Accepts a channel URL in @handle or /channel/UCxxxx format.",
                serde_json::json!({
                    "type": "object",
                    "properties": { "channel_url": channel_url_property },
                    "required": ["channel_url"]
                }),
            ),
            ToolId::GetChannelVideos => (
                "Returns a list of recent public videos from a channel, with per-video stats: views, likes, comments, duration. Use this as your primary dataset tool for channel analysis. Uses the uploads playlist internally, never the quota-expensive search endpoint.",
                serde_json::json!({
                    "type": "object",
                    "properties": {
                        "channel_url": channel_url_property,
                        "limit": {
                            "type": "integer",
                            "description": "Maximum number of videos to return. Defaults to 50.",
                            "default": 50,
                            "minimum": 1,
                            "maximum": 200
                        }
                    },
                    "required": ["channel_url"]
                }),
            ),
            ToolId::GetVideoDetails => (
                "Returns full metadata for a single video, including tags. Use this to deep-dive into one video after identifying it via get_channel_videos.",
                serde_json::json!({
                    "type": "object",
                    "properties": { "video_id": video_id_property },
                    "required": ["video_id"]
                }),
            ),
            ToolId::GetVideoComments => (
                "Returns top-level comments for a video, sorted by relevance. Includes author, comment text, like count, and publish date. Useful for audience sentiment and feedback analysis.",
                serde_json::json!({
                    "type": "object",
                    "properties": {
                        "video_id": video_id_property,
                        "limit": {
                            "type": "integer",
                            "description": "Maximum number of comments to return. Defaults to 100.",
                            "default": 100,
                            "minimum": 1,
                            "maximum": 500
                        }
                    },
                    "required": ["video_id"]
                }),
            ),
            ToolId::GetVideoTranscript => (
                "Fetches the full transcript (auto-generated or manual) of a video. Returns concatenated transcript text, word count, and segment count. Useful for content analysis, summarization, and keyword extraction.",
                serde_json::json!({
                    "type": "object",
                    "properties": { "video_id": video_id_property },
                    "required": ["video_id"]
                }),
            ),
            ToolId::AnalyzeThumbnail => (
                "Returns basic image metadata for a video's thumbnail: URL, resolution (WIDTHxHEIGHT), and file size in bytes. Metadata only, no vision model analysis.",
                serde_json::json!({
                    "type": "object",
                    "properties": { "video_id": video_id_property },
                    "required": ["video_id"]
                }),
            ),
            ToolId::GetTrendingVideos => (
                "Returns currently popular YouTube videos for a given region and category. NOTE: As of July 2025, YouTube removed its global Trending page. Results now come from category-specific charts (Music, Movies, Gaming). Use category_id 10 for Music, 20 for Gaming, 43 for Movies. category_id 0 returns a mixed set across all categories.",
                serde_json::json!({
                    "type": "object",
                    "properties": {
                        "region_code": {
                            "type": "string",
                            "description": "ISO 3166-1 alpha-2 country code (e.g. US, GB, IN). Defaults to US.",
                            "default": "US"
                        },
                        "category_id": {
                            "type": "string",
                            "description": "YouTube video category ID. Use '0' for all categories. Defaults to '0'.",
                            "default": "0"
                        },
                        "limit": {
                            "type": "integer",
                            "description": "Number of trending videos to return. Max 50. Defaults to 25.",
                            "default": 25,
                            "minimum": 1,
                            "maximum": 50
                        }
                    },
                    "required": []
                }),
            ),
            ToolId::CompareVideos => (
                "Side-by-side stats comparison for a list of video IDs (max 10). Returns per-video stats and declares winners by views, likes, comments, and engagement rate. Great for understanding why one video outperformed another.",
                serde_json::json!({
                    "type": "object",
                    "properties": {
                        "video_ids": {
                            "type": "array",
                            "items": { "type": "string" },
                            "description": "List of YouTube video IDs to compare (max 10).",
                            "minItems": 2,
                            "maxItems": 10
                        }
                    },
                    "required": ["video_ids"]
                }),
            ),
            ToolId::GetChannelTopics => (
                "Returns the topic categories YouTube has associated with a channel. Returns human-readable topic names extracted from Wikipedia category URLs. Raw Freebase topic IDs are excluded as they have been deprecated since 2017 and are not human-readable.",
                serde_json::json!({
                    "type": "object",
                    "properties": { "channel_url": channel_url_property },
                    "required": ["channel_url"]
                }),
            ),
            ToolId::CompareChannels => (
                "Side-by-side overview comparison for multiple channels (max 5). Returns subscriber count, total views, and video count for each, plus declares winners in each category. Good for competitor analysis.",
                serde_json::json!({
                    "type": "object",
                    "properties": {
                        "channel_urls": {
                            "type": "array",
                            "items": { "type": "string" },
                            "description": "List of YouTube channel URLs to compare (max 5).",
                            "minItems": 2,
                            "maxItems": 5
                        }
                    },
                    "required": ["channel_urls"]
                }),
            ),
            ToolId::GetTopVideos => (
                "Returns a channel's top performing videos sorted by a chosen metric. Scans up to 200 recent videos and returns the top N. metric options: views | likes | comments | engagement_rate",
                serde_json::json!({
                    "type": "object",
                    "properties": {
                        "channel_url": channel_url_property,
                        "metric": {
                            "type": "string",
                            "description": "Sort metric. One of: views, likes, comments, engagement_rate. Defaults to views.",
                            "enum": ["views", "likes", "comments", "engagement_rate"],
                            "default": "views"
                        },
                        "limit": {
                            "type": "integer",
                            "description": "Number of top videos to return. Defaults to 10.",
                            "default": 10,
                            "minimum": 1,
                            "maximum": 50
                        }
                    },
                    "required": ["channel_url"]
                }),
            ),
            ToolId::GetUploadSchedule => (
                "Analyzes a channel's upload patterns. Returns posting frequency by day-of-week and hour-of-day, average days between uploads, consistency score, and best posting day/time. Useful for optimizing your own upload schedule.",
                serde_json::json!({
                    "type": "object",
                    "properties": {
                        "channel_url": channel_url_property,
                        "limit": {
                            "type": "integer",
                            "description": "Number of recent videos to analyze. Defaults to 50.",
                            "default": 50,
                            "minimum": 10,
                            "maximum": 200
                        }
                    },
                    "required": ["channel_url"]
                }),
            ),
            ToolId::GetTagAnalysis => (
                "Aggregates tags across a channel's videos and correlates them with view performance. Returns top tags by frequency and by average views. Useful for finding which tags drive the most traffic.",
                serde_json::json!({
                    "type": "object",
                    "properties": {
                        "channel_url": channel_url_property,
                        "limit": {
                            "type": "integer",
                            "description": "Number of recent videos to analyze. Defaults to 50.",
                            "default": 50,
                            "minimum": 10,
                            "maximum": 200
                        }
                    },
                    "required": ["channel_url"]
                }),
            ),
            ToolId::GetVideoSeoScore => (
                "Checks a video's metadata against YouTube SEO best practices. Scores title length, description length/quality, tag count, and thumbnail presence. Returns an overall score (0-100) and per-dimension breakdown.",
                serde_json::json!({
                    "type": "object",
                    "properties": { "video_id": video_id_property },
                    "required": ["video_id"]
                }),
            ),
            ToolId::GetEngagementStats => (
                "Computes per-video engagement metrics across a channel's recent videos. Returns average views, likes, comments, like rate %, comment rate %, overall engagement rate %, and the top engaging video. Great for benchmarking your channel's audience engagement health.",
                serde_json::json!({
                    "type": "object",
                    "properties": {
                        "channel_url": channel_url_property,
                        "limit": {
                            "type": "integer",
                            "description": "Number of recent videos to analyze. Defaults to 50.",
                            "default": 50,
                            "minimum": 5,
                            "maximum": 200
                        }
                    },
                    "required": ["channel_url"]
                }),
            ),
            ToolId::GetCommentKeywords => (
                "Extracts the most frequent meaningful words from a video's comments. Deterministic word frequency analysis, no LLM or sentiment model. Useful for understanding what topics and themes resonate with your audience.",
                serde_json::json!({
                    "type": "object",
                    "properties": {
                        "video_id": video_id_property,
                        "limit": {
                            "type": "integer",
                            "description": "Number of comments to fetch for analysis. Defaults to 200.",
                            "default": 200,
                            "minimum": 10,
                            "maximum": 500
                        },
                        "top_n": {
                            "type": "integer",
                            "description": "Number of top keywords to return. Defaults to 30.",
                            "default": 30,
                            "minimum": 5,
                            "maximum": 100
                        }
                    },
                    "required": ["video_id"]
                }),
            ),
        };

        Tool {
            name: self.name().to_string(),
            description: description.to_string(),
            input_schema,
        }
    }
}

/// Wrap a data-function result in the MCP tool result format.
///
/// Failures never abort the JSON-RPC exchange: they become an
/// `{"error": message}` text payload with `isError` set, logged at `warn`
/// for caller faults and `error` for upstream faults.
pub fn tool_response<T: Serialize>(
    tool: ToolId,
    result: Result<T, crate::error::Error>,
) -> Result<serde_json::Value, JsonRpcError> {
    let call_result = match result {
        Ok(data) => {
            let json_string = serde_json::to_string_pretty(&data).map_err(|e| JsonRpcError {
                code: -32603,
                message: format!("Serialization error: {e}"),
                data: None,
            })?;
            CallToolResult {
                content: vec![Content::Text { text: json_string }],
                is_error: None,
            }
        }
        Err(err) => {
            match &err {
                crate::error::Error::InvalidInput(msg) | crate::error::Error::NotFound(msg) => {
                    log::warn!("{}: {msg}", tool.name());
                }
                crate::error::Error::Upstream(msg) => {
                    log::error!("{}: {msg}", tool.name());
                }
            }
            let payload = serde_json::json!({ "error": err.to_string() });
            CallToolResult {
                content: vec![Content::Text {
                    text: payload.to_string(),
                }],
                is_error: Some(true),
            }
        }
    };

    serde_json::to_value(call_result).map_err(|e| JsonRpcError {
        code: -32603,
        message: format!("Internal error: {e}"),
        data: None,
    })
}

/// Deserialize a tool's arguments object into its typed args struct.
pub fn parse_arguments<T: serde::de::DeserializeOwned>(
    arguments: Option<serde_json::Value>,
) -> Result<T, JsonRpcError> {
    serde_json::from_value(arguments.unwrap_or(serde_json::Value::Null)).map_err(|e| JsonRpcError {
        code: -32602,
        message: format!("Invalid arguments: {e}"),
        data: None,
    })
}

pub fn handle_initialize() -> Result<serde_json::Value, JsonRpcError> {
    let result = InitializeResult {
        protocol_version: "2024-11-05".to_string(),
        capabilities: ServerCapabilities {
            tools: Some(ToolsCapability {}),
        },
        server_info: ServerInfo {
            name: "ytmcp".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
    };

    serde_json::to_value(result).map_err(|e| JsonRpcError {
        code: -32603,
        message: format!("Internal error: {e}"),
        data: None,
    })
}

pub fn handle_tools_list() -> Result<serde_json::Value, JsonRpcError> {
    let result = ToolsList {
        tools: ToolId::ALL.iter().map(|tool| tool.definition()).collect(),
    };

    serde_json::to_value(result).map_err(|e| JsonRpcError {
        code: -32603,
        message: format!("Internal error: {e}"),
        data: None,
    })
}

pub async fn handle_tools_call(
    params: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    let params: CallToolParams = serde_json::from_value(params.unwrap_or(serde_json::Value::Null))
        .map_err(|e| JsonRpcError {
            code: -32602,
            message: format!("Invalid params: {e}"),
            data: None,
        })?;

    let tool = ToolId::from_name(&params.name).ok_or_else(|| JsonRpcError {
        code: -32602,
        message: format!("Unknown tool: {}", params.name),
        data: None,
    })?;

    match tool {
        ToolId::GetChannelOverview => {
            channel::handle_channel_overview(tool, params.arguments, global).await
        }
        ToolId::GetChannelVideos => {
            channel::handle_channel_videos(tool, params.arguments, global).await
        }
        ToolId::GetVideoDetails => video::handle_video_details(tool, params.arguments, global).await,
        ToolId::GetVideoComments => {
            video::handle_video_comments(tool, params.arguments, global).await
        }
        ToolId::GetVideoTranscript => {
            video::handle_video_transcript(tool, params.arguments, global).await
        }
        ToolId::AnalyzeThumbnail => {
            video::handle_analyze_thumbnail(tool, params.arguments, global).await
        }
        ToolId::GetTrendingVideos => {
            trending::handle_trending_videos(tool, params.arguments, global).await
        }
        ToolId::CompareVideos => video::handle_compare_videos(tool, params.arguments, global).await,
        ToolId::GetChannelTopics => {
            channel::handle_channel_topics(tool, params.arguments, global).await
        }
        ToolId::CompareChannels => {
            channel::handle_compare_channels(tool, params.arguments, global).await
        }
        ToolId::GetTopVideos => channel::handle_top_videos(tool, params.arguments, global).await,
        ToolId::GetUploadSchedule => {
            channel::handle_upload_schedule(tool, params.arguments, global).await
        }
        ToolId::GetTagAnalysis => channel::handle_tag_analysis(tool, params.arguments, global).await,
        ToolId::GetVideoSeoScore => {
            video::handle_video_seo_score(tool, params.arguments, global).await
        }
        ToolId::GetEngagementStats => {
            channel::handle_engagement_stats(tool, params.arguments, global).await
        }
        ToolId::GetCommentKeywords => {
            video::handle_comment_keywords(tool, params.arguments, global).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_names_round_trip() {
        for tool in ToolId::ALL {
            assert_eq!(ToolId::from_name(tool.name()), Some(tool));
        }
    }

    #[test]
    fn test_from_name_rejects_unknown() {
        assert_eq!(ToolId::from_name("get_channel_overview "), None);
        assert_eq!(ToolId::from_name("definitely_not_a_tool"), None);
    }

    #[test]
    fn test_all_names_unique() {
        let mut names: Vec<&str> = ToolId::ALL.iter().map(|t| t.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 16);
    }

    #[test]
    fn test_definitions_have_object_schemas() {
        for tool in ToolId::ALL {
            let definition = tool.definition();
            assert_eq!(definition.name, tool.name());
            assert!(!definition.description.is_empty());
            assert_eq!(definition.input_schema["type"], "object");
        }
    }

    #[test]
    fn test_tool_response_wraps_error_payload() {
        let result: Result<(), crate::error::Error> = Err(crate::error::Error::NotFound(
            "No video found for ID: abc".to_string(),
        ));
        let value = tool_response(ToolId::GetVideoDetails, result).unwrap();
        assert_eq!(value["isError"], true);
        let text = value["content"][0]["text"].as_str().unwrap();
        let payload: serde_json::Value = serde_json::from_str(text).unwrap();
        assert_eq!(payload["error"], "No video found for ID: abc");
    }

    #[test]
    fn test_tool_response_wraps_success_payload() {
        let value = tool_response(
            ToolId::GetVideoDetails,
            Ok::<_, crate::error::Error>(serde_json::json!({"ok": 1})),
        )
        .unwrap();
        assert!(value.get("isError").is_none());
        let text = value["content"][0]["text"].as_str().unwrap();
        assert!(text.contains("\"ok\""));
    }
}
