use crate::prelude::{eprintln, *};
use serde::Deserialize;

use super::{parse_arguments, tool_response, JsonRpcError, ToolId};

pub async fn handle_trending_videos(
    tool: ToolId,
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct TrendingArgs {
        region_code: Option<String>,
        category_id: Option<String>,
        limit: Option<usize>,
    }

    let args: TrendingArgs = parse_arguments(arguments)?;
    let region_code = args.region_code.unwrap_or_else(|| "US".to_string());
    let category_id = args.category_id.unwrap_or_else(|| "0".to_string());
    let limit = args.limit.unwrap_or(25);

    if global.verbose {
        eprintln!(
            "Calling {}: region_code={region_code}, category_id={category_id}, limit={limit}",
            tool.name()
        );
    }

    tool_response(
        tool,
        crate::yt::trending::trending_data(&region_code, &category_id, limit).await,
    )
}
