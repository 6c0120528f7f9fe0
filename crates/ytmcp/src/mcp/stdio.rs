use crate::prelude::{eprintln, *};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

/// Serve MCP over stdio: one JSON-RPC request per line in, one response
/// per line out. Request and response bodies go to the log facade at
/// debug level so they never mix with the protocol stream on stdout.
pub async fn run_stdio(global: crate::Global) -> Result<()> {
    if global.verbose {
        eprintln!("Starting MCP server with stdio transport...");
        eprintln!();
    }
    log::info!("MCP server listening on stdio");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = lines.next_line().await? {
        let request = line.trim();
        if request.is_empty() {
            continue;
        }

        log::debug!("request: {request}");

        let response = super::handle_request(request, &global).await;
        let mut payload = serde_json::to_string(&response)?;

        log::debug!("response: {payload}");

        payload.push('\n');
        stdout.write_all(payload.as_bytes()).await?;
        stdout.flush().await?;
    }

    log::info!("stdin closed, shutting down");
    Ok(())
}
