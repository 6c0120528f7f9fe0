#![allow(unused)]

use crate::prelude::*;
use clap::Parser;

mod error;
mod mcp;
mod prelude;
mod yt;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Analytics tools for public YouTube channels and videos"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Whether to display additional information.
    #[clap(long, env = "YTMCP_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Channel-level analytics
    Channel(crate::yt::channel::App),

    /// Video-level analytics
    Video(crate::yt::video::App),

    /// Trending chart listings
    Trending(crate::yt::trending::App),

    /// Model Context Protocol server
    MCP(crate::mcp::App),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::Channel(sub_app) => crate::yt::channel::run(sub_app, app.global).await,
        SubCommands::Video(sub_app) => crate::yt::video::run(sub_app, app.global).await,
        SubCommands::Trending(sub_app) => crate::yt::trending::run(sub_app, app.global).await,
        SubCommands::MCP(sub_app) => crate::mcp::run(sub_app, app.global).await,
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
