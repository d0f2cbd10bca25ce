//! `posts` — terminal host for the posts list/detail core.

mod app;
mod args;
mod transport;

use std::io;

use anyhow::Result;
use clap::Parser;
use posts_core::{ClientConfig, CoordinatorConfig, PostsClient, ViewCoordinator};
use tracing_subscriber::EnvFilter;

use app::App;
use args::Args;
use transport::UreqTransport;

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.log_directive()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let client_config = ClientConfig {
        base_url: args.base_url.clone(),
    };
    let coordinator = ViewCoordinator::new(
        PostsClient::from_config(&client_config),
        CoordinatorConfig {
            back_navigation: args.back_navigation,
        },
    );
    tracing::debug!(base_url = %client_config.base_url, "starting");

    let mut app = App::new(coordinator, UreqTransport::new());
    app.run(io::stdin().lock(), io::stdout().lock())
}
