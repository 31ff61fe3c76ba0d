//! Roam CLI Application
//!
//! Command-line interface for the roam itinerary store.

mod args;
mod cli;
mod renderer;

use anyhow::{Context, Result};
use args::Args;
use clap::Parser;
use cli::Cli;
use log::info;
use renderer::TerminalRenderer;
use roam_core::StoreBuilder;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        data_file,
        backend,
        plan_policy,
        no_color,
        json,
        command,
    } = Args::parse();

    let store = StoreBuilder::new()
        .with_data_path(data_file)
        .with_backend(backend.into())
        .with_plan_policy(plan_policy.into())
        .build()
        .await
        .context("Failed to open trip store")?;

    info!(
        "Roam started with {} backend, {} plan policy",
        store.backend_name(),
        store.plan_policy()
    );

    let cli = Cli::new(store, TerminalRenderer::new(!no_color), json);
    match command {
        Some(command) => cli.handle_command(command).await,
        None => cli.list_trips().await,
    }
}
