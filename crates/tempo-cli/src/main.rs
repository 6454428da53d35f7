//! Tempo CLI application.
//!
//! Command-line and MCP front end for the tempo progress tracker.

mod args;
mod cli;
mod mcp;
mod renderer;

use std::time::Duration;

use anyhow::{Context, Result};
use args::{Args, Commands, MilestoneCommands, SubscriptionCommands, TaskCommands};
use clap::Parser;
use cli::Cli;
use log::info;
use mcp::{run_stdio_server, TempoMcpServer};
use renderer::TerminalRenderer;
use tempo_core::{
    params::{MilestoneId, TaskId, UserId},
    TrackerBuilder, VapidConfig,
};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        push_timeout_secs,
        push_ttl_secs,
        vapid_private_key,
        vapid_subject,
        command,
    } = Args::parse();

    let mut builder = TrackerBuilder::new()
        .with_delivery_timeout(Duration::from_secs(push_timeout_secs))
        .with_push_ttl(Duration::from_secs(push_ttl_secs));
    if let Some(path) = database_file {
        builder = builder.with_database_path(path);
    }
    if let (Some(private_key), Some(subject)) = (vapid_private_key, vapid_subject) {
        builder = builder.with_vapid(VapidConfig {
            private_key,
            subject,
        });
    }
    let tracker = builder
        .build()
        .await
        .context("Failed to initialize tracker")?;

    info!("Tempo started");

    if let Commands::Serve = command {
        info!("Starting Tempo MCP server");
        return run_stdio_server(TempoMcpServer::new(tracker))
            .await
            .context("MCP server failed");
    }

    let cli = Cli::new(tracker, TerminalRenderer::new(!no_color));
    match command {
        Commands::Subscribe(args) => cli.subscribe(args.into()).await,
        Commands::Log(args) => cli.log_time(args.into()).await,
        Commands::TestPush(args) => cli.test_push(args.into()).await,
        Commands::Task {
            command: TaskCommands::Show { task_id },
        } => cli.show_task(TaskId { task_id }).await,
        Commands::Milestone {
            command: MilestoneCommands::Show { milestone_id },
        } => cli.show_milestone(MilestoneId { milestone_id }).await,
        Commands::Subscriptions {
            command: SubscriptionCommands::List { user_id },
        } => cli.list_subscriptions(UserId { user_id }).await,
        Commands::Serve => Ok(()),
    }
}
