//! MCP server implementation for Tempo
//!
//! Exposes the tracker's operations as Model Context Protocol tools over
//! stdio. Requests are handled concurrently; the tracker opens its own
//! database connection per call, so no lock is held around it.

use std::sync::Arc;

use anyhow::Result;
use log::{debug, error, info};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ServerHandler,
};
use tempo_core::{
    params::{LogTime, MilestoneId, SendTestNotification, Subscribe, TaskId, UserId},
    Tracker,
};
use tokio::signal::unix::{signal, SignalKind};

pub mod errors;
pub mod handlers;

use handlers::{McpHandlers, McpResult};

/// MCP server for Tempo
#[derive(Clone)]
pub struct TempoMcpServer {
    tracker: Arc<Tracker>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl TempoMcpServer {
    /// Create a new Tempo MCP server
    pub fn new(tracker: Tracker) -> Self {
        Self {
            tracker: Arc::new(tracker),
            tool_router: Self::tool_router(),
        }
    }

    fn handlers(&self) -> McpHandlers {
        McpHandlers::new(self.tracker.clone())
    }

    #[tool(
        name = "subscribe",
        description = "Register a device's web push endpoint for a user. Provide userId, endpoint and the keys object (p256dh, auth) from the browser's PushSubscription. Subscribing again with the same endpoint replaces the earlier registration."
    )]
    async fn subscribe(&self, params: Parameters<Subscribe>) -> McpResult {
        self.handlers().subscribe(params).await
    }

    #[tool(
        name = "log_time",
        description = "Log minutes (deltaMins > 0) against a task for a user. Unseen tasks are created from taskTitle, estimateMins and color. Logged time never exceeds the estimate. Sends a 'log' push to every device of the user, and a 'milestone' push when this log completes the last open task of milestoneId."
    )]
    async fn log_time(&self, params: Parameters<LogTime>) -> McpResult {
        self.handlers().log_time(params).await
    }

    #[tool(
        name = "send_test_notification",
        description = "Send a diagnostic push with the given title and body to every device registered for userId. Does not touch task progress."
    )]
    async fn send_test_notification(&self, params: Parameters<SendTestNotification>) -> McpResult {
        self.handlers().send_test_notification(params).await
    }

    #[tool(
        name = "show_task",
        description = "Show a task's title, logged and estimated minutes, milestone and goal."
    )]
    async fn show_task(&self, params: Parameters<TaskId>) -> McpResult {
        self.handlers().show_task(params).await
    }

    #[tool(
        name = "milestone_progress",
        description = "Show how many tasks of a milestone are complete and the minutes logged against it."
    )]
    async fn milestone_progress(&self, params: Parameters<MilestoneId>) -> McpResult {
        self.handlers().milestone_progress(params).await
    }

    #[tool(
        name = "list_subscriptions",
        description = "List the push endpoints registered for userId."
    )]
    async fn list_subscriptions(&self, params: Parameters<UserId>) -> McpResult {
        self.handlers().list_subscriptions(params).await
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for TempoMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(r#"Tempo tracks minutes logged against tasks and notifies a user's devices by web push.

## Concepts
- **Task**: identified by taskId; has an estimate and logged minutes that never exceed it
- **Milestone**: all tasks sharing a milestoneId; complete when every one of them reaches its estimate
- **Subscription**: a device push endpoint registered for a user

## Workflow
1. Register devices with `subscribe`
2. Record work with `log_time`; each call pushes a 'log' notification and, when it completes a milestone, a 'milestone' notification
3. Check state with `show_task`, `milestone_progress` and `list_subscriptions`
4. Use `send_test_notification` to verify a device receives pushes

Delivery failures never fail a tool call. Endpoints the push service reports as gone are removed automatically."#.to_string()),
        }
    }
}

/// Run the MCP server with stdio transport
pub async fn run_stdio_server(server: TempoMcpServer) -> Result<()> {
    use rmcp::{transport::stdio, ServiceExt};

    info!("Starting Tempo MCP server on stdio");
    debug!(
        "Server created with {} tools",
        server.tool_router.list_all().len()
    );

    let service = server.serve(stdio()).await.inspect_err(|e| {
        error!("serving error: {e:?}");
    })?;

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        result = service.waiting() => {
            match result {
                Ok(_) => info!("MCP server stopped normally"),
                Err(e) => error!("MCP server error: {e:?}"),
            }
        }
        _ = sigint.recv() => {
            info!("Received SIGINT, shutting down gracefully...");
        }
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down gracefully...");
        }
    }

    info!("MCP server shutdown complete");
    Ok(())
}
