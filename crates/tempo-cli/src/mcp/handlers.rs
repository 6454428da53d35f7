//! MCP tool handlers implementation

use std::sync::Arc;

use log::debug;
use rmcp::{
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content},
    ErrorData,
};
use tempo_core::{
    display::Confirmation,
    params::{LogTime, MilestoneId, SendTestNotification, Subscribe, TaskId, UserId},
    Tracker,
};

use super::errors::to_mcp_error;

pub type McpResult = Result<CallToolResult, ErrorData>;

fn text(output: impl Into<String>) -> McpResult {
    Ok(CallToolResult::success(vec![Content::text(output.into())]))
}

/// Handler implementations for the MCP server
pub struct McpHandlers {
    tracker: Arc<Tracker>,
}

impl McpHandlers {
    pub fn new(tracker: Arc<Tracker>) -> Self {
        Self { tracker }
    }

    pub async fn subscribe(&self, Parameters(params): Parameters<Subscribe>) -> McpResult {
        debug!("subscribe: user={} endpoint={}", params.user_id, params.endpoint);

        let subscription = self
            .tracker
            .subscribe(&params)
            .await
            .map_err(|e| to_mcp_error("Failed to register subscription", &e))?;

        let status = Confirmation::Subscribed(&subscription);
        text(status.to_string())
    }

    pub async fn log_time(&self, Parameters(params): Parameters<LogTime>) -> McpResult {
        debug!("log_time: {:?}", params);

        let receipt = self
            .tracker
            .log_time(&params)
            .await
            .map_err(|e| to_mcp_error("Failed to log time", &e))?;
        text(receipt.to_string())
    }

    pub async fn send_test_notification(
        &self,
        Parameters(params): Parameters<SendTestNotification>,
    ) -> McpResult {
        debug!("send_test_notification: {:?}", params);

        let report = self
            .tracker
            .send_test_notification(&params)
            .await
            .map_err(|e| to_mcp_error("Failed to send test notification", &e))?;

        let status = Confirmation::TestPush(&report);
        text(status.to_string())
    }

    pub async fn show_task(&self, Parameters(params): Parameters<TaskId>) -> McpResult {
        debug!("show_task: {:?}", params);

        let task = self
            .tracker
            .get_task(&params)
            .await
            .map_err(|e| to_mcp_error("Failed to get task", &e))?
            .ok_or_else(|| {
                ErrorData::invalid_params(format!("Task '{}' not found", params.task_id), None)
            })?;
        text(task.to_string())
    }

    pub async fn milestone_progress(
        &self,
        Parameters(params): Parameters<MilestoneId>,
    ) -> McpResult {
        debug!("milestone_progress: {:?}", params);

        let progress = self
            .tracker
            .milestone_progress(&params)
            .await
            .map_err(|e| to_mcp_error("Failed to compute milestone progress", &e))?;
        text(progress.to_string())
    }

    pub async fn list_subscriptions(&self, Parameters(params): Parameters<UserId>) -> McpResult {
        debug!("list_subscriptions: {:?}", params);

        let subscriptions = self
            .tracker
            .list_subscriptions(&params)
            .await
            .map_err(|e| to_mcp_error("Failed to list subscriptions", &e))?;

        text(format!(
            "# Subscriptions for {}\n\n{}",
            params.user_id, subscriptions
        ))
    }
}
