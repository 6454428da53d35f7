//! One-shot command handlers.

use anyhow::{anyhow, Context, Result};
use tempo_core::{
    display::Confirmation,
    params::{LogTime, MilestoneId, SendTestNotification, Subscribe, TaskId, UserId},
    Tracker,
};

use crate::renderer::TerminalRenderer;

/// Runs a single CLI command against a tracker and renders the result.
pub struct Cli {
    tracker: Tracker,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(tracker: Tracker, renderer: TerminalRenderer) -> Self {
        Self { tracker, renderer }
    }

    pub async fn subscribe(&self, params: Subscribe) -> Result<()> {
        let subscription = self
            .tracker
            .subscribe(&params)
            .await
            .context("Failed to register subscription")?;

        let status = Confirmation::Subscribed(&subscription);
        self.renderer.render(&status.to_string())
    }

    pub async fn log_time(&self, params: LogTime) -> Result<()> {
        let receipt = self
            .tracker
            .log_time(&params)
            .await
            .context("Failed to log time")?;
        self.renderer.render(&receipt.to_string())
    }

    pub async fn test_push(&self, params: SendTestNotification) -> Result<()> {
        let report = self
            .tracker
            .send_test_notification(&params)
            .await
            .context("Failed to send test notification")?;

        let status = Confirmation::TestPush(&report);
        self.renderer.render(&status.to_string())
    }

    pub async fn show_task(&self, params: TaskId) -> Result<()> {
        let task = self
            .tracker
            .get_task(&params)
            .await
            .context("Failed to get task")?
            .ok_or_else(|| anyhow!("Task '{}' not found", params.task_id))?;
        self.renderer.render(&task.to_string())
    }

    pub async fn show_milestone(&self, params: MilestoneId) -> Result<()> {
        let progress = self
            .tracker
            .milestone_progress(&params)
            .await
            .context("Failed to compute milestone progress")?;
        self.renderer.render(&progress.to_string())
    }

    pub async fn list_subscriptions(&self, params: UserId) -> Result<()> {
        let subscriptions = self
            .tracker
            .list_subscriptions(&params)
            .await
            .context("Failed to list subscriptions")?;

        let output = format!(
            "# Subscriptions for {}\n\n{}",
            params.user_id, subscriptions
        );
        self.renderer.render(&output)
    }
}
