//! Event flows that combine progress updates with notifications.

use log::{info, warn};

use super::{DispatchReport, Tracker};
use crate::{
    error::Result,
    models::{LogOutcome, Notification},
    params::{LogTime, SendTestNotification},
};

/// Everything that happened while handling one log event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogReceipt {
    /// Persisted progress; authoritative regardless of notification results
    pub outcome: LogOutcome,
    /// Result of the log notification, `None` if the dispatch itself failed
    pub log_dispatch: Option<DispatchReport>,
    /// Result of the milestone notification, `None` if none was due or the
    /// dispatch failed
    pub milestone_dispatch: Option<DispatchReport>,
}

impl Tracker {
    /// Handles a log-time event.
    ///
    /// The progress update is the durable effect and its failure fails the
    /// call. Notifications follow it: a `log` push always, a `milestone` push
    /// when the update completed the milestone. Notification failures are
    /// logged and otherwise ignored, including partial delivery.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use tempo_core::{params::LogTime, TrackerBuilder};
    /// # async {
    /// let tracker = TrackerBuilder::new().build().await?;
    /// let receipt = tracker
    ///     .log_time(&LogTime {
    ///         user_id: "u1".to_string(),
    ///         task_id: "essay".to_string(),
    ///         delta_mins: 25,
    ///         estimate_mins: Some(120),
    ///         ..Default::default()
    ///     })
    ///     .await?;
    /// println!("{} / {}", receipt.outcome.logged_minutes, receipt.outcome.estimate_minutes);
    /// # Result::<(), tempo_core::TempoError>::Ok(())
    /// # };
    /// ```
    pub async fn log_time(&self, params: &LogTime) -> Result<LogReceipt> {
        let outcome = self.log_progress(params).await?;
        let delta_minutes = params.delta_minutes()?;

        let log_dispatch = self
            .notify_best_effort(&params.user_id, &Notification::logged(&outcome, delta_minutes))
            .await;

        let milestone_dispatch = match params.milestone() {
            Some(milestone_id) if outcome.milestone_just_completed => {
                info!("milestone {milestone_id} complete for user {}", params.user_id);
                let notification = Notification::milestone_complete(
                    milestone_id,
                    params.goal().map(String::from),
                );
                self.notify_best_effort(&params.user_id, &notification).await
            }
            _ => None,
        };

        Ok(LogReceipt {
            outcome,
            log_dispatch,
            milestone_dispatch,
        })
    }

    /// Sends a diagnostic push to every device of a user without touching
    /// task progress.
    pub async fn send_test_notification(
        &self,
        params: &SendTestNotification,
    ) -> Result<DispatchReport> {
        params.validate()?;
        self.dispatcher
            .notify(
                &params.user_id,
                &Notification::test(params.title.as_str(), params.body.as_str()),
            )
            .await
    }

    async fn notify_best_effort(
        &self,
        user_id: &str,
        notification: &Notification,
    ) -> Option<DispatchReport> {
        match self.dispatcher.notify(user_id, notification).await {
            Ok(report) => Some(report),
            Err(e) => {
                warn!("{} push to user {user_id} failed: {e}", notification.kind());
                None
            }
        }
    }
}
