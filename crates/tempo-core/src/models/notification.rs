//! Notification variants and their JSON wire form.
//!
//! Notifications stay typed until the dispatcher hands them to a transport;
//! [`Notification::to_payload`] is the only place the wire shape is decided.
//! The browser service worker reads `title` and `body` from the payload and
//! keeps the remaining fields as notification data.

use serde::{Deserialize, Serialize};

use super::LogOutcome;
use crate::error::Result;

const LOG_TITLE: &str = "Time logged";
const MILESTONE_TITLE: &str = "Milestone complete";
const MILESTONE_BODY: &str = "You've completed all tasks for a milestone.";

/// A push message produced by the log/test flows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// Sent after every successful time log
    Log {
        task_id: String,
        task_title: String,
        delta_minutes: u32,
        logged_minutes: u32,
        estimate_minutes: u32,
    },
    /// Sent once, when the last open task of a milestone completes
    Milestone {
        milestone_id: String,
        goal_id: Option<String>,
    },
    /// Operator-triggered diagnostic push
    Test { title: String, body: String },
}

/// Serialized shape of a [`Notification`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PushPayload {
    pub kind: String,
    pub title: String,
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delta_mins: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logged_mins: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimate_mins: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub milestone_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal_id: Option<String>,
}

impl PushPayload {
    fn new(kind: &str, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            kind: kind.to_string(),
            title: title.into(),
            body: body.into(),
            task_id: None,
            task_title: None,
            delta_mins: None,
            logged_mins: None,
            estimate_mins: None,
            milestone_id: None,
            goal_id: None,
        }
    }
}

impl Notification {
    /// Build the log notification for a completed time log.
    pub fn logged(outcome: &LogOutcome, delta_minutes: u32) -> Self {
        Self::Log {
            task_id: outcome.task_id.clone(),
            task_title: outcome.title.clone(),
            delta_minutes,
            logged_minutes: outcome.logged_minutes,
            estimate_minutes: outcome.estimate_minutes,
        }
    }

    /// Build the milestone-complete notification.
    pub fn milestone_complete(milestone_id: impl Into<String>, goal_id: Option<String>) -> Self {
        Self::Milestone {
            milestone_id: milestone_id.into(),
            goal_id,
        }
    }

    /// Build a diagnostic notification.
    pub fn test(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::Test {
            title: title.into(),
            body: body.into(),
        }
    }

    /// Kind discriminator as it appears on the wire.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Log { .. } => "log",
            Self::Milestone { .. } => "milestone",
            Self::Test { .. } => "test",
        }
    }

    /// Convert to the wire representation.
    pub fn to_payload(&self) -> PushPayload {
        match self {
            Self::Log {
                task_id,
                task_title,
                delta_minutes,
                logged_minutes,
                estimate_minutes,
            } => PushPayload {
                task_id: Some(task_id.clone()),
                task_title: Some(task_title.clone()),
                delta_mins: Some(*delta_minutes),
                logged_mins: Some(*logged_minutes),
                estimate_mins: Some(*estimate_minutes),
                ..PushPayload::new(
                    self.kind(),
                    LOG_TITLE,
                    format!("{task_title} +{delta_minutes}m ({logged_minutes} / {estimate_minutes}m)"),
                )
            },
            Self::Milestone {
                milestone_id,
                goal_id,
            } => PushPayload {
                milestone_id: Some(milestone_id.clone()),
                goal_id: goal_id.clone(),
                ..PushPayload::new(self.kind(), MILESTONE_TITLE, MILESTONE_BODY)
            },
            Self::Test { title, body } => PushPayload::new(self.kind(), title.as_str(), body.as_str()),
        }
    }

    /// Serialize to the JSON bytes handed to the delivery transport.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(&self.to_payload())?)
    }
}
