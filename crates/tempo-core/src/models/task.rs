//! Task progress model and the values produced by logging time against it.

use serde::{Deserialize, Serialize};

/// A unit of work with an estimate and the minutes logged against it.
///
/// `logged_minutes` never exceeds `estimate_minutes`; the store clamps every
/// update.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    /// Caller-supplied identifier
    pub task_id: String,

    /// Display title (the identifier when none was seeded)
    pub title: String,

    /// Opaque display tag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    /// Milestone this task belongs to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub milestone_id: Option<String>,

    /// Goal this task belongs to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal_id: Option<String>,

    /// Estimated effort, at least 1
    pub estimate_minutes: u32,

    /// Minutes logged so far, at most `estimate_minutes`
    pub logged_minutes: u32,
}

impl Task {
    /// Whether all estimated minutes have been logged.
    pub fn is_complete(&self) -> bool {
        self.logged_minutes >= self.estimate_minutes
    }

    /// Minutes left before the task is complete.
    pub fn remaining_minutes(&self) -> u32 {
        self.estimate_minutes.saturating_sub(self.logged_minutes)
    }
}

/// Attributes used to create a task the first time its identifier is seen.
///
/// Seeds are already normalized: the title is never blank and the estimate
/// is at least 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSeed {
    pub task_id: String,
    pub title: String,
    pub color: Option<String>,
    pub milestone_id: Option<String>,
    pub goal_id: Option<String>,
    pub estimate_minutes: u32,
}

/// Result of logging minutes against a task.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogOutcome {
    pub task_id: String,
    pub title: String,
    pub estimate_minutes: u32,
    /// Cumulative minutes after this update
    pub logged_minutes: u32,
    /// Minutes actually added; smaller than the requested delta when the
    /// estimate capped the update
    pub applied_minutes: u32,
    /// True only for the update that completed the last open task of the
    /// supplied milestone
    pub milestone_just_completed: bool,
}

impl LogOutcome {
    /// Whether part of the requested delta was discarded by the clamp.
    pub fn was_truncated(&self, requested_minutes: u32) -> bool {
        self.applied_minutes < requested_minutes
    }
}

/// Aggregate progress of every task sharing a milestone identifier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MilestoneProgress {
    pub milestone_id: String,
    pub total_tasks: u32,
    pub completed_tasks: u32,
    pub logged_minutes: u64,
    pub estimate_minutes: u64,
}

impl MilestoneProgress {
    /// A milestone is complete when it has tasks and all of them are done.
    pub fn is_complete(&self) -> bool {
        self.total_tasks > 0 && self.completed_tasks == self.total_tasks
    }

    /// Number of tasks still short of their estimate.
    pub fn pending_tasks(&self) -> u32 {
        self.total_tasks - self.completed_tasks
    }
}
