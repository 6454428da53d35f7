//! Progress aggregation operations for the Tracker.

use super::{with_database, Tracker};
use crate::{
    error::Result,
    models::{LogOutcome, MilestoneProgress, Task},
    params::{LogTime, MilestoneId, TaskId},
};

impl Tracker {
    /// Adds the validated delta to a task, seeding it on first sight, and
    /// reports whether this update completed the task's milestone.
    ///
    /// This only mutates state; [`Tracker::log_time`] adds the notifications.
    pub async fn log_progress(&self, params: &LogTime) -> Result<LogOutcome> {
        let delta_minutes = params.delta_minutes()?;
        let seed = params.seed();
        let milestone_id = params.milestone().map(String::from);

        with_database(&self.db_path, move |db| {
            db.log_time(&seed, delta_minutes, milestone_id.as_deref())
        })
        .await
    }

    /// Retrieves a single task by its identifier.
    pub async fn get_task(&self, params: &TaskId) -> Result<Option<Task>> {
        let task_id = params.task_id.clone();
        with_database(&self.db_path, move |db| db.get_task(&task_id)).await
    }

    /// Computes current progress for a milestone. Milestones are never
    /// stored, so an unknown identifier yields zero tasks.
    pub async fn milestone_progress(&self, params: &MilestoneId) -> Result<MilestoneProgress> {
        let milestone_id = params.milestone_id.clone();
        with_database(&self.db_path, move |db| db.milestone_progress(&milestone_id)).await
    }
}
