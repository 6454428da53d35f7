//! Task progress queries.

use rusqlite::{params, OptionalExtension, TransactionBehavior};

use crate::{
    error::{DatabaseResultExt, Result, TempoError},
    models::{LogOutcome, MilestoneProgress, Task, TaskSeed},
};

const INSERT_TASK_IF_ABSENT_SQL: &str = "INSERT OR IGNORE INTO tasks (task_id, milestone_id, goal_id, title, color, estimate_minutes, logged_minutes) VALUES (?1, ?2, ?3, ?4, ?5, ?6, 0)";
const SELECT_LOGGED_MINUTES_SQL: &str = "SELECT logged_minutes FROM tasks WHERE task_id = ?1";
const ADVANCE_LOGGED_MINUTES_SQL: &str =
    "UPDATE tasks SET logged_minutes = MIN(estimate_minutes, logged_minutes + ?1) WHERE task_id = ?2";
const SELECT_TASK_SQL: &str = "SELECT task_id, title, color, milestone_id, goal_id, estimate_minutes, logged_minutes FROM tasks WHERE task_id = ?1";
const COUNT_OPEN_MILESTONE_TASKS_SQL: &str =
    "SELECT COUNT(*) FROM tasks WHERE milestone_id = ?1 AND logged_minutes < estimate_minutes";
const SELECT_MILESTONE_PROGRESS_SQL: &str = "SELECT COUNT(*), COALESCE(SUM(logged_minutes >= estimate_minutes), 0), COALESCE(SUM(logged_minutes), 0), COALESCE(SUM(estimate_minutes), 0) FROM tasks WHERE milestone_id = ?1";

impl super::Database {
    /// Helper function to construct a Task from a database row
    fn build_task_from_row(row: &rusqlite::Row) -> rusqlite::Result<Task> {
        Ok(Task {
            task_id: row.get(0)?,
            title: row.get(1)?,
            color: row.get(2)?,
            milestone_id: row.get(3)?,
            goal_id: row.get(4)?,
            estimate_minutes: row.get::<_, i64>(5)? as u32,
            logged_minutes: row.get::<_, i64>(6)? as u32,
        })
    }

    /// Logs minutes against a task, creating it from `seed` if it is unseen.
    ///
    /// Seeding, the saturating increment and the milestone scan run in one
    /// IMMEDIATE transaction, so concurrent logs against the same task never
    /// lose an update and only one of them can observe the completing
    /// transition.
    ///
    /// `milestone_just_completed` is only evaluated when this call moved the
    /// task from incomplete to complete and a milestone identifier was
    /// supplied.
    pub fn log_time(
        &mut self,
        seed: &TaskSeed,
        delta_minutes: u32,
        milestone_id: Option<&str>,
    ) -> Result<LogOutcome> {
        let tx = self
            .connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .db_context("Failed to begin transaction")?;

        tx.execute(
            INSERT_TASK_IF_ABSENT_SQL,
            params![
                &seed.task_id,
                seed.milestone_id.as_deref(),
                seed.goal_id.as_deref(),
                &seed.title,
                seed.color.as_deref(),
                i64::from(seed.estimate_minutes),
            ],
        )
        .db_context("Failed to seed task")?;

        let previous: u32 = tx
            .query_row(SELECT_LOGGED_MINUTES_SQL, params![&seed.task_id], |row| {
                row.get::<_, i64>(0)
            })
            .optional()
            .db_context("Failed to read logged minutes")?
            .map(|mins| mins as u32)
            .ok_or_else(|| TempoError::TaskNotFound {
                task_id: seed.task_id.clone(),
            })?;

        let updated = tx
            .execute(
                ADVANCE_LOGGED_MINUTES_SQL,
                params![i64::from(delta_minutes), &seed.task_id],
            )
            .db_context("Failed to update logged minutes")?;
        if updated == 0 {
            return Err(TempoError::TaskNotFound {
                task_id: seed.task_id.clone(),
            });
        }

        let task = tx
            .query_row(SELECT_TASK_SQL, params![&seed.task_id], Self::build_task_from_row)
            .db_context("Failed to read task after update")?;

        let completed_now = previous < task.estimate_minutes && task.is_complete();
        let milestone_just_completed = match milestone_id {
            Some(milestone_id) if completed_now => {
                let open: i64 = tx
                    .query_row(COUNT_OPEN_MILESTONE_TASKS_SQL, params![milestone_id], |row| {
                        row.get(0)
                    })
                    .db_context("Failed to count open milestone tasks")?;
                open == 0
            }
            _ => false,
        };

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(LogOutcome {
            applied_minutes: task.logged_minutes - previous,
            task_id: task.task_id,
            title: task.title,
            estimate_minutes: task.estimate_minutes,
            logged_minutes: task.logged_minutes,
            milestone_just_completed,
        })
    }

    /// Retrieves a task by its identifier.
    pub fn get_task(&self, task_id: &str) -> Result<Option<Task>> {
        self.connection
            .query_row(SELECT_TASK_SQL, params![task_id], Self::build_task_from_row)
            .optional()
            .db_context("Failed to get task")
    }

    /// Computes the completion state of every task stored under a milestone.
    pub fn milestone_progress(&self, milestone_id: &str) -> Result<MilestoneProgress> {
        self.connection
            .query_row(SELECT_MILESTONE_PROGRESS_SQL, params![milestone_id], |row| {
                Ok(MilestoneProgress {
                    milestone_id: milestone_id.to_string(),
                    total_tasks: row.get::<_, i64>(0)? as u32,
                    completed_tasks: row.get::<_, i64>(1)? as u32,
                    logged_minutes: row.get::<_, i64>(2)? as u64,
                    estimate_minutes: row.get::<_, i64>(3)? as u64,
                })
            })
            .db_context("Failed to compute milestone progress")
    }
}
