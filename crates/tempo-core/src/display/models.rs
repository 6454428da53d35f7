//! Display implementations for domain models.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::models::{MilestoneProgress, Subscription, Task};

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = if self.is_complete() { "✓" } else { "○" };
        writeln!(f, "# {} {} ({})", marker, self.title, self.task_id)?;
        writeln!(f)?;
        writeln!(
            f,
            "- Progress: {} / {} min",
            self.logged_minutes, self.estimate_minutes
        )?;
        if !self.is_complete() {
            writeln!(f, "- Remaining: {} min", self.remaining_minutes())?;
        }
        if let Some(milestone) = &self.milestone_id {
            writeln!(f, "- Milestone: {milestone}")?;
        }
        if let Some(goal) = &self.goal_id {
            writeln!(f, "- Goal: {goal}")?;
        }
        if let Some(color) = &self.color {
            writeln!(f, "- Color: {color}")?;
        }
        Ok(())
    }
}

impl fmt::Display for MilestoneProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Milestone {}", self.milestone_id)?;
        writeln!(f)?;
        if self.total_tasks == 0 {
            return writeln!(f, "No tasks logged against this milestone.");
        }
        writeln!(
            f,
            "- Tasks: {}/{} complete",
            self.completed_tasks, self.total_tasks
        )?;
        writeln!(
            f,
            "- Minutes: {} / {}",
            self.logged_minutes, self.estimate_minutes
        )?;
        if self.is_complete() {
            writeln!(f, "- Status: complete")?;
        } else {
            writeln!(f, "- Status: {} task(s) open", self.pending_tasks())?;
        }
        Ok(())
    }
}

impl fmt::Display for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "- {}", self.endpoint)?;
        writeln!(f, "  - Registered: {}", LocalDateTime(&self.created_at))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(logged: u32) -> Task {
        Task {
            task_id: "t1".to_string(),
            title: "Outline".to_string(),
            color: Some("blue".to_string()),
            milestone_id: Some("m1".to_string()),
            goal_id: None,
            estimate_minutes: 20,
            logged_minutes: logged,
        }
    }

    #[test]
    fn test_task_display_open() {
        let output = task(5).to_string();
        assert!(output.starts_with("# ○ Outline (t1)"));
        assert!(output.contains("- Progress: 5 / 20 min"));
        assert!(output.contains("- Remaining: 15 min"));
        assert!(output.contains("- Milestone: m1"));
        assert!(!output.contains("Goal"));
    }

    #[test]
    fn test_task_display_complete() {
        let output = task(20).to_string();
        assert!(output.starts_with("# ✓ Outline"));
        assert!(!output.contains("Remaining"));
    }

    #[test]
    fn test_milestone_display() {
        let progress = MilestoneProgress {
            milestone_id: "m1".to_string(),
            total_tasks: 2,
            completed_tasks: 1,
            logged_minutes: 12,
            estimate_minutes: 15,
        };
        let output = progress.to_string();
        assert!(output.contains("- Tasks: 1/2 complete"));
        assert!(output.contains("1 task(s) open"));

        let empty = MilestoneProgress {
            total_tasks: 0,
            completed_tasks: 0,
            logged_minutes: 0,
            estimate_minutes: 0,
            ..progress
        };
        assert!(empty.to_string().contains("No tasks logged"));
    }
}
