//! Display implementations for operation results.

use std::fmt;

use crate::tracker::{DispatchReport, LogReceipt};

impl fmt::Display for DispatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Skipped => write!(f, "no devices registered"),
            Self::Delivered { delivered } => write!(f, "delivered to {delivered} device(s)"),
            Self::PartialFailure {
                delivered,
                gone,
                failed,
            } => write!(
                f,
                "delivered to {delivered} device(s), {gone} removed, {failed} failed"
            ),
        }
    }
}

impl fmt::Display for LogReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let outcome = &self.outcome;
        writeln!(f, "Logged {} min on {}", outcome.applied_minutes, outcome.title)?;
        writeln!(f)?;
        writeln!(
            f,
            "- Progress: {} / {} min",
            outcome.logged_minutes, outcome.estimate_minutes
        )?;
        match &self.log_dispatch {
            Some(report) => writeln!(f, "- Notification: {report}")?,
            None => writeln!(f, "- Notification: not sent")?,
        }
        if outcome.milestone_just_completed {
            writeln!(f, "- Milestone complete!")?;
            if let Some(report) = &self.milestone_dispatch {
                writeln!(f, "- Milestone notification: {report}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LogOutcome;

    fn receipt(milestone: bool) -> LogReceipt {
        LogReceipt {
            outcome: LogOutcome {
                task_id: "t1".to_string(),
                title: "Review".to_string(),
                estimate_minutes: 30,
                logged_minutes: 30,
                applied_minutes: 10,
                milestone_just_completed: milestone,
            },
            log_dispatch: Some(DispatchReport::Delivered { delivered: 2 }),
            milestone_dispatch: milestone.then_some(DispatchReport::Skipped),
        }
    }

    #[test]
    fn test_dispatch_report_display() {
        assert_eq!(DispatchReport::Skipped.to_string(), "no devices registered");
        assert_eq!(
            DispatchReport::PartialFailure {
                delivered: 1,
                gone: 1,
                failed: 0
            }
            .to_string(),
            "delivered to 1 device(s), 1 removed, 0 failed"
        );
    }

    #[test]
    fn test_log_receipt_display() {
        let output = receipt(false).to_string();
        assert!(output.starts_with("Logged 10 min on Review"));
        assert!(output.contains("- Progress: 30 / 30 min"));
        assert!(output.contains("delivered to 2 device(s)"));
        assert!(!output.contains("Milestone"));

        let output = receipt(true).to_string();
        assert!(output.contains("- Milestone complete!"));
        assert!(output.contains("- Milestone notification: no devices registered"));
    }
}
