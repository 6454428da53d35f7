//! Parameter structures for tempo operations.
//!
//! These structures are shared by every front end (CLI, MCP) and carry no
//! framework-specific derives beyond serde. JSON schema generation is
//! available behind the `schema` feature for the MCP layer.
//!
//! Validation happens here, before a request reaches the tracker:
//! [`LogTime::validate`], [`Subscribe::validate`] and
//! [`SendTestNotification::validate`] reject blank identifiers and
//! non-positive deltas with [`TempoError::InvalidInput`].

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    error::{Result, TempoError},
    models::{PushKeys, TaskSeed},
};

/// Parameters for registering a device's push endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct Subscribe {
    /// User that owns the device
    pub user_id: String,
    /// Push endpoint URL issued by the browser's push service
    pub endpoint: String,
    /// Encryption keys issued with the endpoint
    #[serde(default)]
    pub keys: PushKeys,
}

impl Subscribe {
    /// Reject requests without a user or endpoint.
    pub fn validate(&self) -> Result<()> {
        require_non_blank("userId", &self.user_id)?;
        require_non_blank("endpoint", &self.endpoint)
    }
}

/// Parameters for logging minutes against a task.
///
/// The optional seed fields (`task_title`, `estimate_mins`, `color`) are only
/// used the first time a task identifier is seen.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct LogTime {
    /// User whose devices receive the notifications
    pub user_id: String,
    /// Task to log against
    pub task_id: String,
    /// Milestone the task belongs to
    #[serde(default)]
    pub milestone_id: Option<String>,
    /// Goal the task belongs to
    #[serde(default)]
    pub goal_id: Option<String>,
    /// Minutes to add, must be positive
    pub delta_mins: i64,
    /// Title used when the task is first seen
    #[serde(default)]
    pub task_title: Option<String>,
    /// Estimate used when the task is first seen; values below 1 become 1
    #[serde(default)]
    pub estimate_mins: Option<i64>,
    /// Display tag used when the task is first seen
    #[serde(default)]
    pub color: Option<String>,
}

impl LogTime {
    /// Reject requests without user/task identifiers or with a non-positive
    /// delta.
    pub fn validate(&self) -> Result<()> {
        require_non_blank("userId", &self.user_id)?;
        require_non_blank("taskId", &self.task_id)?;
        if self.delta_mins <= 0 {
            return Err(TempoError::invalid_input("deltaMins").with_reason(format!(
                "must be a positive number of minutes, got {}",
                self.delta_mins
            )));
        }
        if self.delta_mins > i64::from(u32::MAX) {
            return Err(TempoError::invalid_input("deltaMins")
                .with_reason(format!("{} minutes is out of range", self.delta_mins)));
        }
        Ok(())
    }

    /// Validated delta as minutes.
    pub fn delta_minutes(&self) -> Result<u32> {
        self.validate()?;
        u32::try_from(self.delta_mins).map_err(|_| {
            TempoError::invalid_input("deltaMins").with_reason("out of range".to_string())
        })
    }

    /// Milestone identifier, with blank values treated as absent.
    pub fn milestone(&self) -> Option<&str> {
        non_blank(self.milestone_id.as_deref())
    }

    /// Goal identifier, with blank values treated as absent.
    pub fn goal(&self) -> Option<&str> {
        non_blank(self.goal_id.as_deref())
    }

    /// Normalized seed attributes for a task created by this log.
    pub fn seed(&self) -> TaskSeed {
        let estimate_minutes = self
            .estimate_mins
            .filter(|mins| *mins > 0)
            .map(|mins| u32::try_from(mins).unwrap_or(u32::MAX))
            .unwrap_or(1);

        TaskSeed {
            task_id: self.task_id.clone(),
            title: non_blank(self.task_title.as_deref())
                .unwrap_or(&self.task_id)
                .to_string(),
            color: non_blank(self.color.as_deref()).map(String::from),
            milestone_id: self.milestone().map(String::from),
            goal_id: self.goal().map(String::from),
            estimate_minutes,
        }
    }
}

/// Parameters for an operator-triggered diagnostic push.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct SendTestNotification {
    /// User whose devices receive the push
    pub user_id: String,
    /// Notification title
    #[serde(default)]
    pub title: String,
    /// Notification body
    #[serde(default)]
    pub body: String,
}

impl SendTestNotification {
    /// Reject requests without a user.
    pub fn validate(&self) -> Result<()> {
        require_non_blank("userId", &self.user_id)
    }
}

/// Parameters for operations addressing a single task.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct TaskId {
    /// The task identifier
    pub task_id: String,
}

/// Parameters for operations addressing a milestone.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct MilestoneId {
    /// The milestone identifier
    pub milestone_id: String,
}

/// Parameters for operations addressing a user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct UserId {
    /// The user identifier
    pub user_id: String,
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn require_non_blank(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(TempoError::invalid_input(field).with_reason("is required"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log_time(delta: i64) -> LogTime {
        LogTime {
            user_id: "u1".to_string(),
            task_id: "t1".to_string(),
            delta_mins: delta,
            ..Default::default()
        }
    }

    #[test]
    fn test_log_time_rejects_non_positive_delta() {
        for delta in [0, -5] {
            let err = log_time(delta).validate().unwrap_err();
            assert!(
                matches!(err, TempoError::InvalidInput { ref field, .. } if field == "deltaMins")
            );
        }
        assert!(log_time(1).validate().is_ok());
    }

    #[test]
    fn test_log_time_requires_identifiers() {
        let mut params = log_time(5);
        params.user_id = "  ".to_string();
        assert!(params.validate().is_err());

        let mut params = log_time(5);
        params.task_id = String::new();
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_seed_defaults() {
        let seed = log_time(5).seed();
        assert_eq!(seed.title, "t1");
        assert_eq!(seed.estimate_minutes, 1);
        assert_eq!(seed.milestone_id, None);
        assert_eq!(seed.color, None);
    }

    #[test]
    fn test_seed_normalizes_estimate_and_blank_fields() {
        let params = LogTime {
            task_title: Some("   ".to_string()),
            estimate_mins: Some(-10),
            milestone_id: Some(String::new()),
            goal_id: Some("g1".to_string()),
            color: Some("#ff8800".to_string()),
            ..log_time(5)
        };
        let seed = params.seed();
        assert_eq!(seed.title, "t1");
        assert_eq!(seed.estimate_minutes, 1);
        assert_eq!(seed.milestone_id, None);
        assert_eq!(seed.goal_id.as_deref(), Some("g1"));
        assert_eq!(seed.color.as_deref(), Some("#ff8800"));
    }

    #[test]
    fn test_seed_keeps_supplied_values() {
        let params = LogTime {
            task_title: Some("Write intro".to_string()),
            estimate_mins: Some(45),
            milestone_id: Some("m1".to_string()),
            ..log_time(5)
        };
        let seed = params.seed();
        assert_eq!(seed.title, "Write intro");
        assert_eq!(seed.estimate_minutes, 45);
        assert_eq!(seed.milestone_id.as_deref(), Some("m1"));
    }

    #[test]
    fn test_subscribe_validation() {
        let mut params = Subscribe {
            user_id: "u1".to_string(),
            endpoint: "https://push.example.com/abc".to_string(),
            keys: PushKeys::default(),
        };
        assert!(params.validate().is_ok());

        params.endpoint = String::new();
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_log_time_deserializes_camel_case() {
        let params: LogTime = serde_json::from_str(
            r#"{"userId":"u1","taskId":"t1","milestoneId":"m1","deltaMins":15,"estimateMins":30}"#,
        )
        .expect("Failed to parse");
        assert_eq!(params.delta_minutes().expect("valid delta"), 15);
        assert_eq!(params.milestone(), Some("m1"));
        assert_eq!(params.goal(), None);
        assert_eq!(params.seed().estimate_minutes, 30);
    }
}
