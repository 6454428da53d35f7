//! Data models for tasks, subscriptions and notifications.
//!
//! Display implementations for these models live in
//! [`crate::display::models`]; this module only holds the data and the small
//! predicates derived from it (task completion, milestone completion).
//!
//! # Examples
//!
//! ```rust
//! use tempo_core::models::{LogOutcome, Notification};
//!
//! let outcome = LogOutcome {
//!     task_id: "t1".to_string(),
//!     title: "Write report".to_string(),
//!     estimate_minutes: 30,
//!     logged_minutes: 20,
//!     applied_minutes: 20,
//!     milestone_just_completed: false,
//! };
//!
//! let payload = Notification::logged(&outcome, 20).to_payload();
//! assert_eq!(payload.kind, "log");
//! assert_eq!(payload.body, "Write report +20m (20 / 30m)");
//! ```

pub mod notification;
pub mod subscription;
pub mod task;


pub use notification::{Notification, PushPayload};
pub use subscription::{PushKeys, Subscription};
pub use task::{LogOutcome, MilestoneProgress, Task, TaskSeed};
