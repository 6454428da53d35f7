//! Core library for tempo progress notifications.
//!
//! Tempo records minutes logged against tasks, clamps them to each task's
//! estimate, detects when a milestone's last task completes, and pushes
//! notifications about those events to every device a user has registered.
//!
//! # Architecture
//!
//! - [`db`]: SQLite store for tasks and push subscriptions; every mutation is
//!   a single atomic statement or IMMEDIATE transaction
//! - [`push`]: the [`PushTransport`] seam, the VAPID Web Push transport and
//!   a plaintext HTTP relay transport
//! - [`tracker`]: the async [`Tracker`] facade (progress aggregation,
//!   notification dispatch, and the log-event flow)
//! - [`models`], [`params`], [`display`]: data, operation inputs, and
//!   markdown output
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use tempo_core::{
//!     models::PushKeys,
//!     params::{LogTime, Subscribe},
//!     TrackerBuilder,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let tracker = TrackerBuilder::new()
//!     .with_database_path("tempo.db")
//!     .build()
//!     .await?;
//!
//! tracker
//!     .subscribe(&Subscribe {
//!         user_id: "u1".to_string(),
//!         endpoint: "https://push.example.com/device-1".to_string(),
//!         keys: PushKeys {
//!             p256dh: "BNcR...".to_string(),
//!             auth: "tBHI...".to_string(),
//!         },
//!     })
//!     .await?;
//!
//! let receipt = tracker
//!     .log_time(&LogTime {
//!         user_id: "u1".to_string(),
//!         task_id: "t1".to_string(),
//!         delta_mins: 15,
//!         estimate_mins: Some(60),
//!         ..Default::default()
//!     })
//!     .await?;
//! println!("{receipt}");
//! # Ok(())
//! # }
//! ```

pub mod db;
pub mod display;
pub mod error;
pub mod models;
pub mod params;
pub mod push;
pub mod tracker;

// Re-export commonly used types
pub use db::Database;
pub use error::{Result, TempoError};
pub use models::{
    LogOutcome, MilestoneProgress, Notification, PushKeys, PushPayload, Subscription, Task,
};
pub use push::{
    DeliveryOutcome, HttpPushTransport, PushTransport, VapidConfig, VapidPushTransport,
};
pub use tracker::{DispatchReport, Dispatcher, LogReceipt, Tracker, TrackerBuilder};
