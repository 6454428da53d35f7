//! High-level tracker API for progress logging and push notifications.
//!
//! [`Tracker`] is the entry point front ends talk to. It coordinates the
//! SQLite store and the push transport:
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │    Handlers     │    │  Progress ops / │    │    Database     │
//! │ (log_time,      │───▶│  Registry ops / │───▶│   (via db/)     │
//! │  subscribe, ..) │    │  Dispatcher     │───▶│  PushTransport  │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Submodules
//!
//! - [`builder`]: Factory for [`Tracker`] instances
//! - [`progress`]: Progress aggregation (log minutes, read tasks/milestones)
//! - [`registry`]: Subscription registration and lookup
//! - [`dispatcher`]: Fan-out of a notification to every device of a user
//! - [`handlers`]: The log-event flow and the diagnostic push
//!
//! Every database call runs on the blocking thread pool with its own
//! connection; nothing is cached between calls.
//!
//! # Example
//!
//! ```rust,no_run
//! use tempo_core::{params::LogTime, TrackerBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let tracker = TrackerBuilder::new()
//!     .with_database_path("tempo.db")
//!     .build()
//!     .await?;
//!
//! let receipt = tracker
//!     .log_time(&LogTime {
//!         user_id: "u1".to_string(),
//!         task_id: "t1".to_string(),
//!         milestone_id: Some("m1".to_string()),
//!         delta_mins: 30,
//!         estimate_mins: Some(30),
//!         ..Default::default()
//!     })
//!     .await?;
//! assert!(receipt.outcome.milestone_just_completed);
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use tokio::task;

use crate::{
    db::Database,
    error::{Result, TempoError},
};

pub mod builder;
pub mod dispatcher;
pub mod handlers;
pub mod progress;
pub mod registry;


pub use builder::TrackerBuilder;
pub use dispatcher::{DispatchReport, Dispatcher};
pub use handlers::LogReceipt;

/// Main interface for logging progress and notifying devices.
#[derive(Clone)]
pub struct Tracker {
    pub(crate) db_path: PathBuf,
    pub(crate) dispatcher: Dispatcher,
}

impl Tracker {
    pub(crate) fn new(db_path: PathBuf, dispatcher: Dispatcher) -> Self {
        Self {
            db_path,
            dispatcher,
        }
    }

    /// The dispatcher used for all notifications sent by this tracker.
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }
}

/// Opens a connection on the blocking pool and runs `f` against it.
pub(crate) async fn with_database<T, F>(db_path: &Path, f: F) -> Result<T>
where
    F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    let db_path = db_path.to_path_buf();
    task::spawn_blocking(move || {
        let mut db = Database::new(&db_path)?;
        f(&mut db)
    })
    .await
    .map_err(|e| TempoError::Configuration {
        message: format!("Task join error: {e}"),
    })?
}
