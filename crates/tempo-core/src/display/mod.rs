//! Markdown formatting for tracker results.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]);
//! collections and operation results get small wrapper types so the CLI and
//! the MCP server print identical text.
//!
//! - [`collections`]: [`Subscriptions`]
//! - [`results`]: Display for [`crate::tracker::LogReceipt`] and
//!   [`crate::tracker::DispatchReport`]
//! - [`status`]: [`Confirmation`] one-line messages
//! - [`datetime`]: [`LocalDateTime`] timestamp formatting
//!
//! ```rust
//! use tempo_core::{display::Confirmation, DispatchReport};
//!
//! let report = DispatchReport::Skipped;
//! assert_eq!(
//!     Confirmation::TestPush(&report).to_string(),
//!     "Success: Test notification no devices registered\n"
//! );
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod status;

pub use collections::Subscriptions;
pub use datetime::LocalDateTime;
pub use status::Confirmation;
