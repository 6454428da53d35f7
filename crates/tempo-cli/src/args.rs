//! Command-line arguments.
//!
//! Every subcommand has an argument struct with clap derives and a `From`
//! conversion into the matching `tempo_core::params` type, so clap concerns
//! stay out of the core crate.

use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};
use tempo_core::{models::PushKeys, params::*};

/// Tempo: task progress logging with push notifications
///
/// Logs minutes against tasks, tracks milestone completion and notifies the
/// devices a user registered. Runs either as a one-shot CLI or as an MCP
/// server on stdio.
#[derive(Parser)]
#[command(version, about, name = "tempo")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/tempo/tempo.db
    #[arg(long, global = true, env = "TEMPO_DATABASE_FILE")]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Seconds a single push delivery may take before it counts as failed
    #[arg(long, global = true, env = "TEMPO_PUSH_TIMEOUT_SECS", default_value_t = 10)]
    pub push_timeout_secs: u64,

    /// Seconds push services should keep an undelivered notification
    #[arg(long, global = true, env = "TEMPO_PUSH_TTL_SECS", default_value_t = 30)]
    pub push_ttl_secs: u64,

    /// VAPID private key (raw P-256, base64url) used to sign and encrypt Web
    /// Push messages. Without it payloads are posted in plaintext to a relay
    #[arg(
        long,
        global = true,
        env = "TEMPO_VAPID_PRIVATE_KEY",
        hide_env_values = true,
        requires = "vapid_subject"
    )]
    pub vapid_private_key: Option<String>,

    /// Contact URI sent with VAPID signatures, such as mailto:ops@example.com
    #[arg(long, global = true, env = "TEMPO_VAPID_SUBJECT")]
    pub vapid_subject: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Register a device push endpoint for a user
    #[command(alias = "sub")]
    Subscribe(SubscribeArgs),
    /// Log minutes against a task and notify the user's devices
    #[command(alias = "l")]
    Log(LogArgs),
    /// Send a diagnostic push to every device of a user
    TestPush(TestPushArgs),
    /// Inspect tasks
    #[command(alias = "t")]
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },
    /// Inspect milestones
    #[command(alias = "m")]
    Milestone {
        #[command(subcommand)]
        command: MilestoneCommands,
    },
    /// Inspect push subscriptions
    Subscriptions {
        #[command(subcommand)]
        command: SubscriptionCommands,
    },
    /// Start the MCP server on stdio
    Serve,
}

#[derive(ClapArgs)]
pub struct SubscribeArgs {
    /// User that owns the device
    pub user_id: String,
    /// Push endpoint URL issued by the browser
    pub endpoint: String,
    /// Device public key (base64url)
    #[arg(long)]
    pub p256dh: String,
    /// Device authentication secret (base64url)
    #[arg(long)]
    pub auth: String,
}

impl From<SubscribeArgs> for Subscribe {
    fn from(val: SubscribeArgs) -> Self {
        Subscribe {
            user_id: val.user_id,
            endpoint: val.endpoint,
            keys: PushKeys {
                p256dh: val.p256dh,
                auth: val.auth,
            },
        }
    }
}

#[derive(ClapArgs)]
pub struct LogArgs {
    /// User whose devices are notified
    pub user_id: String,
    /// Task to log against
    pub task_id: String,
    /// Minutes to add
    #[arg(short, long, allow_negative_numbers = true)]
    pub minutes: i64,
    /// Milestone the task belongs to
    #[arg(long)]
    pub milestone: Option<String>,
    /// Goal the task belongs to
    #[arg(long)]
    pub goal: Option<String>,
    /// Title for a task that has not been seen before
    #[arg(long)]
    pub title: Option<String>,
    /// Estimate in minutes for a task that has not been seen before
    #[arg(short, long, allow_negative_numbers = true)]
    pub estimate: Option<i64>,
    /// Display color for a task that has not been seen before
    #[arg(long)]
    pub color: Option<String>,
}

impl From<LogArgs> for LogTime {
    fn from(val: LogArgs) -> Self {
        LogTime {
            user_id: val.user_id,
            task_id: val.task_id,
            milestone_id: val.milestone,
            goal_id: val.goal,
            delta_mins: val.minutes,
            task_title: val.title,
            estimate_mins: val.estimate,
            color: val.color,
        }
    }
}

#[derive(ClapArgs)]
pub struct TestPushArgs {
    /// User whose devices receive the push
    pub user_id: String,
    /// Notification title
    #[arg(long, default_value = "Tempo Calendar")]
    pub title: String,
    /// Notification body
    #[arg(long, default_value = "Test notification")]
    pub body: String,
}

impl From<TestPushArgs> for SendTestNotification {
    fn from(val: TestPushArgs) -> Self {
        SendTestNotification {
            user_id: val.user_id,
            title: val.title,
            body: val.body,
        }
    }
}

#[derive(Subcommand)]
pub enum TaskCommands {
    /// Show a task's progress
    #[command(alias = "s")]
    Show {
        /// Task identifier
        task_id: String,
    },
}

#[derive(Subcommand)]
pub enum MilestoneCommands {
    /// Show how many tasks of a milestone are complete
    #[command(alias = "s")]
    Show {
        /// Milestone identifier
        milestone_id: String,
    },
}

#[derive(Subcommand)]
pub enum SubscriptionCommands {
    /// List the push endpoints of a user
    #[command(aliases = ["l", "ls"])]
    List {
        /// User identifier
        user_id: String,
    },
}
