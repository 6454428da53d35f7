//! Builder for creating and configuring Tracker instances.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use log::{debug, info};
use tokio::task;

use super::{Dispatcher, Tracker};
use crate::{
    db::Database,
    error::{Result, TempoError},
    push::{
        http::DEFAULT_TTL, HttpPushTransport, PushTransport, VapidConfig, VapidPushTransport,
    },
};

/// Default upper bound for a single delivery attempt.
pub const DEFAULT_DELIVERY_TIMEOUT: Duration = Duration::from_secs(10);

/// Builder for creating and configuring Tracker instances.
#[derive(Clone)]
pub struct TrackerBuilder {
    database_path: Option<PathBuf>,
    transport: Option<Arc<dyn PushTransport>>,
    vapid: Option<VapidConfig>,
    delivery_timeout: Duration,
    push_ttl: Duration,
}

impl TrackerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            database_path: None,
            transport: None,
            vapid: None,
            delivery_timeout: DEFAULT_DELIVERY_TIMEOUT,
            push_ttl: DEFAULT_TTL,
        }
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/tempo/tempo.db` or `~/.local/share/tempo/tempo.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.database_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Delivers through Web Push signed with this VAPID identity.
    ///
    /// Without it the tracker posts plaintext payloads, which only a relay
    /// gateway accepts.
    pub fn with_vapid(mut self, vapid: VapidConfig) -> Self {
        self.vapid = Some(vapid);
        self
    }

    /// Replaces the built-in push transport. Takes precedence over
    /// [`TrackerBuilder::with_vapid`].
    pub fn with_transport(mut self, transport: Arc<dyn PushTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Bounds how long one delivery attempt may take before it counts as a
    /// transient failure.
    pub fn with_delivery_timeout(mut self, timeout: Duration) -> Self {
        self.delivery_timeout = timeout;
        self
    }

    /// Sets the TTL the built-in transports ask push services to honor.
    /// Ignored when a custom transport is supplied.
    pub fn with_push_ttl(mut self, ttl: Duration) -> Self {
        self.push_ttl = ttl;
        self
    }

    /// Builds the configured tracker instance.
    ///
    /// # Errors
    ///
    /// Returns `TempoError::FileSystem` if the database directory cannot be
    /// created, `TempoError::Database` if schema initialization fails and
    /// `TempoError::Configuration` if the VAPID key is invalid or the HTTP
    /// client cannot be built.
    pub async fn build(self) -> Result<Tracker> {
        let db_path = match self.database_path {
            Some(path) => path,
            None => Self::default_database_path()?,
        };

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| TempoError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let db_path_clone = db_path.clone();
        task::spawn_blocking(move || {
            let _db = Database::new(&db_path_clone)?;
            Ok::<(), TempoError>(())
        })
        .await
        .map_err(|e| TempoError::Configuration {
            message: format!("Task join error: {e}"),
        })??;

        let transport: Arc<dyn PushTransport> = match (self.transport, self.vapid) {
            (Some(transport), _) => transport,
            (None, Some(vapid)) => Arc::new(VapidPushTransport::new(vapid, self.push_ttl)?),
            (None, None) => {
                info!("no VAPID key configured, pushing plaintext payloads for a relay");
                Arc::new(HttpPushTransport::new(self.push_ttl)?)
            }
        };

        debug!(
            "tracker ready: database={}, delivery_timeout={:?}",
            db_path.display(),
            self.delivery_timeout
        );

        let dispatcher = Dispatcher::new(db_path.clone(), transport, self.delivery_timeout);
        Ok(Tracker::new(db_path, dispatcher))
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("tempo")
            .place_data_file("tempo.db")
            .map_err(|e| TempoError::XdgDirectory(e.to_string()))
    }
}

impl Default for TrackerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
