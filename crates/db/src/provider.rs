//! Process-wide owner of the single datastore connection.
//!
//! Every request shares one physical MySQL connection. It lives inside a
//! [`DbHandle`]; statements take the handle's lock in turn, so concurrent
//! inserts queue on the connection without a wait deadline. The provider
//! never surfaces connection errors from [`ConnectionProvider::acquire`]:
//! the connection is opened on first use, failures are logged, and a handle
//! whose link broke is swapped for a fresh one on the next acquire.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use sqlx::mysql::{MySqlConnectOptions, MySqlConnection};
use sqlx::Connection;
use tokio::sync::{MappedMutexGuard, MutexGuard};

use crate::config::DbConfig;
use crate::StoreError;

/// One lazily-connected MySQL connection.
///
/// A handle is never reconnected once closed; the provider replaces it.
pub struct DbHandle {
    options: MySqlConnectOptions,
    connect_timeout: Duration,
    conn: tokio::sync::Mutex<Option<MySqlConnection>>,
    closed: AtomicBool,
}

impl DbHandle {
    fn new(options: MySqlConnectOptions, connect_timeout: Duration) -> Self {
        Self {
            options,
            connect_timeout,
            conn: tokio::sync::Mutex::new(None),
            closed: AtomicBool::new(false),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Wait for exclusive use of the connection, connecting first if needed.
    ///
    /// A refused or failed connect is returned immediately; nothing retries.
    pub async fn lock(&self) -> Result<MappedMutexGuard<'_, MySqlConnection>, StoreError> {
        let mut slot = self.conn.lock().await;
        if self.is_closed() {
            return Err(StoreError::HandleClosed);
        }
        if slot.is_none() {
            *slot = Some(self.connect().await?);
        }
        MutexGuard::try_map(slot, Option::as_mut).map_err(|_| StoreError::HandleClosed)
    }

    async fn connect(&self) -> Result<MySqlConnection, StoreError> {
        let host = self.options.get_host();
        let port = self.options.get_port();
        let attempt = MySqlConnection::connect_with(&self.options);

        match tokio::time::timeout(self.connect_timeout, attempt).await {
            Ok(Ok(conn)) => {
                tracing::info!(host, port, "MySQL database connected successfully");
                Ok(conn)
            }
            Ok(Err(e)) => {
                tracing::error!(host, port, error = %e, "Database connection error");
                Err(StoreError::from(e))
            }
            Err(_) => {
                tracing::error!(host, port, "Database connection attempt timed out");
                Err(StoreError::ConnectTimeout(self.connect_timeout))
            }
        }
    }

    /// Mark closed and shut the connection down once in-flight statements
    /// release it.
    async fn close(&self) {
        self.closed.store(true, Ordering::Release);
        let conn = self.conn.lock().await.take();
        if let Some(conn) = conn {
            if let Err(e) = conn.close().await {
                tracing::debug!(error = %e, "Error closing discarded database connection");
            }
        }
    }
}

/// Lazily opens, caches and discards the shared connection handle.
///
/// All methods must be called from within a Tokio runtime.
pub struct ConnectionProvider {
    config: DbConfig,
    options: MySqlConnectOptions,
    slot: Mutex<Option<Arc<DbHandle>>>,
}

impl ConnectionProvider {
    /// Create a provider with nothing cached yet.
    pub fn new(config: DbConfig) -> Self {
        let options = config.connect_options();
        Self::with_connect_options(config, options)
    }

    /// Create a provider that connects with `options` instead of the ones
    /// derived from `config`. Timeouts still come from `config`.
    pub fn with_connect_options(config: DbConfig, options: MySqlConnectOptions) -> Self {
        Self {
            config,
            options,
            slot: Mutex::new(None),
        }
    }

    pub fn config(&self) -> &DbConfig {
        &self.config
    }

    /// Return the cached handle, opening a new one if none is cached or the
    /// cached one has been closed.
    ///
    /// A fresh handle is cached before its first connect attempt finishes;
    /// the attempt runs in the background and only logs its outcome.
    pub fn acquire(&self) -> Arc<DbHandle> {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(handle) = slot.as_ref() {
            if !handle.is_closed() {
                return Arc::clone(handle);
            }
            tracing::warn!("Cached database handle is closed, reopening");
        }

        let handle = Arc::new(DbHandle::new(self.options.clone(), self.config.connect_timeout));
        spawn_connect_attempt(Arc::clone(&handle));
        *slot = Some(Arc::clone(&handle));
        handle
    }

    /// Discard the cached handle so the next [`acquire`](Self::acquire)
    /// opens a fresh one.
    pub fn invalidate(&self) {
        let stale = self
            .slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        if let Some(handle) = stale {
            discard(handle, &self.config.host);
        }
    }

    /// Discard `failed`, leaving the cache alone if it already holds a
    /// newer handle.
    pub(crate) fn invalidate_handle(&self, failed: &Arc<DbHandle>) {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.as_ref().is_some_and(|cached| Arc::ptr_eq(cached, failed)) {
            slot.take();
        }
        drop(slot);
        discard(Arc::clone(failed), &self.config.host);
    }

    /// Whether an open handle is currently cached.
    pub fn is_cached(&self) -> bool {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|handle| !handle.is_closed())
    }

    /// Ping the server over the shared connection.
    pub async fn ping(&self) -> Result<(), StoreError> {
        let handle = self.acquire();
        let limit = self.config.query_timeout;

        let result = match handle.lock().await {
            Ok(mut conn) => match tokio::time::timeout(limit, conn.ping()).await {
                Ok(result) => result.map_err(StoreError::from),
                Err(_) => Err(StoreError::QueryTimeout(limit)),
            },
            Err(e) => Err(e),
        };

        self.discard_if_fatal(&handle, &result);
        result
    }

    /// Discard `handle` when `result` carries a fatal error.
    pub(crate) fn discard_if_fatal<T>(&self, handle: &Arc<DbHandle>, result: &Result<T, StoreError>) {
        if let Err(err) = result {
            if err.is_fatal() {
                self.invalidate_handle(handle);
            }
        }
    }
}

fn discard(handle: Arc<DbHandle>, host: &str) {
    if handle.closed.swap(true, Ordering::AcqRel) {
        return;
    }
    tracing::warn!(%host, "Discarding database handle after fatal error");
    tokio::spawn(async move { handle.close().await });
}

fn spawn_connect_attempt(handle: Arc<DbHandle>) {
    tokio::spawn(async move {
        // Success and failure are both logged by `connect`.
        let _ = handle.lock().await;
    });
}
