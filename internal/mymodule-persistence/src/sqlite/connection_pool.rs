use std::collections::VecDeque;
use std::ops::Deref;
use std::sync::{Arc, Condvar, Mutex};
use std::time::Duration;

use anyhow::Context;
use thiserror::Error;

use mymodule_common::StdResult;

use crate::sqlite::SqliteConnection;

const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_millis(1000);

/// [SqliteConnectionPool] related errors.
#[derive(Error, Debug)]
pub enum ConnectionPoolError {
    /// Internal Mutex is poisoned
    #[error("Poisoned mutex caused error during acquire lock on connection pool")]
    PoisonedLock,

    /// No connection was given back in time
    #[error("Acquiring a connection has timed out after {0:?}")]
    AcquireTimeout(Duration),
}

struct PoolState {
    idle_connections: Mutex<VecDeque<SqliteConnection>>,
    connection_returned: Condvar,
}

impl PoolState {
    fn give_back(&self, connection: SqliteConnection) {
        // A poisoned pool is unusable anyway: the connection is closed instead
        if let Ok(mut idle_connections) = self.idle_connections.lock() {
            idle_connections.push_back(connection);
            self.connection_returned.notify_one();
        }
    }
}

/// Fixed size pool of SQLite connections (FIFO).
///
/// Acquired connections are owned by the returned [SqlitePooledConnection] and given back to
/// the pool when it is dropped, whatever the outcome of the work done with it.
pub struct SqliteConnectionPool {
    size: usize,
    acquire_timeout: Duration,
    state: Arc<PoolState>,
}

impl SqliteConnectionPool {
    /// Create a new pool with the given size by calling the given builder function
    pub fn build(
        size: usize,
        builder: impl Fn() -> StdResult<SqliteConnection>,
    ) -> StdResult<Self> {
        let connections = (0..size)
            .map(|_| builder())
            .collect::<StdResult<Vec<_>>>()
            .with_context(|| format!("Could not build a connection pool of size {size}"))?;

        Ok(Self::from_connections(connections))
    }

    /// Returns a single connection pool
    pub fn build_from_connection(connection: SqliteConnection) -> Self {
        Self::from_connections(vec![connection])
    }

    fn from_connections(connections: Vec<SqliteConnection>) -> Self {
        Self {
            size: connections.len(),
            acquire_timeout: DEFAULT_ACQUIRE_TIMEOUT,
            state: Arc::new(PoolState {
                idle_connections: Mutex::new(connections.into()),
                connection_returned: Condvar::new(),
            }),
        }
    }

    /// Set how long [connection][Self::connection] waits for a connection to be given back
    pub fn with_acquire_timeout(mut self, timeout: Duration) -> Self {
        self.acquire_timeout = timeout;
        self
    }

    /// Get a connection from the pool, waiting for one to be given back if none is idle
    pub fn connection(&self) -> StdResult<SqlitePooledConnection> {
        let mut idle_connections = self
            .state
            .idle_connections
            .lock()
            .map_err(|_| ConnectionPoolError::PoisonedLock)?;

        loop {
            if let Some(connection) = idle_connections.pop_front() {
                return Ok(SqlitePooledConnection {
                    state: self.state.clone(),
                    connection: Some(connection),
                });
            }

            let (guard, wait_result) = self
                .state
                .connection_returned
                .wait_timeout(idle_connections, self.acquire_timeout)
                .map_err(|_| ConnectionPoolError::PoisonedLock)?;
            if wait_result.timed_out() && guard.is_empty() {
                return Err(ConnectionPoolError::AcquireTimeout(self.acquire_timeout).into());
            }
            idle_connections = guard;
        }
    }

    /// Number of connections managed by the pool
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of connections currently available
    pub fn idle_count(&self) -> StdResult<usize> {
        let idle_connections = self
            .state
            .idle_connections
            .lock()
            .map_err(|_| ConnectionPoolError::PoisonedLock)?;

        Ok(idle_connections.len())
    }
}

/// A connection acquired from a [SqliteConnectionPool], given back to it on drop.
pub struct SqlitePooledConnection {
    state: Arc<PoolState>,
    connection: Option<SqliteConnection>,
}

impl Deref for SqlitePooledConnection {
    type Target = SqliteConnection;

    fn deref(&self) -> &Self::Target {
        // Only taken in drop
        self.connection.as_ref().unwrap()
    }
}

impl Drop for SqlitePooledConnection {
    fn drop(&mut self) {
        if let Some(connection) = self.connection.take() {
            self.state.give_back(connection);
        }
    }
}
