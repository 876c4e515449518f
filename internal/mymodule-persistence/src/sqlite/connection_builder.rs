use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use slog::{Logger, debug};
use sqlite::{Connection, OpenFlags};

use mymodule_common::StdResult;
use mymodule_common::logging::LoggerExtensions;

use crate::sqlite::SqliteConnection;

/// Time a connection waits for a lock held by another connection before failing
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Builder of SQLite connection
pub struct ConnectionBuilder {
    connection_path: PathBuf,
    options: HashSet<ConnectionOptions>,
    busy_timeout: Duration,
    logger: Logger,
}

/// Options to apply to the connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectionOptions {
    /// Enable Write Ahead Log journal mode
    EnableWriteAheadLog,

    /// Enable foreign keys support
    EnableForeignKeys,

    /// Disable foreign keys support, even if [ConnectionOptions::EnableForeignKeys] is set
    ForceDisableForeignKeys,
}

impl ConnectionBuilder {
    /// Builder of file SQLite connection
    pub fn open_file(path: &Path) -> Self {
        Self {
            connection_path: path.to_path_buf(),
            options: HashSet::new(),
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
            logger: Logger::root(slog::Discard, slog::o!()),
        }
    }

    /// Builder of in memory SQLite connection
    pub fn open_memory() -> Self {
        Self::open_file(Path::new(":memory:"))
    }

    /// Set the options to apply to the connection
    pub fn with_options(mut self, options: &[ConnectionOptions]) -> Self {
        self.options.extend(options.iter().copied());
        self
    }

    /// Set how long the connection waits for a lock held by another connection
    pub fn with_busy_timeout(mut self, busy_timeout: Duration) -> Self {
        self.busy_timeout = busy_timeout;
        self
    }

    /// Set the logger to use
    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = logger.new_with_component_name::<Self>();
        self
    }

    /// Open the connection and apply the options
    pub fn build(self) -> StdResult<SqliteConnection> {
        debug!(self.logger, "Opening SQLite connection"; "path" => %self.connection_path.display(), "options" => ?self.options);

        let connection = Connection::open_thread_safe_with_flags(
            &self.connection_path,
            OpenFlags::new().with_create().with_read_write().with_full_mutex(),
        )
        .with_context(|| {
            format!("SQLite initialization: could not open connection with string '{}'", self.connection_path.display())
        })?;

        connection
            .execute(format!("pragma busy_timeout = {};", self.busy_timeout.as_millis()))
            .with_context(|| "SQLite initialization: could not set the busy timeout")?;

        if self.options.contains(&ConnectionOptions::EnableWriteAheadLog) {
            connection
                .execute("pragma journal_mode = wal; pragma synchronous = normal;")
                .with_context(|| "SQLite initialization: could not enable WAL")?;
        }

        let enable_foreign_keys = self.options.contains(&ConnectionOptions::EnableForeignKeys)
            && !self.options.contains(&ConnectionOptions::ForceDisableForeignKeys);
        if enable_foreign_keys {
            connection
                .execute("pragma foreign_keys = true;")
                .with_context(|| "SQLite initialization: could not enable foreign keys")?;
        }

        Ok(connection)
    }
}
