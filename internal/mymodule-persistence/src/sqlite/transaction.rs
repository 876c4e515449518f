use crate::sqlite::SqliteConnection;

/// Sqlite transaction wrapper.
///
/// Transactions are automatically rolled back if this struct object is dropped and
/// the transaction was not committed.
pub struct Transaction<'a> {
    connection: &'a SqliteConnection,
    // Neither committed nor rolled back yet
    is_active: bool,
}

impl<'a> Transaction<'a> {
    /// Begin a new transaction.
    pub fn begin(connection: &'a SqliteConnection) -> Result<Self, sqlite::Error> {
        connection.execute("begin transaction")?;

        Ok(Self {
            connection,
            is_active: true,
        })
    }

    /// Begin a new transaction taking the write lock right away.
    ///
    /// Use it when the transaction reads before it writes: a deferred transaction can not be
    /// upgraded to a write once another connection committed.
    pub fn begin_immediate(connection: &'a SqliteConnection) -> Result<Self, sqlite::Error> {
        connection.execute("begin immediate transaction")?;

        Ok(Self {
            connection,
            is_active: true,
        })
    }

    /// Commit the transaction.
    pub fn commit(mut self) -> Result<(), sqlite::Error> {
        self.is_active = false;
        self.connection.execute("commit transaction")
    }

    /// Rollback the transaction.
    pub fn rollback(mut self) -> Result<(), sqlite::Error> {
        self.is_active = false;
        self.connection.execute("rollback transaction")
    }
}

impl Drop for Transaction<'_> {
    fn drop(&mut self) {
        if self.is_active {
            // The connection may already have left the transaction (ie: failed commit)
            let _ = self.connection.execute("rollback transaction");
        }
    }
}
