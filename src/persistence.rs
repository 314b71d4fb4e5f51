//! Saves and loads the transaction collection.
//!
//! The durable format is deliberately simple: the whole collection is
//! serialized as one JSON blob and written under a single key, replacing
//! whatever was there before. There is no versioning field; a format change
//! would require a migration path that this design does not have.

use rusqlite::Connection;

use crate::{Error, transaction::Transaction};

/// The key the transaction collection is stored under.
const SNAPSHOT_KEY: &str = "transactions";

/// Handles the persistence round-trip for the transaction collection.
///
/// Implementations store full snapshots: [SnapshotStore::save] replaces the
/// previous snapshot wholesale, there is no incremental diff or append log.
pub trait SnapshotStore {
    /// Read the saved transaction collection.
    ///
    /// Returns `Ok(None)` if nothing has been saved yet.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::CorruptData] if saved data exists
    /// but cannot be parsed as a transaction collection. Callers should treat
    /// this the same as no saved data.
    fn load(&self) -> Result<Option<Vec<Transaction>>, Error>;

    /// Serialize the full collection and write it, replacing any prior
    /// snapshot.
    ///
    /// # Errors
    ///
    /// This function will return an error if the collection could not be
    /// serialized or the storage write failed.
    fn save(&mut self, transactions: &[Transaction]) -> Result<(), Error>;
}

/// A [SnapshotStore] backed by a single-table SQLite key-value store.
pub struct SQLiteSnapshotStore {
    connection: Connection,
}

impl SQLiteSnapshotStore {
    /// Create a snapshot store on `connection`, creating the snapshot table
    /// if it does not exist.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::SqlError] if the table cannot be
    /// created.
    pub fn new(connection: Connection) -> Result<Self, Error> {
        create_snapshot_table(&connection)?;

        Ok(Self { connection })
    }
}

/// Create the snapshot table in the database.
fn create_snapshot_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS snapshot (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
                )",
        (),
    )?;

    Ok(())
}

impl SnapshotStore for SQLiteSnapshotStore {
    fn load(&self) -> Result<Option<Vec<Transaction>>, Error> {
        let blob: String = match self.connection.query_row(
            "SELECT value FROM snapshot WHERE key = ?1",
            [SNAPSHOT_KEY],
            |row| row.get(0),
        ) {
            Ok(value) => value,
            Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
            Err(error) => return Err(error.into()),
        };

        let transactions = serde_json::from_str(&blob)
            .map_err(|error| Error::CorruptData(error.to_string()))?;

        Ok(Some(transactions))
    }

    fn save(&mut self, transactions: &[Transaction]) -> Result<(), Error> {
        let blob = serde_json::to_string(transactions)
            .map_err(|error| Error::JsonSerialization(error.to_string()))?;

        self.connection.execute(
            "INSERT OR REPLACE INTO snapshot (key, value) VALUES (?1, ?2)",
            (SNAPSHOT_KEY, blob),
        )?;

        Ok(())
    }
}
