use std::path::Path;
use std::sync::Arc;

use rusqlite::{types::ToSql, Connection, OpenFlags};

use super::{GraphStore, Row, Value};
use crate::error::{RecoError, Result};

/// SQLite-backed graph store
///
/// Opened read-only: the engine never writes, migrates, or manages the
/// schema of the store it reads from.
#[derive(Debug)]
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open an existing database file read-only
    #[tracing::instrument(skip(path), fields(path = %path.display()))]
    pub fn open(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(RecoError::StoreUnavailable {
                path: path.to_path_buf(),
                reason: "no such file".to_string(),
            });
        }

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| RecoError::StoreUnavailable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        Ok(Self { conn })
    }

    /// Wrap an already configured connection (in-memory databases, tests)
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }
}

impl GraphStore for SqliteStore {
    fn query(&self, statement: &str, params: &[(&str, Value)]) -> Result<Vec<Row>> {
        let mut stmt = self.conn.prepare(statement)?;
        let columns: Arc<[String]> = stmt
            .column_names()
            .into_iter()
            .map(str::to_string)
            .collect();
        let width = columns.len();

        let named: Vec<(&str, &dyn ToSql)> = params
            .iter()
            .map(|(name, value)| (*name, value as &dyn ToSql))
            .collect();

        let rows = stmt
            .query_map(named.as_slice(), |row| {
                (0..width)
                    .map(|i| row.get_ref(i).map(Value::from))
                    .collect::<rusqlite::Result<Vec<Value>>>()
            })?
            .map(|values| values.map(|v| Row::new(Arc::clone(&columns), v)))
            .collect::<rusqlite::Result<Vec<Row>>>()?;

        tracing::trace!(rows = rows.len(), "store query");
        Ok(rows)
    }
}
