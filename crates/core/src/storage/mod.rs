//! SQLite storage layer for the portal client

mod client_storage;
mod schema;
mod traits;

use rusqlite::Connection;
use std::path::Path;
use tracing::instrument;

use crate::error::Result;

pub use client_storage::{ClientStorage, BEARER_TOKEN_KEY};
pub use schema::SCHEMA_VERSION;
pub use traits::{MemoryTokenStore, SqliteTokenStore, TokenStore};

/// Main database handle
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create database at the given path
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::init(Connection::open(path)?)
    }

    /// Open in-memory database (for testing)
    #[instrument]
    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        schema::init_schema(&conn)?;
        Ok(Self { conn })
    }

    pub fn schema_version(&self) -> Result<u32> {
        schema::user_version(&self.conn)
    }

    pub fn client_storage(&self) -> ClientStorage<'_> {
        ClientStorage::new(&self.conn)
    }
}
