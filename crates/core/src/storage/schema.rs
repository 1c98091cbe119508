//! Client database schema
//!
//! The schema version lives in SQLite's `user_version` pragma. A fresh file
//! reads as 0 and is brought to [`SCHEMA_VERSION`]; a file written by a newer
//! client is refused rather than guessed at.

use rusqlite::Connection;
use tracing::{debug, info};

use crate::error::{Error, Result};

pub const SCHEMA_VERSION: u32 = 1;

pub fn user_version(conn: &Connection) -> Result<u32> {
    Ok(conn.query_row("PRAGMA user_version", [], |row| row.get(0))?)
}

/// Create the tables if needed and stamp the version
pub fn init_schema(conn: &Connection) -> Result<()> {
    let found = user_version(conn)?;
    if found > SCHEMA_VERSION {
        return Err(Error::InvalidOperation(format!(
            "client database has schema v{found}, this build understands up to v{SCHEMA_VERSION}"
        )));
    }
    if found == SCHEMA_VERSION {
        debug!(version = found, "Client schema up to date");
        return Ok(());
    }

    conn.execute_batch(&format!(
        r#"
        BEGIN;
        CREATE TABLE IF NOT EXISTS client_storage (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        PRAGMA user_version = {SCHEMA_VERSION};
        COMMIT;
        "#
    ))?;
    info!(from = found, to = SCHEMA_VERSION, "Client schema created");
    Ok(())
}
