//! Client key/value storage
//!
//! Small string values that survive restarts, such as the bearer token.

use chrono::Utc;
use rusqlite::{params, Connection};

use crate::error::Result;

/// Key the bearer token is kept under
pub const BEARER_TOKEN_KEY: &str = "bearerToken";

pub struct ClientStorage<'a> {
    conn: &'a Connection,
}

impl<'a> ClientStorage<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let result = self.conn.query_row(
            "SELECT value FROM client_storage WHERE key = ?1",
            params![key],
            |row| row.get(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO client_storage (key, value, updated_at)
             VALUES (?1, ?2, ?3)",
            params![key, value, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    /// Returns whether a value was removed
    pub fn remove(&self, key: &str) -> Result<bool> {
        let removed = self
            .conn
            .execute("DELETE FROM client_storage WHERE key = ?1", params![key])?;
        Ok(removed > 0)
    }
}
