//! Storage traits
//!
//! The network client only needs the bearer token, so that is the one
//! seam abstracted here: SQLite-backed for the app, in-memory for tests.

use std::sync::{Arc, Mutex};

use tracing::debug;

use super::client_storage::BEARER_TOKEN_KEY;
use super::Database;
use crate::error::{Error, Result};

/// Where the bearer token lives between requests
pub trait TokenStore: Send + Sync {
    /// Current token, if one is stored
    fn token(&self) -> Result<Option<String>>;

    fn set_token(&self, token: &str) -> Result<()>;

    fn clear_token(&self) -> Result<()>;
}

/// Token persisted in the client database
#[derive(Clone)]
pub struct SqliteTokenStore {
    db: Arc<Mutex<Database>>,
}

impl SqliteTokenStore {
    pub fn new(db: Arc<Mutex<Database>>) -> Self {
        Self { db }
    }
}

impl TokenStore for SqliteTokenStore {
    fn token(&self) -> Result<Option<String>> {
        let db = self.db.lock().map_err(|_| Error::LockPoisoned)?;
        db.client_storage().get(BEARER_TOKEN_KEY)
    }

    fn set_token(&self, token: &str) -> Result<()> {
        let db = self.db.lock().map_err(|_| Error::LockPoisoned)?;
        db.client_storage().set(BEARER_TOKEN_KEY, token)?;
        debug!("Bearer token stored");
        Ok(())
    }

    fn clear_token(&self) -> Result<()> {
        let db = self.db.lock().map_err(|_| Error::LockPoisoned)?;
        db.client_storage().remove(BEARER_TOKEN_KEY)?;
        debug!("Bearer token cleared");
        Ok(())
    }
}

/// Token held only for the life of the process
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn token(&self) -> Result<Option<String>> {
        Ok(self.token.lock().map_err(|_| Error::LockPoisoned)?.clone())
    }

    fn set_token(&self, token: &str) -> Result<()> {
        *self.token.lock().map_err(|_| Error::LockPoisoned)? = Some(token.to_string());
        Ok(())
    }

    fn clear_token(&self) -> Result<()> {
        *self.token.lock().map_err(|_| Error::LockPoisoned)? = None;
        Ok(())
    }
}
