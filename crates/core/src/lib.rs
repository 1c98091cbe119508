//! Portal Core Library
//!
//! Models, role gate, discussion store, list filtering, configuration and
//! client storage for the employee portal.

pub mod config;
pub mod discussions;
pub mod error;
pub mod filter;
pub mod invariants;
pub mod lists;
pub mod models;
pub mod permissions;
pub mod storage;

pub use config::{IdentityConfig, PortalConfig};
pub use discussions::DiscussionStore;
pub use error::{Error, FieldErrors, Result};
pub use filter::{ListFilter, Searchable};
pub use lists::{EntityList, Identified};
pub use models::*;
pub use permissions::*;
pub use storage::{Database, MemoryTokenStore, SqliteTokenStore, TokenStore, BEARER_TOKEN_KEY};
