//! Portal Network Library
//!
//! HTTP access to the portal API.
//!
//! # Architecture
//!
//! - **Client**: [`ApiClient`] attaches the stored bearer token to every call
//! - **Endpoints**: typed wrappers for each `/api/*` resource
//! - **Wire**: lenient decoding of loosely typed server records
//! - **Cancel**: per-page cancellation scopes for in-flight loads
//!
//! # Usage
//!
//! ```ignore
//! let api = ApiClient::new("http://localhost:5001", tokens)?;
//! api.login("john.doe@tecnics.com", "secret").await?;
//!
//! let scope = CancelScope::new();
//! let tasks = scope.token().run(api.tasks()).await?;
//! ```

pub mod api;
pub mod cancel;
pub mod client;
pub mod error;
pub mod wire;

pub use cancel::{CancelHandle, CancelScope, CancelToken};
pub use client::ApiClient;
pub use error::{Error, Result};
