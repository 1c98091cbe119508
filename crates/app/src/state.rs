//! Application state management

use std::sync::{Arc, Mutex};

use portal_core::{Database, PortalConfig, SqliteTokenStore, TokenStore, User};
use portal_net::ApiClient;
use tracing::info;

use crate::viewmodel::PageError;

/// Where the app lands on start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Dashboard,
}

/// Main application state
pub struct AppState {
    pub config: PortalConfig,
    pub api: ApiClient,
    current_user: User,
}

impl AppState {
    /// Open the client database named by `config` and build the API client
    pub fn new(config: PortalConfig) -> Result<Self, PageError> {
        let db_path = config.database_path()?;

        // Ensure parent directory exists
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(portal_core::Error::from)?;
        }

        let db = Database::open(&db_path)?;
        info!(path = %db_path.display(), "Client storage ready");
        Self::with_database(config, db)
    }

    pub fn with_database(config: PortalConfig, db: Database) -> Result<Self, PageError> {
        let db = Arc::new(Mutex::new(db));
        let tokens: Arc<dyn TokenStore> = Arc::new(SqliteTokenStore::new(db.clone()));
        let api = ApiClient::from_config(&config, tokens)?;
        let current_user = config.current_user();

        Ok(Self {
            config,
            api,
            current_user,
        })
    }

    pub fn current_user(&self) -> &User {
        &self.current_user
    }

    /// Signed-in users start on the dashboard, everyone else on the login view
    pub fn initial_route(&self) -> Result<Route, PageError> {
        if self.api.has_token()? {
            Ok(Route::Dashboard)
        } else {
            Ok(Route::Login)
        }
    }
}
