//! Client configuration
//!
//! Read from `portal.toml` in the platform config directory unless a path
//! is given explicitly. Every key is optional.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::{Error, Result};
use crate::models::User;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5001";
pub const CONFIG_FILE_NAME: &str = "portal.toml";
pub const DATABASE_FILE_NAME: &str = "portal.db";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortalConfig {
    pub api_base_url: String,
    /// Seconds before a request is abandoned; unset waits indefinitely
    pub request_timeout_secs: Option<u64>,
    /// Overrides the platform data directory
    pub data_dir: Option<PathBuf>,
    pub identity: IdentityConfig,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: None,
            data_dir: None,
            identity: IdentityConfig::default(),
        }
    }
}

/// Overrides for the signed-in user record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentityConfig {
    pub id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub department: Option<String>,
}

impl IdentityConfig {
    /// The default user with any configured fields swapped in
    pub fn resolve(&self) -> User {
        let mut user = User::default();
        let overrides = [
            (&mut user.id, &self.id),
            (&mut user.name, &self.name),
            (&mut user.email, &self.email),
            (&mut user.role, &self.role),
            (&mut user.department, &self.department),
        ];
        for (field, value) in overrides {
            if let Some(value) = value {
                *field = value.clone();
            }
        }
        user
    }
}

impl PortalConfig {
    /// Load from `path`, or from the platform location when `None`.
    /// A missing file yields defaults; a malformed one is an error.
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::default_path()?,
        };

        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| Error::Config(format!("invalid config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let base = self.api_base_url.trim();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(Error::Config(format!(
                "api_base_url must be an http(s) URL, got {base:?}"
            )));
        }
        if self.request_timeout_secs == Some(0) {
            return Err(Error::Config("request_timeout_secs must be positive".into()));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    pub fn current_user(&self) -> User {
        self.identity.resolve()
    }

    /// Directory holding the client database
    pub fn data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(project_dirs()?.data_dir().to_path_buf()),
        }
    }

    pub fn database_path(&self) -> Result<PathBuf> {
        Ok(self.data_dir()?.join(DATABASE_FILE_NAME))
    }

    pub fn default_path() -> Result<PathBuf> {
        Ok(project_dirs()?.config_dir().join(CONFIG_FILE_NAME))
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("com", "tecnics", "portal").ok_or_else(|| {
        Error::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine config directory",
        ))
    })
}
