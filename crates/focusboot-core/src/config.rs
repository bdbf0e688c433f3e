//! Bootstrap configuration
//!
//! Values come from the environment by default and can be overridden by the
//! builder methods (the CLI maps its flags onto these).

use serde::{Deserialize, Serialize};

/// Default mount identifier in the host document.
pub const DEFAULT_MOUNT_ID: &str = "root";

/// Default origin serving the override document.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Bootstrap configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BootConfig {
    /// Origin the override document is requested from
    pub base_url: String,
    /// Identifier of the element the runtime attaches to
    pub mount_id: String,
    /// User agent sent with the override request
    pub user_agent: String,
}

impl Default for BootConfig {
    fn default() -> Self {
        BootConfig {
            base_url: std::env::var("FOCUSBOOT_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            mount_id: std::env::var("FOCUSBOOT_MOUNT_ID")
                .unwrap_or_else(|_| DEFAULT_MOUNT_ID.to_string()),
            user_agent: format!("focusboot/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl BootConfig {
    /// Create a new config from environment variables
    pub fn from_env() -> Self {
        Self::default()
    }

    /// Create config for a specific origin
    pub fn new(base_url: &str) -> Self {
        BootConfig {
            base_url: base_url.to_string(),
            mount_id: DEFAULT_MOUNT_ID.to_string(),
            user_agent: format!("focusboot/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Set the mount identifier
    pub fn with_mount_id(mut self, mount_id: &str) -> Self {
        self.mount_id = mount_id.to_string();
        self
    }

    /// Set the base URL
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }
}
