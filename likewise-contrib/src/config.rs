//! Configuration for the contribution view.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration for the contribution view pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewConfig {
    /// Where an unauthenticated caller is sent
    pub sign_in_path: String,
    /// Where back-navigation lands
    pub dashboard_path: String,
    /// Timeout for storage retrievals (seconds)
    pub request_timeout_secs: u64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            sign_in_path: "/auth".to_string(),
            dashboard_path: "/dashboard".to_string(),
            request_timeout_secs: 30,
        }
    }
}

impl ViewConfig {
    /// Timeout for storage retrievals.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Load config from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}
