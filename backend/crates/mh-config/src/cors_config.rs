use crate::{ConfigError, ConfigErrorResult};

use serde::Deserialize;

/// Origins allowed to open a subscriber connection.
///
/// `origin` is a comma-separated allow-list. Empty or `*` means every origin is allowed.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    pub origin: String,
}

impl CorsConfig {
    /// Trimmed, non-empty entries of the allow-list.
    pub fn origins(&self) -> Vec<&str> {
        self.origin
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .collect()
    }

    /// True for an empty list or one containing a `*` entry.
    pub fn allows_all(&self) -> bool {
        let origins = self.origins();
        origins.is_empty() || origins.contains(&"*")
    }

    pub fn validate(&self) -> ConfigErrorResult<()> {
        for origin in self.origins() {
            if origin != "*" && !origin.contains("://") {
                return Err(ConfigError::cors(format!(
                    "cors.origin entries must be full origins like https://host, got '{origin}'"
                )));
            }
        }
        Ok(())
    }
}
