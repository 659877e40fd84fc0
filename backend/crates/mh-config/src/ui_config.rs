use crate::{ConfigError, ConfigErrorResult};

use serde::Deserialize;

/// Path prefix under which the UI and its API are served.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Given without leading or trailing slashes, e.g. `mailhub`
    pub web_path: String,
}

impl UiConfig {
    /// The prefix as mounted on the router: leading slash, no trailing slash,
    /// empty when the UI is served from the root.
    pub fn route_prefix(&self) -> String {
        let trimmed = self.web_path.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return String::new();
        }
        if trimmed.starts_with('/') {
            trimmed.to_string()
        } else {
            format!("/{trimmed}")
        }
    }

    pub fn validate(&self) -> ConfigErrorResult<()> {
        let prefix = self.route_prefix();
        if prefix.contains("//") || prefix.contains(char::is_whitespace) {
            return Err(ConfigError::ui(format!(
                "ui.web_path must be a plain path segment list, got '{}'",
                self.web_path
            )));
        }
        Ok(())
    }
}
