use crate::{ConfigError, ConfigErrorResult};

use serde::Deserialize;

#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Basic auth credentials in `username:password` form
    pub basic: Option<String>,
}

impl AuthConfig {
    pub fn enabled(&self) -> bool {
        self.basic.is_some()
    }

    /// Split credentials, `None` when auth is disabled or malformed.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        self.basic
            .as_deref()
            .and_then(|basic| basic.split_once(':'))
            .filter(|(user, _)| !user.is_empty())
    }

    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.basic.is_some() && self.credentials().is_none() {
            return Err(ConfigError::auth(
                "auth.basic must be in username:password format",
            ));
        }
        Ok(())
    }
}

// Keeps the password out of debug output.
impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("basic", &self.credentials().map(|(user, _)| user))
            .finish()
    }
}
