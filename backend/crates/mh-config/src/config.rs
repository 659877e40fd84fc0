use crate::{
    AuthConfig, CONFIG_DIR_ENV, CONFIG_FILE_NAME, ConfigError, ConfigErrorResult, CorsConfig,
    DEFAULT_CONFIG_DIR_NAME, LoggingConfig, ServerConfig, UiConfig, WebSocketConfig,
};

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub cors: CorsConfig,
    pub ui: UiConfig,
    pub auth: AuthConfig,
    pub websocket: WebSocketConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load config.
    ///
    /// Loading order:
    /// 1. Check for MH_CONFIG_DIR env var, else use ./.mailhub/
    /// 2. Auto-create config directory if it doesn't exist
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply MH_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join(CONFIG_FILE_NAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    /// Load and parse TOML file with detailed error context.
    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: MH_CONFIG_DIR env var > ./.mailhub/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(DEFAULT_CONFIG_DIR_NAME))
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.server.validate()?;
        self.cors.validate()?;
        self.ui.validate()?;
        self.auth.validate()?;
        self.websocket.validate()?;
        Ok(())
    }

    /// Get bind address as string.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Log configuration summary (NEVER logs secrets).
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!("  server: {}:{}", self.server.host, self.server.port);

        if self.cors.allows_all() {
            info!("  cors: all origins allowed");
        } else {
            info!("  cors: {}", self.cors.origins().join(", "));
        }

        let prefix = self.ui.route_prefix();
        info!(
            "  ui: web_path={}",
            if prefix.is_empty() { "/" } else { prefix.as_str() }
        );

        info!(
            "  auth: {}",
            match self.auth.credentials() {
                Some((user, _)) => format!("basic (user {user})"),
                None => String::from("disabled"),
            }
        );

        info!(
            "  websocket: buffer={}, heartbeat={}s/{}s, write_timeout={}s, max_message={}B, commands={}",
            self.websocket.send_buffer_size,
            self.websocket.heartbeat_interval_secs,
            self.websocket.heartbeat_timeout_secs,
            self.websocket.write_timeout_secs,
            self.websocket.max_message_size,
            self.websocket.command_buffer_size
        );

        info!(
            "  logging: {} (colored: {})",
            *self.logging.level, self.logging.colored
        );
    }

    fn apply_env_overrides(&mut self) {
        // Server
        Self::apply_env_string("MH_SERVER_HOST", &mut self.server.host);
        Self::apply_env_parse("MH_SERVER_PORT", &mut self.server.port);

        // CORS / UI / Auth
        Self::apply_env_string("MH_CORS_ORIGIN", &mut self.cors.origin);
        Self::apply_env_string("MH_UI_WEB_PATH", &mut self.ui.web_path);
        Self::apply_env_option_string("MH_AUTHORIZATION_BASIC", &mut self.auth.basic);

        // WebSocket
        Self::apply_env_parse(
            "MH_WS_SEND_BUFFER_SIZE",
            &mut self.websocket.send_buffer_size,
        );
        Self::apply_env_parse(
            "MH_WS_HEARTBEAT_INTERVAL_SECS",
            &mut self.websocket.heartbeat_interval_secs,
        );
        Self::apply_env_parse(
            "MH_WS_HEARTBEAT_TIMEOUT_SECS",
            &mut self.websocket.heartbeat_timeout_secs,
        );
        Self::apply_env_parse(
            "MH_WS_WRITE_TIMEOUT_SECS",
            &mut self.websocket.write_timeout_secs,
        );
        Self::apply_env_parse(
            "MH_WS_MAX_MESSAGE_SIZE",
            &mut self.websocket.max_message_size,
        );
        Self::apply_env_parse(
            "MH_WS_COMMAND_BUFFER_SIZE",
            &mut self.websocket.command_buffer_size,
        );

        // Logging
        Self::apply_env_parse("MH_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("MH_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("MH_LOG_FILE", &mut self.logging.file);
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values.
    /// An empty value clears the option.
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = if val.is_empty() { None } else { Some(val) };
        }
    }
}
