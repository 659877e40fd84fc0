mod auth_config;
mod config;
mod cors_config;
mod error;
mod log_level;
mod logging_config;
mod server_config;
mod ui_config;
mod websocket_config;

#[cfg(test)]
mod tests;

pub use auth_config::AuthConfig;
pub use config::Config;
pub use cors_config::CorsConfig;
pub use error::{ConfigError, ConfigErrorResult};
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use server_config::ServerConfig;
pub use ui_config::UiConfig;
pub use websocket_config::WebSocketConfig;

const CONFIG_DIR_ENV: &str = "MH_CONFIG_DIR";
const DEFAULT_CONFIG_DIR_NAME: &str = ".mailhub";
const CONFIG_FILE_NAME: &str = "config.toml";

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8025;
const MIN_PORT: u16 = 1024;

const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "log";
const DEFAULT_LOG_COLORED: bool = true;
