use mh_config::{Config, LogLevel};

use clap::Parser;

/// Command-line overrides, applied after config.toml and MH_* variables
#[derive(Parser, Debug, Default)]
#[command(name = "mh-server")]
#[command(about = "Real-time event broadcast hub")]
#[command(version)]
pub struct Cli {
    /// Interface to bind
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on (0 picks a free port)
    #[arg(long)]
    pub port: Option<u16>,

    /// Comma-separated origins allowed to subscribe; empty allows all
    #[arg(long)]
    pub cors_origin: Option<String>,

    /// Path prefix for the UI and its API, e.g. "mailhub"
    #[arg(long)]
    pub ui_web_path: Option<String>,

    /// Basic auth credentials as username:password
    #[arg(long)]
    pub auth_basic: Option<String>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log to this file under the config's log directory instead of stdout
    #[arg(long)]
    pub log_file: Option<String>,
}

impl Cli {
    /// Overwrite every config value given on the command line.
    pub fn apply(&self, config: &mut Config) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(origin) = &self.cors_origin {
            config.cors.origin = origin.clone();
        }
        if let Some(web_path) = &self.ui_web_path {
            config.ui.web_path = web_path.clone();
        }
        if let Some(basic) = &self.auth_basic {
            config.auth.basic = Some(basic.clone()).filter(|basic| !basic.is_empty());
        }
        if let Some(level) = &self.log_level
            && let Ok(level) = level.parse::<LogLevel>()
        {
            config.logging.level = level;
        }
        if let Some(file) = &self.log_file {
            config.logging.file = Some(file.clone());
        }
    }
}
