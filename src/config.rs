use crate::error::HandlerError;
use crate::handler::middleware::ErrorChain;
use crate::render::TemplateEngine;
use serde::Deserialize;
use std::net::SocketAddr;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub resources: ResourcesConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ResourcesConfig {
    pub public_dir: String,
    pub template_dir: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub access_log: bool,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::with_prefix("SERVER"))
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("resources.public_dir", "public")?
            .set_default("resources.template_dir", "views")?
            .set_default("logging.access_log", true)?
            .build()?;

        settings.try_deserialize()
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

/// Everything the request dispatcher needs, built once in `main` and shared
/// by `Arc`. Replaces any ambient process-wide bindings.
pub struct AppState {
    pub config: Config,
    pub templates: TemplateEngine,
    pub error_chain: ErrorChain,
}

impl AppState {
    pub fn new(config: &Config) -> Result<Self, HandlerError> {
        let templates = TemplateEngine::from_dir(&config.resources.template_dir)?;

        Ok(Self {
            config: config.clone(),
            templates,
            error_chain: ErrorChain::default_stages(),
        })
    }
}
