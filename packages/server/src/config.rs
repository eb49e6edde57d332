use common::StorageAppConfig;
use config::{Config, ConfigError, Environment, File};
use intelligence::LlmConfig;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    pub allow_origins: Vec<String>,
    pub max_age: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors: CorsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub storage: StorageAppConfig,
    #[serde(default)]
    pub llm: LlmConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("PDFSHELF_CONFIG").unwrap_or_else(|_| "config/config".into());

        let s = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8000)?
            .set_default("server.cors.allow_origins", vec!["*"])?
            .set_default("server.cors.max_age", 3600)?
            .set_default("database.max_connections", 20)?
            .set_default("database.min_connections", 1)?
            // Load from config/config.toml
            .add_source(File::with_name(&path).required(false))
            // Override from environment (e.g., PDFSHELF__DATABASE__URL)
            .add_source(
                Environment::with_prefix("PDFSHELF")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.cors.allow_origins")
                    .try_parsing(true),
            )
            // Conventional deployment variables win over everything else.
            .set_override_option("database.url", env("DATABASE_URL"))?
            .set_override_option("storage.cloudinary.cloud_name", env("CLOUDINARY_CLOUD_NAME"))?
            .set_override_option("storage.cloudinary.api_key", env("CLOUDINARY_API_KEY"))?
            .set_override_option("storage.cloudinary.api_secret", env("CLOUDINARY_API_SECRET"))?
            .set_override_option("llm.api_key", env("GOOGLE_API_KEY"))?
            .build()?;

        s.try_deserialize()
    }
}

fn env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}
