use config::{Config, ConfigError, Environment, File, FileFormat, Source};
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Settings {
    #[serde(default)]
    pub web: WebConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub log_format: LogFormat,
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Plain,
    Json,
}

/// The server-rendered UI.
#[derive(Debug, Deserialize, Clone)]
pub struct WebConfig {
    #[serde(default = "default_web_port")]
    pub port: u16,
    /// Base URL of the service exposing `/foodtrucks`.
    #[serde(default = "default_backend_host")]
    pub backend_host: String,
    #[serde(default = "default_fetch_retries")]
    pub fetch_retries: u32,
    #[serde(default = "default_retry_base_delay_ms")]
    pub retry_base_delay_ms: u64,
    #[serde(default = "default_fetch_timeout_ms")]
    pub fetch_timeout_ms: u64,
}

/// The `/foodtrucks` JSON service.
#[derive(Debug, Deserialize, Clone)]
pub struct CatalogConfig {
    #[serde(default = "default_catalog_port")]
    pub port: u16,
    #[serde(default = "default_data_path")]
    pub data_path: String,
    /// Comma-separated list of origins allowed by CORS.
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            port: default_web_port(),
            backend_host: default_backend_host(),
            fetch_retries: default_fetch_retries(),
            retry_base_delay_ms: default_retry_base_delay_ms(),
            fetch_timeout_ms: default_fetch_timeout_ms(),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            port: default_catalog_port(),
            data_path: default_data_path(),
            allowed_origins: default_allowed_origins(),
        }
    }
}

impl CatalogConfig {
    pub fn origins(&self) -> Vec<String> {
        self.allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect()
    }
}

fn default_web_port() -> u16 {
    3000
}

fn default_backend_host() -> String {
    "http://localhost:8000".to_string()
}

fn default_fetch_retries() -> u32 {
    2
}

fn default_retry_base_delay_ms() -> u64 {
    100
}

fn default_fetch_timeout_ms() -> u64 {
    5000
}

fn default_catalog_port() -> u16 {
    8000
}

fn default_data_path() -> String {
    "catalog/data/Mobile_Food_Facility_Permit.csv".to_string()
}

fn default_allowed_origins() -> String {
    "http://localhost:3000".to_string()
}

impl Settings {
    pub fn new(path: &str) -> Result<Self, ConfigError> {
        Self::from_source(File::with_name(path))
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Self::from_source(File::from_str(contents, FileFormat::Toml))
    }

    fn from_source<S>(file: S) -> Result<Self, ConfigError>
    where
        S: Source + Send + Sync + 'static,
    {
        let builder = Config::builder().add_source(file).add_source(
            Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        );

        let config = builder.build()?;
        let settings: Settings = config.try_deserialize()?;

        debug!(
            web_port = settings.web.port,
            backend_host = %settings.web.backend_host,
            catalog_port = settings.catalog.port,
            "Loaded settings"
        );

        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_falls_back_to_defaults() {
        let settings = Settings::from_toml("").unwrap();
        assert_eq!(settings.web.port, 3000);
        assert_eq!(settings.web.backend_host, "http://localhost:8000");
        assert_eq!(settings.catalog.port, 8000);
        assert_eq!(settings.log_format, LogFormat::Plain);
    }

    #[test]
    fn sections_override_defaults() {
        let settings = Settings::from_toml(
            r#"
            log_format = "json"

            [web]
            port = 8080
            backend_host = "http://catalog:8000"

            [catalog]
            allowed_origins = "http://a.test, http://b.test,"
            "#,
        )
        .unwrap();

        assert_eq!(settings.web.port, 8080);
        assert_eq!(settings.web.backend_host, "http://catalog:8000");
        assert_eq!(settings.web.fetch_retries, 2);
        assert_eq!(settings.log_format, LogFormat::Json);
        assert_eq!(
            settings.catalog.origins(),
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
    }
}
