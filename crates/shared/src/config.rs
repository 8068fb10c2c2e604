//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Document storage configuration.
    #[serde(default)]
    pub storage: StorageSettings,
    /// Spreadsheet import limits.
    #[serde(default)]
    pub import: ImportConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// Document storage configuration (contracts, receipts, images, invoice PDFs).
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    /// Root directory for the local filesystem store.
    #[serde(default = "default_storage_root")]
    pub root: String,
    /// Maximum accepted document size in bytes.
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            root: default_storage_root(),
            max_file_size: default_max_file_size(),
        }
    }
}

fn default_storage_root() -> String {
    "./uploads".to_string()
}

fn default_max_file_size() -> u64 {
    10 * 1024 * 1024 // 10 MB
}

/// Spreadsheet import limits.
#[derive(Debug, Clone, Deserialize)]
pub struct ImportConfig {
    /// Maximum request body size for upload endpoints, in bytes.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

fn default_max_upload_bytes() -> usize {
    20 * 1024 * 1024 // 20 MB
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("MISBOARD").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_from_environment() {
        temp_env::with_vars(
            [
                ("MISBOARD__DATABASE__URL", Some("postgres://localhost/misboard")),
                ("MISBOARD__SERVER__PORT", Some("9000")),
                ("MISBOARD__STORAGE__ROOT", Some("/tmp/misboard")),
            ],
            || {
                let config = AppConfig::load().expect("config should load");
                assert_eq!(config.database.url, "postgres://localhost/misboard");
                assert_eq!(config.server.port, 9000);
                assert_eq!(config.server.host, "0.0.0.0");
                assert_eq!(config.storage.root, "/tmp/misboard");
                assert_eq!(config.database.max_connections, 10);
                assert_eq!(config.import.max_upload_bytes, 20 * 1024 * 1024);
            },
        );
    }

    #[test]
    fn test_missing_database_url_fails() {
        temp_env::with_vars_unset(["MISBOARD__DATABASE__URL"], || {
            assert!(AppConfig::load().is_err());
        });
    }

    #[test]
    fn test_section_defaults() {
        let server = ServerConfig::default();
        assert_eq!(server.port, 5000);

        let storage = StorageSettings::default();
        assert_eq!(storage.root, "./uploads");
        assert_eq!(storage.max_file_size, 10 * 1024 * 1024);
    }
}
