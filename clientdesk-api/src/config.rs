use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ApiConfig {
    pub cors: Option<CorsConfig>,
    pub server: Option<ServerConfig>,
    pub database: Option<DatabaseConfig>,
    pub auth: Option<AuthConfig>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            cors: Some(CorsConfig {
                allowed_origins: vec!["http://localhost:3000".to_string()],
            }),
            server: Some(ServerConfig::default()),
            database: None,
            auth: Some(AuthConfig::default()),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct DatabaseConfig {
    /// Overrides the platform data directory
    pub path: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AuthConfig {
    pub session_ttl_hours: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_ttl_hours: 24,
        }
    }
}

const MIN_SESSION_TTL_HOURS: i64 = 1;
const MAX_SESSION_TTL_HOURS: i64 = 24 * 365;

const DEFAULT_CONFIG: &str = r#"
[cors]
allowed_origins = ["http://localhost:3000"]

[server]
host = "127.0.0.1"
port = 8080

[database]
# Defaults to the platform data directory
# path = "/var/lib/clientdesk/clientdesk.db"

[auth]
session_ttl_hours = 24
"#;

impl ApiConfig {
    pub fn load() -> Result<(Self, PathBuf), ConfigError> {
        let config_path = get_config_path();
        let config = Self::load_from(&config_path)?;
        Ok((config, config_path))
    }

    /// Load the config at `config_path`, writing the default file first if it is missing
    pub fn load_from(config_path: &Path) -> Result<Self, ConfigError> {
        // Create config directory if it doesn't exist
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ConfigError::Message(format!("Failed to create config directory: {e}"))
            })?;
        }

        if !config_path.exists() {
            std::fs::write(config_path, DEFAULT_CONFIG).map_err(|e| {
                ConfigError::Message(format!("Failed to write default config: {e}"))
            })?;
        }

        let builder = Config::builder()
            .add_source(File::from(config_path.to_path_buf()))
            .build()?;

        builder.try_deserialize()
    }

    pub fn server(&self) -> ServerConfig {
        self.server.clone().unwrap_or_default()
    }

    pub fn session_ttl(&self) -> chrono::Duration {
        let hours = self
            .auth
            .as_ref()
            .map(|auth| auth.session_ttl_hours)
            .unwrap_or_else(|| AuthConfig::default().session_ttl_hours);
        chrono::Duration::hours(hours.clamp(MIN_SESSION_TTL_HOURS, MAX_SESSION_TTL_HOURS))
    }
}

pub fn get_config_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        config_dir.join("clientdesk").join("api.toml")
    } else {
        PathBuf::from("api.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gets_defaults_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("conf").join("api.toml");

        let config = ApiConfig::load_from(&path).unwrap();
        assert!(path.exists());

        let server = config.server();
        assert_eq!(server.host, "127.0.0.1");
        assert_eq!(server.port, 8080);
        assert_eq!(config.session_ttl(), chrono::Duration::hours(24));
        assert!(config.database.and_then(|db| db.path).is_none());
    }

    #[test]
    fn test_existing_file_is_respected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("api.toml");
        std::fs::write(
            &path,
            r#"
[server]
host = "0.0.0.0"
port = 9090

[database]
path = "/srv/clientdesk.db"
"#,
        )
        .unwrap();

        let config = ApiConfig::load_from(&path).unwrap();
        assert_eq!(config.server().port, 9090);
        assert_eq!(
            config.database.as_ref().unwrap().path.as_deref(),
            Some("/srv/clientdesk.db")
        );
        assert!(config.cors.is_none());
        assert_eq!(config.session_ttl(), chrono::Duration::hours(24));
    }

    #[test]
    fn test_ttl_has_a_floor() {
        let config = ApiConfig {
            auth: Some(AuthConfig {
                session_ttl_hours: 0,
            }),
            ..ApiConfig::default()
        };
        assert_eq!(config.session_ttl(), chrono::Duration::hours(1));
    }

    #[test]
    fn test_ttl_has_a_ceiling() {
        let config = ApiConfig {
            auth: Some(AuthConfig {
                session_ttl_hours: i64::MAX,
            }),
            ..ApiConfig::default()
        };
        let ttl = config.session_ttl();
        assert_eq!(ttl, chrono::Duration::hours(MAX_SESSION_TTL_HOURS));
        assert!(chrono::Utc::now().checked_add_signed(ttl).is_some());
    }
}
