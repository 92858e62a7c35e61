use std::path::PathBuf;
use std::sync::Arc;

use crate::config::ApiConfig;
use crate::database::Database;

/// Returns the default path to the clientdesk database
///
/// # Platform-specific paths
///
/// - **macOS**: `~/Library/Application Support/clientdesk/clientdesk.db`
/// - **Linux**: `~/.local/share/clientdesk/clientdesk.db`
/// - **Windows**: `%LOCALAPPDATA%\clientdesk\clientdesk.db`
pub fn get_db_path() -> anyhow::Result<PathBuf> {
    let data_dir = dirs::data_local_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine local data directory"))?;

    Ok(data_dir.join("clientdesk").join("clientdesk.db"))
}

/// Database path from config, falling back to the platform default
pub fn resolve_db_path(config: &ApiConfig) -> anyhow::Result<PathBuf> {
    match config.database.as_ref().and_then(|db| db.path.as_ref()) {
        Some(path) => Ok(PathBuf::from(path)),
        None => get_db_path(),
    }
}

/// Open the database and run migrations
pub fn initialize_database(config: &ApiConfig) -> anyhow::Result<Arc<Database>> {
    let db_path = resolve_db_path(config)?;
    let db = Database::new(&db_path)?;
    tracing::info!("Database initialized at: {}", db_path.display());
    Ok(Arc::new(db))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseConfig;

    #[test]
    fn test_config_path_overrides_default() {
        let config = ApiConfig {
            database: Some(DatabaseConfig {
                path: Some("/tmp/custom.db".to_string()),
            }),
            ..ApiConfig::default()
        };
        assert_eq!(resolve_db_path(&config).unwrap(), PathBuf::from("/tmp/custom.db"));
    }

    #[test]
    fn test_initialize_opens_configured_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.db");
        let config = ApiConfig {
            database: Some(DatabaseConfig {
                path: Some(path.to_string_lossy().to_string()),
            }),
            ..ApiConfig::default()
        };

        let db = initialize_database(&config).unwrap();
        db.ping().unwrap();
        assert!(path.exists());
    }
}
