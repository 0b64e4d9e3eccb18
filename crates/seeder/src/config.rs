//! Application configuration loaded from environment variables.

use std::path::PathBuf;

/// Seeder configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `COUCHDB_URL` — store server URL (default: `"http://127.0.0.1:5984"`)
/// - `SEED_DATABASE` — target database name (default: `"customer"`)
/// - `VIEWS_DIR` — view sources directory (default: `"views"`)
/// - `FIXTURES_DIR` — word-list directory (default: `"fixtures"`)
/// - `CUSTOMER_COUNT` — customers to generate (default: `500`)
/// - `RUST_LOG` — tracing filter directive (default: `"info"`)
#[derive(Debug, Clone)]
pub struct Config {
    pub couchdb_url: String,
    pub database: String,
    pub views_dir: PathBuf,
    pub fixtures_dir: PathBuf,
    pub customer_count: usize,
    pub log_level: String,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            couchdb_url: std::env::var("COUCHDB_URL").unwrap_or(defaults.couchdb_url),
            database: std::env::var("SEED_DATABASE").unwrap_or(defaults.database),
            views_dir: std::env::var("VIEWS_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.views_dir),
            fixtures_dir: std::env::var("FIXTURES_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.fixtures_dir),
            customer_count: std::env::var("CUSTOMER_COUNT")
                .ok()
                .and_then(|count| count.parse().ok())
                .unwrap_or(defaults.customer_count),
            log_level: std::env::var("RUST_LOG").unwrap_or(defaults.log_level),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            couchdb_url: "http://127.0.0.1:5984".to_string(),
            database: "customer".to_string(),
            views_dir: PathBuf::from("views"),
            fixtures_dir: PathBuf::from("fixtures"),
            customer_count: 500,
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert_eq!(config.couchdb_url, "http://127.0.0.1:5984");
        assert_eq!(config.database, "customer");
        assert_eq!(config.views_dir, PathBuf::from("views"));
        assert_eq!(config.fixtures_dir, PathBuf::from("fixtures"));
        assert_eq!(config.customer_count, 500);
        assert_eq!(config.log_level, "info");
    }
}
