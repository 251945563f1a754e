use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::types::{Dataset, MAX_DATASET_ID_LENGTH, is_valid_dataset_id, is_valid_table_name};
use crate::utils::file::expand_path;

use super::cli::CliConfig;
use super::constants::{
    APP_DOT_FOLDER, CONFIG_FILE_NAME, DEFAULT_DATASET_ID, DEFAULT_DATASET_LABEL,
    DEFAULT_DATASET_TABLE, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_PRICE_MAX, DEFAULT_RATING_STEP,
    POSTGRES_DEFAULT_ACQUIRE_TIMEOUT_SECS, POSTGRES_DEFAULT_IDLE_TIMEOUT_SECS,
    POSTGRES_DEFAULT_MAX_CONNECTIONS, POSTGRES_DEFAULT_MAX_LIFETIME_SECS,
    POSTGRES_DEFAULT_MIN_CONNECTIONS, POSTGRES_DEFAULT_STATEMENT_TIMEOUT_SECS, RATING_MAX,
    SQLITE_DEFAULT_PATH,
};

// =============================================================================
// Database Backend Enum (SQLite or PostgreSQL)
// =============================================================================

/// Database backend holding the bus listing tables
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseBackend {
    #[default]
    Sqlite,
    Postgres,
}

impl fmt::Display for DatabaseBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatabaseBackend::Sqlite => write!(f, "sqlite"),
            DatabaseBackend::Postgres => write!(f, "postgres"),
        }
    }
}

// =============================================================================
// File Config Structs (from JSON config file)
// =============================================================================

/// Server configuration section
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ServerFileConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
}

/// SQLite configuration section (from JSON config file)
#[derive(Debug, Default, Clone, Deserialize)]
pub struct SqliteFileConfig {
    /// Database file (or use BUSBOARD_SQLITE_PATH env var)
    pub path: Option<String>,
}

/// PostgreSQL configuration section (from JSON config file)
#[derive(Debug, Default, Clone, Deserialize)]
pub struct PostgresFileConfig {
    /// PostgreSQL connection URL (or use BUSBOARD_POSTGRES_URL env var)
    pub url: Option<String>,
    /// Maximum number of connections in the pool (default: 10)
    pub max_connections: Option<u32>,
    /// Minimum number of connections to keep warm (default: 1)
    pub min_connections: Option<u32>,
    /// Connection acquire timeout in seconds (default: 30)
    pub acquire_timeout_secs: Option<u64>,
    /// Idle connection timeout in seconds (default: 600)
    pub idle_timeout_secs: Option<u64>,
    /// Max connection lifetime in seconds (default: 1800)
    pub max_lifetime_secs: Option<u64>,
    /// Statement timeout in seconds, 0 to disable (default: 60)
    pub statement_timeout_secs: Option<u64>,
}

/// Database configuration section (from JSON config file)
#[derive(Debug, Default, Clone, Deserialize)]
pub struct DatabaseFileConfig {
    /// Backend: sqlite (default) or postgres
    pub backend: Option<DatabaseBackend>,
    /// SQLite-specific configuration
    pub sqlite: Option<SqliteFileConfig>,
    /// PostgreSQL-specific configuration
    pub postgres: Option<PostgresFileConfig>,
}

/// One entry of the `datasets` list
#[derive(Debug, Clone, Deserialize)]
pub struct DatasetFileConfig {
    pub id: String,
    /// Table name (defaults to the id)
    pub table: Option<String>,
    /// Selector label (defaults to the id)
    pub label: Option<String>,
    /// Whether the table has a route_link column (default: false)
    pub route_link: Option<bool>,
}

/// Filter widget configuration section
#[derive(Debug, Default, Clone, Deserialize)]
pub struct FiltersFileConfig {
    /// Upper bound of the price slider (default: 6000)
    pub price_max: Option<i64>,
    /// Step of the rating slider (default: 0.1)
    pub rating_step: Option<f64>,
}

/// File-based configuration (JSON)
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    pub server: Option<ServerFileConfig>,
    pub database: Option<DatabaseFileConfig>,
    pub datasets: Option<Vec<DatasetFileConfig>>,
    pub filters: Option<FiltersFileConfig>,
    pub debug: Option<bool>,
    #[serde(flatten)]
    pub extra: serde_json::Value,
}

impl FileConfig {
    /// Load configuration from a JSON file
    fn load_from_file(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "Loading config file");
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        tracing::trace!(config = ?config, "Parsed config file");
        Ok(config)
    }

    /// Warn about unknown fields in the config
    fn warn_unknown_fields(&self) {
        if let serde_json::Value::Object(map) = &self.extra
            && !map.is_empty()
        {
            let keys_str: String = map
                .keys()
                .map(|k| k.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            tracing::warn!(
                fields = %keys_str,
                "Unknown fields in config file (possible typos)"
            );
        }
    }

    /// Merge another FileConfig into this one (other takes precedence)
    fn merge(&mut self, other: FileConfig) {
        // Server
        if let Some(server) = other.server {
            let current = self.server.get_or_insert_with(ServerFileConfig::default);
            if server.host.is_some() {
                tracing::trace!(host = ?server.host, "Merging server.host");
                current.host = server.host;
            }
            if server.port.is_some() {
                tracing::trace!(port = ?server.port, "Merging server.port");
                current.port = server.port;
            }
        }

        // Database
        if let Some(database) = other.database {
            let current = self
                .database
                .get_or_insert_with(DatabaseFileConfig::default);
            if database.backend.is_some() {
                tracing::trace!(backend = ?database.backend, "Merging database.backend");
                current.backend = database.backend;
            }
            if let Some(sqlite) = database.sqlite {
                let current_sqlite = current.sqlite.get_or_insert_with(SqliteFileConfig::default);
                if sqlite.path.is_some() {
                    current_sqlite.path = sqlite.path;
                }
            }
            if let Some(pg) = database.postgres {
                let current_pg = current
                    .postgres
                    .get_or_insert_with(PostgresFileConfig::default);
                if pg.url.is_some() {
                    current_pg.url = pg.url;
                }
                if pg.max_connections.is_some() {
                    current_pg.max_connections = pg.max_connections;
                }
                if pg.min_connections.is_some() {
                    current_pg.min_connections = pg.min_connections;
                }
                if pg.acquire_timeout_secs.is_some() {
                    current_pg.acquire_timeout_secs = pg.acquire_timeout_secs;
                }
                if pg.idle_timeout_secs.is_some() {
                    current_pg.idle_timeout_secs = pg.idle_timeout_secs;
                }
                if pg.max_lifetime_secs.is_some() {
                    current_pg.max_lifetime_secs = pg.max_lifetime_secs;
                }
                if pg.statement_timeout_secs.is_some() {
                    current_pg.statement_timeout_secs = pg.statement_timeout_secs;
                }
            }
        }

        // Datasets replace as a whole list
        if other.datasets.is_some() {
            tracing::trace!("Merging datasets");
            self.datasets = other.datasets;
        }

        // Filters
        if let Some(filters) = other.filters {
            let current = self.filters.get_or_insert_with(FiltersFileConfig::default);
            if filters.price_max.is_some() {
                current.price_max = filters.price_max;
            }
            if filters.rating_step.is_some() {
                current.rating_step = filters.rating_step;
            }
        }

        // Debug
        if other.debug.is_some() {
            self.debug = other.debug;
        }
    }
}

// =============================================================================
// Runtime Config Structs (final merged configuration)
// =============================================================================

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// SQLite configuration (final/runtime)
#[derive(Debug, Clone)]
pub struct SqliteConfig {
    /// Database file, already expanded to an absolute path
    pub path: PathBuf,
}

/// PostgreSQL configuration (final/runtime)
#[derive(Debug, Clone, Default)]
pub struct PostgresConfig {
    /// PostgreSQL connection URL
    pub url: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Minimum number of connections to keep warm
    pub min_connections: u32,
    /// Connection acquire timeout in seconds
    pub acquire_timeout_secs: u64,
    /// Idle connection timeout in seconds
    pub idle_timeout_secs: u64,
    /// Max connection lifetime in seconds
    pub max_lifetime_secs: u64,
    /// Statement timeout in seconds (0 = disabled)
    pub statement_timeout_secs: u64,
}

/// Database configuration (final/runtime)
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Backend: sqlite (default) or postgres
    pub backend: DatabaseBackend,
    /// SQLite-specific configuration (only used if backend = sqlite)
    pub sqlite: SqliteConfig,
    /// PostgreSQL-specific configuration (only used if backend = postgres)
    pub postgres: PostgresConfig,
}

/// Filter widget bounds (final/runtime)
#[derive(Debug, Clone)]
pub struct FiltersConfig {
    pub price_max: i64,
    pub rating_step: f64,
}

/// Final merged application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub datasets: Vec<Dataset>,
    pub filters: FiltersConfig,
    pub debug: bool,
}

impl AppConfig {
    /// Load configuration from all sources
    ///
    /// Priority (lowest to highest):
    /// 1. Defaults
    /// 2. Profile directory config (~/.busboard/busboard.json)
    /// 3. Local directory config OR CLI-specified config path
    /// 4. CLI arguments (which include env var fallbacks via clap)
    pub fn load(cli: &CliConfig) -> Result<Self> {
        tracing::debug!("Loading application configuration");
        tracing::trace!(cli = ?cli, "CLI config");

        let mut file_config = FileConfig::default();
        let mut found_configs: Vec<String> = Vec::new();

        // 1. Load from profile dir (~/.busboard/busboard.json) - skip if not exists
        if let Some(profile_path) = get_profile_config_path()
            && profile_path.exists()
        {
            let profile_config = FileConfig::load_from_file(&profile_path)?;
            profile_config.warn_unknown_fields();
            file_config.merge(profile_config);
            found_configs.push(profile_path.display().to_string());
        }

        // 2. Load from CLI-specified path OR local directory
        let overlay_path = if let Some(ref path) = cli.config {
            let expanded = expand_path(&path.to_string_lossy());
            if !expanded.exists() {
                anyhow::bail!("Config file not found: {}", expanded.display());
            }
            Some(expanded)
        } else {
            let local = PathBuf::from(CONFIG_FILE_NAME);
            if local.exists() { Some(local) } else { None }
        };

        if let Some(path) = overlay_path {
            let overlay_config = FileConfig::load_from_file(&path)?;
            overlay_config.warn_unknown_fields();
            file_config.merge(overlay_config);
            found_configs.push(path.display().to_string());
        }

        tracing::debug!(configs = ?found_configs, "Config files loaded");

        // 3. Extract file config values with defaults
        let file_server = file_config.server.unwrap_or_default();
        let file_database = file_config.database.unwrap_or_default();
        let file_sqlite = file_database.sqlite.unwrap_or_default();
        let file_pg = file_database.postgres.unwrap_or_default();
        let file_filters = file_config.filters.unwrap_or_default();

        // 4. Layer configs: defaults -> file config -> CLI/env overrides
        let host = cli
            .host
            .clone()
            .or(file_server.host)
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = cli.port.or(file_server.port).unwrap_or(DEFAULT_PORT);

        let backend = cli
            .database_backend
            .or(file_database.backend)
            .unwrap_or_default();

        let sqlite_path = match &cli.sqlite_path {
            Some(path) => expand_path(&path.to_string_lossy()),
            None => expand_path(file_sqlite.path.as_deref().unwrap_or(SQLITE_DEFAULT_PATH)),
        };

        let postgres = PostgresConfig {
            url: cli
                .postgres_url
                .clone()
                .or(file_pg.url)
                .unwrap_or_default(),
            max_connections: file_pg
                .max_connections
                .unwrap_or(POSTGRES_DEFAULT_MAX_CONNECTIONS),
            min_connections: file_pg
                .min_connections
                .unwrap_or(POSTGRES_DEFAULT_MIN_CONNECTIONS),
            acquire_timeout_secs: file_pg
                .acquire_timeout_secs
                .unwrap_or(POSTGRES_DEFAULT_ACQUIRE_TIMEOUT_SECS),
            idle_timeout_secs: file_pg
                .idle_timeout_secs
                .unwrap_or(POSTGRES_DEFAULT_IDLE_TIMEOUT_SECS),
            max_lifetime_secs: file_pg
                .max_lifetime_secs
                .unwrap_or(POSTGRES_DEFAULT_MAX_LIFETIME_SECS),
            statement_timeout_secs: file_pg
                .statement_timeout_secs
                .unwrap_or(POSTGRES_DEFAULT_STATEMENT_TIMEOUT_SECS),
        };

        let datasets = match file_config.datasets {
            Some(entries) => entries.into_iter().map(dataset_from_file).collect(),
            None => vec![default_dataset()],
        };

        let filters = FiltersConfig {
            price_max: file_filters.price_max.unwrap_or(DEFAULT_PRICE_MAX),
            rating_step: file_filters.rating_step.unwrap_or(DEFAULT_RATING_STEP),
        };

        // debug: CLI flag wins when set, otherwise file config
        let debug = cli.debug || file_config.debug.unwrap_or(false);

        let config = Self {
            server: ServerConfig { host, port },
            database: DatabaseConfig {
                backend,
                sqlite: SqliteConfig { path: sqlite_path },
                postgres,
            },
            datasets,
            filters,
            debug,
        };

        config.validate()?;

        tracing::debug!(
            host = %config.server.host,
            port = config.server.port,
            backend = %config.database.backend,
            datasets = config.datasets.len(),
            debug = config.debug,
            "Configuration loaded"
        );

        Ok(config)
    }

    /// Validate configuration values
    fn validate(&self) -> Result<()> {
        // Host must not be empty
        if self.server.host.is_empty() {
            anyhow::bail!("Configuration error: server.host must not be empty");
        }

        // Port must be non-zero (port 0 would cause bind failure)
        if self.server.port == 0 {
            anyhow::bail!("Configuration error: server.port must be greater than 0");
        }

        if self.database.backend == DatabaseBackend::Postgres
            && self.database.postgres.url.is_empty()
        {
            anyhow::bail!(
                "Configuration error: database.postgres.url is required when database.backend is 'postgres'"
            );
        }

        if self.datasets.is_empty() {
            anyhow::bail!("Configuration error: at least one dataset is required");
        }

        let mut seen = HashSet::new();
        for dataset in &self.datasets {
            if dataset.id.is_empty() {
                anyhow::bail!("Configuration error: dataset id must not be empty");
            }
            if !is_valid_dataset_id(&dataset.id) {
                anyhow::bail!(
                    "Configuration error: invalid dataset id '{}' (1-{} letters, digits, '-' or '_')",
                    dataset.id,
                    MAX_DATASET_ID_LENGTH
                );
            }
            if !seen.insert(dataset.id.as_str()) {
                anyhow::bail!("Configuration error: duplicate dataset id '{}'", dataset.id);
            }
            if !is_valid_table_name(&dataset.table) {
                anyhow::bail!(
                    "Configuration error: dataset '{}' has invalid table name '{}'",
                    dataset.id,
                    dataset.table
                );
            }
        }

        if self.filters.price_max < 0 {
            anyhow::bail!("Configuration error: filters.price_max must not be negative");
        }

        if !(self.filters.rating_step > 0.0 && self.filters.rating_step <= RATING_MAX) {
            anyhow::bail!("Configuration error: filters.rating_step must be in (0, 5]");
        }

        Ok(())
    }
}

fn dataset_from_file(entry: DatasetFileConfig) -> Dataset {
    Dataset {
        table: entry.table.unwrap_or_else(|| entry.id.clone()),
        label: entry.label.unwrap_or_else(|| entry.id.clone()),
        route_link: entry.route_link.unwrap_or(false),
        id: entry.id,
    }
}

/// The unified table used when no datasets are configured
fn default_dataset() -> Dataset {
    Dataset {
        id: DEFAULT_DATASET_ID.to_string(),
        table: DEFAULT_DATASET_TABLE.to_string(),
        label: DEFAULT_DATASET_LABEL.to_string(),
        route_link: true,
    }
}

/// Get the profile config path (~/.busboard/busboard.json)
fn get_profile_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(APP_DOT_FOLDER).join(CONFIG_FILE_NAME))
}

/// Check if host binds to all network interfaces
pub fn is_all_interfaces(host: &str) -> bool {
    matches!(host, "0.0.0.0" | "::" | "[::]")
}
