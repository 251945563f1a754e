// =============================================================================
// Application Identity
// =============================================================================

/// Application name in title case (for display)
pub const APP_NAME: &str = "BusBoard";

/// Application name in lowercase (for paths and identifiers)
pub const APP_NAME_LOWER: &str = "busboard";

/// Unix-style dotfile folder name
pub const APP_DOT_FOLDER: &str = ".busboard";

// =============================================================================
// Configuration Files
// =============================================================================

/// Config file name
pub const CONFIG_FILE_NAME: &str = "busboard.json";

/// Environment variable for config file path
pub const ENV_CONFIG: &str = "BUSBOARD_CONFIG";

// =============================================================================
// Environment Variables - Debug
// =============================================================================

/// Environment variable for debug mode
pub const ENV_DEBUG: &str = "BUSBOARD_DEBUG";

// =============================================================================
// Environment Variables - Server
// =============================================================================

/// Environment variable for server host
pub const ENV_HOST: &str = "BUSBOARD_HOST";

/// Environment variable for server port
pub const ENV_PORT: &str = "BUSBOARD_PORT";

/// Environment variable for log level/filter
pub const ENV_LOG: &str = "BUSBOARD_LOG";

// =============================================================================
// Server Defaults
// =============================================================================

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 8501;

/// Default request body limit (bytes). Every endpoint is a GET.
pub const DEFAULT_BODY_LIMIT: usize = 64 * 1024;

/// Maximum time to wait for in-flight requests on shutdown
pub const SHUTDOWN_TIMEOUT_SECS: u64 = 30;

// =============================================================================
// Environment Variables - Database
// =============================================================================

/// Environment variable for the database backend (sqlite or postgres)
pub const ENV_DATABASE_BACKEND: &str = "BUSBOARD_DATABASE_BACKEND";

/// Environment variable for the SQLite database file
pub const ENV_SQLITE_PATH: &str = "BUSBOARD_SQLITE_PATH";

/// Environment variable for the PostgreSQL connection URL
pub const ENV_POSTGRES_URL: &str = "BUSBOARD_POSTGRES_URL";

// =============================================================================
// SQLite Defaults
// =============================================================================

/// Default SQLite database file (relative to the working directory)
pub const SQLITE_DEFAULT_PATH: &str = "busboard.db";

/// Connection pool size for SQLite (read-only workload)
pub const SQLITE_MAX_CONNECTIONS: u32 = 4;

/// Busy timeout for SQLite connections in seconds
pub const SQLITE_BUSY_TIMEOUT_SECS: u64 = 5;

// =============================================================================
// PostgreSQL Defaults
// =============================================================================

/// Default max connections in the pool
pub const POSTGRES_DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Default min connections kept warm
pub const POSTGRES_DEFAULT_MIN_CONNECTIONS: u32 = 1;

/// Default connection acquire timeout in seconds
pub const POSTGRES_DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 30;

/// Default idle connection timeout in seconds
pub const POSTGRES_DEFAULT_IDLE_TIMEOUT_SECS: u64 = 600;

/// Default max connection lifetime in seconds
pub const POSTGRES_DEFAULT_MAX_LIFETIME_SECS: u64 = 1800;

/// Default statement timeout in seconds
pub const POSTGRES_DEFAULT_STATEMENT_TIMEOUT_SECS: u64 = 60;

// =============================================================================
// Datasets
// =============================================================================

/// Unified table holding every region's listings
pub const DEFAULT_DATASET_TABLE: &str = "final_rb";

/// Id of the default dataset
pub const DEFAULT_DATASET_ID: &str = "final_rb";

/// Label of the default dataset
pub const DEFAULT_DATASET_LABEL: &str = "Buses";

// =============================================================================
// Filters
// =============================================================================

/// Wildcard category value meaning "no filter on this dimension"
pub const FILTER_WILDCARD: &str = "All";

/// Upper bound of the price slider
pub const DEFAULT_PRICE_MAX: i64 = 6000;

/// Upper bound of the star rating scale
pub const RATING_MAX: f64 = 5.0;

/// Granularity of the star rating slider
pub const DEFAULT_RATING_STEP: f64 = 0.1;
