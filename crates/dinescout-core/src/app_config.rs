use std::net::SocketAddr;

/// Half-width of the location search box, in coordinate degrees, when a
/// request gives no radius.
pub const DEFAULT_SEARCH_RADIUS: f64 = 5.0;

/// Largest accepted image-search request body.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Which restaurant store implementation the server runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    /// Process-local store, empty at startup. Intended for local UI work and tests.
    Memory,
}

impl std::fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreBackend::Postgres => write!(f, "postgres"),
            StoreBackend::Memory => write!(f, "memory"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub database_url: Option<String>,
    pub store_backend: StoreBackend,
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
    pub clarifai_pat: Option<String>,
    pub clarifai_base_url: String,
    pub clarifai_user_id: String,
    pub clarifai_app_id: String,
    pub clarifai_model_id: String,
    pub classifier_timeout_secs: u64,
    /// Radius applied to location searches that omit one. The browser client
    /// falls back to 10 on its own side, so the two can disagree.
    pub default_search_radius: f64,
    pub max_upload_bytes: usize,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("store_backend", &self.store_backend)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field(
                "database_url",
                &self.database_url.as_ref().map(|_| "[redacted]"),
            )
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .field(
                "clarifai_pat",
                &self.clarifai_pat.as_ref().map(|_| "[redacted]"),
            )
            .field("clarifai_base_url", &self.clarifai_base_url)
            .field("clarifai_user_id", &self.clarifai_user_id)
            .field("clarifai_app_id", &self.clarifai_app_id)
            .field("clarifai_model_id", &self.clarifai_model_id)
            .field("classifier_timeout_secs", &self.classifier_timeout_secs)
            .field("default_search_radius", &self.default_search_radius)
            .field("max_upload_bytes", &self.max_upload_bytes)
            .finish()
    }
}
