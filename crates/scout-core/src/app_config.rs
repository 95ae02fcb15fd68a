use std::net::SocketAddr;
use std::path::PathBuf;

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

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Catalog override; `None` means the embedded catalog.
    pub catalog_path: Option<PathBuf>,
    pub nominatim_url: String,
    pub overpass_url: String,
    /// Search radius around the site, in metres.
    pub search_radius_m: u32,
    pub geocode_timeout_secs: u64,
    /// Server-side Overpass timeout; the HTTP client waits a little longer.
    pub overpass_timeout_secs: u64,
    pub user_agent: String,
}
