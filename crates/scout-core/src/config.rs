use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

pub const DEFAULT_NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org/";
pub const DEFAULT_OVERPASS_URL: &str = "https://overpass-api.de/api/interpreter";
pub const DEFAULT_USER_AGENT: &str = "market-scout/0.1 (location-analysis)";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a plain
/// `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        or_default(var, default)
            .parse::<SocketAddr>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_positive_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let value = or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))?;
        if value == 0 {
            return Err(invalid(var, "must be greater than zero".to_string()));
        }
        Ok(value)
    };

    let parse_positive_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let value = or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))?;
        if value == 0 {
            return Err(invalid(var, "must be greater than zero".to_string()));
        }
        Ok(value)
    };

    let env = parse_environment(&or_default("SCOUT_ENV", "development"))?;
    let bind_addr = parse_addr("SCOUT_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("SCOUT_LOG_LEVEL", "info");
    let catalog_path = lookup("SCOUT_CATALOG_PATH")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from);

    let nominatim_url = or_default("SCOUT_NOMINATIM_URL", DEFAULT_NOMINATIM_URL);
    let overpass_url = or_default("SCOUT_OVERPASS_URL", DEFAULT_OVERPASS_URL);
    let search_radius_m = parse_positive_u32("SCOUT_SEARCH_RADIUS_M", "1000")?;
    let geocode_timeout_secs = parse_positive_u64("SCOUT_GEOCODE_TIMEOUT_SECS", "10")?;
    let overpass_timeout_secs = parse_positive_u64("SCOUT_OVERPASS_TIMEOUT_SECS", "25")?;
    let user_agent = or_default("SCOUT_USER_AGENT", DEFAULT_USER_AGENT);

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        catalog_path,
        nominatim_url,
        overpass_url,
        search_radius_m,
        geocode_timeout_secs,
        overpass_timeout_secs,
        user_agent,
    })
}

fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SCOUT_ENV".to_string(),
            reason: format!("expected development, test, or production; got '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
