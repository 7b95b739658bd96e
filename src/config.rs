use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;

/// Backend settings, read from the environment (and `.env` when present).
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    /// Catalog file to serve; the bundled catalog is used when unset.
    pub catalog_path: Option<PathBuf>,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = match env::var("APP_PORT") {
            Ok(value) => value
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort { value })?,
            Err(_) => 3000,
        };
        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let catalog_path = env::var("APP_CATALOG_PATH")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            catalog_path,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self.host.parse().map_err(|source| ConfigError::InvalidHost {
            value: self.host.clone(),
            source,
        })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TelemetryConfig {
    pub log_level: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("APP_PORT must be a valid u16, got '{value}'")]
    InvalidPort { value: String },
    #[error("APP_HOST '{value}' must parse to an IPv4 or IPv6 address")]
    InvalidHost {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    // Tests touching the environment hold `env_guard()` for their whole body.
    fn reset_env() {
        for key in ["APP_HOST", "APP_PORT", "APP_LOG_LEVEL", "APP_CATALOG_PATH"] {
            unsafe { env::remove_var(key) };
        }
    }

    fn set_env(key: &str, value: &str) {
        unsafe { env::set_var(key, value) };
    }

    #[test]
    fn test_load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().unwrap();
        reset_env();
        let config = AppConfig::load().unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.catalog_path, None);
    }

    #[test]
    fn test_load_reads_overrides() {
        let _lock = env_guard().lock().unwrap();
        reset_env();
        set_env("APP_HOST", "0.0.0.0");
        set_env("APP_PORT", "8080");
        set_env("APP_LOG_LEVEL", "debug");
        set_env("APP_CATALOG_PATH", "/srv/cards.json");
        let config = AppConfig::load().unwrap();
        reset_env();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.telemetry.log_level, "debug");
        assert_eq!(config.catalog_path, Some(PathBuf::from("/srv/cards.json")));
        assert_eq!(
            config.server.socket_addr().unwrap(),
            SocketAddr::new(IpAddr::from([0, 0, 0, 0]), 8080)
        );
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let _lock = env_guard().lock().unwrap();
        reset_env();
        set_env("APP_PORT", "not-a-port");
        let err = AppConfig::load().unwrap_err();
        reset_env();
        assert!(matches!(err, ConfigError::InvalidPort { .. }));
    }

    #[test]
    fn test_localhost_resolves() {
        let server = ServerConfig {
            host: "localhost".to_string(),
            port: 3000,
        };
        assert_eq!(
            server.socket_addr().unwrap(),
            SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000)
        );
    }

    #[test]
    fn test_bad_host_is_rejected() {
        let server = ServerConfig {
            host: "cards.example".to_string(),
            port: 3000,
        };
        assert!(matches!(
            server.socket_addr().unwrap_err(),
            ConfigError::InvalidHost { .. }
        ));
    }
}
