use std::net::SocketAddr;

/// Application-level constants
pub const APP_NAME: &str = "Chronicare";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable holding the listen address.
pub const ADDR_ENV: &str = "CHRONICARE_ADDR";
/// Environment variable holding a log filter, checked after `RUST_LOG`.
pub const LOG_ENV: &str = "CHRONICARE_LOG";

pub const DEFAULT_ADDR: &str = "127.0.0.1:8080";

/// Log filter used when neither `RUST_LOG` nor `CHRONICARE_LOG` is set.
pub fn default_log_filter() -> String {
    std::env::var(LOG_ENV).unwrap_or_else(|_| "info,chronicare=debug".to_string())
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid listen address {value:?}: {source}")]
    InvalidAddr {
        value: String,
        source: std::net::AddrParseError,
    },
}

/// Server settings resolved from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub addr: SocketAddr,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw = std::env::var(ADDR_ENV).ok();
        Self::from_addr(raw.as_deref())
    }

    /// Parse an optional address, falling back to [`DEFAULT_ADDR`].
    pub fn from_addr(raw: Option<&str>) -> Result<Self, ConfigError> {
        let value = raw
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_ADDR);
        let addr = value.parse().map_err(|source| ConfigError::InvalidAddr {
            value: value.to_string(),
            source,
        })?;
        Ok(Self { addr })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_name_is_chronicare() {
        assert_eq!(APP_NAME, "Chronicare");
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.1.0");
    }

    #[test]
    fn missing_addr_uses_default() {
        let cfg = ServerConfig::from_addr(None).unwrap();
        assert_eq!(cfg.addr.to_string(), DEFAULT_ADDR);
        let blank = ServerConfig::from_addr(Some("  ")).unwrap();
        assert_eq!(blank.addr.to_string(), DEFAULT_ADDR);
    }

    #[test]
    fn explicit_addr_is_parsed() {
        let cfg = ServerConfig::from_addr(Some("0.0.0.0:9000")).unwrap();
        assert_eq!(cfg.addr.port(), 9000);
    }

    #[test]
    fn bad_addr_is_rejected() {
        let err = ServerConfig::from_addr(Some("not-an-addr")).unwrap_err();
        assert!(err.to_string().contains("not-an-addr"));
    }
}
