//! Server Configuration
//!
//! 環境変数から読み込む。`.env` は `main` で先に読み込まれる。

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use auth::AuthConfig;
use thiserror::Error;

pub const DEFAULT_BIND_ADDR: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 5500);
pub const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:3000";
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set in environment")]
    Missing(&'static str),

    #[error("{name} has an invalid value: {value:?}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub frontend_origins: Vec<String>,
    pub database_max_connections: u32,
    pub auth: AuthConfig,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let database_url = database_url(&lookup)?;

        let bind_addr = parse_or("BIND_ADDR", var("BIND_ADDR"), DEFAULT_BIND_ADDR)?;

        let frontend_origins = var("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        let database_max_connections = parse_or(
            "DATABASE_MAX_CONNECTIONS",
            var("DATABASE_MAX_CONNECTIONS"),
            DEFAULT_DATABASE_MAX_CONNECTIONS,
        )?;

        let auth = auth_config(&var)?;

        Ok(Self {
            database_url,
            bind_addr,
            frontend_origins,
            database_max_connections,
            auth,
        })
    }
}

/// `DATABASE_URL` on its own, for tools that do not serve HTTP
pub fn database_url<F>(lookup: F) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup("DATABASE_URL")
        .filter(|v| !v.trim().is_empty())
        .ok_or(ConfigError::Missing("DATABASE_URL"))
}

/// Parse `raw` when set, otherwise fall back to `default`
fn parse_or<T>(name: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
{
    match raw {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(default),
    }
}

fn auth_config(var: &impl Fn(&str) -> Option<String>) -> Result<AuthConfig, ConfigError> {
    let mut config = match var("JWT_SECRET_KEY") {
        Some(secret) => AuthConfig::new(secret.into_bytes()),
        None if cfg!(debug_assertions) => {
            tracing::warn!("JWT_SECRET_KEY not set, using a random development secret");
            AuthConfig::development()
        }
        None => return Err(ConfigError::Missing("JWT_SECRET_KEY")),
    };

    if let Some(raw) = var("JWT_ACCESS_TOKEN_MINUTES") {
        let minutes = raw
            .trim()
            .parse::<u64>()
            .ok()
            .filter(|m| *m > 0)
            .ok_or(ConfigError::Invalid {
                name: "JWT_ACCESS_TOKEN_MINUTES",
                value: raw.clone(),
            })?;
        config = config.with_access_token_ttl(Duration::from_secs(minutes * 60));
    }

    if let Some(pepper) = var("PASSWORD_PEPPER") {
        config = config.with_pepper(pepper.into_bytes());
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ApiConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/test"),
            ("JWT_SECRET_KEY", "secret"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr.port(), 5500);
        assert_eq!(config.frontend_origins, ["http://localhost:3000"]);
        assert_eq!(config.database_max_connections, 5);
        assert_eq!(config.auth.jwt_secret, b"secret");
        assert_eq!(config.auth.access_token_ttl, Duration::from_secs(15 * 60));
        assert!(config.auth.pepper().is_none());
    }

    #[test]
    fn test_database_url_required() {
        let err = ApiConfig::from_lookup(lookup(&[("JWT_SECRET_KEY", "s")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("DATABASE_URL")));
    }

    #[test]
    fn test_database_url_alone() {
        assert_eq!(
            database_url(lookup(&[("DATABASE_URL", "postgres://db/seed")])).unwrap(),
            "postgres://db/seed"
        );
        let err = database_url(lookup(&[("DATABASE_URL", "  ")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("DATABASE_URL")));
    }

    #[test]
    fn test_overrides() {
        let config = ApiConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://db/app"),
            ("JWT_SECRET_KEY", "s"),
            ("BIND_ADDR", "127.0.0.1:8080"),
            ("FRONTEND_ORIGINS", "http://a.test, http://b.test,"),
            ("DATABASE_MAX_CONNECTIONS", "12"),
            ("JWT_ACCESS_TOKEN_MINUTES", "2"),
            ("PASSWORD_PEPPER", "pepper"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(config.frontend_origins, ["http://a.test", "http://b.test"]);
        assert_eq!(config.database_max_connections, 12);
        assert_eq!(config.auth.access_token_ttl, Duration::from_secs(120));
        assert_eq!(config.auth.pepper(), Some(&b"pepper"[..]));
    }

    #[test]
    fn test_invalid_values() {
        let err = ApiConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://db/app"),
            ("JWT_SECRET_KEY", "s"),
            ("DATABASE_MAX_CONNECTIONS", "many"),
        ]))
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                name: "DATABASE_MAX_CONNECTIONS",
                ..
            }
        ));

        let err = ApiConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://db/app"),
            ("JWT_SECRET_KEY", "s"),
            ("JWT_ACCESS_TOKEN_MINUTES", "0"),
        ]))
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "JWT_ACCESS_TOKEN_MINUTES has an invalid value: \"0\""
        );
    }
}
