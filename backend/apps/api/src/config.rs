//! Server Configuration
//!
//! Everything the binary needs, read once from the environment at startup.

use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, bail};
use auth::{AuthConfig, MailerConfig};

const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";
const DEFAULT_RESET_PASSWORD_URL: &str = "http://localhost:3000/reset-password";
const DEFAULT_MAIL_FROM: &str = "StreamVault <no-reply@streamvault.local>";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub auth: AuthConfig,
    /// `None` when `SMTP_HOST` is unset
    pub mailer: Option<MailerConfig>,
    pub frontend_origins: Vec<String>,
    pub bind_addr: SocketAddr,
    pub production: bool,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let production = match var("APP_ENV") {
            Some(env) => env.eq_ignore_ascii_case("production"),
            None => !cfg!(debug_assertions),
        };

        let database_url = var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let database_max_connections = parse_or(&var, "DATABASE_MAX_CONNECTIONS", 5u32)?;

        let mut auth = match var("JWT_SECRET") {
            Some(secret) => AuthConfig {
                token_secret: secret.into_bytes(),
                ..AuthConfig::default()
            },
            None if production => bail!("JWT_SECRET must be set in production"),
            None => {
                tracing::warn!("JWT_SECRET not set; using a random secret, tokens will not survive a restart");
                AuthConfig::with_random_secret()
            }
        };
        if let Some(issuer) = var("JWT_ISSUER") {
            auth.token_issuer = issuer;
        }
        auth.token_ttl = Duration::from_secs(parse_or(
            &var,
            "JWT_TTL_SECONDS",
            auth.token_ttl.as_secs(),
        )?);
        auth.reset_token_ttl = Duration::from_secs(parse_or(
            &var,
            "RESET_TOKEN_TTL_SECONDS",
            auth.reset_token_ttl.as_secs(),
        )?);
        auth.password_pepper = var("PASSWORD_PEPPER").map(String::into_bytes);
        auth.expose_reset_token = !production;

        let mailer = match var("SMTP_HOST") {
            Some(smtp_host) => Some(MailerConfig {
                smtp_host,
                smtp_port: parse_or(&var, "SMTP_PORT", 587u16)?,
                smtp_username: var("SMTP_USERNAME"),
                smtp_password: var("SMTP_PASSWORD"),
                from_address: var("MAIL_FROM").unwrap_or_else(|| DEFAULT_MAIL_FROM.to_string()),
                reset_password_url: var("RESET_PASSWORD_URL")
                    .unwrap_or_else(|| DEFAULT_RESET_PASSWORD_URL.to_string()),
            }),
            None if production => bail!("SMTP_HOST must be set in production"),
            None => None,
        };

        let frontend_origins = var("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect();

        let host: IpAddr = parse_or(&var, "APP_HOST", IpAddr::from([0, 0, 0, 0]))?;
        let port: u16 = parse_or(&var, "APP_PORT", 31113u16)?;

        Ok(Self {
            database_url,
            database_max_connections,
            auth,
            mailer,
            frontend_origins,
            bind_addr: SocketAddr::new(host, port),
            production,
        })
    }
}

/// Parse `key` if present, fall back to `default` if absent, fail on garbage
fn parse_or<T, F>(var: &F, key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    F: Fn(&str) -> Option<String>,
{
    match var(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> anyhow::Result<ServerConfig> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_development_defaults() {
        let cfg = config(&[
            ("APP_ENV", "development"),
            ("DATABASE_URL", "postgres://localhost/streamvault"),
        ])
        .unwrap();

        assert!(!cfg.production);
        assert!(cfg.mailer.is_none());
        assert!(cfg.auth.expose_reset_token);
        assert_eq!(cfg.auth.token_issuer, "streamvault");
        assert_eq!(cfg.auth.reset_token_ttl, Duration::from_secs(3600));
        assert_eq!(cfg.bind_addr.port(), 31113);
        assert_eq!(cfg.frontend_origins.len(), 2);
    }

    #[test]
    fn test_database_url_required() {
        assert!(config(&[("APP_ENV", "development")]).is_err());
    }

    #[test]
    fn test_production_requires_secret_and_smtp() {
        let base = [
            ("APP_ENV", "production"),
            ("DATABASE_URL", "postgres://db/streamvault"),
        ];
        assert!(config(&base).is_err());

        let with_secret = [base[0], base[1], ("JWT_SECRET", "s3cret-s3cret-s3cret")];
        assert!(config(&with_secret).is_err());

        let cfg = config(&[
            base[0],
            base[1],
            ("JWT_SECRET", "s3cret-s3cret-s3cret"),
            ("SMTP_HOST", "smtp.example.com"),
            ("SMTP_PORT", "2525"),
        ])
        .unwrap();
        assert!(cfg.production);
        assert!(!cfg.auth.expose_reset_token);
        assert_eq!(cfg.mailer.unwrap().smtp_port, 2525);
    }

    #[test]
    fn test_invalid_number_is_an_error() {
        let result = config(&[
            ("APP_ENV", "development"),
            ("DATABASE_URL", "postgres://localhost/streamvault"),
            ("JWT_TTL_SECONDS", "soon"),
        ]);
        assert!(result.is_err());
    }
}
