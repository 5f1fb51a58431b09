//! Explicit configuration for the auth core.
//!
//! The signing secret, token TTL, cookie flags and reset window are injected
//! into the token codec and the reset flow instead of being read from ambient
//! global state.

use std::fmt::Display;

use chrono::TimeDelta;
use serde::Deserialize;

use crate::prelude::*;

fn get_env_variable(var: &str) -> String {
    std::env::var(var).expect(&format!("Env Variable '{}' missing", var))
}

fn default_bind_addr() -> String {
    String::from("127.0.0.1:3000")
}

fn default_token_ttl_minutes() -> i64 {
    // 90 days, matching the session cookie lifetime.
    90 * 24 * 60
}

fn default_reset_window_minutes() -> i64 {
    10
}

/// Settings consumed by the token codec, session issuer and reset flow.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    pub jwt_secret: String,
    #[serde(default = "default_token_ttl_minutes")]
    pub token_ttl_minutes: i64,
    #[serde(default = "default_reset_window_minutes")]
    pub reset_window_minutes: i64,
    /// Only send the session cookie over TLS. Off for local development.
    #[serde(default)]
    pub cookie_secure: bool,
}

impl AuthConfig {
    pub fn from_env() -> Self {
        Self {
            jwt_secret: get_env_variable("JWT_SECRET"),
            token_ttl_minutes: env_i64("TOKEN_TTL_MINUTES", default_token_ttl_minutes()),
            reset_window_minutes: env_i64("RESET_WINDOW_MINUTES", default_reset_window_minutes()),
            cookie_secure: std::env::var("COOKIE_SECURE")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
        }
    }

    /// Validity window of issued bearer credentials.
    pub fn token_ttl(&self) -> TimeDelta {
        TimeDelta::minutes(self.token_ttl_minutes)
    }

    /// Validity window of password reset tokens.
    pub fn reset_window(&self) -> TimeDelta {
        TimeDelta::minutes(self.reset_window_minutes)
    }
}

impl Display for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "REDACTED")
    }
}

/// Full server configuration, loadable from a TOML file or the environment.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    pub auth: AuthConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| default_bind_addr()),
            auth: AuthConfig::from_env(),
        }
    }

    pub fn from_toml_str(raw: &str) -> Result<Self> {
        toml::from_str(raw).map_err(|err| Error::Config(err.to_string()))
    }
}

fn env_i64(var: &str, default: i64) -> i64 {
    match std::env::var(var) {
        Ok(value) => value
            .parse()
            .expect(&format!("Env Variable '{}' is not a number", var)),
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_config_fills_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
            [auth]
            jwt_secret = "config-test-secret"
            "#,
        )
        .unwrap();

        assert_eq!(config.bind_addr, "127.0.0.1:3000");
        assert_eq!(config.auth.reset_window(), TimeDelta::minutes(10));
        assert_eq!(config.auth.token_ttl(), TimeDelta::days(90));
        assert!(!config.auth.cookie_secure);
    }

    #[test]
    fn toml_config_overrides() {
        let config = AppConfig::from_toml_str(
            r#"
            bind_addr = "0.0.0.0:8080"

            [auth]
            jwt_secret = "config-test-secret"
            token_ttl_minutes = 60
            reset_window_minutes = 5
            cookie_secure = true
            "#,
        )
        .unwrap();

        assert_eq!(config.bind_addr, "0.0.0.0:8080");
        assert_eq!(config.auth.token_ttl(), TimeDelta::minutes(60));
        assert_eq!(config.auth.reset_window(), TimeDelta::minutes(5));
        assert!(config.auth.cookie_secure);
    }

    #[test]
    fn missing_secret_is_an_error() {
        assert!(AppConfig::from_toml_str("[auth]\n").is_err());
    }

    #[test]
    fn display_redacts_secrets() {
        let config = AuthConfig {
            jwt_secret: String::from("super-secret"),
            token_ttl_minutes: 60,
            reset_window_minutes: 10,
            cookie_secure: false,
        };
        assert_eq!(config.to_string(), "REDACTED");
    }
}
