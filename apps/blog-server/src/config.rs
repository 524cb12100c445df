//! Application configuration loaded from environment variables.

use std::env;

use quill_infra::{DatabaseConfig, JwtConfig, MailConfig, PasswordConfig};

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: DatabaseConfig,
    pub run_migrations: bool,
    pub session: JwtConfig,
    pub secure_cookies: bool,
    pub password: PasswordConfig,
    /// `None` logs contact messages instead of mailing them.
    pub mail: Option<MailConfig>,
    pub contact_recipient: String,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = DatabaseConfig::default();
        let database = DatabaseConfig {
            url: env::var("DATABASE_URL").unwrap_or(defaults.url),
            max_connections: parse_or("DB_MAX_CONNECTIONS", defaults.max_connections),
            min_connections: parse_or("DB_MIN_CONNECTIONS", defaults.min_connections),
        };

        let mail = MailConfig::from_env();
        let contact_recipient = mail
            .as_ref()
            .map(|m| m.recipient.clone())
            .or_else(|| env::var("CONTACT_RECIPIENT").ok())
            .unwrap_or_else(|| "owner@localhost".to_string());

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parse_or("PORT", 8080),
            database,
            run_migrations: flag("RUN_MIGRATIONS", true),
            session: JwtConfig::from_env(),
            secure_cookies: flag("SESSION_COOKIE_SECURE", false),
            password: PasswordConfig::from_env(),
            mail,
            contact_recipient,
        }
    }
}

fn parse_or<T: std::str::FromStr>(key: &str, fallback: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(fallback)
}

fn flag(key: &str, fallback: bool) -> bool {
    env::var(key)
        .map(|v| v != "false" && v != "0")
        .unwrap_or(fallback)
}
