//! Application configuration
//!
//! Configuration is read from a TOML file. The path comes from the
//! `ROOMBOOK_CONFIG` environment variable when set, otherwise from the
//! platform config directory (`~/.config/roombook/config.toml` on
//! Linux). A missing file yields the defaults so the service runs out
//! of the box.

use std::path::PathBuf;

use serde::Deserialize;
use tracing::warn;

use crate::infrastructure::crypto::jwt::JwtConfig;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseSettings,
    pub security: SecurityConfig,
    pub admin: AdminConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    pub jwt_secret: String,
    pub jwt_expiration_hours: i64,
}

/// Bootstrap administrator created on first start when the user table
/// is empty.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    pub full_name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive for `tracing_subscriber::EnvFilter`, e.g.
    /// `"roombook=debug,info"`. `RUST_LOG` still takes precedence.
    pub level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            database: DatabaseSettings::default(),
            security: SecurityConfig::default(),
            admin: AdminConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: "sqlite://./roombook.db?mode=rwc".to_string(),
        }
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "super-secret-key-change-in-production".to_string(),
            jwt_expiration_hours: 24,
        }
    }
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            full_name: "Admin User".to_string(),
            email: "admin@company.com".to_string(),
            password: "admin123".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "roombook=info,tower_http=info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load the configuration, falling back to defaults when no file
    /// exists or a value is absent.
    pub fn load() -> Self {
        let Some(path) = config_path() else {
            return Self::default();
        };
        match std::fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => config,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Invalid config file, using defaults");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn jwt_config(&self) -> JwtConfig {
        JwtConfig {
            secret: self.security.jwt_secret.clone(),
            expiration_hours: self.security.jwt_expiration_hours,
            issuer: "roombook".to_string(),
        }
    }
}

fn config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("ROOMBOOK_CONFIG") {
        return Some(PathBuf::from(path));
    }
    dirs_next::config_dir().map(|dir| dir.join("roombook").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let config = AppConfig::default();
        assert_eq!(config.address(), "0.0.0.0:3000");
        assert_eq!(config.security.jwt_expiration_hours, 24);
        assert!(config.database.url.starts_with("sqlite://"));
    }

    #[test]
    fn partial_file_keeps_defaults_for_the_rest() {
        let config: AppConfig = toml::from_str(
            r#"
            [server]
            port = 8080
            "#,
        )
        .unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.admin.email, "admin@company.com");
    }
}
