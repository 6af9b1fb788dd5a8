//! Server configuration, loaded from the environment.

use roost_auth::TokenConfig;
use roost_core::RoostError;
use roost_db::DbConfig;

/// Top-level server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listen address (e.g., `0.0.0.0:3000`).
    pub bind_addr: String,
    pub db: DbConfig,
    pub tokens: TokenConfig,
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

impl ServerConfig {
    /// Load configuration from `ROOST_*` environment variables.
    ///
    /// Everything has a development default except the token secret,
    /// which is required.
    pub fn from_env() -> Result<Self, RoostError> {
        let secret = std::env::var("ROOST_JWT_SECRET").map_err(|_| RoostError::Validation {
            message: "ROOST_JWT_SECRET must be set".into(),
        })?;

        let token_lifetime_secs = env_or("ROOST_JWT_LIFETIME_SECS", "2592000")
            .parse()
            .map_err(|e| RoostError::Validation {
                message: format!("ROOST_JWT_LIFETIME_SECS: {e}"),
            })?;

        Ok(Self {
            bind_addr: env_or("ROOST_BIND_ADDR", "0.0.0.0:3000"),
            db: DbConfig {
                url: env_or("ROOST_DB_URL", "127.0.0.1:8000"),
                namespace: env_or("ROOST_DB_NAMESPACE", "roost"),
                database: env_or("ROOST_DB_DATABASE", "main"),
                username: env_or("ROOST_DB_USERNAME", "root"),
                password: env_or("ROOST_DB_PASSWORD", "root"),
            },
            tokens: TokenConfig {
                secret,
                token_lifetime_secs,
                issuer: env_or("ROOST_JWT_ISSUER", "roost"),
            },
        })
    }
}
