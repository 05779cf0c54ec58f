//! Configuration lue depuis l'environnement (fichier .env chargé par dotenv).

use std::env;

use chrono::{Duration, Utc};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set in .env file")]
    Missing(&'static str),

    #[error("invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}

/// Compte Admin créé au démarrage s'il n'existe pas encore
#[derive(Debug, Clone)]
pub struct AdminSeed {
    pub username: String,
    pub password: String,
    pub email: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_ttl: Duration,
    pub admin: Option<AdminSeed>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = required("DATABASE_URL")?;
        let jwt_secret = required("JWT_SECRET")?;
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = parsed("PORT", 8080)?;
        let jwt_ttl = token_ttl("JWT_TTL_HOURS", parsed("JWT_TTL_HOURS", 24)?)?;

        let admin = match (env::var("ADMIN_USERNAME"), env::var("ADMIN_PASSWORD")) {
            (Ok(username), Ok(password)) => Some(AdminSeed {
                email: env::var("ADMIN_EMAIL")
                    .unwrap_or_else(|_| format!("{}@localhost", username)),
                username,
                password,
            }),
            _ => None,
        };

        Ok(Self {
            database_url,
            host,
            port,
            jwt_secret,
            jwt_ttl,
            admin,
        })
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::Missing(name))
}

fn parsed<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .parse()
            .map_err(|_| ConfigError::InvalidValue { name, value }),
        Err(_) => Ok(default),
    }
}

/// Durée de vie des jetons: strictement positive et représentable
/// une fois ajoutée à l'instant courant
fn token_ttl(name: &'static str, hours: i64) -> Result<Duration, ConfigError> {
    Duration::try_hours(hours)
        .filter(|ttl| *ttl > Duration::zero() && Utc::now().checked_add_signed(*ttl).is_some())
        .ok_or(ConfigError::InvalidValue {
            name,
            value: hours.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_ttl() {
        assert_eq!(token_ttl("JWT_TTL_HOURS", 24).unwrap(), Duration::hours(24));
    }

    #[test]
    fn test_token_ttl_out_of_range() {
        for hours in [0, -1, i64::MAX, 9_000_000_000_000] {
            match token_ttl("JWT_TTL_HOURS", hours) {
                Err(ConfigError::InvalidValue { name, value }) => {
                    assert_eq!(name, "JWT_TTL_HOURS");
                    assert_eq!(value, hours.to_string());
                }
                other => panic!("{} hours accepted: {:?}", hours, other),
            }
        }
    }
}
