// ABOUTME: Server configuration loaded from environment variables
// ABOUTME: Port, CORS origin, and database path with sensible defaults

use std::env;
use std::num::ParseIntError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid port number: {0}")]
    InvalidPort(#[from] ParseIntError),
    #[error("Port {0} is out of valid range (1-65535)")]
    PortOutOfRange(u16),
}

#[derive(Debug)]
pub struct Config {
    pub port: u16,
    pub cors_origin: String,
    pub database_path: Option<PathBuf>,
}

fn parse_port(value: &str) -> Result<u16, ConfigError> {
    let port = value.parse::<u16>()?;
    if port == 0 {
        return Err(ConfigError::PortOutOfRange(port));
    }
    Ok(port)
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let port_str = env::var("PORT").unwrap_or_else(|_| "4200".to_string());
        let port = parse_port(&port_str)?;

        let cors_origin =
            env::var("CORS_ORIGIN").unwrap_or_else(|_| "http://localhost:5173".to_string());

        // Unset means the default location under the user's home directory
        let database_path = env::var("GAMEPLAN_DB_PATH").ok().map(PathBuf::from);

        Ok(Config {
            port,
            cors_origin,
            database_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_port_parses() {
        assert_eq!(parse_port("4200").unwrap(), 4200);
    }

    #[test]
    fn zero_port_is_rejected() {
        assert!(matches!(
            parse_port("0"),
            Err(ConfigError::PortOutOfRange(0))
        ));
    }

    #[test]
    fn garbage_port_is_rejected() {
        assert!(matches!(
            parse_port("not-a-port"),
            Err(ConfigError::InvalidPort(_))
        ));
    }
}
