//! Error types for coindeck

use thiserror::Error;

pub use crate::market::MarketError;
pub use crate::nav::NavError;
pub use crate::store::{StoreError, TaskError};

pub type Result<T> = std::result::Result<T, CoindeckError>;

#[derive(Error, Debug)]
pub enum CoindeckError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Task error: {0}")]
    Task(#[from] TaskError),

    #[error("Navigation error: {0}")]
    Nav(#[from] NavError),

    #[error("Market error: {0}")]
    Market(#[from] MarketError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing required field: {0}")]
    MissingField(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_includes_source() {
        let err = CoindeckError::from(NavError::UnknownRoute("Settings".to_string()));
        assert!(err.to_string().contains("Settings"));

        let err = CoindeckError::from(StoreError::NestedDispatch);
        assert!(err.to_string().contains("Store error"));
    }

    #[test]
    fn test_config_error_missing_field() {
        let err = ConfigError::MissingField("config directory".to_string());
        assert!(err.to_string().contains("config directory"));
    }
}
