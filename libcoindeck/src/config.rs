//! Configuration management for coindeck

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{ConfigError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ui: UiSection,
    #[serde(default)]
    pub market: MarketSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiSection {
    /// Event-loop tick rate in milliseconds.
    pub tick_rate_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSection {
    /// Symbols shown on the Market tab.
    pub symbols: Vec<String>,
    /// Simulated fetch latency of the sample source, in milliseconds.
    pub sample_latency_ms: u64,
}

impl Default for UiSection {
    fn default() -> Self {
        Self { tick_rate_ms: 100 }
    }
}

impl Default for MarketSection {
    fn default() -> Self {
        Self {
            symbols: vec![
                "BTC".to_string(),
                "ETH".to_string(),
                "SOL".to_string(),
                "ADA".to_string(),
            ],
            sample_latency_ms: 150,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ui: UiSection::default(),
            market: MarketSection::default(),
        }
    }
}

impl Config {
    /// Load configuration from the default location, falling back to
    /// defaults when no config file exists.
    pub fn load() -> Result<Self> {
        let config_path = resolve_config_path()?;
        if config_path.exists() {
            Self::load_from_path(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let config: Config = toml::from_str(&content).map_err(ConfigError::ParseError)?;
        Ok(config)
    }
}

/// Resolve the configuration file path following XDG Base Directory spec
pub fn resolve_config_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var("COINDECK_CONFIG") {
        return Ok(PathBuf::from(shellexpand::tilde(&path).to_string()));
    }

    let config_dir = dirs::config_dir()
        .ok_or_else(|| ConfigError::MissingField("config directory".to_string()))?;

    Ok(config_dir.join("coindeck").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.ui.tick_rate_ms, 100);
        assert_eq!(config.market.sample_latency_ms, 150);
        assert!(config.market.symbols.contains(&"BTC".to_string()));
    }

    #[test]
    fn test_load_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[ui]
tick_rate_ms = 250

[market]
symbols = ["BTC", "ETH"]
sample_latency_ms = 10
"#
        )
        .unwrap();

        let config = Config::load_from_path(&file.path().to_path_buf()).unwrap();
        assert_eq!(config.ui.tick_rate_ms, 250);
        assert_eq!(config.market.symbols, vec!["BTC", "ETH"]);
        assert_eq!(config.market.sample_latency_ms, 10);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[ui]
tick_rate_ms = 50
"#
        )
        .unwrap();

        let config = Config::load_from_path(&file.path().to_path_buf()).unwrap();
        assert_eq!(config.ui.tick_rate_ms, 50);
        assert_eq!(config.market, MarketSection::default());
    }

    #[test]
    fn test_invalid_toml_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[ui").unwrap();

        let result = Config::load_from_path(&file.path().to_path_buf());
        assert!(matches!(
            result,
            Err(crate::error::CoindeckError::Config(ConfigError::ParseError(_)))
        ));
    }

    #[test]
    #[serial]
    fn test_config_path_env_override() {
        std::env::set_var("COINDECK_CONFIG", "/tmp/coindeck-test.toml");
        let path = resolve_config_path().unwrap();
        std::env::remove_var("COINDECK_CONFIG");

        assert_eq!(path, PathBuf::from("/tmp/coindeck-test.toml"));
    }

    #[test]
    #[serial]
    fn test_config_path_defaults_to_xdg() {
        std::env::remove_var("COINDECK_CONFIG");
        let path = resolve_config_path().unwrap();
        assert!(path.ends_with("coindeck/config.toml"));
    }
}
