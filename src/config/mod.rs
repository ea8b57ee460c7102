mod types;

pub use types::{Config, DatabaseConfig, EntityConfig, ServerConfig};

use crate::error::{Result, TablegateError};
use std::fs;

/// Load configuration from a TOML file
pub fn load_config(path: &str) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .map_err(|e| TablegateError::Config(format!("Failed to read config file '{}': {}", path, e)))?;

    let config: Config = toml::from_str(&contents)?;

    // Validate all entities
    for entity in &config.entity {
        entity.validate().map_err(TablegateError::Config)?;
    }

    if config.entity.is_empty() {
        return Err(TablegateError::Config(
            "configuration declares no entities".to_string(),
        ));
    }

    Ok(config)
}

/// Save configuration to a TOML file
pub fn save_config(config: &Config, path: &str) -> Result<()> {
    for entity in &config.entity {
        entity.validate().map_err(TablegateError::Config)?;
    }

    let toml_string = toml::to_string_pretty(config)?;
    fs::write(path, toml_string)
        .map_err(|e| TablegateError::Config(format!("Failed to write config file '{}': {}", path, e)))?;

    Ok(())
}
