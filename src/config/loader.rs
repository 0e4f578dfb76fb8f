//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the client
//! configuration from a YAML file.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EvalError, EvalResult};

use super::types::ClientConfig;

/// Loads and provides access to the client configuration.
///
/// # Example
///
/// ```no_run
/// use plexus_evaluations::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/plexus.yaml").unwrap();
/// println!("Backend: {}", loader.config().base_url);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: ClientConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified YAML file.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - The file is missing or unreadable
    /// - The file contains invalid YAML
    pub fn load<P: AsRef<Path>>(path: P) -> EvalResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EvalError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let config = Self::parse(&content).map_err(|message| EvalError::ConfigParseError {
            path: path_str.clone(),
            message,
        })?;

        debug!(path = %path_str, base_url = %config.base_url, "Loaded client configuration");
        Ok(Self { config })
    }

    /// Parses configuration from YAML text.
    fn parse(content: &str) -> Result<ClientConfig, String> {
        // An empty file is a valid, all-defaults configuration.
        if content.trim().is_empty() {
            return Ok(ClientConfig::default());
        }
        serde_yaml::from_str(content).map_err(|e| e.to_string())
    }

    /// Returns the loaded configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Consumes the loader and returns the configuration.
    pub fn into_config(self) -> ClientConfig {
        self.config
    }
}
