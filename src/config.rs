//! Configuration loading
//!
//! Environments are declared in the project-local `.shipway/config.toml`:
//!
//! ```toml
//! [environments.staging]
//! application = "MyApp"
//! app_root = "/srv/app"
//! destination = "deploy@staging.example.com"
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::environment::Environment;
use crate::error::{ShipwayError, ShipwayResult};

/// One `[environments.<name>]` table.
#[derive(Debug, Clone, Deserialize)]
pub struct EnvironmentConfig {
    pub application: String,
    pub app_root: String,
    pub destination: String,
}

/// Top-level configuration file contents.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub environments: BTreeMap<String, EnvironmentConfig>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> ShipwayResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ShipwayError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::parse(&content).map_err(|message| ShipwayError::Config {
            path: path.to_path_buf(),
            message,
        })
    }

    /// Parse configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Resolve a named environment, or fail listing the known names.
    pub fn environment(&self, name: &str) -> ShipwayResult<Environment> {
        match self.environments.get(name) {
            Some(cfg) => Ok(Environment {
                name: name.to_string(),
                application: cfg.application.clone(),
                app_root: cfg.app_root.clone(),
                destination: cfg.destination.clone(),
            }),
            None => {
                let known = if self.environments.is_empty() {
                    "(none)".to_string()
                } else {
                    self.environments
                        .keys()
                        .cloned()
                        .collect::<Vec<_>>()
                        .join(", ")
                };
                Err(ShipwayError::UnknownEnvironment {
                    name: name.to_string(),
                    known,
                })
            }
        }
    }
}
