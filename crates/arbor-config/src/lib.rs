//! # arbor-config
//!
//! Layered configuration loading for Arbor using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`ARBOR_*` prefix, `__` as separator)
//! 2. Project-level `arbor.toml`
//! 3. User-level `~/.config/arbor/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `ARBOR_SERVER__PORT` -> `server.port`,
//! `ARBOR_DATABASE__PATH` -> `database.path`, etc. The `__` (double
//! underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use arbor_config::ArborConfig;
//!
//! // Load from all sources (dotenvy + TOML + env):
//! let config = ArborConfig::load_with_dotenv().expect("config");
//! println!("listening on {}", config.server.bind_addr());
//! ```

mod database;
mod error;
mod server;

pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use server::ServerConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ArborConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
}

impl ArborConfig {
    /// Load configuration from all sources (TOML files + environment
    /// variables).
    ///
    /// Does NOT call `dotenvy` — use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a provider fails to merge or extract.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    ///
    /// Loads `.env` from the current directory before building the figment.
    /// This is the typical entry point for the server binary and tests.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a provider fails to merge or extract.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or stack additional
    /// providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from("arbor.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("ARBOR_").split("__"))
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("arbor").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_config_loads() {
        let config = ArborConfig::default();
        assert_eq!(config.server.port, 4860);
        assert_eq!(config.database.path, "arbor.db");
    }

    #[test]
    fn figment_builds_without_files() {
        figment::Jail::expect_with(|_jail| {
            let config: ArborConfig = ArborConfig::figment().extract()?;
            assert_eq!(config.server.host, "127.0.0.1");
            assert!(!config.database.is_in_memory());
            Ok(())
        });
    }

    #[test]
    fn env_vars_override_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("ARBOR_SERVER__PORT", "8099");
            jail.set_env("ARBOR_DATABASE__PATH", ":memory:");
            let config: ArborConfig = ArborConfig::figment().extract()?;
            assert_eq!(config.server.port, 8099);
            assert!(config.database.is_in_memory());
            Ok(())
        });
    }

    #[test]
    fn project_toml_layers_under_env() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "arbor.toml",
                r#"
                [server]
                port = 9000
                host = "0.0.0.0"

                [database]
                path = "from-toml.db"
                "#,
            )?;
            jail.set_env("ARBOR_DATABASE__PATH", "from-env.db");
            let config: ArborConfig = ArborConfig::figment().extract()?;
            assert_eq!(config.server.port, 9000);
            assert_eq!(config.server.host, "0.0.0.0");
            assert_eq!(config.database.path, "from-env.db", "env wins over TOML");
            Ok(())
        });
    }
}
