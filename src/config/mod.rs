//! Engine configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `MCDA_ENGINE` prefix and nested values use double underscores as separators.
//! An optional JSON or YAML file can supply the same keys; environment variables
//! override it.
//!
//! # Example
//!
//! ```no_run
//! use mcda_engine::config::EngineConfig;
//!
//! let config = EngineConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("VIKOR v = {}", config.methods.vikor_v);
//! ```

mod error;
mod logging;

pub use error::{ConfigError, ValidationError};
pub use logging::LoggingConfig;

use serde::Deserialize;
use std::path::Path;

use crate::domain::calculation::{CalculationError, EngineRegistry, MethodOptions};

const ENV_PREFIX: &str = "MCDA_ENGINE";

/// Root engine configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EngineConfig {
    /// Log filter and output format
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Parameters of the tunable methods
    #[serde(default)]
    pub methods: MethodOptions,
}

impl EngineConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `MCDA_ENGINE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `MCDA_ENGINE__LOGGING__LEVEL=debug` -> `logging.level = "debug"`
    /// - `MCDA_ENGINE__METHODS__VIKOR_V=0.3` -> `methods.vikor_v = 0.3`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration from a file, then apply environment overrides.
    ///
    /// The file format follows its extension (`.json`, `.yaml`, `.yml`, `.toml`).
    pub fn load_with_file(path: &Path) -> Result<Self, ConfigError> {
        Self::load_from(Some(path))
    }

    fn load_from(path: Option<&Path>) -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let config = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// Checks the log filter and builds every engine once, so an out-of-range
    /// method parameter is reported before any calculation runs.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.logging.validate()?;
        self.registry()?;
        Ok(())
    }

    /// Build the engine registry described by `methods`.
    pub fn registry(&self) -> Result<EngineRegistry, ValidationError> {
        EngineRegistry::new(&self.methods).map_err(|err| match err {
            CalculationError::InvalidParameter { name, reason } => {
                ValidationError::InvalidMethodOption { name, reason }
            }
            other => ValidationError::InvalidMethodOption {
                name: "methods".to_string(),
                reason: other.to_string(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::calculation::methods::{PreferenceFunction, WpNormalization};
    use std::env;
    use std::io::Write;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: [&str; 6] = [
        "MCDA_ENGINE__LOGGING__LEVEL",
        "MCDA_ENGINE__LOGGING__JSON",
        "MCDA_ENGINE__METHODS__VIKOR_V",
        "MCDA_ENGINE__METHODS__WP_NORMALIZATION",
        "MCDA_ENGINE__METHODS__PROMETHEE_PREFERENCE__KIND",
        "MCDA_ENGINE__METHODS__PROMETHEE_PREFERENCE__P",
    ];

    /// Helper to clear environment variables after testing
    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_load_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = EngineConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.logging, LoggingConfig::default());
        assert_eq!(config.methods, MethodOptions::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("MCDA_ENGINE__LOGGING__LEVEL", "warn");
        env::set_var("MCDA_ENGINE__LOGGING__JSON", "true");
        env::set_var("MCDA_ENGINE__METHODS__VIKOR_V", "0.3");
        env::set_var("MCDA_ENGINE__METHODS__WP_NORMALIZATION", "vector");
        let result = EngineConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.logging.level, "warn");
        assert!(config.logging.json);
        assert_eq!(config.methods.vikor_v, 0.3);
        assert_eq!(config.methods.wp_normalization, WpNormalization::Vector);
    }

    #[test]
    fn test_preference_function_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("MCDA_ENGINE__METHODS__PROMETHEE_PREFERENCE__KIND", "linear");
        env::set_var("MCDA_ENGINE__METHODS__PROMETHEE_PREFERENCE__P", "0.25");
        let result = EngineConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(
            config.methods.promethee_preference,
            PreferenceFunction::Linear { p: 0.25 }
        );
    }

    #[test]
    fn test_validate_rejects_out_of_range_v() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("MCDA_ENGINE__METHODS__VIKOR_V", "1.5");
        let result = EngineConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidMethodOption { ref name, .. }) if name == "vikor_v"
        ));
    }

    #[test]
    fn test_load_with_yaml_file() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();

        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(
            file,
            "methods:\n  ahp_pairwise:\n    - [1.0, 3.0]\n    - [0.3333333333, 1.0]\n  electre_thresholds:\n    concordance: 0.6"
        )
        .unwrap();

        let config = EngineConfig::load_with_file(file.path()).unwrap();
        assert_eq!(config.methods.ahp_pairwise.as_ref().map(|m| m.len()), Some(2));
        assert_eq!(config.methods.electre_thresholds.concordance, Some(0.6));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_environment_overrides_file() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"methods": {{"vikor_v": 0.2}}}}"#).unwrap();

        env::set_var("MCDA_ENGINE__METHODS__VIKOR_V", "0.8");
        let result = EngineConfig::load_with_file(file.path());
        clear_env();

        assert_eq!(result.unwrap().methods.vikor_v, 0.8);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let result = EngineConfig::load_with_file(Path::new("/nonexistent/mcda.yaml"));
        assert!(matches!(result, Err(ConfigError::LoadError(_))));
    }

    #[test]
    fn test_registry_serves_all_methods() {
        let registry = EngineConfig::default().registry().unwrap();
        assert_eq!(registry.methods().len(), 8);
    }
}
