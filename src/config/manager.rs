use super::{evolution::EvolutionConfig, grammar::GrammarConfig, traits::ConfigSection};
use crate::error::GaCoreError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

/// Prefix for environment overrides, e.g. `GACORE_EVOLUTION__POPULATION_SIZE=200`
pub const ENV_PREFIX: &str = "GACORE";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub evolution: EvolutionConfig,
    pub grammar: GrammarConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), GaCoreError> {
        self.evolution.validate()?;
        self.grammar.validate()?;
        Ok(())
    }
}

pub struct ConfigManager {
    config: Arc<RwLock<AppConfig>>,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            config: Arc::new(RwLock::new(AppConfig::default())),
        }
    }

    /// Load a TOML file, layering `GACORE_*` environment overrides on top
    pub fn load_from_file<P: AsRef<Path>>(&self, path: P) -> Result<(), GaCoreError> {
        let settings = ::config::Config::builder()
            .add_source(::config::File::from(path.as_ref()).format(::config::FileFormat::Toml))
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: AppConfig = settings.try_deserialize()?;
        config.validate()?;

        log::debug!("Loaded configuration from {}", path.as_ref().display());
        *self.config.write().unwrap_or_else(PoisonError::into_inner) = config;
        Ok(())
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), GaCoreError> {
        let config = self.get();
        let toml_str = toml::to_string_pretty(&config)?;
        std::fs::write(path, toml_str)?;
        Ok(())
    }

    pub fn get(&self) -> AppConfig {
        self.config
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Apply `f` and keep the result only if it still validates
    pub fn update<F>(&self, f: F) -> Result<(), GaCoreError>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut config = self.config.write().unwrap_or_else(PoisonError::into_inner);
        let mut updated = config.clone();
        f(&mut updated);
        updated.validate()?;
        *config = updated;
        Ok(())
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_partial_file_keeps_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[evolution]\npopulation_size = 24\nseed = 7\n").unwrap();

        let manager = ConfigManager::new();
        manager.load_from_file(file.path()).unwrap();
        let config = manager.get();
        assert_eq!(config.evolution.population_size, 24);
        assert_eq!(config.evolution.seed, Some(7));
        assert_eq!(config.evolution.chromosome_length, EvolutionConfig::default().chromosome_length);
        assert_eq!(config.grammar, GrammarConfig::default());
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[evolution]\npopulation_size = 2\n").unwrap();

        let manager = ConfigManager::new();
        assert!(manager.load_from_file(file.path()).is_err());
        assert_eq!(manager.get(), AppConfig::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gacore.toml");

        let manager = ConfigManager::new();
        manager
            .update(|c| {
                c.evolution.mutation_rate = 0.2;
                c.grammar.max_depth = 32;
            })
            .unwrap();
        manager.save_to_file(&path).unwrap();

        let reloaded = ConfigManager::new();
        reloaded.load_from_file(&path).unwrap();
        assert_eq!(reloaded.get(), manager.get());
    }

    #[test]
    fn test_invalid_update_is_discarded() {
        let manager = ConfigManager::new();
        assert!(manager.update(|c| c.evolution.crossover_rate = 2.0).is_err());
        assert_eq!(manager.get(), AppConfig::default());
    }
}
