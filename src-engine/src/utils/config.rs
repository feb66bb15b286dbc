// FICHIER : src-engine/src/utils/config.rs

use crate::genetics::types::{EvolutionParams, MAX_GENE_COUNT};
use crate::utils::env::{EnvOverrides, LoreVar};
use crate::utils::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::OnceLock;

/// Singleton global pour la configuration
static CONFIG: OnceLock<AppConfig> = OnceLock::new();
/// Vrai si `get()` a figé les valeurs par défaut avant tout `init()`.
static DEFAULTED: AtomicBool = AtomicBool::new(false);

/// Variables d'environnement reconnues (Single Source of Truth)
pub const ENV_CONFIG_PATH: &str = LoreVar::ConfigPath.key();
pub const ENV_MODE: &str = LoreVar::EnvMode.key();
pub const ENV_LOG_LEVEL: &str = LoreVar::LogLevel.key();
pub const ENV_LOG_DIR: &str = LoreVar::LogDir.key();
pub const ENV_LOG_JSON: &str = LoreVar::LogJson.key();
pub const ENV_SEED: &str = LoreVar::Seed.key();

pub const DEFAULT_MUTATION_STRENGTH: f64 = 0.1;
pub const DEFAULT_GENE_COUNT: usize = 16;

/// Configuration globale du moteur.
///
/// Priorité des sources : valeurs par défaut < fichier JSON (`LORE_CONFIG_PATH`)
/// < variables d'environnement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub core: CoreConfig,
    pub logging: LoggingConfig,

    // Validé à la désérialisation (serde try_from) : un fichier invalide
    // ne produit jamais d'EvolutionParams partiellement construit.
    pub evolution: EvolutionParams,

    pub mutation_strength: f64,
    pub gene_count: usize,
    pub seed: Option<u64>,
    pub society: SocietyConfig,
}

// --- SOUS-STRUCTURES DE CONFIGURATION ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CoreConfig {
    pub env_mode: String,
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct LoggingConfig {
    /// Dossier des logs JSON roulants. `None` = console uniquement.
    pub log_dir: Option<PathBuf>,
    pub json_file: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SocietyConfig {
    pub interactions_per_round: usize,
    /// Couches cachées du cerveau des agents. L'entrée et la sortie valent toujours
    /// `gene_count`, pour que cerveaux et agents sans cerveau décident sur la même largeur.
    pub brain_hidden_layers: Option<Vec<usize>>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            env_mode: "development".to_string(),
            log_level: "warn".to_string(),
        }
    }
}

impl Default for SocietyConfig {
    fn default() -> Self {
        Self {
            interactions_per_round: 50,
            brain_hidden_layers: None,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            core: CoreConfig::default(),
            logging: LoggingConfig::default(),
            evolution: EvolutionParams::default(),
            mutation_strength: DEFAULT_MUTATION_STRENGTH,
            gene_count: DEFAULT_GENE_COUNT,
            seed: None,
            society: SocietyConfig::default(),
        }
    }
}

// --- IMPLÉMENTATION PRINCIPALE ---

impl AppConfig {
    /// Charge la configuration une seule fois pour tout le processus.
    pub fn init() -> Result<()> {
        if CONFIG.get().is_some() {
            if Self::is_defaulted() {
                tracing::warn!(
                    "AppConfig::get() appelé avant init() : valeurs par défaut conservées, {} et variables LORE_* ignorés",
                    ENV_CONFIG_PATH
                );
            }
            return Ok(());
        }

        let config = Self::load()?;
        if CONFIG.set(config).is_err() {
            tracing::debug!("AppConfig déjà initialisée par un autre thread");
        }
        Ok(())
    }

    /// Configuration active. Sans `init()` préalable, renvoie les valeurs par défaut.
    pub fn get() -> &'static AppConfig {
        CONFIG.get_or_init(|| {
            DEFAULTED.store(true, Ordering::Relaxed);
            AppConfig::default()
        })
    }

    /// La configuration active vient-elle d'un `get()` prématuré ?
    pub fn is_defaulted() -> bool {
        DEFAULTED.load(Ordering::Relaxed)
    }

    /// Construit la configuration depuis le fichier (optionnel) et l'environnement,
    /// sans toucher au singleton.
    pub fn load() -> Result<Self> {
        let overrides = EnvOverrides::capture()?;
        let mut config = match &overrides.config_path {
            Some(path) => Self::load_from(path)?,
            None => Self::default(),
        };
        config.apply_env_overrides(overrides);
        config.validate()?;
        Ok(config)
    }

    /// Lecture pure d'un fichier JSON de configuration.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!(
                "Lecture impossible de {} : {}",
                path.display(),
                e
            ))
        })?;

        let config: AppConfig = serde_json::from_str(&raw).map_err(|e| {
            AppError::Config(format!("Fichier {} invalide : {}", path.display(), e))
        })?;
        config.validate()?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self, overrides: EnvOverrides) {
        if let Some(mode) = overrides.env_mode {
            self.core.env_mode = mode;
        }
        if let Some(level) = overrides.log_level {
            self.core.log_level = level;
        }
        if overrides.log_dir.is_some() {
            self.logging.log_dir = overrides.log_dir;
        }
        if overrides.log_json {
            self.logging.json_file = true;
        }
        if overrides.seed.is_some() {
            self.seed = overrides.seed;
        }
    }

    /// Contrôles transverses que serde ne peut pas exprimer.
    pub fn validate(&self) -> Result<()> {
        if !self.mutation_strength.is_finite() || self.mutation_strength < 0.0 {
            return Err(AppError::Config(format!(
                "mutation_strength doit être fini et >= 0, reçu {}",
                self.mutation_strength
            )));
        }
        if self.gene_count == 0 || self.gene_count > MAX_GENE_COUNT {
            return Err(AppError::Config(format!(
                "gene_count doit être entre 1 et {}, reçu {}",
                MAX_GENE_COUNT, self.gene_count
            )));
        }
        if let Some(hidden) = &self.society.brain_hidden_layers {
            if hidden.contains(&0) {
                return Err(AppError::Config(format!(
                    "brain_hidden_layers invalide : {:?}",
                    hidden
                )));
            }
        }
        Ok(())
    }

    pub fn is_test(&self) -> bool {
        self.core.env_mode == "test"
    }
}

/// Injection d'une configuration de test (sans fichier ni variables d'environnement).
pub mod test_mocks {
    use super::*;

    pub fn create_default_test_config() -> AppConfig {
        AppConfig {
            core: CoreConfig {
                env_mode: "test".to_string(),
                log_level: "debug".to_string(),
            },
            seed: Some(42),
            ..AppConfig::default()
        }
    }

    pub fn inject_mock_config() {
        if CONFIG.get().is_some() {
            return;
        }
        let _ = CONFIG.set(create_default_test_config());
    }
}

// --- TESTS UNITAIRES ---
#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("fichier temporaire");
        file.write_all(content.as_bytes()).expect("écriture");
        file
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.evolution.population_size(), 100);
        assert_eq!(config.mutation_strength, DEFAULT_MUTATION_STRENGTH);
    }

    #[test]
    fn test_load_from_partial_file_keeps_defaults() {
        let file = write_temp(
            r#"{
                "gene_count": 8,
                "evolution": { "population_size": 20, "elitism_count": 2, "tournament_size": 3 },
                "society": { "brain_hidden_layers": [6, 3] }
            }"#,
        );

        let config = AppConfig::load_from(file.path()).expect("config valide");
        assert_eq!(config.gene_count, 8);
        assert_eq!(config.evolution.population_size(), 20);
        assert_eq!(config.evolution.elitism_count(), 2);
        // Champs absents -> valeurs par défaut
        assert_eq!(config.evolution.crossover_rate(), 0.8);
        assert_eq!(config.core.log_level, "warn");
        assert_eq!(config.society.brain_hidden_layers, Some(vec![6, 3]));
    }

    #[test]
    fn test_load_from_rejects_invalid_evolution_params() {
        let file = write_temp(r#"{ "evolution": { "mutation_rate": 1.5 } }"#);

        match AppConfig::load_from(file.path()) {
            Err(AppError::Config(msg)) => assert!(msg.contains("mutation_rate")),
            other => panic!("Devrait être une erreur de configuration : {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_zero_width_layer() {
        let mut config = AppConfig::default();
        config.society.brain_hidden_layers = Some(vec![]);
        assert!(config.validate().is_ok());

        config.society.brain_hidden_layers = Some(vec![4, 0]);
        assert!(config.validate().is_err());
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        std::env::set_var(ENV_SEED, "1234");
        std::env::set_var(ENV_LOG_LEVEL, "info");
        std::env::set_var(ENV_LOG_JSON, "yes");
        std::env::remove_var(ENV_CONFIG_PATH);

        let config = AppConfig::load().expect("chargement");
        assert_eq!(config.seed, Some(1234));
        assert_eq!(config.core.log_level, "info");
        assert!(config.logging.json_file);

        std::env::set_var(ENV_SEED, "abc");
        assert!(AppConfig::load().is_err());

        std::env::remove_var(ENV_SEED);
        std::env::remove_var(ENV_LOG_LEVEL);
        std::env::remove_var(ENV_LOG_JSON);
    }

    #[test]
    fn test_get_never_panics() {
        test_mocks::inject_mock_config();
        let config = AppConfig::get();
        assert!(config.validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_init_after_get_keeps_singleton() {
        let before = AppConfig::get().clone();
        AppConfig::init().expect("init sans effet");
        assert_eq!(AppConfig::get(), &before);
        // Le drapeau n'est levé que si `get()` a lui-même créé la configuration
        if AppConfig::is_defaulted() {
            assert_eq!(before, AppConfig::default());
        } else {
            assert!(before.is_test());
        }
    }
}
