// FICHIER : src-engine/src/utils/env.rs

use crate::utils::{AppError, Result};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// Variables d'environnement reconnues par le moteur.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoreVar {
    ConfigPath,
    EnvMode,
    LogLevel,
    LogDir,
    LogJson,
    Seed,
}

impl LoreVar {
    pub const ALL: [LoreVar; 6] = [
        LoreVar::ConfigPath,
        LoreVar::EnvMode,
        LoreVar::LogLevel,
        LoreVar::LogDir,
        LoreVar::LogJson,
        LoreVar::Seed,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            LoreVar::ConfigPath => "LORE_CONFIG_PATH",
            LoreVar::EnvMode => "LORE_ENV_MODE",
            LoreVar::LogLevel => "LORE_LOG_LEVEL",
            LoreVar::LogDir => "LORE_LOG_DIR",
            LoreVar::LogJson => "LORE_LOG_JSON",
            LoreVar::Seed => "LORE_SEED",
        }
    }

    /// Valeur brute. Une valeur vide ou blanche est traitée comme absente.
    pub fn read(self) -> Option<String> {
        env::var(self.key()).ok().filter(|v| !v.trim().is_empty())
    }

    /// Valeur parsée : `Ok(None)` si absente, erreur `Config` si illisible.
    pub fn parse<T: FromStr>(self) -> Result<Option<T>> {
        match self.read() {
            None => Ok(None),
            Some(raw) => raw.trim().parse::<T>().map(Some).map_err(|_| {
                AppError::Config(format!("Valeur illisible pour {} : {:?}", self.key(), raw))
            }),
        }
    }

    /// Drapeau booléen ("true", "1", "yes", "on").
    pub fn is_enabled(self) -> bool {
        matches!(
            self.read().map(|v| v.trim().to_ascii_lowercase()).as_deref(),
            Some("true") | Some("1") | Some("yes") | Some("on")
        )
    }
}

/// Photographie des variables `LORE_*`, lue une fois au chargement de la configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnvOverrides {
    pub config_path: Option<PathBuf>,
    pub env_mode: Option<String>,
    pub log_level: Option<String>,
    pub log_dir: Option<PathBuf>,
    pub log_json: bool,
    pub seed: Option<u64>,
}

impl EnvOverrides {
    pub fn capture() -> Result<Self> {
        Ok(Self {
            config_path: LoreVar::ConfigPath.read().map(PathBuf::from),
            env_mode: LoreVar::EnvMode.read(),
            log_level: LoreVar::LogLevel.read(),
            log_dir: LoreVar::LogDir.read().map(PathBuf::from),
            log_json: LoreVar::LogJson.is_enabled(),
            seed: LoreVar::Seed.parse::<u64>()?,
        })
    }
}
