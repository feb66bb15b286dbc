// FICHIER : src-engine/src/utils/mod.rs

// =========================================================================
//  LORE UTILS - Foundation Layer
// =========================================================================

// --- 1. MODULES INTERNES ---

pub mod config;
pub mod env;
pub mod error;
pub mod fs;
pub mod logger;
pub mod macros;

// --- 2. FAÇADES SÉMANTIQUES ---
// Points d'entrée que le code du moteur (genetics, neural, agents, society) DOIT utiliser.

/// **Core Foundation** : Types de base et Erreurs.
pub mod core {
    pub use super::error::{AppError, Result};
    pub use chrono::{DateTime, Utc};
    pub use uuid::Uuid;
}

/// **Physical Layer (I/O)** : Écritures atomiques pour les rapports.
pub mod io {
    pub use super::fs::{ensure_dir, read_json, write_json_atomic, Path, PathBuf};
}

/// **Application Context** : Accès global Config/Log/Env.
pub mod context {
    pub use super::config::AppConfig;
    pub use super::env::{EnvOverrides, LoreVar};
    pub use super::logger::init_logging;
}

/// **Le Prélude** : À utiliser via `use crate::utils::prelude::*;`
pub mod prelude {
    pub use super::context::AppConfig;
    pub use super::core::{AppError, DateTime, Result, Utc, Uuid};
    pub use serde::{Deserialize, Serialize};
    pub use tracing::{debug, error, info, instrument, warn};
}

// =========================================================================
// 3. EXPORTS COURANTS
// =========================================================================

pub use config::AppConfig;
pub use error::{AppError, Result};
pub use logger::init_logging;

pub use std::cmp::Ordering;
pub use std::collections::{BTreeMap, HashMap};
pub use std::sync::{Arc, Once, RwLock};
pub use std::time::Instant;
