// FICHIER : src-engine/src/utils/fs.rs

use crate::utils::error::{AppError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::Write;
use tracing::instrument;

// --- RE-EXPORTS (Isolation de la couche OS) ---
pub use std::path::{Path, PathBuf};

/// Crée le dossier (et ses parents) s'il n'existe pas.
pub fn ensure_dir(path: impl AsRef<Path>) -> Result<()> {
    let p = path.as_ref();
    if !p.exists() {
        fs::create_dir_all(p)?;
    }
    Ok(())
}

/// Lit et désérialise un fichier JSON.
pub fn read_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let p = path.as_ref();
    let raw = fs::read_to_string(p)
        .map_err(|e| AppError::NotFound(format!("{} ({})", p.display(), e)))?;
    Ok(serde_json::from_str(&raw)?)
}

/// Écriture atomique : fichier temporaire dans le même dossier puis `rename`.
/// Un lecteur concurrent voit l'ancien contenu ou le nouveau, jamais un fichier tronqué.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn write_json_atomic<T: Serialize + ?Sized>(path: impl AsRef<Path>, value: &T) -> Result<()> {
    let target = path.as_ref();
    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir(parent)?;
    }

    let file_name = target
        .file_name()
        .ok_or_else(|| AppError::Validation(format!("Chemin sans nom de fichier : {:?}", target)))?;
    let tmp_path = target.with_file_name(format!(".{}.tmp", file_name.to_string_lossy()));

    let payload = serde_json::to_vec_pretty(value)?;
    let written = fs::File::create(&tmp_path)
        .and_then(|mut file| {
            file.write_all(&payload)?;
            file.sync_all()
        })
        .and_then(|_| fs::rename(&tmp_path, target));

    // Le fichier temporaire ne survit à aucun échec
    if let Err(e) = written {
        let _ = fs::remove_file(&tmp_path);
        return Err(e.into());
    }
    tracing::debug!("Écriture atomique terminée ({} octets)", payload.len());
    Ok(())
}
