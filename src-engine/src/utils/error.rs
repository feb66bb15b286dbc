use serde::Serialize;
use std::io;

// --- RE-EXPORTS ANYHOW (Pour la flexibilité du CLI) ---
pub use anyhow::{anyhow, Context};
// On renomme le Result de anyhow pour ne pas qu'il écrase le nôtre
pub use anyhow::Result as AnyResult;

// --- GESTION D'ERREUR STRICTE ---

/// Type de résultat standard du moteur Lore.
pub type Result<T> = std::result::Result<T, AppError>;

/// Enumération centrale des erreurs du moteur.
///
/// Toutes les variantes sont récupérables par l'appelant : le moteur ne
/// journalise jamais une erreur pour ensuite continuer avec un état corrompu.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Paramètres malformés détectés à la construction.
    #[error("Erreur de validation : {0}")]
    Validation(String),

    /// Vecteurs ou génomes de longueurs incohérentes.
    #[error("Dimensions incompatibles ({context}) : attendu {expected}, reçu {actual}")]
    DimensionMismatch {
        context: String,
        expected: usize,
        actual: usize,
    },

    /// Opération invoquée hors de ses préconditions (fitness absente, société vide...).
    #[error("Précondition non satisfaite : {0}")]
    Precondition(String),

    /// Échec de la fonction de fitness fournie par l'appelant.
    #[error("Échec d'évaluation : {0}")]
    Evaluation(String),

    #[error("Identifiant déjà présent : {0}")]
    DuplicateId(String),

    #[error("Introuvable : {0}")]
    NotFound(String),

    #[error("Erreur de configuration : {0}")]
    Config(String),

    #[error("Erreur d'entrée/sortie : {0}")]
    Io(#[from] io::Error),

    #[error("Erreur de sérialisation : {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Erreur Système : {0}")]
    System(#[from] anyhow::Error),
}

impl AppError {
    /// Raccourci pour construire une erreur de dimension.
    pub fn dimension(context: impl Into<String>, expected: usize, actual: usize) -> Self {
        AppError::DimensionMismatch {
            context: context.into(),
            expected,
            actual,
        }
    }
}

// Sérialisation en simple chaîne : les couches externes (CLI JSON, API) n'ont
// besoin que du message.
impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(self.to_string().as_ref())
    }
}

// Permet de faire : return Err("Mon erreur".into());
impl From<String> for AppError {
    fn from(s: String) -> Self {
        AppError::System(anyhow::anyhow!(s))
    }
}

impl From<&str> for AppError {
    fn from(s: &str) -> Self {
        AppError::System(anyhow::anyhow!(s.to_string()))
    }
}
