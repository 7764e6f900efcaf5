// ============================================================================
// Module : error
// ============================================================================
// Erreurs typées de la bibliothèque
//
// CONCEPT RUST : thiserror
// - #[derive(Error)] génère l'implémentation de std::error::Error
// - #[error("...")] définit le message Display
// - #[source] chaîne l'erreur d'origine (visible avec {:?} dans anyhow)
//
// Le binaire utilise anyhow au-dessus de ces types pour ajouter du contexte.
// ============================================================================

use std::path::PathBuf;

use thiserror::Error;

/// Erreurs du chargement de l'historique de prix (CSV local)
#[derive(Debug, Error)]
pub enum LoadError {
    /// Le fichier n'existe pas
    #[error("Fichier introuvable : {}", .0.display())]
    FileNotFound(PathBuf),

    /// Le fichier existe mais ne peut pas être lu (permissions, etc.)
    #[error("Lecture impossible de {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Le contenu n'est pas un CSV valide
    #[error("CSV invalide dans {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Erreurs de la récupération d'une métrique distante
#[derive(Debug, Error)]
pub enum FetchError {
    /// Le client HTTP n'a pas pu être construit
    #[error("Échec de la création du client HTTP : {0}")]
    Client(String),

    /// Échec de connexion, timeout, corps illisible...
    #[error("Erreur réseau : {0}")]
    Network(String),

    /// Le fournisseur a répondu avec un statut d'erreur
    #[error("Le fournisseur a retourné une erreur (HTTP {status}) : {message}")]
    Service { status: u16, message: String },

    /// La réponse n'est pas du JSON exploitable
    #[error("Réponse illisible : {0}")]
    Decode(String),

    /// Une clé attendue est absente de la réponse
    #[error("Champ manquant : {0}")]
    MissingField(String),

    /// Le champ est présent mais n'est pas un nombre
    #[error("Champ {field} non numérique : {value}")]
    InvalidField { field: String, value: String },
}

impl FetchError {
    /// Vrai pour les erreurs de transport (connexion, timeout)
    pub fn is_network(&self) -> bool {
        matches!(self, FetchError::Network(_))
    }
}
