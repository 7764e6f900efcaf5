// ============================================================================
// Module : api
// ============================================================================
// Clients pour récupérer les données financières distantes
// ============================================================================

pub mod http;     // Transport HTTP (trait + implémentation reqwest)
pub mod provider; // Trait InfoProvider et lecture des métriques
pub mod yahoo;    // Client API Yahoo Finance

// Re-export des fonctions principales
pub use provider::{fetch_metric, fetch_trailing_pe, InfoProvider, MissingPolicy};
pub use yahoo::YahooProvider;
