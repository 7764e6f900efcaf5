// ============================================================================
// peratio - Library
// ============================================================================
// Expose les modules publics pour le binaire et les tests
// ============================================================================

pub mod api;    // API Yahoo Finance
pub mod app;    // Exécution séquentielle (CSV puis P/E)
pub mod cli;    // Arguments clap
pub mod config; // Configuration du fournisseur
pub mod data;   // Chargement du CSV local
pub mod error;  // Erreurs typées
pub mod models; // Structures de données
