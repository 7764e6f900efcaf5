// ============================================================================
// Module : data
// ============================================================================
// Sources de données locales (fichiers)
// ============================================================================

pub mod loader; // Lecture du CSV d'historique de prix

pub use loader::{load_price_history, read_price_history, DEFAULT_CSV_PATH};
