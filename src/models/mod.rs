// ============================================================================
// Module : models
// ============================================================================
// Structures de données de l'application
// ============================================================================

pub mod price_history; // Table chargée depuis le CSV local
pub mod ticker_info;   // Fiche d'informations retournée par le fournisseur

// Re-export des structures principales pour simplifier les imports
// On peut faire : use peratio::models::PriceHistoryTable;
pub use price_history::{Column, ColumnKind, ColumnValues, PriceHistoryTable};
pub use ticker_info::{TickerInfoRecord, TRAILING_PE_FIELD};
