// ============================================================================
// Chargement : historique de prix CSV
// ============================================================================
// Lit un fichier CSV (avec ligne d'en-tête) dans une PriceHistoryTable
//
// Aucune validation du schéma : on charge ce qui est là.
// Erreurs :
// - FileNotFound : le chemin n'existe pas
// - Parse : contenu CSV invalide (nombre de champs incohérent, UTF-8...)
// ============================================================================

use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use tracing::{debug, info, instrument};

use crate::error::LoadError;
use crate::models::PriceHistoryTable;

/// Chemin par défaut du CSV d'historique
pub const DEFAULT_CSV_PATH: &str = "data/AAPL.csv";

/// Charge l'historique de prix depuis un fichier CSV
///
/// CONCEPT RUST : AsRef<Path>
/// - Accepte &str, String, PathBuf, &Path...
/// - Une seule signature pour tous les types de chemins
///
/// # Exemple
/// let table = load_price_history("data/AAPL.csv")?;
/// println!("{} lignes", table.row_count());
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn load_price_history(path: impl AsRef<Path>) -> Result<PriceHistoryTable, LoadError> {
    let path = path.as_ref();

    debug!("Opening CSV file");
    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => LoadError::FileNotFound(path.to_path_buf()),
        _ => LoadError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    let table = read_price_history(file, path)?;

    match table.date_span() {
        Some((first, last)) => info!(
            rows = table.row_count(),
            columns = table.column_count(),
            %first,
            %last,
            "Price history loaded"
        ),
        None => info!(
            rows = table.row_count(),
            columns = table.column_count(),
            "Price history loaded"
        ),
    }

    Ok(table)
}

/// Parse un CSV depuis n'importe quel lecteur
///
/// `origin` ne sert qu'aux messages d'erreur.
pub fn read_price_history<R: Read>(reader: R, origin: &Path) -> Result<PriceHistoryTable, LoadError> {
    let parse_error = |source: csv::Error| LoadError::Parse {
        path: origin.to_path_buf(),
        source,
    };

    // flexible(false) : une ligne avec un nombre de champs différent de
    // l'en-tête est une erreur de parsing
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()
        .map_err(parse_error)?
        .iter()
        .map(|h| h.to_string())
        .collect();
    debug!(?headers, "Parsed CSV header");

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record.map_err(parse_error)?;
        rows.push(record.iter().map(|cell| cell.to_string()).collect());
    }

    Ok(PriceHistoryTable::from_rows(headers, rows))
}

// ============================================================================
// Tests unitaires
// ============================================================================
