// ============================================================================
// Exécution : chargement CSV puis récupération du P/E
// ============================================================================
// Deux étapes indépendantes, exécutées l'une après l'autre :
// 1. Charge l'historique de prix (le résultat n'est pas réutilisé)
// 2. Récupère le P/E trailing et l'écrit sur la sortie
//
// Toute erreur est remontée telle quelle (avec contexte anyhow) :
// pas de retry, pas de valeur de repli.
// ============================================================================

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::api::{fetch_metric, InfoProvider, MissingPolicy};
use crate::data::load_price_history;
use crate::models::TRAILING_PE_FIELD;

/// Paramètres d'une exécution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub csv_path: PathBuf,
    pub symbol: String,
    /// Clé trailingPE absente = "N/A" au lieu d'une erreur MissingField
    pub allow_missing: bool,
}

/// Exécute le programme complet et écrit une ligne sur `out`
///
/// CONCEPT RUST : &dyn Trait + générique
/// - provider : n'importe quel InfoProvider (Yahoo, faux fournisseur...)
/// - out : n'importe quel Write (stdout, Vec<u8> dans les tests)
pub async fn run<W: Write>(options: &RunOptions, provider: &dyn InfoProvider, out: &mut W) -> Result<()> {
    let table = load_price_history(&options.csv_path).with_context(|| {
        format!(
            "Échec du chargement de l'historique {}",
            options.csv_path.display()
        )
    })?;
    debug!(rows = table.row_count(), "Price history kept in memory");

    // Par défaut une clé absente est une erreur ; une valeur null affiche "N/A"
    let policy = if options.allow_missing {
        MissingPolicy::AsNull
    } else {
        MissingPolicy::Error
    };
    let pe = fetch_metric(provider, &options.symbol, TRAILING_PE_FIELD, policy)
        .await
        .with_context(|| format!("Échec de la récupération du P/E de {}", options.symbol))?;

    let line = format_ratio(pe);
    info!(symbol = %options.symbol, value = %line, "Printing trailing P/E");
    writeln!(out, "{}", line).context("Échec de l'écriture sur la sortie")?;

    Ok(())
}

/// Formatte le ratio pour l'affichage
///
/// Format {:?} de f64 : garde le ".0" des valeurs entières (30.0 -> "30.0",
/// alors que Display donne "30"), 28.5 -> "28.5". "N/A" si absent.
pub fn format_ratio(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:?}", v),
        None => "N/A".to_string(),
    }
}
