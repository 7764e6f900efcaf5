// ============================================================================
// Arguments de la ligne de commande
// ============================================================================
// Tous les flags sont optionnels : sans argument, le programme lit
// data/AAPL.csv et affiche le P/E trailing de "aapl".
// ============================================================================

use std::path::PathBuf;

use clap::Parser;

use crate::app::RunOptions;
use crate::config::{ProviderConfig, DEFAULT_BASE_URL, DEFAULT_COOKIE_URL};
use crate::data::DEFAULT_CSV_PATH;

/// Affiche le P/E trailing d'un ticker après chargement de son historique CSV
#[derive(Debug, Clone, Parser)]
#[command(name = "peratio", version)]
pub struct Cli {
    /// Fichier CSV d'historique de prix
    #[arg(long, default_value = DEFAULT_CSV_PATH)]
    pub csv: PathBuf,

    /// Symbole du ticker (ex: aapl, MSFT)
    #[arg(long, default_value = "aapl")]
    pub symbol: String,

    /// Base des endpoints Yahoo Finance
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// URL qui pose les cookies de session
    #[arg(long, default_value = DEFAULT_COOKIE_URL)]
    pub cookie_url: String,

    /// Affiche N/A si la clé trailingPE est absente au lieu d'échouer
    #[arg(long)]
    pub allow_missing: bool,
}

impl Cli {
    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            csv_path: self.csv.clone(),
            symbol: self.symbol.clone(),
            allow_missing: self.allow_missing,
        }
    }

    pub fn provider_config(&self) -> ProviderConfig {
        ProviderConfig::default()
            .with_base_url(self.base_url.as_str())
            .with_cookie_url(self.cookie_url.as_str())
    }
}
