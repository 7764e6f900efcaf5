// ============================================================================
// peratio - Point d'entrée
// ============================================================================
// 1. Initialise le logging (fichier, pour garder stdout propre)
// 2. Parse les arguments
// 3. Charge le CSV puis affiche le P/E trailing du ticker
//
// Toute erreur remonte jusqu'à main : code de sortie non nul + chaîne
// d'erreurs sur stderr.
// ============================================================================

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use peratio::api::YahooProvider;
use peratio::app::run;
use peratio::cli::Cli;

// ============================================================================
// Initialisation du logging
// ============================================================================

/// Répertoire des logs : <data_local_dir>/peratio/logs, sinon ./logs
///
/// - Linux : ~/.local/share/peratio/logs
/// - macOS : ~/Library/Application Support/peratio/logs
/// - Windows : C:\Users\<user>\AppData\Local\peratio\logs
fn log_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("peratio").join("logs"))
        .unwrap_or_else(|| PathBuf::from("./logs"))
}

/// Initialise le système de logging vers fichier
///
/// stdout ne doit contenir que le ratio : les logs vont dans un fichier
/// avec rotation quotidienne.
///
/// # Utilisation
/// ```bash
/// tail -f ~/.local/share/peratio/logs/peratio.log.*
/// RUST_LOG=peratio=trace peratio --symbol msft
/// ```
fn init_logging() -> Result<()> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let log_dir = log_dir();
    std::fs::create_dir_all(&log_dir).context("Échec de la création du répertoire de logs")?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir.clone(), "peratio.log");

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true),
        )
        .with(
            // Par défaut : debug pour peratio, info pour les dépendances
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "peratio=debug,info".into()),
        )
        .try_init()
        .context("Échec de l'initialisation du subscriber tracing")?;

    info!(?log_dir, "Logging initialisé");
    Ok(())
}

// ============================================================================
// Point d'entrée du programme
// ============================================================================

fn main() -> Result<()> {
    init_logging().unwrap_or_else(|e| {
        eprintln!("⚠️  Warning: Failed to initialize logging: {:#}", e);
        eprintln!("   Continuing without logging...");
    });

    let cli = Cli::parse();
    info!(?cli, "peratio starting up");

    // Le client est construit à partir d'une configuration explicite,
    // puis passé à run()
    let provider = YahooProvider::new(cli.provider_config())
        .context("Échec de la création du client Yahoo Finance")?;

    let runtime = tokio::runtime::Runtime::new().context("Échec de la création du runtime tokio")?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let result = runtime.block_on(run(&cli.run_options(), &provider, &mut out));

    match &result {
        Ok(()) => info!("peratio exited normally"),
        Err(e) => error!(error = ?e, "peratio exited with error"),
    }

    result
}
