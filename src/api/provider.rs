// ============================================================================
// Fournisseur de fiches ticker
// ============================================================================
// Un fournisseur retourne la fiche d'informations (TickerInfoRecord) d'un
// symbole. fetch_metric / fetch_trailing_pe lisent un champ de cette fiche.
//
// Le fournisseur est toujours passé en paramètre : les tests injectent un
// faux fournisseur sans toucher à aucun état global.
// ============================================================================

use std::future::Future;
use std::pin::Pin;

use tracing::{debug, info, instrument, warn};

use crate::error::FetchError;
use crate::models::{TickerInfoRecord, TRAILING_PE_FIELD};

/// Future retournée par un fournisseur
pub type InfoFuture<'a> = Pin<Box<dyn Future<Output = Result<TickerInfoRecord, FetchError>> + Send + 'a>>;

/// Source de fiches d'informations par symbole
pub trait InfoProvider: Send + Sync {
    /// Nom court pour les logs (ex: "yahoo")
    fn name(&self) -> &str;

    /// Récupère la fiche complète d'un symbole (un seul essai, pas de cache)
    fn ticker_info<'a>(&'a self, symbol: &'a str) -> InfoFuture<'a>;
}

/// Comportement quand la clé demandée est absente de la fiche
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingPolicy {
    /// Clé absente -> Ok(None), comme une valeur null
    #[default]
    AsNull,
    /// Clé absente -> Err(MissingField)
    Error,
}

/// Récupère un champ numérique de la fiche d'un symbole
///
/// Une valeur null donne toujours Ok(None) ; une clé absente dépend de
/// `policy`.
#[instrument(skip(provider), fields(provider = provider.name()))]
pub async fn fetch_metric(
    provider: &dyn InfoProvider,
    symbol: &str,
    field: &str,
    policy: MissingPolicy,
) -> Result<Option<f64>, FetchError> {
    let record = provider.ticker_info(symbol).await?;
    debug!(fields = record.len(), "Ticker info received");

    let value = match policy {
        MissingPolicy::AsNull => record.lookup_f64(field)?,
        MissingPolicy::Error => record.require_f64(field)?,
    };
    match value {
        Some(v) => info!(value = v, "Metric fetched"),
        None => warn!("Metric absent from ticker info"),
    }

    Ok(value)
}

/// Récupère le P/E trailing d'un symbole
///
/// Retourne Ok(None) si le champ est absent ou null.
///
/// # Exemple
/// let pe = fetch_trailing_pe(&provider, "aapl").await?;
pub async fn fetch_trailing_pe(
    provider: &dyn InfoProvider,
    symbol: &str,
) -> Result<Option<f64>, FetchError> {
    fetch_metric(provider, symbol, TRAILING_PE_FIELD, MissingPolicy::AsNull).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// Fournisseur en mémoire retournant toujours la même fiche
    struct FixedProvider(serde_json::Value);

    impl InfoProvider for FixedProvider {
        fn name(&self) -> &str {
            "fixed"
        }

        fn ticker_info<'a>(&'a self, symbol: &'a str) -> InfoFuture<'a> {
            let record = TickerInfoRecord::from_json(symbol, self.0.clone());
            Box::pin(async move { record })
        }
    }

    #[tokio::test]
    async fn test_fetch_trailing_pe_returns_exact_value() {
        let provider = FixedProvider(json!({"trailingPE": 31.245, "forwardPE": 27.1}));
        let pe = fetch_trailing_pe(&provider, "aapl").await.unwrap();
        assert_eq!(pe, Some(31.245));
    }

    #[tokio::test]
    async fn test_fetch_trailing_pe_absent_is_none() {
        let provider = FixedProvider(json!({"forwardPE": -12.0}));
        let pe = fetch_trailing_pe(&provider, "rivn").await.unwrap();
        assert_eq!(pe, None);
    }

    #[tokio::test]
    async fn test_fetch_metric_other_field() {
        let provider = FixedProvider(json!({"forwardPE": 27.1}));
        let value = fetch_metric(&provider, "aapl", "forwardPE", MissingPolicy::Error)
            .await
            .unwrap();
        assert_eq!(value, Some(27.1));
    }

    #[tokio::test]
    async fn test_fetch_metric_missing_key_is_error() {
        let provider = FixedProvider(json!({"forwardPE": 27.1}));
        let err = fetch_metric(&provider, "aapl", TRAILING_PE_FIELD, MissingPolicy::Error)
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::MissingField(_)));
    }

    #[tokio::test]
    async fn test_fetch_metric_null_is_none_even_when_required() {
        let provider = FixedProvider(json!({"trailingPE": null}));
        let value = fetch_metric(&provider, "rivn", TRAILING_PE_FIELD, MissingPolicy::Error)
            .await
            .unwrap();
        assert_eq!(value, None);
    }
}
