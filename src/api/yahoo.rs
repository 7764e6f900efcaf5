// ============================================================================
// API Client : Yahoo Finance (quoteSummary)
// ============================================================================
// Récupère la fiche d'informations d'un ticker depuis Yahoo Finance
//
// Protocole (un seul essai par étape, pas de retry) :
// 1. GET cookie_url           -> cookies de session (statut ignoré)
// 2. GET /v1/test/getcrumb    -> crumb (texte brut)
// 3. GET /v10/finance/quoteSummary/{symbol}?modules=...&crumb=...
//
// La réponse quoteSummary contient un objet par module. On les fusionne en
// une seule fiche plate :
// - {"raw": 28.5, "fmt": "28.50"} devient 28.5
// - {} (valeur absente chez Yahoo) est ignoré
// - en cas de doublon, le premier module de la config gagne
// ============================================================================

use std::sync::Arc;

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, error, info, instrument, warn};

use crate::api::http::{HttpClient, HttpRequest, HttpResponse, ReqwestHttpClient};
use crate::api::provider::{InfoFuture, InfoProvider};
use crate::config::ProviderConfig;
use crate::error::FetchError;
use crate::models::TickerInfoRecord;

const REFERER: &str = "https://finance.yahoo.com/";

// ============================================================================
// Structures pour parser la réponse JSON de Yahoo Finance
// ============================================================================

#[derive(Debug, Deserialize)]
struct QuoteSummaryResponse {
    #[serde(rename = "quoteSummary")]
    quote_summary: Option<QuoteSummary>,
}

#[derive(Debug, Deserialize)]
struct QuoteSummary {
    #[serde(default)]
    result: Option<Vec<Map<String, Value>>>,
    #[serde(default)]
    error: Option<YahooError>,
}

/// Erreur applicative renvoyée par Yahoo (ex: symbole inconnu)
#[derive(Debug, Deserialize)]
struct YahooError {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

impl YahooError {
    fn message(&self) -> String {
        match (&self.code, &self.description) {
            (Some(code), Some(desc)) => format!("{}: {}", code, desc),
            (None, Some(desc)) => desc.clone(),
            (Some(code), None) => code.clone(),
            (None, None) => "erreur inconnue".to_string(),
        }
    }
}

// ============================================================================
// Fournisseur Yahoo
// ============================================================================

/// Client Yahoo Finance lié à une configuration explicite
pub struct YahooProvider {
    http: Arc<dyn HttpClient>,
    config: ProviderConfig,
}

impl YahooProvider {
    /// Client de production (reqwest + cookie store)
    pub fn new(config: ProviderConfig) -> Result<Self, FetchError> {
        let http = ReqwestHttpClient::new(&config)?;
        Ok(Self::with_http_client(Arc::new(http), config))
    }

    /// Client avec un transport fourni (tests, proxy...)
    pub fn with_http_client(http: Arc<dyn HttpClient>, config: ProviderConfig) -> Self {
        Self { http, config }
    }

    /// Étapes 1 et 2 : cookies de session puis crumb
    async fn fetch_crumb(&self) -> Result<String, FetchError> {
        debug!(url = %self.config.cookie_url, "Requesting session cookies");
        let cookie_request = HttpRequest::get(&self.config.cookie_url).with_header("referer", REFERER);
        let response = self.http.execute(cookie_request).await?;
        // fc.yahoo.com répond souvent 404 mais pose quand même les cookies
        debug!(status = response.status, "Session cookie response");

        let crumb_url = self.config.crumb_url();
        debug!(url = %crumb_url, "Requesting crumb");
        let response = self
            .http
            .execute(HttpRequest::get(crumb_url).with_header("referer", REFERER))
            .await?;
        ensure_success(&response)?;

        let crumb = response.body.trim();
        if crumb.is_empty() || crumb.len() > 64 || crumb.contains('<') {
            error!(len = crumb.len(), "Unexpected crumb payload");
            return Err(FetchError::MissingField("crumb".to_string()));
        }

        Ok(crumb.to_string())
    }

    /// Étape 3 : quoteSummary
    #[instrument(skip(self))]
    async fn fetch_info(&self, symbol: &str) -> Result<TickerInfoRecord, FetchError> {
        let crumb = self.fetch_crumb().await?;

        let url = self.config.quote_summary_url(symbol, &crumb);
        debug!(url = %url, "Sending quoteSummary request");
        let response = self
            .http
            .execute(HttpRequest::get(url).with_header("referer", REFERER))
            .await?;
        debug!(status = response.status, "Received quoteSummary response");
        ensure_success(&response)?;

        let record = parse_quote_summary(symbol, &response.body, &self.config.modules)?;
        info!(fields = record.len(), "Ticker info parsed");
        Ok(record)
    }
}

impl InfoProvider for YahooProvider {
    fn name(&self) -> &str {
        "yahoo"
    }

    fn ticker_info<'a>(&'a self, symbol: &'a str) -> InfoFuture<'a> {
        Box::pin(self.fetch_info(symbol))
    }
}

/// Transforme un statut non-2xx en FetchError::Service
///
/// Le message reprend la description Yahoo si le corps en contient une.
fn ensure_success(response: &HttpResponse) -> Result<(), FetchError> {
    if response.is_success() {
        return Ok(());
    }

    let message = serde_json::from_str::<QuoteSummaryResponse>(&response.body)
        .ok()
        .and_then(|r| r.quote_summary)
        .and_then(|s| s.error)
        .map(|e| e.message())
        .unwrap_or_else(|| response.body.chars().take(200).collect());

    error!(status = response.status, %message, "Yahoo Finance returned error status");
    Err(FetchError::Service {
        status: response.status,
        message,
    })
}

/// Parse la réponse quoteSummary et fusionne les modules en une fiche plate
fn parse_quote_summary(
    symbol: &str,
    body: &str,
    modules: &[String],
) -> Result<TickerInfoRecord, FetchError> {
    let response: QuoteSummaryResponse =
        serde_json::from_str(body).map_err(|e| FetchError::Decode(e.to_string()))?;

    let summary = response
        .quote_summary
        .ok_or_else(|| FetchError::MissingField("quoteSummary".to_string()))?;

    if let Some(err) = summary.error {
        return Err(FetchError::Service {
            status: 200,
            message: err.message(),
        });
    }

    let result = summary
        .result
        .and_then(|results| results.into_iter().next())
        .ok_or_else(|| FetchError::MissingField("quoteSummary.result".to_string()))?;

    let mut record = TickerInfoRecord::new(symbol);
    for module in modules {
        let Some(Value::Object(fields)) = result.get(module) else {
            warn!(module = %module, "Module missing from quoteSummary");
            continue;
        };

        for (name, value) in fields {
            if let Some(value) = unwrap_raw(value) {
                record.fields.entry(name.clone()).or_insert(value);
            }
        }
    }

    Ok(record)
}

/// Déplie les valeurs Yahoo {"raw": x, "fmt": "..."}
///
/// Retourne None pour un objet vide (valeur absente).
fn unwrap_raw(value: &Value) -> Option<Value> {
    match value {
        Value::Object(map) if map.is_empty() => None,
        Value::Object(map) => match map.get("raw") {
            Some(raw) => Some(raw.clone()),
            None => Some(value.clone()),
        },
        other => Some(other.clone()),
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================
