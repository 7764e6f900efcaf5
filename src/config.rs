// ============================================================================
// Configuration du fournisseur
// ============================================================================
// Regroupe tout ce que le client Yahoo a besoin de connaître (URLs, modules,
// User-Agent). La configuration est passée explicitement au client : pas
// d'état global, les tests peuvent pointer vers un faux serveur.
// ============================================================================

use serde::{Deserialize, Serialize};

/// URL de base des endpoints Yahoo Finance (crumb + quoteSummary)
pub const DEFAULT_BASE_URL: &str = "https://query2.finance.yahoo.com";

/// URL visitée pour obtenir les cookies de session
pub const DEFAULT_COOKIE_URL: &str = "https://fc.yahoo.com";

/// User-Agent navigateur pour éviter le blocage par Yahoo
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Modules quoteSummary fusionnés dans la fiche, par ordre de priorité
pub const DEFAULT_MODULES: [&str; 4] = ["summaryDetail", "defaultKeyStatistics", "financialData", "price"];

/// Configuration du fournisseur de données
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Base des endpoints API (sans slash final)
    pub base_url: String,

    /// URL qui pose les cookies de session
    pub cookie_url: String,

    /// Modules quoteSummary demandés
    pub modules: Vec<String>,

    /// User-Agent des requêtes
    pub user_agent: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            cookie_url: DEFAULT_COOKIE_URL.to_string(),
            modules: DEFAULT_MODULES.iter().map(|m| m.to_string()).collect(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ProviderConfig {
    /// Remplace la base des endpoints (builder)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_cookie_url(mut self, cookie_url: impl Into<String>) -> Self {
        self.cookie_url = cookie_url.into();
        self
    }

    /// Endpoint qui retourne le crumb
    pub fn crumb_url(&self) -> String {
        format!("{}/v1/test/getcrumb", self.base_url)
    }

    /// Endpoint quoteSummary pour un symbole
    ///
    /// Le symbole et le crumb sont encodés (un crumb peut contenir "/").
    pub fn quote_summary_url(&self, symbol: &str, crumb: &str) -> String {
        format!(
            "{}/v10/finance/quoteSummary/{}?modules={}&crumb={}",
            self.base_url,
            urlencoding::encode(symbol),
            self.modules.join(","),
            urlencoding::encode(crumb)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_urls() {
        let config = ProviderConfig::default();
        assert_eq!(config.crumb_url(), "https://query2.finance.yahoo.com/v1/test/getcrumb");
        assert_eq!(config.modules[0], "summaryDetail");
    }

    #[test]
    fn test_quote_summary_url_encodes_crumb() {
        let config = ProviderConfig::default().with_base_url("http://localhost:8080/");
        let url = config.quote_summary_url("aapl", "ab/cd");
        assert_eq!(
            url,
            "http://localhost:8080/v10/finance/quoteSummary/aapl\
             ?modules=summaryDetail,defaultKeyStatistics,financialData,price&crumb=ab%2Fcd"
        );
    }
}
