// ============================================================================
// Structure : TickerInfoRecord
// ============================================================================
// Fiche d'informations d'un ticker retournée par le fournisseur
// (nom du champ -> valeur JSON)
//
// Seul "trailingPE" est consommé, mais la fiche garde tous les champs reçus.
// Toute lecture passe par une recherche explicite (Option) : un champ absent
// n'est jamais une panique.
// ============================================================================

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::FetchError;

/// Nom du champ P/E trailing dans la fiche Yahoo
pub const TRAILING_PE_FIELD: &str = "trailingPE";

/// Fiche d'informations d'un ticker
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickerInfoRecord {
    /// Symbole demandé (ex: "aapl")
    pub symbol: String,

    /// Champs bruts, déjà aplatis (pas de wrapper {"raw", "fmt"})
    pub fields: BTreeMap<String, Value>,
}

impl TickerInfoRecord {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Construit une fiche depuis un objet JSON plat
    ///
    /// Exemple : `{"trailingPE": 28.5, "currency": "USD"}`
    pub fn from_json(symbol: impl Into<String>, value: Value) -> Result<Self, FetchError> {
        match value {
            Value::Object(map) => Ok(Self {
                symbol: symbol.into(),
                fields: map.into_iter().collect(),
            }),
            other => Err(FetchError::Decode(format!(
                "objet JSON attendu, reçu : {}",
                other
            ))),
        }
    }

    /// Ajoute un champ (builder)
    pub fn with_field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Lit un champ numérique
    ///
    /// - absent ou null -> Ok(None)
    /// - nombre -> Ok(Some(v))
    /// - autre chose (ex: "Infinity") -> Err(InvalidField)
    pub fn lookup_f64(&self, name: &str) -> Result<Option<f64>, FetchError> {
        match self.fields.get(name) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Number(n)) => n.as_f64().map(Some).ok_or_else(|| FetchError::InvalidField {
                field: name.to_string(),
                value: n.to_string(),
            }),
            Some(other) => Err(FetchError::InvalidField {
                field: name.to_string(),
                value: other.to_string(),
            }),
        }
    }

    /// Comme lookup_f64, mais la clé doit exister
    ///
    /// - clé absente -> Err(MissingField)
    /// - null -> Ok(None) (le fournisseur connaît le champ mais n'a pas de valeur)
    pub fn require_f64(&self, name: &str) -> Result<Option<f64>, FetchError> {
        if !self.fields.contains_key(name) {
            return Err(FetchError::MissingField(format!("{} ({})", name, self.symbol)));
        }
        self.lookup_f64(name)
    }

    /// P/E trailing, None si le fournisseur n'a pas de donnée
    pub fn trailing_pe(&self) -> Result<Option<f64>, FetchError> {
        self.lookup_f64(TRAILING_PE_FIELD)
    }
}
