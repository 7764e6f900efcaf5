// ============================================================================
// Structure : PriceHistoryTable
// ============================================================================
// Table en mémoire chargée depuis un CSV d'historique de prix
//
// Les colonnes ne sont pas imposées (Date, Open, High, Low, Close, Volume
// sont typiques mais jamais vérifiées). Le type de chaque colonne est déduit
// du contenu :
// - Numeric : toutes les cellules non vides sont des nombres
// - Text : tout le reste
//
// CONCEPTS RUST :
// 1. Enum avec données : ColumnValues porte un Vec différent selon le type
// 2. Option<f64> : une cellule vide devient None, pas NaN
// 3. Slices (&[T]) : accès en lecture sans copie
// ============================================================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Type déduit d'une colonne
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnKind {
    Numeric,
    Text,
}

/// Valeurs d'une colonne, une entrée par ligne
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ColumnValues {
    /// Cellules numériques (None = cellule vide)
    Numeric(Vec<Option<f64>>),
    /// Cellules texte, telles que lues
    Text(Vec<String>),
}

impl ColumnValues {
    pub fn len(&self) -> usize {
        match self {
            ColumnValues::Numeric(values) => values.len(),
            ColumnValues::Text(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Une colonne nommée du CSV
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub values: ColumnValues,
}

impl Column {
    /// Construit une colonne en déduisant son type depuis les cellules brutes
    ///
    /// Une colonne est numérique si au moins une cellule est non vide et que
    /// toutes les cellules non vides se parsent en f64.
    pub fn infer(name: String, cells: Vec<String>) -> Self {
        let mut has_value = false;
        let all_numeric = cells.iter().all(|cell| {
            let cell = cell.trim();
            if cell.is_empty() {
                return true;
            }
            has_value = true;
            cell.parse::<f64>().is_ok()
        });

        let values = if has_value && all_numeric {
            ColumnValues::Numeric(
                cells
                    .iter()
                    .map(|cell| cell.trim().parse::<f64>().ok())
                    .collect(),
            )
        } else {
            ColumnValues::Text(cells)
        };

        Self { name, values }
    }

    pub fn kind(&self) -> ColumnKind {
        match self.values {
            ColumnValues::Numeric(_) => ColumnKind::Numeric,
            ColumnValues::Text(_) => ColumnKind::Text,
        }
    }
}

/// Historique de prix chargé depuis un CSV
///
/// Stockage en colonnes : chaque colonne a exactement `row_count` valeurs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceHistoryTable {
    columns: Vec<Column>,
    row_count: usize,
}

impl PriceHistoryTable {
    /// Construit la table depuis l'en-tête et les lignes brutes
    ///
    /// CONCEPT RUST : Ownership
    /// - headers et rows sont "moved" : les cellules sont déplacées dans
    ///   les colonnes sans être copiées
    ///
    /// Les lignes doivent toutes avoir la longueur de l'en-tête (le lecteur
    /// CSV le garantit en amont).
    pub fn from_rows(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let row_count = rows.len();

        // Transpose lignes -> colonnes
        let mut cells: Vec<Vec<String>> = headers
            .iter()
            .map(|_| Vec::with_capacity(row_count))
            .collect();
        for row in rows {
            for (i, cell) in row.into_iter().enumerate() {
                if let Some(column) = cells.get_mut(i) {
                    column.push(cell);
                }
            }
        }

        let columns = headers
            .into_iter()
            .zip(cells)
            .map(|(name, cells)| Column::infer(name, cells))
            .collect();

        Self { columns, row_count }
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Noms des colonnes, dans l'ordre de l'en-tête
    pub fn headers(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Cherche une colonne par nom (insensible à la casse)
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns
            .iter()
            .find(|c| c.name.trim().eq_ignore_ascii_case(name))
    }

    /// Valeurs d'une colonne numérique, None si absente ou texte
    pub fn numeric(&self, name: &str) -> Option<&[Option<f64>]> {
        match &self.column(name)?.values {
            ColumnValues::Numeric(values) => Some(values),
            ColumnValues::Text(_) => None,
        }
    }

    /// Première et dernière date de la colonne "Date" (format YYYY-MM-DD)
    ///
    /// Les cellules non parsables sont ignorées. Retourne None si la colonne
    /// n'existe pas ou ne contient aucune date valide.
    pub fn date_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        let ColumnValues::Text(cells) = &self.column("Date")?.values else {
            return None;
        };

        let mut dates = cells
            .iter()
            .filter_map(|cell| NaiveDate::parse_from_str(cell.trim(), "%Y-%m-%d").ok());

        let first = dates.next()?;
        let (min, max) = dates.fold((first, first), |(min, max), d| (min.min(d), max.max(d)));
        Some((min, max))
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================
