//! Historical accuracy table for (category, difficulty) pairs.
//!
//! Loaded once at startup from a TOML file and read-only afterwards. Each
//! row stores the measured accuracy of every model tier on past questions of
//! that category and difficulty; the router walks these numbers to pick the
//! cheapest tier that is still good enough.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use super::router::Tier;
use super::scorer::Difficulty;
use crate::error::TableError;

/// Per-tier accuracy for one (category, difficulty) pair.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccuracyRow {
    accuracy: HashMap<Tier, f64>,
}

impl AccuracyRow {
    /// Stored accuracy for a tier, if the row has one.
    pub fn accuracy(&self, tier: Tier) -> Option<f64> {
        self.accuracy.get(&tier).copied()
    }

    /// Builder used by tests and table loading.
    pub fn with(mut self, tier: Tier, accuracy: f64) -> Self {
        self.accuracy.insert(tier, accuracy);
        self
    }
}

/// Immutable lookup from (category, difficulty) to an accuracy row.
#[derive(Debug, Clone, Default)]
pub struct AccuracyTable {
    rows: HashMap<(String, Difficulty), AccuracyRow>,
}

/// On-disk shape: a list of `[[rows]]` tables.
#[derive(Debug, Deserialize)]
struct TableFile {
    #[serde(default)]
    rows: Vec<RawRow>,
}

#[derive(Debug, Deserialize)]
struct RawRow {
    category: String,
    difficulty: String,
    accuracy: HashMap<String, f64>,
}

impl AccuracyTable {
    /// Empty table. Every lookup misses, so the router always falls back to
    /// the most capable tier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load and validate a table from a TOML file.
    pub fn load(path: &Path) -> Result<Self, TableError> {
        let raw = std::fs::read_to_string(path).map_err(|source| TableError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let file: TableFile = toml::from_str(&raw).map_err(|e| TableError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let mut table = Self::new();
        for row in file.rows {
            let difficulty: Difficulty =
                row.difficulty
                    .parse()
                    .map_err(|_| TableError::UnknownDifficulty {
                        category: row.category.clone(),
                        label: row.difficulty.clone(),
                    })?;

            let mut accuracy_row = AccuracyRow::default();
            for (tier_name, value) in row.accuracy {
                let tier: Tier = tier_name.parse().map_err(|_| TableError::UnknownTier {
                    category: row.category.clone(),
                    difficulty: row.difficulty.clone(),
                    tier: tier_name.clone(),
                })?;
                if !(0.0..=1.0).contains(&value) {
                    return Err(TableError::AccuracyOutOfRange {
                        category: row.category.clone(),
                        difficulty: row.difficulty.clone(),
                        tier: tier_name,
                        value,
                    });
                }
                accuracy_row = accuracy_row.with(tier, value);
            }

            table.insert(row.category, difficulty, accuracy_row)?;
        }

        Ok(table)
    }

    /// Insert a row, rejecting duplicates on the (category, difficulty) key.
    pub fn insert(
        &mut self,
        category: String,
        difficulty: Difficulty,
        row: AccuracyRow,
    ) -> Result<(), TableError> {
        if self
            .rows
            .insert((category.clone(), difficulty), row)
            .is_some()
        {
            return Err(TableError::DuplicateRow {
                category,
                difficulty: difficulty.as_str().to_string(),
            });
        }
        Ok(())
    }

    /// Look up the row for a (category, difficulty) pair. Absence is valid.
    pub fn lookup(&self, category: &str, difficulty: Difficulty) -> Option<&AccuracyRow> {
        self.rows.get(&(category.to_string(), difficulty))
    }

    /// Number of rows in the table.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
