//! Threshold-based model selection.
//!
//! Walks the tier list cheapest-first and picks the first tier whose stored
//! accuracy for the question's (category, difficulty) pair clears the
//! threshold. Missing data fails toward capability, not cost: no row, or no
//! qualifying tier, routes to the most expensive tier.

use serde::{Deserialize, Serialize};

use super::scorer::Difficulty;
use super::table::AccuracyTable;

/// Model cost tier, ordered cheapest first.
///
/// The ordering is a deployment-time constant; which concrete provider model
/// serves each tier is configuration.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Economy,
    Standard,
    Premium,
}

impl Tier {
    /// All tiers, cheapest first. The router walks this order.
    pub const CHEAPEST_FIRST: [Tier; 3] = [Tier::Economy, Tier::Standard, Tier::Premium];

    /// The most expensive tier, used as the fallback when accuracy data is
    /// missing or no tier qualifies.
    pub fn most_capable() -> Tier {
        Tier::Premium
    }

    /// Tier name as used in the accuracy table and configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Economy => "economy",
            Tier::Standard => "standard",
            Tier::Premium => "premium",
        }
    }
}

impl std::str::FromStr for Tier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "economy" => Ok(Tier::Economy),
            "standard" => Ok(Tier::Standard),
            "premium" => Ok(Tier::Premium),
            _ => Err(format!(
                "invalid tier '{}', expected one of: economy, standard, premium",
                s
            )),
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Picks the cheapest tier expected to answer correctly.
#[derive(Debug)]
pub struct ModelRouter {
    table: AccuracyTable,
    threshold: f64,
}

impl ModelRouter {
    /// Create a router over an accuracy table with a minimum-accuracy
    /// threshold.
    pub fn new(table: AccuracyTable, threshold: f64) -> Self {
        Self { table, threshold }
    }

    /// The configured accuracy threshold.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Select the cheapest tier whose stored accuracy meets the threshold.
    ///
    /// Pure over the table: no I/O, no mutation. A tier missing from the row
    /// never qualifies.
    pub fn route(&self, category: &str, difficulty: Difficulty) -> Tier {
        let Some(row) = self.table.lookup(category, difficulty) else {
            tracing::debug!(
                category,
                difficulty = difficulty.as_str(),
                "no accuracy row, routing to most capable tier"
            );
            return Tier::most_capable();
        };

        for tier in Tier::CHEAPEST_FIRST {
            if let Some(accuracy) = row.accuracy(tier) {
                if accuracy >= self.threshold {
                    tracing::debug!(
                        category,
                        difficulty = difficulty.as_str(),
                        tier = tier.as_str(),
                        accuracy,
                        "routed to cheapest qualifying tier"
                    );
                    return tier;
                }
            }
        }

        tracing::debug!(
            category,
            difficulty = difficulty.as_str(),
            threshold = self.threshold,
            "no tier met threshold, routing to most capable tier"
        );
        Tier::most_capable()
    }
}
