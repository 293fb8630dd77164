//! Response models for the archetype endpoints

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Archetype IDs registered under a strategy
///
/// Returned by `GET /internal/archetype/strategy/{sid}`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StrategyArchetypes {
    /// Archetype IDs, in the order the server returned them
    #[serde(rename = "archepids")]
    pub archetype_ids: Vec<String>,
}

impl StrategyArchetypes {
    /// Number of archetypes
    pub fn len(&self) -> usize {
        self.archetype_ids.len()
    }

    /// Check if the strategy has no archetypes
    pub fn is_empty(&self) -> bool {
        self.archetype_ids.is_empty()
    }

    /// Iterate over the IDs
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.archetype_ids.iter().map(String::as_str)
    }
}

/// Portfolio allocation template
///
/// Returned by `GET /internal/archetype/{archepid}`. Keys are exchange
/// qualified symbols (e.g. `HSX:TPB`), values are allocation fractions.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Archetype {
    /// Symbol to allocation fraction
    #[serde(rename = "archetypeportfolio")]
    pub portfolio: BTreeMap<String, Decimal>,
}

impl Archetype {
    /// Allocation for a symbol
    pub fn allocation(&self, symbol: &str) -> Option<Decimal> {
        self.portfolio.get(symbol).copied()
    }

    /// Symbols in the portfolio, sorted
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.portfolio.keys().map(String::as_str)
    }

    /// Sum of all allocation fractions, `None` if the sum overflows
    pub fn total_allocation(&self) -> Option<Decimal> {
        self.portfolio
            .values()
            .try_fold(Decimal::ZERO, |total, allocation| total.checked_add(*allocation))
    }
}
