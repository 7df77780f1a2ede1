//! Gas price selection and resolution
//!
//! A submission carries either a preset choice resolved against the current
//! price table or a user-supplied custom price that bypasses the table.

pub mod station;

pub use station::{GasPriceFeed, GasStation, NodePriceSource, PriceSource};

use ethers::types::U256;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Preset keys in the gas price table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GasPreset {
    Slow,
    Normal,
    Fast,
}

/// The active gas choice for a submission. Exactly one variant at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GasSelection {
    Preset(GasPreset),
    Custom(U256),
}

/// Preset -> legacy gas price, maintained by an external feed
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GasPriceTable {
    prices: HashMap<GasPreset, U256>,
}

impl GasPriceTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, preset: GasPreset, price: U256) {
        self.prices.insert(preset, price);
    }

    pub fn get(&self, preset: GasPreset) -> Option<U256> {
        self.prices.get(&preset).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

/// Resolve the gas price for a selection.
///
/// Custom selections bypass the table entirely. A missing table or a preset
/// absent from a loaded table resolves to `None`, which callers treat as
/// "let the node decide".
pub fn resolve_gas_price(selection: &GasSelection, table: Option<&GasPriceTable>) -> Option<U256> {
    match selection {
        GasSelection::Custom(value) => Some(*value),
        GasSelection::Preset(key) => table.and_then(|t| t.get(*key)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded_table() -> GasPriceTable {
        let mut table = GasPriceTable::new();
        table.insert(GasPreset::Slow, U256::from(9_000_000_000u64));
        table.insert(GasPreset::Normal, U256::from(10_000_000_000u64));
        table
    }

    #[test]
    fn custom_bypasses_table() {
        let custom = GasSelection::Custom(U256::from(42u64));
        assert_eq!(
            resolve_gas_price(&custom, Some(&loaded_table())),
            Some(U256::from(42u64))
        );
    }

    #[test]
    fn custom_resolves_without_table() {
        let custom = GasSelection::Custom(U256::from(42u64));
        assert_eq!(resolve_gas_price(&custom, None), Some(U256::from(42u64)));
    }

    #[test]
    fn preset_resolves_from_table() {
        let selection = GasSelection::Preset(GasPreset::Normal);
        assert_eq!(
            resolve_gas_price(&selection, Some(&loaded_table())),
            Some(U256::from(10_000_000_000u64))
        );
    }

    #[test]
    fn missing_preset_resolves_to_none() {
        // Fast is absent from the loaded table
        let selection = GasSelection::Preset(GasPreset::Fast);
        assert_eq!(resolve_gas_price(&selection, Some(&loaded_table())), None);
    }

    #[test]
    fn missing_table_resolves_to_none() {
        let selection = GasSelection::Preset(GasPreset::Normal);
        assert_eq!(resolve_gas_price(&selection, None), None);
    }
}
