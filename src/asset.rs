//! Typed reserve asset identifier and submission intent
//!
//! Symbols and contract addresses cross the system boundary as strings; they
//! are validated here once and carried as values afterwards.

use ethers::types::Address;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{WorkflowError, WorkflowResult};

/// A supported lending-pool asset, validated at construction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReserveAsset {
    symbol: String,
    address: Address,
    requires_approval: bool,
}

impl ReserveAsset {
    /// Maximum accepted symbol length
    const MAX_SYMBOL_LEN: usize = 16;

    /// Create a validated reserve asset from boundary input
    pub fn new(symbol: &str, address: &str) -> WorkflowResult<Self> {
        let trimmed = symbol.trim();
        if trimmed.is_empty() {
            return Err(WorkflowError::InvalidAsset {
                symbol: symbol.to_string(),
                message: "empty symbol".to_string(),
            });
        }
        if trimmed.len() > Self::MAX_SYMBOL_LEN {
            return Err(WorkflowError::InvalidAsset {
                symbol: symbol.to_string(),
                message: format!("symbol longer than {} characters", Self::MAX_SYMBOL_LEN),
            });
        }

        let address = Address::from_str(address).map_err(|e| WorkflowError::InvalidAsset {
            symbol: trimmed.to_string(),
            message: format!("invalid contract address: {}", e),
        })?;

        Ok(Self {
            symbol: trimmed.to_uppercase(),
            address,
            requires_approval: false,
        })
    }

    /// Mark this asset as needing an ERC20 approval step before minting
    pub fn with_approval(mut self) -> Self {
        self.requires_approval = true;
        self
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn requires_approval(&self) -> bool {
        self.requires_approval
    }
}

/// Domain intent: mint faucet tokens for `asset` to `actor`.
///
/// Immutable per submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionIntent {
    pub actor: Address,
    pub asset: ReserveAsset,
}

impl TransactionIntent {
    pub fn new(actor: Address, asset: ReserveAsset) -> Self {
        Self { actor, asset }
    }
}
