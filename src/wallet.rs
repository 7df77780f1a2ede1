//! Wallet context consumed by the workflow
//!
//! The connected account and active chain are injected explicitly rather
//! than read from ambient state; the workflow only ever reads them.

use ethers::types::Address;

/// Read-only view of the connected wallet
#[cfg_attr(test, mockall::automock)]
pub trait WalletContext: Send + Sync {
    /// Currently connected account
    fn actor(&self) -> Address;
    /// Chain the wallet is connected to
    fn chain_id(&self) -> u64;
}

/// Fixed wallet context for single-account tools and tests
#[derive(Debug, Clone)]
pub struct StaticWallet {
    actor: Address,
    chain_id: u64,
}

impl StaticWallet {
    pub fn new(actor: Address, chain_id: u64) -> Self {
        Self { actor, chain_id }
    }
}

impl WalletContext for StaticWallet {
    fn actor(&self) -> Address {
        self.actor
    }

    fn chain_id(&self) -> u64 {
        self.chain_id
    }
}

/// Whether the wallet is connected to the chain the workflow targets
pub fn network_matches(ctx: &dyn WalletContext, expected_chain_id: u64) -> bool {
    ctx.chain_id() == expected_chain_id
}
