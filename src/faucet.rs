//! Faucet service: wires collaborators into submission handlers
//!
//! One service per configured chain. Each mint request gets its own
//! [`TransactionHandler`] carrying the intent, the resolved gas price, and
//! the caller's block flag; the service itself stays stateless between
//! attempts.

use ethers::providers::{Http, Provider};
use std::sync::Arc;
use tracing::info;

use crate::asset::{ReserveAsset, TransactionIntent};
use crate::config::Settings;
use crate::error::{WorkflowError, WorkflowResult};
use crate::gas::{resolve_gas_price, GasPriceFeed, GasSelection};
use crate::tx::{ChainEstimator, ChainSubmitter, FaucetMintBuilder};
use crate::wallet::{network_matches, WalletContext};
use crate::workflow::TransactionHandler;

pub struct FaucetService {
    settings: Settings,
    wallet: Arc<dyn WalletContext>,
    gas_feed: Arc<dyn GasPriceFeed>,
    provider: Arc<Provider<Http>>,
}

impl FaucetService {
    pub fn new(
        settings: Settings,
        wallet: Arc<dyn WalletContext>,
        gas_feed: Arc<dyn GasPriceFeed>,
    ) -> WorkflowResult<Self> {
        let provider = Provider::<Http>::try_from(settings.chain.rpc_url.as_str()).map_err(
            |e| WorkflowError::ChainConnection {
                chain_id: settings.chain.chain_id,
                message: e.to_string(),
            },
        )?;

        info!(
            "Faucet service ready for chain {} ({})",
            settings.chain.name, settings.chain.chain_id
        );

        Ok(Self {
            settings,
            wallet,
            gas_feed,
            provider: Arc::new(provider),
        })
    }

    /// Whether the connected wallet is on a different chain than this
    /// service targets. Feeds the trigger's disabled condition.
    pub fn wrong_network(&self) -> bool {
        !network_matches(self.wallet.as_ref(), self.settings.chain.chain_id)
    }

    /// Build a submission handler for one mint attempt.
    ///
    /// The gas price is resolved once, here: a custom selection bypasses
    /// the feed, a preset is looked up in the current table, and an absent
    /// table leaves the price to the node.
    pub async fn mint_handler(
        &self,
        asset: ReserveAsset,
        gas_selection: &GasSelection,
        blocked: bool,
    ) -> WorkflowResult<TransactionHandler> {
        let chain_id = self.settings.chain.chain_id;
        let intent = TransactionIntent::new(self.wallet.actor(), asset);

        let table = self.gas_feed.price_table(chain_id).await;
        let gas_price = resolve_gas_price(gas_selection, table.as_ref());

        let builder = FaucetMintBuilder::new(
            self.settings.faucet_address()?,
            self.settings.default_mint_amount()?,
        );
        let estimator = ChainEstimator::new(
            self.provider.clone(),
            self.settings.gas.limit_buffer_percent,
        );
        let submitter =
            ChainSubmitter::from_env(self.provider.clone(), &self.settings.submission, chain_id)?;

        Ok(TransactionHandler::new(
            intent,
            Arc::new(builder),
            Arc::new(estimator),
            Arc::new(submitter),
            gas_price,
            blocked,
        ))
    }
}
