//! Gas price feed backed by the node's own quote
//!
//! The station polls a price source, derives the preset table from the base
//! quote, and caches the last good table per chain so a flaky source
//! degrades to stale prices instead of an empty feed.

use async_trait::async_trait;
use dashmap::DashMap;
use ethers::providers::{Http, Middleware, Provider};
use ethers::types::U256;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use super::{GasPreset, GasPriceTable};
use crate::config::GasSettings;
use crate::error::{WorkflowError, WorkflowResult};

/// Source of the base gas price quote
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PriceSource: Send + Sync {
    async fn gas_price(&self, chain_id: u64) -> WorkflowResult<U256>;
}

/// External feed contract consumed by the workflow: a preset price table
/// that may be absent while loading or after persistent source failures.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GasPriceFeed: Send + Sync {
    async fn price_table(&self, chain_id: u64) -> Option<GasPriceTable>;
}

/// Price source querying an HTTP JSON-RPC node
pub struct NodePriceSource {
    provider: Arc<Provider<Http>>,
}

impl NodePriceSource {
    pub fn new(provider: Arc<Provider<Http>>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl PriceSource for NodePriceSource {
    async fn gas_price(&self, chain_id: u64) -> WorkflowResult<U256> {
        self.provider
            .get_gas_price()
            .await
            .map_err(|e| WorkflowError::ChainConnection {
                chain_id,
                message: e.to_string(),
            })
    }
}

/// Polling gas station with a per-chain cached table
pub struct GasStation<S> {
    source: S,
    /// Buffer percentage applied to the fast preset
    price_buffer_percent: u64,
    /// Hard ceiling on every derived price, in gwei
    max_gas_price_gwei: u64,
    poll_interval: Duration,
    cache: DashMap<u64, GasPriceTable>,
}

impl<S: PriceSource> GasStation<S> {
    pub fn new(source: S, settings: &GasSettings) -> Self {
        Self {
            source,
            price_buffer_percent: settings.price_buffer_percent,
            max_gas_price_gwei: settings.max_gas_price_gwei,
            poll_interval: Duration::from_millis(settings.poll_interval_ms),
            cache: DashMap::new(),
        }
    }

    fn cap(&self, price: U256) -> U256 {
        let max = U256::from(self.max_gas_price_gwei) * U256::exp10(9);
        std::cmp::min(price, max)
    }

    /// Derive the preset table from a base quote:
    /// slow at 90%, normal at the quote, fast with the buffer on top,
    /// all clamped to the configured ceiling.
    fn build_table(&self, base: U256) -> GasPriceTable {
        let mut table = GasPriceTable::new();
        table.insert(GasPreset::Slow, self.cap(base * 90 / 100));
        table.insert(GasPreset::Normal, self.cap(base));
        table.insert(
            GasPreset::Fast,
            self.cap(base + base * self.price_buffer_percent / 100),
        );
        table
    }

    /// Query the source and refresh the cached table for a chain
    pub async fn refresh(&self, chain_id: u64) -> WorkflowResult<GasPriceTable> {
        let base = self.source.gas_price(chain_id).await?;
        let table = self.build_table(base);
        debug!("Refreshed gas table for chain {}: base {}", chain_id, base);
        self.cache.insert(chain_id, table.clone());
        Ok(table)
    }
}

impl<S: PriceSource + 'static> GasStation<S> {
    /// Refresh the table for a chain on the configured interval. Runs until
    /// the task driving it is dropped; a failed refresh keeps the stale
    /// cache and tries again next tick.
    pub async fn run(self: Arc<Self>, chain_id: u64) {
        let mut ticker = tokio::time::interval(self.poll_interval);
        loop {
            ticker.tick().await;
            if let Err(e) = self.refresh(chain_id).await {
                warn!("Scheduled gas refresh failed for chain {}: {}", chain_id, e);
            }
        }
    }
}

#[async_trait]
impl<S: PriceSource> GasPriceFeed for GasStation<S> {
    async fn price_table(&self, chain_id: u64) -> Option<GasPriceTable> {
        match self.refresh(chain_id).await {
            Ok(table) => Some(table),
            Err(e) => {
                warn!("Gas price refresh failed for chain {}: {}", chain_id, e);
                self.cache.get(&chain_id).map(|t| t.value().clone())
            }
        }
    }
}
