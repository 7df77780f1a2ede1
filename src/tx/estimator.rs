//! Deferred gas-limit estimation for the final descriptor step
//!
//! Estimation needs a chain round-trip, so it is a separate operation from
//! descriptor construction and only runs when the workflow asks for it.

use async_trait::async_trait;
use ethers::providers::{Http, Middleware, Provider};
use ethers::types::transaction::eip2718::TypedTransaction;
use ethers::types::U256;
use std::sync::Arc;
use tracing::debug;

use crate::error::{WorkflowError, WorkflowResult};

/// Lazy gas-limit query exposed by the final descriptor step
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GasLimitEstimator: Send + Sync {
    async fn estimate(&self, tx: &TypedTransaction) -> WorkflowResult<U256>;
}

/// Estimator backed by `eth_estimateGas` with a safety buffer
pub struct ChainEstimator {
    provider: Arc<Provider<Http>>,
    /// Buffer percentage for the gas limit (e.g. 20 = 20% buffer)
    limit_buffer_percent: u64,
}

impl ChainEstimator {
    pub fn new(provider: Arc<Provider<Http>>, limit_buffer_percent: u64) -> Self {
        Self {
            provider,
            limit_buffer_percent,
        }
    }
}

#[async_trait]
impl GasLimitEstimator for ChainEstimator {
    async fn estimate(&self, tx: &TypedTransaction) -> WorkflowResult<U256> {
        let estimate = self
            .provider
            .estimate_gas(tx, None)
            .await
            .map_err(|e| WorkflowError::GasEstimation(e.to_string()))?;

        let buffered = apply_buffer(estimate, self.limit_buffer_percent);
        debug!("Gas limit estimate {} buffered to {}", estimate, buffered);
        Ok(buffered)
    }
}

/// Add a percentage buffer to a raw estimate
fn apply_buffer(estimate: U256, buffer_percent: u64) -> U256 {
    estimate + estimate * buffer_percent / 100
}
