//! Transaction signing and submission
//!
//! Signs each descriptor step and sends it raw, with a timeout on the send
//! and bounded retries on timeout only. Everything else is terminal for the
//! attempt and surfaces as workflow error data.

use async_trait::async_trait;
use ethers::providers::{Http, Middleware, Provider};
use ethers::signers::{LocalWallet, Signer};
use ethers::types::transaction::eip2718::TypedTransaction;
use ethers::types::H256;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{info, warn};

use crate::config::SubmissionSettings;
use crate::error::{WorkflowError, WorkflowResult};

/// Signs and submits chain-submittable steps for one account
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TransactionSubmitter: Send + Sync {
    /// Next usable nonce for the signing account, queried once per attempt
    async fn pending_nonce(&self) -> WorkflowResult<u64>;

    async fn sign_and_submit(&self, tx: TypedTransaction) -> WorkflowResult<H256>;
}

/// Submitter backed by a local wallet and an HTTP JSON-RPC node
pub struct ChainSubmitter {
    provider: Arc<Provider<Http>>,
    wallet: LocalWallet,
    max_retries: u32,
    retry_delay: Duration,
    send_timeout: Duration,
}

impl ChainSubmitter {
    pub fn new(
        provider: Arc<Provider<Http>>,
        wallet: LocalWallet,
        settings: &SubmissionSettings,
        chain_id: u64,
    ) -> Self {
        Self {
            provider,
            wallet: wallet.with_chain_id(chain_id),
            max_retries: settings.max_retries,
            retry_delay: Duration::from_millis(settings.retry_delay_ms),
            send_timeout: Duration::from_secs(settings.send_timeout_secs),
        }
    }

    /// Load the signing key from the environment (dev mode)
    pub fn from_env(
        provider: Arc<Provider<Http>>,
        settings: &SubmissionSettings,
        chain_id: u64,
    ) -> WorkflowResult<Self> {
        let key = std::env::var("FAUCET_SIGNER_KEY").map_err(|_| {
            WorkflowError::Config(
                "No signer configured. Set FAUCET_SIGNER_KEY".to_string(),
            )
        })?;
        let wallet = key
            .parse::<LocalWallet>()
            .map_err(|e| WorkflowError::Config(format!("Invalid private key: {}", e)))?;

        Ok(Self::new(provider, wallet, settings, chain_id))
    }

    pub fn signer_address(&self) -> ethers::types::Address {
        self.wallet.address()
    }
}

#[async_trait]
impl TransactionSubmitter for ChainSubmitter {
    async fn pending_nonce(&self) -> WorkflowResult<u64> {
        let count = self
            .provider
            .get_transaction_count(self.wallet.address(), None)
            .await
            .map_err(|e| WorkflowError::ChainConnection {
                chain_id: self.wallet.chain_id(),
                message: format!("nonce query failed: {}", e),
            })?;
        Ok(count.as_u64())
    }

    async fn sign_and_submit(&self, mut tx: TypedTransaction) -> WorkflowResult<H256> {
        tx.set_chain_id(self.wallet.chain_id());

        let signature = self
            .wallet
            .sign_transaction(&tx)
            .await
            .map_err(|e| WorkflowError::Transaction(format!("signing failed: {}", e)))?;
        let raw = tx.rlp_signed(&signature);

        let mut attempts = 0;
        loop {
            attempts += 1;

            match timeout(
                self.send_timeout,
                self.provider.send_raw_transaction(raw.clone()),
            )
            .await
            {
                Ok(Ok(pending)) => {
                    let tx_hash = pending.tx_hash();
                    info!(
                        "Transaction sent: {:?} (attempt {}/{})",
                        tx_hash, attempts, self.max_retries
                    );
                    return Ok(tx_hash);
                }
                Ok(Err(e)) => {
                    return Err(classify_send_error(
                        &e.to_string(),
                        &format!("{:?}", self.wallet.address()),
                    ));
                }
                Err(_) => {
                    warn!("Transaction send timeout (attempt {})", attempts);
                    if attempts >= self.max_retries {
                        return Err(WorkflowError::Timeout {
                            operation: "send transaction".to_string(),
                        });
                    }
                    tokio::time::sleep(self.retry_delay).await;
                }
            }
        }
    }
}

/// Map a node error message to a workflow error kind
fn classify_send_error(message: &str, account: &str) -> WorkflowError {
    let lower = message.to_lowercase();
    if lower.contains("insufficient funds") {
        WorkflowError::InsufficientFunds {
            account: account.to_string(),
        }
    } else {
        WorkflowError::Transaction(message.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_funds_gets_its_own_variant() {
        let err = classify_send_error("insufficient funds for gas * price + value", "0xAA");
        assert!(matches!(err, WorkflowError::InsufficientFunds { .. }));
    }

    #[test]
    fn rejections_stay_transaction_errors() {
        let err = classify_send_error("User rejected the request", "0xAA");
        assert!(matches!(err, WorkflowError::Transaction(_)));
        assert!(err.is_user_rejection());
    }

    #[test]
    fn reverts_stay_transaction_errors() {
        let err = classify_send_error("execution reverted", "0xAA");
        assert!(matches!(err, WorkflowError::Transaction(_)));
        assert!(!err.is_user_rejection());
    }
}
