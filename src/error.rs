//! Error types for the faucet submission workflow

use thiserror::Error;

/// Main error type for the workflow
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorkflowError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid asset {symbol}: {message}")]
    InvalidAsset { symbol: String, message: String },

    #[error("Descriptor build error: {0}")]
    Build(String),

    #[error("Gas estimation error: {0}")]
    GasEstimation(String),

    #[error("Transaction error: {0}")]
    Transaction(String),

    #[error("Insufficient funds for account {account}")]
    InsufficientFunds { account: String },

    #[error("Timeout waiting for {operation}")]
    Timeout { operation: String },

    #[error("Invalid state transition from {from} to {to}")]
    InvalidStateTransition { from: String, to: String },

    #[error("Chain connection error for chain {chain_id}: {message}")]
    ChainConnection { chain_id: u64, message: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl WorkflowError {
    /// Check if this error came from the deferred gas-limit estimator
    pub fn is_gas_estimation(&self) -> bool {
        matches!(self, WorkflowError::GasEstimation(_))
    }

    /// Check if this error is a signer-side rejection (user declined to sign)
    pub fn is_user_rejection(&self) -> bool {
        match self {
            WorkflowError::Transaction(message) => {
                let lower = message.to_lowercase();
                lower.contains("rejected") || lower.contains("denied")
            }
            _ => false,
        }
    }

    /// Check if error is retryable within a submission attempt
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            WorkflowError::Timeout { .. } | WorkflowError::ChainConnection { .. }
        )
    }
}

/// Result type for workflow operations
pub type WorkflowResult<T> = Result<T, WorkflowError>;
