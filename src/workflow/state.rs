//! Workflow state machine data and the derived status projection

use chrono::{DateTime, Utc};
use ethers::types::H256;
use serde::Serialize;

use crate::error::{WorkflowError, WorkflowResult};

/// State of one submission attempt. Exactly one variant is active; the
/// engine owns it exclusively and everything else reads projections.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowState {
    Idle,
    Estimating,
    AwaitingSignature,
    Submitted { tx_hash: H256 },
    GasEstimationFailed { reason: WorkflowError },
    Failed { reason: WorkflowError },
}

impl WorkflowState {
    pub fn name(&self) -> &'static str {
        match self {
            WorkflowState::Idle => "idle",
            WorkflowState::Estimating => "estimating",
            WorkflowState::AwaitingSignature => "awaiting_signature",
            WorkflowState::Submitted { .. } => "submitted",
            WorkflowState::GasEstimationFailed { .. } => "gas_estimation_failed",
            WorkflowState::Failed { .. } => "failed",
        }
    }

    /// Terminal states end the attempt; only an explicit reset leaves them
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            WorkflowState::Submitted { .. }
                | WorkflowState::GasEstimationFailed { .. }
                | WorkflowState::Failed { .. }
        )
    }

    /// Enforce the one-directional transition table.
    ///
    /// The only backward edges are the explicit resets out of the failure
    /// states; a successful submission never returns to Idle.
    pub fn validate_transition(&self, next: &WorkflowState) -> WorkflowResult<()> {
        use WorkflowState::*;

        let allowed = matches!(
            (self, next),
            (Idle, Estimating)
                | (Estimating, AwaitingSignature)
                | (Estimating, GasEstimationFailed { .. })
                | (Estimating, Failed { .. })
                | (AwaitingSignature, Submitted { .. })
                | (AwaitingSignature, Failed { .. })
                | (Failed { .. }, Idle)
                | (GasEstimationFailed { .. }, Idle)
        );

        if allowed {
            Ok(())
        } else {
            Err(WorkflowError::InvalidStateTransition {
                from: self.name().to_string(),
                to: next.name().to_string(),
            })
        }
    }
}

/// Read-only projection pushed to the hosting container on every state
/// change. `success` is true iff a transaction hash is present.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusSnapshot {
    pub success: bool,
    pub tx_hash: Option<H256>,
    pub tx_error: Option<String>,
    pub gas_estimation_error: Option<String>,
    pub at: DateTime<Utc>,
}

impl StatusSnapshot {
    /// Derive the snapshot for a state. This is the only constructor, so
    /// the success-iff-hash invariant holds everywhere.
    pub fn from_state(state: &WorkflowState) -> Self {
        let tx_hash = match state {
            WorkflowState::Submitted { tx_hash } => Some(*tx_hash),
            _ => None,
        };
        let (tx_error, gas_estimation_error) = match state {
            WorkflowState::GasEstimationFailed { reason } => (None, Some(reason.to_string())),
            WorkflowState::Failed { reason } => (Some(reason.to_string()), None),
            _ => (None, None),
        };

        Self {
            success: tx_hash.is_some(),
            tx_hash,
            tx_error,
            gas_estimation_error,
            at: Utc::now(),
        }
    }

    pub fn idle() -> Self {
        Self::from_state(&WorkflowState::Idle)
    }

    pub fn has_error(&self) -> bool {
        self.tx_error.is_some() || self.gas_estimation_error.is_some()
    }
}
