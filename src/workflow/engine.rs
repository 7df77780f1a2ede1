//! Submission driver for one faucet mint workflow
//!
//! Owns the workflow state exclusively. Collaborators are injected as trait
//! objects; the engine sequences them: build the descriptor, estimate the
//! final step, publish the gas limit, then sign and submit each step in
//! order. Once an attempt starts it runs to completion; there is no
//! mid-flight cancellation and no automatic retry of a failed attempt.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::{watch, Mutex};
use tracing::{debug, info, warn};
use uuid::Uuid;

use ethers::types::U256;

use super::state::{StatusSnapshot, WorkflowState};
use crate::asset::TransactionIntent;
use crate::error::{WorkflowError, WorkflowResult};
use crate::tx::{DescriptorBuilder, GasLimitEstimator, TransactionSubmitter};

/// Drives a transaction from intent to terminal state
pub struct TransactionHandler {
    intent: TransactionIntent,
    builder: Arc<dyn DescriptorBuilder>,
    estimator: Arc<dyn GasLimitEstimator>,
    submitter: Arc<dyn TransactionSubmitter>,
    /// Resolved gas price; None lets the node decide
    gas_price: Option<U256>,
    /// Caller-set gate: while true the trigger is suppressed entirely
    blocked: bool,
    state: Mutex<WorkflowState>,
    in_flight: AtomicBool,
    status_tx: watch::Sender<StatusSnapshot>,
    gas_limit_tx: watch::Sender<Option<U256>>,
}

impl TransactionHandler {
    pub fn new(
        intent: TransactionIntent,
        builder: Arc<dyn DescriptorBuilder>,
        estimator: Arc<dyn GasLimitEstimator>,
        submitter: Arc<dyn TransactionSubmitter>,
        gas_price: Option<U256>,
        blocked: bool,
    ) -> Self {
        // Subscribers are only woken by real transitions, never by this
        // initial value.
        let (status_tx, _) = watch::channel(StatusSnapshot::idle());
        let (gas_limit_tx, _) = watch::channel(None);

        Self {
            intent,
            builder,
            estimator,
            submitter,
            gas_price,
            blocked,
            state: Mutex::new(WorkflowState::Idle),
            in_flight: AtomicBool::new(false),
            status_tx,
            gas_limit_tx,
        }
    }

    /// Subscribe to status snapshots, published on every state change
    pub fn subscribe_status(&self) -> watch::Receiver<StatusSnapshot> {
        self.status_tx.subscribe()
    }

    /// Subscribe to the gas limit, published once per attempt when known
    pub fn subscribe_gas_limit(&self) -> watch::Receiver<Option<U256>> {
        self.gas_limit_tx.subscribe()
    }

    /// Whether an attempt is currently in flight
    pub fn loading(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Current workflow state
    pub async fn state(&self) -> WorkflowState {
        self.state.lock().await.clone()
    }

    /// Latest published status snapshot
    pub fn current_status(&self) -> StatusSnapshot {
        self.status_tx.borrow().clone()
    }

    /// Start one submission attempt.
    ///
    /// A blocked handler and a handler with an attempt already in flight
    /// both leave the state machine untouched.
    pub async fn execute(&self) -> WorkflowResult<()> {
        if self.blocked {
            debug!("Submission blocked by caller, trigger suppressed");
            return Ok(());
        }

        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            warn!("Attempt already in flight, ignoring trigger");
            return Ok(());
        }

        let attempt = Uuid::new_v4();
        info!(
            %attempt,
            asset = self.intent.asset.symbol(),
            actor = ?self.intent.actor,
            "Starting faucet submission"
        );

        let result = self.run_attempt(attempt).await;
        self.in_flight.store(false, Ordering::SeqCst);
        result
    }

    async fn run_attempt(&self, attempt: Uuid) -> WorkflowResult<()> {
        self.transition(WorkflowState::Estimating).await?;

        let descriptor = match self.builder.build(&self.intent).await {
            Ok(descriptor) => descriptor,
            Err(e) => {
                warn!(%attempt, error = %e, "Descriptor construction failed");
                self.transition(WorkflowState::Failed { reason: e.clone() })
                    .await?;
                return Err(e);
            }
        };
        debug!(%attempt, steps = descriptor.len(), "Descriptor built");

        let gas_limit = match self.estimator.estimate(&descriptor.final_step().tx).await {
            Ok(limit) => limit,
            Err(e) => {
                warn!(%attempt, error = %e, "Gas estimation failed");
                self.transition(WorkflowState::GasEstimationFailed { reason: e.clone() })
                    .await?;
                return Err(e);
            }
        };
        self.gas_limit_tx.send_replace(Some(gas_limit));
        debug!(%attempt, %gas_limit, "Gas limit resolved");

        self.transition(WorkflowState::AwaitingSignature).await?;

        // One nonce query per attempt; steps take consecutive slots so the
        // mint cannot land before its approval.
        let start_nonce = match self.submitter.pending_nonce().await {
            Ok(nonce) => nonce,
            Err(e) => {
                warn!(%attempt, error = %e, "Nonce query failed");
                self.transition(WorkflowState::Failed { reason: e.clone() })
                    .await?;
                return Err(e);
            }
        };

        let steps = descriptor.into_steps();
        let last = steps.len() - 1;
        let mut final_hash = None;

        for (index, mut step) in steps.into_iter().enumerate() {
            let kind = step.kind;
            step.tx.set_nonce(start_nonce + index as u64);
            if let Some(price) = self.gas_price {
                step.tx.set_gas_price(price);
            }
            if index == last {
                step.tx.set_gas(gas_limit);
            }

            match self.submitter.sign_and_submit(step.tx).await {
                Ok(tx_hash) => {
                    info!(%attempt, step = kind.name(), ?tx_hash, "Step submitted");
                    if index == last {
                        final_hash = Some(tx_hash);
                    }
                }
                Err(e) => {
                    warn!(%attempt, step = kind.name(), error = %e, "Submission failed");
                    self.transition(WorkflowState::Failed { reason: e.clone() })
                        .await?;
                    return Err(e);
                }
            }
        }

        let tx_hash = final_hash
            .ok_or_else(|| WorkflowError::Internal("descriptor had no steps".to_string()))?;
        self.transition(WorkflowState::Submitted { tx_hash }).await?;
        info!(%attempt, ?tx_hash, "Faucet submission complete");
        Ok(())
    }

    /// Retry path out of a failure state. Never invoked automatically.
    pub async fn reset(&self) -> WorkflowResult<()> {
        self.transition(WorkflowState::Idle).await?;
        self.gas_limit_tx.send_replace(None);
        Ok(())
    }

    /// Validate, apply, and publish a state change.
    ///
    /// The snapshot is derived while the state lock is held, so observers
    /// see transitions in order. If the owning side dropped all receivers,
    /// the publish is a silent no-op and the late result is discarded.
    async fn transition(&self, next: WorkflowState) -> WorkflowResult<()> {
        let mut state = self.state.lock().await;
        state.validate_transition(&next)?;
        debug!(from = state.name(), to = next.name(), "Workflow transition");
        *state = next;
        self.status_tx.send_replace(StatusSnapshot::from_state(&state));
        Ok(())
    }
}
