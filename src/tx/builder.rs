//! Descriptor construction for faucet mint submissions
//!
//! Builds the ordered, chain-submittable steps for an intent. Construction
//! never touches the chain; the gas-limit estimate for the final step is a
//! separate operation invoked by the workflow when it is actually needed.

use async_trait::async_trait;
use ethers::abi::Token;
use ethers::types::transaction::eip2718::TypedTransaction;
use ethers::types::{Address, TransactionRequest, U256};
use tracing::debug;

use crate::asset::TransactionIntent;
use crate::error::{WorkflowError, WorkflowResult};

/// What a step does, for logging and ordering checks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    Approval,
    Mint,
}

impl StepKind {
    pub fn name(&self) -> &'static str {
        match self {
            StepKind::Approval => "approval",
            StepKind::Mint => "mint",
        }
    }
}

/// One chain-submittable step of a descriptor
#[derive(Debug, Clone)]
pub struct TransactionStep {
    pub kind: StepKind,
    pub tx: TypedTransaction,
}

/// Ordered, non-empty sequence of steps ending in the main transaction
#[derive(Debug, Clone)]
pub struct TransactionDescriptor {
    steps: Vec<TransactionStep>,
}

impl TransactionDescriptor {
    pub fn new(steps: Vec<TransactionStep>) -> WorkflowResult<Self> {
        if steps.is_empty() {
            return Err(WorkflowError::Build("descriptor has no steps".to_string()));
        }
        Ok(Self { steps })
    }

    pub fn steps(&self) -> &[TransactionStep] {
        &self.steps
    }

    /// The main transaction; its gas limit is estimated lazily
    pub fn final_step(&self) -> &TransactionStep {
        // non-empty by construction
        &self.steps[self.steps.len() - 1]
    }

    pub fn into_steps(self) -> Vec<TransactionStep> {
        self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Converts a domain intent into an ordered descriptor
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DescriptorBuilder: Send + Sync {
    async fn build(&self, intent: &TransactionIntent) -> WorkflowResult<TransactionDescriptor>;
}

/// Gas limit carried by approval steps. ERC20 approvals have a fixed,
/// well-known cost, so only the final step goes through the estimator.
const APPROVAL_GAS_LIMIT: u64 = 60_000;

/// Builds faucet mint descriptors against a faucet contract
pub struct FaucetMintBuilder {
    faucet_address: Address,
    mint_amount: U256,
}

impl FaucetMintBuilder {
    pub fn new(faucet_address: Address, mint_amount: U256) -> Self {
        Self {
            faucet_address,
            mint_amount,
        }
    }

    /// ABI-encode a call: 4-byte selector followed by encoded arguments
    fn encode_call(signature: &str, args: &[Token]) -> Vec<u8> {
        let mut data = ethers::utils::id(signature).to_vec();
        data.extend(ethers::abi::encode(args));
        data
    }
}

#[async_trait]
impl DescriptorBuilder for FaucetMintBuilder {
    async fn build(&self, intent: &TransactionIntent) -> WorkflowResult<TransactionDescriptor> {
        if self.mint_amount.is_zero() {
            return Err(WorkflowError::Build("mint amount is zero".to_string()));
        }

        let mut steps = Vec::new();

        if intent.asset.requires_approval() {
            let data = Self::encode_call(
                "approve(address,uint256)",
                &[
                    Token::Address(self.faucet_address),
                    Token::Uint(self.mint_amount),
                ],
            );
            let tx = TransactionRequest::new()
                .from(intent.actor)
                .to(intent.asset.address())
                .gas(APPROVAL_GAS_LIMIT)
                .data(data);
            steps.push(TransactionStep {
                kind: StepKind::Approval,
                tx: TypedTransaction::Legacy(tx),
            });
        }

        let data = Self::encode_call(
            "mint(address,address,uint256)",
            &[
                Token::Address(intent.asset.address()),
                Token::Address(intent.actor),
                Token::Uint(self.mint_amount),
            ],
        );
        debug!(
            "Built mint calldata for {} (selector 0x{})",
            intent.asset.symbol(),
            hex::encode(&data[..4])
        );
        let tx = TransactionRequest::new()
            .from(intent.actor)
            .to(self.faucet_address)
            .data(data);
        steps.push(TransactionStep {
            kind: StepKind::Mint,
            tx: TypedTransaction::Legacy(tx),
        });

        TransactionDescriptor::new(steps)
    }
}
