//! Transaction construction, gas estimation, and submission

pub mod builder;
pub mod estimator;
pub mod submitter;

pub use builder::{
    DescriptorBuilder, FaucetMintBuilder, StepKind, TransactionDescriptor, TransactionStep,
};
pub use estimator::{ChainEstimator, GasLimitEstimator};
pub use submitter::{ChainSubmitter, TransactionSubmitter};
