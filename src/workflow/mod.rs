//! Submission state machine, status reporting, and affordance derivation
//!
//! The workflow drives one attempt at a time:
//! Idle -> Estimating -> AwaitingSignature -> Submitted,
//! with distinct terminal failures for the estimating phase and the
//! signing/submission phase. Status changes are pushed through a watch
//! channel; the hosting container decides what to do with them.

pub mod engine;
pub mod state;
pub mod trigger;

pub use engine::TransactionHandler;
pub use state::{StatusSnapshot, WorkflowState};
pub use trigger::ActionAffordance;
