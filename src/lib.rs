//! Faucet mint transaction-submission workflow
//!
//! Drives a test-network faucet mint from a domain intent ("mint tokens for
//! asset X to account Y") through descriptor construction, deferred
//! gas-limit estimation, gas-price selection, signing and submission, to a
//! terminal state reported upward as data.
//!
//! The hard parts live behind injected collaborators: a
//! [`tx::DescriptorBuilder`] turns the intent into ordered chain-submittable
//! steps, a [`tx::GasLimitEstimator`] answers the lazy gas query on the
//! final step, and a [`tx::TransactionSubmitter`] signs and sends. The
//! [`workflow::TransactionHandler`] sequences them and owns the state
//! machine; containers subscribe to [`workflow::StatusSnapshot`] changes and
//! render the single [`workflow::ActionAffordance`] derived from them.

pub mod asset;
pub mod config;
pub mod error;
pub mod faucet;
pub mod gas;
pub mod tx;
pub mod wallet;
pub mod workflow;

pub use asset::{ReserveAsset, TransactionIntent};
pub use faucet::FaucetService;
pub use config::Settings;
pub use error::{WorkflowError, WorkflowResult};
pub use gas::{resolve_gas_price, GasPreset, GasPriceTable, GasSelection};
pub use wallet::{network_matches, StaticWallet, WalletContext};
pub use workflow::{ActionAffordance, StatusSnapshot, TransactionHandler, WorkflowState};
