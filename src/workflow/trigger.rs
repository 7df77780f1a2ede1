//! Primary affordance derivation for the hosting container
//!
//! Exactly one affordance exists for any snapshot: the trigger that starts
//! a submission, or the close control once the attempt reached a hash or an
//! error. The OK prefix is omitted whenever an error occurred.

use serde::Serialize;

use super::state::StatusSnapshot;

/// The single control a container should render for a snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ActionAffordance {
    Trigger { enabled: bool, label: String },
    Close { ok_prefix: bool },
}

impl ActionAffordance {
    /// Derive the affordance for the current snapshot.
    ///
    /// The trigger is disabled while an attempt is in flight, when the
    /// wallet is on the wrong network, or when the caller blocks
    /// submission. A hash or any error switches to the close control.
    pub fn derive(
        snapshot: &StatusSnapshot,
        loading: bool,
        wrong_network: bool,
        blocked: bool,
        asset_symbol: &str,
    ) -> Self {
        if snapshot.tx_hash.is_some() || snapshot.has_error() {
            return ActionAffordance::Close {
                ok_prefix: !snapshot.has_error(),
            };
        }

        let enabled = !loading && !wrong_network && !blocked;
        let label = if loading {
            "PENDING...".to_string()
        } else {
            format!("FAUCET {}", asset_symbol)
        };

        ActionAffordance::Trigger { enabled, label }
    }
}
