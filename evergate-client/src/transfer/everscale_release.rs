//! Second leg of a plain EVM to Everscale transfer: deploying the event
//! contract and waiting for the relays to confirm it.

use strum_macros::Display;

use evergate_common::models::{contract::ContractState, event::EventContractStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum EverscaleReleaseStatus {
    Initializing,
    /// Event contract not deployed yet: the deploy action is available.
    Waiting,
    InProgress,
    Finished,
    /// Rejected by the relays. Terminal.
    Failed,
}

/// Derives the release leg status for the default (non-credit) flow. The
/// event contract is deployed by the user, so an undeployed account means
/// an action rather than a wait.
pub fn derive_everscale_release_status(
    deposit_confirmed: bool,
    event_address_known: bool,
    contract_state: Option<&ContractState>,
    event_status: Option<EventContractStatus>,
    deploy_in_flight: bool,
) -> EverscaleReleaseStatus {
    if !deposit_confirmed || !event_address_known {
        return EverscaleReleaseStatus::Initializing;
    }
    let deployed = contract_state.map(|state| state.is_deployed).unwrap_or(false);
    if !deployed {
        return if deploy_in_flight {
            EverscaleReleaseStatus::InProgress
        } else {
            EverscaleReleaseStatus::Waiting
        };
    }
    match event_status {
        None
        | Some(EventContractStatus::Initializing)
        | Some(EventContractStatus::Pending) => EverscaleReleaseStatus::InProgress,
        Some(EventContractStatus::Confirmed) => EverscaleReleaseStatus::Finished,
        Some(EventContractStatus::Rejected) => EverscaleReleaseStatus::Failed,
    }
}
