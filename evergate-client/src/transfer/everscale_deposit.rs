//! First leg of an Everscale to EVM transfer: the burn and the relay voting
//! on the event contract it spawns.

use strum_macros::Display;
use tracing::error;

use evergate_common::models::{event::EverscaleEventData, TonAddress};
use evergate_everscale::event::EventState;

use crate::pipeline::everscale_evm::EverscaleEvmPipeline;

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum EverscaleDepositStatus {
    /// Pipeline not loaded yet, or blocked by a validation error.
    Initializing,
    /// Loaded and no event contract known: the burn action is available.
    WaitingForDeploy,
    WaitingForConfirmations,
    /// Event confirmed and consistent with the pipeline. Carries everything
    /// the release leg needs.
    Finished {
        data: EverscaleEventData,
        signatures: Vec<Vec<u8>>,
    },
    /// Rejected by the relays. Terminal.
    Failed,
}

/// Derives the deposit leg status. Pure: same inputs, same status.
///
/// A confirmed event only counts as Finished when its configuration address
/// and destination chain id match the pipeline. The event address usually
/// arrives through the URL, so a tampered or stale link must not be able to
/// attach a foreign event to this transfer.
pub fn derive_everscale_deposit_status(
    pipeline: &EverscaleEvmPipeline,
    event_address: Option<TonAddress>,
    event_state: Option<&EventState>,
) -> EverscaleDepositStatus {
    let Some(loaded) = pipeline.loaded() else {
        return EverscaleDepositStatus::Initializing;
    };
    if loaded.error.is_some() {
        return EverscaleDepositStatus::Initializing;
    }
    let Some(event_address) = event_address else {
        return EverscaleDepositStatus::WaitingForDeploy;
    };

    match event_state {
        None | Some(EventState::Initializing { .. }) | Some(EventState::Pending { .. }) => {
            EverscaleDepositStatus::WaitingForConfirmations
        }
        Some(EventState::Rejected) => EverscaleDepositStatus::Failed,
        Some(EventState::Confirmed { data, signatures }) => {
            if data.configuration != loaded.vault_config.everscale_configuration
                || data.decoded.chain_id != loaded.vault_config.chain_id
            {
                error!(
                    %event_address,
                    configuration = %data.configuration,
                    chain_id = data.decoded.chain_id,
                    "Confirmed event does not belong to this pipeline"
                );
                return EverscaleDepositStatus::WaitingForConfirmations;
            }
            EverscaleDepositStatus::Finished {
                data: data.clone(),
                signatures: signatures.clone(),
            }
        }
    }
}
