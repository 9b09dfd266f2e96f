//! Second leg of an Everscale to EVM transfer: releasing the tokens from
//! the vault with the collected relay signatures.

use strum_macros::Display;

use evergate_ethereum::event::ReleaseKind;

use crate::pipeline::everscale_evm::EverscaleEvmPipeline;

/// Observed facts about the release, all recomputed on every poll tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EvmReleaseFacts {
    /// Vault's released flag for the withdraw id. `None` while unread.
    pub already_released: Option<bool>,
    /// Outcome decoded from a mined release transaction receipt, if any.
    pub receipt_outcome: Option<ReleaseKind>,
    /// A release tx hash is known but its receipt is not mined yet.
    pub release_tx_pending: bool,
    pub submission_in_flight: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum EvmReleaseStatus {
    Initializing,
    /// The `save_withdraw` action is available.
    Waiting,
    InProgress,
    /// Released. `kind` is `None` when someone else executed the release
    /// and no receipt of our own exists to classify.
    Finished { kind: Option<ReleaseKind> },
}

/// Derives the release leg status. The vault's released flag covers the
/// case where another relay or user already executed this withdrawal.
pub fn derive_evm_release_status(
    pipeline: &EverscaleEvmPipeline,
    payload_ready: bool,
    facts: &EvmReleaseFacts,
) -> EvmReleaseStatus {
    if !pipeline.is_actionable() || !payload_ready {
        return EvmReleaseStatus::Initializing;
    }
    if let Some(kind) = facts.receipt_outcome {
        return EvmReleaseStatus::Finished { kind: Some(kind) };
    }
    match facts.already_released {
        Some(true) => EvmReleaseStatus::Finished { kind: None },
        None => EvmReleaseStatus::Initializing,
        Some(false) => {
            if facts.submission_in_flight || facts.release_tx_pending {
                EvmReleaseStatus::InProgress
            } else {
                EvmReleaseStatus::Waiting
            }
        }
    }
}
