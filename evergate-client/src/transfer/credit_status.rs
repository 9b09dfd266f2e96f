//! Second leg of a credit-backed EVM to Everscale transfer: the credit
//! processor working through exchange and delivery on the Everscale side.

use strum_macros::Display;
use tracing::warn;

use evergate_common::models::event::{CreditCoarseStatus, CreditProcessorStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum CreditStatus {
    /// Deposit not confirmed yet, or the processor contract not read yet.
    Initializing,
    InProgress { raw: CreditProcessorStatus },
    /// Terminal. `raw` is `None` when the on-chain value was outside the
    /// known range.
    Failed { raw: Option<CreditProcessorStatus> },
    Finished,
}

impl CreditStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Failed { .. } | Self::Finished)
    }
}

/// Collapses the raw processor status into the coarse user-facing one.
pub fn derive_credit_status(deposit_confirmed: bool, raw_status: Option<u8>) -> CreditStatus {
    if !deposit_confirmed {
        return CreditStatus::Initializing;
    }
    let Some(raw) = raw_status else {
        return CreditStatus::Initializing;
    };
    let Some(status) = CreditProcessorStatus::from_raw(raw) else {
        warn!(raw, "Unknown credit processor status");
        return CreditStatus::Failed { raw: None };
    };
    match status.coarse() {
        CreditCoarseStatus::InProgress => CreditStatus::InProgress { raw: status },
        CreditCoarseStatus::Failed => CreditStatus::Failed { raw: Some(status) },
        CreditCoarseStatus::Finished => CreditStatus::Finished,
    }
}
