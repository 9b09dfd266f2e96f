//! Transfer-step derivation: per-leg pure state machines over pipeline and
//! observed on-chain facts. No status is ever stored; every status is
//! recomputed from the current snapshot.

pub mod credit_status;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod everscale_deposit;
pub mod everscale_release;
pub mod evm_deposit;
pub mod evm_release;
pub mod orchestrator;

pub use credit_status::{derive_credit_status, CreditStatus};
pub use everscale_deposit::{derive_everscale_deposit_status, EverscaleDepositStatus};
pub use everscale_release::{derive_everscale_release_status, EverscaleReleaseStatus};
pub use evm_deposit::{derive_evm_deposit_status, extract_vote_data, EvmDepositFacts, EvmDepositStatus};
pub use evm_release::{derive_evm_release_status, EvmReleaseFacts, EvmReleaseStatus};
pub use orchestrator::{
    EverscaleEvmTransferView, EvmEverscaleSettlement, EvmEverscaleTransferView, UserAction,
};
