use evergate_common::models::error::CodecError;
use evergate_ethereum::EvmClientError;
use evergate_everscale::EverClientError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    /// A prerequisite is missing, not a failure. Surfaced as "initializing".
    #[error("Pipeline is not loaded yet")]
    NotLoaded,

    /// A soft validation check failed; all transfer actions are blocked
    /// until the on-chain configuration is fixed.
    #[error("Pipeline is blocked: {0}")]
    Blocked(String),

    /// A submission for this transfer is already in flight.
    #[error("Action already in progress")]
    ActionInProgress,

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error(transparent)]
    Evm(#[from] EvmClientError),

    #[error(transparent)]
    Ever(#[from] EverClientError),

    #[error(transparent)]
    Codec(#[from] CodecError),
}

#[derive(Error, Debug)]
pub enum TransferError {
    #[error("Transaction receipt carries no recognizable deposit log")]
    MissingDepositLog,

    #[error("Deposit transaction went to {actual}, expected the vault {expected}")]
    WrongDepositTarget { expected: String, actual: String },

    #[error(transparent)]
    Evm(#[from] EvmClientError),

    #[error(transparent)]
    Ever(#[from] EverClientError),

    #[error(transparent)]
    Codec(#[from] CodecError),
}
