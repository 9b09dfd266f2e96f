use alloy_primitives::B256;
use evergate_common::models::error::CodecError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EvmClientError {
    #[error("RPC request failed: {0}")]
    Rpc(String),

    #[error("Wallet interaction failed: {0}")]
    Wallet(String),

    #[error("Transaction not found: {0}")]
    TransactionNotFound(B256),

    #[error("Failed to decode contract response: {0}")]
    Decode(String),

    #[error("Failed to recover signer: {0}")]
    SignatureRecovery(String),

    #[error(transparent)]
    Codec(#[from] CodecError),
}
