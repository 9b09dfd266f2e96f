use evergate_common::models::{error::CodecError, TonAddress};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EverClientError {
    #[error("RPC request failed: {0}")]
    Rpc(String),

    #[error("Wallet interaction failed: {0}")]
    Wallet(String),

    #[error("Account is not deployed: {0}")]
    AccountNotDeployed(TonAddress),

    #[error("Failed to decode contract response: {0}")]
    Decode(String),

    #[error("Transaction stream ended before the expected transaction arrived")]
    StreamEnded,

    #[error(transparent)]
    Codec(#[from] CodecError),
}
