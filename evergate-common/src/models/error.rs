use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Invalid Everscale address: {0}")]
    InvalidTonAddress(String),

    #[error("Invalid EVM address: {0}")]
    InvalidEvmAddress(String),

    #[error("Invalid transaction hash: {0}")]
    InvalidTxHash(String),

    #[error("Unknown network id: {0}")]
    UnknownNetwork(String),

    #[error("Unsupported transfer route: {0} -> {1}")]
    UnsupportedRoute(String, String),

    #[error("Malformed transfer URL: {0}")]
    MalformedUrl(String),

    #[error("Invalid wizard step transition: {0}")]
    InvalidStepTransition(String),
}

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Failed to map cell into EVM bytes: {0}")]
    CellMapping(String),

    #[error("Failed to unpack cell: {0}")]
    CellUnpack(String),

    #[error("Failed to pack payload cell: {0}")]
    CellPack(String),
}
