use alloy_primitives::Address;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

use crate::models::{error::CodecError, event::TonTransferPayload, ChainId};

/// Conversion between TVM cells and the flat byte layout the EVM contracts
/// consume. Implementations wrap a concrete TVM serialization library; the
/// state machines only ever see opaque byte buffers.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait EventCodec: Send + Sync {
    /// Re-encodes a packed event cell into the ABI byte layout expected by
    /// `saveWithdraw` on the EVM side.
    fn cell_into_evm_bytes(&self, cell: &[u8]) -> Result<Vec<u8>, CodecError>;

    /// Inverse of [`EventCodec::cell_into_evm_bytes`].
    fn evm_bytes_into_cell(&self, bytes: &[u8]) -> Result<Vec<u8>, CodecError>;

    /// Packs the burn payload cell for an Everscale to EVM transfer.
    fn pack_transfer_payload(
        &self,
        recipient: Address,
        chain_id: ChainId,
    ) -> Result<Vec<u8>, CodecError>;

    /// Decodes the payload cell carried by an Everscale event contract.
    fn unpack_transfer_payload(&self, cell: &[u8]) -> Result<TonTransferPayload, CodecError>;
}
