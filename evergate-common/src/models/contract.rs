use alloy_primitives::B256;
use num_bigint::BigUint;

/// Observed account state of an Everscale contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractState {
    pub is_deployed: bool,
    pub balance: BigUint,
    pub last_transaction_lt: Option<u64>,
}

/// One Everscale transaction as delivered by the transaction stream. The
/// payload stays opaque here; decoding happens behind the chain client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TonTransaction {
    pub hash: B256,
    pub lt: u64,
    pub boc: Vec<u8>,
}
