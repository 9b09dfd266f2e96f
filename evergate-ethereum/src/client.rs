use alloy_primitives::{Address, B256};
use async_trait::async_trait;
#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;
use num_bigint::BigUint;

use evergate_common::models::TonAddress;

use crate::errors::EvmClientError;

/// One log entry from a transaction receipt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvmLog {
    pub address: Address,
    pub topics: Vec<B256>,
    pub data: Vec<u8>,
    pub log_index: u64,
}

impl EvmLog {
    pub fn topic0(&self) -> Option<B256> {
        self.topics.first().copied()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxReceipt {
    pub transaction_hash: B256,
    pub to: Option<Address>,
    pub block_number: u64,
    pub block_hash: B256,
    pub logs: Vec<EvmLog>,
}

/// Arguments of a plain vault `deposit` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepositRequest {
    pub vault: Address,
    pub sender: Address,
    pub recipient: TonAddress,
    pub amount: BigUint,
}

/// Arguments of a `depositToFactory` call, the credit flavour of a deposit.
/// The factory spawns a credit processor that swaps part of the tokens into
/// EVERs for the recipient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactoryDepositRequest {
    pub vault: Address,
    pub sender: Address,
    pub recipient: TonAddress,
    pub amount: BigUint,
    pub min_evers_amount: BigUint,
    pub min_tokens_amount: BigUint,
    pub swap_numerator: u64,
    pub swap_denominator: u64,
    /// Opaque layer-3 payload cell, base64 encoded. Empty cell by default.
    pub level3: String,
}

/// Access to one EVM network through the connected browser wallet and its
/// RPC endpoint. Read calls go straight to the RPC; `send_*` calls are
/// routed through the wallet and resolve to the submitted transaction hash.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait EvmChainClient: Send + Sync {
    async fn block_number(&self) -> Result<u64, EvmClientError>;

    async fn transaction_receipt(&self, tx_hash: B256)
        -> Result<Option<TxReceipt>, EvmClientError>;

    /// Confirmation depth of a mined transaction, `None` while unmined.
    async fn transaction_confirmations(
        &self,
        tx_hash: B256,
    ) -> Result<Option<u64>, EvmClientError>;

    async fn vault_token(&self, vault: Address) -> Result<Address, EvmClientError>;

    async fn vault_available_deposit_limit(
        &self,
        vault: Address,
    ) -> Result<BigUint, EvmClientError>;

    async fn vault_emergency_shutdown(&self, vault: Address) -> Result<bool, EvmClientError>;

    async fn vault_deposit_fee(&self, vault: Address) -> Result<BigUint, EvmClientError>;

    async fn vault_withdraw_fee(&self, vault: Address) -> Result<BigUint, EvmClientError>;

    /// Whether the vault already released the withdrawal with this id.
    async fn withdrawal_released(
        &self,
        vault: Address,
        withdraw_id: B256,
    ) -> Result<bool, EvmClientError>;

    async fn erc20_symbol(&self, token: Address) -> Result<String, EvmClientError>;

    async fn erc20_decimals(&self, token: Address) -> Result<u32, EvmClientError>;

    async fn erc20_balance_of(
        &self,
        token: Address,
        owner: Address,
    ) -> Result<BigUint, EvmClientError>;

    async fn erc20_allowance(
        &self,
        token: Address,
        owner: Address,
        spender: Address,
    ) -> Result<BigUint, EvmClientError>;

    async fn send_approve(
        &self,
        token: Address,
        owner: Address,
        spender: Address,
        amount: BigUint,
    ) -> Result<B256, EvmClientError>;

    async fn send_deposit(&self, request: DepositRequest) -> Result<B256, EvmClientError>;

    async fn send_deposit_to_factory(
        &self,
        request: FactoryDepositRequest,
    ) -> Result<B256, EvmClientError>;

    /// Submits `saveWithdraw` with the ABI-encoded event payload and the
    /// relay signatures, already sorted by signer address.
    async fn send_save_withdraw(
        &self,
        vault: Address,
        sender: Address,
        payload: Vec<u8>,
        signatures: Vec<Vec<u8>>,
    ) -> Result<B256, EvmClientError>;

    /// Recovers the relay address that produced `signature` over `payload`.
    fn recover_signer(&self, payload: &[u8], signature: &[u8])
        -> Result<Address, EvmClientError>;
}
