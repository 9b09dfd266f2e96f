use alloy_primitives::Address;
use async_trait::async_trait;
#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;
use num_bigint::BigUint;
use tokio::sync::mpsc;

use evergate_common::models::{
    contract::{ContractState, TonTransaction},
    event::{
        CreditProcessorStatus, EthEventVoteData, EventContractStatus, TonEventVoteData,
        TonTransferPayload,
    },
    ChainId, TonAddress,
};

use crate::errors::EverClientError;

/// `getDetails` of a TIP-3 token root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRootDetails {
    pub symbol: String,
    pub decimals: u32,
    pub total_supply: BigUint,
}

/// `getDetails` of the TIP-3 proxy that mints on deposits and burns on
/// withdrawals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyDetails {
    pub token_root: TonAddress,
    pub paused: bool,
    /// EVM-originated event configurations the proxy accepts events from.
    pub evm_configurations: Vec<TonAddress>,
}

/// Network configuration of an EVM-originated event configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvmConfigDetails {
    /// The vault contract expected to emit deposit events.
    pub event_emitter: Address,
    pub proxy: TonAddress,
    pub start_block_number: u64,
    /// 0 means open-ended.
    pub end_block_number: u64,
    pub event_initial_balance: BigUint,
    pub chain_id: ChainId,
}

impl EvmConfigDetails {
    pub fn is_expired(&self, current_block: u64) -> bool {
        self.end_block_number != 0 && current_block >= self.end_block_number
    }

    pub fn covers_block(&self, block_number: u64) -> bool {
        block_number >= self.start_block_number && !self.is_expired(block_number)
    }
}

/// Network configuration of an Everscale-originated event configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EverscaleConfigDetails {
    /// The proxy expected to emit withdrawal events.
    pub event_emitter: TonAddress,
    /// Counterpart proxy on the EVM side, part of the withdrawal payload.
    pub evm_proxy: Address,
    pub start_timestamp: u32,
    /// 0 means open-ended.
    pub end_timestamp: u32,
    pub event_initial_balance: BigUint,
    pub chain_id: ChainId,
}

impl EverscaleConfigDetails {
    pub fn is_expired(&self, now: u32) -> bool {
        self.end_timestamp != 0 && now >= self.end_timestamp
    }
}

/// `getDetails` of an event contract, either flavour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDetails {
    pub status: EventContractStatus,
    pub confirms: u32,
    pub rejects: u32,
    pub required_votes: u32,
    pub vote_data: TonEventVoteData,
    pub configuration: TonAddress,
    pub round: u32,
    /// Relay signatures, populated once confirmed.
    pub signatures: Vec<Vec<u8>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreditFactoryDetails {
    /// Fee the factory keeps from the attached EVERs, nanotokens.
    pub fee: BigUint,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreditProcessorDetails {
    pub status: CreditProcessorStatus,
    /// Set once the processor has deployed its event contract.
    pub event_address: Option<TonAddress>,
}

/// A `deployEvent` call decoded from a configuration transaction, with the
/// transfer payload it carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployEventNotification {
    pub vote_data: TonEventVoteData,
    pub payload: TonTransferPayload,
}

/// Token burn towards the bridge proxy, the Everscale leg of a withdrawal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BurnRequest {
    pub owner: TonAddress,
    pub tip3_root: TonAddress,
    pub amount: BigUint,
    /// The proxy that receives the burn callback and emits the event.
    pub callback_to: TonAddress,
    /// Packed transfer payload cell.
    pub payload: Vec<u8>,
    /// EVERs attached to the burn message, nanotokens.
    pub attached_evers: BigUint,
}

/// Access to the Everscale network through the connected browser wallet and
/// its RPC endpoint. Typed `getDetails`-style reads per contract family,
/// plus the transaction streams the transfer flows wait on.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait EverChainClient: Send + Sync {
    async fn contract_state(&self, address: TonAddress)
        -> Result<ContractState, EverClientError>;

    /// Push stream of account state changes. `None` when the transport has
    /// no subscription support; callers fall back to polling.
    async fn subscribe_contract_state(
        &self,
        address: TonAddress,
    ) -> Result<Option<mpsc::Receiver<ContractState>>, EverClientError>;

    async fn token_root_details(
        &self,
        root: TonAddress,
    ) -> Result<TokenRootDetails, EverClientError>;

    async fn token_wallet_address(
        &self,
        root: TonAddress,
        owner: TonAddress,
    ) -> Result<TonAddress, EverClientError>;

    async fn token_wallet_balance(&self, wallet: TonAddress)
        -> Result<BigUint, EverClientError>;

    async fn proxy_details(&self, proxy: TonAddress) -> Result<ProxyDetails, EverClientError>;

    async fn evm_config_details(
        &self,
        configuration: TonAddress,
    ) -> Result<EvmConfigDetails, EverClientError>;

    async fn everscale_config_details(
        &self,
        configuration: TonAddress,
    ) -> Result<EverscaleConfigDetails, EverClientError>;

    async fn event_details(
        &self,
        event_contract: TonAddress,
    ) -> Result<EventDetails, EverClientError>;

    async fn credit_factory_details(
        &self,
        factory: TonAddress,
    ) -> Result<CreditFactoryDetails, EverClientError>;

    async fn credit_processor_details(
        &self,
        processor: TonAddress,
    ) -> Result<CreditProcessorDetails, EverClientError>;

    /// Address the configuration would deploy an event contract at for this
    /// EVM-side vote data.
    async fn derive_eth_event_address(
        &self,
        configuration: TonAddress,
        vote_data: EthEventVoteData,
    ) -> Result<TonAddress, EverClientError>;

    /// Address the configuration would deploy an event contract at for this
    /// Everscale-side vote data.
    async fn derive_ton_event_address(
        &self,
        configuration: TonAddress,
        vote_data: TonEventVoteData,
    ) -> Result<TonAddress, EverClientError>;

    /// Address the credit factory would deploy a processor at for this vote
    /// data.
    async fn derive_credit_processor_address(
        &self,
        factory: TonAddress,
        vote_data: EthEventVoteData,
    ) -> Result<TonAddress, EverClientError>;

    /// Submits `deployEvent` on the configuration through the wallet.
    async fn deploy_event(
        &self,
        sender: TonAddress,
        configuration: TonAddress,
        vote_data: EthEventVoteData,
        attached_evers: BigUint,
    ) -> Result<(), EverClientError>;

    /// Submits the burn through the wallet.
    async fn burn(&self, request: BurnRequest) -> Result<(), EverClientError>;

    /// Closes a settled event contract, reclaiming its remaining balance to
    /// the owner.
    async fn close_event(
        &self,
        owner: TonAddress,
        event_contract: TonAddress,
    ) -> Result<(), EverClientError>;

    /// Past transactions of an account, newest first, optionally bounded
    /// below by a logical time.
    async fn old_transactions(
        &self,
        address: TonAddress,
        from_lt: Option<u64>,
    ) -> Result<Vec<TonTransaction>, EverClientError>;

    /// Push stream of new transactions of an account.
    async fn subscribe_transactions(
        &self,
        address: TonAddress,
    ) -> Result<mpsc::Receiver<TonTransaction>, EverClientError>;

    /// Decodes a configuration transaction as a `deployEvent` call. `None`
    /// when the transaction is something else.
    fn decode_deploy_event(
        &self,
        transaction: &TonTransaction,
    ) -> Option<DeployEventNotification>;

    /// `expectedSpendAmount` on a DEX pair: tokens to spend for a desired
    /// receive amount.
    async fn dex_expected_spend_amount(
        &self,
        pair: TonAddress,
        receive_amount: BigUint,
        receive_token_root: TonAddress,
    ) -> Result<BigUint, EverClientError>;
}
