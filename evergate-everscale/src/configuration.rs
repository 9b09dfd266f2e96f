//! Everscale-originated event configurations: the burn leg of a withdrawal
//! and the wait for the event contract it spawns.

use std::sync::Arc;

use alloy_primitives::Address;
use num_bigint::BigUint;
use tracing::{debug, info};

use evergate_common::{
    constants::BURN_ATTACHED_SURCHARGE,
    models::{contract::TonTransaction, ChainId, TonAddress},
    traits::EventCodec,
};

use crate::{
    client::{BurnRequest, EverChainClient},
    errors::EverClientError,
};

/// Identifies the burn whose event contract we are waiting for. The
/// configuration's transaction stream carries every user's deploys; only a
/// payload matching all four fields belongs to this transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithdrawFilter {
    pub configuration: TonAddress,
    pub owner: TonAddress,
    pub recipient: Address,
    pub amount: BigUint,
    pub chain_id: ChainId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithdrawRequest {
    pub owner: TonAddress,
    pub tip3_root: TonAddress,
    pub proxy: TonAddress,
    pub configuration: TonAddress,
    pub amount: BigUint,
    pub recipient: Address,
    pub chain_id: ChainId,
}

impl WithdrawRequest {
    fn filter(&self) -> WithdrawFilter {
        WithdrawFilter {
            configuration: self.configuration,
            owner: self.owner,
            recipient: self.recipient,
            amount: self.amount.clone(),
            chain_id: self.chain_id,
        }
    }
}

/// Executes the Everscale leg of a withdrawal: packs the payload, burns the
/// tokens towards the proxy and resolves to the address of the event
/// contract the configuration deploys for it.
pub async fn burn_and_wait_for_event(
    client: Arc<dyn EverChainClient>,
    codec: &dyn EventCodec,
    request: WithdrawRequest,
) -> Result<TonAddress, EverClientError> {
    let details = client.everscale_config_details(request.configuration).await?;
    // Logical time fence taken before the burn, so the deploy transaction
    // cannot slip between the burn and the history scan.
    let from_lt = client
        .contract_state(request.configuration)
        .await?
        .last_transaction_lt;

    let payload = codec.pack_transfer_payload(request.recipient, request.chain_id)?;
    let attached_evers = details.event_initial_balance + BigUint::from(BURN_ATTACHED_SURCHARGE);
    client
        .burn(BurnRequest {
            owner: request.owner,
            tip3_root: request.tip3_root,
            amount: request.amount.clone(),
            callback_to: request.proxy,
            payload,
            attached_evers,
        })
        .await?;
    info!(configuration = %request.configuration, "Burn submitted, waiting for event deploy");

    wait_for_withdraw_event(client, &request.filter(), from_lt).await
}

/// Waits for the configuration to deploy the event contract matching
/// `filter`. Scans history past `from_lt` first, then follows new
/// transactions; the first matching deploy wins.
pub async fn wait_for_withdraw_event(
    client: Arc<dyn EverChainClient>,
    filter: &WithdrawFilter,
    from_lt: Option<u64>,
) -> Result<TonAddress, EverClientError> {
    // Subscribe before the scan so nothing lands in between unseen.
    let mut stream = client.subscribe_transactions(filter.configuration).await?;

    for transaction in client.old_transactions(filter.configuration, from_lt).await? {
        if let Some(event) = match_deploy_event(client.as_ref(), &transaction, filter).await? {
            return Ok(event);
        }
    }
    while let Some(transaction) = stream.recv().await {
        if let Some(event) = match_deploy_event(client.as_ref(), &transaction, filter).await? {
            return Ok(event);
        }
    }
    Err(EverClientError::StreamEnded)
}

async fn match_deploy_event(
    client: &dyn EverChainClient,
    transaction: &TonTransaction,
    filter: &WithdrawFilter,
) -> Result<Option<TonAddress>, EverClientError> {
    let Some(notification) = client.decode_deploy_event(transaction) else {
        return Ok(None);
    };
    let payload = &notification.payload;
    if payload.sender != filter.owner
        || payload.recipient != filter.recipient
        || payload.tokens != filter.amount
        || payload.chain_id != filter.chain_id
    {
        debug!(tx = %transaction.hash, "Deploy event belongs to another transfer");
        return Ok(None);
    }
    let event = client
        .derive_ton_event_address(filter.configuration, notification.vote_data)
        .await?;
    info!(%event, tx = %transaction.hash, "Matched event deploy");
    Ok(Some(event))
}
