use std::{sync::Arc, time::Duration};

use alloy_primitives::Address;
use num_bigint::BigUint;
use tokio::task::JoinHandle;

use evergate_common::poll::{start_polling, Watched};

use crate::{client::EvmChainClient, errors::EvmClientError};

/// Snapshot of an ERC-20 token as seen by one holder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Erc20State {
    pub symbol: String,
    pub decimals: u32,
    pub balance: BigUint,
}

pub async fn fetch_erc20_state(
    client: &dyn EvmChainClient,
    token: Address,
    owner: Address,
) -> Result<Erc20State, EvmClientError> {
    Ok(Erc20State {
        symbol: client.erc20_symbol(token).await?,
        decimals: client.erc20_decimals(token).await?,
        balance: client.erc20_balance_of(token, owner).await?,
    })
}

/// Keeps the holder's token snapshot fresh in the background.
pub fn watch_erc20_state(
    client: Arc<dyn EvmChainClient>,
    token: Address,
    owner: Address,
    interval: Duration,
) -> (Watched<Erc20State>, JoinHandle<()>) {
    let watched = Watched::new();
    let handle = start_polling(watched.clone(), interval, |_| false, move || {
        let client = client.clone();
        async move { fetch_erc20_state(client.as_ref(), token, owner).await }
    });
    (watched, handle)
}
