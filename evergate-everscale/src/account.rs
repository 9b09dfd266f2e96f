//! Account state watcher with push-first, poll-fallback semantics.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, warn};

use evergate_common::{
    constants::CONTRACT_POLL_INTERVAL,
    models::{contract::ContractState, TonAddress},
    poll::Watched,
};

use crate::client::EverChainClient;

/// Watches an account's state until aborted.
///
/// When the transport supports subscriptions, state changes arrive by push
/// and win over any concurrently running poll; polling continues underneath
/// as a safety net at [`CONTRACT_POLL_INTERVAL`]. Without subscription
/// support this degrades to plain interval polling.
pub fn watch_contract_state(
    client: Arc<dyn EverChainClient>,
    address: TonAddress,
) -> (Watched<ContractState>, JoinHandle<()>) {
    let watched = Watched::new();
    let handle = {
        let watched = watched.clone();
        tokio::spawn(async move {
            let mut subscription = match client.subscribe_contract_state(address).await {
                Ok(subscription) => subscription,
                Err(error) => {
                    warn!(%address, %error, "Subscription setup failed, polling only");
                    None
                }
            };
            let mut ticker = tokio::time::interval(CONTRACT_POLL_INTERVAL);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                if let Some(stream) = subscription.as_mut() {
                    tokio::select! {
                        update = stream.recv() => match update {
                            Some(state) => watched.set(state),
                            None => {
                                debug!(%address, "Subscription ended, polling only");
                                subscription = None;
                            }
                        },
                        _ = ticker.tick() => {
                            poll_once(client.as_ref(), address, &watched).await;
                        }
                    }
                } else {
                    ticker.tick().await;
                    poll_once(client.as_ref(), address, &watched).await;
                }
            }
        })
    };
    (watched, handle)
}

async fn poll_once(
    client: &dyn EverChainClient,
    address: TonAddress,
    watched: &Watched<ContractState>,
) {
    let generation = watched.generation();
    match client.contract_state(address).await {
        Ok(state) => {
            if !watched.commit(generation, state) {
                debug!(%address, "Discarding poll result, subscription got there first");
            }
        }
        Err(error) => warn!(%address, %error, "Account state poll failed"),
    }
}
