use std::{sync::Arc, time::Duration};

use alloy_primitives::Address;
use num_bigint::BigUint;
use tokio::task::JoinHandle;
use tracing::debug;

use evergate_common::poll::{start_polling, Watched};

use crate::{client::EvmChainClient, errors::EvmClientError};

/// Snapshot of the vault fields the transfer pipelines depend on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultState {
    pub token: Address,
    pub available_deposit_limit: BigUint,
    pub emergency_shutdown: bool,
    pub deposit_fee: BigUint,
    pub withdraw_fee: BigUint,
}

pub async fn fetch_vault_state(
    client: &dyn EvmChainClient,
    vault: Address,
) -> Result<VaultState, EvmClientError> {
    let state = VaultState {
        token: client.vault_token(vault).await?,
        available_deposit_limit: client.vault_available_deposit_limit(vault).await?,
        emergency_shutdown: client.vault_emergency_shutdown(vault).await?,
        deposit_fee: client.vault_deposit_fee(vault).await?,
        withdraw_fee: client.vault_withdraw_fee(vault).await?,
    };
    debug!(%vault, emergency_shutdown = state.emergency_shutdown, "Fetched vault state");
    Ok(state)
}

/// Keeps a vault snapshot fresh in the background. Aborting the returned
/// handle stops the watcher.
pub fn watch_vault_state(
    client: Arc<dyn EvmChainClient>,
    vault: Address,
    interval: Duration,
) -> (Watched<VaultState>, JoinHandle<()>) {
    let watched = Watched::new();
    let handle = start_polling(watched.clone(), interval, |_| false, move || {
        let client = client.clone();
        async move { fetch_vault_state(client.as_ref(), vault).await }
    });
    (watched, handle)
}

#[cfg(test)]
mod tests {
    use crate::client::MockEvmChainClient;

    use super::*;

    #[test_log::test(tokio::test(start_paused = true))]
    async fn test_watcher_populates_and_refreshes() {
        let vault: Address = "0x81598d5362eAC63310e5719315497C5b8980C579".parse().unwrap();
        let mut client = MockEvmChainClient::new();
        client.expect_vault_token().returning(|_| Ok(Address::repeat_byte(1)));
        client
            .expect_vault_available_deposit_limit()
            .returning(|_| Ok(BigUint::from(500u32)));
        client.expect_vault_emergency_shutdown().returning(|_| Ok(false));
        client.expect_vault_deposit_fee().returning(|_| Ok(BigUint::from(0u32)));
        client.expect_vault_withdraw_fee().returning(|_| Ok(BigUint::from(0u32)));

        let (watched, handle) =
            watch_vault_state(Arc::new(client), vault, Duration::from_secs(10));
        tokio::time::sleep(Duration::from_millis(1)).await;

        let state = watched.get().unwrap();
        assert_eq!(state.token, Address::repeat_byte(1));
        assert_eq!(state.available_deposit_limit, BigUint::from(500u32));
        assert!(!state.emergency_shutdown);

        handle.abort();
    }
}
