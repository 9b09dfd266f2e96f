//! Receipt tracking for transactions submitted through the wallet.

use std::sync::Arc;

use alloy_primitives::B256;
use tokio::task::JoinHandle;

use evergate_common::{
    constants::TRANSACTION_POLL_INTERVAL,
    poll::{start_polling, Watched},
};

use crate::{
    client::{EvmChainClient, TxReceipt},
    errors::EvmClientError,
};

/// Mining progress of one transaction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReceiptState {
    pub receipt: Option<TxReceipt>,
    /// Confirmation depth, `None` while unmined.
    pub confirmations: Option<u64>,
}

impl ReceiptState {
    pub fn is_confirmed(&self, required: u64) -> bool {
        self.receipt.is_some() && self.confirmations.is_some_and(|depth| depth >= required)
    }
}

pub async fn fetch_receipt_state(
    client: &dyn EvmChainClient,
    tx_hash: B256,
) -> Result<ReceiptState, EvmClientError> {
    let receipt = client.transaction_receipt(tx_hash).await?;
    let confirmations = match receipt {
        Some(_) => client.transaction_confirmations(tx_hash).await?,
        None => None,
    };
    Ok(ReceiptState { receipt, confirmations })
}

/// Polls a transaction at the standard cadence until it gathers
/// `required_confirmations` blocks on top.
pub fn watch_receipt(
    client: Arc<dyn EvmChainClient>,
    tx_hash: B256,
    required_confirmations: u64,
) -> (Watched<ReceiptState>, JoinHandle<()>) {
    let watched = Watched::new();
    let handle = start_polling(
        watched.clone(),
        TRANSACTION_POLL_INTERVAL,
        move |state: &ReceiptState| state.is_confirmed(required_confirmations),
        move || {
            let client = client.clone();
            async move { fetch_receipt_state(client.as_ref(), tx_hash).await }
        },
    );
    (watched, handle)
}
