//! Credit processor tracking for credit-flavoured deposits.

use std::{sync::Arc, time::Duration};

use tokio::task::JoinHandle;

use evergate_common::{
    constants::{DEFAULT_SWAP_NUMERATOR, MAXIMUM_SWAP_NUMERATOR},
    models::TonAddress,
    poll::{start_polling, Watched},
};

use crate::client::{CreditProcessorDetails, EverChainClient};

/// Keeps a user-requested swap share inside the factory's accepted range.
pub fn clamp_swap_numerator(requested: u64) -> u64 {
    requested.clamp(DEFAULT_SWAP_NUMERATOR, MAXIMUM_SWAP_NUMERATOR)
}

/// Polls the credit processor until it reaches a terminal status.
pub fn watch_credit_processor(
    client: Arc<dyn EverChainClient>,
    processor: TonAddress,
    interval: Duration,
) -> (Watched<CreditProcessorDetails>, JoinHandle<()>) {
    let watched = Watched::new();
    let handle = start_polling(
        watched.clone(),
        interval,
        |details: &CreditProcessorDetails| details.status.is_terminal(),
        move || {
            let client = client.clone();
            async move { client.credit_processor_details(processor).await }
        },
    );
    (watched, handle)
}
