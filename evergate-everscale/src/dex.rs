//! Debounced DEX quotes for the credit deposit form.

use std::{sync::Arc, time::Duration};

use num_bigint::BigUint;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use evergate_common::{constants::DEX_QUOTE_DEBOUNCE, models::TonAddress, poll::Watched};

use crate::client::EverChainClient;

/// Quotes how many tokens must be spent on a DEX pair to receive a desired
/// amount. Requests are debounced: while the user keeps typing, earlier
/// pending requests are superseded and never hit the RPC.
pub struct DexQuoter {
    client: Arc<dyn EverChainClient>,
    pair: TonAddress,
    receive_token_root: TonAddress,
    debounce: Duration,
    quote: Watched<BigUint>,
}

impl DexQuoter {
    pub fn new(
        client: Arc<dyn EverChainClient>,
        pair: TonAddress,
        receive_token_root: TonAddress,
    ) -> Self {
        Self::with_debounce(client, pair, receive_token_root, DEX_QUOTE_DEBOUNCE)
    }

    pub fn with_debounce(
        client: Arc<dyn EverChainClient>,
        pair: TonAddress,
        receive_token_root: TonAddress,
        debounce: Duration,
    ) -> Self {
        Self { client, pair, receive_token_root, debounce, quote: Watched::new() }
    }

    /// Latest quote, `None` while no request has settled.
    pub fn quote(&self) -> Option<BigUint> {
        self.quote.get()
    }

    /// Schedules a quote for `receive_amount`. Clears the previous quote
    /// immediately; a newer request supersedes this one.
    pub fn request(&self, receive_amount: BigUint) -> JoinHandle<()> {
        self.quote.reset();
        let generation = self.quote.generation();
        let client = self.client.clone();
        let pair = self.pair;
        let receive_token_root = self.receive_token_root;
        let debounce = self.debounce;
        let quote = self.quote.clone();
        tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            if quote.generation() != generation {
                debug!("Quote request superseded before it fired");
                return;
            }
            match client
                .dex_expected_spend_amount(pair, receive_amount, receive_token_root)
                .await
            {
                Ok(amount) => {
                    if !quote.commit(generation, amount) {
                        debug!("Discarding quote, a newer request took over");
                    }
                }
                Err(error) => warn!(%error, "DEX quote failed"),
            }
        })
    }
}
