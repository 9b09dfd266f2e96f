//! Event contract state, decoded to the level the transfer state machines
//! consume.

use std::{sync::Arc, time::Duration};

use tokio::task::JoinHandle;

use evergate_common::{
    models::{
        event::{EventContractStatus, EverscaleEventData},
        TonAddress,
    },
    poll::{start_polling, Watched},
    traits::EventCodec,
};

use crate::{client::EverChainClient, errors::EverClientError};

/// Voting progress and, once confirmed, the full release payload of an
/// event contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventState {
    Initializing {
        confirms: u32,
        rejects: u32,
        required_votes: u32,
    },
    Pending {
        confirms: u32,
        rejects: u32,
        required_votes: u32,
    },
    Confirmed {
        data: EverscaleEventData,
        signatures: Vec<Vec<u8>>,
    },
    Rejected,
}

impl EventState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Confirmed { .. } | Self::Rejected)
    }
}

pub async fn fetch_event_state(
    client: &dyn EverChainClient,
    codec: &dyn EventCodec,
    event_contract: TonAddress,
) -> Result<EventState, EverClientError> {
    let details = client.event_details(event_contract).await?;
    let state = match details.status {
        EventContractStatus::Initializing => EventState::Initializing {
            confirms: details.confirms,
            rejects: details.rejects,
            required_votes: details.required_votes,
        },
        EventContractStatus::Pending => EventState::Pending {
            confirms: details.confirms,
            rejects: details.rejects,
            required_votes: details.required_votes,
        },
        EventContractStatus::Rejected => EventState::Rejected,
        EventContractStatus::Confirmed => {
            let decoded = codec.unpack_transfer_payload(&details.vote_data.event_data)?;
            EventState::Confirmed {
                data: EverscaleEventData {
                    event_transaction_lt: details.vote_data.event_transaction_lt,
                    event_timestamp: details.vote_data.event_timestamp,
                    event_data: details.vote_data.event_data,
                    decoded,
                    configuration: details.configuration,
                    event_contract,
                    round: details.round,
                },
                signatures: details.signatures,
            }
        }
    };
    Ok(state)
}

/// Polls the event contract until the relays settle it.
pub fn watch_event_state(
    client: Arc<dyn EverChainClient>,
    codec: Arc<dyn EventCodec>,
    event_contract: TonAddress,
    interval: Duration,
) -> (Watched<EventState>, JoinHandle<()>) {
    let watched = Watched::new();
    let handle = start_polling(watched.clone(), interval, EventState::is_terminal, move || {
        let client = client.clone();
        let codec = codec.clone();
        async move { fetch_event_state(client.as_ref(), codec.as_ref(), event_contract).await }
    });
    (watched, handle)
}
