use alloy_primitives::{Address, B256};
use num_bigint::BigUint;
use strum_macros::{Display, EnumString};

use crate::models::{
    error::ModelError,
    network::{network_by_id, NetworkType},
    NetworkId, TonAddress, EVERSCALE_NETWORK_ID,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum TransferType {
    Default,
    Credit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferRoute {
    EvmEverscale,
    EverscaleEvm,
}

/// The three-step wizard the bridge walks through. Driven by explicit state,
/// not navigation history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeStep {
    Select,
    Prepare,
    Transfer,
}

/// Everything the bridge needs to remember about an in-flight transfer.
///
/// Invariant for the transfer variants: either the user-entered facts
/// (amount + destination) or an on-chain identifier (deposit tx hash /
/// event address) is present, so a shared URL alone reconstructs the step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferStepData {
    Select,
    Prepare {
        route: TransferRoute,
        transfer_type: TransferType,
        source_network_id: NetworkId,
        destination_network_id: NetworkId,
        vault: Address,
    },
    EvmEverscaleTransfer {
        transfer_type: TransferType,
        source_network_id: NetworkId,
        vault: Address,
        /// ERC-20 base units.
        amount: Option<BigUint>,
        /// Credit mode only: minimum EVERs the recipient must end up with.
        min_evers_amount: Option<BigUint>,
        /// Credit mode only: minimum tokens after the swap, TIP-3 base units.
        min_tokens_amount: Option<BigUint>,
        destination: Option<TonAddress>,
        deposit_tx_hash: Option<B256>,
    },
    EverscaleEvmTransfer {
        destination_network_id: NetworkId,
        vault: Address,
        /// TIP-3 base units.
        amount: Option<BigUint>,
        destination: Option<Address>,
        event_address: Option<TonAddress>,
        release_tx_hash: Option<B256>,
    },
}

impl TransferStepData {
    pub fn step(&self) -> BridgeStep {
        match self {
            Self::Select => BridgeStep::Select,
            Self::Prepare { .. } => BridgeStep::Prepare,
            Self::EvmEverscaleTransfer { .. } | Self::EverscaleEvmTransfer { .. } => {
                BridgeStep::Transfer
            }
        }
    }

    pub fn route(&self) -> Option<TransferRoute> {
        match self {
            Self::Select => None,
            Self::Prepare { route, .. } => Some(*route),
            Self::EvmEverscaleTransfer { .. } => Some(TransferRoute::EvmEverscale),
            Self::EverscaleEvmTransfer { .. } => Some(TransferRoute::EverscaleEvm),
        }
    }

    /// True when the step can be reconstructed after a page refresh: either
    /// the user input or an on-chain identifier survives.
    pub fn is_resumable(&self) -> bool {
        match self {
            Self::Select | Self::Prepare { .. } => true,
            Self::EvmEverscaleTransfer { amount, destination, deposit_tx_hash, .. } => {
                deposit_tx_hash.is_some() || (amount.is_some() && destination.is_some())
            }
            Self::EverscaleEvmTransfer { amount, destination, event_address, .. } => {
                event_address.is_some() || (amount.is_some() && destination.is_some())
            }
        }
    }

    /// Renders the navigable transfer URL, once an on-chain identifier
    /// exists. Steps identified only by volatile user input have no URL.
    pub fn transfer_url(&self) -> Option<String> {
        match self {
            Self::EvmEverscaleTransfer {
                transfer_type, source_network_id, vault, deposit_tx_hash: Some(hash), ..
            } => Some(format!(
                "/transfer/{source_network_id}/{EVERSCALE_NETWORK_ID}/{vault}/{hash}/{transfer_type}"
            )),
            Self::EverscaleEvmTransfer {
                destination_network_id,
                vault,
                event_address: Some(event),
                release_tx_hash,
                ..
            } => {
                let mut url = format!(
                    "/transfer/{EVERSCALE_NETWORK_ID}/{destination_network_id}/{vault}/{event}"
                );
                if let Some(hash) = release_tx_hash {
                    url.push_str(&format!("/{hash}"));
                }
                Some(url)
            }
            _ => None,
        }
    }
}

/// Parses a `/transfer/...` URL path back into a transfer step.
///
/// The fourth segment is ambiguous by design: for an EVM source it is a
/// deposit transaction hash (and the fifth segment the transfer type), for
/// an Everscale source it is an event contract address (and the fifth
/// segment an optional release transaction hash).
pub fn parse_transfer_url(path: &str) -> Result<TransferStepData, ModelError> {
    let segments = path
        .trim_start_matches('/')
        .trim_end_matches('/')
        .split('/')
        .collect::<Vec<_>>();

    let (from_id, to_id, vault_raw, fourth, fifth) = match segments.as_slice() {
        ["transfer", from, to, vault, fourth] => (*from, *to, *vault, *fourth, None),
        ["transfer", from, to, vault, fourth, fifth] => {
            (*from, *to, *vault, *fourth, Some(*fifth))
        }
        _ => return Err(ModelError::MalformedUrl(path.to_string())),
    };

    let source = network_by_id(from_id).ok_or_else(|| ModelError::UnknownNetwork(from_id.to_string()))?;
    let destination =
        network_by_id(to_id).ok_or_else(|| ModelError::UnknownNetwork(to_id.to_string()))?;
    let vault = vault_raw
        .parse::<Address>()
        .map_err(|_| ModelError::InvalidEvmAddress(vault_raw.to_string()))?;

    if source.network_type == NetworkType::Evm && destination.id == EVERSCALE_NETWORK_ID {
        let deposit_tx_hash = fourth
            .parse::<B256>()
            .map_err(|_| ModelError::InvalidTxHash(fourth.to_string()))?;
        let transfer_type = fifth
            .ok_or_else(|| ModelError::MalformedUrl(path.to_string()))?
            .parse::<TransferType>()
            .map_err(|_| ModelError::MalformedUrl(path.to_string()))?;
        Ok(TransferStepData::EvmEverscaleTransfer {
            transfer_type,
            source_network_id: source.id,
            vault,
            amount: None,
            min_evers_amount: None,
            min_tokens_amount: None,
            destination: None,
            deposit_tx_hash: Some(deposit_tx_hash),
        })
    } else if source.id == EVERSCALE_NETWORK_ID && destination.network_type == NetworkType::Evm {
        let event_address = fourth.parse::<TonAddress>()?;
        let release_tx_hash = fifth
            .map(|raw| {
                raw.parse::<B256>()
                    .map_err(|_| ModelError::InvalidTxHash(raw.to_string()))
            })
            .transpose()?;
        Ok(TransferStepData::EverscaleEvmTransfer {
            destination_network_id: destination.id,
            vault,
            amount: None,
            destination: None,
            event_address: Some(event_address),
            release_tx_hash,
        })
    } else {
        Err(ModelError::UnsupportedRoute(source.id, destination.id))
    }
}
