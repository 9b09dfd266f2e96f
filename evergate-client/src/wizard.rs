//! Three-step bridge wizard: select the route, prepare the transfer, then
//! track it. Navigation is explicit state transitions, never history.

use alloy_primitives::Address;
use tracing::debug;

use evergate_common::models::{
    error::ModelError,
    network::{network_by_id, NetworkShape, NetworkType},
    transfer::{
        parse_transfer_url, BridgeStep, TransferRoute, TransferStepData, TransferType,
    },
    EVERSCALE_NETWORK_ID,
};

#[derive(Debug, Clone)]
pub struct BridgeWizard {
    data: TransferStepData,
}

impl Default for BridgeWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl BridgeWizard {
    pub fn new() -> Self {
        Self { data: TransferStepData::Select }
    }

    /// Rebuilds a wizard already sitting on the transfer step from a shared
    /// or bookmarked URL.
    pub fn restore_from_url(path: &str) -> Result<Self, ModelError> {
        let data = parse_transfer_url(path)?;
        debug!(%path, "Restored transfer step from url");
        Ok(Self { data })
    }

    pub fn step(&self) -> BridgeStep {
        self.data.step()
    }

    pub fn data(&self) -> &TransferStepData {
        &self.data
    }

    /// Locks in the route. Only EVM to Everscale and Everscale to EVM are
    /// bridgeable; the credit flavor only exists towards Everscale.
    pub fn select(
        &mut self,
        source_network_id: &str,
        destination_network_id: &str,
        vault: Address,
        transfer_type: TransferType,
    ) -> Result<(), ModelError> {
        let source = self.known_network(source_network_id)?;
        let destination = self.known_network(destination_network_id)?;

        let route = match (source.network_type, destination.network_type) {
            (NetworkType::Evm, NetworkType::Everscale) => TransferRoute::EvmEverscale,
            (NetworkType::Everscale, NetworkType::Evm) => TransferRoute::EverscaleEvm,
            _ => return Err(ModelError::UnsupportedRoute(source.id, destination.id)),
        };
        if route == TransferRoute::EverscaleEvm && transfer_type == TransferType::Credit {
            return Err(ModelError::UnsupportedRoute(source.id, destination.id));
        }

        self.data = TransferStepData::Prepare {
            route,
            transfer_type,
            source_network_id: source.id,
            destination_network_id: destination.id,
            vault,
        };
        Ok(())
    }

    /// Moves from preparation to the transfer-tracking step. Call once the
    /// first on-chain action of the route has been signed.
    pub fn proceed(&mut self, data: TransferStepData) -> Result<(), ModelError> {
        let expected_route = match &self.data {
            TransferStepData::Prepare { route, .. } => *route,
            _ => {
                return Err(ModelError::InvalidStepTransition(
                    "not on the prepare step".to_string(),
                ))
            }
        };
        if data.step() != BridgeStep::Transfer || data.route() != Some(expected_route) {
            return Err(ModelError::InvalidStepTransition(
                "transfer data does not match the selected route".to_string(),
            ));
        }
        self.data = data;
        Ok(())
    }

    /// Steps back one screen. Backing out of a running transfer returns to
    /// preparation with the route intact.
    pub fn back(&mut self) {
        self.data = match &self.data {
            TransferStepData::Select | TransferStepData::Prepare { .. } => TransferStepData::Select,
            TransferStepData::EvmEverscaleTransfer {
                transfer_type, source_network_id, vault, ..
            } => TransferStepData::Prepare {
                route: TransferRoute::EvmEverscale,
                transfer_type: *transfer_type,
                source_network_id: source_network_id.clone(),
                destination_network_id: EVERSCALE_NETWORK_ID.to_string(),
                vault: *vault,
            },
            TransferStepData::EverscaleEvmTransfer { destination_network_id, vault, .. } => {
                TransferStepData::Prepare {
                    route: TransferRoute::EverscaleEvm,
                    transfer_type: TransferType::Default,
                    source_network_id: EVERSCALE_NETWORK_ID.to_string(),
                    destination_network_id: destination_network_id.clone(),
                    vault: *vault,
                }
            }
        };
    }

    fn known_network(&self, id: &str) -> Result<NetworkShape, ModelError> {
        network_by_id(id).ok_or_else(|| ModelError::UnknownNetwork(id.to_string()))
    }
}
