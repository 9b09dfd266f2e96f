use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::models::{ChainId, NetworkId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, Display)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum NetworkType {
    Evm,
    Everscale,
}

/// Static descriptor of one chain the bridge can talk to. Loaded from the
/// fixed table below, keyed by [`NetworkShape::id`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkShape {
    pub id: NetworkId,
    pub chain_id: ChainId,
    pub network_type: NetworkType,
    pub name: String,
    pub label: String,
    pub currency_symbol: String,
    pub explorer_base_url: String,
    pub rpc_url: String,
    /// EIP-2718 transaction type hint passed through to wallet submissions.
    pub transaction_type: Option<String>,
}

/// Available networks.
pub fn networks() -> Vec<NetworkShape> {
    vec![
        NetworkShape {
            id: "evm-1".to_string(),
            chain_id: 1,
            network_type: NetworkType::Evm,
            name: "Ethereum Mainnet".to_string(),
            label: "Ethereum".to_string(),
            currency_symbol: "ETH".to_string(),
            explorer_base_url: "https://etherscan.io/".to_string(),
            rpc_url: "https://mainnet.infura.io/v3/9aa3d95b3bc440fa88ea12eaa4456161".to_string(),
            transaction_type: Some("0x2".to_string()),
        },
        NetworkShape {
            id: "evm-56".to_string(),
            chain_id: 56,
            network_type: NetworkType::Evm,
            name: "BNB Chain".to_string(),
            label: "BNB Chain (Binance Smart Chain)".to_string(),
            currency_symbol: "BNB".to_string(),
            explorer_base_url: "https://bscscan.com/".to_string(),
            rpc_url: "https://bsc-dataseed.binance.org/".to_string(),
            transaction_type: Some("0x0".to_string()),
        },
        NetworkShape {
            id: "evm-250".to_string(),
            chain_id: 250,
            network_type: NetworkType::Evm,
            name: "Fantom Opera".to_string(),
            label: "Fantom Opera".to_string(),
            currency_symbol: "FTM".to_string(),
            explorer_base_url: "https://ftmscan.com/".to_string(),
            rpc_url: "https://rpc.ftm.tools/".to_string(),
            transaction_type: Some("0x0".to_string()),
        },
        NetworkShape {
            id: "evm-137".to_string(),
            chain_id: 137,
            network_type: NetworkType::Evm,
            name: "Polygon".to_string(),
            label: "Polygon".to_string(),
            currency_symbol: "MATIC".to_string(),
            explorer_base_url: "https://polygonscan.com/".to_string(),
            rpc_url: "https://matic-mainnet.chainstacklabs.com/".to_string(),
            transaction_type: Some("0x0".to_string()),
        },
        NetworkShape {
            id: "everscale-1".to_string(),
            chain_id: 1,
            network_type: NetworkType::Everscale,
            name: "Everscale".to_string(),
            label: "Everscale".to_string(),
            currency_symbol: "EVER".to_string(),
            explorer_base_url: "https://everscan.io/".to_string(),
            rpc_url: String::new(),
            transaction_type: None,
        },
    ]
}

pub fn network_by_id(id: &str) -> Option<NetworkShape> {
    networks().into_iter().find(|n| n.id == id)
}
