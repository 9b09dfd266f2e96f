pub mod asset;
pub mod contract;
pub mod error;
pub mod event;
pub mod network;
pub mod transfer;
pub mod wallet;

use std::{fmt, str::FromStr};

use alloy_primitives::U256;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::models::error::ModelError;

/// Numeric chain id as reported by an EVM wallet (1 for mainnet, 56 for BSC,
/// ...). Everscale reuses the value from its own network table.
pub type ChainId = u64;

/// Stable network identifier used in transfer URLs, e.g. `evm-56` or
/// `everscale-1`.
pub type NetworkId = String;

/// The only Everscale network this bridge talks to.
pub const EVERSCALE_NETWORK_ID: &str = "everscale-1";

/// Everscale account address in its canonical `workchain:hex64` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TonAddress {
    pub workchain: i8,
    pub address: U256,
}

impl TonAddress {
    pub fn new(workchain: i8, address: U256) -> Self {
        Self { workchain, address }
    }
}

impl fmt::Display for TonAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:064x}", self.workchain, self.address)
    }
}

impl FromStr for TonAddress {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (workchain, address) = s
            .split_once(':')
            .ok_or_else(|| ModelError::InvalidTonAddress(s.to_string()))?;
        let workchain = workchain
            .parse::<i8>()
            .map_err(|_| ModelError::InvalidTonAddress(s.to_string()))?;
        if address.len() != 64 {
            return Err(ModelError::InvalidTonAddress(s.to_string()));
        }
        let address = U256::from_str_radix(address, 16)
            .map_err(|_| ModelError::InvalidTonAddress(s.to_string()))?;
        Ok(Self { workchain, address })
    }
}

impl Serialize for TonAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for TonAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
