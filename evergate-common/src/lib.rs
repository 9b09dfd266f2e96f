#[cfg(test)]
#[macro_use]
extern crate pretty_assertions;

pub mod amount;
pub mod constants;
pub mod models;
pub mod poll;
pub mod traits;

pub use models::{ChainId, NetworkId, TonAddress, EVERSCALE_NETWORK_ID};
