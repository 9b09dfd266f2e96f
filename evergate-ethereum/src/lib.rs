#[cfg(test)]
#[macro_use]
extern crate pretty_assertions;

pub mod client;
pub mod erc20;
pub mod errors;
pub mod event;
pub mod receipt;
pub mod vault;

pub use client::{DepositRequest, EvmChainClient, EvmLog, FactoryDepositRequest, TxReceipt};
pub use errors::EvmClientError;
