#[cfg(test)]
#[macro_use]
extern crate pretty_assertions;

pub mod account;
pub mod client;
pub mod configuration;
pub mod credit;
pub mod dex;
pub mod errors;
pub mod event;

pub use client::EverChainClient;
pub use errors::EverClientError;
