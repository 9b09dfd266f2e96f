#[cfg(test)]
#[macro_use]
extern crate pretty_assertions;

pub mod cli;
pub mod errors;
pub mod pipeline;
pub mod transfer;
pub mod wizard;

pub use errors::{PipelineError, TransferError};
