//! First leg of an EVM to Everscale transfer: the vault deposit transaction
//! and its confirmation depth.

use strum_macros::Display;
use tracing::warn;

use evergate_common::{
    models::{event::EthEventVoteData, transfer::TransferType},
    traits::EventCodec,
};
use evergate_ethereum::{
    client::TxReceipt,
    event::{find_deposit_log, find_factory_deposit_log},
};

use crate::{errors::TransferError, pipeline::evm_everscale::EvmEverscalePipeline};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EvmDepositFacts<'a> {
    pub receipt: Option<&'a TxReceipt>,
    /// Confirmation depth of the deposit tx. `None` while unmined.
    pub confirmations: Option<u64>,
    pub required_confirmations: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum EvmDepositStatus {
    Initializing,
    /// Transaction known but not mined yet.
    Pending,
    WaitingForConfirmations { confirmations: u64, required: u64 },
    Confirmed,
    /// Wrong target contract or a deposit outside the configuration's
    /// block window. Terminal.
    Failed,
}

/// Derives the deposit leg status. The tx hash usually comes from the URL,
/// so the receipt target and block window are verified rather than trusted.
pub fn derive_evm_deposit_status(
    pipeline: &EvmEverscalePipeline,
    facts: &EvmDepositFacts<'_>,
) -> EvmDepositStatus {
    let Some(loaded) = pipeline.loaded() else {
        return EvmDepositStatus::Initializing;
    };
    if loaded.error.is_some() {
        return EvmDepositStatus::Initializing;
    }
    let Some(receipt) = facts.receipt else {
        return EvmDepositStatus::Pending;
    };
    if receipt.to != Some(loaded.vault_config.vault) {
        warn!(tx = %receipt.transaction_hash, "Deposit transaction did not target the vault");
        return EvmDepositStatus::Failed;
    }
    if !loaded.configuration.covers_block(receipt.block_number) {
        warn!(
            tx = %receipt.transaction_hash,
            block = receipt.block_number,
            start_block = loaded.configuration.start_block_number,
            "Deposit mined outside the configuration's block window"
        );
        return EvmDepositStatus::Failed;
    }
    match facts.confirmations {
        Some(confirmations) if confirmations >= facts.required_confirmations => {
            EvmDepositStatus::Confirmed
        }
        Some(confirmations) => EvmDepositStatus::WaitingForConfirmations {
            confirmations,
            required: facts.required_confirmations,
        },
        None => EvmDepositStatus::WaitingForConfirmations {
            confirmations: 0,
            required: facts.required_confirmations,
        },
    }
}

/// Extracts the event vote payload from a confirmed deposit receipt. For
/// credit deposits the `FactoryDeposit` log carries it; for plain deposits
/// the vault's own `Deposit` log does.
pub fn extract_vote_data(
    receipt: &TxReceipt,
    codec: &dyn EventCodec,
    vault: alloy_primitives::Address,
    transfer_type: TransferType,
) -> Result<EthEventVoteData, TransferError> {
    if receipt.to != Some(vault) {
        return Err(TransferError::WrongDepositTarget {
            expected: vault.to_string(),
            actual: receipt
                .to
                .map(|to| to.to_string())
                .unwrap_or_else(|| "contract creation".to_string()),
        });
    }
    let log = match transfer_type {
        TransferType::Credit => find_factory_deposit_log(receipt),
        TransferType::Default => find_deposit_log(receipt, vault),
    }
    .ok_or(TransferError::MissingDepositLog)?;

    let event_data = codec.evm_bytes_into_cell(&log.data)?;
    Ok(EthEventVoteData {
        event_transaction: receipt.transaction_hash,
        event_index: log.log_index as u32,
        event_data,
        event_block_number: receipt.block_number,
        event_block: receipt.block_hash,
    })
}
