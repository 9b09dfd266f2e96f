use alloy_primitives::{Address, B256};
use num_bigint::BigUint;
use strum_macros::{Display, EnumIter};

use crate::models::{ChainId, TonAddress};

/// Vote data of an EVM-side deposit event, extracted from the transaction
/// receipt of a vault deposit. The derivation key for the Everscale event
/// contract (or credit processor) address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EthEventVoteData {
    pub event_transaction: B256,
    pub event_index: u32,
    /// Packed TVM cell carrying the transfer payload.
    pub event_data: Vec<u8>,
    pub event_block_number: u64,
    pub event_block: B256,
}

/// Vote data of an Everscale-side event, as submitted to `deployEvent` on an
/// event configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TonEventVoteData {
    pub event_transaction_lt: u64,
    pub event_timestamp: u32,
    /// Packed TVM cell carrying the transfer payload.
    pub event_data: Vec<u8>,
}

/// Transfer payload carried inside an Everscale event cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TonTransferPayload {
    pub sender: TonAddress,
    pub tokens: BigUint,
    pub recipient: Address,
    pub chain_id: ChainId,
}

/// Fully decoded state of a confirmed Everscale event contract, everything
/// the EVM release leg needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EverscaleEventData {
    pub event_transaction_lt: u64,
    pub event_timestamp: u32,
    pub event_data: Vec<u8>,
    pub decoded: TonTransferPayload,
    pub configuration: TonAddress,
    pub event_contract: TonAddress,
    pub round: u32,
}

/// Relay voting status of an event contract. Shared by the Everscale- and
/// EVM-originated event contract flavours, the wire encoding is the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum EventContractStatus {
    Initializing,
    Pending,
    Confirmed,
    Rejected,
}

impl EventContractStatus {
    pub fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(Self::Initializing),
            1 => Some(Self::Pending),
            2 => Some(Self::Confirmed),
            3 => Some(Self::Rejected),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Confirmed | Self::Rejected)
    }
}

/// Raw on-chain state machine of a credit processor contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum CreditProcessorStatus {
    Created,
    EventNotDeployed,
    EventDeployInProgress,
    EventConfirmed,
    EventRejected,
    CheckingAmount,
    CalculateSwap,
    SwapInProgress,
    SwapFailed,
    SwapUnknown,
    UnwrapInProgress,
    UnwrapFailed,
    ProcessRequiresGas,
    Processed,
    Cancelled,
}

/// Coarse bucket a credit processor status collapses into for the transfer
/// state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum CreditCoarseStatus {
    InProgress,
    Failed,
    Finished,
}

impl CreditProcessorStatus {
    pub fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(Self::Created),
            1 => Some(Self::EventNotDeployed),
            2 => Some(Self::EventDeployInProgress),
            3 => Some(Self::EventConfirmed),
            4 => Some(Self::EventRejected),
            5 => Some(Self::CheckingAmount),
            6 => Some(Self::CalculateSwap),
            7 => Some(Self::SwapInProgress),
            8 => Some(Self::SwapFailed),
            9 => Some(Self::SwapUnknown),
            10 => Some(Self::UnwrapInProgress),
            11 => Some(Self::UnwrapFailed),
            12 => Some(Self::ProcessRequiresGas),
            13 => Some(Self::Processed),
            14 => Some(Self::Cancelled),
            _ => None,
        }
    }

    pub fn coarse(&self) -> CreditCoarseStatus {
        match self {
            Self::Created
            | Self::EventNotDeployed
            | Self::EventDeployInProgress
            | Self::EventConfirmed
            | Self::CheckingAmount
            | Self::CalculateSwap
            | Self::SwapInProgress
            | Self::UnwrapInProgress => CreditCoarseStatus::InProgress,
            Self::EventRejected
            | Self::SwapFailed
            | Self::SwapUnknown
            | Self::UnwrapFailed
            | Self::ProcessRequiresGas
            | Self::Cancelled => CreditCoarseStatus::Failed,
            Self::Processed => CreditCoarseStatus::Finished,
        }
    }

    /// Polling stops once the processor can no longer make progress on its
    /// own.
    pub fn is_terminal(&self) -> bool {
        !matches!(self.coarse(), CreditCoarseStatus::InProgress)
    }
}
