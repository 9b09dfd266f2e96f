//! Pipeline assembly: validated, fully-loaded views of both chains' bridge
//! contracts for one vault/asset pairing. A pipeline is a pure function of
//! an input snapshot, recomputed on every change and never cached.

pub mod evm_everscale;
pub mod everscale_evm;

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use num_bigint::BigUint;

use crate::errors::PipelineError;

/// Result of validating a user-entered amount against balances and limits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LimitCheck {
    pub result: bool,
    pub error: Option<String>,
}

impl LimitCheck {
    fn ok() -> Self {
        Self { result: true, error: None }
    }

    fn fail(message: impl Into<String>) -> Self {
        Self { result: false, error: Some(message.into()) }
    }
}

/// Whether the vault may already pull the entered amount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowanceCheck {
    Sufficient,
    ApprovalRequired { missing: BigUint },
}

/// Guard against duplicate transaction submission from rapid re-invocation.
/// Holding the token marks the action in flight; dropping it re-arms.
#[derive(Debug, Default, Clone)]
pub struct SubmissionLock {
    in_flight: Arc<AtomicBool>,
}

pub struct SubmissionToken {
    in_flight: Arc<AtomicBool>,
}

impl SubmissionLock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub fn try_acquire(&self) -> Result<SubmissionToken, PipelineError> {
        if self.in_flight.swap(true, Ordering::AcqRel) {
            return Err(PipelineError::ActionInProgress);
        }
        Ok(SubmissionToken { in_flight: self.in_flight.clone() })
    }
}

impl Drop for SubmissionToken {
    fn drop(&mut self) {
        self.in_flight.store(false, Ordering::Release);
    }
}
