//! Protocol constants shared by both bridge legs.

use std::time::Duration;

/// EVERs a freshly deployed credit processor is funded with, in nanotokens.
pub const CREDIT_BODY: u64 = 5_800_000_000;

/// Default share of a credit deposit swapped into EVERs, numerator over
/// [`DEFAULT_SWAP_DENOMINATOR`].
pub const DEFAULT_SWAP_NUMERATOR: u64 = 1;

/// Upper bound the swap numerator is clamped to.
pub const MAXIMUM_SWAP_NUMERATOR: u64 = 10;

pub const DEFAULT_SWAP_DENOMINATOR: u64 = 100;

/// Precision of native EVER and of the WEVER wrapper token.
pub const WEVER_DECIMALS: u32 = 9;

/// Base64 encoding of the empty TVM cell, the default level-3 payload of a
/// factory deposit.
pub const EMPTY_CELL: &str = "te6ccgEBAQEAAgAAAA==";

/// EVERs attached to a burn on top of the configuration's
/// `eventInitialBalance`, in nanotokens. Covers the proxy's own fees.
pub const BURN_ATTACHED_SURCHARGE: u64 = 1_000_000_000;

/// Cadence for re-reading contract state.
pub const CONTRACT_POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Cadence for re-scanning transaction histories.
pub const TRANSACTION_POLL_INTERVAL: Duration = Duration::from_secs(20);

/// Quiet window before a DEX quote request is actually sent.
pub const DEX_QUOTE_DEBOUNCE: Duration = Duration::from_secs(3);
