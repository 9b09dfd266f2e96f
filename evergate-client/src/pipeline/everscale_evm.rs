//! Everscale to EVM pipeline: burn side on Everscale, release side on the
//! EVM chain.

use std::sync::Arc;

use alloy_primitives::{Address, B256};
use num_bigint::BigUint;

use evergate_common::{
    amount::parse_decimal_amount,
    models::{
        asset::VaultConfig,
        event::EverscaleEventData,
        network::{NetworkShape, NetworkType},
        wallet::{
            EverWalletConnectionStatus, EverWalletSnapshot, EvmWalletConnectionStatus,
            EvmWalletSnapshot,
        },
        TonAddress,
    },
    traits::EventCodec,
};
use evergate_ethereum::{
    client::EvmChainClient,
    erc20::Erc20State,
    event::{encode_ton_event, sort_signatures_by_signer, withdraw_id},
    vault::VaultState,
};
use evergate_everscale::{
    client::{EverscaleConfigDetails, ProxyDetails, TokenRootDetails},
    configuration::{burn_and_wait_for_event, WithdrawRequest},
    EverChainClient,
};

use crate::{
    errors::PipelineError,
    pipeline::{LimitCheck, SubmissionLock},
};

/// Snapshot of every adapter the Everscale to EVM direction depends on.
#[derive(Debug, Clone)]
pub struct EverscaleEvmInputs {
    pub vault_config: VaultConfig,
    pub destination: NetworkShape,
    pub evm_wallet: EvmWalletSnapshot,
    pub ever_wallet: EverWalletSnapshot,
    pub vault: Option<VaultState>,
    pub evm_token: Option<Erc20State>,
    pub token_root: Option<TokenRootDetails>,
    pub token_wallet_balance: Option<BigUint>,
    pub proxy: Option<ProxyDetails>,
    pub configuration: Option<EverscaleConfigDetails>,
    /// Current unix time, for configuration expiry.
    pub now: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EverscaleEvmPipeline {
    NotLoaded {
        evm_account: Option<Address>,
        ever_account: Option<TonAddress>,
    },
    Loaded(Box<EverscaleEvmLoaded>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EverscaleEvmLoaded {
    pub vault_config: VaultConfig,
    pub evm_account: Address,
    pub ever_account: TonAddress,
    pub tip3_symbol: String,
    pub tip3_decimals: u32,
    pub tip3_balance: BigUint,
    pub evm_decimals: u32,
    pub configuration: EverscaleConfigDetails,
    pub error: Option<String>,
}

impl EverscaleEvmPipeline {
    pub fn loaded(&self) -> Option<&EverscaleEvmLoaded> {
        match self {
            Self::NotLoaded { .. } => None,
            Self::Loaded(loaded) => Some(loaded),
        }
    }

    pub fn is_actionable(&self) -> bool {
        self.loaded().is_some_and(|loaded| loaded.error.is_none())
    }
}

pub fn assemble(inputs: &EverscaleEvmInputs) -> EverscaleEvmPipeline {
    let not_loaded = EverscaleEvmPipeline::NotLoaded {
        evm_account: inputs.evm_wallet.account,
        ever_account: inputs.ever_wallet.account,
    };

    if inputs.destination.network_type != NetworkType::Evm
        || inputs.destination.chain_id != inputs.vault_config.chain_id
    {
        return not_loaded;
    }
    if inputs.evm_wallet.status_for_chain(inputs.vault_config.chain_id)
        != EvmWalletConnectionStatus::Ok
        || inputs.ever_wallet.status() != EverWalletConnectionStatus::Ok
    {
        return not_loaded;
    }
    let (
        Some(vault),
        Some(evm_token),
        Some(token_root),
        Some(token_wallet_balance),
        Some(proxy),
        Some(configuration),
        Some(now),
    ) = (
        inputs.vault.as_ref(),
        inputs.evm_token.as_ref(),
        inputs.token_root.as_ref(),
        inputs.token_wallet_balance.as_ref(),
        inputs.proxy.as_ref(),
        inputs.configuration.as_ref(),
        inputs.now,
    )
    else {
        return not_loaded;
    };
    let (Some(evm_account), Some(ever_account)) =
        (inputs.evm_wallet.account, inputs.ever_wallet.account)
    else {
        return not_loaded;
    };

    let error = first_validation_error(&inputs.vault_config, vault, proxy, configuration, now);

    EverscaleEvmPipeline::Loaded(Box::new(EverscaleEvmLoaded {
        vault_config: inputs.vault_config.clone(),
        evm_account,
        ever_account,
        tip3_symbol: token_root.symbol.clone(),
        tip3_decimals: token_root.decimals,
        tip3_balance: token_wallet_balance.clone(),
        evm_decimals: evm_token.decimals,
        configuration: configuration.clone(),
        error,
    }))
}

/// Same first-match policy as the EVM to Everscale direction; the emitter
/// check compares against the proxy here, and there is no configuration
/// back-reference check.
fn first_validation_error(
    vault_config: &VaultConfig,
    vault: &VaultState,
    proxy: &ProxyDetails,
    configuration: &EverscaleConfigDetails,
    now: u32,
) -> Option<String> {
    let checks: [(bool, &str); 8] = [
        (configuration.is_expired(now), "Event configuration is expired"),
        (vault.emergency_shutdown, "Vault is paused"),
        (
            configuration.chain_id != vault_config.chain_id,
            "Event configuration chain id mismatch",
        ),
        (
            configuration.event_emitter != vault_config.tip3_proxy,
            "Event emitter does not match the token proxy",
        ),
        (proxy.paused, "Token proxy is paused"),
        (proxy.token_root != vault_config.tip3_root, "Token proxy root mismatch"),
        (vault.deposit_fee != BigUint::from(0u32), "Vault deposit fee is non-zero"),
        (vault.withdraw_fee != BigUint::from(0u32), "Vault withdraw fee is non-zero"),
    ];
    checks
        .into_iter()
        .find_map(|(failed, message)| failed.then(|| message.to_string()))
}

impl EverscaleEvmLoaded {
    fn ensure_unblocked(&self) -> Result<(), PipelineError> {
        match &self.error {
            Some(message) => Err(PipelineError::Blocked(message.clone())),
            None => Ok(()),
        }
    }

    pub fn check_limits_for_amount(&self, raw: &str) -> LimitCheck {
        let Some(amount) = parse_decimal_amount(raw, self.tip3_decimals) else {
            return LimitCheck::fail("Invalid amount");
        };
        if amount == BigUint::from(0u32) {
            return LimitCheck::fail("Amount must be positive");
        }
        if amount > self.tip3_balance {
            return LimitCheck::fail("Insufficient token balance");
        }
        LimitCheck::ok()
    }

    /// Burns the entered amount towards the proxy and resolves to the event
    /// contract address the configuration deploys. Holds a token from `lock`
    /// until the event is located or the burn fails.
    pub async fn deposit_to_bridge(
        &self,
        lock: &SubmissionLock,
        client: Arc<dyn EverChainClient>,
        codec: &dyn EventCodec,
        raw_amount: &str,
        recipient: Address,
    ) -> Result<TonAddress, PipelineError> {
        self.ensure_unblocked()?;
        let _token = lock.try_acquire()?;
        let amount = parse_decimal_amount(raw_amount, self.tip3_decimals)
            .ok_or_else(|| PipelineError::InvalidAmount(raw_amount.to_string()))?;
        let event = burn_and_wait_for_event(
            client,
            codec,
            WithdrawRequest {
                owner: self.ever_account,
                tip3_root: self.vault_config.tip3_root,
                proxy: self.vault_config.tip3_proxy,
                configuration: self.vault_config.everscale_configuration,
                amount,
                recipient,
                chain_id: self.vault_config.chain_id,
            },
        )
        .await?;
        Ok(event)
    }

    /// Encoded release payload and the withdraw id the vault books it under.
    pub fn prepare_release(
        &self,
        codec: &dyn EventCodec,
        event: &EverscaleEventData,
    ) -> Result<(Vec<u8>, B256), PipelineError> {
        let mapped = codec.cell_into_evm_bytes(&event.event_data)?;
        let encoded = encode_ton_event(event, &mapped, self.configuration.evm_proxy);
        let id = withdraw_id(&encoded);
        Ok((encoded, id))
    }

    /// Submits `saveWithdraw`, sorting the relay signatures the way the
    /// vault requires. Returns the submitted tx hash and the withdraw id.
    pub async fn save_withdraw(
        &self,
        lock: &SubmissionLock,
        client: &dyn EvmChainClient,
        codec: &dyn EventCodec,
        event: &EverscaleEventData,
        signatures: Vec<Vec<u8>>,
    ) -> Result<(B256, B256), PipelineError> {
        self.ensure_unblocked()?;
        let _token = lock.try_acquire()?;
        let (encoded, id) = self.prepare_release(codec, event)?;
        let sorted = sort_signatures_by_signer(&encoded, signatures, |payload, signature| {
            client.recover_signer(payload, signature)
        })?;
        let tx_hash = client
            .send_save_withdraw(self.vault_config.vault, self.evm_account, encoded, sorted)
            .await?;
        Ok((tx_hash, id))
    }

    /// Reclaims the settled event contract's remaining balance. Touches only
    /// the event contract, so it stays available while the pipeline carries
    /// a validation error.
    pub async fn close_event(
        &self,
        lock: &SubmissionLock,
        client: &dyn EverChainClient,
        event_contract: TonAddress,
    ) -> Result<(), PipelineError> {
        let _token = lock.try_acquire()?;
        client.close_event(self.ever_account, event_contract).await?;
        Ok(())
    }
}
