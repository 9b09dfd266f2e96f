//! EVM to Everscale pipeline: deposit side on the EVM chain, mint side on
//! Everscale.

use alloy_primitives::{Address, B256};
use num_bigint::BigUint;

use evergate_common::{
    amount::{parse_decimal_amount, shift_decimals},
    constants::{
        CREDIT_BODY, DEFAULT_SWAP_DENOMINATOR, EMPTY_CELL, MAXIMUM_SWAP_NUMERATOR, WEVER_DECIMALS,
    },
    models::{
        asset::{credit_factory, VaultConfig},
        event::EthEventVoteData,
        network::{NetworkShape, NetworkType},
        wallet::{
            EverWalletConnectionStatus, EverWalletSnapshot, EvmWalletConnectionStatus,
            EvmWalletSnapshot,
        },
        TonAddress,
    },
};
use evergate_ethereum::{
    client::{DepositRequest, EvmChainClient, FactoryDepositRequest},
    erc20::Erc20State,
    vault::VaultState,
};
use evergate_everscale::{
    client::{EvmConfigDetails, ProxyDetails, TokenRootDetails},
    credit::clamp_swap_numerator,
    EverChainClient,
};

use crate::{
    errors::PipelineError,
    pipeline::{AllowanceCheck, LimitCheck, SubmissionLock},
};

/// Snapshot of every adapter the EVM to Everscale direction depends on.
/// `None` means the adapter has not resolved yet.
#[derive(Debug, Clone)]
pub struct EvmEverscaleInputs {
    pub vault_config: VaultConfig,
    pub source: NetworkShape,
    pub evm_wallet: EvmWalletSnapshot,
    pub ever_wallet: EverWalletSnapshot,
    pub vault: Option<VaultState>,
    pub token: Option<Erc20State>,
    pub allowance: Option<BigUint>,
    pub token_root: Option<TokenRootDetails>,
    pub proxy: Option<ProxyDetails>,
    pub configuration: Option<EvmConfigDetails>,
    pub current_block: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvmEverscalePipeline {
    /// Some dependency is unresolved. Partial account info is carried for
    /// display only.
    NotLoaded {
        evm_account: Option<Address>,
        ever_account: Option<TonAddress>,
    },
    Loaded(Box<EvmEverscaleLoaded>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvmEverscaleLoaded {
    pub vault_config: VaultConfig,
    pub evm_account: Address,
    pub ever_account: TonAddress,
    pub evm_symbol: String,
    pub evm_decimals: u32,
    pub evm_balance: BigUint,
    pub allowance: BigUint,
    pub tip3_decimals: u32,
    pub available_deposit_limit: BigUint,
    pub configuration: EvmConfigDetails,
    /// First failing soft-validation check, verbatim. Blocks every transfer
    /// action while set.
    pub error: Option<String>,
}

impl EvmEverscalePipeline {
    pub fn loaded(&self) -> Option<&EvmEverscaleLoaded> {
        match self {
            Self::NotLoaded { .. } => None,
            Self::Loaded(loaded) => Some(loaded),
        }
    }

    pub fn is_actionable(&self) -> bool {
        self.loaded().is_some_and(|loaded| loaded.error.is_none())
    }
}

/// Assembles the pipeline from one input snapshot. Pure: same snapshot,
/// same pipeline.
pub fn assemble(inputs: &EvmEverscaleInputs) -> EvmEverscalePipeline {
    let not_loaded = EvmEverscalePipeline::NotLoaded {
        evm_account: inputs.evm_wallet.account,
        ever_account: inputs.ever_wallet.account,
    };

    if inputs.source.network_type != NetworkType::Evm
        || inputs.source.chain_id != inputs.vault_config.chain_id
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
        Some(token),
        Some(allowance),
        Some(token_root),
        Some(proxy),
        Some(configuration),
        Some(current_block),
    ) = (
        inputs.vault.as_ref(),
        inputs.token.as_ref(),
        inputs.allowance.as_ref(),
        inputs.token_root.as_ref(),
        inputs.proxy.as_ref(),
        inputs.configuration.as_ref(),
        inputs.current_block,
    )
    else {
        return not_loaded;
    };
    let (Some(evm_account), Some(ever_account)) =
        (inputs.evm_wallet.account, inputs.ever_wallet.account)
    else {
        return not_loaded;
    };

    let error =
        first_validation_error(&inputs.vault_config, vault, proxy, configuration, current_block);

    EvmEverscalePipeline::Loaded(Box::new(EvmEverscaleLoaded {
        vault_config: inputs.vault_config.clone(),
        evm_account,
        ever_account,
        evm_symbol: token.symbol.clone(),
        evm_decimals: token.decimals,
        evm_balance: token.balance.clone(),
        allowance: allowance.clone(),
        tip3_decimals: token_root.decimals,
        available_deposit_limit: vault.available_deposit_limit.clone(),
        configuration: configuration.clone(),
        error,
    }))
}

/// Ordered soft-validation pass. The first failing check's message wins and
/// later checks are not evaluated, so the user always sees one stable error.
fn first_validation_error(
    vault_config: &VaultConfig,
    vault: &VaultState,
    proxy: &ProxyDetails,
    configuration: &EvmConfigDetails,
    current_block: u64,
) -> Option<String> {
    let checks: [(bool, &str); 9] = [
        (configuration.is_expired(current_block), "Event configuration is expired"),
        (vault.emergency_shutdown, "Vault is paused"),
        (
            configuration.chain_id != vault_config.chain_id,
            "Event configuration chain id mismatch",
        ),
        (
            configuration.event_emitter != vault_config.vault,
            "Event emitter does not match the vault",
        ),
        (proxy.paused, "Token proxy is paused"),
        (proxy.token_root != vault_config.tip3_root, "Token proxy root mismatch"),
        (vault.deposit_fee != BigUint::from(0u32), "Vault deposit fee is non-zero"),
        (vault.withdraw_fee != BigUint::from(0u32), "Vault withdraw fee is non-zero"),
        (
            !proxy.evm_configurations.contains(&vault_config.evm_configuration),
            "Token proxy does not reference this event configuration",
        ),
    ];
    checks
        .into_iter()
        .find_map(|(failed, message)| failed.then(|| message.to_string()))
}

/// Outcome of validating a credit-mode amount against the cost of its swap
/// leg.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreditAmountCheck {
    Ok {
        /// TIP-3 base units the recipient nets after the swap.
        min_tokens_amount: BigUint,
    },
    /// The entered amount would not even cover the swap.
    TooLow {
        /// Smallest transferable amount, ERC-20 base units.
        minimum_evm_amount: BigUint,
    },
    Invalid,
}

impl EvmEverscaleLoaded {
    fn ensure_unblocked(&self) -> Result<(), PipelineError> {
        match &self.error {
            Some(message) => Err(PipelineError::Blocked(message.clone())),
            None => Ok(()),
        }
    }

    fn parse_amount(&self, raw: &str) -> Result<BigUint, PipelineError> {
        parse_decimal_amount(raw, self.evm_decimals)
            .ok_or_else(|| PipelineError::InvalidAmount(raw.to_string()))
    }

    /// The entered amount expressed in TIP-3 base units.
    pub fn tip3_amount(&self, evm_amount: &BigUint) -> BigUint {
        shift_decimals(evm_amount, self.evm_decimals, self.tip3_decimals)
    }

    pub fn check_limits_for_amount(&self, raw: &str) -> LimitCheck {
        let Some(amount) = parse_decimal_amount(raw, self.evm_decimals) else {
            return LimitCheck::fail("Invalid amount");
        };
        if amount == BigUint::from(0u32) {
            return LimitCheck::fail("Amount must be positive");
        }
        if amount > self.evm_balance {
            return LimitCheck::fail("Insufficient token balance");
        }
        if amount > self.available_deposit_limit {
            return LimitCheck::fail("Amount exceeds the vault deposit limit");
        }
        LimitCheck::ok()
    }

    /// EVERs the credit processor must end up with so the recipient nets
    /// `raw_min_evers`: the processor body plus the factory fee plus the
    /// requested amount, grossed up by the maximum swap share. Rounded up.
    pub fn required_evers_for_credit(
        &self,
        raw_min_evers: &str,
        factory_fee: &BigUint,
    ) -> Result<BigUint, PipelineError> {
        let min_evers = parse_decimal_amount(raw_min_evers, WEVER_DECIMALS)
            .ok_or_else(|| PipelineError::InvalidAmount(raw_min_evers.to_string()))?;
        let total = BigUint::from(CREDIT_BODY) + min_evers + factory_fee;
        let reduced = BigUint::from(DEFAULT_SWAP_DENOMINATOR - MAXIMUM_SWAP_NUMERATOR);
        let scaled = total * BigUint::from(DEFAULT_SWAP_DENOMINATOR);
        Ok((scaled + &reduced - BigUint::from(1u32)) / reduced)
    }

    /// Validates a credit-mode amount against `swap_spend`, the TIP-3 tokens
    /// the DEX quotes for the EVER leg.
    pub fn check_credit_amount(&self, raw_amount: &str, swap_spend: &BigUint) -> CreditAmountCheck {
        let Some(amount) = parse_decimal_amount(raw_amount, self.evm_decimals) else {
            return CreditAmountCheck::Invalid;
        };
        let minimum_evm_amount = shift_decimals(
            &(swap_spend + BigUint::from(1u32)),
            self.tip3_decimals,
            self.evm_decimals,
        );
        if amount < minimum_evm_amount {
            return CreditAmountCheck::TooLow { minimum_evm_amount };
        }
        CreditAmountCheck::Ok { min_tokens_amount: self.tip3_amount(&amount) - swap_spend }
    }

    pub fn check_allowance(&self, amount: &BigUint) -> AllowanceCheck {
        if *amount <= self.allowance {
            AllowanceCheck::Sufficient
        } else {
            AllowanceCheck::ApprovalRequired { missing: amount - &self.allowance }
        }
    }

    /// Wallet-signed submissions hold a token from `lock` for their whole
    /// duration. A rejected or reverted submission drops the token on the
    /// error path, so the user may retry.
    pub async fn request_approve(
        &self,
        lock: &SubmissionLock,
        client: &dyn EvmChainClient,
        raw_amount: &str,
    ) -> Result<B256, PipelineError> {
        self.ensure_unblocked()?;
        let _token = lock.try_acquire()?;
        let amount = self.parse_amount(raw_amount)?;
        let hash = client
            .send_approve(
                self.vault_config.token,
                self.evm_account,
                self.vault_config.vault,
                amount,
            )
            .await?;
        Ok(hash)
    }

    /// Plain vault deposit towards `recipient` on Everscale.
    pub async fn deposit(
        &self,
        lock: &SubmissionLock,
        client: &dyn EvmChainClient,
        raw_amount: &str,
        recipient: TonAddress,
    ) -> Result<B256, PipelineError> {
        self.ensure_unblocked()?;
        let _token = lock.try_acquire()?;
        let amount = self.parse_amount(raw_amount)?;
        let hash = client
            .send_deposit(DepositRequest {
                vault: self.vault_config.vault,
                sender: self.evm_account,
                recipient,
                amount,
            })
            .await?;
        Ok(hash)
    }

    /// Credit deposit through the factory, swapping part of the tokens into
    /// EVERs for the recipient.
    #[allow(clippy::too_many_arguments)]
    pub async fn deposit_to_factory(
        &self,
        lock: &SubmissionLock,
        client: &dyn EvmChainClient,
        raw_amount: &str,
        recipient: TonAddress,
        min_evers_amount: BigUint,
        min_tokens_amount: BigUint,
        swap_numerator: u64,
    ) -> Result<B256, PipelineError> {
        self.ensure_unblocked()?;
        let _token = lock.try_acquire()?;
        let amount = self.parse_amount(raw_amount)?;
        let hash = client
            .send_deposit_to_factory(FactoryDepositRequest {
                vault: self.vault_config.vault,
                sender: self.evm_account,
                recipient,
                amount,
                min_evers_amount,
                min_tokens_amount,
                swap_numerator: clamp_swap_numerator(swap_numerator),
                swap_denominator: DEFAULT_SWAP_DENOMINATOR,
                level3: EMPTY_CELL.to_string(),
            })
            .await?;
        Ok(hash)
    }

    /// Deterministic address of the event contract for this vote data.
    pub async fn derive_event_address(
        &self,
        client: &dyn EverChainClient,
        vote_data: EthEventVoteData,
    ) -> Result<TonAddress, PipelineError> {
        self.ensure_unblocked()?;
        Ok(client
            .derive_eth_event_address(self.vault_config.evm_configuration, vote_data)
            .await?)
    }

    /// Deterministic address of the credit processor for this vote data.
    pub async fn derive_credit_processor_address(
        &self,
        client: &dyn EverChainClient,
        vote_data: EthEventVoteData,
    ) -> Result<TonAddress, PipelineError> {
        self.ensure_unblocked()?;
        Ok(client
            .derive_credit_processor_address(credit_factory(), vote_data)
            .await?)
    }

    /// Submits the event contract deployment for a default-mode deposit.
    pub async fn deploy_event(
        &self,
        lock: &SubmissionLock,
        client: &dyn EverChainClient,
        vote_data: EthEventVoteData,
    ) -> Result<(), PipelineError> {
        self.ensure_unblocked()?;
        let _token = lock.try_acquire()?;
        client
            .deploy_event(
                self.ever_account,
                self.vault_config.evm_configuration,
                vote_data,
                self.configuration.event_initial_balance.clone(),
            )
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use evergate_common::models::{asset::vaults, network::network_by_id};
    use rstest::rstest;

    use super::*;

    fn connected_evm_wallet(chain_id: u64) -> EvmWalletSnapshot {
        EvmWalletSnapshot {
            installed: Some(true),
            account: Some("0xd3CdA913deB6f67967B99D67aCDFa1712C293601".parse().unwrap()),
            chain_id: Some(chain_id),
            balance: None,
        }
    }

    fn connected_ever_wallet() -> EverWalletSnapshot {
        EverWalletSnapshot {
            installed: Some(true),
            account: Some(
                "0:a49cd4e158a9a15555e624759e2e4e766d22600b7800d891e46f9291f044a93d"
                    .parse()
                    .unwrap(),
            ),
            balance: Some(BigUint::from(10_000_000_000u64)),
            contract_deployed: true,
        }
    }

    fn resolved_inputs() -> EvmEverscaleInputs {
        let vault_config = vaults()[0].clone();
        EvmEverscaleInputs {
            source: network_by_id("evm-1").unwrap(),
            evm_wallet: connected_evm_wallet(vault_config.chain_id),
            ever_wallet: connected_ever_wallet(),
            vault: Some(VaultState {
                token: vault_config.token,
                available_deposit_limit: BigUint::from(1_000_000_000u64),
                emergency_shutdown: false,
                deposit_fee: BigUint::from(0u32),
                withdraw_fee: BigUint::from(0u32),
            }),
            token: Some(Erc20State {
                symbol: "USDT".to_string(),
                decimals: 6,
                balance: BigUint::from(500_000_000u64),
            }),
            allowance: Some(BigUint::from(200_000_000u64)),
            token_root: Some(TokenRootDetails {
                symbol: "USDT".to_string(),
                decimals: 9,
                total_supply: BigUint::from(1u32),
            }),
            proxy: Some(ProxyDetails {
                token_root: vault_config.tip3_root,
                paused: false,
                evm_configurations: vec![vault_config.evm_configuration],
            }),
            configuration: Some(EvmConfigDetails {
                event_emitter: vault_config.vault,
                proxy: vault_config.tip3_proxy,
                start_block_number: 100,
                end_block_number: 0,
                event_initial_balance: BigUint::from(2_000_000_000u64),
                chain_id: vault_config.chain_id,
            }),
            current_block: Some(15_000_000),
            vault_config,
        }
    }

    fn expect_loaded(pipeline: &EvmEverscalePipeline) -> &EvmEverscaleLoaded {
        pipeline.loaded().expect("pipeline should be loaded")
    }

    #[test]
    fn test_fully_resolved_inputs_load_without_error() {
        let pipeline = assemble(&resolved_inputs());
        let loaded = expect_loaded(&pipeline);
        assert_eq!(loaded.error, None);
        assert!(pipeline.is_actionable());
    }

    #[rstest]
    #[case::no_vault(|i: &mut EvmEverscaleInputs| i.vault = None)]
    #[case::no_token(|i: &mut EvmEverscaleInputs| i.token = None)]
    #[case::no_allowance(|i: &mut EvmEverscaleInputs| i.allowance = None)]
    #[case::no_token_root(|i: &mut EvmEverscaleInputs| i.token_root = None)]
    #[case::no_proxy(|i: &mut EvmEverscaleInputs| i.proxy = None)]
    #[case::no_configuration(|i: &mut EvmEverscaleInputs| i.configuration = None)]
    #[case::no_block(|i: &mut EvmEverscaleInputs| i.current_block = None)]
    #[case::evm_disconnected(|i: &mut EvmEverscaleInputs| i.evm_wallet.account = None)]
    #[case::evm_wrong_chain(|i: &mut EvmEverscaleInputs| i.evm_wallet.chain_id = Some(56))]
    #[case::ever_disconnected(|i: &mut EvmEverscaleInputs| i.ever_wallet.account = None)]
    fn test_any_unresolved_dependency_yields_not_loaded(
        #[case] strip: fn(&mut EvmEverscaleInputs),
    ) {
        let mut inputs = resolved_inputs();
        strip(&mut inputs);
        assert!(matches!(assemble(&inputs), EvmEverscalePipeline::NotLoaded { .. }));
    }

    #[test]
    fn test_first_failing_check_wins() {
        let mut inputs = resolved_inputs();
        // Both expired and paused at once: only the expiry message shows.
        inputs.configuration.as_mut().unwrap().end_block_number = 10;
        inputs.vault.as_mut().unwrap().emergency_shutdown = true;

        let pipeline = assemble(&inputs);
        let loaded = expect_loaded(&pipeline);
        assert_eq!(loaded.error.as_deref(), Some("Event configuration is expired"));
        assert!(!pipeline.is_actionable());
    }

    #[test]
    fn test_validation_order_is_stable() {
        let mut inputs = resolved_inputs();
        inputs.vault.as_mut().unwrap().emergency_shutdown = true;
        inputs.vault.as_mut().unwrap().deposit_fee = BigUint::from(5u32);

        let pipeline = assemble(&inputs);
        assert_eq!(expect_loaded(&pipeline).error.as_deref(), Some("Vault is paused"));
    }

    #[test_log::test(tokio::test)]
    async fn test_blocked_pipeline_rejects_actions() {
        let mut inputs = resolved_inputs();
        inputs.vault.as_mut().unwrap().emergency_shutdown = true;
        let pipeline = assemble(&inputs);
        let loaded = expect_loaded(&pipeline);

        // The mock would panic on any unexpected call; none may happen.
        let client = evergate_ethereum::client::MockEvmChainClient::new();
        let lock = SubmissionLock::new();
        let result = loaded.deposit(&lock, &client, "1", loaded.ever_account).await;
        assert!(matches!(result, Err(PipelineError::Blocked(_))));
        // No token leaked on the rejection path.
        assert!(!lock.is_in_flight());
    }

    #[test_log::test(tokio::test)]
    async fn test_deposit_rejected_while_another_submission_in_flight() {
        let pipeline = assemble(&resolved_inputs());
        let loaded = expect_loaded(&pipeline);
        let lock = SubmissionLock::new();

        let client = evergate_ethereum::client::MockEvmChainClient::new();
        let token = lock.try_acquire().unwrap();
        let result = loaded.deposit(&lock, &client, "1", loaded.ever_account).await;
        assert!(matches!(result, Err(PipelineError::ActionInProgress)));
        drop(token);

        let mut client = evergate_ethereum::client::MockEvmChainClient::new();
        client
            .expect_send_deposit()
            .times(1)
            .returning(|_| Ok(B256::repeat_byte(3)));
        let hash = loaded
            .deposit(&lock, &client, "1", loaded.ever_account)
            .await
            .unwrap();
        assert_eq!(hash, B256::repeat_byte(3));
        assert!(!lock.is_in_flight());
    }

    #[test]
    fn test_amount_shifting_and_limits() {
        let pipeline = assemble(&resolved_inputs());
        let loaded = expect_loaded(&pipeline);

        let evm_amount = parse_decimal_amount("100", loaded.evm_decimals).unwrap();
        assert_eq!(evm_amount, BigUint::from(100_000_000u64));
        assert_eq!(loaded.tip3_amount(&evm_amount), BigUint::from(100_000_000_000u64));

        assert_eq!(loaded.check_limits_for_amount("100"), LimitCheck::ok());
        // Balance is 500 tokens.
        assert_eq!(
            loaded.check_limits_for_amount("600"),
            LimitCheck::fail("Insufficient token balance")
        );
        assert_eq!(
            loaded.check_limits_for_amount("0"),
            LimitCheck::fail("Amount must be positive")
        );
        assert_eq!(
            loaded.check_limits_for_amount("12,5"),
            LimitCheck::fail("Invalid amount")
        );
    }

    #[test]
    fn test_required_evers_for_credit_grosses_up() {
        let pipeline = assemble(&resolved_inputs());
        let loaded = expect_loaded(&pipeline);

        // Body 5.8, requested 1, fee 0.2 EVERs: 7e9 * 100 / 90, rounded up.
        let required = loaded
            .required_evers_for_credit("1", &BigUint::from(200_000_000u64))
            .unwrap();
        assert_eq!(required, BigUint::from(7_777_777_778u64));

        assert!(matches!(
            loaded.required_evers_for_credit("x", &BigUint::from(0u32)),
            Err(PipelineError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_check_credit_amount_against_swap_cost() {
        let pipeline = assemble(&resolved_inputs());
        let loaded = expect_loaded(&pipeline);
        // The DEX wants 3 TIP-3 tokens for the EVER leg.
        let swap_spend = BigUint::from(3_000_000_000u64);

        assert_eq!(
            loaded.check_credit_amount("2.5", &swap_spend),
            CreditAmountCheck::TooLow { minimum_evm_amount: BigUint::from(3_000_000u64) }
        );
        assert_eq!(
            loaded.check_credit_amount("10", &swap_spend),
            CreditAmountCheck::Ok { min_tokens_amount: BigUint::from(7_000_000_000u64) }
        );
        assert_eq!(loaded.check_credit_amount("", &swap_spend), CreditAmountCheck::Invalid);
    }

    #[test]
    fn test_allowance_check() {
        let pipeline = assemble(&resolved_inputs());
        let loaded = expect_loaded(&pipeline);

        // Allowance is 200 tokens.
        assert_eq!(
            loaded.check_allowance(&BigUint::from(200_000_000u64)),
            AllowanceCheck::Sufficient
        );
        assert_eq!(
            loaded.check_allowance(&BigUint::from(250_000_000u64)),
            AllowanceCheck::ApprovalRequired { missing: BigUint::from(50_000_000u64) }
        );
    }
}
