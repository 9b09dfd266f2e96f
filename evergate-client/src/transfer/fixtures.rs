//! Shared builders for deriver and orchestrator tests.

use alloy_primitives::Address;
use num_bigint::BigUint;

use evergate_common::models::{
    asset::vaults,
    network::network_by_id,
    wallet::{EverWalletSnapshot, EvmWalletSnapshot},
    TonAddress,
};
use evergate_ethereum::{erc20::Erc20State, vault::VaultState};
use evergate_everscale::client::{
    EverscaleConfigDetails, EvmConfigDetails, ProxyDetails, TokenRootDetails,
};

use crate::pipeline::{
    everscale_evm::{self, EverscaleEvmInputs, EverscaleEvmPipeline},
    evm_everscale::{self, EvmEverscaleInputs, EvmEverscalePipeline},
};

pub fn evm_account() -> Address {
    "0xd3CdA913deB6f67967B99D67aCDFa1712C293601".parse().unwrap()
}

pub fn ever_account() -> TonAddress {
    "0:a49cd4e158a9a15555e624759e2e4e766d22600b7800d891e46f9291f044a93d"
        .parse()
        .unwrap()
}

pub fn connected_evm_wallet(chain_id: u64) -> EvmWalletSnapshot {
    EvmWalletSnapshot {
        installed: Some(true),
        account: Some(evm_account()),
        chain_id: Some(chain_id),
        balance: None,
    }
}

pub fn connected_ever_wallet() -> EverWalletSnapshot {
    EverWalletSnapshot {
        installed: Some(true),
        account: Some(ever_account()),
        balance: Some(BigUint::from(10_000_000_000u64)),
        contract_deployed: true,
    }
}

fn healthy_vault(token: Address) -> VaultState {
    VaultState {
        token,
        available_deposit_limit: BigUint::from(1_000_000_000u64),
        emergency_shutdown: false,
        deposit_fee: BigUint::from(0u32),
        withdraw_fee: BigUint::from(0u32),
    }
}

pub fn evm_everscale_inputs() -> EvmEverscaleInputs {
    let vault_config = vaults()[0].clone();
    EvmEverscaleInputs {
        source: network_by_id("evm-1").unwrap(),
        evm_wallet: connected_evm_wallet(vault_config.chain_id),
        ever_wallet: connected_ever_wallet(),
        vault: Some(healthy_vault(vault_config.token)),
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

pub fn loaded_evm_everscale_pipeline() -> EvmEverscalePipeline {
    evm_everscale::assemble(&evm_everscale_inputs())
}

pub fn everscale_evm_inputs() -> EverscaleEvmInputs {
    let vault_config = vaults()[0].clone();
    EverscaleEvmInputs {
        destination: network_by_id("evm-1").unwrap(),
        evm_wallet: connected_evm_wallet(vault_config.chain_id),
        ever_wallet: connected_ever_wallet(),
        vault: Some(healthy_vault(vault_config.token)),
        evm_token: Some(Erc20State {
            symbol: "USDT".to_string(),
            decimals: 6,
            balance: BigUint::from(0u32),
        }),
        token_root: Some(TokenRootDetails {
            symbol: "USDT".to_string(),
            decimals: 9,
            total_supply: BigUint::from(1u32),
        }),
        token_wallet_balance: Some(BigUint::from(250_000_000_000u64)),
        proxy: Some(ProxyDetails {
            token_root: vault_config.tip3_root,
            paused: false,
            evm_configurations: vec![vault_config.evm_configuration],
        }),
        configuration: Some(EverscaleConfigDetails {
            event_emitter: vault_config.tip3_proxy,
            evm_proxy: Address::repeat_byte(7),
            start_timestamp: 0,
            end_timestamp: 0,
            event_initial_balance: BigUint::from(2_000_000_000u64),
            chain_id: vault_config.chain_id,
        }),
        now: Some(1_652_000_000),
        vault_config,
    }
}

pub fn loaded_everscale_evm_pipeline() -> EverscaleEvmPipeline {
    everscale_evm::assemble(&everscale_evm_inputs())
}
