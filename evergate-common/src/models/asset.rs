use alloy_primitives::{address, Address};

use crate::models::{transfer::TransferType, ChainId, TonAddress};

/// Metadata of one Everscale (TIP-3) token, from the curated asset list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenAsset {
    pub name: String,
    pub chain_id: ChainId,
    pub symbol: String,
    pub decimals: u32,
    pub root: TonAddress,
    pub version: u32,
    pub vendor: Option<String>,
    pub verified: bool,
}

/// Static descriptor of one vault/asset pairing the bridge supports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultConfig {
    pub vault: Address,
    pub token: Address,
    pub chain_id: ChainId,
    pub tip3_root: TonAddress,
    pub tip3_proxy: TonAddress,
    pub evm_configuration: TonAddress,
    pub everscale_configuration: TonAddress,
    pub deposit_type: TransferType,
}

fn ton(raw: &str) -> TonAddress {
    raw.parse().expect("static address table entry")
}

fn asset(name: &str, symbol: &str, decimals: u32, root: &str) -> TokenAsset {
    TokenAsset {
        name: name.to_string(),
        chain_id: 1,
        symbol: symbol.to_string(),
        decimals,
        root: ton(root),
        version: 5,
        vendor: Some("broxus".to_string()),
        verified: true,
    }
}

/// Curated token list, mirrored from the upstream assets repository.
pub fn token_assets() -> Vec<TokenAsset> {
    vec![
        asset(
            "Wrapped EVER",
            "WEVER",
            9,
            "0:a49cd4e158a9a15555e624759e2e4e766d22600b7800d891e46f9291f044a93d",
        ),
        asset(
            "Dai Stablecoin",
            "DAI",
            18,
            "0:eb2ccad2020d9af9cec137d3146dde067039965c13a27d97293c931dae22b2b9",
        ),
        asset(
            "Tether",
            "USDT",
            6,
            "0:a519f99bb5d6d51ef958ed24d337ad75a1c770885dcd42d51d6663f9fcdacfb2",
        ),
        asset(
            "USD Coin",
            "USDC",
            6,
            "0:c37b3fafca5bf7d3704b081fde7df54f298736ee059bf6d32fac25f5e6085bf6",
        ),
        asset(
            "Wrapped BTC",
            "WBTC",
            8,
            "0:2ba32b75870d572e255809b7b423f30f36dd5dea075bd5f026863fceb81f2bcf",
        ),
        asset(
            "Wrapped Ether",
            "WETH",
            18,
            "0:59b6b64ac6798aacf385ae9910008a525a84fc6dcf9f942ae81f8e8485fe160d",
        ),
    ]
}

pub fn token_asset_by_root(root: &TonAddress) -> Option<TokenAsset> {
    token_assets().into_iter().find(|a| &a.root == root)
}

/// Known vault/asset pairings.
pub fn vaults() -> Vec<VaultConfig> {
    vec![
        VaultConfig {
            vault: address!("81598d5362eAC63310e5719315497C5b8980C579"),
            token: address!("dAC17F958D2ee523a2206206994597C13D831ec7"),
            chain_id: 1,
            tip3_root: ton("0:a519f99bb5d6d51ef958ed24d337ad75a1c770885dcd42d51d6663f9fcdacfb2"),
            tip3_proxy: ton("0:18a4b265453e5b5b8507067d52bb2e3be2b91b508bf8a245eb8a98a7745a66aa"),
            evm_configuration: ton(
                "0:d2ef78ee58e4ef078b08ed1a611b9a9dbcfb8ff39e9b9d4a7bba44b9e3379a77",
            ),
            everscale_configuration: ton(
                "0:6c2d8e0b2be293ad0f323ff23cfa6eb9ae9c32ad3d894dd2fa4b8b0a0dca1e3b",
            ),
            deposit_type: TransferType::Default,
        },
        VaultConfig {
            vault: address!("032D06b4cC8A914b85615Acd0131C3E0a7330968"),
            token: address!("dAC17F958D2ee523a2206206994597C13D831ec7"),
            chain_id: 1,
            tip3_root: ton("0:a519f99bb5d6d51ef958ed24d337ad75a1c770885dcd42d51d6663f9fcdacfb2"),
            tip3_proxy: ton("0:18a4b265453e5b5b8507067d52bb2e3be2b91b508bf8a245eb8a98a7745a66aa"),
            evm_configuration: ton(
                "0:9f96b9986fbbaecbe2b4b47dd6c83a27e5afc33e4d8b4f4b1335a0d3dc2cff3e",
            ),
            everscale_configuration: ton(
                "0:6c2d8e0b2be293ad0f323ff23cfa6eb9ae9c32ad3d894dd2fa4b8b0a0dca1e3b",
            ),
            deposit_type: TransferType::Credit,
        },
        VaultConfig {
            vault: address!("2f53C3a0d5bFbDDE64cF1E12b5a8445a4d6C3A7e"),
            token: address!("55d398326f99059fF775485246999027B3197955"),
            chain_id: 56,
            tip3_root: ton("0:a519f99bb5d6d51ef958ed24d337ad75a1c770885dcd42d51d6663f9fcdacfb2"),
            tip3_proxy: ton("0:18a4b265453e5b5b8507067d52bb2e3be2b91b508bf8a245eb8a98a7745a66aa"),
            evm_configuration: ton(
                "0:3dd3b50da6b1a2c59e615c8e5dc99c0f25c5eb523b370b21a26e111b21ba9ed8",
            ),
            everscale_configuration: ton(
                "0:83f3d25b6a9f41e3c5ab1f033fde6cb3d37f8f2b6c041dd1b96d2de88dca4c55",
            ),
            deposit_type: TransferType::Default,
        },
    ]
}

/// The credit factory that spawns credit processors for credit-mode
/// deposits.
pub fn credit_factory() -> TonAddress {
    ton("0:5ca53c5ba2a3de7f06e0c212571bfbd4668eeac597631ec6492320b2d5bcbedf")
}

pub fn vault_by_address(vault: Address, chain_id: ChainId) -> Option<VaultConfig> {
    vaults()
        .into_iter()
        .find(|v| v.vault == vault && v.chain_id == chain_id)
}

pub fn vault_for(
    chain_id: ChainId,
    tip3_root: &TonAddress,
    deposit_type: TransferType,
) -> Option<VaultConfig> {
    vaults().into_iter().find(|v| {
        v.chain_id == chain_id && &v.tip3_root == tip3_root && v.deposit_type == deposit_type
    })
}
