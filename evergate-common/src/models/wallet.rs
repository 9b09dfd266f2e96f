use alloy_primitives::Address;
use num_bigint::BigUint;
use strum_macros::Display;

use crate::models::{ChainId, TonAddress};

/// Connection state of the browser EVM wallet, as the pipelines see it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum EvmWalletConnectionStatus {
    /// Provider detection has not finished yet.
    Initializing,
    NotInstalled,
    NotConnected,
    /// Connected, but to a different chain than the transfer needs.
    WrongNetwork,
    Ok,
}

/// Snapshot of the EVM wallet. `installed` is `None` until provider
/// detection resolves, which keeps dependent pipelines unassembled rather
/// than wrongly telling the user to install a wallet.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EvmWalletSnapshot {
    pub installed: Option<bool>,
    pub account: Option<Address>,
    pub chain_id: Option<ChainId>,
    pub balance: Option<BigUint>,
}

impl EvmWalletSnapshot {
    pub fn status_for_chain(&self, required_chain_id: ChainId) -> EvmWalletConnectionStatus {
        match self.installed {
            None => EvmWalletConnectionStatus::Initializing,
            Some(false) => EvmWalletConnectionStatus::NotInstalled,
            Some(true) => match (self.account, self.chain_id) {
                (Some(_), Some(chain_id)) if chain_id == required_chain_id => {
                    EvmWalletConnectionStatus::Ok
                }
                (Some(_), Some(_)) => EvmWalletConnectionStatus::WrongNetwork,
                _ => EvmWalletConnectionStatus::NotConnected,
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.installed == Some(true) && self.account.is_some() && self.chain_id.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum EverWalletConnectionStatus {
    Initializing,
    NotInstalled,
    NotConnected,
    Ok,
}

/// Snapshot of the Everscale browser wallet.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EverWalletSnapshot {
    pub installed: Option<bool>,
    pub account: Option<TonAddress>,
    /// Native EVER balance in nanotokens.
    pub balance: Option<BigUint>,
    pub contract_deployed: bool,
}

impl EverWalletSnapshot {
    pub fn status(&self) -> EverWalletConnectionStatus {
        match self.installed {
            None => EverWalletConnectionStatus::Initializing,
            Some(false) => EverWalletConnectionStatus::NotInstalled,
            Some(true) if self.account.is_some() => EverWalletConnectionStatus::Ok,
            Some(true) => EverWalletConnectionStatus::NotConnected,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.installed == Some(true) && self.account.is_some()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn evm_snapshot(
        installed: Option<bool>,
        account: Option<&str>,
        chain_id: Option<ChainId>,
    ) -> EvmWalletSnapshot {
        EvmWalletSnapshot {
            installed,
            account: account.map(|a| a.parse().unwrap()),
            chain_id,
            balance: None,
        }
    }

    const ACCOUNT: &str = "0xd3CdA913deB6f67967B99D67aCDFa1712C293601";

    #[rstest]
    #[case::detecting(evm_snapshot(None, None, None), EvmWalletConnectionStatus::Initializing)]
    #[case::not_installed(
        evm_snapshot(Some(false), None, None),
        EvmWalletConnectionStatus::NotInstalled
    )]
    #[case::not_connected(
        evm_snapshot(Some(true), None, None),
        EvmWalletConnectionStatus::NotConnected
    )]
    #[case::wrong_network(
        evm_snapshot(Some(true), Some(ACCOUNT), Some(56)),
        EvmWalletConnectionStatus::WrongNetwork
    )]
    #[case::connected(
        evm_snapshot(Some(true), Some(ACCOUNT), Some(1)),
        EvmWalletConnectionStatus::Ok
    )]
    fn test_evm_wallet_status(
        #[case] snapshot: EvmWalletSnapshot,
        #[case] expected: EvmWalletConnectionStatus,
    ) {
        assert_eq!(snapshot.status_for_chain(1), expected);
    }

    #[test]
    fn test_ever_wallet_status() {
        let mut snapshot = EverWalletSnapshot::default();
        assert_eq!(snapshot.status(), EverWalletConnectionStatus::Initializing);
        assert!(!snapshot.is_ready());

        snapshot.installed = Some(true);
        assert_eq!(snapshot.status(), EverWalletConnectionStatus::NotConnected);

        snapshot.account = Some(
            "0:a49cd4e158a9a15555e624759e2e4e766d22600b7800d891e46f9291f044a93d"
                .parse()
                .unwrap(),
        );
        assert_eq!(snapshot.status(), EverWalletConnectionStatus::Ok);
        assert!(snapshot.is_ready());
    }
}
