//! Aggregates the per-leg statuses of a transfer into a single view: what
//! the user should do next, and the URL that resumes this transfer.

use strum_macros::Display;

use evergate_common::models::transfer::TransferStepData;

use super::{
    CreditStatus, EverscaleDepositStatus, EverscaleReleaseStatus, EvmDepositStatus,
    EvmReleaseStatus,
};

/// The single piece of advice the transfer screen surfaces at any moment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum UserAction {
    /// Nothing to do, the bridge is working.
    Wait,
    /// Sign the event deploy on the Everscale side.
    DeployEvent,
    /// Sign the burn that starts the Everscale leg.
    Deposit,
    /// Sign the vault release on the EVM side.
    Release,
    /// A leg ended in a terminal failure. Funds need manual recovery.
    ContactSupport,
    Done,
}

/// Second-leg status of an EVM to Everscale transfer. Which arm applies is
/// fixed by the transfer type chosen at deposit time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvmEverscaleSettlement {
    Release(EverscaleReleaseStatus),
    Credit(CreditStatus),
}

#[derive(Debug, Clone)]
pub struct EvmEverscaleTransferView {
    pub step_data: TransferStepData,
    pub deposit: EvmDepositStatus,
    pub settlement: EvmEverscaleSettlement,
}

impl EvmEverscaleTransferView {
    pub fn next_action(&self) -> UserAction {
        match self.deposit {
            EvmDepositStatus::Failed => return UserAction::ContactSupport,
            EvmDepositStatus::Confirmed => {}
            _ => return UserAction::Wait,
        }
        match &self.settlement {
            EvmEverscaleSettlement::Release(release) => match release {
                EverscaleReleaseStatus::Waiting => UserAction::DeployEvent,
                EverscaleReleaseStatus::Finished => UserAction::Done,
                EverscaleReleaseStatus::Failed => UserAction::ContactSupport,
                _ => UserAction::Wait,
            },
            EvmEverscaleSettlement::Credit(credit) => match credit {
                CreditStatus::Finished => UserAction::Done,
                CreditStatus::Failed { .. } => UserAction::ContactSupport,
                _ => UserAction::Wait,
            },
        }
    }

    pub fn url(&self) -> Option<String> {
        self.step_data.transfer_url()
    }
}

#[derive(Debug, Clone)]
pub struct EverscaleEvmTransferView {
    pub step_data: TransferStepData,
    pub deposit: EverscaleDepositStatus,
    pub release: EvmReleaseStatus,
}

impl EverscaleEvmTransferView {
    pub fn next_action(&self) -> UserAction {
        match &self.deposit {
            EverscaleDepositStatus::WaitingForDeploy => return UserAction::Deposit,
            EverscaleDepositStatus::Failed => return UserAction::ContactSupport,
            EverscaleDepositStatus::Finished { .. } => {}
            _ => return UserAction::Wait,
        }
        match self.release {
            EvmReleaseStatus::Waiting => UserAction::Release,
            EvmReleaseStatus::Finished { .. } => UserAction::Done,
            _ => UserAction::Wait,
        }
    }

    pub fn url(&self) -> Option<String> {
        self.step_data.transfer_url()
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::B256;
    use rstest::rstest;

    use evergate_common::models::transfer::TransferType;

    use super::*;

    fn evm_everscale_step() -> TransferStepData {
        TransferStepData::EvmEverscaleTransfer {
            transfer_type: TransferType::Default,
            source_network_id: "evm-1".to_string(),
            vault: "0x81598d5362eAC63310e5719315497C5b8980C579".parse().unwrap(),
            amount: None,
            min_evers_amount: None,
            min_tokens_amount: None,
            destination: None,
            deposit_tx_hash: Some(B256::repeat_byte(0x42)),
        }
    }

    fn everscale_evm_step() -> TransferStepData {
        TransferStepData::EverscaleEvmTransfer {
            destination_network_id: "evm-1".to_string(),
            vault: "0x81598d5362eAC63310e5719315497C5b8980C579".parse().unwrap(),
            amount: None,
            destination: None,
            event_address: Some(
                "0:9f96b9986fbbaecbe2b4b47dd6c83a27e5afc33e4d8b4f4b1335a0d3dc2cff3e"
                    .parse()
                    .unwrap(),
            ),
            release_tx_hash: None,
        }
    }

    #[rstest]
    #[case::depositing(
        EvmDepositStatus::Pending,
        EvmEverscaleSettlement::Release(EverscaleReleaseStatus::Initializing),
        UserAction::Wait
    )]
    #[case::needs_deploy(
        EvmDepositStatus::Confirmed,
        EvmEverscaleSettlement::Release(EverscaleReleaseStatus::Waiting),
        UserAction::DeployEvent
    )]
    #[case::released(
        EvmDepositStatus::Confirmed,
        EvmEverscaleSettlement::Release(EverscaleReleaseStatus::Finished),
        UserAction::Done
    )]
    #[case::credit_working(
        EvmDepositStatus::Confirmed,
        EvmEverscaleSettlement::Credit(CreditStatus::Initializing),
        UserAction::Wait
    )]
    #[case::credit_done(
        EvmDepositStatus::Confirmed,
        EvmEverscaleSettlement::Credit(CreditStatus::Finished),
        UserAction::Done
    )]
    #[case::credit_stuck(
        EvmDepositStatus::Confirmed,
        EvmEverscaleSettlement::Credit(CreditStatus::Failed { raw: None }),
        UserAction::ContactSupport
    )]
    #[case::bad_deposit(
        EvmDepositStatus::Failed,
        EvmEverscaleSettlement::Release(EverscaleReleaseStatus::Initializing),
        UserAction::ContactSupport
    )]
    fn test_evm_everscale_advice(
        #[case] deposit: EvmDepositStatus,
        #[case] settlement: EvmEverscaleSettlement,
        #[case] expected: UserAction,
    ) {
        let view =
            EvmEverscaleTransferView { step_data: evm_everscale_step(), deposit, settlement };
        assert_eq!(view.next_action(), expected);
    }

    #[rstest]
    #[case::needs_burn(
        EverscaleDepositStatus::WaitingForDeploy,
        EvmReleaseStatus::Initializing,
        UserAction::Deposit
    )]
    #[case::voting(
        EverscaleDepositStatus::WaitingForConfirmations,
        EvmReleaseStatus::Initializing,
        UserAction::Wait
    )]
    #[case::rejected(
        EverscaleDepositStatus::Failed,
        EvmReleaseStatus::Initializing,
        UserAction::ContactSupport
    )]
    fn test_everscale_evm_advice(
        #[case] deposit: EverscaleDepositStatus,
        #[case] release: EvmReleaseStatus,
        #[case] expected: UserAction,
    ) {
        let view = EverscaleEvmTransferView { step_data: everscale_evm_step(), deposit, release };
        assert_eq!(view.next_action(), expected);
    }

    #[test]
    fn test_confirmed_deposit_defers_to_release_leg() {
        let confirmed =
            EverscaleDepositStatus::Finished { data: sample_event_data(), signatures: vec![] };
        for (release, expected) in [
            (EvmReleaseStatus::Waiting, UserAction::Release),
            (EvmReleaseStatus::InProgress, UserAction::Wait),
            (EvmReleaseStatus::Finished { kind: None }, UserAction::Done),
        ] {
            let view = EverscaleEvmTransferView {
                step_data: everscale_evm_step(),
                deposit: confirmed.clone(),
                release,
            };
            assert_eq!(view.next_action(), expected);
        }
    }

    fn sample_event_data() -> evergate_common::models::event::EverscaleEventData {
        use num_bigint::BigUint;

        use evergate_common::models::event::TonTransferPayload;

        evergate_common::models::event::EverscaleEventData {
            event_transaction_lt: 1,
            event_timestamp: 1_652_000_000,
            event_data: vec![],
            decoded: TonTransferPayload {
                sender: "0:a49cd4e158a9a15555e624759e2e4e766d22600b7800d891e46f9291f044a93d"
                    .parse()
                    .unwrap(),
                tokens: BigUint::from(1u32),
                recipient: alloy_primitives::Address::repeat_byte(0xd3),
                chain_id: 1,
            },
            configuration: "0:c37b3fafca5bf7d3704b081fde7df54f298736ee059bf6d32fac25f5e6085bf6"
                .parse()
                .unwrap(),
            event_contract: "0:9f96b9986fbbaecbe2b4b47dd6c83a27e5afc33e4d8b4f4b1335a0d3dc2cff3e"
                .parse()
                .unwrap(),
            round: 1,
        }
    }

    #[test]
    fn test_views_delegate_url_rendering() {
        let view = EverscaleEvmTransferView {
            step_data: everscale_evm_step(),
            deposit: EverscaleDepositStatus::WaitingForConfirmations,
            release: EvmReleaseStatus::Initializing,
        };
        let url = view.url().unwrap();
        assert!(url.starts_with("/transfer/everscale-1/evm-1/"));
        assert!(url.ends_with("9f96b9986fbbaecbe2b4b47dd6c83a27e5afc33e4d8b4f4b1335a0d3dc2cff3e"));
    }
}
