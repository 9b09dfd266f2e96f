//! Withdrawal event payloads on the EVM side: ABI encoding of the event
//! tuple `saveWithdraw` consumes, withdraw id derivation and receipt log
//! classification.

use alloy_primitives::{Address, B256, U256};
use ethabi::Token;
use tiny_keccak::{Hasher, Keccak};

use evergate_common::models::event::EverscaleEventData;

use crate::{
    client::{EvmLog, TxReceipt},
    errors::EvmClientError,
};

const INSTANT_WITHDRAWAL_SIGNATURE: &str = "InstantWithdrawal(bytes32,address,uint256)";
const PENDING_WITHDRAWAL_CREATED_SIGNATURE: &str =
    "PendingWithdrawalCreated(address,uint256,uint256,bytes32)";
const FACTORY_DEPOSIT_SIGNATURE: &str =
    "FactoryDeposit(uint128,int8,uint256,uint256,uint256,uint256,uint128,uint8,uint128,uint128,bytes1,bytes)";
const DEPOSIT_SIGNATURE: &str = "Deposit(uint256,int128,uint256)";

pub fn keccak256(data: &[u8]) -> B256 {
    let mut hasher = Keccak::v256();
    let mut output = [0u8; 32];
    hasher.update(data);
    hasher.finalize(&mut output);
    B256::from(output)
}

pub fn instant_withdrawal_topic() -> B256 {
    keccak256(INSTANT_WITHDRAWAL_SIGNATURE.as_bytes())
}

pub fn pending_withdrawal_created_topic() -> B256 {
    keccak256(PENDING_WITHDRAWAL_CREATED_SIGNATURE.as_bytes())
}

pub fn factory_deposit_topic() -> B256 {
    keccak256(FACTORY_DEPOSIT_SIGNATURE.as_bytes())
}

pub fn deposit_topic() -> B256 {
    keccak256(DEPOSIT_SIGNATURE.as_bytes())
}

fn int8_token(value: i8) -> Token {
    // Sign-extend to the full 256-bit two's complement word.
    let mut word = [if value < 0 { 0xff } else { 0x00 }; 32];
    word[31] = value as u8;
    Token::Int(ethabi::Int::from_big_endian(&word))
}

fn uint256_token(value: U256) -> Token {
    Token::Uint(ethabi::Uint::from_big_endian(&value.to_be_bytes::<32>()))
}

/// ABI-encodes the event tuple `saveWithdraw` expects. `mapped_event_data`
/// is the event cell already re-encoded into the flat EVM byte layout.
pub fn encode_ton_event(
    event: &EverscaleEventData,
    mapped_event_data: &[u8],
    proxy: Address,
) -> Vec<u8> {
    ethabi::encode(&[Token::Tuple(vec![
        Token::Uint(event.event_transaction_lt.into()),
        Token::Uint(event.event_timestamp.into()),
        Token::Bytes(mapped_event_data.to_vec()),
        int8_token(event.configuration.workchain),
        uint256_token(event.configuration.address),
        int8_token(event.event_contract.workchain),
        uint256_token(event.event_contract.address),
        Token::Address(ethabi::Address::from_slice(proxy.as_slice())),
        Token::Uint(event.round.into()),
    ])])
}

/// Withdrawal identifier the vault books a release under. Derived from the
/// encoded event tuple, so both sides compute the same id independently.
pub fn withdraw_id(encoded_event: &[u8]) -> B256 {
    keccak256(encoded_event)
}

/// How the vault settled a `saveWithdraw` submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseKind {
    /// Tokens were paid out within the call.
    Instant,
    /// The vault lacked liquidity and queued a pending withdrawal instead.
    Pending,
}

/// Classifies a mined release transaction receipt. An `InstantWithdrawal`
/// log means the vault paid out within the call; its absence means the vault
/// queued a pending withdrawal instead. `None` only when the receipt does
/// not target the vault at all, which happens when the release tx hash in
/// the transfer URL was tampered with; callers log and keep polling.
pub fn classify_release_receipt(receipt: &TxReceipt, vault: Address) -> Option<ReleaseKind> {
    if receipt.to != Some(vault) {
        return None;
    }
    let instant = instant_withdrawal_topic();
    if receipt
        .logs
        .iter()
        .any(|log| log.address == vault && log.topic0() == Some(instant))
    {
        Some(ReleaseKind::Instant)
    } else {
        Some(ReleaseKind::Pending)
    }
}

/// Finds the `FactoryDeposit` log of a credit deposit transaction. Its
/// presence is what distinguishes a credit deposit from a plain one.
pub fn find_factory_deposit_log(receipt: &TxReceipt) -> Option<&EvmLog> {
    let topic = factory_deposit_topic();
    receipt.logs.iter().find(|log| log.topic0() == Some(topic))
}

/// Finds the vault's `Deposit` log of a plain deposit transaction.
pub fn find_deposit_log(receipt: &TxReceipt, vault: Address) -> Option<&EvmLog> {
    let topic = deposit_topic();
    receipt
        .logs
        .iter()
        .find(|log| log.address == vault && log.topic0() == Some(topic))
}

/// Orders relay signatures the way `saveWithdraw` requires: ascending by the
/// numeric value of the recovered signer address.
pub fn sort_signatures_by_signer(
    payload: &[u8],
    signatures: Vec<Vec<u8>>,
    recover: impl Fn(&[u8], &[u8]) -> Result<Address, EvmClientError>,
) -> Result<Vec<Vec<u8>>, EvmClientError> {
    let mut keyed = signatures
        .into_iter()
        .map(|signature| {
            let signer = recover(payload, &signature)?;
            Ok((signer, signature))
        })
        .collect::<Result<Vec<_>, EvmClientError>>()?;
    keyed.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(keyed.into_iter().map(|(_, signature)| signature).collect())
}

#[cfg(test)]
mod tests {
    use ethabi::ParamType;
    use evergate_common::models::event::TonTransferPayload;

    use super::*;

    fn sample_event() -> EverscaleEventData {
        EverscaleEventData {
            event_transaction_lt: 21_968_000_000_001,
            event_timestamp: 1_652_000_000,
            event_data: vec![0xb5, 0xee, 0x9c, 0x72],
            decoded: TonTransferPayload {
                sender: "0:a49cd4e158a9a15555e624759e2e4e766d22600b7800d891e46f9291f044a93d"
                    .parse()
                    .unwrap(),
                tokens: 1_000_000u64.into(),
                recipient: "0xd3CdA913deB6f67967B99D67aCDFa1712C293601".parse().unwrap(),
                chain_id: 1,
            },
            configuration: "-1:9f96b9986fbbaecbe2b4b47dd6c83a27e5afc33e4d8b4f4b1335a0d3dc2cff3e"
                .parse()
                .unwrap(),
            event_contract: "0:3dd3b50da6b1a2c59e615c8e5dc99c0f25c5eb523b370b21a26e111b21ba9ed8"
                .parse()
                .unwrap(),
            round: 7,
        }
    }

    fn ton_event_param_types() -> Vec<ParamType> {
        vec![ParamType::Tuple(vec![
            ParamType::Uint(64),
            ParamType::Uint(32),
            ParamType::Bytes,
            ParamType::Int(8),
            ParamType::Uint(256),
            ParamType::Int(8),
            ParamType::Uint(256),
            ParamType::Address,
            ParamType::Uint(32),
        ])]
    }

    #[test]
    fn test_encoded_event_decodes_back() {
        let event = sample_event();
        let proxy: Address = "0x81598d5362eAC63310e5719315497C5b8980C579".parse().unwrap();
        let mapped = vec![1u8, 2, 3, 4];

        let encoded = encode_ton_event(&event, &mapped, proxy);
        let decoded = ethabi::decode(&ton_event_param_types(), &encoded).unwrap();
        let Token::Tuple(fields) = &decoded[0] else {
            panic!("expected tuple");
        };

        assert_eq!(fields[0], Token::Uint(event.event_transaction_lt.into()));
        assert_eq!(fields[1], Token::Uint(event.event_timestamp.into()));
        assert_eq!(fields[2], Token::Bytes(mapped));
        // Workchain -1 must come out as a sign-extended int8.
        assert_eq!(fields[3], Token::Int(ethabi::Int::MAX));
        assert_eq!(fields[7], Token::Address(ethabi::Address::from_slice(proxy.as_slice())));
        assert_eq!(fields[8], Token::Uint(7.into()));
    }

    #[test]
    fn test_withdraw_id_depends_on_event_fields() {
        let event = sample_event();
        let proxy: Address = "0x81598d5362eAC63310e5719315497C5b8980C579".parse().unwrap();
        let id = withdraw_id(&encode_ton_event(&event, &[1, 2, 3], proxy));

        let mut other_round = sample_event();
        other_round.round += 1;
        let other_id = withdraw_id(&encode_ton_event(&other_round, &[1, 2, 3], proxy));

        assert_ne!(id, other_id);
        // Deterministic for identical input.
        assert_eq!(id, withdraw_id(&encode_ton_event(&event, &[1, 2, 3], proxy)));
    }

    #[test]
    fn test_sort_signatures_by_recovered_signer() {
        // Fake recovery: the first signature byte selects the signer address.
        let recover = |_payload: &[u8], signature: &[u8]| {
            let mut bytes = [0u8; 20];
            bytes[0] = signature[0];
            Ok(Address::from(bytes))
        };
        let sorted = sort_signatures_by_signer(
            b"payload",
            vec![vec![0xbb, 1], vec![0xaa, 2], vec![0xcc, 3]],
            recover,
        )
        .unwrap();
        assert_eq!(sorted, vec![vec![0xaa, 2], vec![0xbb, 1], vec![0xcc, 3]]);
    }

    fn release_receipt(vault: Address, logs: Vec<EvmLog>) -> TxReceipt {
        TxReceipt {
            transaction_hash: B256::repeat_byte(1),
            to: Some(vault),
            block_number: 100,
            block_hash: B256::repeat_byte(2),
            logs,
        }
    }

    #[test]
    fn test_instant_withdrawal_log_classifies_instant() {
        let vault: Address = "0x81598d5362eAC63310e5719315497C5b8980C579".parse().unwrap();
        let receipt = release_receipt(
            vault,
            vec![
                // Unrelated log from another contract does not count.
                EvmLog {
                    address: Address::repeat_byte(9),
                    topics: vec![instant_withdrawal_topic()],
                    data: vec![],
                    log_index: 0,
                },
                EvmLog {
                    address: vault,
                    topics: vec![instant_withdrawal_topic(), B256::repeat_byte(0x42)],
                    data: vec![],
                    log_index: 1,
                },
            ],
        );
        assert_eq!(classify_release_receipt(&receipt, vault), Some(ReleaseKind::Instant));
    }

    #[test]
    fn test_receipt_without_instant_log_classifies_pending() {
        let vault: Address = "0x81598d5362eAC63310e5719315497C5b8980C579".parse().unwrap();
        // A queued release carries a PendingWithdrawalCreated log, but the
        // classification keys on the absence of InstantWithdrawal alone.
        let receipt = release_receipt(
            vault,
            vec![EvmLog {
                address: vault,
                topics: vec![pending_withdrawal_created_topic(), B256::repeat_byte(0x42)],
                data: vec![],
                log_index: 0,
            }],
        );
        assert_eq!(classify_release_receipt(&receipt, vault), Some(ReleaseKind::Pending));

        let bare = release_receipt(vault, vec![]);
        assert_eq!(classify_release_receipt(&bare, vault), Some(ReleaseKind::Pending));
    }

    #[test]
    fn test_receipt_for_another_contract_is_not_classified() {
        let vault: Address = "0x81598d5362eAC63310e5719315497C5b8980C579".parse().unwrap();
        let mut receipt = release_receipt(vault, vec![]);
        receipt.to = Some(Address::repeat_byte(9));
        assert_eq!(classify_release_receipt(&receipt, vault), None);
    }
}
