//! Storage keys and SCALE decoding for the values read at startup

use parity_scale_codec::Decode;
use sp_core::crypto::AccountId32;
use sp_core::hashing::{blake2_128, twox_128};

use super::ChainError;
use crate::domain::{AccountInfo, GenesisHash, Moment};

/// `twox128(pallet) ++ twox128(item)`
fn storage_prefix(pallet: &str, item: &str) -> Vec<u8> {
    let mut key = Vec::with_capacity(32);
    key.extend_from_slice(&twox_128(pallet.as_bytes()));
    key.extend_from_slice(&twox_128(item.as_bytes()));
    key
}

/// Key of `Timestamp.Now`
pub fn timestamp_now_key() -> Vec<u8> {
    storage_prefix("Timestamp", "Now")
}

/// Key of `System.Account(id)`, hashed with `Blake2_128Concat`
pub fn system_account_key(account: &AccountId32) -> Vec<u8> {
    let raw: &[u8; 32] = account.as_ref();
    let mut key = storage_prefix("System", "Account");
    key.extend_from_slice(&blake2_128(raw));
    key.extend_from_slice(raw);
    key
}

pub fn to_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Decode `0x`-prefixed hex as returned by the node
pub fn from_hex(value: &str) -> Result<Vec<u8>, ChainError> {
    let payload = value.strip_prefix("0x").unwrap_or(value);
    Ok(hex::decode(payload)?)
}

pub fn parse_hash(value: &str) -> Result<GenesisHash, ChainError> {
    let bytes = from_hex(value)?;
    let hash: [u8; 32] = bytes
        .as_slice()
        .try_into()
        .map_err(|_| ChainError::InvalidHash(bytes.len()))?;
    Ok(GenesisHash(hash))
}

/// Absent storage decodes to zero, matching the runtime's `ValueQuery` default
pub fn decode_moment(raw: Option<&[u8]>) -> Result<Moment, ChainError> {
    decode_or_default(raw, "Timestamp.Now")
}

/// Accounts that never existed have no entry and decode to the default
pub fn decode_account_info(raw: Option<&[u8]>) -> Result<AccountInfo, ChainError> {
    decode_or_default(raw, "System.Account")
}

fn decode_or_default<T: Decode + Default>(
    raw: Option<&[u8]>,
    what: &'static str,
) -> Result<T, ChainError> {
    match raw {
        None => Ok(T::default()),
        Some(mut bytes) => {
            T::decode(&mut bytes).map_err(|source| ChainError::Decode { what, source })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AccountData;

    #[test]
    fn test_timestamp_now_key() {
        assert_eq!(
            to_hex(&timestamp_now_key()),
            "0xf0c365c3cf59d671eb72da0e7a4113c49f1f0515f462cdcf84e0f1d6045dfcbb"
        );
    }

    #[test]
    fn test_system_account_key_layout() {
        let account = AccountId32::new([7u8; 32]);
        let key = system_account_key(&account);

        assert_eq!(key.len(), 32 + 16 + 32);
        assert_eq!(
            hex::encode(&key[..32]),
            "26aa394eea5630e07c48ae0c9558cef7b99d880ec681799c0cf30e8886371da9"
        );
        assert_eq!(&key[32..48], &blake2_128(&[7u8; 32]));
        assert_eq!(&key[48..], &[7u8; 32]);
    }

    #[test]
    fn test_parse_hash() {
        let hex = format!("0x{}", "aa".repeat(32));
        assert_eq!(parse_hash(&hex).unwrap(), GenesisHash([0xAA; 32]));
        assert_eq!(parse_hash(&"ab".repeat(32)).unwrap(), GenesisHash([0xAB; 32]));
    }

    #[test]
    fn test_parse_hash_rejects_bad_input() {
        assert!(matches!(parse_hash("0x1234"), Err(ChainError::InvalidHash(2))));
        assert!(matches!(parse_hash("0xzz"), Err(ChainError::InvalidHex(_))));
    }

    #[test]
    fn test_decode_moment() {
        let raw = 1000u64.to_le_bytes();
        assert_eq!(decode_moment(Some(&raw)).unwrap(), 1000);
        assert_eq!(decode_moment(None).unwrap(), 0);
        assert!(decode_moment(Some(&[1, 2, 3])).is_err());
    }

    #[test]
    fn test_decode_account_info() {
        let mut raw = Vec::new();
        raw.extend_from_slice(&5u32.to_le_bytes()); // nonce
        raw.extend_from_slice(&1u32.to_le_bytes()); // consumers
        raw.extend_from_slice(&2u32.to_le_bytes()); // providers
        raw.extend_from_slice(&0u32.to_le_bytes()); // sufficients
        raw.extend_from_slice(&500u128.to_le_bytes()); // free
        raw.extend_from_slice(&10u128.to_le_bytes()); // reserved
        raw.extend_from_slice(&3u128.to_le_bytes()); // frozen
        raw.extend_from_slice(&(1u128 << 127).to_le_bytes()); // flags

        let info = decode_account_info(Some(&raw)).unwrap();
        assert_eq!(
            info,
            AccountInfo {
                nonce: 5,
                consumers: 1,
                providers: 2,
                sufficients: 0,
                data: AccountData {
                    free: 500,
                    reserved: 10,
                    frozen: 3,
                    flags: 1u128 << 127,
                },
            }
        );
    }

    #[test]
    fn test_decode_account_info_missing_and_truncated() {
        assert_eq!(decode_account_info(None).unwrap(), AccountInfo::default());

        let err = decode_account_info(Some(&[0u8; 20])).unwrap_err();
        assert!(matches!(err, ChainError::Decode { what: "System.Account", .. }));
    }
}
