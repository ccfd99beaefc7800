//! SS58 account addresses

pub use sp_core::crypto::AccountId32;
use sp_core::crypto::Ss58Codec;

use super::ChainError;

/// Parse an SS58 address regardless of its network prefix
pub fn parse_address(address: &str) -> Result<AccountId32, ChainError> {
    let trimmed = address.trim();
    AccountId32::from_ss58check_with_version(trimmed)
        .map(|(account, _format)| account)
        .map_err(|err| ChainError::InvalidAddress {
            address: trimmed.to_string(),
            reason: format!("{err:?}"),
        })
}
