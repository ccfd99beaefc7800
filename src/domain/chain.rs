//! Chain values read during initialization

use std::fmt;

use chrono::{TimeZone, Utc};
use parity_scale_codec::Decode;

/// Milliseconds since the unix epoch, as stored in `Timestamp.Now`
pub type Moment = u64;

/// Hash of block zero
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenesisHash(pub [u8; 32]);

impl GenesisHash {
    /// Lowercase `0x`-prefixed hex
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl fmt::Display for GenesisHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Balances held by an account (`pallet_balances::AccountData`)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Decode)]
pub struct AccountData {
    pub free: u128,
    pub reserved: u128,
    pub frozen: u128,
    pub flags: u128,
}

/// `frame_system::AccountInfo` with balances data
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Decode)]
pub struct AccountInfo {
    pub nonce: u32,
    pub consumers: u32,
    pub providers: u32,
    pub sufficients: u32,
    pub data: AccountData,
}

/// `"{now}: balance of {free} and a nonce of {nonce}"`
pub fn account_summary(now: Moment, account: &AccountInfo) -> String {
    format!(
        "{}: balance of {} and a nonce of {}",
        now, account.data.free, account.nonce
    )
}

/// Human readable UTC time for a millisecond timestamp
pub fn format_moment(now: Moment) -> String {
    i64::try_from(now)
        .ok()
        .and_then(|ms| Utc.timestamp_millis_opt(ms).single())
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S%.3f UTC").to_string())
        .unwrap_or_else(|| format!("{now} ms"))
}
