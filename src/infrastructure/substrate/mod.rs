//! Substrate infrastructure - chain provider over alloy's JSON-RPC transport

mod address;
mod error;
mod provider;
pub(crate) mod storage;

pub use address::{parse_address, AccountId32};
pub use error::ChainError;
pub use provider::{create_provider, ChainProvider, JsonRpcProvider, ProviderConfig};
