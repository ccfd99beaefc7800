//! Chain provider abstraction and the alloy-backed implementation
//!
//! Substrate nodes speak plain JSON-RPC 2.0, so alloy's transports are reused
//! with raw requests against the `chain_*`, `state_*` and `system_*` methods.

use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use anyhow::{Context, Result};
use sp_core::crypto::AccountId32;
use tracing::debug;

use super::storage::{
    decode_account_info, decode_moment, from_hex, parse_hash, system_account_key,
    timestamp_now_key, to_hex,
};
use super::ChainError;
use crate::domain::{AccountInfo, GenesisHash, Moment};

/// Provider configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderConfig {
    /// HTTP JSON-RPC endpoint
    Http(String),
    /// WebSocket endpoint
    WebSocket(String),
}

impl ProviderConfig {
    /// Pick the transport from the URL scheme, defaulting to WebSocket
    pub fn from_url(url: &str) -> Self {
        let url = url.trim();
        let lower = url.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            ProviderConfig::Http(url.to_string())
        } else {
            ProviderConfig::WebSocket(url.to_string())
        }
    }

    /// Get display name for this endpoint
    pub fn display(&self) -> String {
        match self {
            ProviderConfig::Http(url) => url.clone(),
            ProviderConfig::WebSocket(url) => url.clone(),
        }
    }

    /// Check if this is a WebSocket endpoint
    pub fn is_websocket(&self) -> bool {
        matches!(self, ProviderConfig::WebSocket(_))
    }
}

/// Abstract chain provider trait
///
/// Covers the reads the initialization routine needs, abstracting over the
/// transport so the routine can run against a stub.
#[async_trait::async_trait]
pub trait ChainProvider: Send + Sync + 'static {
    /// Hash of block zero
    async fn genesis_hash(&self) -> Result<GenesisHash>;

    /// Current `Timestamp.Now` value in milliseconds
    async fn timestamp_now(&self) -> Result<Moment>;

    /// `System.Account` entry for an account
    async fn account(&self, account: &AccountId32) -> Result<AccountInfo>;

    /// Chain name reported by the node (`system_chain`)
    async fn chain_name(&self) -> Result<String>;

    /// Get endpoint display name
    fn endpoint_name(&self) -> String;
}

pub struct JsonRpcProvider {
    provider: DynProvider,
    endpoint: String,
}

/// Create a provider from configuration
pub async fn create_provider(config: ProviderConfig) -> Result<Box<dyn ChainProvider>> {
    let endpoint = config.display();
    let provider = match config {
        ProviderConfig::Http(url) => {
            let rpc_url = url.parse().context("Invalid HTTP URL")?;
            ProviderBuilder::new().connect_http(rpc_url).erased()
        }
        ProviderConfig::WebSocket(url) => ProviderBuilder::new()
            .connect(&url)
            .await
            .context("Failed to create WebSocket provider")?
            .erased(),
    };
    Ok(Box::new(JsonRpcProvider { provider, endpoint }))
}

impl JsonRpcProvider {
    async fn storage(&self, key: Vec<u8>) -> Result<Option<Vec<u8>>> {
        let key = to_hex(&key);
        debug!(%key, "state_getStorage");
        let value: Option<String> = self
            .provider
            .raw_request("state_getStorage".into(), (&key,))
            .await
            .with_context(|| format!("state_getStorage {key}"))?;
        Ok(value.as_deref().map(from_hex).transpose()?)
    }
}

#[async_trait::async_trait]
impl ChainProvider for JsonRpcProvider {
    async fn genesis_hash(&self) -> Result<GenesisHash> {
        let hash: Option<String> = self
            .provider
            .raw_request("chain_getBlockHash".into(), (0u32,))
            .await
            .context("chain_getBlockHash")?;
        let hash = hash.ok_or(ChainError::MissingGenesis)?;
        Ok(parse_hash(&hash)?)
    }

    async fn timestamp_now(&self) -> Result<Moment> {
        let raw = self.storage(timestamp_now_key()).await?;
        Ok(decode_moment(raw.as_deref())?)
    }

    async fn account(&self, account: &AccountId32) -> Result<AccountInfo> {
        let raw = self.storage(system_account_key(account)).await?;
        Ok(decode_account_info(raw.as_deref())?)
    }

    async fn chain_name(&self) -> Result<String> {
        Ok(self
            .provider
            .raw_request("system_chain".into(), ())
            .await
            .context("system_chain")?)
    }

    fn endpoint_name(&self) -> String {
        self.endpoint.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_config_from_url() {
        assert_eq!(
            ProviderConfig::from_url("wss://rpc.polkadot.io"),
            ProviderConfig::WebSocket("wss://rpc.polkadot.io".into())
        );
        assert_eq!(
            ProviderConfig::from_url(" HTTPS://rpc.polkadot.io "),
            ProviderConfig::Http("HTTPS://rpc.polkadot.io".into())
        );
        assert!(ProviderConfig::from_url("ws://127.0.0.1:9944").is_websocket());
        assert!(!ProviderConfig::from_url("http://127.0.0.1:9933").is_websocket());
    }

    #[tokio::test]
    async fn test_invalid_http_url_is_rejected() {
        let err = create_provider(ProviderConfig::Http("http://".into()))
            .await
            .err()
            .expect("bad url");
        assert!(format!("{err:#}").contains("Invalid HTTP URL"));
    }
}
