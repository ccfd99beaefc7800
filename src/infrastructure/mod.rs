//! Infrastructure layer - External service integrations
//!
//! This layer contains:
//! - The chain provider over alloy's JSON-RPC transports
//! - Storage key derivation and SCALE decoding
//! - Tokio runtime bridge for the initialization routine

pub mod runtime;
pub mod substrate;

pub use runtime::{InitRequest, RuntimeBridge, RuntimeEvent};
