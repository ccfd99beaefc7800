use thiserror::Error;

/// Errors produced while interpreting node responses
#[derive(Debug, Error)]
pub enum ChainError {
    #[error("invalid SS58 address `{address}`: {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    #[error("expected a 32-byte hash, got {0} bytes")]
    InvalidHash(usize),

    #[error("node returned no genesis hash")]
    MissingGenesis,

    #[error("failed to decode {what}: {source}")]
    Decode {
        what: &'static str,
        #[source]
        source: parity_scale_codec::Error,
    },
}
