//! Error taxonomy for the modulation pipeline
//!
//! Every error is a caller misuse of parameters. Nothing here is transient
//! and nothing is retried.

/// Result type for modem operations
pub type Result<T> = std::result::Result<T, ModemError>;

/// Errors raised by the modulation pipeline
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModemError {
    #[error("Invalid modulation scheme: {0:?}. Must be one of ASK, FSK, BPSK, QPSK, QAM16")]
    InvalidScheme(String),

    #[error("Invalid bit length: {len} is not a positive multiple of {bits_per_symbol} bits per symbol")]
    InvalidBitLength { len: usize, bits_per_symbol: usize },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

impl ModemError {
    pub(crate) fn param(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }
}
