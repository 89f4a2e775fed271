//! Error types for vault client operations.
//!
//! Every fallible client call returns a [`VaultError`]. Transport and
//! contract failures are carried through untouched; the client never
//! retries and never reinterprets revert reasons.

use alloy::primitives::TxHash;
use thiserror::Error;

use crate::encode::EncodeError;
use crate::math::MathError;
use crate::units::UnitsError;

/// Convenience alias used throughout the crate.
pub type Result<T, E = VaultError> = std::result::Result<T, E>;

/// Errors returned by [`VaultReader`](crate::VaultReader) and
/// [`VaultClient`](crate::VaultClient).
#[derive(Debug, Error)]
pub enum VaultError {
    /// The signing handle has no account to send from. Raised before any
    /// network call is made.
    #[error("signing handle has no account")]
    MissingAccount,

    /// The node or the contract rejected the call: revert, out-of-gas,
    /// connection failure, and so on.
    #[error("transport error: {0}")]
    Transport(#[from] alloy::transports::TransportError),

    /// Return data did not match the expected ABI shape.
    #[error("abi decode error: {0}")]
    Decode(#[from] alloy::sol_types::Error),

    /// A mined transaction reported failure in its receipt.
    #[error("transaction {hash} reverted")]
    TransactionReverted {
        /// Hash of the reverted transaction.
        hash: TxHash,
    },

    /// The receipt did not show up within the configured bound.
    #[error("no receipt for {hash} after {elapsed_ms}ms (timeout: {timeout_ms}ms)")]
    ReceiptTimeout {
        /// Hash of the transaction being waited on.
        hash: TxHash,
        /// Milliseconds elapsed before giving up.
        elapsed_ms: u64,
        /// Configured timeout in milliseconds.
        timeout_ms: u64,
    },

    /// Share/asset arithmetic failed.
    #[error(transparent)]
    Math(#[from] MathError),

    /// An amount string could not be parsed.
    #[error(transparent)]
    Units(#[from] UnitsError),

    /// Calldata could not be encoded.
    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// The client configuration is unusable (bad URL, bad key, ...).
    #[error("invalid configuration: {0}")]
    Config(String),
}
