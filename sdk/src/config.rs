//! # Client Configuration & Constants
//!
//! Every fixed number the SDK relies on lives here, next to the
//! [`ClientConfig`] record callers use to describe a connection. The
//! SDK never reads environment variables or files on its own; callers
//! build a `ClientConfig` in code or deserialize one from JSON.

use std::time::Duration;

use alloy::primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::error::VaultError;

// ---------------------------------------------------------------------------
// Fixed-Point Parameters
// ---------------------------------------------------------------------------

/// Decimal exponent of the price-per-share fixed-point scale.
pub const PPS_DECIMALS: u8 = 18;

/// Price-per-share scale: 1.0 is represented as 10^18.
///
/// Also the price reported for an empty vault (zero supply).
pub const PPS_SCALE: U256 = U256::from_limbs([1_000_000_000_000_000_000, 0, 0, 0]);

// ---------------------------------------------------------------------------
// Display Defaults
// ---------------------------------------------------------------------------

/// Decimals assumed by the formatting helpers when the caller does not
/// pass any. Vault shares use 18.
pub const DEFAULT_DECIMALS: u8 = 18;

/// Fractional digits shown by [`crate::units::format_shares_default`].
pub const DEFAULT_PRECISION: usize = 4;

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// Julian year in seconds (365.25 days). Used to annualize returns.
pub const SECONDS_PER_YEAR: f64 = 365.25 * 24.0 * 60.0 * 60.0;

/// How often a pending transaction's receipt is polled.
pub const DEFAULT_RECEIPT_POLL_INTERVAL: Duration = Duration::from_millis(1_000);

/// Same as [`DEFAULT_RECEIPT_POLL_INTERVAL`], in milliseconds, for serde
/// defaults.
pub const DEFAULT_RECEIPT_POLL_INTERVAL_MS: u64 = 1_000;

// ---------------------------------------------------------------------------
// ClientConfig
// ---------------------------------------------------------------------------

/// Connection settings for a vault client.
///
/// Only `vault_address` and `rpc_url` are required. Without a
/// `receipt_timeout_ms` the client waits for receipts for as long as the
/// node keeps answering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Address of the deployed vault contract.
    pub vault_address: Address,
    /// JSON-RPC endpoint of the node.
    pub rpc_url: String,
    /// Receipt polling interval in milliseconds.
    #[serde(default = "default_poll_interval_ms")]
    pub receipt_poll_interval_ms: u64,
    /// Upper bound on a receipt wait, in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt_timeout_ms: Option<u64>,
}

fn default_poll_interval_ms() -> u64 {
    DEFAULT_RECEIPT_POLL_INTERVAL_MS
}

impl ClientConfig {
    /// Creates a config with default receipt polling and no timeout.
    pub fn new(vault_address: Address, rpc_url: impl Into<String>) -> Self {
        Self {
            vault_address,
            rpc_url: rpc_url.into(),
            receipt_poll_interval_ms: DEFAULT_RECEIPT_POLL_INTERVAL_MS,
            receipt_timeout_ms: None,
        }
    }

    /// Parses a config from JSON.
    ///
    /// ```
    /// let cfg = elitra_sdk::ClientConfig::from_json(r#"{
    ///     "vault_address": "0x1111111111111111111111111111111111111111",
    ///     "rpc_url": "http://127.0.0.1:8545"
    /// }"#).unwrap();
    /// assert_eq!(cfg.receipt_poll_interval_ms, 1_000);
    /// ```
    pub fn from_json(json: &str) -> Result<Self, VaultError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| VaultError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Sets an upper bound on receipt waits.
    pub fn with_receipt_timeout(mut self, timeout: Duration) -> Self {
        self.receipt_timeout_ms = Some(timeout.as_millis() as u64);
        self
    }

    /// Sets the receipt polling interval.
    pub fn with_receipt_poll_interval(mut self, interval: Duration) -> Self {
        self.receipt_poll_interval_ms = interval.as_millis() as u64;
        self
    }

    /// Receipt polling interval as a `Duration`.
    pub fn receipt_poll_interval(&self) -> Duration {
        Duration::from_millis(self.receipt_poll_interval_ms)
    }

    /// Receipt timeout as a `Duration`, if one is configured.
    pub fn receipt_timeout(&self) -> Option<Duration> {
        self.receipt_timeout_ms.map(Duration::from_millis)
    }

    /// Rejects configs that cannot possibly work.
    pub fn validate(&self) -> Result<(), VaultError> {
        if self.vault_address.is_zero() {
            return Err(VaultError::Config("vault address is the zero address".into()));
        }
        if self.rpc_url.trim().is_empty() {
            return Err(VaultError::Config("rpc url is empty".into()));
        }
        if self.receipt_poll_interval_ms == 0 {
            return Err(VaultError::Config("receipt poll interval must be non-zero".into()));
        }
        Ok(())
    }
}
