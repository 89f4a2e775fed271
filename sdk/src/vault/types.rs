//! Records returned by the vault clients and option structs accepted by
//! their write operations.
//!
//! All of these are request-scoped values. The contract is the system of
//! record; nothing here is cached or persisted by the client.

use alloy::primitives::{Address, Bytes, TxHash, U256};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Read Records
// ---------------------------------------------------------------------------

/// Snapshot of vault-wide accounting.
///
/// Assembled from independent reads that may land on different blocks;
/// see [`VaultReader::get_vault_state`](super::VaultReader::get_vault_state).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultState {
    /// Assets under management, in asset units.
    pub total_assets: U256,
    /// Shares outstanding.
    pub total_supply: U256,
    /// `total_assets * 10^18 / total_supply`, or `10^18` for an empty vault.
    pub price_per_share: U256,
    /// Assets deployed in external protocols, as last reported.
    pub aggregated_underlying_balances: U256,
    /// Assets reserved for queued redemptions.
    pub total_pending_assets: U256,
    /// Assets available for instant withdrawal.
    pub available_balance: U256,
    /// Whether deposits and redemptions are paused.
    pub is_paused: bool,
    /// Block of the last `updateBalance`.
    pub last_block_updated: U256,
    /// Price per share recorded at the last `updateBalance`.
    pub last_price_per_share: U256,
}

/// A queued redemption that has not been fulfilled yet.
///
/// Both fields are zero when the user has nothing pending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingRedeem {
    /// Assets owed once the request is fulfilled.
    pub assets: U256,
    /// Shares locked in the request.
    pub shares: U256,
}

impl PendingRedeem {
    /// `true` when nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.assets.is_zero() && self.shares.is_zero()
    }
}

/// One account's stake in the vault.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPosition {
    /// Share balance.
    pub shares: U256,
    /// `previewRedeem(shares)`, or zero without shares.
    pub assets: U256,
    /// Queued redemption, if any.
    pub pending_redeem: PendingRedeem,
    /// Most assets the account can withdraw right now.
    pub max_withdraw: U256,
    /// Most shares the account can redeem right now.
    pub max_redeem: U256,
}

/// Share token metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultMetadata {
    /// Token name.
    pub name: String,
    /// Token symbol.
    pub symbol: String,
    /// Share decimals.
    pub decimals: u8,
}

// ---------------------------------------------------------------------------
// Write Results
// ---------------------------------------------------------------------------

/// Outcome of `deposit` or `mint`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositResult {
    /// Transaction hash.
    pub hash: TxHash,
    /// For `deposit`, the shares previewed before submission; the amount
    /// actually minted can differ if the vault moved in between. For
    /// `mint`, the requested share amount.
    pub shares: U256,
}

/// Outcome of `requestRedeem`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedeemResult {
    /// Transaction hash.
    pub hash: TxHash,
    /// Assets paid out for an instant redemption; zero when queued.
    pub value: U256,
    /// Whether the redemption settled immediately.
    pub is_instant: bool,
}

/// Outcome of `manage`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManageResult {
    /// Transaction hash.
    pub hash: TxHash,
    /// The calldata that was forwarded.
    pub data: Bytes,
}

/// Outcome of `manageBatch`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManageBatchResult {
    /// Transaction hash.
    pub hash: TxHash,
}

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Options for `deposit`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DepositOptions {
    /// Share recipient. Defaults to the signer.
    pub receiver: Option<Address>,
    /// Slippage bound. Carried for callers; not checked by the client.
    pub max_assets: Option<U256>,
}

impl DepositOptions {
    /// Deposit on behalf of `receiver`.
    pub fn to(receiver: Address) -> Self {
        Self {
            receiver: Some(receiver),
            ..Self::default()
        }
    }
}

/// Options for `mint`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MintOptions {
    /// Share recipient. Defaults to the signer.
    pub receiver: Option<Address>,
    /// Slippage bound. Carried for callers; not checked by the client.
    pub max_shares: Option<U256>,
}

/// Options for `requestRedeem`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RedeemOptions {
    /// Asset recipient. Defaults to the signer.
    pub receiver: Option<Address>,
    /// Share owner. Defaults to the signer.
    pub owner: Option<Address>,
    /// Slippage bound. Carried for callers; not checked by the client.
    pub min_assets: Option<U256>,
}

/// Options for `manage`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManageOptions {
    /// Native value the vault forwards with the call. Defaults to zero.
    pub value: Option<U256>,
    /// Gas limit for the transaction.
    pub gas_limit: Option<u64>,
}

/// Options for `manageBatch`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManageBatchOptions {
    /// Gas limit for the transaction.
    pub gas_limit: Option<u64>,
}
