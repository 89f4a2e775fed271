//! # Vault Clients
//!
//! Two clients, split by capability:
//!
//! ```text
//! VaultReader<R>      reads only; needs a ChainReader
//! VaultClient<R, W>   reads + writes; adds a swappable ChainWriter
//! ```
//!
//! A reader becomes a client with [`VaultReader::with_signer`], so
//! "can this value send transactions?" is answered by its type instead of
//! a runtime null check. The only write precondition left for runtime is a
//! signing handle that has no account.
//!
//! ## Calls
//!
//! Both clients route through one typed call builder each
//! ([`VaultReader::read`] and [`VaultClient::submit`]), parameterized over
//! the `sol!`-generated call structs in [`crate::abi`]. Argument and return
//! shapes are fixed at compile time.
//!
//! ## Consistency
//!
//! Aggregate reads (`get_vault_state`, `get_user_position`) fan out
//! concurrently without pinning a block. Each field is individually
//! correct; together they may straddle a block boundary.

mod client;
mod reader;
mod types;

pub use client::VaultClient;
pub use reader::VaultReader;
pub use types::{
    DepositOptions, DepositResult, ManageBatchOptions, ManageBatchResult, ManageOptions,
    ManageResult, MintOptions, PendingRedeem, RedeemOptions, RedeemResult, UserPosition,
    VaultMetadata, VaultState,
};
