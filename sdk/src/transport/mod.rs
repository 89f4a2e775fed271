//! # Chain Transport Seams
//!
//! The vault client never talks to a node directly. It goes through two
//! small traits, one per capability:
//!
//! ```text
//! ChainReader  eth_call + receipt lookup       (any connection)
//! ChainWriter  signed transaction submission   (needs an account)
//! ```
//!
//! [`ProviderReader`] and [`ProviderWriter`] implement them over any
//! alloy [`Provider`](alloy::providers::Provider). Tests implement them
//! over in-memory fakes.
//!
//! Both traits speak raw bytes. ABI encoding and decoding happen one layer
//! up, in the typed call builders of [`crate::vault`].

pub mod provider;

use std::sync::Arc;

use alloy::primitives::{Address, Bytes, Log, TxHash};
use async_trait::async_trait;

use crate::error::Result;

pub use provider::{ProviderReader, ProviderWriter};

// ---------------------------------------------------------------------------
// Request / Outcome Records
// ---------------------------------------------------------------------------

/// A contract call to be signed and broadcast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteRequest {
    /// Sending account. Always the signing handle's own account.
    pub from: Address,
    /// Contract being called.
    pub to: Address,
    /// ABI-encoded calldata.
    pub input: Bytes,
    /// Explicit gas limit. `None` lets the node estimate.
    pub gas_limit: Option<u64>,
}

/// What a mined transaction left behind.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionOutcome {
    /// Transaction hash.
    pub hash: TxHash,
    /// `false` when the transaction reverted.
    pub success: bool,
    /// Every log emitted, in order.
    pub logs: Vec<Log>,
}

// ---------------------------------------------------------------------------
// Traits
// ---------------------------------------------------------------------------

/// Read access to the chain.
#[async_trait]
pub trait ChainReader: Send + Sync {
    /// Executes `input` against `to` without a transaction (`eth_call`)
    /// and returns the raw return data.
    async fn call(&self, to: Address, input: Bytes) -> Result<Bytes>;

    /// Waits until `hash` is mined and returns its receipt.
    async fn wait_for_receipt(&self, hash: TxHash) -> Result<TransactionOutcome>;
}

/// Write access to the chain.
#[async_trait]
pub trait ChainWriter: Send + Sync {
    /// Account this handle signs for, if it has one.
    fn account(&self) -> Option<Address>;

    /// Signs and broadcasts `request`, returning as soon as the node
    /// accepts it.
    async fn send(&self, request: WriteRequest) -> Result<TxHash>;
}

#[async_trait]
impl<T: ChainReader + ?Sized> ChainReader for Arc<T> {
    async fn call(&self, to: Address, input: Bytes) -> Result<Bytes> {
        (**self).call(to, input).await
    }

    async fn wait_for_receipt(&self, hash: TxHash) -> Result<TransactionOutcome> {
        (**self).wait_for_receipt(hash).await
    }
}

#[async_trait]
impl<T: ChainWriter + ?Sized> ChainWriter for Arc<T> {
    fn account(&self) -> Option<Address> {
        (**self).account()
    }

    async fn send(&self, request: WriteRequest) -> Result<TxHash> {
        (**self).send(request).await
    }
}
