// Copyright (c) 2026 Elitra Contributors. MIT License.
// See LICENSE for details.

//! # Elitra SDK — Vault Client Library
//!
//! Typed access to an Elitra vault: an ERC-4626 tokenized vault with a
//! redemption queue and a privileged `manage` entry point that lets an
//! authorized operator route vault assets into other protocols.
//!
//! The SDK owns no state of its own. Every number it returns comes from the
//! deployed contract, and every rule (share pricing, pause gating, queueing,
//! authorization) is enforced on-chain. What lives here is marshalling:
//! ABI encoding, concurrent reads, receipt parsing, and a handful of pure
//! helpers for unit conversion and display.
//!
//! ## Architecture
//!
//! - **abi**: `sol!` bindings for the vault, ERC-20 and ERC-4626 surfaces.
//! - **transport**: the `ChainReader` / `ChainWriter` seams and their
//!   alloy-provider implementations.
//! - **vault**: `VaultReader` (read-only) and `VaultClient` (read-write).
//! - **math**: share/asset conversion, price per share, APY.
//! - **units**: decimal formatting and parsing of token amounts.
//! - **encode**: calldata builders for `manage` / `manageBatch`.
//! - **config**: constants and client configuration.
//!
//! ## Example
//!
//! ```no_run
//! use alloy::primitives::{address, U256};
//! use elitra_sdk::transport::{ProviderReader, ProviderWriter};
//! use elitra_sdk::vault::{DepositOptions, VaultReader};
//!
//! # async fn run() -> elitra_sdk::Result<()> {
//! let vault = address!("0x1111111111111111111111111111111111111111");
//! let reader = ProviderReader::connect_http("https://evm-rpc.sei-apis.com")?;
//! let writer = ProviderWriter::connect_http("https://evm-rpc.sei-apis.com", "0x...")?;
//!
//! let client = VaultReader::new(vault, reader).with_signer(writer);
//! let state = client.reader().get_vault_state().await?;
//! println!("pps = {}", elitra_sdk::units::format_shares_default(state.price_per_share));
//!
//! let deposit = client
//!     .deposit(U256::from(100_000_000u64), DepositOptions::default())
//!     .await?;
//! println!("tx {} -> ~{} shares", deposit.hash, deposit.shares);
//! # Ok(())
//! # }
//! ```

pub mod abi;
pub mod config;
pub mod encode;
pub mod math;
pub mod transport;
pub mod units;
pub mod vault;

mod error;

pub use config::ClientConfig;
pub use error::{Result, VaultError};
pub use vault::{VaultClient, VaultReader};
