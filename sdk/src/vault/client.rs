//! Read-write vault client.

use std::sync::Arc;

use alloy::primitives::{Address, Bytes, TxHash, U256};
use alloy::sol_types::{SolCall, SolEvent};
use parking_lot::RwLock;

use super::reader::VaultReader;
use super::types::{
    DepositOptions, DepositResult, ManageBatchOptions, ManageBatchResult, ManageOptions,
    ManageResult, MintOptions, RedeemOptions, RedeemResult,
};
use crate::abi::IElitraVault;
use crate::error::{Result, VaultError};
use crate::transport::{ChainReader, ChainWriter, TransactionOutcome, WriteRequest};

/// Read-write access to one vault.
///
/// Wraps a [`VaultReader`] (reads go through [`reader`](Self::reader))
/// and a signing handle. Every write starts by taking the
/// handle's account; a handle without one fails with
/// [`VaultError::MissingAccount`] before anything is sent.
///
/// The handle can be replaced at any time with [`set_signer`](Self::set_signer).
/// A write already in flight keeps the handle it started with.
///
/// Writes return once the node accepts the transaction, without waiting
/// for it to be mined. [`request_redeem`](Self::request_redeem) is the one
/// exception: it needs the receipt to learn whether the redemption was
/// instant.
pub struct VaultClient<R, W> {
    reader: VaultReader<R>,
    signer: RwLock<Arc<W>>,
}

impl<R: ChainReader, W: ChainWriter> VaultClient<R, W> {
    /// Combines a reader with a signing handle.
    pub fn new(reader: VaultReader<R>, signer: W) -> Self {
        Self {
            reader,
            signer: RwLock::new(Arc::new(signer)),
        }
    }

    /// The read-only half.
    pub fn reader(&self) -> &VaultReader<R> {
        &self.reader
    }

    /// The current signing handle.
    pub fn signer(&self) -> Arc<W> {
        Arc::clone(&self.signer.read())
    }

    /// Replaces the signing handle, e.g. to switch accounts.
    pub fn set_signer(&self, signer: W) {
        *self.signer.write() = Arc::new(signer);
    }

    /// Drops write capability.
    pub fn into_reader(self) -> VaultReader<R> {
        self.reader
    }

    // -----------------------------------------------------------------------
    // Submission
    // -----------------------------------------------------------------------

    /// Snapshots the signing handle and its account.
    fn sender(&self) -> Result<(Arc<W>, Address)> {
        let signer = self.signer();
        let account = signer.account().ok_or(VaultError::MissingAccount)?;
        Ok((signer, account))
    }

    async fn send_with<C: SolCall>(
        &self,
        signer: &W,
        from: Address,
        call: &C,
        gas_limit: Option<u64>,
    ) -> Result<TxHash> {
        let vault = self.reader.vault_address();
        let request = WriteRequest {
            from,
            to: vault,
            input: call.abi_encode().into(),
            gas_limit,
        };
        let hash = signer.send(request).await?;
        tracing::info!(
            vault = %vault,
            function = C::SIGNATURE,
            from = %from,
            hash = %hash,
            "transaction submitted"
        );
        Ok(hash)
    }

    /// Signs and sends a typed vault call from the current signer.
    ///
    /// All named write methods go through here; it is public so callers can
    /// reach vault functions this crate has no wrapper for.
    pub async fn submit<C: SolCall>(&self, call: C, gas_limit: Option<u64>) -> Result<TxHash> {
        let (signer, from) = self.sender()?;
        self.send_with(&signer, from, &call, gas_limit).await
    }

    // -----------------------------------------------------------------------
    // User Operations
    // -----------------------------------------------------------------------

    /// Deposits `assets` and returns the shares previewed beforehand.
    ///
    /// The preview and the deposit are separate round trips, so the shares
    /// actually minted can differ if the vault moves in between.
    /// `options.max_assets` is not checked.
    pub async fn deposit(&self, assets: U256, options: DepositOptions) -> Result<DepositResult> {
        let (signer, from) = self.sender()?;
        let receiver = options.receiver.unwrap_or(from);

        let shares = self.reader.preview_deposit(assets).await?;
        let call = IElitraVault::depositCall { assets, receiver };
        let hash = self.send_with(&signer, from, &call, None).await?;

        Ok(DepositResult { hash, shares })
    }

    /// Mints exactly `shares`; the vault pulls whatever assets that costs.
    ///
    /// The returned `shares` echoes the request. `options.max_shares` is
    /// not checked.
    pub async fn mint(&self, shares: U256, options: MintOptions) -> Result<DepositResult> {
        let (signer, from) = self.sender()?;
        let receiver = options.receiver.unwrap_or(from);

        let call = IElitraVault::mintCall { shares, receiver };
        let hash = self.send_with(&signer, from, &call, None).await?;

        Ok(DepositResult { hash, shares })
    }

    /// Requests redemption of `shares` and waits for the receipt.
    ///
    /// The vault either pays out immediately or queues the request; the
    /// `RedeemRequest` event it emits says which. Queued requests report a
    /// `value` of zero.
    ///
    /// If the transaction succeeded but emitted no `RedeemRequest`, the
    /// result falls back to a fresh `previewRedeem` estimate marked as
    /// instant, and a warning is logged. A reverted transaction is an
    /// error. `options.min_assets` is not checked.
    pub async fn request_redeem(&self, shares: U256, options: RedeemOptions) -> Result<RedeemResult> {
        let (signer, from) = self.sender()?;
        let receiver = options.receiver.unwrap_or(from);
        let owner = options.owner.unwrap_or(from);

        let call = IElitraVault::requestRedeemCall {
            shares,
            receiver,
            owner,
        };
        let hash = self.send_with(&signer, from, &call, None).await?;

        let outcome = self.reader.chain().wait_for_receipt(hash).await?;
        if !outcome.success {
            return Err(VaultError::TransactionReverted { hash });
        }

        if let Some(event) = self.find_redeem_event(&outcome) {
            let value = if event.instant { event.assets } else { U256::ZERO };
            tracing::info!(hash = %hash, instant = event.instant, value = %value, "redeem settled");
            return Ok(RedeemResult {
                hash,
                value,
                is_instant: event.instant,
            });
        }

        tracing::warn!(
            hash = %hash,
            "no RedeemRequest event in receipt; assuming instant redemption at preview value"
        );
        let value = self.reader.preview_redeem(shares).await?;
        Ok(RedeemResult {
            hash,
            value,
            is_instant: true,
        })
    }

    /// First `RedeemRequest` emitted by this vault in `outcome`.
    fn find_redeem_event(&self, outcome: &TransactionOutcome) -> Option<IElitraVault::RedeemRequest> {
        let vault = self.reader.vault_address();
        outcome
            .logs
            .iter()
            .filter(|log| log.address == vault)
            .find_map(|log| IElitraVault::RedeemRequest::decode_log_data(&log.data).ok())
    }

    // -----------------------------------------------------------------------
    // Privileged Operations
    // -----------------------------------------------------------------------

    /// Has the vault call `target` with `data`, forwarding `options.value`.
    ///
    /// The payload is not inspected. Whether the signer may make this call,
    /// and whether `target`/selector are allowed, is decided on-chain.
    pub async fn manage(&self, target: Address, data: Bytes, options: ManageOptions) -> Result<ManageResult> {
        let (signer, from) = self.sender()?;
        let call = IElitraVault::manageCall {
            target,
            data: data.clone(),
            value: options.value.unwrap_or(U256::ZERO),
        };
        let hash = self.send_with(&signer, from, &call, options.gas_limit).await?;
        Ok(ManageResult { hash, data })
    }

    /// Has the vault perform several calls in order, in one transaction.
    ///
    /// `targets`, `data` and `values` are positional; the contract rejects
    /// mismatched lengths.
    pub async fn manage_batch(
        &self,
        targets: Vec<Address>,
        data: Vec<Bytes>,
        values: Vec<U256>,
        options: ManageBatchOptions,
    ) -> Result<ManageBatchResult> {
        let (signer, from) = self.sender()?;
        let call = IElitraVault::manageBatchCall {
            targets,
            data,
            values,
        };
        let hash = self.send_with(&signer, from, &call, options.gas_limit).await?;
        Ok(ManageBatchResult { hash })
    }

    /// Reports the assets held across external protocols.
    pub async fn update_balance(&self, new_aggregated_balance: U256) -> Result<TxHash> {
        self.submit(
            IElitraVault::updateBalanceCall {
                newAggregatedBalance: new_aggregated_balance,
            },
            None,
        )
        .await
    }

    /// Pauses the vault.
    pub async fn pause(&self) -> Result<TxHash> {
        self.submit(IElitraVault::pauseCall {}, None).await
    }

    /// Unpauses the vault.
    pub async fn unpause(&self) -> Result<TxHash> {
        self.submit(IElitraVault::unpauseCall {}, None).await
    }

    /// Settles a queued redemption for `receiver`.
    pub async fn fulfill_redeem(&self, receiver: Address, shares: U256, assets: U256) -> Result<TxHash> {
        self.submit(
            IElitraVault::fulfillRedeemCall {
                receiver,
                shares,
                assets,
            },
            None,
        )
        .await
    }

    /// Cancels a queued redemption for `receiver`, returning its shares.
    pub async fn cancel_redeem(&self, receiver: Address, shares: U256, assets: U256) -> Result<TxHash> {
        self.submit(
            IElitraVault::cancelRedeemCall {
                receiver,
                shares,
                assets,
            },
            None,
        )
        .await
    }
}
