//! Read-only vault client.

use alloy::primitives::{Address, FixedBytes, U256};
use alloy::sol_types::SolCall;
use futures::try_join;

use super::client::VaultClient;
use super::types::{PendingRedeem, UserPosition, VaultMetadata, VaultState};
use crate::abi::IElitraVault;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::math;
use crate::transport::{ChainReader, ChainWriter, ProviderReader};

/// Read access to one vault.
///
/// Every method is one or more `eth_call`s against the vault address.
/// Reverts and transport failures come back as
/// [`VaultError::Transport`](crate::VaultError::Transport), untouched.
///
/// Upgrade to a read-write [`VaultClient`] with [`with_signer`](Self::with_signer).
#[derive(Debug, Clone)]
pub struct VaultReader<R> {
    vault: Address,
    chain: R,
}

impl VaultReader<ProviderReader> {
    /// Connects to the vault and endpoint described by `config`.
    pub fn connect(config: &ClientConfig) -> Result<Self> {
        Ok(Self::new(
            config.vault_address,
            ProviderReader::from_config(config)?,
        ))
    }
}

impl<R: ChainReader> VaultReader<R> {
    /// Creates a reader for the vault at `vault`.
    pub fn new(vault: Address, chain: R) -> Self {
        Self { vault, chain }
    }

    /// Attaches a signing handle, producing a read-write client.
    pub fn with_signer<W: ChainWriter>(self, signer: W) -> VaultClient<R, W> {
        VaultClient::new(self, signer)
    }

    /// Address of the vault contract.
    pub fn vault_address(&self) -> Address {
        self.vault
    }

    /// The underlying chain connection.
    pub fn chain(&self) -> &R {
        &self.chain
    }

    /// Executes a typed view call against the vault and decodes its return.
    ///
    /// All named read methods go through here; it is public so callers can
    /// reach vault functions this crate has no wrapper for.
    pub async fn read<C: SolCall>(&self, call: C) -> Result<C::Return> {
        tracing::debug!(vault = %self.vault, function = C::SIGNATURE, "eth_call");
        let output = self.chain.call(self.vault, call.abi_encode().into()).await?;
        Ok(C::abi_decode_returns(&output)?)
    }

    // -----------------------------------------------------------------------
    // Single Reads
    // -----------------------------------------------------------------------

    /// Underlying asset token.
    pub async fn get_asset(&self) -> Result<Address> {
        self.read(IElitraVault::assetCall {}).await
    }

    /// Assets under management.
    pub async fn get_total_assets(&self) -> Result<U256> {
        self.read(IElitraVault::totalAssetsCall {}).await
    }

    /// Shares outstanding.
    pub async fn get_total_supply(&self) -> Result<U256> {
        self.read(IElitraVault::totalSupplyCall {}).await
    }

    /// Shares a deposit of `assets` would mint right now.
    pub async fn preview_deposit(&self, assets: U256) -> Result<U256> {
        self.read(IElitraVault::previewDepositCall { assets }).await
    }

    /// Assets needed to mint `shares` right now.
    pub async fn preview_mint(&self, shares: U256) -> Result<U256> {
        self.read(IElitraVault::previewMintCall { shares }).await
    }

    /// Assets `shares` would redeem for right now.
    pub async fn preview_redeem(&self, shares: U256) -> Result<U256> {
        self.read(IElitraVault::previewRedeemCall { shares }).await
    }

    /// Liquidity not reserved for pending redemptions.
    pub async fn get_available_balance(&self) -> Result<U256> {
        self.read(IElitraVault::getAvailableBalanceCall {}).await
    }

    /// `user`'s queued redemption.
    pub async fn get_pending_redeem(&self, user: Address) -> Result<PendingRedeem> {
        let pending = self
            .read(IElitraVault::pendingRedeemRequestCall { user })
            .await?;
        Ok(PendingRedeem {
            assets: pending.assets,
            shares: pending.pendingShares,
        })
    }

    /// Largest deposit `receiver` may make.
    pub async fn max_deposit(&self, receiver: Address) -> Result<U256> {
        self.read(IElitraVault::maxDepositCall { receiver }).await
    }

    /// Largest mint `receiver` may make.
    pub async fn max_mint(&self, receiver: Address) -> Result<U256> {
        self.read(IElitraVault::maxMintCall { receiver }).await
    }

    /// Whether `user` may call the function with `selector` on the vault
    /// (e.g. `manage`).
    pub async fn is_authorized(&self, user: Address, selector: FixedBytes<4>) -> Result<bool> {
        self.read(IElitraVault::isAuthorizedCall {
            user,
            functionSig: selector,
        })
        .await
    }

    // -----------------------------------------------------------------------
    // Aggregate Reads
    // -----------------------------------------------------------------------

    /// Current price per share, scaled by 10^18.
    ///
    /// Computed locally from `totalAssets` and `totalSupply`, fetched
    /// concurrently. An empty vault prices at exactly 10^18.
    pub async fn get_price_per_share(&self) -> Result<U256> {
        let (total_assets, total_supply) =
            try_join!(self.get_total_assets(), self.get_total_supply())?;
        Ok(math::price_per_share(total_assets, total_supply)?)
    }

    /// Share token name, symbol and decimals.
    pub async fn get_metadata(&self) -> Result<VaultMetadata> {
        let (name, symbol, decimals) = try_join!(
            self.read(IElitraVault::nameCall {}),
            self.read(IElitraVault::symbolCall {}),
            self.read(IElitraVault::decimalsCall {}),
        )?;
        Ok(VaultMetadata {
            name,
            symbol,
            decimals,
        })
    }

    /// Vault-wide accounting in one call.
    ///
    /// Issues eight reads concurrently. They are not pinned to a block, so
    /// under load the fields can come from different blocks; pin a block on
    /// the connection if a consistent snapshot matters. `price_per_share`
    /// is recomputed from the fetched totals, not read from the contract.
    pub async fn get_vault_state(&self) -> Result<VaultState> {
        let (
            total_assets,
            total_supply,
            aggregated_underlying_balances,
            total_pending_assets,
            available_balance,
            is_paused,
            last_block_updated,
            last_price_per_share,
        ) = try_join!(
            self.get_total_assets(),
            self.get_total_supply(),
            self.read(IElitraVault::aggregatedUnderlyingBalancesCall {}),
            self.read(IElitraVault::totalPendingAssetsCall {}),
            self.get_available_balance(),
            self.read(IElitraVault::pausedCall {}),
            self.read(IElitraVault::lastBlockUpdatedCall {}),
            self.read(IElitraVault::lastPricePerShareCall {}),
        )?;

        Ok(VaultState {
            total_assets,
            total_supply,
            price_per_share: math::price_per_share(total_assets, total_supply)?,
            aggregated_underlying_balances,
            total_pending_assets,
            available_balance,
            is_paused,
            last_block_updated,
            last_price_per_share,
        })
    }

    /// `user`'s stake in the vault.
    ///
    /// Balance, pending redemption and both max limits are fetched
    /// concurrently. Only when the balance is non-zero is a second,
    /// dependent `previewRedeem` issued to value it.
    pub async fn get_user_position(&self, user: Address) -> Result<UserPosition> {
        let (shares, pending_redeem, max_withdraw, max_redeem) = try_join!(
            self.read(IElitraVault::balanceOfCall { account: user }),
            self.get_pending_redeem(user),
            self.read(IElitraVault::maxWithdrawCall { owner: user }),
            self.read(IElitraVault::maxRedeemCall { owner: user }),
        )?;

        let assets = if shares.is_zero() {
            U256::ZERO
        } else {
            self.preview_redeem(shares).await?
        };

        Ok(UserPosition {
            shares,
            assets,
            pending_redeem,
            max_withdraw,
            max_redeem,
        })
    }
}
