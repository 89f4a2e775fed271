//! alloy-backed implementations of the transport traits.
//!
//! Any `Provider` works. The `connect_http` constructors build the usual
//! setup: an HTTP provider with alloy's recommended fillers (nonce, gas,
//! chain id) and, for writers, a local private-key wallet.

use std::time::Duration;

use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, Bytes, TxHash};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::rpc::types::{TransactionReceipt, TransactionRequest};
use alloy::signers::local::PrivateKeySigner;
use alloy::transports::http::reqwest::Url;
use async_trait::async_trait;
use tokio::time::Instant;

use super::{ChainReader, ChainWriter, TransactionOutcome, WriteRequest};
use crate::config::{ClientConfig, DEFAULT_RECEIPT_POLL_INTERVAL};
use crate::error::{Result, VaultError};

fn parse_url(rpc_url: &str) -> Result<Url> {
    rpc_url
        .parse::<Url>()
        .map_err(|e| VaultError::Config(format!("invalid rpc url {rpc_url:?}: {e}")))
}

// ---------------------------------------------------------------------------
// ProviderReader
// ---------------------------------------------------------------------------

/// [`ChainReader`] over an alloy provider.
///
/// Receipts are found by polling `eth_getTransactionReceipt`. Without a
/// timeout the wait lasts as long as the provider keeps answering.
#[derive(Debug, Clone)]
pub struct ProviderReader<P = DynProvider> {
    provider: P,
    poll_interval: Duration,
    timeout: Option<Duration>,
}

impl ProviderReader<DynProvider> {
    /// Connects to an HTTP JSON-RPC endpoint.
    pub fn connect_http(rpc_url: &str) -> Result<Self> {
        let provider = ProviderBuilder::new().connect_http(parse_url(rpc_url)?).erased();
        Ok(Self::new(provider))
    }

    /// Connects using the endpoint and receipt settings of `config`.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        let mut reader = Self::connect_http(&config.rpc_url)?
            .with_poll_interval(config.receipt_poll_interval());
        reader.timeout = config.receipt_timeout();
        Ok(reader)
    }
}

impl<P: Provider> ProviderReader<P> {
    /// Wraps an existing provider.
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            poll_interval: DEFAULT_RECEIPT_POLL_INTERVAL,
            timeout: None,
        }
    }

    /// Sets the receipt polling interval.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Bounds receipt waits.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// The wrapped provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    async fn poll_receipt(&self, hash: TxHash) -> Result<TransactionOutcome> {
        loop {
            if let Some(receipt) = self.provider.get_transaction_receipt(hash).await? {
                return Ok(outcome_from_receipt(hash, &receipt));
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }
}

fn outcome_from_receipt(hash: TxHash, receipt: &TransactionReceipt) -> TransactionOutcome {
    TransactionOutcome {
        hash,
        success: receipt.status(),
        logs: receipt.inner.logs().iter().map(|log| log.inner.clone()).collect(),
    }
}

#[async_trait]
impl<P: Provider + 'static> ChainReader for ProviderReader<P> {
    async fn call(&self, to: Address, input: Bytes) -> Result<Bytes> {
        let request = TransactionRequest::default().with_to(to).with_input(input);
        Ok(self.provider.call(request).await?)
    }

    async fn wait_for_receipt(&self, hash: TxHash) -> Result<TransactionOutcome> {
        let Some(limit) = self.timeout else {
            return self.poll_receipt(hash).await;
        };

        let started = Instant::now();
        match tokio::time::timeout(limit, self.poll_receipt(hash)).await {
            Ok(outcome) => outcome,
            Err(_) => Err(VaultError::ReceiptTimeout {
                hash,
                elapsed_ms: started.elapsed().as_millis() as u64,
                timeout_ms: limit.as_millis() as u64,
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// ProviderWriter
// ---------------------------------------------------------------------------

/// [`ChainWriter`] over an alloy provider that can sign for `account`.
#[derive(Debug, Clone)]
pub struct ProviderWriter<P = DynProvider> {
    provider: P,
    account: Option<Address>,
}

impl ProviderWriter<DynProvider> {
    /// Connects to an HTTP endpoint with a local wallet built from a
    /// hex-encoded private key.
    pub fn connect_http(rpc_url: &str, private_key: &str) -> Result<Self> {
        let signer = private_key
            .parse::<PrivateKeySigner>()
            .map_err(|e| VaultError::Config(format!("invalid private key: {e}")))?;
        let account = signer.address();
        let provider = ProviderBuilder::new()
            .wallet(signer)
            .connect_http(parse_url(rpc_url)?)
            .erased();
        Ok(Self::new(provider, Some(account)))
    }
}

impl<P: Provider> ProviderWriter<P> {
    /// Wraps a provider whose wallet signs for `account`.
    ///
    /// Pass `None` for a provider without a usable account; every write
    /// through it then fails with [`VaultError::MissingAccount`].
    pub fn new(provider: P, account: Option<Address>) -> Self {
        Self { provider, account }
    }

    /// The wrapped provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }
}

#[async_trait]
impl<P: Provider + 'static> ChainWriter for ProviderWriter<P> {
    fn account(&self) -> Option<Address> {
        self.account
    }

    async fn send(&self, request: WriteRequest) -> Result<TxHash> {
        let pending = self
            .provider
            .send_transaction(transaction_request(request))
            .await?;
        Ok(*pending.tx_hash())
    }
}

/// Node-facing form of a [`WriteRequest`]. Nonce, fees and (absent an
/// explicit limit) gas are left to the provider's fillers.
fn transaction_request(request: WriteRequest) -> TransactionRequest {
    let tx = TransactionRequest::default()
        .with_from(request.from)
        .with_to(request.to)
        .with_input(request.input);
    match request.gas_limit {
        Some(gas_limit) => tx.with_gas_limit(gas_limit),
        None => tx,
    }
}
