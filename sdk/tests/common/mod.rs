//! Shared fixtures: an in-memory chain that answers `eth_call`s from a
//! selector table and records everything it is asked, a delaying wrapper
//! that measures how many calls overlap, and a signer that records every
//! transaction it is handed.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use alloy::primitives::{address, Address, Bytes, Log, TxHash, B256, U256};
use alloy::sol_types::{SolCall, SolEvent};
use alloy::transports::TransportErrorKind;
use async_trait::async_trait;
use parking_lot::Mutex;

use elitra_sdk::abi::IElitraVault;
use elitra_sdk::transport::{ChainReader, ChainWriter, TransactionOutcome, WriteRequest};
use elitra_sdk::{Result, VaultClient, VaultError, VaultReader};

pub const VAULT: Address = address!("0x5555555555555555555555555555555555555555");
pub const ALICE: Address = address!("0xa11ce00000000000000000000000000000000001");
pub const BOB: Address = address!("0xb0b0000000000000000000000000000000000002");

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("elitra_sdk=debug")
        .try_init();
}

// ---------------------------------------------------------------------------
// Return Data Encoding
// ---------------------------------------------------------------------------

pub fn word(value: U256) -> Vec<u8> {
    value.to_be_bytes::<32>().to_vec()
}

pub fn uint(value: u64) -> Vec<u8> {
    word(U256::from(value))
}

pub fn boolean(value: bool) -> Vec<u8> {
    uint(value as u64)
}

pub fn addr(value: Address) -> Vec<u8> {
    let mut out = vec![0u8; 12];
    out.extend_from_slice(value.as_slice());
    out
}

pub fn string(value: &str) -> Vec<u8> {
    let mut out = uint(0x20);
    out.extend(uint(value.len() as u64));
    let mut bytes = value.as_bytes().to_vec();
    bytes.resize(value.len().div_ceil(32) * 32, 0);
    out.extend(bytes);
    out
}

// ---------------------------------------------------------------------------
// MockChain
// ---------------------------------------------------------------------------

/// A `ChainReader` backed by a selector → response table.
#[derive(Default)]
pub struct MockChain {
    responses: Mutex<HashMap<[u8; 4], std::result::Result<Vec<u8>, String>>>,
    calls: Mutex<Vec<(Address, Bytes)>>,
    receipt: Mutex<Option<TransactionOutcome>>,
    awaited: Mutex<Vec<TxHash>>,
}

impl MockChain {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Answers every call to `C` with `output`.
    pub fn on<C: SolCall>(&self, output: Vec<u8>) -> &Self {
        self.responses.lock().insert(C::SELECTOR, Ok(output));
        self
    }

    /// Makes every call to `C` fail like a revert.
    pub fn revert<C: SolCall>(&self, reason: &str) -> &Self {
        self.responses
            .lock()
            .insert(C::SELECTOR, Err(format!("execution reverted: {reason}")));
        self
    }

    /// Receipt returned by the next `wait_for_receipt`.
    pub fn set_receipt(&self, success: bool, logs: Vec<Log>) {
        *self.receipt.lock() = Some(TransactionOutcome {
            hash: TxHash::ZERO,
            success,
            logs,
        });
    }

    /// Every call made so far, in order.
    pub fn calls(&self) -> Vec<(Address, Bytes)> {
        self.calls.lock().clone()
    }

    /// Number of calls made to `C`.
    pub fn count<C: SolCall>(&self) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|(_, input)| input.starts_with(&C::SELECTOR))
            .count()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().len()
    }

    /// Transactions whose receipts were awaited.
    pub fn awaited(&self) -> Vec<TxHash> {
        self.awaited.lock().clone()
    }

    /// Standard healthy vault: 1_050 assets over 1_000 shares.
    pub fn with_vault_defaults(self: Arc<Self>) -> Arc<Self> {
        self.on::<IElitraVault::totalAssetsCall>(uint(1_050))
            .on::<IElitraVault::totalSupplyCall>(uint(1_000))
            .on::<IElitraVault::aggregatedUnderlyingBalancesCall>(uint(800))
            .on::<IElitraVault::totalPendingAssetsCall>(uint(50))
            .on::<IElitraVault::getAvailableBalanceCall>(uint(200))
            .on::<IElitraVault::pausedCall>(boolean(false))
            .on::<IElitraVault::lastBlockUpdatedCall>(uint(1_234_567))
            .on::<IElitraVault::lastPricePerShareCall>(uint(1_040_000_000_000_000_000));
        self
    }
}

#[async_trait]
impl ChainReader for MockChain {
    async fn call(&self, to: Address, input: Bytes) -> Result<Bytes> {
        self.calls.lock().push((to, input.clone()));
        let selector: [u8; 4] = input
            .get(..4)
            .and_then(|s| s.try_into().ok())
            .ok_or_else(|| VaultError::from(TransportErrorKind::custom_str("short calldata")))?;

        match self.responses.lock().get(&selector) {
            Some(Ok(output)) => Ok(output.clone().into()),
            Some(Err(reason)) => Err(TransportErrorKind::custom_str(reason).into()),
            None => Err(TransportErrorKind::custom_str(&format!(
                "no mock response for selector 0x{}",
                hex::encode(selector)
            ))
            .into()),
        }
    }

    async fn wait_for_receipt(&self, hash: TxHash) -> Result<TransactionOutcome> {
        self.awaited.lock().push(hash);
        let mut outcome = self
            .receipt
            .lock()
            .clone()
            .ok_or_else(|| VaultError::from(TransportErrorKind::custom_str("no receipt")))?;
        outcome.hash = hash;
        Ok(outcome)
    }
}

// ---------------------------------------------------------------------------
// GatedChain
// ---------------------------------------------------------------------------

/// Delays every call to a `MockChain` and tracks how many overlap.
pub struct GatedChain {
    inner: Arc<MockChain>,
    delay: Duration,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    completed: AtomicUsize,
    starts: Mutex<Vec<([u8; 4], usize)>>,
}

impl GatedChain {
    pub fn new(inner: Arc<MockChain>, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            inner,
            delay,
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            completed: AtomicUsize::new(0),
            starts: Mutex::new(Vec::new()),
        })
    }

    /// Most calls ever in flight at once.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    /// For each call to `C`, how many calls had already finished when it
    /// started.
    pub fn completed_before<C: SolCall>(&self) -> Vec<usize> {
        self.starts
            .lock()
            .iter()
            .filter(|(selector, _)| *selector == C::SELECTOR)
            .map(|(_, completed)| *completed)
            .collect()
    }
}

#[async_trait]
impl ChainReader for GatedChain {
    async fn call(&self, to: Address, input: Bytes) -> Result<Bytes> {
        let selector = input
            .get(..4)
            .and_then(|s| <[u8; 4]>::try_from(s).ok())
            .unwrap_or_default();
        self.starts
            .lock()
            .push((selector, self.completed.load(Ordering::SeqCst)));
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        tokio::time::sleep(self.delay).await;
        let result = self.inner.call(to, input).await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.completed.fetch_add(1, Ordering::SeqCst);
        result
    }

    async fn wait_for_receipt(&self, hash: TxHash) -> Result<TransactionOutcome> {
        self.inner.wait_for_receipt(hash).await
    }
}

// ---------------------------------------------------------------------------
// MockSigner
// ---------------------------------------------------------------------------

/// A `ChainWriter` that records requests and hands out sequential hashes.
pub struct MockSigner {
    account: Option<Address>,
    sent: Mutex<Vec<WriteRequest>>,
    reject: Option<String>,
}

impl MockSigner {
    pub fn new(account: Address) -> Arc<Self> {
        Arc::new(Self {
            account: Some(account),
            sent: Mutex::new(Vec::new()),
            reject: None,
        })
    }

    /// A handle with no account attached.
    pub fn without_account() -> Arc<Self> {
        Arc::new(Self {
            account: None,
            sent: Mutex::new(Vec::new()),
            reject: None,
        })
    }

    /// A handle whose node rejects every transaction.
    pub fn rejecting(account: Address, reason: &str) -> Arc<Self> {
        Arc::new(Self {
            account: Some(account),
            sent: Mutex::new(Vec::new()),
            reject: Some(reason.to_string()),
        })
    }

    pub fn sent(&self) -> Vec<WriteRequest> {
        self.sent.lock().clone()
    }
}

/// Hash the mock signer returns for its `n`-th transaction (1-based).
pub fn nth_hash(n: u8) -> TxHash {
    B256::with_last_byte(n)
}

#[async_trait]
impl ChainWriter for MockSigner {
    fn account(&self) -> Option<Address> {
        self.account
    }

    async fn send(&self, request: WriteRequest) -> Result<TxHash> {
        if let Some(reason) = &self.reject {
            return Err(TransportErrorKind::custom_str(reason).into());
        }
        let mut sent = self.sent.lock();
        sent.push(request);
        Ok(nth_hash(sent.len() as u8))
    }
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

pub fn reader(chain: &Arc<MockChain>) -> VaultReader<Arc<MockChain>> {
    init_tracing();
    VaultReader::new(VAULT, Arc::clone(chain))
}

pub fn gated_reader(chain: &Arc<GatedChain>) -> VaultReader<Arc<GatedChain>> {
    init_tracing();
    VaultReader::new(VAULT, Arc::clone(chain))
}

pub fn client(
    chain: &Arc<MockChain>,
    signer: &Arc<MockSigner>,
) -> VaultClient<Arc<MockChain>, Arc<MockSigner>> {
    reader(chain).with_signer(Arc::clone(signer))
}

/// A `RedeemRequest` log emitted by `emitter`.
pub fn redeem_log(emitter: Address, assets: u64, shares: u64, instant: bool) -> Log {
    let event = IElitraVault::RedeemRequest {
        receiver: ALICE,
        owner: ALICE,
        assets: U256::from(assets),
        shares: U256::from(shares),
        instant,
    };
    Log {
        address: emitter,
        data: event.encode_log_data(),
    }
}
