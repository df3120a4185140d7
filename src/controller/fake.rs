//! In-memory wallet and contract used by the controller tests.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use alloy::primitives::{Address, B256, U256};
use async_trait::async_trait;
use tokio::sync::oneshot;

use crate::data::ChainError;
use crate::data::counter::{CounterContract, Inclusion, PendingTx};
use crate::data::wallet::Wallet;

pub struct FakeWallet {
    account: Option<Address>,
    balance: Mutex<U256>,
    counters: Mutex<HashMap<Address, Arc<FakeCounter>>>,
    pub balance_reads: AtomicU64,
}

impl FakeWallet {
    pub fn new(account: Address, balance: U256) -> Self {
        Self {
            account: Some(account),
            balance: Mutex::new(balance),
            counters: Mutex::new(HashMap::new()),
            balance_reads: AtomicU64::new(0),
        }
    }

    /// A wallet whose user declines every account request.
    pub fn rejecting() -> Self {
        Self {
            account: None,
            balance: Mutex::new(U256::ZERO),
            counters: Mutex::new(HashMap::new()),
            balance_reads: AtomicU64::new(0),
        }
    }

    pub fn deploy(&self, counter: Arc<FakeCounter>) {
        self.counters
            .lock()
            .unwrap()
            .insert(counter.address, counter);
    }

    pub fn set_balance(&self, balance: U256) {
        *self.balance.lock().unwrap() = balance;
    }
}

#[async_trait]
impl Wallet for FakeWallet {
    async fn request_account(&self) -> Result<Address, ChainError> {
        self.account
            .ok_or_else(|| ChainError::Rejected("User rejected the request.".into()))
    }

    async fn balance_of(&self, _address: Address) -> Result<U256, ChainError> {
        self.balance_reads.fetch_add(1, Ordering::SeqCst);
        Ok(*self.balance.lock().unwrap())
    }

    fn bind_counter(&self, address: Address, _account: Address) -> Arc<dyn CounterContract> {
        match self.counters.lock().unwrap().get(&address) {
            Some(counter) => Arc::clone(counter) as Arc<dyn CounterContract>,
            // No code at this address: every call fails
            None => {
                let empty = FakeCounter::new(address, 0, 0);
                empty.fail_reads.store(true, Ordering::SeqCst);
                Arc::new(empty)
            }
        }
    }
}

pub struct FakeCounter {
    address: Address,
    num: Arc<Mutex<U256>>,
    array: Mutex<Vec<String>>,
    num_gates: Mutex<VecDeque<(oneshot::Receiver<()>, U256)>>,
    inclusion_gate: Mutex<Option<oneshot::Receiver<()>>>,
    pub fail_reads: AtomicBool,
    pub revert_set_num: AtomicBool,
    pub set_num_calls: Mutex<Vec<U256>>,
}

impl FakeCounter {
    /// A counter holding `num` and an array of `length` words.
    pub fn new(address: Address, num: u64, length: usize) -> Self {
        Self {
            address,
            num: Arc::new(Mutex::new(U256::from(num))),
            array: Mutex::new((0..length).map(|i| format!("word{i}")).collect()),
            num_gates: Mutex::new(VecDeque::new()),
            inclusion_gate: Mutex::new(None),
            fail_reads: AtomicBool::new(false),
            revert_set_num: AtomicBool::new(false),
            set_num_calls: Mutex::new(Vec::new()),
        }
    }

    /// Make the next `num()` call answer `value` once the returned sender fires.
    pub fn gate_next_num(&self, value: u64) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.num_gates
            .lock()
            .unwrap()
            .push_back((rx, U256::from(value)));
        tx
    }

    /// Hold the next transaction's inclusion until the returned sender fires.
    pub fn gate_inclusion(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.inclusion_gate.lock().unwrap() = Some(rx);
        tx
    }

    pub fn set_calls(&self) -> Vec<U256> {
        self.set_num_calls.lock().unwrap().clone()
    }

    fn check_reads(&self) -> Result<(), ChainError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            Err(ChainError::Transport(
                alloy::transports::TransportError::local_usage_str("execution reverted"),
            ))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl CounterContract for FakeCounter {
    fn address(&self) -> Address {
        self.address
    }

    async fn num(&self) -> Result<U256, ChainError> {
        let gate = self.num_gates.lock().unwrap().pop_front();
        if let Some((rx, value)) = gate {
            let _ = rx.await;
            return Ok(value);
        }
        self.check_reads()?;
        Ok(*self.num.lock().unwrap())
    }

    async fn array_length(&self) -> Result<U256, ChainError> {
        self.check_reads()?;
        Ok(U256::from(self.array.lock().unwrap().len()))
    }

    async fn sliced_array(&self) -> Result<Vec<String>, ChainError> {
        self.check_reads()?;
        let num: usize = self.num.lock().unwrap().saturating_to();
        let array = self.array.lock().unwrap();
        Ok(array.iter().take(num).cloned().collect())
    }

    async fn set_num(&self, value: U256) -> Result<Box<dyn PendingTx>, ChainError> {
        let mut calls = self.set_num_calls.lock().unwrap();
        calls.push(value);
        let hash = B256::with_last_byte(calls.len() as u8);
        Ok(Box::new(FakePendingTx {
            hash,
            value,
            num: Arc::clone(&self.num),
            revert: self.revert_set_num.load(Ordering::SeqCst),
            gate: self.inclusion_gate.lock().unwrap().take(),
        }))
    }
}

struct FakePendingTx {
    hash: B256,
    value: U256,
    num: Arc<Mutex<U256>>,
    revert: bool,
    gate: Option<oneshot::Receiver<()>>,
}

#[async_trait]
impl PendingTx for FakePendingTx {
    fn tx_hash(&self) -> B256 {
        self.hash
    }

    async fn wait(self: Box<Self>) -> Result<Inclusion, ChainError> {
        if let Some(gate) = self.gate {
            let _ = gate.await;
        }
        if self.revert {
            return Err(ChainError::Reverted(self.hash));
        }
        *self.num.lock().unwrap() = self.value;
        Ok(Inclusion {
            tx_hash: self.hash,
            block_number: Some(1),
        })
    }
}
