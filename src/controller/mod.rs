//! View-model controller: owns the screen state, runs wallet and contract
//! calls in background tasks and folds their results back into the state.
//!
//! Every operation returns immediately. Remote work is spawned onto the tokio
//! runtime and reports back through the app event channel as exactly one
//! [`ChainEvent`], which the app loop hands to [`Controller::apply`].

pub mod draft;
pub mod state;

#[cfg(test)]
mod fake;

use std::future::Future;
use std::sync::Arc;

use tokio::sync::mpsc;

use crate::data::counter::CounterContract;
use crate::data::wallet::Wallet;
use crate::events::{AppEvent, ChainEvent, ReadField};

use self::state::{ContractHandle, InputDraft, Notice, NoticeKind, Tickets, ViewState};

pub const NO_WALLET_NOTICE: &str =
    "No wallet available. Start with --rpc-url or --chain to connect one.";
pub const NOT_CONNECTED_NOTICE: &str = "Connect your wallet first.";
pub const NO_CONTRACT_NOTICE: &str = "Initialize a contract first.";
pub const INVALID_ADDRESS_NOTICE: &str = "Please enter a valid contract address";
pub const INVALID_NUM_NOTICE: &str = "Please enter a valid non-negative number";
pub const SET_NUM_OK_NOTICE: &str = "Number updated successfully!";
pub const SET_NUM_FAILED_NOTICE: &str = "Error setting number. Check the log for details.";

#[derive(Debug, Default)]
struct FieldTickets {
    num: Tickets,
    array_length: Tickets,
    sliced_array: Tickets,
    balance: Tickets,
}

pub struct Controller {
    wallet: Option<Arc<dyn Wallet>>,
    counter: Option<Arc<dyn CounterContract>>,
    state: ViewState,
    tickets: FieldTickets,
    generation: u64,
    in_flight: usize,
    event_tx: mpsc::UnboundedSender<AppEvent>,
}

impl Controller {
    pub fn new(wallet: Option<Arc<dyn Wallet>>, event_tx: mpsc::UnboundedSender<AppEvent>) -> Self {
        Self {
            wallet,
            counter: None,
            state: ViewState::default(),
            tickets: FieldTickets::default(),
            generation: 0,
            in_flight: 0,
            event_tx,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn draft_mut(&mut self) -> &mut InputDraft {
        &mut self.state.draft
    }

    /// True when no background task is outstanding.
    pub fn is_idle(&self) -> bool {
        self.in_flight == 0
    }

    /// Route an app event to the matching operation.
    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::ConnectWallet => self.connect_wallet(),
            AppEvent::InitializeContract => {
                let address = self.state.draft.pending_contract_address.clone();
                self.initialize_contract(&address);
            }
            AppEvent::RefreshNum => self.refresh_num(),
            AppEvent::RefreshArrayLength => self.refresh_array_length(),
            AppEvent::RefreshSlicedArray => self.refresh_sliced_array(),
            AppEvent::RefreshBalance => self.refresh_balance(),
            AppEvent::SubmitNum => {
                let draft = self.state.draft.pending_num.clone();
                self.submit_num(&draft);
            }
            AppEvent::DismissNotice => self.dismiss_notice(),
            AppEvent::TransactionSent(hash) => {
                self.state.last_tx = Some(hash);
            }
            AppEvent::Chain(event) => self.apply(event),
            AppEvent::Quit => {}
        }
    }

    pub fn dismiss_notice(&mut self) {
        self.state.notices.pop_front();
    }

    fn notify(&mut self, kind: NoticeKind, message: impl Into<String>) {
        self.state.notices.push_back(Notice::new(kind, message));
    }

    fn spawn<F>(&mut self, task: F)
    where
        F: Future<Output = ChainEvent> + Send + 'static,
    {
        self.in_flight += 1;
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            let event = task.await;
            let _ = tx.send(AppEvent::Chain(event));
        });
    }

    /// Request account access from the wallet.
    pub fn connect_wallet(&mut self) {
        let Some(wallet) = self.wallet.clone() else {
            tracing::warn!("connect requested without a wallet");
            self.notify(NoticeKind::Warning, NO_WALLET_NOTICE);
            return;
        };

        self.spawn(async move {
            match wallet.request_account().await {
                Ok(address) => {
                    tracing::info!(%address, "wallet connected");
                    ChainEvent::WalletConnected(address)
                }
                Err(err) => {
                    tracing::error!(%err, "error connecting to wallet");
                    ChainEvent::ConnectFailed
                }
            }
        });
    }

    /// Bind the `Counter` at `address` and read its num and array length.
    pub fn initialize_contract(&mut self, address: &str) {
        let (Some(wallet), Some(account)) = (self.wallet.clone(), self.connected_account()) else {
            self.notify(NoticeKind::Warning, NOT_CONNECTED_NOTICE);
            return;
        };

        let address = match draft::parse_address(address) {
            Ok(address) => address,
            Err(err) => {
                tracing::debug!(%err, "refusing contract address");
                self.notify(NoticeKind::Warning, INVALID_ADDRESS_NOTICE);
                return;
            }
        };

        self.generation += 1;
        self.counter = Some(wallet.bind_counter(address, account));
        self.state.contract = Some(ContractHandle::new(address, self.generation));
        tracing::info!(%address, generation = self.generation, "contract bound");

        self.refresh_num();
        self.refresh_array_length();
    }

    pub fn refresh_num(&mut self) {
        let Some((counter, generation)) = self.bound_counter() else {
            return;
        };
        let ticket = self.tickets.num.issue();
        self.spawn(async move {
            match counter.num().await {
                Ok(value) => ChainEvent::NumLoaded {
                    generation,
                    ticket,
                    value,
                },
                Err(err) => {
                    tracing::warn!(%err, "error getting num");
                    ChainEvent::ReadFailed(ReadField::Num)
                }
            }
        });
    }

    pub fn refresh_array_length(&mut self) {
        let Some((counter, generation)) = self.bound_counter() else {
            return;
        };
        let ticket = self.tickets.array_length.issue();
        self.spawn(async move {
            match counter.array_length().await {
                Ok(value) => ChainEvent::ArrayLengthLoaded {
                    generation,
                    ticket,
                    value,
                },
                Err(err) => {
                    tracing::warn!(%err, "error getting array length");
                    ChainEvent::ReadFailed(ReadField::ArrayLength)
                }
            }
        });
    }

    pub fn refresh_sliced_array(&mut self) {
        let Some((counter, generation)) = self.bound_counter() else {
            return;
        };
        let ticket = self.tickets.sliced_array.issue();
        self.spawn(async move {
            match counter.sliced_array().await {
                Ok(items) => ChainEvent::SlicedArrayLoaded {
                    generation,
                    ticket,
                    items,
                },
                Err(err) => {
                    tracing::warn!(%err, "error getting sliced array");
                    ChainEvent::ReadFailed(ReadField::SlicedArray)
                }
            }
        });
    }

    /// Re-read the native balance of the connected account.
    pub fn refresh_balance(&mut self) {
        let (Some(wallet), Some(address)) = (self.wallet.clone(), self.connected_account()) else {
            self.notify(NoticeKind::Warning, NOT_CONNECTED_NOTICE);
            return;
        };
        let ticket = self.tickets.balance.issue();
        self.spawn(async move {
            match wallet.balance_of(address).await {
                Ok(balance) => ChainEvent::BalanceLoaded {
                    ticket,
                    address,
                    balance,
                },
                Err(err) => {
                    tracing::warn!(%err, %address, "error updating balance");
                    ChainEvent::ReadFailed(ReadField::Balance)
                }
            }
        });
    }

    /// Validate `draft` and send `setNum` with it.
    ///
    /// Nothing is sent unless the draft is a non-negative integer. Repeated
    /// submits are not blocked; each one is its own transaction.
    pub fn submit_num(&mut self, draft: &str) {
        let Some((counter, _)) = self.bound_counter() else {
            return;
        };

        let value = match draft::parse_num(draft) {
            Ok(value) => value,
            Err(err) => {
                tracing::debug!(%err, "refusing num draft");
                self.notify(NoticeKind::Warning, INVALID_NUM_NOTICE);
                return;
            }
        };

        self.state.pending_txs += 1;
        let tx = self.event_tx.clone();
        self.spawn(async move {
            let pending = match counter.set_num(value).await {
                Ok(pending) => pending,
                Err(err) => {
                    tracing::error!(%err, %value, "error setting num");
                    return ChainEvent::SetNumFailed;
                }
            };

            let hash = pending.tx_hash();
            tracing::info!(%hash, %value, "transaction sent");
            let _ = tx.send(AppEvent::TransactionSent(hash));

            match pending.wait().await {
                Ok(inclusion) => {
                    tracing::info!(%hash, block = ?inclusion.block_number, "transaction included");
                    ChainEvent::NumUpdated(inclusion)
                }
                Err(err) => {
                    tracing::error!(%err, %hash, "error setting num");
                    ChainEvent::SetNumFailed
                }
            }
        });
    }

    /// Fold a finished task's result into the state.
    pub fn apply(&mut self, event: ChainEvent) {
        self.in_flight = self.in_flight.saturating_sub(1);

        match event {
            ChainEvent::WalletConnected(address) => {
                let changed = self.state.session.address != Some(address);
                self.state.session.connected = true;
                self.state.session.address = Some(address);
                if changed {
                    self.state.session.balance_wei = None;
                    self.refresh_balance();
                }
            }
            ChainEvent::ConnectFailed => {}
            ChainEvent::BalanceLoaded {
                ticket,
                address,
                balance,
            } => {
                if self.state.session.address != Some(address) {
                    tracing::debug!(%address, "dropping balance for a previous account");
                    return;
                }
                if self.tickets.balance.accept(ticket) {
                    self.state.session.balance_wei = Some(balance);
                } else {
                    tracing::debug!(ticket, "dropping stale balance");
                }
            }
            ChainEvent::NumLoaded {
                generation,
                ticket,
                value,
            } => {
                if let Some(handle) = handle_for(&mut self.state.contract, generation) {
                    if self.tickets.num.accept(ticket) {
                        handle.num = value;
                        return;
                    }
                }
                tracing::debug!(generation, ticket, "dropping stale num");
            }
            ChainEvent::ArrayLengthLoaded {
                generation,
                ticket,
                value,
            } => {
                if let Some(handle) = handle_for(&mut self.state.contract, generation) {
                    if self.tickets.array_length.accept(ticket) {
                        handle.array_length = value;
                        return;
                    }
                }
                tracing::debug!(generation, ticket, "dropping stale array length");
            }
            ChainEvent::SlicedArrayLoaded {
                generation,
                ticket,
                items,
            } => {
                if let Some(handle) = handle_for(&mut self.state.contract, generation) {
                    if self.tickets.sliced_array.accept(ticket) {
                        handle.sliced_array = items;
                        return;
                    }
                }
                tracing::debug!(generation, ticket, "dropping stale sliced array");
            }
            ChainEvent::ReadFailed(field) => {
                tracing::debug!(%field, "keeping previous value after failed read");
            }
            ChainEvent::NumUpdated(inclusion) => {
                self.state.pending_txs = self.state.pending_txs.saturating_sub(1);
                self.state.last_tx = Some(inclusion.tx_hash);
                self.refresh_num();
                self.refresh_balance();
                self.notify(NoticeKind::Info, SET_NUM_OK_NOTICE);
            }
            ChainEvent::SetNumFailed => {
                self.state.pending_txs = self.state.pending_txs.saturating_sub(1);
                self.notify(NoticeKind::Error, SET_NUM_FAILED_NOTICE);
            }
        }
    }

    fn connected_account(&self) -> Option<alloy::primitives::Address> {
        if self.state.session.connected {
            self.state.session.address
        } else {
            None
        }
    }

    /// The bound counter, or a notice when there is none.
    fn bound_counter(&mut self) -> Option<(Arc<dyn CounterContract>, u64)> {
        match &self.counter {
            Some(counter) => Some((Arc::clone(counter), self.generation)),
            None => {
                self.notify(NoticeKind::Warning, NO_CONTRACT_NOTICE);
                None
            }
        }
    }
}

/// The handle for `generation`, if it is still the bound one.
fn handle_for(
    contract: &mut Option<ContractHandle>,
    generation: u64,
) -> Option<&mut ContractHandle> {
    contract
        .as_mut()
        .filter(|handle| handle.generation == generation)
}
