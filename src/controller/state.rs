use std::collections::VecDeque;

use alloy::primitives::{Address, B256, U256};
use chrono::{DateTime, Local};

/// Connected wallet account.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub connected: bool,
    pub address: Option<Address>,
    /// `None` until the first balance read lands
    pub balance_wei: Option<U256>,
}

/// What is currently known about the bound contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractHandle {
    pub address: Address,
    /// Bumped on every bind; answers for older bindings are ignored
    pub generation: u64,
    pub num: U256,
    pub array_length: U256,
    pub sliced_array: Vec<String>,
}

impl ContractHandle {
    pub fn new(address: Address, generation: u64) -> Self {
        Self {
            address,
            generation,
            num: U256::ZERO,
            array_length: U256::ZERO,
            sliced_array: Vec::new(),
        }
    }
}

/// Raw text typed by the user, validated only on submit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputDraft {
    pub pending_contract_address: String,
    pub pending_num: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    /// Missing wallet, missing contract or bad input
    Warning,
    Error,
}

/// Blocking message shown until the user dismisses it.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    pub raised_at: DateTime<Local>,
}

impl Notice {
    pub fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            raised_at: Local::now(),
        }
    }
}

/// Everything the screen renders.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub session: Session,
    pub contract: Option<ContractHandle>,
    pub draft: InputDraft,
    pub notices: VecDeque<Notice>,
    /// `setNum` transactions sent and not yet included or failed
    pub pending_txs: usize,
    pub last_tx: Option<B256>,
}

impl ViewState {
    pub fn notice(&self) -> Option<&Notice> {
        self.notices.front()
    }
}

/// Sequence numbers for one field.
///
/// Every request takes a fresh ticket; an answer is applied only when its
/// ticket is newer than the last applied one.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tickets {
    issued: u64,
    applied: u64,
}

impl Tickets {
    pub fn issue(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    pub fn accept(&mut self, ticket: u64) -> bool {
        if ticket > self.applied {
            self.applied = ticket;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tickets_are_monotonic() {
        let mut tickets = Tickets::default();
        assert_eq!(tickets.issue(), 1);
        assert_eq!(tickets.issue(), 2);
        assert_eq!(tickets.issue(), 3);
    }

    #[test]
    fn test_tickets_drop_older_answers() {
        let mut tickets = Tickets::default();
        let first = tickets.issue();
        let second = tickets.issue();
        assert!(tickets.accept(second));
        assert!(!tickets.accept(first));
    }

    #[test]
    fn test_tickets_accept_in_order_answers() {
        let mut tickets = Tickets::default();
        let first = tickets.issue();
        let second = tickets.issue();
        assert!(tickets.accept(first));
        assert!(tickets.accept(second));
        assert!(!tickets.accept(second));
    }

    #[test]
    fn test_new_handle_starts_empty() {
        let handle = ContractHandle::new(Address::ZERO, 3);
        assert_eq!(handle.generation, 3);
        assert_eq!(handle.num, U256::ZERO);
        assert_eq!(handle.array_length, U256::ZERO);
        assert!(handle.sliced_array.is_empty());
    }

    #[test]
    fn test_default_session_is_disconnected() {
        let session = Session::default();
        assert!(!session.connected);
        assert!(session.address.is_none());
        assert!(session.balance_wei.is_none());
    }
}
