use alloy::primitives::{Address, B256, U256};

use crate::data::counter::Inclusion;

/// A value on screen that is refreshed by a remote read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadField {
    Num,
    ArrayLength,
    SlicedArray,
    Balance,
}

impl std::fmt::Display for ReadField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReadField::Num => write!(f, "num"),
            ReadField::ArrayLength => write!(f, "array length"),
            ReadField::SlicedArray => write!(f, "sliced array"),
            ReadField::Balance => write!(f, "balance"),
        }
    }
}

/// Final result of one background chain task.
///
/// Contract reads carry the binding `generation` they were issued against
/// and a per-field `ticket`, so late answers can be recognised and dropped.
#[derive(Debug, Clone, PartialEq)]
pub enum ChainEvent {
    WalletConnected(Address),
    ConnectFailed,

    BalanceLoaded {
        ticket: u64,
        address: Address,
        balance: U256,
    },
    NumLoaded {
        generation: u64,
        ticket: u64,
        value: U256,
    },
    ArrayLengthLoaded {
        generation: u64,
        ticket: u64,
        value: U256,
    },
    SlicedArrayLoaded {
        generation: u64,
        ticket: u64,
        items: Vec<String>,
    },
    ReadFailed(ReadField),

    NumUpdated(Inclusion),
    SetNumFailed,
}

/// Events flowing into the main app loop, from key handlers and background tasks
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    // User intents
    ConnectWallet,
    InitializeContract,
    RefreshNum,
    RefreshArrayLength,
    RefreshSlicedArray,
    RefreshBalance,
    SubmitNum,
    DismissNotice,
    Quit,

    // Transaction broadcast, inclusion still pending
    TransactionSent(B256),

    // Background task finished
    Chain(ChainEvent),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_field_display() {
        assert_eq!(ReadField::Num.to_string(), "num");
        assert_eq!(ReadField::ArrayLength.to_string(), "array length");
        assert_eq!(ReadField::SlicedArray.to_string(), "sliced array");
        assert_eq!(ReadField::Balance.to_string(), "balance");
    }
}
