pub mod chains;
pub mod counter;
pub mod wallet;

use alloy::primitives::B256;
use alloy::providers::PendingTransactionError;
use alloy::transports::TransportError;
use thiserror::Error;

/// JSON-RPC error code a wallet returns when the user declines a request (EIP-1193).
pub const USER_REJECTED_CODE: i64 = 4001;

/// Errors raised at the wallet / contract boundary.
#[derive(Debug, Error)]
pub enum ChainError {
    /// The wallet answered but exposed no account
    #[error("wallet returned no accounts")]
    NoAccounts,

    /// The user declined the request in the wallet
    #[error("request rejected by the wallet: {0}")]
    Rejected(String),

    #[error(transparent)]
    Transport(TransportError),

    #[error("failed to decode `{call}` result: {source}")]
    Decode {
        call: &'static str,
        #[source]
        source: alloy::sol_types::Error,
    },

    #[error(transparent)]
    Inclusion(#[from] PendingTransactionError),

    #[error("transaction {0} reverted")]
    Reverted(B256),

    #[error("invalid RPC URL `{0}`")]
    InvalidUrl(String),
}

impl From<TransportError> for ChainError {
    fn from(err: TransportError) -> Self {
        match err.as_error_resp() {
            Some(payload) if payload.code == USER_REJECTED_CODE => {
                ChainError::Rejected(payload.message.to_string())
            }
            _ => ChainError::Transport(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reverted_display_names_hash() {
        let err = ChainError::Reverted(B256::ZERO);
        assert!(err.to_string().contains("reverted"));
        assert!(err.to_string().contains("0x0000"));
    }

    #[test]
    fn test_local_usage_error_maps_to_transport() {
        let err: ChainError = TransportError::local_usage_str("boom").into();
        assert!(matches!(err, ChainError::Transport(_)));
    }
}
