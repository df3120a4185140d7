use std::sync::Arc;

use alloy::network::{Ethereum, ReceiptResponse};
use alloy::primitives::{Address, Bytes, B256, U256};
use alloy::providers::{PendingTransactionBuilder, Provider};
use alloy::rpc::types::TransactionRequest;
use alloy::sol;
use alloy::sol_types::SolCall;
use async_trait::async_trait;

use crate::data::ChainError;

// ABI of the deployed Counter contract
sol! {
    #[allow(missing_docs)]
    interface Counter {
        function num() external view returns (uint256);
        function getArrayLength() external view returns (uint256);
        function getSlicedArray() external view returns (string[]);
        function setNum(uint256 newNum) external payable;
    }
}

/// Outcome of a transaction that made it into a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inclusion {
    pub tx_hash: B256,
    pub block_number: Option<u64>,
}

/// A sent transaction that has not been waited on yet.
#[async_trait]
pub trait PendingTx: Send {
    fn tx_hash(&self) -> B256;

    /// Wait for one confirmation. Reverted transactions are reported as errors.
    async fn wait(self: Box<Self>) -> Result<Inclusion, ChainError>;
}

/// Client-side handle on a deployed `Counter`.
#[async_trait]
pub trait CounterContract: Send + Sync {
    fn address(&self) -> Address;

    async fn num(&self) -> Result<U256, ChainError>;

    async fn array_length(&self) -> Result<U256, ChainError>;

    async fn sliced_array(&self) -> Result<Vec<String>, ChainError>;

    async fn set_num(&self, value: U256) -> Result<Box<dyn PendingTx>, ChainError>;
}

/// `Counter` binding that talks to a node through an alloy provider.
pub struct RpcCounter {
    provider: Arc<dyn Provider + Send + Sync>,
    address: Address,
    /// Account transactions are sent from
    sender: Address,
    /// Wei attached to every `setNum` call
    set_num_value: U256,
}

impl RpcCounter {
    pub fn new(
        provider: Arc<dyn Provider + Send + Sync>,
        address: Address,
        sender: Address,
        set_num_value: U256,
    ) -> Self {
        Self {
            provider,
            address,
            sender,
            set_num_value,
        }
    }

    async fn call<C: SolCall>(&self, call: C) -> Result<C::Return, ChainError> {
        let request = TransactionRequest::default()
            .from(self.sender)
            .to(self.address)
            .input(Bytes::from(call.abi_encode()).into());
        let output = self.provider.call(request).await?;
        C::abi_decode_returns(&output, true).map_err(|source| ChainError::Decode {
            call: C::SIGNATURE,
            source,
        })
    }
}

#[async_trait]
impl CounterContract for RpcCounter {
    fn address(&self) -> Address {
        self.address
    }

    async fn num(&self) -> Result<U256, ChainError> {
        Ok(self.call(Counter::numCall {}).await?._0)
    }

    async fn array_length(&self) -> Result<U256, ChainError> {
        Ok(self.call(Counter::getArrayLengthCall {}).await?._0)
    }

    async fn sliced_array(&self) -> Result<Vec<String>, ChainError> {
        Ok(self.call(Counter::getSlicedArrayCall {}).await?._0)
    }

    async fn set_num(&self, value: U256) -> Result<Box<dyn PendingTx>, ChainError> {
        let calldata = Counter::setNumCall { newNum: value }.abi_encode();
        let request = TransactionRequest::default()
            .from(self.sender)
            .to(self.address)
            .value(self.set_num_value)
            .input(Bytes::from(calldata).into());
        let pending = self.provider.send_transaction(request).await?;
        Ok(Box::new(RpcPendingTx { inner: pending }))
    }
}

struct RpcPendingTx {
    inner: PendingTransactionBuilder<Ethereum>,
}

#[async_trait]
impl PendingTx for RpcPendingTx {
    fn tx_hash(&self) -> B256 {
        *self.inner.tx_hash()
    }

    async fn wait(self: Box<Self>) -> Result<Inclusion, ChainError> {
        let receipt = self
            .inner
            .with_required_confirmations(1)
            .get_receipt()
            .await?;
        if !ReceiptResponse::status(&receipt) {
            return Err(ChainError::Reverted(receipt.transaction_hash));
        }
        Ok(Inclusion {
            tx_hash: receipt.transaction_hash,
            block_number: receipt.block_number,
        })
    }
}
