use std::sync::Arc;

use alloy::network::EthereumWallet;
use alloy::primitives::{Address, U256};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::signers::local::PrivateKeySigner;
use async_trait::async_trait;

use crate::data::counter::{CounterContract, RpcCounter};
use crate::data::ChainError;

/// Account access and signing capability handed to the controller.
#[async_trait]
pub trait Wallet: Send + Sync {
    /// Ask the wallet for account access and return the active account.
    async fn request_account(&self) -> Result<Address, ChainError>;

    /// Native-currency balance of `address` at the latest block, in wei.
    async fn balance_of(&self, address: Address) -> Result<U256, ChainError>;

    /// Bind a `Counter` handle at `address` that sends from `account`.
    ///
    /// Nothing is checked on-chain here: a wrong address only shows up once
    /// the handle is called.
    fn bind_counter(&self, address: Address, account: Address) -> Arc<dyn CounterContract>;
}

/// Wallet backed by a JSON-RPC node, optionally signing with a local key.
pub struct NodeWallet {
    provider: Arc<dyn Provider + Send + Sync>,
    signer_address: Option<Address>,
    set_num_value: U256,
}

impl NodeWallet {
    /// Build a wallet for `rpc_url`. Without a `signer` the node's own
    /// unlocked accounts are used and the node signs transactions.
    pub fn new(
        rpc_url: &str,
        signer: Option<PrivateKeySigner>,
        set_num_value: U256,
    ) -> Result<Self, ChainError> {
        let url = rpc_url
            .parse()
            .map_err(|_| ChainError::InvalidUrl(rpc_url.to_string()))?;

        let signer_address = signer.as_ref().map(|signer| signer.address());
        let provider: Arc<dyn Provider + Send + Sync> = match signer {
            Some(signer) => Arc::new(
                ProviderBuilder::new()
                    .wallet(EthereumWallet::from(signer))
                    .on_http(url),
            ),
            None => Arc::new(ProviderBuilder::new().on_http(url)),
        };

        Ok(Self {
            provider,
            signer_address,
            set_num_value,
        })
    }
}

#[async_trait]
impl Wallet for NodeWallet {
    async fn request_account(&self) -> Result<Address, ChainError> {
        // Probe the node so an unreachable endpoint fails the connect.
        let chain_id = self.provider.get_chain_id().await?;
        tracing::debug!(chain_id, "node reachable");

        if let Some(address) = self.signer_address {
            return Ok(address);
        }

        let accounts: Vec<Address> = match self
            .provider
            .client()
            .request("eth_requestAccounts", Vec::<String>::new())
            .await
        {
            Ok(accounts) => accounts,
            Err(err) => {
                let err = ChainError::from(err);
                if matches!(err, ChainError::Rejected(_)) {
                    return Err(err);
                }
                tracing::debug!(%err, "eth_requestAccounts unsupported, falling back to eth_accounts");
                self.provider.get_accounts().await?
            }
        };

        accounts.first().copied().ok_or(ChainError::NoAccounts)
    }

    async fn balance_of(&self, address: Address) -> Result<U256, ChainError> {
        let balance = self.provider.get_balance(address).await?;
        Ok(balance)
    }

    fn bind_counter(&self, address: Address, account: Address) -> Arc<dyn CounterContract> {
        Arc::new(RpcCounter::new(
            Arc::clone(&self.provider),
            address,
            account,
            self.set_num_value,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_malformed_url() {
        let result = NodeWallet::new("not a url", None, U256::ZERO);
        assert!(matches!(result, Err(ChainError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_binds_counter_at_given_address() {
        let wallet = NodeWallet::new("http://127.0.0.1:8545", None, U256::ZERO).unwrap();
        let address: Address = "0x5FbDB2315678afecb367f032d93F642f64180aa3".parse().unwrap();
        let counter = wallet.bind_counter(address, Address::ZERO);
        assert_eq!(counter.address(), address);
    }
}
