//! Injected wallet provider boundary (EIP-1193).
//!
//! The browser wallet is reached through [`WalletProvider`]: a JSON-RPC
//! `request` plus an event emitter for `accountsChanged` / `chainChanged`.
//! Everything is single-threaded; futures are not `Send`.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

mod error;
mod events;
mod signer;

pub use error::ProviderError;
pub use events::{Listener, ListenerId, ListenerSet, ProviderEvent, ProviderEventKind, Subscription};
pub use signer::{ContractSigner, ProviderSigner, TransactionRequest};

pub mod methods {
    pub const ETH_REQUEST_ACCOUNTS: &str = "eth_requestAccounts";
    pub const ETH_ACCOUNTS: &str = "eth_accounts";
    pub const ETH_CHAIN_ID: &str = "eth_chainId";
    pub const ETH_CALL: &str = "eth_call";
    pub const ETH_SEND_TRANSACTION: &str = "eth_sendTransaction";
    pub const WALLET_SWITCH_CHAIN: &str = "wallet_switchEthereumChain";
    pub const WALLET_ADD_CHAIN: &str = "wallet_addEthereumChain";
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RequestArguments {
    pub method: String,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub params: Value,
}

impl RequestArguments {
    pub fn new(method: &str, params: Value) -> Self {
        Self {
            method: method.to_owned(),
            params,
        }
    }

    pub fn without_params(method: &str) -> Self {
        Self::new(method, Value::Null)
    }
}

#[async_trait(?Send)]
pub trait WalletProvider {
    async fn request(&self, args: RequestArguments) -> Result<Value, ProviderError>;

    fn add_listener(&self, kind: ProviderEventKind, listener: Listener) -> ListenerId;

    fn remove_listener(&self, kind: ProviderEventKind, id: ListenerId);

    /// Prompts the user to authorize accounts.
    async fn request_accounts(&self) -> Result<Vec<String>, ProviderError> {
        let value = self
            .request(RequestArguments::without_params(methods::ETH_REQUEST_ACCOUNTS))
            .await?;
        decode_accounts(value)
    }

    /// Already-authorized accounts; never prompts.
    async fn accounts(&self) -> Result<Vec<String>, ProviderError> {
        let value = self
            .request(RequestArguments::without_params(methods::ETH_ACCOUNTS))
            .await?;
        decode_accounts(value)
    }

    async fn chain_id(&self) -> Result<u64, ProviderError> {
        let value = self
            .request(RequestArguments::without_params(methods::ETH_CHAIN_ID))
            .await?;
        let raw = value
            .as_str()
            .ok_or_else(|| ProviderError::invalid_response("eth_chainId did not return a string"))?;
        rl_network::parse_chain_id(raw).map_err(|err| ProviderError::invalid_response(&err.to_string()))
    }
}

fn decode_accounts(value: Value) -> Result<Vec<String>, ProviderError> {
    serde_json::from_value(value)
        .map_err(|err| ProviderError::invalid_response(&format!("accounts payload: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::RefCell;

    struct FixedProvider {
        responses: RefCell<Vec<Value>>,
        listeners: ListenerSet,
    }

    #[async_trait(?Send)]
    impl WalletProvider for FixedProvider {
        async fn request(&self, _args: RequestArguments) -> Result<Value, ProviderError> {
            Ok(self.responses.borrow_mut().remove(0))
        }

        fn add_listener(&self, kind: ProviderEventKind, listener: Listener) -> ListenerId {
            self.listeners.add(kind, listener)
        }

        fn remove_listener(&self, _kind: ProviderEventKind, id: ListenerId) {
            self.listeners.remove(id);
        }
    }

    fn provider(responses: Vec<Value>) -> FixedProvider {
        FixedProvider {
            responses: RefCell::new(responses),
            listeners: ListenerSet::default(),
        }
    }

    #[test]
    fn request_arguments_omit_null_params() {
        let args = RequestArguments::without_params(methods::ETH_ACCOUNTS);
        assert_eq!(serde_json::to_value(&args).unwrap(), json!({ "method": "eth_accounts" }));
    }

    #[tokio::test]
    async fn chain_id_parses_hex() {
        let provider = provider(vec![json!("0xa869")]);
        assert_eq!(provider.chain_id().await.unwrap(), 43113);
    }

    #[tokio::test]
    async fn malformed_accounts_payload_is_an_error() {
        let provider = provider(vec![json!({ "not": "a list" })]);
        let err = provider.accounts().await.unwrap_err();
        assert_eq!(err.code, ProviderError::INTERNAL_ERROR);
    }

    #[tokio::test]
    async fn accounts_decode_address_list() {
        let provider = provider(vec![json!(["0xabc", "0xdef"])]);
        assert_eq!(provider.request_accounts().await.unwrap(), vec!["0xabc", "0xdef"]);
    }
}
