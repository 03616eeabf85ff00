use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use primitive_types::U256;
use serde_json::{Value, json};
use std::rc::Rc;
use tracing::debug;

use crate::{RequestArguments, WalletProvider, methods};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRequest {
    pub to: String,
    pub data: Vec<u8>,
    /// Native value in wei attached to a payable call.
    pub value: Option<U256>,
}

/// Authorizes calls and transactions on behalf of the connected account.
#[async_trait(?Send)]
pub trait ContractSigner {
    fn address(&self) -> &str;

    /// Read-only call; returns the raw ABI-encoded return data.
    async fn call(&self, to: &str, data: &[u8]) -> Result<Vec<u8>>;

    /// Submits a transaction; returns its hash.
    async fn send_transaction(&self, tx: TransactionRequest) -> Result<String>;
}

/// Signer that routes through the wallet provider (`eth_call`,
/// `eth_sendTransaction`), so the wallet prompts for every write.
pub struct ProviderSigner {
    provider: Rc<dyn WalletProvider>,
    address: String,
}

impl ProviderSigner {
    pub fn new(provider: Rc<dyn WalletProvider>, address: impl Into<String>) -> Self {
        Self {
            provider,
            address: address.into(),
        }
    }
}

#[async_trait(?Send)]
impl ContractSigner for ProviderSigner {
    fn address(&self) -> &str {
        &self.address
    }

    async fn call(&self, to: &str, data: &[u8]) -> Result<Vec<u8>> {
        let params = json!([
            {
                "from": self.address,
                "to": to,
                "data": to_hex_data(data),
            },
            "latest"
        ]);
        let value = self
            .provider
            .request(RequestArguments::new(methods::ETH_CALL, params))
            .await
            .with_context(|| format!("eth_call to {to}"))?;

        let raw = value
            .as_str()
            .ok_or_else(|| anyhow!("eth_call to {to} returned non-string result"))?;
        hex::decode(raw.trim_start_matches("0x")).with_context(|| format!("eth_call to {to} returned invalid hex"))
    }

    async fn send_transaction(&self, tx: TransactionRequest) -> Result<String> {
        let mut request = json!({
            "from": self.address,
            "to": tx.to,
            "data": to_hex_data(&tx.data),
        });
        if let Some(value) = tx.value {
            request["value"] = Value::String(format!("0x{value:x}"));
        }

        let result = self
            .provider
            .request(RequestArguments::new(methods::ETH_SEND_TRANSACTION, json!([request])))
            .await
            .with_context(|| format!("eth_sendTransaction to {}", tx.to))?;

        let hash = result
            .as_str()
            .map(ToOwned::to_owned)
            .ok_or_else(|| anyhow!("eth_sendTransaction returned non-string hash"))?;
        debug!("submitted transaction {} from {}", hash, self.address);
        Ok(hash)
    }
}

fn to_hex_data(data: &[u8]) -> String {
    format!("0x{}", hex::encode(data))
}
