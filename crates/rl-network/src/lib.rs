//! Accepted networks and the policy deciding whether a wallet's chain is usable.
//!
//! Only the two Avalanche C-Chain networks are accepted. Mainnet is the
//! primary network: it is the target of `wallet_switchEthereumChain` and the
//! definition handed to `wallet_addEthereumChain` when the wallet does not
//! know it yet.

use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;

pub const AVALANCHE_MAINNET_ID: u64 = 43114;
pub const AVALANCHE_TESTNET_ID: u64 = 43113;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NativeCurrency {
    pub name: &'static str,
    pub symbol: &'static str,
    pub decimals: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkDescriptor {
    pub chain_id: u64,
    pub display_name: &'static str,
    /// Label shown next to the connection indicator.
    pub short_name: &'static str,
    pub native_currency: NativeCurrency,
    pub rpc_urls: &'static [&'static str],
    pub explorer_urls: &'static [&'static str],
}

const AVAX: NativeCurrency = NativeCurrency {
    name: "AVAX",
    symbol: "AVAX",
    decimals: 18,
};

pub static AVALANCHE_MAINNET: NetworkDescriptor = NetworkDescriptor {
    chain_id: AVALANCHE_MAINNET_ID,
    display_name: "Avalanche C-Chain",
    short_name: "Avalanche Mainnet",
    native_currency: AVAX,
    rpc_urls: &["https://api.avax.network/ext/bc/C/rpc"],
    explorer_urls: &["https://snowtrace.io/"],
};

pub static AVALANCHE_TESTNET: NetworkDescriptor = NetworkDescriptor {
    chain_id: AVALANCHE_TESTNET_ID,
    display_name: "Avalanche Fuji Testnet",
    short_name: "Avalanche Testnet",
    native_currency: AVAX,
    rpc_urls: &["https://api.avax-test.network/ext/bc/C/rpc"],
    explorer_urls: &["https://testnet.snowtrace.io/"],
};

pub static PRIMARY_NETWORK: &NetworkDescriptor = &AVALANCHE_MAINNET;

pub static KNOWN_NETWORKS: [&NetworkDescriptor; 2] = [&AVALANCHE_MAINNET, &AVALANCHE_TESTNET];

// ── EIP-3085 / EIP-3326 parameter shapes ──

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AddChainParameter<'a> {
    chain_id: String,
    chain_name: &'a str,
    native_currency: NativeCurrency,
    rpc_urls: &'a [&'a str],
    block_explorer_urls: &'a [&'a str],
}

impl NetworkDescriptor {
    pub fn hex_chain_id(&self) -> String {
        to_hex_chain_id(self.chain_id)
    }

    /// Single-element params array for `wallet_switchEthereumChain`.
    pub fn switch_chain_params(&self) -> Value {
        json!([{ "chainId": self.hex_chain_id() }])
    }

    /// Single-element params array for `wallet_addEthereumChain`.
    pub fn add_chain_params(&self) -> Value {
        let parameter = AddChainParameter {
            chain_id: self.hex_chain_id(),
            chain_name: self.display_name,
            native_currency: self.native_currency,
            rpc_urls: self.rpc_urls,
            block_explorer_urls: self.explorer_urls,
        };
        json!([parameter])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkStatus {
    NotConnected,
    Accepted(&'static NetworkDescriptor),
    Unrecognized(u64),
}

impl NetworkStatus {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::NotConnected => "Not Connected",
            Self::Accepted(network) => network.short_name,
            Self::Unrecognized(_) => "Unknown Network",
        }
    }

    pub fn indicator(&self) -> &'static str {
        match self {
            Self::NotConnected => "disconnected",
            Self::Accepted(_) => "connected",
            Self::Unrecognized(_) => "warning",
        }
    }
}

/// Classify the wallet's chain. Pure: same inputs, same answer.
pub fn classify(chain_id: Option<u64>, connected: bool) -> NetworkStatus {
    if !connected {
        return NetworkStatus::NotConnected;
    }
    match chain_id {
        None => NetworkStatus::NotConnected,
        Some(id) => match known_network(id) {
            Some(network) => NetworkStatus::Accepted(network),
            None => NetworkStatus::Unrecognized(id),
        },
    }
}

pub fn known_network(chain_id: u64) -> Option<&'static NetworkDescriptor> {
    KNOWN_NETWORKS
        .iter()
        .copied()
        .find(|network| network.chain_id == chain_id)
}

pub fn is_accepted(chain_id: u64) -> bool {
    known_network(chain_id).is_some()
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid chain id '{0}'")]
pub struct InvalidChainId(pub String);

pub fn to_hex_chain_id(chain_id: u64) -> String {
    format!("0x{chain_id:x}")
}

/// Wallets report chain ids as `0x`-hex; some report decimal strings.
pub fn parse_chain_id(raw: &str) -> Result<u64, InvalidChainId> {
    let trimmed = raw.trim();
    let parsed = match trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => trimmed.parse::<u64>(),
    };
    parsed.map_err(|_| InvalidChainId(raw.to_owned()))
}
