//! Typed clients for the ReadyLaw marketplace contracts.
//!
//! Each client wraps one deployed contract and talks to it through a
//! [`rl_provider::ContractSigner`]. [`ContractService`] holds the set of
//! clients bound to the connected account and is shared between the
//! wallet connector and the data layer.

pub mod abi;
mod addresses;
mod client;
mod documents;
mod error;
mod escrow;
mod fund;
mod listings;
mod roles;
mod service;
pub mod units;

pub use addresses::{
    AddressOverrides, ContractAddresses, DOCS_ADDRESS_ENV, ESCROW_ADDRESS_ENV, FUND_ADDRESS_ENV,
    LISTINGS_ADDRESS_ENV, MAIN_CONTRACT_ADDRESS, ROLES_ADDRESS_ENV,
};
pub use client::TxHash;
pub use documents::{DocumentsClient, doc_key};
pub use error::{ContractError, ContractResult};
pub use escrow::EscrowClient;
pub use fund::FundClient;
pub use listings::ListingsClient;
pub use roles::RolesClient;
pub use service::{ContractService, ContractStatus, ServiceName};

/// Token address used for native AVAX in escrow and fund calls.
pub const NATIVE_TOKEN: &str = "0x0000000000000000000000000000000000000000";
