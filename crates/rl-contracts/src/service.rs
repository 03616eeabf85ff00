use rl_provider::ContractSigner;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use tracing::{debug, info};

use crate::addresses::{AddressOverrides, ContractAddresses};
use crate::documents::DocumentsClient;
use crate::error::{ContractError, ContractResult};
use crate::escrow::EscrowClient;
use crate::fund::FundClient;
use crate::listings::ListingsClient;
use crate::roles::RolesClient;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceName {
    Roles,
    Documents,
    Escrow,
    Fund,
    Listings,
}

impl ServiceName {
    pub const ALL: [ServiceName; 5] = [
        Self::Roles,
        Self::Documents,
        Self::Escrow,
        Self::Fund,
        Self::Listings,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Roles => "roles",
            Self::Documents => "documents",
            Self::Escrow => "escrow",
            Self::Fund => "fund",
            Self::Listings => "listings",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|service| service.as_str() == name)
    }
}

impl fmt::Display for ServiceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which clients are currently bound.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractStatus {
    pub roles: bool,
    pub documents: bool,
    pub escrow: bool,
    pub fund: bool,
    pub listings: bool,
}

impl ContractStatus {
    pub fn get(&self, name: ServiceName) -> bool {
        match name {
            ServiceName::Roles => self.roles,
            ServiceName::Documents => self.documents,
            ServiceName::Escrow => self.escrow,
            ServiceName::Fund => self.fund,
            ServiceName::Listings => self.listings,
        }
    }

    pub fn bound_count(&self) -> usize {
        ServiceName::ALL.iter().filter(|name| self.get(**name)).count()
    }
}

#[derive(Default)]
struct Bindings {
    signer: Option<Rc<dyn ContractSigner>>,
    roles: Option<Rc<RolesClient>>,
    documents: Option<Rc<DocumentsClient>>,
    escrow: Option<Rc<EscrowClient>>,
    fund: Option<Rc<FundClient>>,
    listings: Option<Rc<ListingsClient>>,
}

/// Registry of contract clients bound to the connected account's signer.
///
/// Shared by the wallet connector (which binds and clears it) and the
/// data layer (which reads through it). Getters return `None` until a
/// signer is bound and the matching address is configured.
#[derive(Default)]
pub struct ContractService {
    defaults: ContractAddresses,
    bindings: RefCell<Bindings>,
}

impl ContractService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `addresses` as the base that `initialize` overrides apply to.
    pub fn with_addresses(addresses: ContractAddresses) -> Self {
        Self {
            defaults: addresses,
            bindings: RefCell::default(),
        }
    }

    pub fn from_env() -> Self {
        Self::with_addresses(ContractAddresses::from_env())
    }

    pub fn default_addresses(&self) -> &ContractAddresses {
        &self.defaults
    }

    /// Binds a client for every configured address, replacing all previous
    /// bindings.
    pub fn initialize(&self, signer: Rc<dyn ContractSigner>, overrides: &AddressOverrides) {
        let addresses = self.defaults.merged(overrides);
        let next = Bindings {
            roles: deployed(&addresses.roles).map(|a| Rc::new(RolesClient::new(a, Rc::clone(&signer)))),
            documents: deployed(&addresses.documents)
                .map(|a| Rc::new(DocumentsClient::new(a, Rc::clone(&signer)))),
            escrow: deployed(&addresses.escrow).map(|a| Rc::new(EscrowClient::new(a, Rc::clone(&signer)))),
            fund: deployed(&addresses.fund).map(|a| Rc::new(FundClient::new(a, Rc::clone(&signer)))),
            listings: deployed(&addresses.listings)
                .map(|a| Rc::new(ListingsClient::new(a, Rc::clone(&signer)))),
            signer: Some(signer),
        };
        *self.bindings.borrow_mut() = next;

        let status = self.contract_status();
        info!(
            "contract services bound for {} ({} of {} deployed)",
            self.signer().map(|s| s.address().to_owned()).unwrap_or_default(),
            status.bound_count(),
            ServiceName::ALL.len()
        );
    }

    pub fn is_initialized(&self) -> bool {
        self.bindings.borrow().signer.is_some()
    }

    pub fn signer(&self) -> Option<Rc<dyn ContractSigner>> {
        self.bindings.borrow().signer.clone()
    }

    pub fn roles(&self) -> Option<Rc<RolesClient>> {
        self.bindings.borrow().roles.clone()
    }

    pub fn documents(&self) -> Option<Rc<DocumentsClient>> {
        self.bindings.borrow().documents.clone()
    }

    pub fn escrow(&self) -> Option<Rc<EscrowClient>> {
        self.bindings.borrow().escrow.clone()
    }

    pub fn fund(&self) -> Option<Rc<FundClient>> {
        self.bindings.borrow().fund.clone()
    }

    pub fn listings(&self) -> Option<Rc<ListingsClient>> {
        self.bindings.borrow().listings.clone()
    }

    /// Like the getters, but unbound is an error.
    pub fn require_roles(&self) -> ContractResult<Rc<RolesClient>> {
        self.roles().ok_or(ContractError::NotBound(ServiceName::Roles))
    }

    pub fn require_documents(&self) -> ContractResult<Rc<DocumentsClient>> {
        self.documents().ok_or(ContractError::NotBound(ServiceName::Documents))
    }

    pub fn require_escrow(&self) -> ContractResult<Rc<EscrowClient>> {
        self.escrow().ok_or(ContractError::NotBound(ServiceName::Escrow))
    }

    pub fn require_fund(&self) -> ContractResult<Rc<FundClient>> {
        self.fund().ok_or(ContractError::NotBound(ServiceName::Fund))
    }

    pub fn require_listings(&self) -> ContractResult<Rc<ListingsClient>> {
        self.listings().ok_or(ContractError::NotBound(ServiceName::Listings))
    }

    pub fn has_service(&self, name: ServiceName) -> bool {
        let bindings = self.bindings.borrow();
        match name {
            ServiceName::Roles => bindings.roles.is_some(),
            ServiceName::Documents => bindings.documents.is_some(),
            ServiceName::Escrow => bindings.escrow.is_some(),
            ServiceName::Fund => bindings.fund.is_some(),
            ServiceName::Listings => bindings.listings.is_some(),
        }
    }

    pub fn contract_status(&self) -> ContractStatus {
        ContractStatus {
            roles: self.has_service(ServiceName::Roles),
            documents: self.has_service(ServiceName::Documents),
            escrow: self.has_service(ServiceName::Escrow),
            fund: self.has_service(ServiceName::Fund),
            listings: self.has_service(ServiceName::Listings),
        }
    }

    pub fn clear(&self) {
        *self.bindings.borrow_mut() = Bindings::default();
        debug!("contract services cleared");
    }
}

fn deployed(address: &str) -> Option<&str> {
    (!address.is_empty()).then_some(address)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use rl_provider::TransactionRequest;

    struct NullSigner(&'static str);

    #[async_trait(?Send)]
    impl ContractSigner for NullSigner {
        fn address(&self) -> &str {
            self.0
        }

        async fn call(&self, _to: &str, _data: &[u8]) -> anyhow::Result<Vec<u8>> {
            Ok(Vec::new())
        }

        async fn send_transaction(&self, _tx: TransactionRequest) -> anyhow::Result<String> {
            Ok("0x0".to_owned())
        }
    }

    fn signer(address: &'static str) -> Rc<dyn ContractSigner> {
        Rc::new(NullSigner(address))
    }

    #[test]
    fn unbound_service_yields_none() {
        let service = ContractService::new();
        assert!(!service.is_initialized());
        assert!(service.roles().is_none());
        assert!(service.escrow().is_none());
        assert!(matches!(
            service.require_fund(),
            Err(ContractError::NotBound(ServiceName::Fund))
        ));
        assert_eq!(service.contract_status(), ContractStatus::default());
    }

    #[test]
    fn initialize_binds_only_configured_addresses() {
        let service = ContractService::with_addresses(ContractAddresses {
            escrow: "0x00000000000000000000000000000000000000e5".to_owned(),
            ..Default::default()
        });
        service.initialize(signer("0xaaa"), &AddressOverrides::default());

        assert!(service.is_initialized());
        assert!(service.has_service(ServiceName::Escrow));
        assert!(!service.has_service(ServiceName::Roles));
        assert_eq!(
            service.escrow().map(|c| c.address().to_owned()),
            Some("0x00000000000000000000000000000000000000e5".to_owned())
        );
        assert_eq!(service.contract_status().bound_count(), 1);
    }

    #[test]
    fn initialize_twice_replaces_bindings() {
        let service = ContractService::new();
        service.initialize(
            signer("0xfirst"),
            &AddressOverrides::default().with(ServiceName::Roles, "0x01"),
        );
        service.initialize(
            signer("0xsecond"),
            &AddressOverrides::default().with(ServiceName::Fund, "0x02"),
        );

        assert!(!service.has_service(ServiceName::Roles));
        assert!(service.has_service(ServiceName::Fund));
        assert_eq!(service.signer().map(|s| s.address().to_owned()).as_deref(), Some("0xsecond"));
    }

    #[test]
    fn clear_unbinds_everything() {
        let service = ContractService::new();
        service.initialize(
            signer("0xaaa"),
            &AddressOverrides::default()
                .with(ServiceName::Documents, "0x01")
                .with(ServiceName::Listings, "0x02"),
        );
        service.clear();

        assert!(!service.is_initialized());
        assert!(service.signer().is_none());
        assert_eq!(service.contract_status().bound_count(), 0);
    }

    #[test]
    fn service_names_round_trip() {
        for name in ServiceName::ALL {
            assert_eq!(ServiceName::parse(name.as_str()), Some(name));
        }
        assert_eq!(ServiceName::parse("readyDocs"), None);
    }
}
