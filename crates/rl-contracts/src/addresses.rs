use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ServiceName;

/// Marketplace main contract on Avalanche.
pub const MAIN_CONTRACT_ADDRESS: &str = "0x7113C79e62FC58886325314dF173d6A55fC85902";

pub const ROLES_ADDRESS_ENV: &str = "READYLAW_ROLES_ADDRESS";
pub const DOCS_ADDRESS_ENV: &str = "READYLAW_DOCS_ADDRESS";
pub const ESCROW_ADDRESS_ENV: &str = "READYLAW_ESCROW_ADDRESS";
pub const FUND_ADDRESS_ENV: &str = "READYLAW_FUND_ADDRESS";
pub const LISTINGS_ADDRESS_ENV: &str = "READYLAW_LISTINGS_ADDRESS";

/// Deployed contract addresses. An empty string means "not deployed" and
/// leaves the matching client unbound.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractAddresses {
    pub roles: String,
    pub documents: String,
    pub escrow: String,
    pub fund: String,
    pub listings: String,
}

impl ContractAddresses {
    /// Reads the `READYLAW_*_ADDRESS` variables; unset ones stay empty.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| {
            let value = lookup(key).map(|raw| raw.trim().to_owned()).unwrap_or_default();
            if !value.is_empty() {
                debug!("{key} = {value}");
            }
            value
        };
        Self {
            roles: read(ROLES_ADDRESS_ENV),
            documents: read(DOCS_ADDRESS_ENV),
            escrow: read(ESCROW_ADDRESS_ENV),
            fund: read(FUND_ADDRESS_ENV),
            listings: read(LISTINGS_ADDRESS_ENV),
        }
    }

    pub fn get(&self, name: ServiceName) -> &str {
        match name {
            ServiceName::Roles => &self.roles,
            ServiceName::Documents => &self.documents,
            ServiceName::Escrow => &self.escrow,
            ServiceName::Fund => &self.fund,
            ServiceName::Listings => &self.listings,
        }
    }

    pub fn is_deployed(&self, name: ServiceName) -> bool {
        !self.get(name).is_empty()
    }

    pub fn merged(&self, overrides: &AddressOverrides) -> Self {
        let pick = |base: &String, over: &Option<String>| over.clone().unwrap_or_else(|| base.clone());
        Self {
            roles: pick(&self.roles, &overrides.roles),
            documents: pick(&self.documents, &overrides.documents),
            escrow: pick(&self.escrow, &overrides.escrow),
            fund: pick(&self.fund, &overrides.fund),
            listings: pick(&self.listings, &overrides.listings),
        }
    }
}

/// Per-service replacements applied on top of [`ContractAddresses`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressOverrides {
    pub roles: Option<String>,
    pub documents: Option<String>,
    pub escrow: Option<String>,
    pub fund: Option<String>,
    pub listings: Option<String>,
}

impl AddressOverrides {
    pub fn with(mut self, name: ServiceName, address: impl Into<String>) -> Self {
        let slot = match name {
            ServiceName::Roles => &mut self.roles,
            ServiceName::Documents => &mut self.documents,
            ServiceName::Escrow => &mut self.escrow,
            ServiceName::Fund => &mut self.fund,
            ServiceName::Listings => &mut self.listings,
        };
        *slot = Some(address.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        ServiceName::ALL.iter().all(|name| self.get(*name).is_none())
    }

    pub fn get(&self, name: ServiceName) -> Option<&str> {
        match name {
            ServiceName::Roles => self.roles.as_deref(),
            ServiceName::Documents => self.documents.as_deref(),
            ServiceName::Escrow => self.escrow.as_deref(),
            ServiceName::Fund => self.fund.as_deref(),
            ServiceName::Listings => self.listings.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn lookup_fills_configured_services_only() {
        let vars = HashMap::from([
            (ESCROW_ADDRESS_ENV, "  0x00000000000000000000000000000000000000e5 "),
            (FUND_ADDRESS_ENV, ""),
        ]);
        let addresses = ContractAddresses::from_lookup(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(addresses.escrow, "0x00000000000000000000000000000000000000e5");
        assert!(addresses.is_deployed(ServiceName::Escrow));
        assert!(!addresses.is_deployed(ServiceName::Fund));
        assert!(!addresses.is_deployed(ServiceName::Roles));
    }

    #[test]
    fn overrides_replace_only_named_services() {
        let base = ContractAddresses {
            roles: "0xroles".to_owned(),
            escrow: "0xescrow".to_owned(),
            ..Default::default()
        };
        let overrides = AddressOverrides::default()
            .with(ServiceName::Escrow, "0xnew-escrow")
            .with(ServiceName::Listings, "0xlistings");

        let merged = base.merged(&overrides);
        assert_eq!(merged.roles, "0xroles");
        assert_eq!(merged.escrow, "0xnew-escrow");
        assert_eq!(merged.listings, "0xlistings");
        assert_eq!(merged.documents, "");
        assert!(!overrides.is_empty());
        assert!(AddressOverrides::default().is_empty());
    }

    #[test]
    fn defaults_are_undeployed() {
        let addresses = ContractAddresses::default();
        assert!(ServiceName::ALL.iter().all(|name| !addresses.is_deployed(*name)));
        assert_eq!(MAIN_CONTRACT_ADDRESS.len(), 42);
    }
}
