use thiserror::Error;

use crate::ServiceName;
use crate::abi::AbiError;

#[derive(Debug, Error)]
pub enum ContractError {
    #[error("{0} contract is not bound")]
    NotBound(ServiceName),
    #[error("invalid argument for {method}")]
    Argument {
        method: &'static str,
        #[source]
        source: AbiError,
    },
    #[error("{method} failed")]
    Call {
        method: &'static str,
        #[source]
        source: anyhow::Error,
    },
    #[error("{method} returned malformed data")]
    Decode {
        method: &'static str,
        #[source]
        source: AbiError,
    },
}

impl ContractError {
    pub fn method(&self) -> Option<&'static str> {
        match self {
            Self::NotBound(_) => None,
            Self::Argument { method, .. } | Self::Call { method, .. } | Self::Decode { method, .. } => {
                Some(method)
            }
        }
    }
}

pub type ContractResult<T> = std::result::Result<T, ContractError>;
