use primitive_types::U256;
use rl_provider::{ContractSigner, TransactionRequest};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;
use tracing::{debug, info};

use crate::abi::{self, AbiError, ParamType, Token};
use crate::error::{ContractError, ContractResult};

/// Hash of a submitted transaction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TxHash(pub String);

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A deployed contract reached through a signer.
#[derive(Clone)]
pub(crate) struct ContractHandle {
    address: String,
    signer: Rc<dyn ContractSigner>,
}

impl ContractHandle {
    pub(crate) fn new(address: &str, signer: Rc<dyn ContractSigner>) -> Self {
        Self {
            address: address.to_owned(),
            signer,
        }
    }

    pub(crate) fn address(&self) -> &str {
        &self.address
    }

    /// `eth_call` of `signature`, decoding the return data as `outputs`.
    pub(crate) async fn read(
        &self,
        signature: &'static str,
        args: &[Token],
        outputs: &[ParamType],
    ) -> ContractResult<Vec<Token>> {
        let data = abi::encode_call(signature, args);
        debug!("call {} on {}", signature, self.address);
        let raw = self
            .signer
            .call(&self.address, &data)
            .await
            .map_err(|source| ContractError::Call {
                method: signature,
                source,
            })?;
        abi::decode(outputs, &raw).map_err(|source| ContractError::Decode {
            method: signature,
            source,
        })
    }

    pub(crate) async fn read_one(
        &self,
        signature: &'static str,
        args: &[Token],
        output: ParamType,
    ) -> ContractResult<Token> {
        let mut tokens = self.read(signature, args, std::slice::from_ref(&output)).await?;
        Ok(tokens.remove(0))
    }

    pub(crate) async fn write(
        &self,
        signature: &'static str,
        args: &[Token],
        value: Option<U256>,
    ) -> ContractResult<TxHash> {
        let tx = TransactionRequest {
            to: self.address.clone(),
            data: abi::encode_call(signature, args),
            value,
        };
        let hash = self
            .signer
            .send_transaction(tx)
            .await
            .map_err(|source| ContractError::Call {
                method: signature,
                source,
            })?;
        info!("{} sent to {}: {}", signature, self.address, hash);
        Ok(TxHash(hash))
    }
}

pub(crate) fn address_arg(method: &'static str, address: &str) -> ContractResult<Token> {
    Token::address(address).map_err(|source| ContractError::Argument { method, source })
}

/// Maps a token conversion failure onto the method that produced it.
pub(crate) fn decoded<T>(method: &'static str, result: Result<T, AbiError>) -> ContractResult<T> {
    result.map_err(|source| ContractError::Decode { method, source })
}

/// Pulls the next field out of a decoded tuple.
pub(crate) struct Fields {
    method: &'static str,
    items: std::vec::IntoIter<Token>,
}

impl Fields {
    pub(crate) fn new(method: &'static str, token: Token) -> ContractResult<Self> {
        let items = decoded(method, token.into_tuple())?;
        Ok(Self {
            method,
            items: items.into_iter(),
        })
    }

    fn next(&mut self) -> ContractResult<Token> {
        self.items.next().ok_or(ContractError::Decode {
            method: self.method,
            source: AbiError::UnexpectedToken {
                expected: "tuple field",
                found: "end of tuple".to_owned(),
            },
        })
    }

    pub(crate) fn address(&mut self) -> ContractResult<String> {
        let token = self.next()?;
        decoded(self.method, token.into_address())
    }

    pub(crate) fn uint(&mut self) -> ContractResult<U256> {
        let token = self.next()?;
        decoded(self.method, token.into_uint())
    }

    pub(crate) fn u64(&mut self) -> ContractResult<u64> {
        let token = self.next()?;
        decoded(self.method, token.into_u64())
    }

    pub(crate) fn u8(&mut self) -> ContractResult<u8> {
        let token = self.next()?;
        decoded(self.method, token.into_u8())
    }

    pub(crate) fn bool(&mut self) -> ContractResult<bool> {
        let token = self.next()?;
        decoded(self.method, token.into_bool())
    }

    pub(crate) fn string(&mut self) -> ContractResult<String> {
        let token = self.next()?;
        decoded(self.method, token.into_string())
    }

    pub(crate) fn strings(&mut self) -> ContractResult<Vec<String>> {
        let token = self.next()?;
        decoded(self.method, token.into_strings())
    }
}
