use rl_api_types::{DocType, DocumentStatus, DocumentVersion, LegalDocument};
use rl_provider::ContractSigner;
use std::rc::Rc;

use crate::abi::{self, ParamType, Token};
use crate::client::{ContractHandle, Fields, TxHash, decoded};
use crate::error::ContractResult;

const CREATE_DOCUMENT: &str = "createDocument(bytes32,uint8,string,string)";
const ADD_VERSION: &str = "addVersion(bytes32,string)";
const REVOKE_VERSION: &str = "revokeVersion(bytes32,uint256)";
const DOC_TYPE_OF: &str = "docTypeOf(bytes32)";
const VERSION_COUNT: &str = "versionCount(bytes32)";
const GET_VERSION: &str = "getVersion(bytes32,uint256)";

/// Versioned document registry. Documents are keyed on chain by the
/// keccak-256 of their string id.
pub struct DocumentsClient {
    handle: ContractHandle,
}

impl DocumentsClient {
    pub fn new(address: &str, signer: Rc<dyn ContractSigner>) -> Self {
        Self {
            handle: ContractHandle::new(address, signer),
        }
    }

    pub fn address(&self) -> &str {
        self.handle.address()
    }

    pub async fn create_document(
        &self,
        doc_id: &str,
        doc_type: DocType,
        case_id: &str,
        initial_cid: &str,
    ) -> ContractResult<TxHash> {
        let args = [
            doc_key(doc_id),
            Token::uint(doc_type.as_u8()),
            Token::string(case_id),
            Token::string(initial_cid),
        ];
        self.handle.write(CREATE_DOCUMENT, &args, None).await
    }

    pub async fn add_version(&self, doc_id: &str, cid: &str) -> ContractResult<TxHash> {
        let args = [doc_key(doc_id), Token::string(cid)];
        self.handle.write(ADD_VERSION, &args, None).await
    }

    pub async fn revoke_version(&self, doc_id: &str, index: u64) -> ContractResult<TxHash> {
        let args = [doc_key(doc_id), Token::uint(index)];
        self.handle.write(REVOKE_VERSION, &args, None).await
    }

    pub async fn doc_type(&self, doc_id: &str) -> ContractResult<DocType> {
        let token = self
            .handle
            .read_one(DOC_TYPE_OF, &[doc_key(doc_id)], ParamType::Uint)
            .await?;
        decoded(DOC_TYPE_OF, token.into_u8()).map(DocType::from_u8)
    }

    pub async fn version_count(&self, doc_id: &str) -> ContractResult<u64> {
        let token = self
            .handle
            .read_one(VERSION_COUNT, &[doc_key(doc_id)], ParamType::Uint)
            .await?;
        decoded(VERSION_COUNT, token.into_u64())
    }

    pub async fn version(&self, doc_id: &str, index: u64) -> ContractResult<DocumentVersion> {
        let output = ParamType::Tuple(vec![
            ParamType::String,
            ParamType::Uint,
            ParamType::Bool,
            ParamType::Address,
        ]);
        let token = self
            .handle
            .read_one(GET_VERSION, &[doc_key(doc_id), Token::uint(index)], output)
            .await?;
        let mut fields = Fields::new(GET_VERSION, token)?;
        Ok(DocumentVersion {
            cid: fields.string()?,
            timestamp: fields.u64()?,
            revoked: fields.bool()?,
            author: fields.address()?,
        })
    }

    /// Overlays the latest on-chain version onto each catalog document.
    /// Documents with no versions on chain are returned unchanged.
    pub async fn refresh_documents(&self, catalog: Vec<LegalDocument>) -> ContractResult<Vec<LegalDocument>> {
        let mut documents = Vec::with_capacity(catalog.len());
        for mut document in catalog {
            let count = self.version_count(&document.id).await?;
            if count > 0 {
                let latest = self.version(&document.id, count - 1).await?;
                document.version = u32::try_from(count).unwrap_or(u32::MAX);
                document.cid = latest.cid;
                document.updated_at_ms = latest.timestamp.saturating_mul(1000);
                if latest.revoked {
                    document.status = DocumentStatus::Revoked;
                }
            }
            documents.push(document);
        }
        Ok(documents)
    }
}

pub fn doc_key(doc_id: &str) -> Token {
    Token::FixedBytes(abi::keccak256(doc_id.as_bytes()))
}
