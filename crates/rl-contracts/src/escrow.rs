use primitive_types::U256;
use rl_api_types::{CaseData, CaseStatus, LegalCase};
use rl_provider::ContractSigner;
use std::rc::Rc;

use crate::abi::{ParamType, Token};
use crate::client::{ContractHandle, Fields, TxHash, address_arg, decoded};
use crate::error::ContractResult;

const CREATE_CASE: &str = "createCase(string,address,address,uint256,uint256)";
const FUND_CASE: &str = "fundCase(string)";
const ACCEPT_CASE: &str = "acceptCase(string)";
const RESOLVE_CASE: &str = "resolveCase(string)";
const DISPUTE_CASE: &str = "disputeCase(string)";
const RELEASE_FUNDS: &str = "releaseFunds(string)";
const REFUND_CASE: &str = "refundCase(string)";
const PAUSE: &str = "pause()";
const UNPAUSE: &str = "unpause()";
const GET_CASE_DATA: &str = "getCaseData(string)";
const GET_CASE_STATUS: &str = "getCaseStatus(string)";
const GET_CASE_BALANCE: &str = "getCaseBalance(string)";

pub struct EscrowClient {
    handle: ContractHandle,
}

impl EscrowClient {
    pub fn new(address: &str, signer: Rc<dyn ContractSigner>) -> Self {
        Self {
            handle: ContractHandle::new(address, signer),
        }
    }

    pub fn address(&self) -> &str {
        self.handle.address()
    }

    /// `token` is the zero address for native AVAX; `deadline` is unix seconds.
    pub async fn create_case(
        &self,
        case_id: &str,
        lawyer: &str,
        token: &str,
        amount: U256,
        deadline: u64,
    ) -> ContractResult<TxHash> {
        let args = [
            Token::string(case_id),
            address_arg(CREATE_CASE, lawyer)?,
            address_arg(CREATE_CASE, token)?,
            Token::Uint(amount),
            Token::uint(deadline),
        ];
        self.handle.write(CREATE_CASE, &args, None).await
    }

    /// Funds the escrow; `value` carries native AVAX in wei for
    /// AVAX-denominated cases.
    pub async fn fund_case(&self, case_id: &str, value: Option<U256>) -> ContractResult<TxHash> {
        self.handle
            .write(FUND_CASE, &[Token::string(case_id)], value)
            .await
    }

    pub async fn accept_case(&self, case_id: &str) -> ContractResult<TxHash> {
        self.transition(ACCEPT_CASE, case_id).await
    }

    pub async fn resolve_case(&self, case_id: &str) -> ContractResult<TxHash> {
        self.transition(RESOLVE_CASE, case_id).await
    }

    pub async fn dispute_case(&self, case_id: &str) -> ContractResult<TxHash> {
        self.transition(DISPUTE_CASE, case_id).await
    }

    pub async fn release_funds(&self, case_id: &str) -> ContractResult<TxHash> {
        self.transition(RELEASE_FUNDS, case_id).await
    }

    pub async fn refund_case(&self, case_id: &str) -> ContractResult<TxHash> {
        self.transition(REFUND_CASE, case_id).await
    }

    /// Admin only; the contract reverts for any other sender.
    pub async fn pause(&self) -> ContractResult<TxHash> {
        self.handle.write(PAUSE, &[], None).await
    }

    pub async fn unpause(&self) -> ContractResult<TxHash> {
        self.handle.write(UNPAUSE, &[], None).await
    }

    pub async fn case_data(&self, case_id: &str) -> ContractResult<CaseData> {
        let output = ParamType::Tuple(vec![
            ParamType::Address,
            ParamType::Address,
            ParamType::Address,
            ParamType::Uint,
            ParamType::Uint,
            ParamType::Uint,
            ParamType::Uint,
        ]);
        let token = self
            .handle
            .read_one(GET_CASE_DATA, &[Token::string(case_id)], output)
            .await?;
        let mut fields = Fields::new(GET_CASE_DATA, token)?;
        Ok(CaseData {
            client: fields.address()?,
            lawyer: fields.address()?,
            token: fields.address()?,
            amount: fields.uint()?.to_string(),
            created_at: fields.u64()?,
            deadline: fields.u64()?,
            status: CaseStatus::from_u8(fields.u8()?),
        })
    }

    pub async fn case_status(&self, case_id: &str) -> ContractResult<CaseStatus> {
        let token = self
            .handle
            .read_one(GET_CASE_STATUS, &[Token::string(case_id)], ParamType::Uint)
            .await?;
        decoded(GET_CASE_STATUS, token.into_u8()).map(CaseStatus::from_u8)
    }

    /// Escrowed balance in wei.
    pub async fn case_balance(&self, case_id: &str) -> ContractResult<U256> {
        let token = self
            .handle
            .read_one(GET_CASE_BALANCE, &[Token::string(case_id)], ParamType::Uint)
            .await?;
        decoded(GET_CASE_BALANCE, token.into_uint())
    }

    /// Catalog cases with their status read from the escrow.
    pub async fn refresh_cases(&self, catalog: Vec<LegalCase>) -> ContractResult<Vec<LegalCase>> {
        let mut cases = Vec::with_capacity(catalog.len());
        for mut case in catalog {
            case.status = self.case_status(&case.id).await?;
            cases.push(case);
        }
        Ok(cases)
    }

    async fn transition(&self, signature: &'static str, case_id: &str) -> ContractResult<TxHash> {
        self.handle
            .write(signature, &[Token::string(case_id)], None)
            .await
    }
}
