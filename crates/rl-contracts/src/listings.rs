use primitive_types::U256;
use rl_api_types::{CaseSignalData, LawyerResponseData, ListingData, User, UserRole};
use rl_provider::ContractSigner;
use std::rc::Rc;

use crate::abi::{ParamType, Token};
use crate::client::{ContractHandle, Fields, TxHash, address_arg, decoded};
use crate::error::ContractResult;

const CREATE_LISTING: &str = "createListing(string,uint256,string[])";
const UPDATE_LISTING: &str = "updateListing(string,uint256,string[])";
const REMOVE_LISTING: &str = "removeListing()";
const CREATE_CASE_SIGNAL: &str = "createCaseSignal(string,string,uint256,uint256,string[])";
const RESPOND_TO_SIGNAL: &str = "respondToSignal(string,string,uint256,uint256,string[])";
const GET_LISTING: &str = "getListing(address)";
const GET_CASE_SIGNAL: &str = "getCaseSignal(string)";
const GET_SIGNAL_RESPONSES: &str = "getSignalResponses(string)";
const GET_LAWYER_RESPONSE: &str = "getLawyerResponse(string,address)";

/// Lawyer listings and the case signals clients post for them.
pub struct ListingsClient {
    handle: ContractHandle,
}

impl ListingsClient {
    pub fn new(address: &str, signer: Rc<dyn ContractSigner>) -> Self {
        Self {
            handle: ContractHandle::new(address, signer),
        }
    }

    pub fn address(&self) -> &str {
        self.handle.address()
    }

    pub async fn create_listing(
        &self,
        profile_uri: &str,
        hourly_rate: U256,
        tags: &[String],
    ) -> ContractResult<TxHash> {
        let args = [Token::string(profile_uri), Token::Uint(hourly_rate), Token::strings(tags)];
        self.handle.write(CREATE_LISTING, &args, None).await
    }

    pub async fn update_listing(
        &self,
        profile_uri: &str,
        hourly_rate: U256,
        tags: &[String],
    ) -> ContractResult<TxHash> {
        let args = [Token::string(profile_uri), Token::Uint(hourly_rate), Token::strings(tags)];
        self.handle.write(UPDATE_LISTING, &args, None).await
    }

    pub async fn remove_listing(&self) -> ContractResult<TxHash> {
        self.handle.write(REMOVE_LISTING, &[], None).await
    }

    pub async fn create_case_signal(
        &self,
        signal_id: &str,
        case_uri: &str,
        budget_min: U256,
        budget_max: U256,
        tags: &[String],
    ) -> ContractResult<TxHash> {
        let args = [
            Token::string(signal_id),
            Token::string(case_uri),
            Token::Uint(budget_min),
            Token::Uint(budget_max),
            Token::strings(tags),
        ];
        self.handle.write(CREATE_CASE_SIGNAL, &args, None).await
    }

    pub async fn respond_to_signal(
        &self,
        signal_id: &str,
        proposal: &str,
        estimated_cost: U256,
        estimated_duration: U256,
        qualifications: &[String],
    ) -> ContractResult<TxHash> {
        let args = [
            Token::string(signal_id),
            Token::string(proposal),
            Token::Uint(estimated_cost),
            Token::Uint(estimated_duration),
            Token::strings(qualifications),
        ];
        self.handle.write(RESPOND_TO_SIGNAL, &args, None).await
    }

    pub async fn listing(&self, lawyer: &str) -> ContractResult<ListingData> {
        let output = ParamType::Tuple(vec![
            ParamType::String,
            ParamType::Uint,
            ParamType::array(ParamType::String),
            ParamType::Bool,
        ]);
        let args = [address_arg(GET_LISTING, lawyer)?];
        let token = self.handle.read_one(GET_LISTING, &args, output).await?;
        let mut fields = Fields::new(GET_LISTING, token)?;
        Ok(ListingData {
            profile_uri: fields.string()?,
            hourly_rate: fields.uint()?.to_string(),
            tags: fields.strings()?,
            exists: fields.bool()?,
        })
    }

    pub async fn case_signal(&self, signal_id: &str) -> ContractResult<CaseSignalData> {
        let output = ParamType::Tuple(vec![
            ParamType::Address,
            ParamType::String,
            ParamType::Uint,
            ParamType::Uint,
            ParamType::array(ParamType::String),
            ParamType::Uint,
            ParamType::Uint,
        ]);
        let token = self
            .handle
            .read_one(GET_CASE_SIGNAL, &[Token::string(signal_id)], output)
            .await?;
        let mut fields = Fields::new(GET_CASE_SIGNAL, token)?;
        Ok(CaseSignalData {
            client: fields.address()?,
            case_uri: fields.string()?,
            budget_min: fields.uint()?.to_string(),
            budget_max: fields.uint()?.to_string(),
            tags: fields.strings()?,
            status: fields.u8()?,
            urgency: fields.u64()?,
        })
    }

    /// Addresses of the lawyers who responded to a signal.
    pub async fn signal_responses(&self, signal_id: &str) -> ContractResult<Vec<String>> {
        let token = self
            .handle
            .read_one(
                GET_SIGNAL_RESPONSES,
                &[Token::string(signal_id)],
                ParamType::array(ParamType::Address),
            )
            .await?;
        decoded(
            GET_SIGNAL_RESPONSES,
            token
                .into_array()
                .and_then(|items| items.into_iter().map(Token::into_address).collect()),
        )
    }

    pub async fn lawyer_response(&self, signal_id: &str, lawyer: &str) -> ContractResult<LawyerResponseData> {
        let output = ParamType::Tuple(vec![
            ParamType::String,
            ParamType::Uint,
            ParamType::Uint,
            ParamType::array(ParamType::String),
            ParamType::Uint,
        ]);
        let args = [
            Token::string(signal_id),
            address_arg(GET_LAWYER_RESPONSE, lawyer)?,
        ];
        let token = self.handle.read_one(GET_LAWYER_RESPONSE, &args, output).await?;
        let mut fields = Fields::new(GET_LAWYER_RESPONSE, token)?;
        Ok(LawyerResponseData {
            proposal: fields.string()?,
            estimated_cost: fields.uint()?.to_string(),
            estimated_duration: fields.uint()?.to_string(),
            qualifications: fields.strings()?,
            status: fields.u8()?,
        })
    }

    /// Verified lawyers from `catalog` that hold a live listing.
    pub async fn refresh_listings(&self, catalog: Vec<User>) -> ContractResult<Vec<User>> {
        let mut listed = Vec::new();
        for user in catalog
            .into_iter()
            .filter(|user| user.role == UserRole::Lawyer && user.verified)
        {
            if self.listing(&user.address).await?.exists {
                listed.push(user);
            }
        }
        Ok(listed)
    }
}
