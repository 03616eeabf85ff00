use primitive_types::U256;
use rl_api_types::{CampaignData, CampaignStatus, FundraisingCampaign};
use rl_provider::ContractSigner;
use std::rc::Rc;

use crate::abi::{ParamType, Token};
use crate::client::{ContractHandle, Fields, TxHash, address_arg, decoded};
use crate::error::ContractResult;

const CREATE_CAMPAIGN: &str = "createCampaign(string,address,bool,address,uint256,uint256)";
const CONTRIBUTE: &str = "contribute(string)";
const WITHDRAW_FUNDS: &str = "withdrawFunds(string)";
const CANCEL_CAMPAIGN: &str = "cancelCampaign(string)";
const REFUND_CONTRIBUTORS: &str = "refundContributors(string)";
const GET_CAMPAIGN: &str = "getCampaign(string)";
const GET_CAMPAIGN_STATUS: &str = "getCampaignStatus(string)";
const GET_CAMPAIGN_BALANCE: &str = "getCampaignBalance(string)";
const GET_CONTRIBUTION: &str = "getContribution(string,address)";

/// Fundraising campaigns for legal costs.
pub struct FundClient {
    handle: ContractHandle,
}

impl FundClient {
    pub fn new(address: &str, signer: Rc<dyn ContractSigner>) -> Self {
        Self {
            handle: ContractHandle::new(address, signer),
        }
    }

    pub fn address(&self) -> &str {
        self.handle.address()
    }

    pub async fn create_campaign(
        &self,
        campaign_id: &str,
        beneficiary: &str,
        beneficiary_is_lawyer: bool,
        token: &str,
        goal: U256,
        deadline: u64,
    ) -> ContractResult<TxHash> {
        let args = [
            Token::string(campaign_id),
            address_arg(CREATE_CAMPAIGN, beneficiary)?,
            Token::Bool(beneficiary_is_lawyer),
            address_arg(CREATE_CAMPAIGN, token)?,
            Token::Uint(goal),
            Token::uint(deadline),
        ];
        self.handle.write(CREATE_CAMPAIGN, &args, None).await
    }

    pub async fn contribute(&self, campaign_id: &str, value: Option<U256>) -> ContractResult<TxHash> {
        self.handle
            .write(CONTRIBUTE, &[Token::string(campaign_id)], value)
            .await
    }

    pub async fn withdraw_funds(&self, campaign_id: &str) -> ContractResult<TxHash> {
        self.handle
            .write(WITHDRAW_FUNDS, &[Token::string(campaign_id)], None)
            .await
    }

    pub async fn cancel_campaign(&self, campaign_id: &str) -> ContractResult<TxHash> {
        self.handle
            .write(CANCEL_CAMPAIGN, &[Token::string(campaign_id)], None)
            .await
    }

    pub async fn refund_contributors(&self, campaign_id: &str) -> ContractResult<TxHash> {
        self.handle
            .write(REFUND_CONTRIBUTORS, &[Token::string(campaign_id)], None)
            .await
    }

    pub async fn campaign(&self, campaign_id: &str) -> ContractResult<CampaignData> {
        let output = ParamType::Tuple(vec![
            ParamType::Address,
            ParamType::Address,
            ParamType::Address,
            ParamType::Uint,
            ParamType::Uint,
            ParamType::Uint,
            ParamType::Uint,
            ParamType::Bool,
        ]);
        let token = self
            .handle
            .read_one(GET_CAMPAIGN, &[Token::string(campaign_id)], output)
            .await?;
        let mut fields = Fields::new(GET_CAMPAIGN, token)?;
        Ok(CampaignData {
            creator: fields.address()?,
            beneficiary: fields.address()?,
            token: fields.address()?,
            goal: fields.uint()?.to_string(),
            deadline: fields.u64()?,
            raised: fields.uint()?.to_string(),
            status: CampaignStatus::from_u8(fields.u8()?),
            beneficiary_is_lawyer: fields.bool()?,
        })
    }

    pub async fn campaign_status(&self, campaign_id: &str) -> ContractResult<CampaignStatus> {
        let token = self
            .handle
            .read_one(GET_CAMPAIGN_STATUS, &[Token::string(campaign_id)], ParamType::Uint)
            .await?;
        decoded(GET_CAMPAIGN_STATUS, token.into_u8()).map(CampaignStatus::from_u8)
    }

    pub async fn campaign_balance(&self, campaign_id: &str) -> ContractResult<U256> {
        let token = self
            .handle
            .read_one(GET_CAMPAIGN_BALANCE, &[Token::string(campaign_id)], ParamType::Uint)
            .await?;
        decoded(GET_CAMPAIGN_BALANCE, token.into_uint())
    }

    pub async fn contribution(&self, campaign_id: &str, contributor: &str) -> ContractResult<U256> {
        let args = [
            Token::string(campaign_id),
            address_arg(GET_CONTRIBUTION, contributor)?,
        ];
        let token = self
            .handle
            .read_one(GET_CONTRIBUTION, &args, ParamType::Uint)
            .await?;
        decoded(GET_CONTRIBUTION, token.into_uint())
    }

    pub async fn refresh_campaigns(
        &self,
        catalog: Vec<FundraisingCampaign>,
    ) -> ContractResult<Vec<FundraisingCampaign>> {
        let mut campaigns = Vec::with_capacity(catalog.len());
        for mut campaign in catalog {
            campaign.status = self.campaign_status(&campaign.id).await?;
            campaigns.push(campaign);
        }
        Ok(campaigns)
    }
}
