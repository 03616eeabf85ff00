use rl_api_types::{PractitionerStatus, User};
use rl_provider::ContractSigner;
use std::rc::Rc;

use crate::abi::{self, ParamType, Token};
use crate::client::{ContractHandle, TxHash, address_arg, decoded};
use crate::error::ContractResult;

const REGISTER_PRACTITIONER: &str = "registerPractitioner(string)";
const APPROVE_PRACTITIONER: &str = "approvePractitioner(address)";
const REVOKE_PRACTITIONER: &str = "revokePractitioner(address)";
const GET_PRACTITIONER_STATUS: &str = "getPractitionerStatus(address)";
const GET_PRACTITIONER_PROFILE: &str = "getPractitionerProfile(address)";
const IS_LAWYER: &str = "isLawyer(address)";
const IS_JUDGE: &str = "isJudge(address)";
const IS_ADMIN: &str = "isAdmin(address)";
const GRANT_ROLE: &str = "grantRole(bytes32,address)";
const REVOKE_ROLE: &str = "revokeRole(bytes32,address)";
const HAS_ROLE: &str = "hasRole(bytes32,address)";

/// Practitioner registry and access-control roles.
pub struct RolesClient {
    handle: ContractHandle,
}

impl RolesClient {
    pub fn new(address: &str, signer: Rc<dyn ContractSigner>) -> Self {
        Self {
            handle: ContractHandle::new(address, signer),
        }
    }

    pub fn address(&self) -> &str {
        self.handle.address()
    }

    pub async fn register_practitioner(&self, profile_uri: &str) -> ContractResult<TxHash> {
        self.handle
            .write(REGISTER_PRACTITIONER, &[Token::string(profile_uri)], None)
            .await
    }

    /// Admin only.
    pub async fn approve_practitioner(&self, practitioner: &str) -> ContractResult<TxHash> {
        let args = [address_arg(APPROVE_PRACTITIONER, practitioner)?];
        self.handle.write(APPROVE_PRACTITIONER, &args, None).await
    }

    /// Admin only.
    pub async fn revoke_practitioner(&self, practitioner: &str) -> ContractResult<TxHash> {
        let args = [address_arg(REVOKE_PRACTITIONER, practitioner)?];
        self.handle.write(REVOKE_PRACTITIONER, &args, None).await
    }

    pub async fn practitioner_status(&self, practitioner: &str) -> ContractResult<PractitionerStatus> {
        let args = [address_arg(GET_PRACTITIONER_STATUS, practitioner)?];
        let token = self
            .handle
            .read_one(GET_PRACTITIONER_STATUS, &args, ParamType::Uint)
            .await?;
        decoded(GET_PRACTITIONER_STATUS, token.into_u8()).map(PractitionerStatus::from_u8)
    }

    pub async fn practitioner_profile(&self, practitioner: &str) -> ContractResult<String> {
        let args = [address_arg(GET_PRACTITIONER_PROFILE, practitioner)?];
        let token = self
            .handle
            .read_one(GET_PRACTITIONER_PROFILE, &args, ParamType::String)
            .await?;
        decoded(GET_PRACTITIONER_PROFILE, token.into_string())
    }

    pub async fn is_lawyer(&self, practitioner: &str) -> ContractResult<bool> {
        self.check(IS_LAWYER, practitioner).await
    }

    pub async fn is_judge(&self, practitioner: &str) -> ContractResult<bool> {
        self.check(IS_JUDGE, practitioner).await
    }

    pub async fn is_admin(&self, account: &str) -> ContractResult<bool> {
        self.check(IS_ADMIN, account).await
    }

    /// Roles are addressed by the keccak-256 of their name.
    pub async fn grant_role(&self, role: &str, account: &str) -> ContractResult<TxHash> {
        let args = [role_arg(role), address_arg(GRANT_ROLE, account)?];
        self.handle.write(GRANT_ROLE, &args, None).await
    }

    pub async fn revoke_role(&self, role: &str, account: &str) -> ContractResult<TxHash> {
        let args = [role_arg(role), address_arg(REVOKE_ROLE, account)?];
        self.handle.write(REVOKE_ROLE, &args, None).await
    }

    pub async fn has_role(&self, role: &str, account: &str) -> ContractResult<bool> {
        let args = [role_arg(role), address_arg(HAS_ROLE, account)?];
        let token = self.handle.read_one(HAS_ROLE, &args, ParamType::Bool).await?;
        decoded(HAS_ROLE, token.into_bool())
    }

    /// Practitioners from `catalog` with `verified` taken from their
    /// on-chain approval status. Clients and admins are dropped.
    pub async fn refresh_practitioners(&self, catalog: Vec<User>) -> ContractResult<Vec<User>> {
        let mut practitioners = Vec::new();
        for mut user in catalog.into_iter().filter(|user| user.role.is_practitioner()) {
            let status = self.practitioner_status(&user.address).await?;
            user.verified = status == PractitionerStatus::Approved;
            practitioners.push(user);
        }
        Ok(practitioners)
    }

    async fn check(&self, signature: &'static str, account: &str) -> ContractResult<bool> {
        let args = [address_arg(signature, account)?];
        let token = self.handle.read_one(signature, &args, ParamType::Bool).await?;
        decoded(signature, token.into_bool())
    }
}

fn role_arg(role: &str) -> Token {
    Token::FixedBytes(abi::keccak256(role.as_bytes()))
}
