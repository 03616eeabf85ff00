//! Read models shared by the ReadyLaw wallet core.
//!
//! These mirror the shape of on-chain state (cases, campaigns, documents,
//! practitioners, listings) for display. Nothing here enforces contract
//! invariants; mutation happens through contract calls only.

use serde::{Deserialize, Serialize};

pub mod format;
mod status;

pub use status::{
    ActivityKind, CampaignStatus, CaseStatus, DocType, DocumentStatus, PractitionerStatus, Priority,
    ResponseStatus, SignalStatus, UserRole,
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct WalletAddress(pub String);

impl WalletAddress {
    /// Addresses compare case-insensitively (checksummed vs lowercase).
    pub fn matches(&self, other: &str) -> bool {
        self.0.eq_ignore_ascii_case(other)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: String,
    pub address: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    pub role: UserRole,
    pub verified: bool,
    pub join_date_ms: u64,
    pub total_cases: u32,
    pub success_rate: u8,
    pub rating: f32,
    pub reviews: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LegalDocument {
    pub id: String,
    pub title: String,
    pub doc_type: DocType,
    #[serde(default)]
    pub case_id: Option<String>,
    pub content: String,
    /// Content identifier of the latest version.
    pub cid: String,
    pub author: String,
    pub author_name: String,
    pub created_at_ms: u64,
    pub updated_at_ms: u64,
    pub version: u32,
    pub status: DocumentStatus,
    pub tags: Vec<String>,
    pub file_size: u64,
    pub file_type: String,
    pub is_public: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocumentVersion {
    pub cid: String,
    pub timestamp: u64,
    pub revoked: bool,
    pub author: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Budget {
    pub min: f64,
    pub max: f64,
    pub currency: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Milestone {
    pub id: String,
    pub title: String,
    pub description: String,
    pub due_date_ms: u64,
    pub completed: bool,
    #[serde(default)]
    pub completed_at_ms: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LegalCase {
    pub id: String,
    pub title: String,
    pub description: String,
    pub client: User,
    #[serde(default)]
    pub lawyer: Option<User>,
    pub status: CaseStatus,
    pub category: String,
    pub priority: Priority,
    pub budget: Budget,
    pub deadline_ms: u64,
    pub created_at_ms: u64,
    pub updated_at_ms: u64,
    pub documents: Vec<LegalDocument>,
    pub tags: Vec<String>,
    pub location: String,
    #[serde(default)]
    pub court: Option<String>,
    #[serde(default)]
    pub case_number: Option<String>,
    pub progress: u8,
    pub milestones: Vec<Milestone>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CampaignUpdate {
    pub id: String,
    pub title: String,
    pub content: String,
    pub created_at_ms: u64,
    pub author: User,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Donor {
    pub address: String,
    #[serde(default)]
    pub name: Option<String>,
    pub amount: f64,
    #[serde(default)]
    pub message: Option<String>,
    pub donated_at_ms: u64,
    pub anonymous: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FundraisingCampaign {
    pub id: String,
    pub title: String,
    pub description: String,
    pub beneficiary: User,
    pub creator: User,
    pub goal: f64,
    pub raised: f64,
    pub currency: String,
    pub deadline_ms: u64,
    pub status: CampaignStatus,
    pub created_at_ms: u64,
    pub updated_at_ms: u64,
    pub category: String,
    pub tags: Vec<String>,
    pub story: String,
    pub updates: Vec<CampaignUpdate>,
    pub donors: Vec<Donor>,
    pub beneficiary_is_lawyer: bool,
    #[serde(default)]
    pub case_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LawyerResponse {
    pub id: String,
    pub lawyer: User,
    pub proposal: String,
    pub estimated_cost: f64,
    pub estimated_duration_days: u32,
    pub qualifications: Vec<String>,
    pub created_at_ms: u64,
    pub status: ResponseStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CaseSignal {
    pub id: String,
    pub title: String,
    pub description: String,
    pub client: User,
    pub category: String,
    pub budget: Budget,
    pub deadline_ms: u64,
    pub created_at_ms: u64,
    pub status: SignalStatus,
    pub urgency: Priority,
    pub location: String,
    pub tags: Vec<String>,
    pub requirements: Vec<String>,
    pub responses: Vec<LawyerResponse>,
    #[serde(default)]
    pub documents: Vec<LegalDocument>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActivityItem {
    pub id: String,
    pub kind: ActivityKind,
    pub title: String,
    pub description: String,
    pub timestamp_ms: u64,
    #[serde(default)]
    pub case_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardStats {
    pub total_cases: u32,
    pub active_cases: u32,
    pub completed_cases: u32,
    pub total_documents: u32,
    pub total_revenue: f64,
    pub pending_tasks: u32,
    pub upcoming_deadlines: u32,
    pub recent_activity: Vec<ActivityItem>,
}

// ── On-chain tuple shapes ──

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CaseData {
    pub client: String,
    pub lawyer: String,
    pub token: String,
    /// Escrowed amount in wei, as a decimal string.
    pub amount: String,
    pub created_at: u64,
    pub deadline: u64,
    pub status: CaseStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CampaignData {
    pub creator: String,
    pub beneficiary: String,
    pub token: String,
    pub goal: String,
    pub deadline: u64,
    pub raised: String,
    pub status: CampaignStatus,
    pub beneficiary_is_lawyer: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListingData {
    pub profile_uri: String,
    pub hourly_rate: String,
    pub tags: Vec<String>,
    pub exists: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CaseSignalData {
    pub client: String,
    pub case_uri: String,
    pub budget_min: String,
    pub budget_max: String,
    pub tags: Vec<String>,
    pub status: u8,
    pub urgency: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LawyerResponseData {
    pub proposal: String,
    pub estimated_cost: String,
    pub estimated_duration: String,
    pub qualifications: Vec<String>,
    pub status: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wallet_address_matches_ignoring_case() {
        let address = WalletAddress("0x742d35Cc6634C0532925a3b8D4C9db96C4b4d8b6".to_owned());
        assert!(address.matches("0x742d35cc6634c0532925a3b8d4c9db96c4b4d8b6"));
        assert!(!address.matches("0x8ba1f109551bA432bdf8c998a2F9f8B6E5d55ED6"));
    }

    #[test]
    fn case_data_serializes_status_by_name() {
        let data = CaseData {
            client: "0x1".to_owned(),
            lawyer: "0x2".to_owned(),
            token: "0x0".to_owned(),
            amount: "1000".to_owned(),
            created_at: 1,
            deadline: 2,
            status: CaseStatus::Funded,
        };
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["status"], "funded");
        assert_eq!(json["amount"], "1000");
    }
}
