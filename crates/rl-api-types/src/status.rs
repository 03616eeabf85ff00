use serde::{Deserialize, Serialize};

/// Escrow case lifecycle, discriminants as stored by the escrow contract.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum CaseStatus {
    #[default]
    None = 0,
    Open = 1,
    Funded = 2,
    Accepted = 3,
    Resolved = 4,
    Disputed = 5,
    Released = 6,
    Refunded = 7,
    Cancelled = 8,
}

impl CaseStatus {
    pub fn from_u8(value: u8) -> Self {
        match value {
            1 => Self::Open,
            2 => Self::Funded,
            3 => Self::Accepted,
            4 => Self::Resolved,
            5 => Self::Disputed,
            6 => Self::Released,
            7 => Self::Refunded,
            8 => Self::Cancelled,
            _ => Self::None,
        }
    }

    pub fn text(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Open => "Open",
            Self::Funded => "Funded",
            Self::Accepted => "Accepted",
            Self::Resolved => "Resolved",
            Self::Disputed => "Disputed",
            Self::Released => "Released",
            Self::Refunded => "Refunded",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Funded or accepted cases are in progress.
    pub fn is_active(self) -> bool {
        matches!(self, Self::Accepted | Self::Funded)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum CampaignStatus {
    #[default]
    None = 0,
    Active = 1,
    Succeeded = 2,
    Failed = 3,
    Cancelled = 4,
    PayoutReady = 5,
    Refunding = 6,
}

impl CampaignStatus {
    pub fn from_u8(value: u8) -> Self {
        match value {
            1 => Self::Active,
            2 => Self::Succeeded,
            3 => Self::Failed,
            4 => Self::Cancelled,
            5 => Self::PayoutReady,
            6 => Self::Refunding,
            _ => Self::None,
        }
    }

    pub fn text(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Active => "Active",
            Self::Succeeded => "Succeeded",
            Self::Failed => "Failed",
            Self::Cancelled => "Cancelled",
            Self::PayoutReady => "Payout Ready",
            Self::Refunding => "Refunding",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum PractitionerStatus {
    #[default]
    None = 0,
    Pending = 1,
    Approved = 2,
    Revoked = 3,
}

impl PractitionerStatus {
    pub fn from_u8(value: u8) -> Self {
        match value {
            1 => Self::Pending,
            2 => Self::Approved,
            3 => Self::Revoked,
            _ => Self::None,
        }
    }

    pub fn text(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Revoked => "Revoked",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum DocType {
    #[default]
    Other = 0,
    Pleading = 1,
    Judgment = 2,
    Contract = 3,
    Evidence = 4,
}

impl DocType {
    pub fn from_u8(value: u8) -> Self {
        match value {
            1 => Self::Pleading,
            2 => Self::Judgment,
            3 => Self::Contract,
            4 => Self::Evidence,
            _ => Self::Other,
        }
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Client,
    Lawyer,
    Judge,
    Admin,
}

impl UserRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Lawyer => "lawyer",
            Self::Judge => "judge",
            Self::Admin => "admin",
        }
    }

    pub fn is_practitioner(self) -> bool {
        matches!(self, Self::Lawyer | Self::Judge)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    Draft,
    Published,
    Archived,
    Revoked,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SignalStatus {
    Open,
    InProgress,
    Closed,
    Expired,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ResponseStatus {
    Pending,
    Accepted,
    Rejected,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    CaseCreated,
    DocumentUploaded,
    PaymentReceived,
    DeadlineApproaching,
    VerificationApproved,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_discriminants_fall_back_to_none() {
        assert_eq!(CaseStatus::from_u8(42), CaseStatus::None);
        assert_eq!(CampaignStatus::from_u8(7), CampaignStatus::None);
        assert_eq!(PractitionerStatus::from_u8(9), PractitionerStatus::None);
        assert_eq!(DocType::from_u8(5), DocType::Other);
    }

    #[test]
    fn discriminants_match_contract_values() {
        for value in 0..=8 {
            assert_eq!(CaseStatus::from_u8(value) as u8, value);
        }
        assert_eq!(DocType::Evidence.as_u8(), 4);
        assert_eq!(CampaignStatus::PayoutReady.text(), "Payout Ready");
    }

    #[test]
    fn only_funded_and_accepted_cases_are_active() {
        assert!(CaseStatus::Funded.is_active());
        assert!(CaseStatus::Accepted.is_active());
        assert!(!CaseStatus::Resolved.is_active());
        assert!(!CaseStatus::Open.is_active());
    }
}
