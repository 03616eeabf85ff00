//! Built-in sample dataset served when contract reads are unavailable.

use rl_api_types::{
    ActivityItem, ActivityKind, Budget, CampaignStatus, CaseStatus, DashboardStats, DocType, DocumentStatus,
    FundraisingCampaign, LegalCase, LegalDocument, Milestone, Priority, User, UserRole,
};

pub const DAY_MS: u64 = 24 * 60 * 60 * 1000;

/// Sample records with timestamps relative to `now_ms`.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleData {
    pub users: Vec<User>,
    pub documents: Vec<LegalDocument>,
    pub cases: Vec<LegalCase>,
    pub campaigns: Vec<FundraisingCampaign>,
    pub dashboard: DashboardStats,
}

impl SampleData {
    pub fn at(now_ms: u64) -> Self {
        let ago = |days: u64| now_ms.saturating_sub(days * DAY_MS);
        let ahead = |days: u64| now_ms + days * DAY_MS;

        let users = vec![
            User {
                id: "1".to_owned(),
                address: "0x742d35Cc6634C0532925a3b8D4C9db96C4b4d8b6".to_owned(),
                name: "Sarah Johnson".to_owned(),
                email: Some("sarah.johnson@lawfirm.com".to_owned()),
                avatar: Some(
                    "https://images.unsplash.com/photo-1494790108755-2616b612b786?w=150&h=150&fit=crop&crop=face"
                        .to_owned(),
                ),
                role: UserRole::Lawyer,
                verified: true,
                join_date_ms: ago(365),
                total_cases: 47,
                success_rate: 94,
                rating: 4.8,
                reviews: 23,
            },
            User {
                id: "2".to_owned(),
                address: "0x8ba1f109551bA432bdf8c998a2F9f8B6E5d55ED6".to_owned(),
                name: "Michael Chen".to_owned(),
                email: Some("michael.chen@legal.com".to_owned()),
                avatar: Some(
                    "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?w=150&h=150&fit=crop&crop=face"
                        .to_owned(),
                ),
                role: UserRole::Lawyer,
                verified: true,
                join_date_ms: ago(180),
                total_cases: 23,
                success_rate: 87,
                rating: 4.6,
                reviews: 15,
            },
            User {
                id: "3".to_owned(),
                address: "0x1234567890123456789012345678901234567890".to_owned(),
                name: "Emily Rodriguez".to_owned(),
                email: Some("emily.rodriguez@client.com".to_owned()),
                avatar: Some(
                    "https://images.unsplash.com/photo-1438761681033-6461ffad8d80?w=150&h=150&fit=crop&crop=face"
                        .to_owned(),
                ),
                role: UserRole::Client,
                verified: true,
                join_date_ms: ago(90),
                total_cases: 3,
                success_rate: 100,
                rating: 5.0,
                reviews: 2,
            },
        ];

        let documents = vec![
            LegalDocument {
                id: "doc1".to_owned(),
                title: "Contract Agreement - Tech Startup".to_owned(),
                doc_type: DocType::Contract,
                case_id: Some("case1".to_owned()),
                content: "This agreement is made between TechStart Inc. and LegalCorp...".to_owned(),
                cid: "QmX123456789abcdef".to_owned(),
                author: users[0].address.clone(),
                author_name: users[0].name.clone(),
                created_at_ms: ago(7),
                updated_at_ms: ago(2),
                version: 2,
                status: DocumentStatus::Published,
                tags: tags(&["contract", "startup", "tech", "agreement"]),
                file_size: 245_760,
                file_type: "pdf".to_owned(),
                is_public: false,
            },
            LegalDocument {
                id: "doc2".to_owned(),
                title: "Evidence - Financial Records".to_owned(),
                doc_type: DocType::Evidence,
                case_id: Some("case2".to_owned()),
                content: "Financial records showing transactions from January to March 2024...".to_owned(),
                cid: "QmY987654321fedcba".to_owned(),
                author: users[1].address.clone(),
                author_name: users[1].name.clone(),
                created_at_ms: ago(14),
                updated_at_ms: ago(14),
                version: 1,
                status: DocumentStatus::Published,
                tags: tags(&["evidence", "financial", "records", "transactions"]),
                file_size: 512_000,
                file_type: "pdf".to_owned(),
                is_public: false,
            },
        ];

        let cases = vec![LegalCase {
            id: "case1".to_owned(),
            title: "Tech Startup Contract Dispute".to_owned(),
            description: "Dispute over intellectual property rights and contract terms in a technology startup acquisition."
                .to_owned(),
            client: users[2].clone(),
            lawyer: Some(users[0].clone()),
            status: CaseStatus::Accepted,
            category: "Intellectual Property".to_owned(),
            priority: Priority::High,
            budget: Budget {
                min: 15_000.0,
                max: 25_000.0,
                currency: "USD".to_owned(),
            },
            deadline_ms: ahead(45),
            created_at_ms: ago(30),
            updated_at_ms: ago(2),
            documents: vec![documents[0].clone()],
            tags: tags(&["contract", "startup", "IP", "dispute"]),
            location: "San Francisco, CA".to_owned(),
            court: Some("Superior Court of California".to_owned()),
            case_number: Some("CV-2024-001234".to_owned()),
            progress: 65,
            milestones: vec![Milestone {
                id: "milestone1".to_owned(),
                title: "Initial Filing".to_owned(),
                description: "File complaint with the court".to_owned(),
                due_date_ms: ago(20),
                completed: true,
                completed_at_ms: Some(ago(22)),
            }],
        }];

        let campaigns = vec![FundraisingCampaign {
            id: "campaign1".to_owned(),
            title: "Justice for Small Business".to_owned(),
            description: "Help a local business owner fight against corporate bullying and unfair business practices."
                .to_owned(),
            beneficiary: users[2].clone(),
            creator: users[0].clone(),
            goal: 25_000.0,
            raised: 18_750.0,
            currency: "USD".to_owned(),
            deadline_ms: ahead(20),
            status: CampaignStatus::Active,
            created_at_ms: ago(40),
            updated_at_ms: ago(1),
            category: "Business Law".to_owned(),
            tags: tags(&["small business", "justice", "corporate", "bullying"]),
            story: "Our client, a hardworking small business owner, has been targeted by a large corporation..."
                .to_owned(),
            updates: Vec::new(),
            donors: Vec::new(),
            beneficiary_is_lawyer: false,
            case_id: Some("case1".to_owned()),
        }];

        let dashboard = DashboardStats {
            total_cases: 47,
            active_cases: 12,
            completed_cases: 35,
            total_documents: 156,
            total_revenue: 125_000.0,
            pending_tasks: 8,
            upcoming_deadlines: 3,
            recent_activity: vec![ActivityItem {
                id: "activity1".to_owned(),
                kind: ActivityKind::CaseCreated,
                title: "New Case Created".to_owned(),
                description: "Tech Startup Contract Dispute case has been created".to_owned(),
                timestamp_ms: ago(2),
                case_id: Some("case1".to_owned()),
            }],
        };

        Self {
            users,
            documents,
            cases,
            campaigns,
            dashboard,
        }
    }
}

fn tags(values: &[&str]) -> Vec<String> {
    values.iter().map(|tag| tag.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamps_are_relative_to_now() {
        let now = 1_700_000_000_000;
        let sample = SampleData::at(now);

        assert_eq!(sample.users[0].join_date_ms, now - 365 * DAY_MS);
        assert_eq!(sample.cases[0].deadline_ms, now + 45 * DAY_MS);
        assert_eq!(sample.campaigns[0].deadline_ms, now + 20 * DAY_MS);
        assert_eq!(sample.dashboard.recent_activity[0].timestamp_ms, now - 2 * DAY_MS);
    }

    #[test]
    fn records_reference_each_other() {
        let sample = SampleData::at(1_700_000_000_000);

        assert_eq!(sample.cases[0].client, sample.users[2]);
        assert_eq!(sample.cases[0].lawyer.as_ref(), Some(&sample.users[0]));
        assert_eq!(sample.cases[0].documents[0], sample.documents[0]);
        assert_eq!(sample.campaigns[0].case_id.as_deref(), Some("case1"));
    }

    #[test]
    fn same_instant_builds_equal_data() {
        assert_eq!(SampleData::at(42 * DAY_MS), SampleData::at(42 * DAY_MS));
    }
}
