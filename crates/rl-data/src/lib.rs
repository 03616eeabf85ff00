//! Read access for the ReadyLaw views.
//!
//! [`DataService`] asks the bound contract clients first and falls back to
//! the built-in [`SampleData`] when a client is missing or a read fails.
//! Every result carries its [`Provenance`] so callers can tell the two
//! apart.

use rl_api_types::{
    ActivityItem, CampaignStatus, DashboardStats, DocType, FundraisingCampaign, LegalCase, LegalDocument, User,
    UserRole,
};
use rl_contracts::{ContractResult, ContractService, ContractStatus, ServiceName};
use serde::Serialize;
use std::rc::Rc;
use tracing::{debug, warn};

mod provenance;
pub mod query;
mod sample;

pub use provenance::{Provenance, Sourced};
pub use sample::{DAY_MS, SampleData};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GlobalSearch {
    pub users: Vec<User>,
    pub documents: Vec<LegalDocument>,
    pub cases: Vec<LegalCase>,
    pub campaigns: Vec<FundraisingCampaign>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DataSummary {
    pub total_users: usize,
    pub total_documents: usize,
    pub total_cases: usize,
    pub total_campaigns: usize,
    pub active_cases: usize,
    pub active_campaigns: usize,
    /// Sum of the budget ceilings of resolved cases.
    pub total_revenue: f64,
}

pub struct DataService {
    contracts: Rc<ContractService>,
    sample: SampleData,
    fixed_now_ms: Option<u64>,
}

impl DataService {
    pub fn new(contracts: Rc<ContractService>) -> Self {
        let sample = SampleData::at(system_now_ms());
        Self::with_sample(contracts, sample)
    }

    pub fn with_sample(contracts: Rc<ContractService>, sample: SampleData) -> Self {
        Self {
            contracts,
            sample,
            fixed_now_ms: None,
        }
    }

    /// Pins the clock used by deadline queries.
    pub fn at(mut self, now_ms: u64) -> Self {
        self.fixed_now_ms = Some(now_ms);
        self
    }

    pub fn sample(&self) -> &SampleData {
        &self.sample
    }

    pub fn contracts(&self) -> &Rc<ContractService> {
        &self.contracts
    }

    fn now_ms(&self) -> u64 {
        self.fixed_now_ms.unwrap_or_else(system_now_ms)
    }

    // ── Reads ──

    /// Practitioners with on-chain approval when the roles contract is
    /// bound; every sample user otherwise.
    pub async fn users(&self) -> Sourced<Vec<User>> {
        let fetched = self.chain_users().await;
        settle("users", fetched, &self.sample.users)
    }

    pub async fn documents(&self) -> Sourced<Vec<LegalDocument>> {
        let fetched = self.chain_documents().await;
        settle("documents", fetched, &self.sample.documents)
    }

    pub async fn cases(&self) -> Sourced<Vec<LegalCase>> {
        let fetched = self.chain_cases().await;
        settle("cases", fetched, &self.sample.cases)
    }

    pub async fn campaigns(&self) -> Sourced<Vec<FundraisingCampaign>> {
        let fetched = self.chain_campaigns().await;
        settle("campaigns", fetched, &self.sample.campaigns)
    }

    /// Verified lawyers holding a live listing.
    pub async fn lawyer_listings(&self) -> Sourced<Vec<User>> {
        let fetched = self.chain_lawyer_listings().await;
        match fetched {
            Ok(listed) => {
                debug!(what = "lawyer_listings", count = listed.len(), "read from chain");
                Sourced::chain(listed)
            }
            Err(err) => {
                warn!(what = "lawyer_listings", error = %err, "contract read failed, serving sample data");
                Sourced::fallback(
                    self.sample
                        .users
                        .iter()
                        .filter(|user| query::is_verified(user, UserRole::Lawyer))
                        .cloned()
                        .collect(),
                )
            }
        }
    }

    async fn chain_users(&self) -> ContractResult<Vec<User>> {
        self.contracts
            .require_roles()?
            .refresh_practitioners(self.sample.users.clone())
            .await
    }

    async fn chain_documents(&self) -> ContractResult<Vec<LegalDocument>> {
        self.contracts
            .require_documents()?
            .refresh_documents(self.sample.documents.clone())
            .await
    }

    async fn chain_cases(&self) -> ContractResult<Vec<LegalCase>> {
        self.contracts
            .require_escrow()?
            .refresh_cases(self.sample.cases.clone())
            .await
    }

    async fn chain_campaigns(&self) -> ContractResult<Vec<FundraisingCampaign>> {
        self.contracts
            .require_fund()?
            .refresh_campaigns(self.sample.campaigns.clone())
            .await
    }

    async fn chain_lawyer_listings(&self) -> ContractResult<Vec<User>> {
        self.contracts
            .require_listings()?
            .refresh_listings(self.sample.users.clone())
            .await
    }

    // ── Users ──

    pub async fn user_by_id(&self, id: &str) -> Sourced<Option<User>> {
        self.users()
            .await
            .map(|users| users.into_iter().find(|user| user.id == id))
    }

    pub async fn user_by_address(&self, address: &str) -> Sourced<Option<User>> {
        self.users()
            .await
            .map(|users| users.into_iter().find(|user| query::has_address(user, address)))
    }

    pub async fn verified_lawyers(&self) -> Sourced<Vec<User>> {
        self.users_where(|user| query::is_verified(user, UserRole::Lawyer)).await
    }

    pub async fn verified_judges(&self) -> Sourced<Vec<User>> {
        self.users_where(|user| query::is_verified(user, UserRole::Judge)).await
    }

    pub async fn search_users(&self, text: &str) -> Sourced<Vec<User>> {
        self.users_where(|user| query::user_matches(user, text)).await
    }

    async fn users_where(&self, keep: impl Fn(&User) -> bool) -> Sourced<Vec<User>> {
        self.users().await.map(|users| retain(users, keep))
    }

    // ── Documents ──

    pub async fn document_by_id(&self, id: &str) -> Sourced<Option<LegalDocument>> {
        self.documents()
            .await
            .map(|docs| docs.into_iter().find(|doc| doc.id == id))
    }

    pub async fn documents_by_case(&self, case_id: &str) -> Sourced<Vec<LegalDocument>> {
        self.documents_where(|doc| query::belongs_to_case(doc, case_id)).await
    }

    pub async fn search_documents(&self, text: &str) -> Sourced<Vec<LegalDocument>> {
        self.documents_where(|doc| query::document_matches(doc, text)).await
    }

    pub async fn documents_by_type(&self, doc_type: DocType) -> Sourced<Vec<LegalDocument>> {
        self.documents_where(|doc| query::is_doc_type(doc, doc_type)).await
    }

    async fn documents_where(&self, keep: impl Fn(&LegalDocument) -> bool) -> Sourced<Vec<LegalDocument>> {
        self.documents().await.map(|docs| retain(docs, keep))
    }

    // ── Cases ──

    pub async fn case_by_id(&self, id: &str) -> Sourced<Option<LegalCase>> {
        self.cases()
            .await
            .map(|cases| cases.into_iter().find(|case| case.id == id))
    }

    pub async fn cases_by_client(&self, address: &str) -> Sourced<Vec<LegalCase>> {
        self.cases_where(|case| query::is_client(case, address)).await
    }

    pub async fn cases_by_lawyer(&self, address: &str) -> Sourced<Vec<LegalCase>> {
        self.cases_where(|case| query::is_lawyer(case, address)).await
    }

    /// Cases that are accepted or funded.
    pub async fn active_cases(&self) -> Sourced<Vec<LegalCase>> {
        self.cases_where(|case| case.status.is_active()).await
    }

    pub async fn completed_cases(&self) -> Sourced<Vec<LegalCase>> {
        self.cases_where(query::is_completed).await
    }

    pub async fn search_cases(&self, text: &str) -> Sourced<Vec<LegalCase>> {
        self.cases_where(|case| query::case_matches(case, text)).await
    }

    pub async fn cases_by_category(&self, category: &str) -> Sourced<Vec<LegalCase>> {
        self.cases_where(|case| query::same_category(&case.category, category))
            .await
    }

    async fn cases_where(&self, keep: impl Fn(&LegalCase) -> bool) -> Sourced<Vec<LegalCase>> {
        self.cases().await.map(|cases| retain(cases, keep))
    }

    // ── Campaigns ──

    pub async fn campaign_by_id(&self, id: &str) -> Sourced<Option<FundraisingCampaign>> {
        self.campaigns()
            .await
            .map(|campaigns| campaigns.into_iter().find(|campaign| campaign.id == id))
    }

    pub async fn campaigns_by_creator(&self, address: &str) -> Sourced<Vec<FundraisingCampaign>> {
        self.campaigns_where(|campaign| query::has_address(&campaign.creator, address))
            .await
    }

    pub async fn campaigns_by_beneficiary(&self, address: &str) -> Sourced<Vec<FundraisingCampaign>> {
        self.campaigns_where(|campaign| query::has_address(&campaign.beneficiary, address))
            .await
    }

    pub async fn active_campaigns(&self) -> Sourced<Vec<FundraisingCampaign>> {
        self.campaigns_with_status(CampaignStatus::Active).await
    }

    pub async fn successful_campaigns(&self) -> Sourced<Vec<FundraisingCampaign>> {
        self.campaigns_with_status(CampaignStatus::Succeeded).await
    }

    pub async fn failed_campaigns(&self) -> Sourced<Vec<FundraisingCampaign>> {
        self.campaigns_with_status(CampaignStatus::Failed).await
    }

    pub async fn search_campaigns(&self, text: &str) -> Sourced<Vec<FundraisingCampaign>> {
        self.campaigns_where(|campaign| query::campaign_matches(campaign, text))
            .await
    }

    pub async fn campaigns_by_category(&self, category: &str) -> Sourced<Vec<FundraisingCampaign>> {
        self.campaigns_where(|campaign| query::same_category(&campaign.category, category))
            .await
    }

    /// Active campaigns closing within `days`.
    pub async fn urgent_campaigns(&self, days: u64) -> Sourced<Vec<FundraisingCampaign>> {
        let now_ms = self.now_ms();
        self.campaigns_where(|campaign| query::is_urgent_campaign(campaign, days, now_ms))
            .await
    }

    async fn campaigns_with_status(&self, status: CampaignStatus) -> Sourced<Vec<FundraisingCampaign>> {
        self.campaigns_where(|campaign| campaign.status == status).await
    }

    async fn campaigns_where(
        &self,
        keep: impl Fn(&FundraisingCampaign) -> bool,
    ) -> Sourced<Vec<FundraisingCampaign>> {
        self.campaigns().await.map(|campaigns| retain(campaigns, keep))
    }

    // ── Dashboard ──

    /// Dashboard figures have no on-chain source yet.
    pub fn dashboard_stats(&self) -> Sourced<DashboardStats> {
        Sourced::fallback(self.sample.dashboard.clone())
    }

    pub fn recent_activity(&self, limit: usize) -> Sourced<Vec<ActivityItem>> {
        self.dashboard_stats().map(|stats| {
            let mut activity = stats.recent_activity;
            activity.truncate(limit);
            activity
        })
    }

    pub async fn upcoming_deadlines(&self, limit: usize) -> Sourced<Vec<LegalCase>> {
        let now_ms = self.now_ms();
        self.cases()
            .await
            .map(|cases| query::upcoming_deadlines(cases, limit, now_ms))
    }

    // ── Aggregates ──

    pub async fn global_search(&self, text: &str) -> Sourced<GlobalSearch> {
        let users = self.search_users(text).await;
        let documents = self.search_documents(text).await;
        let cases = self.search_cases(text).await;
        let campaigns = self.search_campaigns(text).await;

        Sourced {
            provenance: users
                .provenance
                .combine(documents.provenance)
                .combine(cases.provenance)
                .combine(campaigns.provenance),
            value: GlobalSearch {
                users: users.value,
                documents: documents.value,
                cases: cases.value,
                campaigns: campaigns.value,
            },
        }
    }

    pub async fn data_summary(&self) -> Sourced<DataSummary> {
        let users = self.users().await;
        let documents = self.documents().await;
        let cases = self.cases().await;
        let campaigns = self.campaigns().await;

        let summary = DataSummary {
            total_users: users.value.len(),
            total_documents: documents.value.len(),
            total_cases: cases.value.len(),
            total_campaigns: campaigns.value.len(),
            active_cases: cases.value.iter().filter(|case| case.status.is_active()).count(),
            active_campaigns: campaigns
                .value
                .iter()
                .filter(|campaign| campaign.status == CampaignStatus::Active)
                .count(),
            total_revenue: cases
                .value
                .iter()
                .filter(|case| query::is_completed(case))
                .map(|case| case.budget.max)
                .sum(),
        };

        Sourced {
            value: summary,
            provenance: users
                .provenance
                .combine(documents.provenance)
                .combine(cases.provenance)
                .combine(campaigns.provenance),
        }
    }

    pub fn contract_status(&self) -> ContractStatus {
        self.contracts.contract_status()
    }

    /// Accepts the lowercase service names (`roles`, `documents`, ...).
    pub fn is_contract_available(&self, name: &str) -> bool {
        ServiceName::parse(name).is_some_and(|service| self.contracts.has_service(service))
    }
}

fn settle<T: Clone>(what: &'static str, fetched: ContractResult<Vec<T>>, fallback: &[T]) -> Sourced<Vec<T>> {
    match fetched {
        Ok(records) => {
            debug!(what, count = records.len(), "read from chain");
            Sourced::chain(records)
        }
        Err(err) => {
            warn!(what, error = %err, "contract read failed, serving sample data");
            Sourced::fallback(fallback.to_vec())
        }
    }
}

fn retain<T>(mut records: Vec<T>, keep: impl Fn(&T) -> bool) -> Vec<T> {
    records.retain(|record| keep(record));
    records
}

fn system_now_ms() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rl_api_types::CaseStatus;

    const NOW: u64 = 1_700_000_000_000;

    fn unbound() -> DataService {
        DataService::with_sample(Rc::new(ContractService::new()), SampleData::at(NOW)).at(NOW)
    }

    #[tokio::test]
    async fn unbound_reads_equal_sample() {
        let data = unbound();
        let sample = SampleData::at(NOW);

        assert_eq!(data.users().await, Sourced::fallback(sample.users.clone()));
        assert_eq!(data.documents().await, Sourced::fallback(sample.documents));
        assert_eq!(data.cases().await, Sourced::fallback(sample.cases));
        assert_eq!(data.campaigns().await, Sourced::fallback(sample.campaigns));
    }

    #[tokio::test]
    async fn listing_fallback_is_verified_lawyers() {
        let listed = unbound().lawyer_listings().await;
        assert!(listed.is_fallback());
        let names: Vec<&str> = listed.value.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, ["Sarah Johnson", "Michael Chen"]);
    }

    #[tokio::test]
    async fn user_lookups() {
        let data = unbound();
        assert_eq!(data.user_by_id("2").await.value.map(|u| u.name), Some("Michael Chen".to_owned()));
        assert!(data.user_by_id("9").await.value.is_none());

        let by_address = data
            .user_by_address("0X742D35CC6634C0532925A3B8D4C9DB96C4B4D8B6")
            .await;
        assert_eq!(by_address.value.map(|u| u.id), Some("1".to_owned()));

        assert_eq!(data.verified_lawyers().await.value.len(), 2);
        assert!(data.verified_judges().await.value.is_empty());
        assert_eq!(data.search_users("lawyer").await.value.len(), 2);
    }

    #[tokio::test]
    async fn document_filters() {
        let data = unbound();
        let for_case = data.documents_by_case("case2").await.value;
        assert_eq!(for_case.len(), 1);
        assert_eq!(for_case[0].id, "doc2");

        let evidence = data.documents_by_type(DocType::Evidence).await.value;
        assert_eq!(evidence.len(), 1);
        assert_eq!(data.search_documents("agreement").await.value[0].id, "doc1");
        assert!(data.document_by_id("doc3").await.value.is_none());
    }

    #[tokio::test]
    async fn case_filters() {
        let data = unbound();
        assert_eq!(data.active_cases().await.value.len(), 1);
        assert!(data.completed_cases().await.value.is_empty());
        assert_eq!(
            data.cases_by_client("0x1234567890123456789012345678901234567890")
                .await
                .value
                .len(),
            1
        );
        assert!(
            data.cases_by_lawyer("0x8ba1f109551bA432bdf8c998a2F9f8B6E5d55ED6")
                .await
                .value
                .is_empty()
        );
        assert_eq!(data.cases_by_category("intellectual property").await.value.len(), 1);
        assert!(data.cases_by_category("intellectual").await.value.is_empty());
        assert_eq!(data.case_by_id("case1").await.value.map(|c| c.status), Some(CaseStatus::Accepted));
    }

    #[tokio::test]
    async fn campaign_filters() {
        let data = unbound();
        assert_eq!(data.active_campaigns().await.value.len(), 1);
        assert!(data.successful_campaigns().await.value.is_empty());
        assert!(data.failed_campaigns().await.value.is_empty());
        assert_eq!(
            data.campaigns_by_creator("0x742d35cc6634c0532925a3b8d4c9db96c4b4d8b6")
                .await
                .value
                .len(),
            1
        );
        assert_eq!(
            data.campaigns_by_beneficiary("0x1234567890123456789012345678901234567890")
                .await
                .value
                .len(),
            1
        );
        assert_eq!(data.search_campaigns("bullying").await.value.len(), 1);
        assert_eq!(data.campaigns_by_category("BUSINESS LAW").await.value.len(), 1);
        assert!(data.urgent_campaigns(7).await.value.is_empty());
        assert_eq!(data.urgent_campaigns(21).await.value.len(), 1);
    }

    #[tokio::test]
    async fn dashboard_and_deadlines() {
        let data = unbound();
        assert_eq!(data.dashboard_stats().value.total_cases, 47);
        assert!(data.recent_activity(0).value.is_empty());
        assert_eq!(data.recent_activity(10).value.len(), 1);

        let upcoming = data.upcoming_deadlines(5).await;
        assert_eq!(upcoming.value.len(), 1);
        assert_eq!(upcoming.value[0].id, "case1");
    }

    #[tokio::test]
    async fn global_search_and_summary() {
        let data = unbound();
        let found = data.global_search("startup").await;
        assert!(found.is_fallback());
        assert!(found.value.users.is_empty());
        assert_eq!(found.value.documents.len(), 1);
        assert_eq!(found.value.cases.len(), 1);
        assert!(found.value.campaigns.is_empty());

        let summary = data.data_summary().await.value;
        assert_eq!(summary.total_users, 3);
        assert_eq!(summary.total_documents, 2);
        assert_eq!(summary.active_cases, 1);
        assert_eq!(summary.active_campaigns, 1);
        assert_eq!(summary.total_revenue, 0.0);
    }

    #[test]
    fn contract_availability_reflects_bindings() {
        let data = unbound();
        assert_eq!(data.contract_status(), ContractStatus::default());
        assert!(!data.is_contract_available("escrow"));
        assert!(!data.is_contract_available("nonsense"));
    }
}
