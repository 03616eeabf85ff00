//! Filters over already-fetched records. Text matching is case-insensitive.

use rl_api_types::{
    CampaignStatus, CaseStatus, DocType, FundraisingCampaign, LegalCase, LegalDocument, User, UserRole, WalletAddress,
};

use crate::DAY_MS;

fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

fn any_tag(tags: &[String], needle: &str) -> bool {
    tags.iter().any(|tag| contains(tag, needle))
}

fn same_address(address: &str, other: &str) -> bool {
    WalletAddress(address.to_owned()).matches(other)
}

pub fn user_matches(user: &User, query: &str) -> bool {
    let query = query.to_lowercase();
    contains(&user.name, &query) || contains(user.role.as_str(), &query)
}

pub fn document_matches(doc: &LegalDocument, query: &str) -> bool {
    let query = query.to_lowercase();
    contains(&doc.title, &query) || contains(&doc.content, &query) || any_tag(&doc.tags, &query)
}

pub fn case_matches(case: &LegalCase, query: &str) -> bool {
    let query = query.to_lowercase();
    contains(&case.title, &query)
        || contains(&case.description, &query)
        || contains(&case.category, &query)
        || any_tag(&case.tags, &query)
}

pub fn campaign_matches(campaign: &FundraisingCampaign, query: &str) -> bool {
    let query = query.to_lowercase();
    contains(&campaign.title, &query)
        || contains(&campaign.description, &query)
        || contains(&campaign.category, &query)
        || any_tag(&campaign.tags, &query)
}

pub fn is_verified(user: &User, role: UserRole) -> bool {
    user.role == role && user.verified
}

pub fn has_address(user: &User, address: &str) -> bool {
    same_address(&user.address, address)
}

pub fn is_doc_type(doc: &LegalDocument, doc_type: DocType) -> bool {
    doc.doc_type == doc_type
}

pub fn belongs_to_case(doc: &LegalDocument, case_id: &str) -> bool {
    doc.case_id.as_deref() == Some(case_id)
}

pub fn same_category(category: &str, wanted: &str) -> bool {
    category.to_lowercase() == wanted.to_lowercase()
}

pub fn is_client(case: &LegalCase, address: &str) -> bool {
    has_address(&case.client, address)
}

pub fn is_lawyer(case: &LegalCase, address: &str) -> bool {
    case.lawyer.as_ref().is_some_and(|lawyer| has_address(lawyer, address))
}

pub fn is_completed(case: &LegalCase) -> bool {
    case.status == CaseStatus::Resolved
}

/// Active campaigns whose deadline is at most `days` away (or already past).
pub fn is_urgent_campaign(campaign: &FundraisingCampaign, days: u64, now_ms: u64) -> bool {
    campaign.status == CampaignStatus::Active && campaign.deadline_ms.saturating_sub(now_ms) <= days * DAY_MS
}

/// Unresolved cases with a future deadline, soonest first, at most `limit`.
pub fn upcoming_deadlines(cases: Vec<LegalCase>, limit: usize, now_ms: u64) -> Vec<LegalCase> {
    let mut upcoming: Vec<LegalCase> = cases
        .into_iter()
        .filter(|case| case.deadline_ms > now_ms && case.status != CaseStatus::Resolved)
        .collect();
    upcoming.sort_by_key(|case| case.deadline_ms);
    upcoming.truncate(limit);
    upcoming
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SampleData;

    const NOW: u64 = 1_700_000_000_000;

    #[test]
    fn user_search_covers_name_and_role() {
        let sample = SampleData::at(NOW);
        assert!(user_matches(&sample.users[0], "SARAH"));
        assert!(user_matches(&sample.users[2], "client"));
        assert!(!user_matches(&sample.users[2], "judge"));
    }

    #[test]
    fn document_search_covers_content_and_tags() {
        let sample = SampleData::at(NOW);
        assert!(document_matches(&sample.documents[0], "techstart"));
        assert!(document_matches(&sample.documents[1], "Transactions"));
        assert!(!document_matches(&sample.documents[1], "startup"));
    }

    #[test]
    fn case_search_covers_category_and_tags() {
        let sample = SampleData::at(NOW);
        assert!(case_matches(&sample.cases[0], "intellectual"));
        assert!(case_matches(&sample.cases[0], "ip"));
        assert!(!case_matches(&sample.cases[0], "bankruptcy"));
    }

    #[test]
    fn category_is_exact_ignoring_case() {
        assert!(same_category("Business Law", "business law"));
        assert!(!same_category("Business Law", "business"));
    }

    #[test]
    fn case_parties_match_any_address_case() {
        let sample = SampleData::at(NOW);
        let case = &sample.cases[0];
        assert!(is_client(case, "0x1234567890123456789012345678901234567890"));
        assert!(is_lawyer(case, "0x742d35cc6634c0532925a3b8d4c9db96c4b4d8b6"));
        assert!(!is_lawyer(case, "0x8ba1f109551bA432bdf8c998a2F9f8B6E5d55ED6"));
    }

    #[test]
    fn urgency_uses_day_threshold() {
        let campaign = SampleData::at(NOW).campaigns.remove(0);
        assert!(!is_urgent_campaign(&campaign, 7, NOW));
        assert!(is_urgent_campaign(&campaign, 20, NOW));

        let mut overdue = campaign.clone();
        overdue.deadline_ms = NOW - DAY_MS;
        assert!(is_urgent_campaign(&overdue, 0, NOW));

        let mut closed = campaign;
        closed.status = CampaignStatus::Succeeded;
        assert!(!is_urgent_campaign(&closed, 30, NOW));
    }

    #[test]
    fn upcoming_deadlines_sorted_and_limited() {
        let base = SampleData::at(NOW).cases.remove(0);
        let with = |id: &str, days: u64, status: CaseStatus| LegalCase {
            id: id.to_owned(),
            deadline_ms: NOW + days * DAY_MS,
            status,
            ..base.clone()
        };
        let mut past = with("past", 0, CaseStatus::Open);
        past.deadline_ms = NOW - DAY_MS;
        let cases = vec![
            with("late", 30, CaseStatus::Open),
            with("done", 1, CaseStatus::Resolved),
            past,
            with("soon", 2, CaseStatus::Funded),
            with("mid", 10, CaseStatus::Accepted),
        ];

        let ids: Vec<String> = upcoming_deadlines(cases, 2, NOW).into_iter().map(|c| c.id).collect();
        assert_eq!(ids, ["soon", "mid"]);
    }
}
