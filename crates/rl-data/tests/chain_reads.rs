use rl_api_types::{CampaignStatus, CaseStatus};
use rl_contracts::abi::{self, Token};
use rl_contracts::{AddressOverrides, ContractService, ServiceName};
use rl_data::{DataService, Provenance, SampleData};
use rl_provider::{ContractSigner, ProviderSigner, WalletProvider};
use rl_test_utils::{MockWalletProvider, init_tracing};
use std::rc::Rc;

const NOW: u64 = 1_700_000_000_000;
const ACCOUNT: &str = "0x1234567890123456789012345678901234567890";

fn bound(overrides: AddressOverrides) -> (Rc<MockWalletProvider>, DataService) {
    init_tracing();
    let provider = Rc::new(MockWalletProvider::new().with_accounts(&[ACCOUNT]));
    let wallet: Rc<dyn WalletProvider> = provider.clone();
    let signer: Rc<dyn ContractSigner> = Rc::new(ProviderSigner::new(wallet, ACCOUNT));

    let contracts = Rc::new(ContractService::new());
    contracts.initialize(signer, &overrides);
    let data = DataService::with_sample(contracts, SampleData::at(NOW)).at(NOW);
    (provider, data)
}

fn only(name: ServiceName) -> AddressOverrides {
    AddressOverrides::default().with(name, "0x00000000000000000000000000000000000000aa")
}

#[tokio::test]
async fn bound_escrow_reads_from_chain() {
    let (provider, data) = bound(only(ServiceName::Escrow));
    provider.respond_to_call(
        abi::selector("getCaseStatus(string)"),
        abi::encode(&[Token::uint(CaseStatus::Resolved as u8)]),
    );

    let cases = data.cases().await;
    assert_eq!(cases.provenance, Provenance::Chain);
    assert_eq!(cases.value[0].status, CaseStatus::Resolved);

    let completed = data.completed_cases().await;
    assert_eq!(completed.provenance, Provenance::Chain);
    assert_eq!(completed.value.len(), 1);
    assert!(data.upcoming_deadlines(5).await.value.is_empty());
}

#[tokio::test]
async fn chain_records_overlay_status_onto_catalog_text() {
    let (provider, data) = bound(only(ServiceName::Escrow));
    provider.respond_to_call(
        abi::selector("getCaseStatus(string)"),
        abi::encode(&[Token::uint(CaseStatus::Resolved as u8)]),
    );

    let mut expected = data.sample().cases[0].clone();
    expected.status = CaseStatus::Resolved;

    let cases = data.cases().await;
    assert_eq!(cases.provenance, Provenance::Chain);
    assert_eq!(cases.value, vec![expected]);
}

#[tokio::test]
async fn failed_chain_read_serves_sample() {
    let (provider, data) = bound(only(ServiceName::Fund));

    let campaigns = data.campaigns().await;
    assert_eq!(campaigns.provenance, Provenance::Fallback);
    assert_eq!(campaigns.value, data.sample().campaigns);
    assert_eq!(provider.request_count("eth_call"), 1);
}

#[tokio::test]
async fn mixed_sources_mark_summary_as_fallback() {
    let (provider, data) = bound(only(ServiceName::Escrow));
    provider.respond_to_call(
        abi::selector("getCaseStatus(string)"),
        abi::encode(&[Token::uint(CaseStatus::Resolved as u8)]),
    );

    let summary = data.data_summary().await;
    assert_eq!(summary.provenance, Provenance::Fallback);
    assert_eq!(summary.value.active_cases, 0);
    assert_eq!(summary.value.total_revenue, 25_000.0);
}

#[tokio::test]
async fn campaign_status_from_chain_drives_filters() {
    let (provider, data) = bound(only(ServiceName::Fund));
    provider.respond_to_call(
        abi::selector("getCampaignStatus(string)"),
        abi::encode(&[Token::uint(CampaignStatus::Succeeded as u8)]),
    );

    assert!(data.active_campaigns().await.value.is_empty());
    let succeeded = data.successful_campaigns().await;
    assert_eq!(succeeded.provenance, Provenance::Chain);
    assert_eq!(succeeded.value[0].id, "campaign1");
}

#[tokio::test]
async fn listings_keep_only_live_listings() {
    let (provider, data) = bound(only(ServiceName::Listings));
    let listing = |exists: bool| {
        abi::encode(&[Token::Tuple(vec![
            Token::string("ipfs://profile"),
            Token::uint(100u64),
            Token::strings(&[]),
            Token::Bool(exists),
        ])])
    };
    let selector = abi::selector("getListing(address)");
    provider.respond_to_call(selector, listing(false));
    provider.respond_to_call(selector, listing(true));

    let listed = data.lawyer_listings().await;
    assert_eq!(listed.provenance, Provenance::Chain);
    let names: Vec<&str> = listed.value.iter().map(|u| u.name.as_str()).collect();
    assert_eq!(names, ["Michael Chen"]);
}

#[tokio::test]
async fn availability_follows_bindings() {
    let (_provider, data) = bound(only(ServiceName::Roles));
    assert!(data.is_contract_available("roles"));
    assert!(!data.is_contract_available("fund"));
    assert!(data.contract_status().roles);
}
