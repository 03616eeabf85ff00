use primitive_types::U256;
use rl_api_types::{CaseStatus, DocumentStatus, UserRole};
use rl_contracts::abi::{self, Token};
use rl_contracts::units::parse_ether;
use rl_contracts::{
    AddressOverrides, ContractError, ContractService, DocumentsClient, EscrowClient, ListingsClient, RolesClient,
    ServiceName,
};
use rl_provider::{ContractSigner, ProviderSigner, WalletProvider, methods};
use rl_test_utils::{MockWalletProvider, init_tracing};
use std::rc::Rc;

const ACCOUNT: &str = "0x742d35Cc6634C0532925a3b8D4C9db96C4b4d8b6";
const CONTRACT: &str = "0x00000000000000000000000000000000000000c1";

fn setup() -> (Rc<MockWalletProvider>, Rc<dyn ContractSigner>) {
    init_tracing();
    let provider = Rc::new(MockWalletProvider::new().with_accounts(&[ACCOUNT]));
    let wallet: Rc<dyn WalletProvider> = provider.clone();
    let signer: Rc<dyn ContractSigner> = Rc::new(ProviderSigner::new(wallet, ACCOUNT));
    (provider, signer)
}

fn returns(tokens: &[Token]) -> Vec<u8> {
    abi::encode(tokens)
}

fn sample_users() -> Vec<rl_api_types::User> {
    let user = |id: &str, address: &str, role: UserRole| rl_api_types::User {
        id: id.to_owned(),
        address: address.to_owned(),
        name: format!("user {id}"),
        email: None,
        avatar: None,
        role,
        verified: false,
        join_date_ms: 0,
        total_cases: 0,
        success_rate: 0,
        rating: 0.0,
        reviews: 0,
    };
    vec![
        user("1", "0x742d35Cc6634C0532925a3b8D4C9db96C4b4d8b6", UserRole::Lawyer),
        user("2", "0x8ba1f109551bA432bdf8c998a2F9f8B6E5d55ED6", UserRole::Judge),
        user("3", "0x1234567890123456789012345678901234567890", UserRole::Client),
    ]
}

#[tokio::test]
async fn payable_write_sends_value_and_returns_hash() {
    let (provider, signer) = setup();
    let escrow = EscrowClient::new(CONTRACT, signer);

    let hash = escrow
        .fund_case("case1", Some(parse_ether("1.5").unwrap()))
        .await
        .unwrap();
    assert_eq!(hash.0, format!("0x{:064x}", 1));

    let sent = provider.requests_for(methods::ETH_SEND_TRANSACTION);
    assert_eq!(sent.len(), 1);
    let tx = &sent[0].params[0];
    assert_eq!(tx["from"], ACCOUNT);
    assert_eq!(tx["to"], CONTRACT);
    assert_eq!(tx["value"], "0x14d1120d7b160000");
    let selector = hex::encode(abi::selector("fundCase(string)"));
    assert!(tx["data"].as_str().unwrap().starts_with(&format!("0x{selector}")));
}

#[tokio::test]
async fn rejected_write_is_not_masked() {
    let (provider, signer) = setup();
    provider.fail(methods::ETH_SEND_TRANSACTION, 4001);
    let escrow = EscrowClient::new(CONTRACT, signer);

    let err = escrow.accept_case("case1").await.unwrap_err();
    assert!(matches!(err, ContractError::Call { .. }));
    assert_eq!(err.method(), Some("acceptCase(string)"));
}

#[tokio::test]
async fn pause_and_unpause_send_bare_selectors() {
    let (provider, signer) = setup();
    let escrow = EscrowClient::new(CONTRACT, signer);

    escrow.pause().await.unwrap();
    escrow.unpause().await.unwrap();

    let sent = provider.requests_for(methods::ETH_SEND_TRANSACTION);
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].params[0]["data"], format!("0x{}", hex::encode(abi::selector("pause()"))));
    assert_eq!(sent[1].params[0]["data"], format!("0x{}", hex::encode(abi::selector("unpause()"))));
    assert!(sent[0].params[0].get("value").is_none());
}

#[tokio::test]
async fn refresh_cases_overlays_status() {
    let (provider, signer) = setup();
    provider.respond_to_call(
        abi::selector("getCaseStatus(string)"),
        returns(&[Token::uint(CaseStatus::Resolved as u8)]),
    );
    let escrow = EscrowClient::new(CONTRACT, signer);

    let mut case = catalog_case();
    case.status = CaseStatus::Open;
    let refreshed = escrow.refresh_cases(vec![case.clone()]).await.unwrap();

    assert_eq!(refreshed.len(), 1);
    assert_eq!(refreshed[0].status, CaseStatus::Resolved);
    assert_eq!(refreshed[0].title, case.title);
}

#[tokio::test]
async fn case_data_tuple_decodes() {
    let (provider, signer) = setup();
    provider.respond_to_call(
        abi::selector("getCaseData(string)"),
        returns(&[Token::Tuple(vec![
            Token::address("0x1234567890123456789012345678901234567890").unwrap(),
            Token::address(ACCOUNT).unwrap(),
            Token::address(rl_contracts::NATIVE_TOKEN).unwrap(),
            Token::Uint(parse_ether("2").unwrap()),
            Token::uint(1_700_000_000u64),
            Token::uint(1_800_000_000u64),
            Token::uint(CaseStatus::Funded as u8),
        ])]),
    );
    let escrow = EscrowClient::new(CONTRACT, signer);

    let data = escrow.case_data("case1").await.unwrap();
    assert_eq!(data.client, "0x1234567890123456789012345678901234567890");
    assert_eq!(data.lawyer, ACCOUNT.to_lowercase());
    assert_eq!(data.amount, "2000000000000000000");
    assert_eq!(data.deadline, 1_800_000_000);
    assert_eq!(data.status, CaseStatus::Funded);
}

#[tokio::test]
async fn listing_tuple_decodes() {
    let (provider, signer) = setup();
    provider.respond_to_call(
        abi::selector("getListing(address)"),
        returns(&[Token::Tuple(vec![
            Token::string("ipfs://profile"),
            Token::Uint(U256::from(250u64)),
            Token::strings(&["ip".to_owned(), "contracts".to_owned()]),
            Token::Bool(true),
        ])]),
    );
    let listings = ListingsClient::new(CONTRACT, signer);

    let listing = listings.listing(ACCOUNT).await.unwrap();
    assert_eq!(listing.profile_uri, "ipfs://profile");
    assert_eq!(listing.hourly_rate, "250");
    assert_eq!(listing.tags, ["ip", "contracts"]);
    assert!(listing.exists);
}

#[tokio::test]
async fn refresh_documents_applies_latest_version() {
    let (provider, signer) = setup();
    provider.respond_to_call(abi::selector("versionCount(bytes32)"), returns(&[Token::uint(3u64)]));
    provider.respond_to_call(
        abi::selector("getVersion(bytes32,uint256)"),
        returns(&[Token::Tuple(vec![
            Token::string("QmLatest"),
            Token::uint(1_700_000_000u64),
            Token::Bool(true),
            Token::address(ACCOUNT).unwrap(),
        ])]),
    );
    let documents = DocumentsClient::new(CONTRACT, signer);

    let doc = catalog_case().documents.remove(0);
    let refreshed = documents.refresh_documents(vec![doc]).await.unwrap();

    assert_eq!(refreshed[0].version, 3);
    assert_eq!(refreshed[0].cid, "QmLatest");
    assert_eq!(refreshed[0].updated_at_ms, 1_700_000_000_000);
    assert_eq!(refreshed[0].status, DocumentStatus::Revoked);
}

#[tokio::test]
async fn refresh_practitioners_uses_approval() {
    let (provider, signer) = setup();
    let status = abi::selector("getPractitionerStatus(address)");
    provider.respond_to_call(status, returns(&[Token::uint(2u8)]));
    provider.respond_to_call(status, returns(&[Token::uint(1u8)]));
    let roles = RolesClient::new(CONTRACT, signer);

    let practitioners = roles.refresh_practitioners(sample_users()).await.unwrap();

    let verified: Vec<(&str, bool)> = practitioners.iter().map(|u| (u.id.as_str(), u.verified)).collect();
    assert_eq!(verified, [("1", true), ("2", false)]);
}

#[tokio::test]
async fn reverted_read_fails_whole_refresh() {
    let (_provider, signer) = setup();
    let roles = RolesClient::new(CONTRACT, signer);

    let err = roles.refresh_practitioners(sample_users()).await.unwrap_err();
    assert_eq!(err.method(), Some("getPractitionerStatus(address)"));
}

#[tokio::test]
async fn service_binds_only_configured_contracts() {
    let (_provider, signer) = setup();
    let service = ContractService::new();
    service.initialize(
        Rc::clone(&signer),
        &AddressOverrides::default().with(ServiceName::Escrow, CONTRACT),
    );

    assert!(service.is_initialized());
    assert!(service.has_service(ServiceName::Escrow));
    assert!(!service.has_service(ServiceName::Roles));
    assert_eq!(service.escrow().unwrap().address(), CONTRACT);
    assert!(matches!(
        service.require_roles(),
        Err(ContractError::NotBound(ServiceName::Roles))
    ));

    service.initialize(signer, &AddressOverrides::default());
    assert_eq!(service.contract_status().bound_count(), 0);
}

fn catalog_case() -> rl_api_types::LegalCase {
    let client = sample_users().remove(2);
    let document = rl_api_types::LegalDocument {
        id: "doc1".to_owned(),
        title: "Engagement letter".to_owned(),
        doc_type: rl_api_types::DocType::Contract,
        case_id: Some("case1".to_owned()),
        content: String::new(),
        cid: "QmOld".to_owned(),
        author: ACCOUNT.to_owned(),
        author_name: "user 1".to_owned(),
        created_at_ms: 0,
        updated_at_ms: 0,
        version: 1,
        status: DocumentStatus::Published,
        tags: Vec::new(),
        file_size: 0,
        file_type: "pdf".to_owned(),
        is_public: false,
    };
    rl_api_types::LegalCase {
        id: "case1".to_owned(),
        title: "Lease dispute".to_owned(),
        description: String::new(),
        client,
        lawyer: None,
        status: CaseStatus::Open,
        category: "Property".to_owned(),
        priority: rl_api_types::Priority::Medium,
        budget: rl_api_types::Budget {
            min: 0.0,
            max: 0.0,
            currency: "USD".to_owned(),
        },
        deadline_ms: 0,
        created_at_ms: 0,
        updated_at_ms: 0,
        documents: vec![document],
        tags: Vec::new(),
        location: String::new(),
        court: None,
        case_number: None,
        progress: 0,
        milestones: Vec::new(),
    }
}
