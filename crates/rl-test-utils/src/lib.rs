//! Test doubles for the wallet boundary.

use async_trait::async_trait;
use rl_provider::{
    Listener, ListenerId, ListenerSet, ProviderError, ProviderEvent, ProviderEventKind, RequestArguments,
    WalletProvider, methods,
};
use rl_wallet_core::{Diagnostic, DiagnosticKind, Notifier, Reloader};
use serde_json::{Value, json};
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};

/// Installs a `fmt` subscriber honouring `RUST_LOG`; repeated calls are
/// harmless.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Scripted EIP-1193 provider.
///
/// Answers account and chain queries from its configuration, records every
/// request, and lets tests fire `accountsChanged` / `chainChanged`.
pub struct MockWalletProvider {
    accounts: RefCell<Vec<String>>,
    chain_id: Cell<u64>,
    failures: RefCell<HashMap<String, ProviderError>>,
    call_responses: RefCell<HashMap<[u8; 4], VecDeque<Vec<u8>>>>,
    sent: Cell<u64>,
    requests: RefCell<Vec<RequestArguments>>,
    listeners: ListenerSet,
}

impl Default for MockWalletProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockWalletProvider {
    pub fn new() -> Self {
        Self {
            accounts: RefCell::default(),
            chain_id: Cell::new(rl_network::AVALANCHE_MAINNET_ID),
            failures: RefCell::default(),
            call_responses: RefCell::default(),
            sent: Cell::new(0),
            requests: RefCell::default(),
            listeners: ListenerSet::default(),
        }
    }

    pub fn with_accounts(self, accounts: &[&str]) -> Self {
        self.set_accounts(accounts);
        self
    }

    pub fn with_chain_id(self, chain_id: u64) -> Self {
        self.chain_id.set(chain_id);
        self
    }

    /// Every later `method` request fails with `code`.
    pub fn failing(self, method: &str, code: i64) -> Self {
        self.fail(method, code);
        self
    }

    pub fn set_accounts(&self, accounts: &[&str]) {
        *self.accounts.borrow_mut() = accounts.iter().map(|a| a.to_string()).collect();
    }

    pub fn set_chain_id(&self, chain_id: u64) {
        self.chain_id.set(chain_id);
    }

    pub fn fail(&self, method: &str, code: i64) {
        self.failures
            .borrow_mut()
            .insert(method.to_owned(), ProviderError::new(code, format!("{method} failed")));
    }

    pub fn clear_failures(&self) {
        self.failures.borrow_mut().clear();
    }

    /// Queues return data for `eth_call`s whose calldata starts with
    /// `selector`. The last queued response keeps answering.
    pub fn respond_to_call(&self, selector: [u8; 4], data: Vec<u8>) {
        self.call_responses
            .borrow_mut()
            .entry(selector)
            .or_default()
            .push_back(data);
    }

    pub fn requests(&self) -> Vec<RequestArguments> {
        self.requests.borrow().clone()
    }

    pub fn requests_for(&self, method: &str) -> Vec<RequestArguments> {
        self.requests
            .borrow()
            .iter()
            .filter(|args| args.method == method)
            .cloned()
            .collect()
    }

    pub fn request_count(&self, method: &str) -> usize {
        self.requests_for(method).len()
    }

    pub fn clear_requests(&self) {
        self.requests.borrow_mut().clear();
    }

    pub fn listener_count(&self, kind: ProviderEventKind) -> usize {
        self.listeners.count(kind)
    }

    /// Delivers `event` to the registered listeners; returns how many ran.
    pub fn emit(&self, event: ProviderEvent) -> usize {
        self.listeners.emit(&event)
    }

    fn answer_call(&self, params: &Value) -> Result<Value, ProviderError> {
        let data = params[0]["data"]
            .as_str()
            .and_then(|raw| hex::decode(raw.trim_start_matches("0x")).ok())
            .filter(|bytes| bytes.len() >= 4)
            .ok_or_else(|| ProviderError::invalid_response("eth_call without calldata"))?;
        let selector = [data[0], data[1], data[2], data[3]];

        let mut responses = self.call_responses.borrow_mut();
        let queue = responses
            .get_mut(&selector)
            .ok_or_else(|| ProviderError::new(-32000, "execution reverted"))?;
        let response = if queue.len() > 1 {
            queue.pop_front().unwrap_or_default()
        } else {
            queue.front().cloned().unwrap_or_default()
        };
        Ok(json!(format!("0x{}", hex::encode(response))))
    }
}

#[async_trait(?Send)]
impl WalletProvider for MockWalletProvider {
    async fn request(&self, args: RequestArguments) -> Result<Value, ProviderError> {
        self.requests.borrow_mut().push(args.clone());
        if let Some(err) = self.failures.borrow().get(&args.method) {
            return Err(err.clone());
        }

        match args.method.as_str() {
            methods::ETH_REQUEST_ACCOUNTS | methods::ETH_ACCOUNTS => Ok(json!(self.accounts.borrow().clone())),
            methods::ETH_CHAIN_ID => Ok(json!(rl_network::to_hex_chain_id(self.chain_id.get()))),
            methods::WALLET_SWITCH_CHAIN | methods::WALLET_ADD_CHAIN => Ok(Value::Null),
            methods::ETH_CALL => self.answer_call(&args.params),
            methods::ETH_SEND_TRANSACTION => {
                let nonce = self.sent.get() + 1;
                self.sent.set(nonce);
                Ok(json!(format!("0x{nonce:064x}")))
            }
            other => Err(ProviderError::new(
                ProviderError::UNSUPPORTED_METHOD,
                format!("{other} is not scripted"),
            )),
        }
    }

    fn add_listener(&self, kind: ProviderEventKind, listener: Listener) -> ListenerId {
        self.listeners.add(kind, listener)
    }

    fn remove_listener(&self, _kind: ProviderEventKind, id: ListenerId) {
        self.listeners.remove(id);
    }
}

/// Keeps every diagnostic it receives.
#[derive(Default)]
pub struct RecordingNotifier {
    diagnostics: RefCell<Vec<Diagnostic>>,
}

impl RecordingNotifier {
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.borrow().clone()
    }

    pub fn kinds(&self) -> Vec<DiagnosticKind> {
        self.diagnostics.borrow().iter().map(|d| d.kind).collect()
    }

    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.diagnostics.borrow().iter().filter(|d| d.kind == kind).count()
    }

    pub fn contains(&self, kind: DiagnosticKind) -> bool {
        self.count(kind) > 0
    }

    pub fn clear(&self) {
        self.diagnostics.borrow_mut().clear();
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, diagnostic: Diagnostic) {
        self.diagnostics.borrow_mut().push(diagnostic);
    }
}

#[derive(Default)]
pub struct CountingReloader {
    reloads: Cell<usize>,
}

impl CountingReloader {
    pub fn count(&self) -> usize {
        self.reloads.get()
    }
}

impl Reloader for CountingReloader {
    fn reload(&self) {
        self.reloads.set(self.reloads.get() + 1);
    }
}
