use rl_contracts::{AddressOverrides, ContractService};
use rl_network::{NetworkStatus, PRIMARY_NETWORK};
use rl_provider::{
    ContractSigner, Listener, ProviderEvent, ProviderEventKind, ProviderSigner, RequestArguments,
    Subscription, WalletProvider, methods,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tracing::{debug, error, info, warn};

use crate::diagnostics::{Diagnostic, DiagnosticKind, Notifier};
use crate::error::WalletError;
use crate::state::{ChainChangePolicy, ConnectionPhase, ConnectionState, Reloader};

/// Owns the wallet connection lifecycle.
///
/// Cloning is cheap and clones share one connection. Provider listeners
/// registered by [`attach`](Self::attach) are released by
/// [`detach`](Self::detach) or when the last clone is dropped.
#[derive(Clone)]
pub struct WalletConnector {
    inner: Rc<Inner>,
}

struct Inner {
    provider: Option<Rc<dyn WalletProvider>>,
    contracts: Rc<ContractService>,
    notifier: Rc<dyn Notifier>,
    reloader: Rc<dyn Reloader>,
    overrides: RefCell<AddressOverrides>,
    policy: Cell<ChainChangePolicy>,
    state: RefCell<ConnectionState>,
    phase: Cell<ConnectionPhase>,
    connecting: Cell<bool>,
    /// Bumped by every connect and disconnect; a restore that sees it
    /// move while awaiting the wallet drops its result.
    session: Cell<u64>,
    subscriptions: RefCell<Vec<Subscription>>,
}

/// Clears the in-flight flag however `connect_wallet` exits.
struct InFlight<'a>(&'a Cell<bool>);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

impl WalletConnector {
    pub fn new(
        provider: Option<Rc<dyn WalletProvider>>,
        contracts: Rc<ContractService>,
        notifier: Rc<dyn Notifier>,
        reloader: Rc<dyn Reloader>,
    ) -> Self {
        Self {
            inner: Rc::new(Inner {
                provider,
                contracts,
                notifier,
                reloader,
                overrides: RefCell::default(),
                policy: Cell::default(),
                state: RefCell::default(),
                phase: Cell::default(),
                connecting: Cell::new(false),
                session: Cell::new(0),
                subscriptions: RefCell::default(),
            }),
        }
    }

    /// Contract addresses applied on top of the façade's defaults whenever
    /// a signer is bound.
    pub fn with_address_overrides(self, overrides: AddressOverrides) -> Self {
        *self.inner.overrides.borrow_mut() = overrides;
        self
    }

    pub fn with_chain_change_policy(self, policy: ChainChangePolicy) -> Self {
        self.inner.policy.set(policy);
        self
    }

    pub fn has_provider(&self) -> bool {
        self.inner.provider.is_some()
    }

    pub fn state(&self) -> ConnectionState {
        self.inner.state.borrow().clone()
    }

    pub fn phase(&self) -> ConnectionPhase {
        self.inner.phase.get()
    }

    pub fn network_status(&self) -> NetworkStatus {
        let state = self.inner.state.borrow();
        rl_network::classify(state.chain_id, state.connected)
    }

    pub fn contracts(&self) -> Rc<ContractService> {
        Rc::clone(&self.inner.contracts)
    }

    /// Prompts the wallet for accounts and binds the contract clients to
    /// the first one. On an unaccepted network a switch to the primary
    /// network is requested once; its outcome does not fail the connect.
    pub async fn connect_wallet(&self) -> Result<ConnectionState, WalletError> {
        let inner = &self.inner;
        let Some(provider) = inner.provider.clone() else {
            warn!("connect requested without an injected wallet provider");
            inner.emit(DiagnosticKind::ProviderUnavailable);
            return Err(WalletError::ProviderUnavailable);
        };
        if inner.connecting.replace(true) {
            debug!("connect already in flight");
            return Err(WalletError::OperationInProgress);
        }
        let _in_flight = InFlight(&inner.connecting);
        inner.begin_session();
        inner.phase.set(ConnectionPhase::Connecting);

        let accounts = match provider.request_accounts().await {
            Ok(accounts) => accounts,
            Err(err) => return Err(inner.connection_failed(anyhow::Error::new(err).context("eth_requestAccounts"))),
        };
        let Some(account) = accounts.into_iter().next() else {
            warn!("wallet authorized no accounts");
            inner.settle_phase();
            inner.emit(DiagnosticKind::NoAccounts);
            return Err(WalletError::NoAccountsAuthorized);
        };
        let chain_id = match provider.chain_id().await {
            Ok(chain_id) => chain_id,
            Err(err) => return Err(inner.connection_failed(anyhow::Error::new(err).context("eth_chainId"))),
        };

        inner.bind(&provider, account, chain_id);
        info!("wallet connected on chain {}", chain_id);

        if rl_network::is_accepted(chain_id) {
            inner.emit(DiagnosticKind::Connected);
        } else {
            warn!("chain {} is not an accepted network", chain_id);
            inner.emit(DiagnosticKind::WrongNetwork);
            if let Err(err) = self.switch_network().await {
                debug!("automatic network switch did not complete: {}", err);
            }
        }
        Ok(self.state())
    }

    /// Forgets the connection locally; the wallet is not contacted.
    pub fn disconnect_wallet(&self) {
        self.inner.disconnect();
    }

    /// Asks the wallet to switch to the primary network, adding it first
    /// when the wallet does not know it. Connection state is left to the
    /// wallet's `chainChanged` event.
    pub async fn switch_network(&self) -> Result<(), WalletError> {
        let inner = &self.inner;
        let Some(provider) = inner.provider.clone() else {
            return Err(WalletError::ProviderUnavailable);
        };

        match request_switch(provider.as_ref()).await {
            Ok(()) => Ok(()),
            Err(WalletError::UnrecognizedChain) => {
                info!("wallet does not know {}; adding it", PRIMARY_NETWORK.display_name);
                let args = RequestArguments::new(methods::WALLET_ADD_CHAIN, PRIMARY_NETWORK.add_chain_params());
                match provider.request(args).await {
                    Ok(_) => Ok(()),
                    Err(err) => {
                        error!("adding {} failed: {}", PRIMARY_NETWORK.display_name, err);
                        inner.emit(DiagnosticKind::NetworkAddFailed);
                        Err(WalletError::NetworkAddFailed(err))
                    }
                }
            }
            Err(err) => {
                error!("network switch failed: {:?}", err);
                inner.emit(DiagnosticKind::NetworkSwitchFailed);
                Err(err)
            }
        }
    }

    /// Restores a connection the wallet already authorized, without
    /// prompting. Returns `None` when there is nothing to restore, or when a
    /// connect or disconnect happened while the wallet was answering.
    pub async fn check_existing_connection(&self) -> Result<Option<ConnectionState>, WalletError> {
        let inner = &self.inner;
        let Some(provider) = inner.provider.clone() else {
            return Ok(None);
        };
        if inner.connecting.get() {
            debug!("skipping passive reconnect while a connect is in flight");
            return Ok(None);
        }

        let session = inner.session.get();

        let accounts = provider.accounts().await.map_err(|err| {
            error!("checking existing connection failed: {}", err);
            WalletError::from(err)
        })?;
        let Some(account) = accounts.into_iter().next() else {
            return Ok(None);
        };
        let chain_id = provider.chain_id().await.map_err(|err| {
            error!("reading chain id for existing connection failed: {}", err);
            WalletError::from(err)
        })?;
        if inner.session.get() != session {
            debug!("discarding passive reconnect superseded by a connect or disconnect");
            return Ok(None);
        }

        inner.bind(&provider, account, chain_id);
        info!("restored wallet connection on chain {}", chain_id);
        Ok(Some(self.state()))
    }

    /// Registers the account and chain listeners, replacing any registered
    /// earlier by this connector.
    pub fn attach(&self) {
        let Some(provider) = self.inner.provider.clone() else {
            debug!("no provider to attach listeners to");
            return;
        };
        self.detach();

        let subscriptions = [ProviderEventKind::AccountsChanged, ProviderEventKind::ChainChanged]
            .into_iter()
            .map(|kind| {
                let weak = Rc::downgrade(&self.inner);
                let listener: Listener = Rc::new(move |event: &ProviderEvent| {
                    if let Some(inner) = weak.upgrade() {
                        inner.handle_event(event);
                    }
                });
                Subscription::new(Rc::clone(&provider), kind, listener)
            })
            .collect();
        *self.inner.subscriptions.borrow_mut() = subscriptions;
    }

    pub fn detach(&self) {
        let released = std::mem::take(&mut *self.inner.subscriptions.borrow_mut());
        drop(released);
    }

    pub fn is_attached(&self) -> bool {
        !self.inner.subscriptions.borrow().is_empty()
    }
}

async fn request_switch(provider: &dyn WalletProvider) -> Result<(), WalletError> {
    let args = RequestArguments::new(methods::WALLET_SWITCH_CHAIN, PRIMARY_NETWORK.switch_chain_params());
    match provider.request(args).await {
        Ok(_) => Ok(()),
        Err(err) if err.is_unrecognized_chain() => Err(WalletError::UnrecognizedChain),
        Err(err) => Err(WalletError::NetworkSwitchFailed(err)),
    }
}

impl Inner {
    fn begin_session(&self) {
        self.session.set(self.session.get().wrapping_add(1));
    }

    fn emit(&self, kind: DiagnosticKind) {
        self.notifier.notify(Diagnostic::new(kind));
    }

    fn bind(&self, provider: &Rc<dyn WalletProvider>, account: String, chain_id: u64) {
        let signer: Rc<dyn ContractSigner> = Rc::new(ProviderSigner::new(Rc::clone(provider), account.clone()));
        *self.state.borrow_mut() = ConnectionState::connected(account, chain_id);
        self.phase.set(ConnectionPhase::Connected);
        let overrides = self.overrides.borrow().clone();
        self.contracts.initialize(signer, &overrides);
    }

    /// Phase after an aborted connect: whatever the state still says.
    fn settle_phase(&self) {
        let phase = if self.state.borrow().connected {
            ConnectionPhase::Connected
        } else {
            ConnectionPhase::Disconnected
        };
        self.phase.set(phase);
    }

    fn connection_failed(&self, err: anyhow::Error) -> WalletError {
        error!("wallet connection failed: {:#}", err);
        self.settle_phase();
        self.emit(DiagnosticKind::ConnectionFailed);
        WalletError::ConnectionFailed(err)
    }

    fn disconnect(&self) {
        self.begin_session();
        *self.state.borrow_mut() = ConnectionState::default();
        self.phase.set(ConnectionPhase::Disconnected);
        self.contracts.clear();
        info!("wallet disconnected");
        self.emit(DiagnosticKind::Disconnected);
    }

    fn handle_event(&self, event: &ProviderEvent) {
        match event {
            ProviderEvent::AccountsChanged(accounts) => match accounts.first() {
                None => self.disconnect(),
                Some(account) => {
                    debug!("active account changed");
                    self.state.borrow_mut().account = Some(account.clone());
                }
            },
            ProviderEvent::ChainChanged(raw) => {
                match rl_network::parse_chain_id(raw) {
                    Ok(chain_id) => self.state.borrow_mut().chain_id = Some(chain_id),
                    Err(err) => warn!("ignoring chain change: {}", err),
                }
                match self.policy.get() {
                    ChainChangePolicy::Reload => {
                        info!("chain changed to {}; reloading", raw);
                        self.reloader.reload();
                    }
                    ChainChangePolicy::Rebind => self.rebind(),
                }
            }
        }
    }

    fn rebind(&self) {
        let Some(provider) = self.provider.clone() else {
            return;
        };
        let state = self.state.borrow().clone();
        let (true, Some(account), Some(chain_id)) = (state.connected, state.account, state.chain_id) else {
            return;
        };
        self.bind(&provider, account, chain_id);
        info!("contract services rebound on chain {}", chain_id);
    }
}
