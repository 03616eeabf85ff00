use serde::Serialize;

/// Snapshot of the wallet connection. Callers get clones; only the
/// connector mutates it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionState {
    pub account: Option<String>,
    pub chain_id: Option<u64>,
    pub connected: bool,
}

impl ConnectionState {
    pub fn connected(account: String, chain_id: u64) -> Self {
        Self {
            account: Some(account),
            chain_id: Some(chain_id),
            connected: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionPhase {
    #[default]
    Disconnected,
    Connecting,
    Connected,
}

/// What happens after the wallet reports a chain change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChainChangePolicy {
    /// Reload the page so every view re-reads against the new chain.
    #[default]
    Reload,
    /// Keep the page and rebind the contract clients in place.
    Rebind,
}

/// Full page reload hook.
pub trait Reloader {
    fn reload(&self);
}

/// For hosts without a page to reload.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopReloader;

impl Reloader for NoopReloader {
    fn reload(&self) {}
}
