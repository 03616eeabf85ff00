//! Wallet connection lifecycle for the ReadyLaw client.
//!
//! [`WalletConnector`] drives an injected wallet through
//! `Disconnected -> Connecting -> Connected`, binds the shared
//! [`rl_contracts::ContractService`] to the connected account, and reacts
//! to the wallet's account and chain events. Outcomes the user should see
//! are reported through a [`Notifier`] as [`Diagnostic`]s.

mod connector;
mod diagnostics;
mod error;
mod state;

pub use connector::WalletConnector;
pub use diagnostics::{Diagnostic, DiagnosticKind, DiagnosticLevel, Notifier, TracingNotifier};
pub use error::WalletError;
pub use state::{ChainChangePolicy, ConnectionPhase, ConnectionState, NoopReloader, Reloader};
