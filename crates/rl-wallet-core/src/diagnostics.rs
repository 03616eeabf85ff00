use serde::Serialize;
use tracing::{error, info, warn};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticLevel {
    Success,
    Info,
    Warning,
    Error,
}

/// User-facing outcome of a wallet operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    ProviderUnavailable,
    NoAccounts,
    WrongNetwork,
    Connected,
    ConnectionFailed,
    Disconnected,
    NetworkAddFailed,
    NetworkSwitchFailed,
}

impl DiagnosticKind {
    pub fn level(self) -> DiagnosticLevel {
        match self {
            Self::Connected | Self::Disconnected => DiagnosticLevel::Success,
            _ => DiagnosticLevel::Error,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::ProviderUnavailable => "MetaMask or other Web3 wallet is required",
            Self::NoAccounts => "No accounts found",
            Self::WrongNetwork => "Please switch to Avalanche C-Chain",
            Self::Connected => "Wallet connected successfully!",
            Self::ConnectionFailed => "Failed to connect wallet",
            Self::Disconnected => "Wallet disconnected",
            Self::NetworkAddFailed => "Failed to add Avalanche network",
            Self::NetworkSwitchFailed => "Failed to switch network",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub id: Uuid,
    pub kind: DiagnosticKind,
    pub level: DiagnosticLevel,
    pub message: String,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            level: kind.level(),
            message: kind.message().to_owned(),
        }
    }
}

/// Receives diagnostics; the UI decides how to show them.
pub trait Notifier {
    fn notify(&self, diagnostic: Diagnostic);
}

/// Writes diagnostics to the `tracing` log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, diagnostic: Diagnostic) {
        match diagnostic.level {
            DiagnosticLevel::Success | DiagnosticLevel::Info => {
                info!(kind = ?diagnostic.kind, "{}", diagnostic.message)
            }
            DiagnosticLevel::Warning => warn!(kind = ?diagnostic.kind, "{}", diagnostic.message),
            DiagnosticLevel::Error => error!(kind = ?diagnostic.kind, "{}", diagnostic.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnostics_carry_fixed_messages() {
        let diagnostic = Diagnostic::new(DiagnosticKind::WrongNetwork);
        assert_eq!(diagnostic.message, "Please switch to Avalanche C-Chain");
        assert_eq!(diagnostic.level, DiagnosticLevel::Error);
        assert_eq!(Diagnostic::new(DiagnosticKind::Disconnected).level, DiagnosticLevel::Success);
    }

    #[test]
    fn every_diagnostic_gets_a_fresh_id() {
        let first = Diagnostic::new(DiagnosticKind::Connected);
        let second = Diagnostic::new(DiagnosticKind::Connected);
        assert_ne!(first.id, second.id);
    }
}
