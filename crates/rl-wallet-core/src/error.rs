use rl_provider::ProviderError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WalletError {
    #[error("no injected wallet provider")]
    ProviderUnavailable,
    #[error("wallet returned no authorized accounts")]
    NoAccountsAuthorized,
    #[error("wallet does not know the requested chain")]
    UnrecognizedChain,
    #[error("network switch failed")]
    NetworkSwitchFailed(#[source] ProviderError),
    #[error("adding the Avalanche network failed")]
    NetworkAddFailed(#[source] ProviderError),
    #[error("wallet connection failed")]
    ConnectionFailed(#[source] anyhow::Error),
    #[error("a wallet connection is already in progress")]
    OperationInProgress,
}

impl From<ProviderError> for WalletError {
    fn from(err: ProviderError) -> Self {
        Self::ConnectionFailed(err.into())
    }
}
