//! Error handling for the application

use thiserror::Error;

/// Transport and contract-call errors raised by an exchange capability
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChainError {
    #[error("RPC transport error: {0}")]
    Transport(String),

    #[error("Contract call failed: {0}")]
    ContractCall(String),

    #[error("ABI error: {0}")]
    Abi(String),

    #[error("Transaction {0} dropped before confirmation")]
    Dropped(String),

    #[error("Transaction {0} reverted")]
    Reverted(String),
}

/// Balance-reader errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BalanceError {
    #[error("An account address is required when not querying the exchange contract")]
    MissingAddress,

    #[error("Failed to read {what}: {source}")]
    Query {
        what: &'static str,
        #[source]
        source: ChainError,
    },
}

/// Swap-related errors. Each variant names the step that failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SwapError {
    #[error("Quote failed: {0}")]
    Quote(ChainError),

    #[error("Approval failed: {0}")]
    Approval(ChainError),

    #[error("Settlement failed: {0}")]
    Settlement(ChainError),

    #[error("Confirmation failed: {0}")]
    Confirmation(ChainError),
}

/// General application error
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Wallet error: {0}")]
    WalletError(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Timed out after {0}s waiting for the swap")]
    Timeout(u64),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error(transparent)]
    Balance(#[from] BalanceError),

    #[error(transparent)]
    Swap(#[from] SwapError),

    #[error(transparent)]
    Chain(#[from] ChainError),
}
