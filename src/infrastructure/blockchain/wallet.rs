//! Local signing key loading

use ethers::signers::LocalWallet;
use crate::shared::errors::AppError;

/// Parse a hex-encoded secp256k1 private key, with or without `0x`
pub fn wallet_from_hex(key: &str) -> Result<LocalWallet, AppError> {
    key.trim()
        .parse::<LocalWallet>()
        .map_err(|e| AppError::WalletError(format!("Invalid private key: {}", e)))
}

/// Read the private key from the environment variable `var`
pub fn load_wallet_from_env(var: &str) -> Result<LocalWallet, AppError> {
    let key = std::env::var(var)
        .map_err(|_| AppError::WalletError(format!("Environment variable {} is not set", var)))?;
    wallet_from_hex(&key)
}
