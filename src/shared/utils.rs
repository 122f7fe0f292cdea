//! Utility functions and helpers

use ethers::types::Address;
use ethers::utils::{format_ether, parse_ether};
use crate::shared::errors::AppError;
use crate::shared::types::{Amount, TxHash};

/// Parse a hex account or contract address
pub fn parse_address(value: &str) -> Result<Address, AppError> {
    value
        .trim()
        .parse::<Address>()
        .map_err(|e| AppError::InvalidAddress(format!("{}: {}", value, e)))
}

/// Parse a human amount with 18 decimals ("0.5") into base units
pub fn parse_amount(value: &str) -> Result<Amount, AppError> {
    let trimmed = value.trim();
    if trimmed.starts_with('-') {
        return Err(AppError::InvalidAmount(format!("{} is negative", value)));
    }
    parse_ether(trimmed).map_err(|e| AppError::InvalidAmount(format!("{}: {}", value, e)))
}

/// Format base units as an 18-decimal human amount
pub fn format_amount(amount: Amount) -> String {
    format_ether(amount)
}

/// Hex-encode a transaction hash with a 0x prefix
pub fn format_tx_hash(hash: &TxHash) -> String {
    format!("0x{}", hex::encode(hash.as_bytes()))
}
