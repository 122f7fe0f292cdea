//! Common types used across the application

use chrono::{DateTime, Utc};
use ethers::types::{Address, H256, U256};
use serde::{Deserialize, Serialize};

/// Amount in the smallest unit of the native currency or the token
pub type Amount = U256;

/// Hash identifying a submitted transaction
pub type TxHash = H256;

/// Which asset is being sold into the pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SwapDirection {
    NativeToToken,
    TokenToNative,
}

impl SwapDirection {
    pub fn from_native_input(is_native_input: bool) -> Self {
        if is_native_input {
            SwapDirection::NativeToToken
        } else {
            SwapDirection::TokenToNative
        }
    }

    pub fn is_native_input(&self) -> bool {
        matches!(self, SwapDirection::NativeToToken)
    }

    /// Orders `(native_reserve, token_reserve)` as `(input_reserve, output_reserve)`.
    pub fn order_reserves(&self, native_reserve: Amount, token_reserve: Amount) -> (Amount, Amount) {
        match self {
            SwapDirection::NativeToToken => (native_reserve, token_reserve),
            SwapDirection::TokenToNative => (token_reserve, native_reserve),
        }
    }

    pub fn input_symbol(&self) -> &'static str {
        match self {
            SwapDirection::NativeToToken => "ETH",
            SwapDirection::TokenToNative => "CD",
        }
    }

    pub fn output_symbol(&self) -> &'static str {
        match self {
            SwapDirection::NativeToToken => "CD",
            SwapDirection::TokenToNative => "ETH",
        }
    }
}

/// A mined transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxConfirmation {
    pub tx_hash: TxHash,
    pub block_number: Option<u64>,
    pub gas_used: Option<U256>,
}

/// Outcome of a completed swap
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwapReceipt {
    pub direction: SwapDirection,
    pub input_amount: Amount,
    pub min_output_amount: Amount,
    pub approval: Option<TxConfirmation>,
    pub settlement: TxConfirmation,
    pub completed_at: DateTime<Utc>,
}

/// Balances held by one account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountBalances {
    pub account: Address,
    pub native: Amount,
    pub token: Amount,
    pub lp: Amount,
}

/// Pool reserves plus an optional account's balances
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolSnapshot {
    pub exchange: Address,
    pub native_reserve: Amount,
    pub token_reserve: Amount,
    pub account: Option<AccountBalances>,
}

/// A quoted swap ready to be executed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapPlan {
    pub direction: SwapDirection,
    pub input_amount: Amount,
    pub native_reserve: Amount,
    pub token_reserve: Amount,
    pub quoted_output: Amount,
    pub min_output_amount: Amount,
    pub slippage_bps: u32,
}
