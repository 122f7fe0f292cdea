//! Crypto Dev exchange client
//! Balances, quotes and swaps against a deployed constant-product exchange

pub mod domain;
pub mod infrastructure;
pub mod application;
pub mod shared;
pub mod math;

// Re-export main types for convenience
pub use application::ExchangeService;
pub use domain::balance::{get_lp_balance, get_native_balance, get_reserve, get_token_balance};
pub use domain::exchange::{ExchangeReader, ExchangeSigner};
pub use domain::swap::{execute_swap, quote_swap};
pub use infrastructure::blockchain::{EthExchangeClient, ReadOnlyClient, SigningClient};
pub use shared::errors::{AppError, BalanceError, ChainError, SwapError};
