//! Balance domain - native, token and LP-share balances and the pool reserve

mod balance_reader;

pub use balance_reader::{get_lp_balance, get_native_balance, get_reserve, get_token_balance};
