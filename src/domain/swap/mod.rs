//! Swap domain - contract quotes and settlement

mod swap_executor;

pub use swap_executor::{execute_swap, quote_swap};
