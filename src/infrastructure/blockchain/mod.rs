//! JSON-RPC access to the Crypto Dev exchange and token contracts

pub mod contracts;
pub mod rpc_client;
pub mod wallet;

pub use rpc_client::{EthExchangeClient, ReadOnlyClient, SigningClient};
pub use wallet::{load_wallet_from_env, wallet_from_hex};
