//! Exchange domain - capabilities over the deployed exchange and token contracts

mod exchange_interface;
#[cfg(test)]
pub(crate) mod mock;

pub use exchange_interface::{ExchangeReader, ExchangeSigner};
