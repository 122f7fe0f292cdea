//! Balance and reserve queries

use ethers::types::Address;
use tracing::{debug, warn};
use crate::domain::exchange::ExchangeReader;
use crate::shared::errors::{BalanceError, ChainError};
use crate::shared::types::Amount;

fn query_failed(what: &'static str, source: ChainError) -> BalanceError {
    warn!("Failed to read {}: {}", what, source);
    BalanceError::Query { what, source }
}

/// Native-currency balance of `address`, or of the exchange contract itself
/// when `use_contract_address` is set (the address is then ignored).
pub async fn get_native_balance<R>(
    reader: &R,
    address: Option<Address>,
    use_contract_address: bool,
) -> Result<Amount, BalanceError>
where
    R: ExchangeReader + ?Sized,
{
    let account = if use_contract_address {
        reader.exchange_address()
    } else {
        address.ok_or_else(|| {
            warn!("Native balance requested without an account address");
            BalanceError::MissingAddress
        })?
    };

    let balance = reader
        .native_balance(account)
        .await
        .map_err(|e| query_failed("native balance", e))?;
    debug!("Native balance of {:?}: {}", account, balance);
    Ok(balance)
}

pub async fn get_token_balance<R>(reader: &R, address: Address) -> Result<Amount, BalanceError>
where
    R: ExchangeReader + ?Sized,
{
    let balance = reader
        .token_balance(address)
        .await
        .map_err(|e| query_failed("token balance", e))?;
    debug!("Token balance of {:?}: {}", address, balance);
    Ok(balance)
}

pub async fn get_lp_balance<R>(reader: &R, address: Address) -> Result<Amount, BalanceError>
where
    R: ExchangeReader + ?Sized,
{
    let balance = reader
        .lp_balance(address)
        .await
        .map_err(|e| query_failed("LP balance", e))?;
    debug!("LP balance of {:?}: {}", address, balance);
    Ok(balance)
}

/// Token reserve held by the exchange. The native reserve is the exchange's
/// own native balance, see [`get_native_balance`].
pub async fn get_reserve<R>(reader: &R) -> Result<Amount, BalanceError>
where
    R: ExchangeReader + ?Sized,
{
    let reserve = reader
        .token_reserve()
        .await
        .map_err(|e| query_failed("token reserve", e))?;
    debug!("Token reserve: {}", reserve);
    Ok(reserve)
}
