//! Exchange capability traits

use async_trait::async_trait;
use ethers::types::Address;
use crate::shared::errors::ChainError;
use crate::shared::types::{Amount, TxConfirmation, TxHash};

/// Read-only view of the exchange and its token
#[async_trait]
pub trait ExchangeReader: Send + Sync {
    /// Address of the exchange contract
    fn exchange_address(&self) -> Address;

    /// Native-currency balance of `account`
    async fn native_balance(&self, account: Address) -> Result<Amount, ChainError>;

    /// Token `balanceOf(account)`
    async fn token_balance(&self, account: Address) -> Result<Amount, ChainError>;

    /// LP-share `balanceOf(account)` on the exchange contract
    async fn lp_balance(&self, account: Address) -> Result<Amount, ChainError>;

    /// Exchange `getReserve()`: token units held by the pool
    async fn token_reserve(&self) -> Result<Amount, ChainError>;

    /// Exchange `getAmountOfTokens(inputAmount, inputReserve, outputReserve)`
    async fn amount_of_tokens(
        &self,
        input_amount: Amount,
        input_reserve: Amount,
        output_reserve: Amount,
    ) -> Result<Amount, ChainError>;
}

/// Read-write view: everything a reader can do plus signed submissions.
///
/// Submissions return as soon as the node accepts the transaction; call
/// [`ExchangeSigner::wait_for_confirmation`] before relying on its effects.
#[async_trait]
pub trait ExchangeSigner: ExchangeReader {
    /// Address transactions are signed by
    fn signer_address(&self) -> Address;

    /// Token `approve(spender, amount)`
    async fn submit_approve(&self, spender: Address, amount: Amount) -> Result<TxHash, ChainError>;

    /// Payable native-to-token settlement, `value` attached to the call
    async fn submit_native_to_token(&self, value: Amount, min_tokens: Amount) -> Result<TxHash, ChainError>;

    /// Token-to-native settlement
    async fn submit_token_to_native(&self, tokens_sold: Amount, min_native: Amount) -> Result<TxHash, ChainError>;

    async fn wait_for_confirmation(&self, tx_hash: TxHash) -> Result<TxConfirmation, ChainError>;
}
