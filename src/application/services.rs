//! Application services and use cases

use ethers::types::Address;
use tracing::info;
use crate::domain::balance::{get_lp_balance, get_native_balance, get_reserve, get_token_balance};
use crate::domain::exchange::{ExchangeReader, ExchangeSigner};
use crate::domain::swap::{execute_swap, quote_swap};
use crate::math::min_output_with_slippage;
use crate::shared::errors::AppError;
use crate::shared::types::{AccountBalances, Amount, PoolSnapshot, SwapDirection, SwapPlan, SwapReceipt};

/// Quote-then-swap workflow over one exchange capability
pub struct ExchangeService<E> {
    exchange: E,
    slippage_bps: u32,
}

impl<E: ExchangeReader> ExchangeService<E> {
    pub fn new(exchange: E, slippage_bps: u32) -> Self {
        Self { exchange, slippage_bps }
    }

    pub fn exchange(&self) -> &E {
        &self.exchange
    }

    pub fn slippage_bps(&self) -> u32 {
        self.slippage_bps
    }

    /// `(native_reserve, token_reserve)` of the pool
    pub async fn reserves(&self) -> Result<(Amount, Amount), AppError> {
        let reserves = futures::try_join!(
            get_native_balance(&self.exchange, None, true),
            get_reserve(&self.exchange),
        )?;
        Ok(reserves)
    }

    pub async fn snapshot(&self, account: Option<Address>) -> Result<PoolSnapshot, AppError> {
        let (native_reserve, token_reserve) = self.reserves().await?;

        let account = match account {
            Some(addr) => {
                let (native, token, lp) = futures::try_join!(
                    get_native_balance(&self.exchange, Some(addr), false),
                    get_token_balance(&self.exchange, addr),
                    get_lp_balance(&self.exchange, addr),
                )?;
                Some(AccountBalances { account: addr, native, token, lp })
            }
            None => None,
        };

        Ok(PoolSnapshot {
            exchange: self.exchange.exchange_address(),
            native_reserve,
            token_reserve,
            account,
        })
    }

    /// Read current reserves, ask the exchange for a quote and derive the
    /// minimum acceptable output
    pub async fn plan_swap(&self, input_amount: Amount, is_native_input: bool) -> Result<SwapPlan, AppError> {
        let (native_reserve, token_reserve) = self.reserves().await?;
        let quoted_output = quote_swap(
            input_amount,
            &self.exchange,
            is_native_input,
            native_reserve,
            token_reserve,
        )
        .await?;

        Ok(SwapPlan {
            direction: SwapDirection::from_native_input(is_native_input),
            input_amount,
            native_reserve,
            token_reserve,
            quoted_output,
            min_output_amount: min_output_with_slippage(quoted_output, self.slippage_bps),
            slippage_bps: self.slippage_bps,
        })
    }
}

impl<E: ExchangeSigner> ExchangeService<E> {
    /// Quote and execute in one go
    pub async fn swap(&self, input_amount: Amount, is_native_input: bool) -> Result<(SwapPlan, SwapReceipt), AppError> {
        let plan = self.plan_swap(input_amount, is_native_input).await?;
        info!(
            "Swapping {} {} for at least {} {}",
            plan.input_amount,
            plan.direction.input_symbol(),
            plan.min_output_amount,
            plan.direction.output_symbol()
        );
        let receipt = execute_swap(&self.exchange, plan.input_amount, plan.min_output_amount, is_native_input).await?;
        Ok((plan, receipt))
    }
}
