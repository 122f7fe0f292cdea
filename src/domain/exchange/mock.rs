//! Recording in-memory exchange used by tests

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use async_trait::async_trait;
use ethers::types::{Address, U256};
use crate::shared::errors::ChainError;
use crate::shared::types::{Amount, TxConfirmation, TxHash};
use super::{ExchangeReader, ExchangeSigner};

/// Operations that can be made to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    NativeBalance,
    TokenBalance,
    LpBalance,
    TokenReserve,
    AmountOfTokens,
    Approve,
    NativeToToken,
    TokenToNative,
    ConfirmApprove,
    ConfirmSettlement,
    RevertSettlement,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    NativeBalance(Address),
    TokenBalance(Address),
    LpBalance(Address),
    TokenReserve,
    AmountOfTokens(Amount, Amount, Amount),
    Approve(Address, Amount),
    NativeToToken(Amount, Amount),
    TokenToNative(Amount, Amount),
    Confirm(TxHash),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TxKind {
    Approve,
    Settlement,
}

#[derive(Default)]
struct State {
    calls: Vec<Call>,
    submitted: HashMap<TxHash, TxKind>,
    next_tx: u64,
}

pub struct MockExchange {
    exchange: Address,
    signer: Address,
    native: HashMap<Address, Amount>,
    tokens: HashMap<Address, Amount>,
    lp: HashMap<Address, Amount>,
    token_reserve: Amount,
    failing: HashSet<Op>,
    state: Mutex<State>,
}

impl MockExchange {
    pub const EXCHANGE: u64 = 0xe1;
    pub const SIGNER: u64 = 0x51;

    /// Pool holding `native_reserve` wei and `token_reserve` tokens
    pub fn with_reserves(native_reserve: u64, token_reserve: u64) -> Self {
        let exchange = Address::from_low_u64_be(Self::EXCHANGE);
        let mut native = HashMap::new();
        native.insert(exchange, U256::from(native_reserve));
        Self {
            exchange,
            signer: Address::from_low_u64_be(Self::SIGNER),
            native,
            tokens: HashMap::new(),
            lp: HashMap::new(),
            token_reserve: U256::from(token_reserve),
            failing: HashSet::new(),
            state: Mutex::new(State::default()),
        }
    }

    pub fn with_account(mut self, account: Address, native: u64, tokens: u64, lp: u64) -> Self {
        self.native.insert(account, U256::from(native));
        self.tokens.insert(account, U256::from(tokens));
        self.lp.insert(account, U256::from(lp));
        self
    }

    pub fn failing(mut self, op: Op) -> Self {
        self.failing.insert(op);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    fn record(&self, call: Call) {
        self.state.lock().unwrap().calls.push(call);
    }

    fn check(&self, op: Op) -> Result<(), ChainError> {
        if self.failing.contains(&op) {
            return Err(ChainError::Transport(format!("{:?} unavailable", op)));
        }
        Ok(())
    }

    fn submit(&self, call: Call, kind: TxKind) -> TxHash {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);
        state.next_tx += 1;
        let hash = TxHash::from_low_u64_be(state.next_tx);
        state.submitted.insert(hash, kind);
        hash
    }

    fn lookup(map: &HashMap<Address, Amount>, account: Address) -> Amount {
        map.get(&account).copied().unwrap_or_default()
    }
}

#[async_trait]
impl ExchangeReader for MockExchange {
    fn exchange_address(&self) -> Address {
        self.exchange
    }

    async fn native_balance(&self, account: Address) -> Result<Amount, ChainError> {
        self.record(Call::NativeBalance(account));
        self.check(Op::NativeBalance)?;
        Ok(Self::lookup(&self.native, account))
    }

    async fn token_balance(&self, account: Address) -> Result<Amount, ChainError> {
        self.record(Call::TokenBalance(account));
        self.check(Op::TokenBalance)?;
        Ok(Self::lookup(&self.tokens, account))
    }

    async fn lp_balance(&self, account: Address) -> Result<Amount, ChainError> {
        self.record(Call::LpBalance(account));
        self.check(Op::LpBalance)?;
        Ok(Self::lookup(&self.lp, account))
    }

    async fn token_reserve(&self) -> Result<Amount, ChainError> {
        self.record(Call::TokenReserve);
        self.check(Op::TokenReserve)?;
        Ok(self.token_reserve)
    }

    async fn amount_of_tokens(
        &self,
        input_amount: Amount,
        input_reserve: Amount,
        output_reserve: Amount,
    ) -> Result<Amount, ChainError> {
        self.record(Call::AmountOfTokens(input_amount, input_reserve, output_reserve));
        self.check(Op::AmountOfTokens)?;
        if input_reserve.is_zero() || output_reserve.is_zero() {
            return Err(ChainError::ContractCall("invalid reserves".to_string()));
        }
        Ok(input_amount * output_reserve / (input_reserve + input_amount))
    }
}

#[async_trait]
impl ExchangeSigner for MockExchange {
    fn signer_address(&self) -> Address {
        self.signer
    }

    async fn submit_approve(&self, spender: Address, amount: Amount) -> Result<TxHash, ChainError> {
        self.check(Op::Approve)?;
        Ok(self.submit(Call::Approve(spender, amount), TxKind::Approve))
    }

    async fn submit_native_to_token(&self, value: Amount, min_tokens: Amount) -> Result<TxHash, ChainError> {
        self.check(Op::NativeToToken)?;
        Ok(self.submit(Call::NativeToToken(value, min_tokens), TxKind::Settlement))
    }

    async fn submit_token_to_native(&self, tokens_sold: Amount, min_native: Amount) -> Result<TxHash, ChainError> {
        self.check(Op::TokenToNative)?;
        Ok(self.submit(Call::TokenToNative(tokens_sold, min_native), TxKind::Settlement))
    }

    async fn wait_for_confirmation(&self, tx_hash: TxHash) -> Result<TxConfirmation, ChainError> {
        let (kind, block) = {
            let mut state = self.state.lock().unwrap();
            state.calls.push(Call::Confirm(tx_hash));
            let kind = state.submitted.get(&tx_hash).copied();
            (kind, state.next_tx)
        };
        match kind {
            None => Err(ChainError::Dropped(format!("{:?}", tx_hash))),
            Some(TxKind::Approve) => {
                self.check(Op::ConfirmApprove)?;
                Ok(confirmation(tx_hash, block))
            }
            Some(TxKind::Settlement) => {
                self.check(Op::ConfirmSettlement)?;
                if self.failing.contains(&Op::RevertSettlement) {
                    return Err(ChainError::Reverted(format!("{:?}", tx_hash)));
                }
                Ok(confirmation(tx_hash, block))
            }
        }
    }
}

fn confirmation(tx_hash: TxHash, block: u64) -> TxConfirmation {
    TxConfirmation {
        tx_hash,
        block_number: Some(block),
        gas_used: Some(U256::from(21_000)),
    }
}
