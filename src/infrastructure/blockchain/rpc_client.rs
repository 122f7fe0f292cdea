//! JSON-RPC backed exchange client

use std::sync::Arc;
use async_trait::async_trait;
use ethers::contract::{Contract, ContractError};
use ethers::middleware::SignerMiddleware;
use ethers::providers::{Http, Middleware, PendingTransaction, Provider};
use ethers::signers::{LocalWallet, Signer};
use ethers::types::{Address, U64};
use tracing::{debug, info};
use crate::domain::exchange::{ExchangeReader, ExchangeSigner};
use crate::shared::config::{ContractAddresses, ExchangeConfig, SettlementMethods};
use crate::shared::errors::{AppError, ChainError};
use crate::shared::types::{Amount, TxConfirmation, TxHash};
use crate::shared::utils::format_tx_hash;
use super::contracts::{exchange_abi, CryptoDevToken, BALANCE_OF, GET_AMOUNT_OF_TOKENS, GET_RESERVE};

/// Read-only client over a plain HTTP provider
pub type ReadOnlyClient = EthExchangeClient<Provider<Http>>;

/// Signing client: HTTP provider plus a local private key
pub type SigningClient = EthExchangeClient<SignerMiddleware<Provider<Http>, LocalWallet>>;

fn contract_error<M: Middleware>(err: ContractError<M>) -> ChainError {
    match err {
        ContractError::ProviderError { e } => ChainError::Transport(e.to_string()),
        other => ChainError::ContractCall(other.to_string()),
    }
}

/// Exchange and token contracts bound to one middleware.
///
/// Only the `SignerMiddleware` instantiation implements [`ExchangeSigner`].
pub struct EthExchangeClient<M> {
    client: Arc<M>,
    exchange: Contract<M>,
    token: CryptoDevToken<M>,
    methods: SettlementMethods,
    confirmations: usize,
}

impl<M: Middleware + 'static> EthExchangeClient<M> {
    pub fn new(
        client: Arc<M>,
        addresses: ContractAddresses,
        methods: SettlementMethods,
        confirmations: usize,
    ) -> Result<Self, ChainError> {
        let abi = exchange_abi(&methods)?;
        Ok(Self {
            exchange: Contract::new(addresses.exchange, abi, client.clone()),
            token: CryptoDevToken::new(addresses.token, client.clone()),
            client,
            methods,
            confirmations,
        })
    }

    pub fn token_address(&self) -> Address {
        self.token.address()
    }
}

impl ReadOnlyClient {
    pub fn connect(config: &ExchangeConfig) -> Result<Self, AppError> {
        let provider = Provider::<Http>::try_from(config.network.rpc_url.as_str())
            .map_err(|e| AppError::ConfigError(format!("Invalid RPC URL {}: {}", config.network.rpc_url, e)))?;
        let client = Self::new(
            Arc::new(provider),
            config.contract_addresses()?,
            config.contracts.methods.clone(),
            config.network.confirmations,
        )?;
        info!("Connected read-only to {}", config.network.rpc_url);
        Ok(client)
    }
}

impl SigningClient {
    /// Connect and bind `wallet` to the chain id reported by the node
    pub async fn connect(config: &ExchangeConfig, wallet: LocalWallet) -> Result<Self, AppError> {
        let provider = Provider::<Http>::try_from(config.network.rpc_url.as_str())
            .map_err(|e| AppError::ConfigError(format!("Invalid RPC URL {}: {}", config.network.rpc_url, e)))?;
        let chain_id = provider
            .get_chainid()
            .await
            .map_err(|e| ChainError::Transport(format!("Failed to get chain id: {}", e)))?;
        let wallet = wallet.with_chain_id(chain_id.as_u64());
        let signer = SignerMiddleware::new(provider, wallet);
        let client = Self::new(
            Arc::new(signer),
            config.contract_addresses()?,
            config.contracts.methods.clone(),
            config.network.confirmations,
        )?;
        info!(
            "Connected to {} (chain {}) as {:?}",
            config.network.rpc_url,
            chain_id,
            client.signer_address()
        );
        Ok(client)
    }
}

#[async_trait]
impl<M: Middleware + 'static> ExchangeReader for EthExchangeClient<M> {
    fn exchange_address(&self) -> Address {
        self.exchange.address()
    }

    async fn native_balance(&self, account: Address) -> Result<Amount, ChainError> {
        self.client
            .get_balance(account, None)
            .await
            .map_err(|e| ChainError::Transport(e.to_string()))
    }

    async fn token_balance(&self, account: Address) -> Result<Amount, ChainError> {
        self.token.balance_of(account).call().await.map_err(contract_error)
    }

    async fn lp_balance(&self, account: Address) -> Result<Amount, ChainError> {
        let call = self
            .exchange
            .method::<_, Amount>(BALANCE_OF, account)
            .map_err(|e| ChainError::Abi(e.to_string()))?;
        call.call().await.map_err(contract_error)
    }

    async fn token_reserve(&self) -> Result<Amount, ChainError> {
        let call = self
            .exchange
            .method::<_, Amount>(GET_RESERVE, ())
            .map_err(|e| ChainError::Abi(e.to_string()))?;
        call.call().await.map_err(contract_error)
    }

    async fn amount_of_tokens(
        &self,
        input_amount: Amount,
        input_reserve: Amount,
        output_reserve: Amount,
    ) -> Result<Amount, ChainError> {
        let call = self
            .exchange
            .method::<_, Amount>(GET_AMOUNT_OF_TOKENS, (input_amount, input_reserve, output_reserve))
            .map_err(|e| ChainError::Abi(e.to_string()))?;
        call.call().await.map_err(contract_error)
    }
}

#[async_trait]
impl<P, S> ExchangeSigner for EthExchangeClient<SignerMiddleware<P, S>>
where
    P: Middleware + 'static,
    S: Signer + 'static,
{
    fn signer_address(&self) -> Address {
        self.client.address()
    }

    async fn submit_approve(&self, spender: Address, amount: Amount) -> Result<TxHash, ChainError> {
        let call = self.token.approve(spender, amount);
        let pending = call.send().await.map_err(contract_error)?;
        Ok(*pending)
    }

    async fn submit_native_to_token(&self, value: Amount, min_tokens: Amount) -> Result<TxHash, ChainError> {
        let call = self
            .exchange
            .method::<_, ()>(&self.methods.native_to_token, min_tokens)
            .map_err(|e| ChainError::Abi(e.to_string()))?
            .value(value);
        let pending = call.send().await.map_err(contract_error)?;
        Ok(*pending)
    }

    async fn submit_token_to_native(&self, tokens_sold: Amount, min_native: Amount) -> Result<TxHash, ChainError> {
        let call = self
            .exchange
            .method::<_, ()>(&self.methods.token_to_native, (tokens_sold, min_native))
            .map_err(|e| ChainError::Abi(e.to_string()))?;
        let pending = call.send().await.map_err(contract_error)?;
        Ok(*pending)
    }

    async fn wait_for_confirmation(&self, tx_hash: TxHash) -> Result<TxConfirmation, ChainError> {
        debug!(
            "Waiting for {} confirmation(s) of {}",
            self.confirmations,
            format_tx_hash(&tx_hash)
        );
        let receipt = PendingTransaction::new(tx_hash, self.client.provider())
            .confirmations(self.confirmations)
            .await
            .map_err(|e| ChainError::Transport(e.to_string()))?
            .ok_or_else(|| ChainError::Dropped(format_tx_hash(&tx_hash)))?;

        if receipt.status == Some(U64::zero()) {
            return Err(ChainError::Reverted(format_tx_hash(&tx_hash)));
        }

        Ok(TxConfirmation {
            tx_hash,
            block_number: receipt.block_number.map(|b| b.as_u64()),
            gas_used: receipt.gas_used,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::config::ExchangeConfig;

    const EXCHANGE: &str = "0x00000000000000000000000000000000000000e1";
    const TOKEN: &str = "0x00000000000000000000000000000000000000c0";

    #[test]
    fn test_read_only_client_binds_addresses() {
        let config = ExchangeConfig::new(EXCHANGE, TOKEN);

        let client = ReadOnlyClient::connect(&config).unwrap();

        assert_eq!(client.exchange_address(), Address::from_low_u64_be(0xe1));
        assert_eq!(client.token_address(), Address::from_low_u64_be(0xc0));
    }

    #[test]
    fn test_invalid_rpc_url() {
        let mut config = ExchangeConfig::new(EXCHANGE, TOKEN);
        config.network.rpc_url = "not a url".to_string();

        assert!(matches!(ReadOnlyClient::connect(&config), Err(AppError::ConfigError(_))));
    }

    #[test]
    fn test_contract_error_mapping() {
        let err: ContractError<Provider<Http>> = ContractError::Revert(Default::default());
        assert!(matches!(contract_error(err), ChainError::ContractCall(_)));
    }
}
