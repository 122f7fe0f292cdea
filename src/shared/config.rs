use std::fs;
use std::path::Path;
use serde::Deserialize;
use ethers::types::Address;
use crate::shared::errors::AppError;
use crate::shared::utils::parse_address;

pub const DEFAULT_RPC_URL: &str = "http://127.0.0.1:8545";
pub const DEFAULT_PRIVATE_KEY_ENV: &str = "PRIVATE_KEY";

#[derive(Debug, Clone, Deserialize)]
pub struct NetworkCfg {
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,
    #[serde(default = "default_confirmations")]
    pub confirmations: usize,
}

/// Names of the exchange's settlement methods. They select the 4-byte
/// selectors, so they must match the deployed contract's casing exactly.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SettlementMethods {
    #[serde(default = "default_native_to_token")]
    pub native_to_token: String,
    #[serde(default = "default_token_to_native")]
    pub token_to_native: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContractsCfg {
    pub exchange: String,
    pub token: String,
    #[serde(default)]
    pub methods: SettlementMethods,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WalletCfg {
    #[serde(default = "default_private_key_env")]
    pub private_key_env: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TradeCfg {
    #[serde(default)]
    pub slippage_bps: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExchangeConfig {
    #[serde(default)]
    pub network: NetworkCfg,
    pub contracts: ContractsCfg,
    #[serde(default)]
    pub wallet: WalletCfg,
    #[serde(default)]
    pub trade: TradeCfg,
}

/// Contract addresses after validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContractAddresses {
    pub exchange: Address,
    pub token: Address,
}

fn default_rpc_url() -> String {
    DEFAULT_RPC_URL.to_string()
}

fn default_confirmations() -> usize {
    1
}

fn default_native_to_token() -> String {
    "ethToCryptoDevToken".to_string()
}

fn default_token_to_native() -> String {
    "cryptoDevTokenToEth".to_string()
}

fn default_private_key_env() -> String {
    DEFAULT_PRIVATE_KEY_ENV.to_string()
}

impl Default for NetworkCfg {
    fn default() -> Self {
        Self {
            rpc_url: default_rpc_url(),
            confirmations: default_confirmations(),
        }
    }
}

impl Default for SettlementMethods {
    fn default() -> Self {
        Self {
            native_to_token: default_native_to_token(),
            token_to_native: default_token_to_native(),
        }
    }
}

impl Default for WalletCfg {
    fn default() -> Self {
        Self {
            private_key_env: default_private_key_env(),
        }
    }
}

impl ExchangeConfig {
    /// Build a config from explicit contract addresses, everything else defaulted
    pub fn new(exchange: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            network: NetworkCfg::default(),
            contracts: ContractsCfg {
                exchange: exchange.into(),
                token: token.into(),
                methods: SettlementMethods::default(),
            },
            wallet: WalletCfg::default(),
            trade: TradeCfg::default(),
        }
    }

    pub fn contract_addresses(&self) -> Result<ContractAddresses, AppError> {
        Ok(ContractAddresses {
            exchange: parse_address(&self.contracts.exchange)?,
            token: parse_address(&self.contracts.token)?,
        })
    }

    pub fn validate(&self) -> Result<(), AppError> {
        self.contract_addresses()?;
        if self.trade.slippage_bps > 10_000 {
            return Err(AppError::ConfigError(format!(
                "slippage_bps must be at most 10000, got {}",
                self.trade.slippage_bps
            )));
        }
        for name in [&self.contracts.methods.native_to_token, &self.contracts.methods.token_to_native] {
            let valid = !name.is_empty()
                && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
                && !name.starts_with(|c: char| c.is_ascii_digit());
            if !valid {
                return Err(AppError::ConfigError(format!("invalid contract method name: {:?}", name)));
            }
        }
        Ok(())
    }
}

/// Config loader
pub struct ConfigLoader;

impl ConfigLoader {
    pub fn parse(content: &str) -> Result<ExchangeConfig, AppError> {
        let config: ExchangeConfig = toml::from_str(content)
            .map_err(|e| AppError::ConfigError(format!("Failed to parse config file: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<ExchangeConfig, AppError> {
        let config_content = fs::read_to_string(path.as_ref())
            .map_err(|e| AppError::ConfigError(format!("Failed to read config file: {}", e)))?;
        Self::parse(&config_content)
    }
}
