//! CLI commands and handlers
use std::path::PathBuf;
use std::time::Duration;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{error, info};
use crate::application::report::{render_plan, render_receipt, render_snapshot};
use crate::application::services::ExchangeService;
use crate::infrastructure::blockchain::{load_wallet_from_env, ReadOnlyClient, SigningClient};
use crate::shared::config::{ConfigLoader, ExchangeConfig};
use crate::shared::errors::AppError;
use crate::shared::utils::{format_amount, parse_address, parse_amount};

#[derive(Parser, Debug)]
#[command(name = "cryptodev-exchange", version)]
#[command(about = "Balances, quotes and swaps on the Crypto Dev exchange")]
pub struct Cli {
    /// Path to config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// RPC endpoint URL (overrides config)
    #[arg(long, global = true)]
    pub rpc_url: Option<String>,

    /// Exchange contract address (overrides config)
    #[arg(long, global = true)]
    pub exchange: Option<String>,

    /// Token contract address (overrides config)
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Slippage tolerance in basis points (overrides config)
    #[arg(long, global = true)]
    pub slippage_bps: Option<u32>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Show pool reserves and, optionally, an account's balances
    Balances {
        /// Account to report balances for
        #[arg(long)]
        account: Option<String>,
    },

    /// Show the exchange's CD token reserve
    Reserve,

    /// Quote a swap without sending anything
    Quote {
        /// Amount to sell, in whole units (18 decimals)
        #[arg(long)]
        amount: String,

        /// Sell CD tokens instead of ETH
        #[arg(long)]
        token_input: bool,
    },

    /// Quote and execute a swap, signing with the configured key
    Swap {
        /// Amount to sell, in whole units (18 decimals)
        #[arg(long)]
        amount: String,

        /// Sell CD tokens instead of ETH
        #[arg(long)]
        token_input: bool,

        /// Give up waiting after this many seconds
        #[arg(long)]
        timeout_secs: Option<u64>,
    },
}

impl Cli {
    /// Config with priority: CLI args > config file > defaults
    pub fn resolve_config(&self) -> Result<ExchangeConfig, AppError> {
        let mut config = match &self.config {
            Some(path) => ConfigLoader::load_from(path)?,
            None => {
                let exchange = self.exchange.clone().ok_or_else(|| {
                    AppError::ConfigError("--exchange is required when not using --config".to_string())
                })?;
                let token = self.token.clone().ok_or_else(|| {
                    AppError::ConfigError("--token is required when not using --config".to_string())
                })?;
                ExchangeConfig::new(exchange, token)
            }
        };

        if let Some(rpc_url) = &self.rpc_url {
            config.network.rpc_url = rpc_url.clone();
        }
        if let Some(exchange) = &self.exchange {
            config.contracts.exchange = exchange.clone();
        }
        if let Some(token) = &self.token {
            config.contracts.token = token.clone();
        }
        if let Some(slippage_bps) = self.slippage_bps {
            config.trade.slippage_bps = slippage_bps;
        }

        config.validate()?;
        Ok(config)
    }
}

fn emit<T: Serialize>(json: bool, value: &T, text: impl FnOnce() -> String) -> Result<(), AppError> {
    if json {
        let rendered = serde_json::to_string_pretty(value)
            .map_err(|e| AppError::Serialization(e.to_string()))?;
        println!("{}", rendered);
    } else {
        print!("{}", text());
    }
    Ok(())
}

pub struct CommandExecutor;

impl CommandExecutor {
    /// Execute the selected command
    pub async fn execute(cli: Cli) -> Result<(), AppError> {
        let config = cli.resolve_config()?;
        let json = cli.json;

        match cli.command {
            Commands::Balances { account } => Self::execute_balances_command(&config, account, json).await,
            Commands::Reserve => Self::execute_reserve_command(&config, json).await,
            Commands::Quote { amount, token_input } => {
                Self::execute_quote_command(&config, &amount, !token_input, json).await
            }
            Commands::Swap { amount, token_input, timeout_secs } => {
                Self::execute_swap_command(&config, &amount, !token_input, timeout_secs, json).await
            }
        }
    }

    async fn execute_balances_command(
        config: &ExchangeConfig,
        account: Option<String>,
        json: bool,
    ) -> Result<(), AppError> {
        let account = account.as_deref().map(parse_address).transpose()?;
        let service = ExchangeService::new(ReadOnlyClient::connect(config)?, config.trade.slippage_bps);

        let snapshot = service.snapshot(account).await?;
        emit(json, &snapshot, || render_snapshot(&snapshot))
    }

    async fn execute_reserve_command(config: &ExchangeConfig, json: bool) -> Result<(), AppError> {
        let service = ExchangeService::new(ReadOnlyClient::connect(config)?, config.trade.slippage_bps);

        let (_, token_reserve) = service.reserves().await?;
        emit(json, &token_reserve, || format!("CD reserve: {}\n", format_amount(token_reserve)))
    }

    async fn execute_quote_command(
        config: &ExchangeConfig,
        amount: &str,
        is_native_input: bool,
        json: bool,
    ) -> Result<(), AppError> {
        let input_amount = parse_amount(amount)?;
        let service = ExchangeService::new(ReadOnlyClient::connect(config)?, config.trade.slippage_bps);

        let plan = service.plan_swap(input_amount, is_native_input).await?;
        emit(json, &plan, || render_plan(&plan))
    }

    async fn execute_swap_command(
        config: &ExchangeConfig,
        amount: &str,
        is_native_input: bool,
        timeout_secs: Option<u64>,
        json: bool,
    ) -> Result<(), AppError> {
        let input_amount = parse_amount(amount)?;
        let wallet = load_wallet_from_env(&config.wallet.private_key_env)?;
        let client = SigningClient::connect(config, wallet).await?;
        let service = ExchangeService::new(client, config.trade.slippage_bps);

        let swap = service.swap(input_amount, is_native_input);
        let (plan, receipt) = match timeout_secs {
            Some(secs) => tokio::time::timeout(Duration::from_secs(secs), swap)
                .await
                .map_err(|_| {
                    error!("Swap did not complete within {}s; submitted transactions may still be mined", secs);
                    AppError::Timeout(secs)
                })??,
            None => swap.await?,
        };

        info!("Swap settled in {:?}", receipt.settlement.tx_hash);
        emit(json, &receipt, || format!("{}{}", render_plan(&plan), render_receipt(&receipt)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXCHANGE: &str = "0x00000000000000000000000000000000000000e1";
    const TOKEN: &str = "0x00000000000000000000000000000000000000c0";

    #[test]
    fn test_parse_swap_command() {
        let cli = Cli::try_parse_from([
            "cryptodev-exchange",
            "--exchange",
            EXCHANGE,
            "--token",
            TOKEN,
            "swap",
            "--amount",
            "0.1",
            "--token-input",
            "--timeout-secs",
            "30",
        ])
        .unwrap();

        assert_eq!(
            cli.command,
            Commands::Swap {
                amount: "0.1".to_string(),
                token_input: true,
                timeout_secs: Some(30),
            }
        );
    }

    #[test]
    fn test_resolve_config_from_flags() {
        let cli = Cli::try_parse_from([
            "cryptodev-exchange",
            "quote",
            "--amount",
            "1",
            "--exchange",
            EXCHANGE,
            "--token",
            TOKEN,
            "--slippage-bps",
            "50",
            "--rpc-url",
            "http://localhost:9545",
        ])
        .unwrap();

        let config = cli.resolve_config().unwrap();

        assert_eq!(config.network.rpc_url, "http://localhost:9545");
        assert_eq!(config.trade.slippage_bps, 50);
        assert_eq!(config.contracts.exchange, EXCHANGE);
    }

    #[test]
    fn test_resolve_config_requires_addresses() {
        let cli = Cli::try_parse_from(["cryptodev-exchange", "reserve"]).unwrap();

        assert!(matches!(cli.resolve_config(), Err(AppError::ConfigError(_))));
    }

    #[test]
    fn test_resolve_config_rejects_bad_slippage() {
        let cli = Cli::try_parse_from([
            "cryptodev-exchange",
            "--exchange",
            EXCHANGE,
            "--token",
            TOKEN,
            "--slippage-bps",
            "20000",
            "reserve",
        ])
        .unwrap();

        assert!(matches!(cli.resolve_config(), Err(AppError::ConfigError(_))));
    }
}
