//! Contract bindings for the Crypto Dev token and exchange

use ethers::abi::{parse_abi, Abi};
use ethers::contract::abigen;
use crate::shared::config::SettlementMethods;
use crate::shared::errors::ChainError;

abigen!(
    CryptoDevToken,
    r#"[
        function balanceOf(address account) external view returns (uint256)
        function approve(address spender, uint256 amount) external returns (bool)
        function allowance(address owner, address spender) external view returns (uint256)
    ]"#,
);

pub const BALANCE_OF: &str = "balanceOf";
pub const GET_RESERVE: &str = "getReserve";
pub const GET_AMOUNT_OF_TOKENS: &str = "getAmountOfTokens";

/// Exchange ABI. Settlement method names come from configuration so the
/// selectors can be matched to the deployed contract.
pub fn exchange_abi(methods: &SettlementMethods) -> Result<Abi, ChainError> {
    let signatures = [
        format!("function {}(address account) external view returns (uint256)", BALANCE_OF),
        format!("function {}() external view returns (uint256)", GET_RESERVE),
        format!(
            "function {}(uint256 inputAmount, uint256 inputReserve, uint256 outputReserve) external pure returns (uint256)",
            GET_AMOUNT_OF_TOKENS
        ),
        format!("function {}(uint256 minTokens) external payable", methods.native_to_token),
        format!("function {}(uint256 tokensSold, uint256 minEth) external", methods.token_to_native),
    ];
    let signatures: Vec<&str> = signatures.iter().map(String::as_str).collect();
    parse_abi(&signatures).map_err(|e| ChainError::Abi(e.to_string()))
}
