//! Swap quoting and execution

use chrono::Utc;
use tracing::{debug, info};
use crate::domain::exchange::{ExchangeReader, ExchangeSigner};
use crate::shared::errors::SwapError;
use crate::shared::types::{Amount, SwapDirection, SwapReceipt, TxConfirmation, TxHash};
use crate::shared::utils::format_tx_hash;

/// Ask the exchange how much it would pay out for `input_amount`.
///
/// With native input the pricing call receives
/// `(input_amount, native_reserve, token_reserve)`, with token input the
/// reserves are swapped.
pub async fn quote_swap<R>(
    input_amount: Amount,
    reader: &R,
    is_native_input: bool,
    native_reserve: Amount,
    token_reserve: Amount,
) -> Result<Amount, SwapError>
where
    R: ExchangeReader + ?Sized,
{
    let direction = SwapDirection::from_native_input(is_native_input);
    let (input_reserve, output_reserve) = direction.order_reserves(native_reserve, token_reserve);

    let quoted = reader
        .amount_of_tokens(input_amount, input_reserve, output_reserve)
        .await
        .map_err(SwapError::Quote)?;
    debug!(
        "Quote {:?}: {} in (reserves {} / {}) -> {} out",
        direction, input_amount, input_reserve, output_reserve, quoted
    );
    Ok(quoted)
}

async fn confirm<S>(signer: &S, tx_hash: TxHash) -> Result<TxConfirmation, SwapError>
where
    S: ExchangeSigner + ?Sized,
{
    let confirmation = signer
        .wait_for_confirmation(tx_hash)
        .await
        .map_err(SwapError::Confirmation)?;
    info!(
        "Transaction {} confirmed in block {:?}",
        format_tx_hash(&tx_hash),
        confirmation.block_number
    );
    Ok(confirmation)
}

/// Swap `input_amount` for at least `min_output_amount` and wait until the
/// settlement is mined.
///
/// Token input needs an allowance first: the approval is submitted and
/// confirmed before the settlement is sent.
pub async fn execute_swap<S>(
    signer: &S,
    input_amount: Amount,
    min_output_amount: Amount,
    is_native_input: bool,
) -> Result<SwapReceipt, SwapError>
where
    S: ExchangeSigner + ?Sized,
{
    let direction = SwapDirection::from_native_input(is_native_input);

    let (approval, settlement_hash) = match direction {
        SwapDirection::NativeToToken => {
            let tx_hash = signer
                .submit_native_to_token(input_amount, min_output_amount)
                .await
                .map_err(SwapError::Settlement)?;
            info!("Submitted native-to-token swap {}", format_tx_hash(&tx_hash));
            (None, tx_hash)
        }
        SwapDirection::TokenToNative => {
            let approve_hash = signer
                .submit_approve(signer.exchange_address(), input_amount)
                .await
                .map_err(SwapError::Approval)?;
            info!("Submitted approval {}", format_tx_hash(&approve_hash));
            let approval = confirm(signer, approve_hash).await?;

            let tx_hash = signer
                .submit_token_to_native(input_amount, min_output_amount)
                .await
                .map_err(SwapError::Settlement)?;
            info!("Submitted token-to-native swap {}", format_tx_hash(&tx_hash));
            (Some(approval), tx_hash)
        }
    };

    let settlement = confirm(signer, settlement_hash).await?;

    Ok(SwapReceipt {
        direction,
        input_amount,
        min_output_amount,
        approval,
        settlement,
        completed_at: Utc::now(),
    })
}
