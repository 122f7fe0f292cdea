// src/math.rs
use ethers::types::U256;
use crate::shared::types::Amount;

pub const BPS_DENOMINATOR: u32 = 10_000;

/// Calculate minimum output amount with slippage protection
pub fn min_output_with_slippage(quoted: Amount, slippage_bps: u32) -> Amount {
    let bps = slippage_bps.min(BPS_DENOMINATOR);
    let keep = U256::from(BPS_DENOMINATOR - bps);
    quoted.saturating_mul(keep) / U256::from(BPS_DENOMINATOR)
}

/// Constant-product output `in * out_reserve / (in_reserve + in)`, truncated.
/// Only for display; the exchange's own pricing call is authoritative.
pub fn reference_amount_out(input: Amount, input_reserve: Amount, output_reserve: Amount) -> Option<Amount> {
    let denominator = input_reserve.checked_add(input)?;
    if denominator.is_zero() {
        return None;
    }
    input.checked_mul(output_reserve).map(|n| n / denominator)
}

/// Price impact of a trade in basis points, relative to the spot price
pub fn price_impact_bps(input: Amount, input_reserve: Amount, output_reserve: Amount) -> Option<u32> {
    if input.is_zero() || input_reserve.is_zero() || output_reserve.is_zero() {
        return None;
    }
    let actual = reference_amount_out(input, input_reserve, output_reserve)?;
    let spot = input.checked_mul(output_reserve)? / input_reserve;
    if spot.is_zero() {
        return None;
    }
    let impact = (spot - actual).checked_mul(U256::from(BPS_DENOMINATOR))? / spot;
    Some(impact.as_u32())
}
