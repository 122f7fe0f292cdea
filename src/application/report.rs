//! Human-readable rendering of snapshots, plans and receipts

use std::fmt::Write;
use crate::math::price_impact_bps;
use crate::shared::types::{PoolSnapshot, SwapPlan, SwapReceipt, TxConfirmation};
use crate::shared::utils::{format_amount, format_tx_hash};

pub fn render_snapshot(snapshot: &PoolSnapshot) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Exchange {:?}", snapshot.exchange);
    let _ = writeln!(out, "  ETH reserve: {}", format_amount(snapshot.native_reserve));
    let _ = writeln!(out, "  CD reserve:  {}", format_amount(snapshot.token_reserve));
    if let Some(account) = &snapshot.account {
        let _ = writeln!(out, "Account {:?}", account.account);
        let _ = writeln!(out, "  ETH: {}", format_amount(account.native));
        let _ = writeln!(out, "  CD:  {}", format_amount(account.token));
        let _ = writeln!(out, "  LP:  {}", format_amount(account.lp));
    }
    out
}

pub fn render_plan(plan: &SwapPlan) -> String {
    let (input_reserve, output_reserve) = plan
        .direction
        .order_reserves(plan.native_reserve, plan.token_reserve);
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Swap {} {} -> {} {}",
        format_amount(plan.input_amount),
        plan.direction.input_symbol(),
        format_amount(plan.quoted_output),
        plan.direction.output_symbol()
    );
    let _ = writeln!(
        out,
        "  Minimum received: {} {} ({} bps slippage)",
        format_amount(plan.min_output_amount),
        plan.direction.output_symbol(),
        plan.slippage_bps
    );
    if let Some(impact) = price_impact_bps(plan.input_amount, input_reserve, output_reserve) {
        let _ = writeln!(out, "  Price impact: {}.{:02}%", impact / 100, impact % 100);
    }
    out
}

fn render_confirmation(label: &str, confirmation: &TxConfirmation) -> String {
    let block = confirmation
        .block_number
        .map(|b| b.to_string())
        .unwrap_or_else(|| "pending".to_string());
    format!("  {}: {} (block {})\n", label, format_tx_hash(&confirmation.tx_hash), block)
}

pub fn render_receipt(receipt: &SwapReceipt) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Swapped {} {} for at least {} {} at {}",
        format_amount(receipt.input_amount),
        receipt.direction.input_symbol(),
        format_amount(receipt.min_output_amount),
        receipt.direction.output_symbol(),
        receipt.completed_at.to_rfc3339()
    );
    if let Some(approval) = &receipt.approval {
        out.push_str(&render_confirmation("Approval", approval));
    }
    out.push_str(&render_confirmation("Settlement", &receipt.settlement));
    out
}
