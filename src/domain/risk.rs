//! Concentration-risk decision. Pure: no I/O, no clock, no shared state.

use crate::domain::jurisdiction::Jurisdiction;
use crate::domain::limits::Threshold;
use crate::error::{LedgerError, Result};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Everything the validator needs to decide on one candidate loan.
///
/// Aggregates are the ledger state *before* the candidate is added.
#[derive(Debug, Clone, Copy)]
pub struct ConcentrationCheck<'a> {
    pub total_portfolio_amount: u64,
    pub amount_by_jurisdiction: &'a HashMap<Jurisdiction, u64>,
    pub new_loan_amount: u64,
    pub jurisdiction: Jurisdiction,
    pub limit: Threshold,
}

/// `part / total` without rounding; zero when `total` is zero.
pub fn concentration_share(part: u64, total: u64) -> Decimal {
    if total == 0 {
        return Decimal::ZERO;
    }
    Decimal::from(part) / Decimal::from(total)
}

/// Accepts the candidate unless its jurisdiction's post-admission share
/// strictly exceeds the limit. A share equal to the limit is accepted.
pub fn validate_concentration(check: &ConcentrationCheck<'_>) -> Result<()> {
    let new_total = check
        .total_portfolio_amount
        .checked_add(check.new_loan_amount)
        .ok_or(LedgerError::AmountOverflow)?;

    if new_total == 0 {
        return Ok(());
    }

    // First loan: concentration against an empty base is meaningless.
    if check.total_portfolio_amount == 0 {
        return Ok(());
    }

    let current = check
        .amount_by_jurisdiction
        .get(&check.jurisdiction)
        .copied()
        .unwrap_or_default();
    let new_jurisdiction_amount = current
        .checked_add(check.new_loan_amount)
        .ok_or(LedgerError::AmountOverflow)?;
    let share = concentration_share(new_jurisdiction_amount, new_total);

    if share > check.limit.value() {
        return Err(LedgerError::ConcentrationLimitExceeded {
            jurisdiction: check.jurisdiction,
            share,
            limit: check.limit.value(),
        });
    }

    Ok(())
}
