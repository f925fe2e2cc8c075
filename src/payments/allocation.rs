use chrono::NaiveDate;

use crate::decimal::Money;
use crate::errors::Result;
use crate::loan::Loan;
use crate::types::PaymentAllocation;
use crate::valuation;

/// split a payment interest-first
///
/// `to_interest = min(amount, accrued_interest)`, the rest goes to principal.
/// `overpayment` reports how far the payment exceeds `outstanding`.
///
/// Amounts are expected to be non-negative; a negative amount yields zero
/// interest and a negative principal share.
pub fn allocate_interest_first(
    amount: Money,
    accrued_interest: Money,
    outstanding: Money,
) -> PaymentAllocation {
    let to_interest = amount.min(accrued_interest.non_negative()).non_negative();
    let to_principal = amount - to_interest;

    PaymentAllocation {
        to_interest,
        to_principal,
        overpayment: (amount - outstanding).non_negative(),
    }
}

/// preview how a proposed payment would be split for `loan` as of `as_of`
pub fn preview_payment_allocation(
    loan: &Loan,
    amount: Money,
    as_of: NaiveDate,
) -> Result<PaymentAllocation> {
    let breakdown = valuation::outstanding_breakdown(loan, as_of)?;
    Ok(allocate_interest_first(amount, breakdown.interest, breakdown.outstanding))
}
