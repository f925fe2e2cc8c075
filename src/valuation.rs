//! Loan valuation: accrued interest, maturity projection and outstanding
//! balance of a single loan as of a caller-supplied date.
//!
//! Two time bases are in play. The maturity projection
//! ([`total_contracted_amount`]) uses the whole-month duration; everything
//! "as of" a date uses elapsed days over a 365-day year.

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::{LoanError, Result};
use crate::interest::InterestCalculator;
use crate::loan::Loan;
use crate::payments;

/// whole days between two dates, order-independent
///
/// An `as_of` before `start` still yields a positive count.
pub fn elapsed_days(start: NaiveDate, as_of: NaiveDate) -> u32 {
    let days = (as_of - start).num_days().unsigned_abs();
    u32::try_from(days).unwrap_or(u32::MAX)
}

/// interest accrued from the loan's start date to `as_of`
pub fn accrued_interest(loan: &Loan, as_of: NaiveDate) -> Result<Money> {
    let days = elapsed_days(loan.terms.start_date, as_of);
    loan.interest_model()
        .interest_for_days(loan.terms.amount, loan.terms.interest_rate, days)
}

/// interest over the full contracted duration
pub fn contracted_interest(loan: &Loan) -> Result<Money> {
    loan.interest_model().interest_for_months(
        loan.terms.amount,
        loan.terms.interest_rate,
        loan.terms.duration_months,
    )
}

/// principal plus interest at maturity, ignoring payments
pub fn total_contracted_amount(loan: &Loan) -> Result<Money> {
    with_principal(loan.terms.amount, contracted_interest(loan)?)
}

fn with_principal(principal: Money, interest: Money) -> Result<Money> {
    principal
        .checked_add(interest)
        .ok_or_else(|| LoanError::CalculationError {
            message: format!("{} + {} overflows", principal, interest),
        })
}

pub fn total_paid(loan: &Loan) -> Money {
    payments::total_of(&loan.payments_made)
}

/// what is owed on a loan at a point in time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutstandingBreakdown {
    pub principal: Money,
    pub interest: Money,
    pub payments: Money,
    /// `max(0, principal + interest - payments)`
    pub outstanding: Money,
}

impl OutstandingBreakdown {
    pub fn new(principal: Money, interest: Money, payments: Money) -> Self {
        Self {
            principal,
            interest,
            payments,
            outstanding: (principal + interest - payments).non_negative(),
        }
    }

    /// the same balance after `amount` more has been paid
    pub fn after_payment(&self, amount: Money) -> Self {
        Self::new(self.principal, self.interest, self.payments + amount)
    }

    pub fn is_settled(&self) -> bool {
        self.outstanding.is_zero()
    }
}

pub fn outstanding_breakdown(loan: &Loan, as_of: NaiveDate) -> Result<OutstandingBreakdown> {
    Ok(OutstandingBreakdown::new(
        loan.terms.amount,
        accrued_interest(loan, as_of)?,
        total_paid(loan),
    ))
}

/// start date plus the contracted number of calendar months
///
/// Month-end starts clamp to the last day of the target month.
pub fn maturity_date(loan: &Loan) -> Result<NaiveDate> {
    let start = loan.terms.start_date;
    start
        .checked_add_months(Months::new(loan.terms.duration_months))
        .ok_or_else(|| LoanError::InvalidDate {
            message: format!(
                "{} plus {} months is out of range",
                start, loan.terms.duration_months
            ),
        })
}

/// days from `as_of` until maturity, negative when overdue
pub fn days_remaining(loan: &Loan, as_of: NaiveDate) -> Result<i64> {
    Ok((maturity_date(loan)? - as_of).num_days())
}

/// everything the loan detail view shows for one loan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanValuation {
    pub as_of: NaiveDate,
    pub contracted_interest: Money,
    pub total_contracted_amount: Money,
    /// maturity projection minus payments, may go negative
    pub remaining_to_maturity: Money,
    pub breakdown: OutstandingBreakdown,
    pub elapsed_days: u32,
    pub maturity_date: NaiveDate,
    pub days_remaining: i64,
}

impl LoanValuation {
    pub fn of(loan: &Loan, as_of: NaiveDate) -> Result<Self> {
        let contracted_interest = contracted_interest(loan)?;
        let total_contracted_amount = with_principal(loan.terms.amount, contracted_interest)?;
        let breakdown = outstanding_breakdown(loan, as_of)?;
        let maturity_date = maturity_date(loan)?;

        Ok(Self {
            as_of,
            contracted_interest,
            total_contracted_amount,
            remaining_to_maturity: total_contracted_amount - breakdown.payments,
            breakdown,
            elapsed_days: elapsed_days(loan.terms.start_date, as_of),
            maturity_date,
            days_remaining: (maturity_date - as_of).num_days(),
        })
    }

    pub fn is_overdue(&self) -> bool {
        self.days_remaining < 0 && !self.breakdown.is_settled()
    }
}
