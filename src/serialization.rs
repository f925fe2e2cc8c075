//! serialization support for loans
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{LoanError, Result};
use crate::interest::InterestCalculator;
use crate::loan::Loan;
use crate::types::{LoanDirection, LoanId, LoanStatus};
use crate::valuation::LoanValuation;

/// serializable snapshot of a loan and its valuation
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanView {
    pub id: LoanId,
    pub person_name: String,
    pub direction: LoanDirection,
    pub status: LoanStatus,
    pub created_at: DateTime<Utc>,
    pub financial: FinancialView,
    pub payments: PaymentView,
    pub schedule: ScheduleView,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialView {
    pub principal: Money,
    #[serde(with = "crate::decimal::percentage")]
    pub interest_rate: Rate,
    pub interest_method: String,
    pub accrued_interest: Money,
    pub outstanding: Money,
    pub contracted_interest: Money,
    pub total_contracted_amount: Money,
    pub remaining_to_maturity: Money,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentView {
    pub total_paid: Money,
    pub payment_count: usize,
    pub last_payment_date: Option<NaiveDate>,
    pub last_payment_amount: Option<Money>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleView {
    pub as_of: NaiveDate,
    pub start_date: NaiveDate,
    pub maturity_date: NaiveDate,
    pub duration_months: u32,
    pub elapsed_days: u32,
    pub days_remaining: i64,
    pub overdue: bool,
}

impl LoanView {
    pub fn from_loan(loan: &Loan, as_of: NaiveDate) -> Result<Self> {
        let valuation = LoanValuation::of(loan, as_of)?;
        // latest by payment date; ties go to the later entry
        let last_payment = loan.payments().iter().max_by_key(|p| p.date);

        Ok(LoanView {
            id: loan.id,
            person_name: loan.person_name().to_string(),
            direction: loan.direction(),
            status: loan.status,
            created_at: loan.created_at,
            financial: FinancialView {
                principal: loan.principal(),
                interest_rate: loan.terms.interest_rate,
                interest_method: loan.interest_model().method(),
                accrued_interest: valuation.breakdown.interest,
                outstanding: valuation.breakdown.outstanding,
                contracted_interest: valuation.contracted_interest,
                total_contracted_amount: valuation.total_contracted_amount,
                remaining_to_maturity: valuation.remaining_to_maturity,
            },
            payments: PaymentView {
                total_paid: valuation.breakdown.payments,
                payment_count: loan.payments().len(),
                last_payment_date: last_payment.map(|p| p.date),
                last_payment_amount: last_payment.map(|p| p.amount),
            },
            schedule: ScheduleView {
                as_of,
                start_date: loan.terms.start_date,
                maturity_date: valuation.maturity_date,
                duration_months: loan.terms.duration_months,
                elapsed_days: valuation.elapsed_days,
                days_remaining: valuation.days_remaining,
                overdue: valuation.is_overdue(),
            },
        })
    }

    /// convert to pretty-printed json string
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|source| LoanError::Serialization { source })
    }
}
