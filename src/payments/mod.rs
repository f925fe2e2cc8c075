pub mod allocation;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::types::{LoanId, PaymentAllocation};

pub use allocation::{allocate_interest_first, preview_payment_allocation};

/// a repayment recorded against a loan
///
/// Stored as entered; the interest/principal split is recomputed on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub amount: Money,
    /// date the money changed hands
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// when the payment was entered
    pub timestamp: DateTime<Utc>,
}

impl Payment {
    pub fn new(amount: Money, date: NaiveDate, timestamp: DateTime<Utc>) -> Self {
        Self {
            amount,
            date,
            notes: None,
            timestamp,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// sum of payment amounts
pub fn total_of(payments: &[Payment]) -> Money {
    payments.iter().map(|p| p.amount).sum()
}

/// result of recording a payment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentReceipt {
    pub loan_id: LoanId,
    pub payment: Payment,
    /// interest-first split against the balance before this payment
    pub allocation: PaymentAllocation,
    pub outstanding_before: Money,
    pub outstanding_after: Money,
    /// true when this payment moved the loan to completed
    pub completed_loan: bool,
}
