use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::LoanTerms;
use crate::decimal::Money;
use crate::errors::Result;
use crate::interest::InterestModel;
use crate::payments::{allocate_interest_first, Payment, PaymentReceipt};
use crate::types::{LoanDirection, LoanId, LoanStatus};
use crate::valuation;

/// a loan between the user and one counterparty
///
/// Terms are editable; the payment ledger only grows; status only moves
/// from active to completed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Loan {
    #[serde(deserialize_with = "crate::types::loan_id::deserialize")]
    pub id: LoanId,
    #[serde(flatten)]
    pub terms: LoanTerms,
    #[serde(default)]
    pub status: LoanStatus,
    #[serde(default)]
    pub payments_made: Vec<Payment>,
    pub created_at: DateTime<Utc>,
}

impl Loan {
    /// create a new active loan with an empty ledger
    pub fn new(terms: LoanTerms, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            terms,
            status: LoanStatus::Active,
            payments_made: Vec::new(),
            created_at,
        }
    }

    pub fn person_name(&self) -> &str {
        &self.terms.person_name
    }

    pub fn principal(&self) -> Money {
        self.terms.amount
    }

    pub fn direction(&self) -> LoanDirection {
        self.terms.direction
    }

    pub fn is_active(&self) -> bool {
        self.status == LoanStatus::Active
    }

    pub fn is_lent(&self) -> bool {
        self.terms.direction == LoanDirection::Lent
    }

    pub fn is_borrowed(&self) -> bool {
        self.terms.direction == LoanDirection::Borrowed
    }

    pub fn interest_model(&self) -> InterestModel {
        InterestModel::for_terms(&self.terms)
    }

    pub fn payments(&self) -> &[Payment] {
        &self.payments_made
    }

    /// overwrite the terms; id, status, ledger and creation time are kept
    pub fn apply_terms(&mut self, terms: LoanTerms) {
        self.terms = terms;
    }

    /// move to completed regardless of balance
    ///
    /// Returns false when the loan was already completed.
    pub fn mark_completed(&mut self) -> bool {
        if self.status == LoanStatus::Completed {
            return false;
        }
        self.status = LoanStatus::Completed;
        true
    }

    /// append a payment and complete the loan if nothing is left owing as of `as_of`
    ///
    /// The balance is computed before the ledger is touched, so an error
    /// leaves the loan unchanged.
    pub fn record_payment(&mut self, payment: Payment, as_of: NaiveDate) -> Result<PaymentReceipt> {
        let before = valuation::outstanding_breakdown(self, as_of)?;
        let after = before.after_payment(payment.amount);
        let allocation = allocate_interest_first(payment.amount, before.interest, before.outstanding);

        self.payments_made.push(payment.clone());

        let completed_loan = after.is_settled() && self.mark_completed();

        Ok(PaymentReceipt {
            loan_id: self.id,
            payment,
            allocation,
            outstanding_before: before.outstanding,
            outstanding_after: after.outstanding,
            completed_loan,
        })
    }
}
