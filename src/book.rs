use chrono::NaiveDate;
use hourglass_rs::{SafeTimeProvider, TimeSource};
use std::collections::HashSet;
use tracing::{debug, info, warn};

use crate::config::LoanTerms;
use crate::decimal::Money;
use crate::errors::{LoanError, Result};
use crate::events::{CompletionReason, Event, EventStore};
use crate::loan::Loan;
use crate::payments::{self, Payment, PaymentReceipt};
use crate::portfolio::{self, DashboardTotals, PersonSummary, PortfolioStatistics};
use crate::types::{LoanFilter, LoanId, PaymentAllocation};
use crate::valuation::LoanValuation;

/// the in-session loan collection
///
/// Owns the loans and hands `&[Loan]` snapshots to the pure valuation and
/// portfolio functions. The time provider only stamps creation and payment
/// entry times and supplies "today" to the `*_now` helpers; every other
/// read takes an explicit as-of date.
pub struct LoanBook {
    loans: Vec<Loan>,
    pub events: EventStore,
    time: SafeTimeProvider,
}

impl LoanBook {
    pub fn new(time: SafeTimeProvider) -> Self {
        Self {
            loans: Vec::new(),
            events: EventStore::new(),
            time,
        }
    }

    /// book stamped with the system clock
    pub fn with_system_time() -> Self {
        Self::new(SafeTimeProvider::new(TimeSource::System))
    }

    pub fn from_loans(loans: Vec<Loan>, time: SafeTimeProvider) -> Self {
        Self {
            loans,
            events: EventStore::new(),
            time,
        }
    }

    pub fn time(&self) -> &SafeTimeProvider {
        &self.time
    }

    /// current date according to the book's time provider
    pub fn today(&self) -> NaiveDate {
        self.time.now().date_naive()
    }

    pub fn loans(&self) -> &[Loan] {
        &self.loans
    }

    pub fn len(&self) -> usize {
        self.loans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loans.is_empty()
    }

    pub fn get(&self, id: LoanId) -> Option<&Loan> {
        self.loans.iter().find(|l| l.id == id)
    }

    fn require(&self, id: LoanId) -> Result<&Loan> {
        self.get(id).ok_or_else(|| not_found(id))
    }

    fn require_mut(&mut self, id: LoanId) -> Result<&mut Loan> {
        self.loans
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| not_found(id))
    }

    /// add an active loan with an empty ledger
    pub fn add_loan(&mut self, terms: LoanTerms) -> LoanId {
        let now = self.time.now();
        let loan = Loan::new(terms, now);
        let id = loan.id;

        debug!(loan_id = %id, person = %loan.person_name(), amount = %loan.principal(), "loan added");
        self.events.emit(Event::LoanAdded {
            loan_id: id,
            person_name: loan.person_name().to_string(),
            amount: loan.principal(),
            timestamp: now,
        });

        self.loans.push(loan);
        id
    }

    /// overwrite a loan's terms, keeping its status and payments
    pub fn update_terms(&mut self, id: LoanId, terms: LoanTerms) -> Result<()> {
        let now = self.time.now();
        self.require_mut(id)?.apply_terms(terms);

        debug!(loan_id = %id, "loan terms updated");
        self.events.emit(Event::LoanUpdated {
            loan_id: id,
            timestamp: now,
        });
        Ok(())
    }

    /// append a payment dated `date` and complete the loan if it is paid off as of `as_of`
    pub fn record_payment(
        &mut self,
        id: LoanId,
        amount: Money,
        date: NaiveDate,
        notes: Option<String>,
        as_of: NaiveDate,
    ) -> Result<PaymentReceipt> {
        let now = self.time.now();
        let payment = Payment {
            amount,
            date,
            notes,
            timestamp: now,
        };

        let receipt = self.require_mut(id)?.record_payment(payment, as_of)?;

        debug!(
            loan_id = %id,
            amount = %amount,
            outstanding = %receipt.outstanding_after,
            "payment recorded"
        );
        self.events.emit(Event::PaymentRecorded {
            loan_id: id,
            amount,
            payment_date: date,
            applied_to_interest: receipt.allocation.to_interest,
            applied_to_principal: receipt.allocation.to_principal,
            outstanding_after: receipt.outstanding_after,
            timestamp: now,
        });

        if receipt.completed_loan {
            info!(loan_id = %id, "loan paid in full");
            self.events.emit(Event::LoanCompleted {
                loan_id: id,
                reason: CompletionReason::PaidInFull,
                timestamp: now,
            });
        }

        Ok(receipt)
    }

    /// record a payment dated today, valued as of today
    pub fn record_payment_now(
        &mut self,
        id: LoanId,
        amount: Money,
        notes: Option<String>,
    ) -> Result<PaymentReceipt> {
        let today = self.today();
        self.record_payment(id, amount, today, notes, today)
    }

    /// interest-first split of a proposed payment, nothing is recorded
    pub fn preview_payment(&self, id: LoanId, amount: Money, as_of: NaiveDate) -> Result<PaymentAllocation> {
        payments::preview_payment_allocation(self.require(id)?, amount, as_of)
    }

    /// close a loan regardless of balance; false if it was already completed
    pub fn mark_completed(&mut self, id: LoanId) -> Result<bool> {
        let now = self.time.now();
        let changed = self.require_mut(id)?.mark_completed();

        if changed {
            info!(loan_id = %id, "loan marked completed");
            self.events.emit(Event::LoanCompleted {
                loan_id: id,
                reason: CompletionReason::MarkedByUser,
                timestamp: now,
            });
        }
        Ok(changed)
    }

    /// remove a loan and its payments
    pub fn delete_loan(&mut self, id: LoanId) -> Result<Loan> {
        let index = self
            .loans
            .iter()
            .position(|l| l.id == id)
            .ok_or_else(|| not_found(id))?;
        let loan = self.loans.remove(index);

        debug!(loan_id = %id, payments = loan.payments_made.len(), "loan deleted");
        self.events.emit(Event::LoanDeleted {
            loan_id: id,
            payments_discarded: loan.payments_made.len(),
            timestamp: self.time.now(),
        });
        Ok(loan)
    }

    /// drop every loan, returning how many were removed
    pub fn clear(&mut self) -> usize {
        let removed = self.loans.len();
        self.loans.clear();

        info!(loans_removed = removed, "loan book cleared");
        self.events.emit(Event::BookCleared {
            loans_removed: removed,
            timestamp: self.time.now(),
        });
        removed
    }

    pub fn valuation(&self, id: LoanId, as_of: NaiveDate) -> Result<LoanValuation> {
        LoanValuation::of(self.require(id)?, as_of)
    }

    pub fn dashboard(&self, as_of: NaiveDate) -> Result<DashboardTotals> {
        portfolio::dashboard_totals(&self.loans, as_of)
    }

    pub fn person_summary(&self, person_name: &str, as_of: NaiveDate) -> Result<PersonSummary> {
        portfolio::person_summary(&self.loans, person_name, as_of)
    }

    pub fn person_summaries(&self, as_of: NaiveDate) -> Result<Vec<PersonSummary>> {
        portfolio::all_person_summaries(&self.loans, as_of)
    }

    pub fn statistics(&self) -> Result<PortfolioStatistics> {
        portfolio::portfolio_statistics(&self.loans)
    }

    pub fn recent_loans(&self, limit: usize) -> Vec<&Loan> {
        portfolio::recent_active(&self.loans, limit)
    }

    pub fn search(&self, query: &str, filter: LoanFilter) -> Vec<&Loan> {
        portfolio::search(&self.loans, query, filter)
    }

    /// whole collection as a pretty-printed json array
    pub fn export_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.loans).map_err(|source| LoanError::Serialization { source })
    }

    /// replace the collection with a json array of loans
    ///
    /// Anything other than an array of valid loans with distinct ids is
    /// rejected and the book is left untouched. Ids that are not uuids are
    /// mapped to stable uuids.
    pub fn import_json(&mut self, json: &str) -> Result<usize> {
        let value: serde_json::Value = serde_json::from_str(json).map_err(|source| {
            warn!(error = %source, "import rejected: not json");
            LoanError::InvalidImport { source }
        })?;

        if !value.is_array() {
            warn!("import rejected: payload is not an array");
            return Err(LoanError::InvalidImportShape);
        }

        let loans: Vec<Loan> = serde_json::from_value(value).map_err(|source| {
            warn!(error = %source, "import rejected: malformed loan");
            LoanError::InvalidImport { source }
        })?;

        let mut seen = HashSet::with_capacity(loans.len());
        if let Some(loan) = loans.iter().find(|l| !seen.insert(l.id)) {
            warn!(loan_id = %loan.id, "import rejected: duplicate loan id");
            return Err(LoanError::DuplicateLoanId { id: loan.id });
        }

        let count = loans.len();
        self.loans = loans;

        info!(loan_count = count, "loan book imported");
        self.events.emit(Event::BookImported {
            loan_count: count,
            timestamp: self.time.now(),
        });
        Ok(count)
    }
}

fn not_found(id: LoanId) -> LoanError {
    warn!(loan_id = %id, "loan not found");
    LoanError::LoanNotFound { id }
}
