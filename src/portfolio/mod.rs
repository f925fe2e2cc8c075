pub mod person;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::Result;
use crate::loan::Loan;
use crate::types::{LoanFilter, LoanStatus};
use crate::valuation;

pub use person::{all_person_summaries, person_names, person_summary, PersonSummary};

/// headline figures over active loans
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardTotals {
    pub total_lent: Money,
    pub total_borrowed: Money,
    /// maturity projection of active lent loans, not today's value
    pub expected_returns: Money,
    pub active_loan_count: usize,
}

/// `as_of` is accepted for parity with the other views; no figure depends on it
pub fn dashboard_totals(loans: &[Loan], _as_of: NaiveDate) -> Result<DashboardTotals> {
    let mut totals = DashboardTotals {
        total_lent: Money::ZERO,
        total_borrowed: Money::ZERO,
        expected_returns: Money::ZERO,
        active_loan_count: 0,
    };

    for loan in loans.iter().filter(|l| l.is_active()) {
        totals.active_loan_count += 1;
        if loan.is_lent() {
            totals.total_lent += loan.principal();
            totals.expected_returns += valuation::total_contracted_amount(loan)?;
        } else {
            totals.total_borrowed += loan.principal();
        }
    }

    Ok(totals)
}

/// whole-collection statistics, any status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioStatistics {
    /// contracted interest on lent loans
    pub interest_earned: Money,
    /// contracted interest on borrowed loans
    pub interest_paid: Money,
    pub completed_count: usize,
    pub average_loan_amount: Money,
    pub total_lent: Money,
    pub total_borrowed: Money,
    pub loan_count: usize,
}

pub fn portfolio_statistics(loans: &[Loan]) -> Result<PortfolioStatistics> {
    let mut stats = PortfolioStatistics {
        interest_earned: Money::ZERO,
        interest_paid: Money::ZERO,
        completed_count: 0,
        average_loan_amount: Money::ZERO,
        total_lent: Money::ZERO,
        total_borrowed: Money::ZERO,
        loan_count: loans.len(),
    };

    for loan in loans {
        let interest = valuation::contracted_interest(loan)?;
        if loan.is_lent() {
            stats.interest_earned += interest;
            stats.total_lent += loan.principal();
        } else {
            stats.interest_paid += interest;
            stats.total_borrowed += loan.principal();
        }

        if loan.status == LoanStatus::Completed {
            stats.completed_count += 1;
        }
    }

    if !loans.is_empty() {
        let total: Money = loans.iter().map(Loan::principal).sum();
        stats.average_loan_amount = total / Decimal::from(loans.len());
    }

    Ok(stats)
}

/// active loans, newest first, at most `limit`
pub fn recent_active(loans: &[Loan], limit: usize) -> Vec<&Loan> {
    let mut recent: Vec<&Loan> = loans.iter().filter(|l| l.is_active()).collect();
    recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    recent.truncate(limit);
    recent
}

impl LoanFilter {
    pub fn matches(&self, loan: &Loan) -> bool {
        match self {
            LoanFilter::All => true,
            LoanFilter::Lent => loan.is_lent(),
            LoanFilter::Borrowed => loan.is_borrowed(),
            LoanFilter::Active => loan.is_active(),
            LoanFilter::Completed => loan.status == LoanStatus::Completed,
        }
    }
}

/// case-insensitive name search combined with a filter, collection order kept
pub fn search<'a>(loans: &'a [Loan], query: &str, filter: LoanFilter) -> Vec<&'a Loan> {
    let needle = query.trim().to_lowercase();
    loans
        .iter()
        .filter(|l| l.person_name().to_lowercase().contains(&needle))
        .filter(|l| filter.matches(l))
        .collect()
}
