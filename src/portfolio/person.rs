use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::decimal::Money;
use crate::errors::Result;
use crate::loan::Loan;
use crate::types::NetPosition;
use crate::valuation;

/// net position with one counterparty, derived on demand
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonSummary {
    pub person_name: String,
    pub loan_count: usize,
    pub active_loan_count: usize,
    /// principal of active lent loans
    pub total_lent: Money,
    /// principal of active borrowed loans
    pub total_borrowed: Money,
    pub outstanding_lent: Money,
    pub outstanding_borrowed: Money,
    /// magnitude of `outstanding_lent - outstanding_borrowed`
    pub net_outstanding: Money,
    pub net_position: NetPosition,
}

impl PersonSummary {
    /// signed net: positive when the counterparty owes the user
    pub fn signed_net(&self) -> Money {
        match self.net_position {
            NetPosition::YouOwe => Money::ZERO - self.net_outstanding,
            _ => self.net_outstanding,
        }
    }
}

fn classify(net: Money) -> NetPosition {
    if net.is_positive() {
        NetPosition::OwesYou
    } else if net.is_negative() {
        NetPosition::YouOwe
    } else {
        NetPosition::Settled
    }
}

/// summarise every loan whose `person_name` equals `person_name` exactly
pub fn person_summary(loans: &[Loan], person_name: &str, as_of: NaiveDate) -> Result<PersonSummary> {
    let mut summary = PersonSummary {
        person_name: person_name.to_string(),
        loan_count: 0,
        active_loan_count: 0,
        total_lent: Money::ZERO,
        total_borrowed: Money::ZERO,
        outstanding_lent: Money::ZERO,
        outstanding_borrowed: Money::ZERO,
        net_outstanding: Money::ZERO,
        net_position: NetPosition::Settled,
    };

    for loan in loans.iter().filter(|l| l.person_name() == person_name) {
        summary.loan_count += 1;
        if !loan.is_active() {
            continue;
        }
        summary.active_loan_count += 1;

        let outstanding = valuation::outstanding_breakdown(loan, as_of)?.outstanding;
        if loan.is_lent() {
            summary.total_lent += loan.principal();
            summary.outstanding_lent += outstanding;
        } else {
            summary.total_borrowed += loan.principal();
            summary.outstanding_borrowed += outstanding;
        }
    }

    let net = summary.outstanding_lent - summary.outstanding_borrowed;
    summary.net_outstanding = net.abs();
    summary.net_position = classify(net);

    Ok(summary)
}

/// distinct counterparty names in first-seen order
pub fn person_names(loans: &[Loan]) -> Vec<&str> {
    let mut seen = HashSet::new();
    loans
        .iter()
        .map(Loan::person_name)
        .filter(|name| seen.insert(*name))
        .collect()
}

/// one summary per distinct counterparty, in first-seen order
pub fn all_person_summaries(loans: &[Loan], as_of: NaiveDate) -> Result<Vec<PersonSummary>> {
    person_names(loans)
        .into_iter()
        .map(|name| person_summary(loans, name, as_of))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LoanTerms;
    use crate::decimal::Rate;
    use crate::types::LoanDirection;
    use chrono::{TimeZone, Utc};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn zero_rate(name: &str, direction: LoanDirection, amount: i64) -> Loan {
        Loan::new(
            LoanTerms::simple(name, direction, Money::from_major(amount), Rate::ZERO, date(2024, 1, 1), 12),
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_net_position_owes_you() {
        let loans = vec![
            zero_rate("Asha", LoanDirection::Lent, 1_000),
            zero_rate("Asha", LoanDirection::Borrowed, 400),
        ];

        let summary = person_summary(&loans, "Asha", date(2024, 6, 1)).unwrap();
        assert_eq!(summary.outstanding_lent, Money::from_major(1_000));
        assert_eq!(summary.outstanding_borrowed, Money::from_major(400));
        assert_eq!(summary.net_outstanding, Money::from_major(600));
        assert_eq!(summary.net_position, NetPosition::OwesYou);
        assert_eq!(summary.signed_net(), Money::from_major(600));
        assert_eq!(summary.loan_count, 2);
    }

    #[test]
    fn test_net_position_you_owe_reports_magnitude() {
        let loans = vec![
            zero_rate("Ravi", LoanDirection::Lent, 200),
            zero_rate("Ravi", LoanDirection::Borrowed, 950),
        ];

        let summary = person_summary(&loans, "Ravi", date(2024, 6, 1)).unwrap();
        assert_eq!(summary.net_outstanding, Money::from_major(750));
        assert_eq!(summary.net_position, NetPosition::YouOwe);
        assert_eq!(summary.signed_net(), Money::from_major(-750));
    }

    #[test]
    fn test_settled_and_completed_loans() {
        let mut lent = zero_rate("Meera", LoanDirection::Lent, 500);
        lent.mark_completed();
        let loans = vec![lent, zero_rate("Meera", LoanDirection::Borrowed, 0)];

        let summary = person_summary(&loans, "Meera", date(2024, 6, 1)).unwrap();
        assert_eq!(summary.net_position, NetPosition::Settled);
        assert_eq!(summary.total_lent, Money::ZERO);
        assert_eq!(summary.loan_count, 2);
        assert_eq!(summary.active_loan_count, 1);
    }

    #[test]
    fn test_unknown_person_is_settled() {
        let loans = vec![zero_rate("Asha", LoanDirection::Lent, 1_000)];
        let summary = person_summary(&loans, "asha", date(2024, 6, 1)).unwrap();
        assert_eq!(summary.loan_count, 0);
        assert_eq!(summary.net_position, NetPosition::Settled);
    }

    #[test]
    fn test_all_summaries_keep_first_seen_order() {
        let loans = vec![
            zero_rate("Zoya", LoanDirection::Lent, 100),
            zero_rate("Asha", LoanDirection::Lent, 100),
            zero_rate("Zoya", LoanDirection::Borrowed, 50),
            zero_rate("Meera", LoanDirection::Borrowed, 10),
        ];

        let summaries = all_person_summaries(&loans, date(2024, 6, 1)).unwrap();
        let names: Vec<&str> = summaries.iter().map(|s| s.person_name.as_str()).collect();
        assert_eq!(names, vec!["Zoya", "Asha", "Meera"]);
        assert_eq!(summaries[0].net_outstanding, Money::from_major(50));
        assert_eq!(summaries[2].net_position, NetPosition::YouOwe);
    }
}
