pub mod compound;
pub mod simple;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::LoanTerms;
use crate::decimal::{Money, Rate};
use crate::errors::Result;
use crate::types::InterestType;

pub use compound::{
    compound_interest_by_days, compound_interest_by_months, CompoundingEngine, CompoundingFrequency,
};
pub use simple::{simple_interest_by_days, simple_interest_by_months, SimpleEngine};

/// fixed day count: elapsed days / 365, leap years ignored
pub const DAYS_PER_YEAR: u32 = 365;
pub const MONTHS_PER_YEAR: u32 = 12;

/// trait for interest calculations
pub trait InterestCalculator {
    /// interest over a contract duration in whole months
    fn interest_for_months(&self, principal: Money, annual_rate: Rate, months: u32) -> Result<Money>;

    /// interest accrued over elapsed calendar days
    fn interest_for_days(&self, principal: Money, annual_rate: Rate, days: u32) -> Result<Money>;

    fn method(&self) -> String;
}

/// the interest model a loan's terms select
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterestModel {
    Simple(SimpleEngine),
    Compound(CompoundingEngine),
}

impl InterestModel {
    pub fn new(interest_type: InterestType, frequency: CompoundingFrequency) -> Self {
        match interest_type {
            InterestType::Simple => InterestModel::Simple(SimpleEngine),
            InterestType::Compound => InterestModel::Compound(CompoundingEngine::new(frequency)),
        }
    }

    pub fn for_terms(terms: &LoanTerms) -> Self {
        Self::new(terms.interest_type, terms.compound_frequency)
    }

    /// compounding periods per year, `None` for simple interest
    pub fn periods_per_year(&self) -> Option<u32> {
        match self {
            InterestModel::Simple(_) => None,
            InterestModel::Compound(engine) => Some(engine.frequency.periods_per_year()),
        }
    }
}

impl InterestCalculator for InterestModel {
    fn interest_for_months(&self, principal: Money, annual_rate: Rate, months: u32) -> Result<Money> {
        match self {
            InterestModel::Simple(engine) => engine.interest_for_months(principal, annual_rate, months),
            InterestModel::Compound(engine) => engine.interest_for_months(principal, annual_rate, months),
        }
    }

    fn interest_for_days(&self, principal: Money, annual_rate: Rate, days: u32) -> Result<Money> {
        match self {
            InterestModel::Simple(engine) => engine.interest_for_days(principal, annual_rate, days),
            InterestModel::Compound(engine) => engine.interest_for_days(principal, annual_rate, days),
        }
    }

    fn method(&self) -> String {
        match self {
            InterestModel::Simple(engine) => engine.method(),
            InterestModel::Compound(engine) => engine.method(),
        }
    }
}

/// interest projection for proposed terms, before a loan exists
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterestQuote {
    pub principal: Money,
    pub interest: Money,
    pub total_repayment: Money,
    pub years: Decimal,
    pub periods_per_year: Option<u32>,
    pub method: String,
}

/// quote interest and total repayment over the full duration of `terms`
pub fn quote(terms: &LoanTerms) -> Result<InterestQuote> {
    let model = InterestModel::for_terms(terms);
    let interest = model.interest_for_months(terms.amount, terms.interest_rate, terms.duration_months)?;

    Ok(InterestQuote {
        principal: terms.amount,
        interest,
        total_repayment: terms.amount + interest,
        years: (Decimal::from(terms.duration_months) / Decimal::from(MONTHS_PER_YEAR)).round_dp(2),
        periods_per_year: model.periods_per_year(),
        method: model.method(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LoanDirection;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    #[test]
    fn test_model_dispatch() {
        let simple = InterestModel::new(InterestType::Simple, CompoundingFrequency::Daily);
        let compound = InterestModel::new(InterestType::Compound, CompoundingFrequency::Annually);

        let principal = Money::from_major(1_000);
        let rate = Rate::from_percentage(10);

        assert_eq!(simple.interest_for_months(principal, rate, 24).unwrap(), Money::from_major(200));
        assert_eq!(compound.interest_for_months(principal, rate, 24).unwrap(), Money::from_major(210));
        assert_eq!(simple.periods_per_year(), None);
        assert_eq!(compound.periods_per_year(), Some(1));
        assert_eq!(simple.method(), "simple");
        assert_eq!(compound.method(), "annually compounding");
    }

    #[test]
    fn test_quote_simple() {
        let terms = LoanTerms::simple(
            "Rahul Kumar",
            LoanDirection::Lent,
            Money::from_major(50_000),
            Rate::from_percentage(12),
            start(),
            24,
        );

        let quote = quote(&terms).unwrap();
        assert_eq!(quote.interest, Money::from_major(12_000));
        assert_eq!(quote.total_repayment, Money::from_major(62_000));
        assert_eq!(quote.years, dec!(2));
        assert_eq!(quote.periods_per_year, None);
    }

    #[test]
    fn test_quote_compound() {
        let terms = LoanTerms::compound(
            "Priya Sharma",
            LoanDirection::Borrowed,
            Money::from_major(25_000),
            Rate::from_percentage(8),
            CompoundingFrequency::Monthly,
            start(),
            12,
        );

        let quote = quote(&terms).unwrap();
        assert_eq!(quote.interest.round_dp(2), Money::from_str_exact("2074.99").unwrap());
        assert_eq!(quote.total_repayment.round_dp(2), Money::from_str_exact("27074.99").unwrap());
        assert_eq!(quote.periods_per_year, Some(12));
        assert_eq!(quote.method, "monthly compounding");
    }
}
