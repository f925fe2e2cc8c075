use rust_decimal::Decimal;

use crate::decimal::{Money, Rate};
use crate::errors::{LoanError, Result};
use crate::interest::{InterestCalculator, DAYS_PER_YEAR, MONTHS_PER_YEAR};

/// engine for simple (non-compounding) interest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SimpleEngine;

impl SimpleEngine {
    pub fn new() -> Self {
        Self
    }

    /// principal * rate * time_units / units_per_year
    pub fn calculate_simple_interest(
        &self,
        principal: Money,
        annual_rate: Rate,
        time_units: u32,
        units_per_year: u32,
    ) -> Result<Money> {
        principal
            .as_decimal()
            .checked_mul(annual_rate.as_decimal())
            .and_then(|d| d.checked_mul(Decimal::from(time_units)))
            .and_then(|d| d.checked_div(Decimal::from(units_per_year)))
            .map(Money::from_decimal)
            .ok_or_else(|| LoanError::CalculationError {
                message: format!(
                    "{} x {} over {}/{} years overflows",
                    principal, annual_rate, time_units, units_per_year
                ),
            })
    }
}

impl InterestCalculator for SimpleEngine {
    fn interest_for_months(&self, principal: Money, annual_rate: Rate, months: u32) -> Result<Money> {
        simple_interest_by_months(principal, annual_rate, months)
    }

    fn interest_for_days(&self, principal: Money, annual_rate: Rate, days: u32) -> Result<Money> {
        simple_interest_by_days(principal, annual_rate, days)
    }

    fn method(&self) -> String {
        "simple".to_string()
    }
}

/// simple interest over whole months of contract duration
pub fn simple_interest_by_months(principal: Money, annual_rate: Rate, months: u32) -> Result<Money> {
    SimpleEngine.calculate_simple_interest(principal, annual_rate, months, MONTHS_PER_YEAR)
}

/// simple interest over elapsed days (days / 365 years)
pub fn simple_interest_by_days(principal: Money, annual_rate: Rate, days: u32) -> Result<Money> {
    SimpleEngine.calculate_simple_interest(principal, annual_rate, days, DAYS_PER_YEAR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_simple_interest_by_months() {
        let interest =
            simple_interest_by_months(Money::from_major(50_000), Rate::from_percentage(12), 24).unwrap();
        assert_eq!(interest, Money::from_major(12_000));
    }

    #[test]
    fn test_simple_interest_by_days() {
        let principal = Money::from_major(10_000);
        let rate = Rate::from_percentage(5);

        let interest = simple_interest_by_days(principal, rate, 30).unwrap();
        assert_eq!(interest.round_dp(2), Money::from_str_exact("41.10").unwrap());

        let interest = simple_interest_by_days(principal, rate, 365).unwrap();
        assert_eq!(interest, Money::from_major(500));
    }

    #[test]
    fn test_zero_time() {
        let principal = Money::from_major(10_000);
        let rate = Rate::from_percentage(5);

        assert_eq!(simple_interest_by_days(principal, rate, 0).unwrap(), Money::ZERO);
        assert_eq!(simple_interest_by_months(principal, rate, 0).unwrap(), Money::ZERO);
    }

    #[test]
    fn test_negative_rate_is_not_rejected() {
        let interest =
            simple_interest_by_months(Money::from_major(1_000), Rate::from_percentage(-10), 12).unwrap();
        assert_eq!(interest, Money::from_major(-100));
    }

    #[test]
    fn test_fractional_rate() {
        let rate = Rate::from_percentage(dec!(7.5));
        let interest = simple_interest_by_months(Money::from_major(20_000), rate, 6).unwrap();
        assert_eq!(interest, Money::from_major(750));
    }

    #[test]
    fn test_overflow_is_an_error() {
        let principal = Money::from_str_exact("10000000000000000000000000000").unwrap();
        let rate = Rate::from_percentage(30);

        assert!(matches!(
            simple_interest_by_days(principal, rate, 2_000),
            Err(LoanError::CalculationError { .. })
        ));
        assert!(matches!(
            SimpleEngine.interest_for_months(principal, rate, 240),
            Err(LoanError::CalculationError { .. })
        ));
    }
}
