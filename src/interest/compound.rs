use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, MathematicalOps};
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{LoanError, Result};
use crate::interest::{InterestCalculator, DAYS_PER_YEAR, MONTHS_PER_YEAR};

/// compounding frequency
///
/// Parsing is lenient: anything unrecognised becomes `Monthly`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CompoundingFrequency {
    Daily,
    Weekly,
    #[default]
    Monthly,
    Quarterly,
    Annually,
}

impl CompoundingFrequency {
    /// get number of compounding periods per year
    pub fn periods_per_year(&self) -> u32 {
        match self {
            CompoundingFrequency::Daily => 365,
            CompoundingFrequency::Weekly => 52,
            CompoundingFrequency::Monthly => 12,
            CompoundingFrequency::Quarterly => 4,
            CompoundingFrequency::Annually => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CompoundingFrequency::Daily => "daily",
            CompoundingFrequency::Weekly => "weekly",
            CompoundingFrequency::Monthly => "monthly",
            CompoundingFrequency::Quarterly => "quarterly",
            CompoundingFrequency::Annually => "annually",
        }
    }

    /// parse a stored frequency name, defaulting to monthly
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "daily" => CompoundingFrequency::Daily,
            "weekly" => CompoundingFrequency::Weekly,
            "monthly" => CompoundingFrequency::Monthly,
            "quarterly" => CompoundingFrequency::Quarterly,
            "annually" => CompoundingFrequency::Annually,
            other => {
                tracing::debug!(frequency = other, "unrecognised compounding frequency, using monthly");
                CompoundingFrequency::Monthly
            }
        }
    }
}

impl From<String> for CompoundingFrequency {
    fn from(value: String) -> Self {
        CompoundingFrequency::parse_lenient(&value)
    }
}

impl From<CompoundingFrequency> for String {
    fn from(frequency: CompoundingFrequency) -> Self {
        frequency.as_str().to_string()
    }
}

/// engine for compound interest calculations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompoundingEngine {
    pub frequency: CompoundingFrequency,
}

impl CompoundingEngine {
    pub fn new(frequency: CompoundingFrequency) -> Self {
        Self { frequency }
    }

    /// compound interest over a time span expressed in years
    pub fn calculate_compound(
        &self,
        principal: Money,
        annual_rate: Rate,
        time_years: Decimal,
    ) -> Result<Money> {
        let periods = Decimal::from(self.frequency.periods_per_year()) * time_years;
        self.compound_over_periods(principal, annual_rate, periods)
    }

    /// compound interest over `time_units / units_per_year` years
    ///
    /// The period count is formed as `n * time_units / units_per_year` so that
    /// whole-period spans stay whole and take the exact power path.
    fn compound_over_span(
        &self,
        principal: Money,
        annual_rate: Rate,
        time_units: u32,
        units_per_year: u32,
    ) -> Result<Money> {
        let n = u64::from(self.frequency.periods_per_year());
        let periods = Decimal::from(n * u64::from(time_units)) / Decimal::from(units_per_year);
        self.compound_over_periods(principal, annual_rate, periods)
    }

    fn compound_over_periods(
        &self,
        principal: Money,
        annual_rate: Rate,
        periods: Decimal,
    ) -> Result<Money> {
        if periods.is_zero() {
            return Ok(Money::ZERO);
        }

        let n = Decimal::from(self.frequency.periods_per_year());
        let base = Decimal::ONE + annual_rate.as_decimal() / n;

        let factor = growth_factor(base, periods)?;
        let final_amount = principal
            .as_decimal()
            .checked_mul(factor)
            .ok_or_else(|| LoanError::CalculationError {
                message: format!("{} x {} overflows", principal, factor),
            })?;

        Ok(Money::from_decimal(final_amount - principal.as_decimal()))
    }
}

impl InterestCalculator for CompoundingEngine {
    fn interest_for_months(&self, principal: Money, annual_rate: Rate, months: u32) -> Result<Money> {
        self.compound_over_span(principal, annual_rate, months, MONTHS_PER_YEAR)
    }

    fn interest_for_days(&self, principal: Money, annual_rate: Rate, days: u32) -> Result<Money> {
        self.compound_over_span(principal, annual_rate, days, DAYS_PER_YEAR)
    }

    fn method(&self) -> String {
        format!("{} compounding", self.frequency.as_str())
    }
}

/// `base^periods`, exact for whole periods
fn growth_factor(base: Decimal, periods: Decimal) -> Result<Decimal> {
    let factor = if periods.fract().is_zero() {
        periods.to_u64().and_then(|p| base.checked_powu(p))
    } else {
        base.checked_powd(periods)
    };

    factor.ok_or_else(|| LoanError::CalculationError {
        message: format!("({})^{} is out of range", base, periods),
    })
}

/// compound interest over whole months of contract duration
pub fn compound_interest_by_months(
    principal: Money,
    annual_rate: Rate,
    months: u32,
    frequency: CompoundingFrequency,
) -> Result<Money> {
    CompoundingEngine::new(frequency).interest_for_months(principal, annual_rate, months)
}

/// compound interest over elapsed days (days / 365 years)
pub fn compound_interest_by_days(
    principal: Money,
    annual_rate: Rate,
    days: u32,
    frequency: CompoundingFrequency,
) -> Result<Money> {
    CompoundingEngine::new(frequency).interest_for_days(principal, annual_rate, days)
}
