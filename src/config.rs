use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{LoanError, Result};
use crate::interest::CompoundingFrequency;
use crate::types::{InterestType, LoanDirection};

/// number of loans shown in the recent-activity list
pub const DEFAULT_RECENT_LIMIT: usize = 5;

/// caller-editable loan terms
///
/// Field names match the JSON export format (`personName`, `type`,
/// `interestRate` as a percentage, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanTerms {
    pub person_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_info: Option<String>,
    pub amount: Money,
    #[serde(rename = "type")]
    pub direction: LoanDirection,
    pub interest_type: InterestType,
    #[serde(with = "crate::decimal::percentage")]
    pub interest_rate: Rate,
    /// ignored for simple interest
    #[serde(default, alias = "paymentFrequency")]
    pub compound_frequency: CompoundingFrequency,
    pub start_date: NaiveDate,
    pub duration_months: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl LoanTerms {
    /// simple-interest terms
    pub fn simple(
        person_name: impl Into<String>,
        direction: LoanDirection,
        amount: Money,
        rate: Rate,
        start_date: NaiveDate,
        duration_months: u32,
    ) -> Self {
        Self {
            person_name: person_name.into(),
            contact_info: None,
            amount,
            direction,
            interest_type: InterestType::Simple,
            interest_rate: rate,
            compound_frequency: CompoundingFrequency::default(),
            start_date,
            duration_months,
            notes: None,
        }
    }

    /// compound-interest terms
    pub fn compound(
        person_name: impl Into<String>,
        direction: LoanDirection,
        amount: Money,
        rate: Rate,
        frequency: CompoundingFrequency,
        start_date: NaiveDate,
        duration_months: u32,
    ) -> Self {
        Self {
            interest_type: InterestType::Compound,
            compound_frequency: frequency,
            ..Self::simple(person_name, direction, amount, rate, start_date, duration_months)
        }
    }

    pub fn builder() -> LoanTermsBuilder {
        LoanTermsBuilder::new()
    }

    pub fn with_contact_info(mut self, contact_info: impl Into<String>) -> Self {
        self.contact_info = Some(contact_info.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// opt-in sanity check; the engine itself accepts any terms
    pub fn validate(&self) -> Result<()> {
        if self.person_name.trim().is_empty() {
            return Err(LoanError::InvalidTerms {
                message: "person name is empty".to_string(),
            });
        }

        if !self.amount.is_positive() {
            return Err(LoanError::InvalidTerms {
                message: format!("amount must be positive, got {}", self.amount),
            });
        }

        if self.interest_rate.is_negative() {
            return Err(LoanError::InvalidTerms {
                message: format!("interest rate must not be negative, got {}", self.interest_rate),
            });
        }

        if self.duration_months == 0 {
            return Err(LoanError::InvalidTerms {
                message: "duration must be at least one month".to_string(),
            });
        }

        Ok(())
    }
}

/// builder for loan terms
#[derive(Debug, Default)]
pub struct LoanTermsBuilder {
    person_name: Option<String>,
    contact_info: Option<String>,
    amount: Option<Money>,
    direction: Option<LoanDirection>,
    interest_type: Option<InterestType>,
    rate: Option<Rate>,
    frequency: Option<CompoundingFrequency>,
    start_date: Option<NaiveDate>,
    duration_months: Option<u32>,
    notes: Option<String>,
}

impl LoanTermsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn person_name(mut self, name: impl Into<String>) -> Self {
        self.person_name = Some(name.into());
        self
    }

    pub fn contact_info(mut self, contact: impl Into<String>) -> Self {
        self.contact_info = Some(contact.into());
        self
    }

    pub fn amount(mut self, amount: Money) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn lent(mut self) -> Self {
        self.direction = Some(LoanDirection::Lent);
        self
    }

    pub fn borrowed(mut self) -> Self {
        self.direction = Some(LoanDirection::Borrowed);
        self
    }

    pub fn direction(mut self, direction: LoanDirection) -> Self {
        self.direction = Some(direction);
        self
    }

    pub fn interest_type(mut self, interest_type: InterestType) -> Self {
        self.interest_type = Some(interest_type);
        self
    }

    pub fn rate(mut self, rate: Rate) -> Self {
        self.rate = Some(rate);
        self
    }

    /// sets the frequency and switches the terms to compound interest
    pub fn compounding(mut self, frequency: CompoundingFrequency) -> Self {
        self.frequency = Some(frequency);
        self.interest_type = Some(InterestType::Compound);
        self
    }

    pub fn start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    pub fn duration_months(mut self, months: u32) -> Self {
        self.duration_months = Some(months);
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// build the terms; direction defaults to lent and interest to simple
    pub fn build(self) -> Result<LoanTerms> {
        let person_name = self.person_name.ok_or(LoanError::InvalidTerms {
            message: "Person name required".to_string(),
        })?;

        let amount = self.amount.ok_or(LoanError::InvalidTerms {
            message: "Amount required".to_string(),
        })?;

        let rate = self.rate.ok_or(LoanError::InvalidTerms {
            message: "Rate required".to_string(),
        })?;

        let start_date = self.start_date.ok_or(LoanError::InvalidTerms {
            message: "Start date required".to_string(),
        })?;

        let duration_months = self.duration_months.ok_or(LoanError::InvalidTerms {
            message: "Duration required".to_string(),
        })?;

        Ok(LoanTerms {
            person_name,
            contact_info: self.contact_info,
            amount,
            direction: self.direction.unwrap_or(LoanDirection::Lent),
            interest_type: self.interest_type.unwrap_or(InterestType::Simple),
            interest_rate: rate,
            compound_frequency: self.frequency.unwrap_or_default(),
            start_date,
            duration_months,
            notes: self.notes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_builder_defaults() {
        let terms = LoanTerms::builder()
            .person_name("Asha")
            .amount(Money::from_major(1_000))
            .rate(Rate::from_percentage(6))
            .start_date(date(2024, 5, 1))
            .duration_months(6)
            .build()
            .unwrap();

        assert_eq!(terms.direction, LoanDirection::Lent);
        assert_eq!(terms.interest_type, InterestType::Simple);
        assert_eq!(terms.compound_frequency, CompoundingFrequency::Monthly);
        assert!(terms.contact_info.is_none());
    }

    #[test]
    fn test_builder_compounding() {
        let terms = LoanTerms::builder()
            .person_name("Asha")
            .borrowed()
            .amount(Money::from_major(1_000))
            .rate(Rate::from_percentage(6))
            .compounding(CompoundingFrequency::Quarterly)
            .start_date(date(2024, 5, 1))
            .duration_months(6)
            .notes("school fees")
            .build()
            .unwrap();

        assert_eq!(terms.direction, LoanDirection::Borrowed);
        assert_eq!(terms.interest_type, InterestType::Compound);
        assert_eq!(terms.compound_frequency, CompoundingFrequency::Quarterly);
        assert_eq!(terms.notes.as_deref(), Some("school fees"));
    }

    #[test]
    fn test_builder_missing_fields() {
        let result = LoanTerms::builder()
            .person_name("Asha")
            .rate(Rate::from_percentage(6))
            .start_date(date(2024, 5, 1))
            .duration_months(6)
            .build();

        assert!(matches!(result, Err(LoanError::InvalidTerms { .. })));
    }

    #[test]
    fn test_validate() {
        let good = LoanTerms::simple(
            "Asha",
            LoanDirection::Lent,
            Money::from_major(1_000),
            Rate::from_percentage(6),
            date(2024, 5, 1),
            6,
        );
        assert!(good.validate().is_ok());

        let mut zero_amount = good.clone();
        zero_amount.amount = Money::ZERO;
        assert!(zero_amount.validate().is_err());

        let mut negative_rate = good.clone();
        negative_rate.interest_rate = Rate::from_percentage(-1);
        assert!(negative_rate.validate().is_err());

        let mut no_duration = good.clone();
        no_duration.duration_months = 0;
        assert!(no_duration.validate().is_err());

        let mut blank_name = good;
        blank_name.person_name = "  ".to_string();
        assert!(blank_name.validate().is_err());
    }

    #[test]
    fn test_terms_json_format() {
        let json = r#"{
            "personName": "Rahul Kumar",
            "contactInfo": "+91 98765 43210",
            "amount": 50000,
            "type": "lent",
            "interestType": "compound",
            "interestRate": 12,
            "paymentFrequency": "quarterly",
            "startDate": "2024-01-15",
            "durationMonths": 24
        }"#;

        let terms: LoanTerms = serde_json::from_str(json).unwrap();
        assert_eq!(terms.amount, Money::from_major(50_000));
        assert_eq!(terms.direction, LoanDirection::Lent);
        assert_eq!(terms.interest_rate, Rate::from_percentage(12));
        assert_eq!(terms.compound_frequency, CompoundingFrequency::Quarterly);
        assert_eq!(terms.start_date, date(2024, 1, 15));

        let without_frequency = json.replace(r#""paymentFrequency": "quarterly","#, "");
        let terms: LoanTerms = serde_json::from_str(&without_frequency).unwrap();
        assert_eq!(terms.compound_frequency, CompoundingFrequency::Monthly);

        let written = serde_json::to_value(&terms).unwrap();
        assert_eq!(written["type"], "lent");
        assert_eq!(written["compoundFrequency"], "monthly");
        assert!(written.get("notes").is_none());
    }
}
