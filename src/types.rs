use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::decimal::Money;

/// unique identifier for a loan
pub type LoanId = Uuid;

/// v5 namespace for ids imported from exports that did not use uuids
const IMPORTED_ID_NAMESPACE: Uuid = Uuid::from_u128(0x5d1e_7a3c_9b42_4f08_a6e1_3c0d_72b9_e415);

/// read a stored loan id
///
/// Uuids are taken as they are. Any other string maps to the same v5 uuid
/// every time, so repeated ids in one payload stay equal.
pub fn parse_loan_id(raw: &str) -> LoanId {
    Uuid::parse_str(raw).unwrap_or_else(|_| {
        let id = Uuid::new_v5(&IMPORTED_ID_NAMESPACE, raw.as_bytes());
        tracing::debug!(raw, loan_id = %id, "mapped non-uuid loan id");
        id
    })
}

/// serde adapter for loan ids that accepts non-uuid strings
pub mod loan_id {
    use serde::{Deserialize, Deserializer};

    use super::LoanId;

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<LoanId, D::Error> {
        let raw = <String as Deserialize>::deserialize(deserializer)?;
        Ok(super::parse_loan_id(&raw))
    }
}

/// direction of the obligation, seen from the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoanDirection {
    /// the user gave money to the counterparty
    Lent,
    /// the user received money from the counterparty
    Borrowed,
}

impl LoanDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoanDirection::Lent => "lent",
            LoanDirection::Borrowed => "borrowed",
        }
    }
}

impl fmt::Display for LoanDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// interest model of a loan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterestType {
    Simple,
    Compound,
}

/// loan status
///
/// `Active -> Completed` is the only transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoanStatus {
    /// open, still accruing
    #[default]
    Active,
    /// paid off or closed by the user
    Completed,
}

impl LoanStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoanStatus::Active => "active",
            LoanStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// who owes whom across all loans with one counterparty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NetPosition {
    /// counterparty owes the user
    OwesYou,
    /// user owes the counterparty
    YouOwe,
    Settled,
}

impl NetPosition {
    pub fn as_str(&self) -> &'static str {
        match self {
            NetPosition::OwesYou => "owes-you",
            NetPosition::YouOwe => "you-owe",
            NetPosition::Settled => "settled",
        }
    }
}

impl fmt::Display for NetPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// list filter for loan searches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoanFilter {
    #[default]
    All,
    Lent,
    Borrowed,
    Active,
    Completed,
}

/// interest-first split of a proposed payment
///
/// Display only, never stored on the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PaymentAllocation {
    pub to_interest: Money,
    pub to_principal: Money,
    /// part of the payment beyond the current outstanding balance
    pub overpayment: Money,
}

impl PaymentAllocation {
    pub fn total_applied(&self) -> Money {
        self.to_interest + self.to_principal
    }
}
