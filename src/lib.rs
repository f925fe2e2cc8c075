pub mod book;
pub mod config;
pub mod decimal;
pub mod errors;
pub mod events;
pub mod interest;
pub mod loan;
pub mod payments;
pub mod portfolio;
pub mod serialization;
pub mod types;
pub mod valuation;

// re-export key types
pub use book::LoanBook;
pub use config::{LoanTerms, LoanTermsBuilder, DEFAULT_RECENT_LIMIT};
pub use decimal::{Money, Rate};
pub use errors::{LoanError, Result};
pub use events::{CompletionReason, Event, EventStore};
pub use interest::{
    CompoundingEngine, CompoundingFrequency, InterestCalculator, InterestModel, InterestQuote,
    SimpleEngine,
};
pub use loan::Loan;
pub use payments::{Payment, PaymentReceipt};
pub use portfolio::{DashboardTotals, PersonSummary, PortfolioStatistics};
pub use serialization::LoanView;
pub use types::{
    InterestType, LoanDirection, LoanFilter, LoanId, LoanStatus, NetPosition, PaymentAllocation,
};
pub use valuation::{LoanValuation, OutstandingBreakdown};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
