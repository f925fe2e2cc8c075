use thiserror::Error;

use crate::types::LoanId;

#[derive(Error, Debug)]
pub enum LoanError {
    #[error("loan not found: {id}")]
    LoanNotFound {
        id: LoanId,
    },

    #[error("invalid loan terms: {message}")]
    InvalidTerms {
        message: String,
    },

    #[error("invalid date: {message}")]
    InvalidDate {
        message: String,
    },

    #[error("calculation error: {message}")]
    CalculationError {
        message: String,
    },

    #[error("invalid import: {source}")]
    InvalidImport {
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid import: expected a json array of loans")]
    InvalidImportShape,

    #[error("invalid import: loan id {id} appears more than once")]
    DuplicateLoanId {
        id: LoanId,
    },

    #[error("serialization failed: {source}")]
    Serialization {
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, LoanError>;
