use crate::domain::jurisdiction::Jurisdiction;
use crate::domain::limits::LimitScope;
use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Amount must be a positive integer in minor units, received: {0}")]
    InvalidAmount(String),
    #[error("Invalid jurisdiction: \"{0}\"")]
    InvalidJurisdiction(String),
    #[error(
        "Concentration limit exceeded for {jurisdiction}: {}% would exceed {}% limit",
        percent(.share).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
        percent(.limit).normalize()
    )]
    ConcentrationLimitExceeded {
        jurisdiction: Jurisdiction,
        share: Decimal,
        limit: Decimal,
    },
    #[error("Threshold must be within (0, 1], received: {0}")]
    InvalidThreshold(Decimal),
    #[error("Duplicate concentration limit for {0}")]
    DuplicateLimit(LimitScope),
    #[error("Portfolio amount overflow")]
    AmountOverflow,
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Internal error: {0}")]
    InternalError(Box<dyn std::error::Error + Send + Sync>),
}

impl LedgerError {
    /// Returns `true` for failures caused by the caller's input or by the
    /// concentration rule, as opposed to configuration or infrastructure faults.
    ///
    /// `AmountOverflow` counts as business: the validator raises it before any
    /// write when a single loan would push the book past `u64::MAX`.
    pub fn is_business(&self) -> bool {
        matches!(
            self,
            LedgerError::InvalidAmount(_)
                | LedgerError::InvalidJurisdiction(_)
                | LedgerError::ConcentrationLimitExceeded { .. }
                | LedgerError::AmountOverflow
        )
    }
}

fn percent(fraction: &Decimal) -> Decimal {
    *fraction * Decimal::ONE_HUNDRED
}

pub type Result<T> = std::result::Result<T, LedgerError>;
