use crate::domain::jurisdiction::Jurisdiction;
use crate::error::{LedgerError, Result};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Loan principal in the smallest currency unit.
///
/// Always strictly positive. Fractional or non-positive inputs are rejected
/// at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct Amount(u64);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self> {
        if value <= Decimal::ZERO || !value.fract().is_zero() {
            return Err(LedgerError::InvalidAmount(value.to_string()));
        }
        value
            .to_u64()
            .map(Self)
            .ok_or_else(|| LedgerError::InvalidAmount(value.to_string()))
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl TryFrom<u64> for Amount {
    type Error = LedgerError;

    fn try_from(value: u64) -> Result<Self> {
        if value == 0 {
            Err(LedgerError::InvalidAmount(value.to_string()))
        } else {
            Ok(Self(value))
        }
    }
}

impl From<Amount> for u64 {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

/// A single admitted (or about to be admitted) loan.
///
/// Fields are private; a record is never mutated after construction except
/// for the id the ledger assigns when it is persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanRecord {
    id: Option<Uuid>,
    amount: Amount,
    jurisdiction: Jurisdiction,
    created_at: DateTime<Utc>,
}

impl LoanRecord {
    /// Validates and normalizes a loan request.
    ///
    /// The jurisdiction is checked before the amount.
    pub fn new(amount: Decimal, jurisdiction: &str) -> Result<Self> {
        Self::with_created_at(amount, jurisdiction, Utc::now())
    }

    pub fn with_created_at(
        amount: Decimal,
        jurisdiction: &str,
        created_at: DateTime<Utc>,
    ) -> Result<Self> {
        let jurisdiction: Jurisdiction = jurisdiction.parse()?;
        let amount = Amount::new(amount)?;
        Ok(Self {
            id: None,
            amount,
            jurisdiction,
            created_at,
        })
    }

    /// Returns the record with its ledger-assigned id. Records that already
    /// carry an id keep it.
    pub(crate) fn persisted(self, id: Uuid) -> Self {
        Self {
            id: Some(self.id.unwrap_or(id)),
            ..self
        }
    }

    pub fn id(&self) -> Option<Uuid> {
        self.id
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn jurisdiction(&self) -> Jurisdiction {
        self.jurisdiction
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn view(&self) -> LoanView {
        LoanView {
            id: self.id,
            amount: self.amount.value(),
            jurisdiction: self.jurisdiction,
            created_at: self.created_at,
        }
    }
}

/// Flat projection of a [`LoanRecord`] for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoanView {
    pub id: Option<Uuid>,
    pub amount: u64,
    pub jurisdiction: Jurisdiction,
    pub created_at: DateTime<Utc>,
}
