use crate::domain::jurisdiction::Jurisdiction;
use crate::domain::limits::{ConcentrationLimitConfig, Threshold};
use crate::domain::loan::LoanRecord;
use crate::domain::ports::{LimitConfigStore, LoanLedger};
use crate::error::{LedgerError, Result};
use async_trait::async_trait;
use rust_decimal_macros::dec;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// A thread-safe in-memory ledger.
///
/// Uses `Arc<RwLock<Vec<LoanRecord>>>` so clones share the same book.
/// Aggregates are recomputed from the stored records on every call.
#[derive(Default, Clone)]
pub struct InMemoryLoanLedger {
    loans: Arc<RwLock<Vec<LoanRecord>>>,
}

impl InMemoryLoanLedger {
    /// Creates a new, empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.loans.read().await.len()
    }
}

#[async_trait]
impl LoanLedger for InMemoryLoanLedger {
    async fn save(&self, loan: LoanRecord) -> Result<LoanRecord> {
        let stored = loan.persisted(Uuid::new_v4());
        let mut loans = self.loans.write().await;
        loans.push(stored.clone());
        Ok(stored)
    }

    async fn total_amount(&self) -> Result<u64> {
        let loans = self.loans.read().await;
        loans.iter().try_fold(0u64, |acc, loan| {
            acc.checked_add(loan.amount().value())
                .ok_or(LedgerError::AmountOverflow)
        })
    }

    async fn amount_by_jurisdiction(&self) -> Result<HashMap<Jurisdiction, u64>> {
        let loans = self.loans.read().await;
        let mut totals: HashMap<Jurisdiction, u64> = HashMap::new();
        for loan in loans.iter() {
            let bucket = totals.entry(loan.jurisdiction()).or_default();
            *bucket = bucket
                .checked_add(loan.amount().value())
                .ok_or(LedgerError::AmountOverflow)?;
        }
        Ok(totals)
    }
}

/// A fixed list of limit entries, returned as-is on every listing.
#[derive(Default, Clone)]
pub struct InMemoryLimitStore {
    limits: Arc<RwLock<Vec<ConcentrationLimitConfig>>>,
}

impl InMemoryLimitStore {
    pub fn new(limits: Vec<ConcentrationLimitConfig>) -> Self {
        Self {
            limits: Arc::new(RwLock::new(limits)),
        }
    }

    /// Built-in configuration: 10% default, 20% for SP.
    pub fn seeded() -> Result<Self> {
        Ok(Self::new(vec![
            ConcentrationLimitConfig::default_limit(Threshold::new(dec!(0.10))?),
            ConcentrationLimitConfig::for_jurisdiction(Jurisdiction::SP, Threshold::new(dec!(0.20))?),
        ]))
    }

    /// Replaces the whole configuration. Providers see it on their next refresh.
    pub async fn replace(&self, limits: Vec<ConcentrationLimitConfig>) {
        *self.limits.write().await = limits;
    }
}

#[async_trait]
impl LimitConfigStore for InMemoryLimitStore {
    async fn list_limits(&self) -> Result<Vec<ConcentrationLimitConfig>> {
        Ok(self.limits.read().await.clone())
    }
}
