use super::jurisdiction::Jurisdiction;
use super::limits::ConcentrationLimitConfig;
use super::loan::LoanRecord;
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

/// Durable collection of admitted loans.
///
/// `save` is the only mutation. Implementations assign the id on save and
/// compute aggregates from the stored records at query time.
#[async_trait]
pub trait LoanLedger: Send + Sync {
    async fn save(&self, loan: LoanRecord) -> Result<LoanRecord>;
    async fn total_amount(&self) -> Result<u64>;
    async fn amount_by_jurisdiction(&self) -> Result<HashMap<Jurisdiction, u64>>;
}

#[async_trait]
pub trait LimitConfigStore: Send + Sync {
    async fn list_limits(&self) -> Result<Vec<ConcentrationLimitConfig>>;
}

pub type LoanLedgerRef = Arc<dyn LoanLedger>;
pub type LimitConfigStoreBox = Box<dyn LimitConfigStore>;
