use crate::domain::jurisdiction::Jurisdiction;
use crate::domain::portfolio::PortfolioAggregate;
use crate::domain::ports::LoanLedgerRef;
use crate::error::Result;
use std::collections::HashMap;

/// Live totals over the persisted ledger.
///
/// Every call goes to the ledger; nothing is cached, so results track the
/// ledger as closely as the store allows.
#[derive(Clone)]
pub struct LedgerAggregator {
    ledger: LoanLedgerRef,
}

impl LedgerAggregator {
    pub fn new(ledger: LoanLedgerRef) -> Self {
        Self { ledger }
    }

    /// Sum of all loan amounts; `0` on an empty ledger.
    pub async fn total_amount(&self) -> Result<u64> {
        self.ledger.total_amount().await
    }

    /// Per-jurisdiction sums; empty on an empty ledger.
    pub async fn amount_by_jurisdiction(&self) -> Result<HashMap<Jurisdiction, u64>> {
        self.ledger.amount_by_jurisdiction().await
    }

    /// Both aggregates, read one after the other.
    ///
    /// Not an atomic snapshot: a concurrent save between the two reads
    /// shows up in only one of them.
    pub async fn snapshot(&self) -> Result<PortfolioAggregate> {
        let total_amount = self.total_amount().await?;
        let amount_by_jurisdiction = self.amount_by_jurisdiction().await?;
        Ok(PortfolioAggregate {
            total_amount,
            amount_by_jurisdiction,
        })
    }
}
