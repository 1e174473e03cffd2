use crate::application::aggregator::LedgerAggregator;
use crate::application::limit_provider::LimitProvider;
use crate::domain::jurisdiction::Jurisdiction;
use crate::domain::limits::Threshold;
use crate::domain::loan::LoanRecord;
use crate::domain::ports::LoanLedgerRef;
use crate::domain::risk::{ConcentrationCheck, validate_concentration};
use crate::error::Result;
use rust_decimal::Decimal;
use std::collections::HashMap;
use tokio::sync::{Mutex, MutexGuard};

/// Coordination between admissions that run at the same time.
///
/// Admission reads aggregates, decides, then writes. Without coordination two
/// admissions for the same jurisdiction can both pass against the same
/// pre-admission state and together exceed the limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdmissionPolicy {
    /// One admission at a time per jurisdiction, within this process.
    ///
    /// Per-jurisdiction is enough: an admission elsewhere only grows the
    /// total, which can only lower this jurisdiction's share.
    #[default]
    Serialized,
    /// No coordination. Concurrent same-jurisdiction admissions may
    /// jointly breach the limit.
    Unsynchronized,
}

/// Runs the admission pipeline: validate, aggregate, resolve limit, check,
/// persist. Steps run strictly in that order and nothing is written unless
/// the concentration check passes.
pub struct LoanAdmission {
    ledger: LoanLedgerRef,
    aggregator: LedgerAggregator,
    limits: LimitProvider,
    policy: AdmissionPolicy,
    locks: Vec<Mutex<()>>,
}

impl LoanAdmission {
    pub fn new(ledger: LoanLedgerRef, limits: LimitProvider) -> Self {
        Self::with_policy(ledger, limits, AdmissionPolicy::default())
    }

    pub fn with_policy(
        ledger: LoanLedgerRef,
        limits: LimitProvider,
        policy: AdmissionPolicy,
    ) -> Self {
        if policy == AdmissionPolicy::Unsynchronized {
            log::warn!(
                "Admission is unsynchronized: concurrent loans for one jurisdiction can exceed its limit"
            );
        }
        Self {
            aggregator: LedgerAggregator::new(ledger.clone()),
            ledger,
            limits,
            policy,
            locks: (0..Jurisdiction::COUNT).map(|_| Mutex::new(())).collect(),
        }
    }

    pub fn policy(&self) -> AdmissionPolicy {
        self.policy
    }

    pub fn aggregator(&self) -> &LedgerAggregator {
        &self.aggregator
    }

    /// Admits one loan and returns the stored record.
    ///
    /// Fails with `InvalidJurisdiction`/`InvalidAmount` before any I/O, and
    /// with `ConcentrationLimitExceeded` before any write.
    pub async fn admit(&self, amount: Decimal, jurisdiction: &str) -> Result<LoanRecord> {
        let loan = LoanRecord::new(amount, jurisdiction)?;
        let _guard = self.acquire(loan.jurisdiction()).await;

        let total = self.aggregator.total_amount().await?;
        let by_jurisdiction = self.aggregator.amount_by_jurisdiction().await?;
        let limit = self.limits.resolve(loan.jurisdiction()).await?;
        self.check(&loan, total, &by_jurisdiction, limit)?;
        self.persist(loan).await
    }

    async fn acquire(&self, jurisdiction: Jurisdiction) -> Option<MutexGuard<'_, ()>> {
        match self.policy {
            AdmissionPolicy::Serialized => Some(self.locks[jurisdiction.index()].lock().await),
            AdmissionPolicy::Unsynchronized => None,
        }
    }

    fn check(
        &self,
        loan: &LoanRecord,
        total: u64,
        by_jurisdiction: &HashMap<Jurisdiction, u64>,
        limit: Threshold,
    ) -> Result<()> {
        let check = ConcentrationCheck {
            total_portfolio_amount: total,
            amount_by_jurisdiction: by_jurisdiction,
            new_loan_amount: loan.amount().value(),
            jurisdiction: loan.jurisdiction(),
            limit,
        };
        validate_concentration(&check).inspect_err(|e| {
            log::info!("Rejected loan of {} in {}: {}", loan.amount().value(), loan.jurisdiction(), e);
        })
    }

    async fn persist(&self, loan: LoanRecord) -> Result<LoanRecord> {
        let stored = self.ledger.save(loan).await?;
        log::info!(
            "Admitted loan {} of {} in {}",
            stored.id().map(|id| id.to_string()).unwrap_or_default(),
            stored.amount().value(),
            stored.jurisdiction()
        );
        Ok(stored)
    }
}
