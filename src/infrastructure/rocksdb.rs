use crate::domain::jurisdiction::Jurisdiction;
use crate::domain::loan::LoanRecord;
use crate::domain::ports::LoanLedger;
use crate::error::{LedgerError, Result};
use async_trait::async_trait;
use rocksdb::{ColumnFamilyDescriptor, DB, IteratorMode, Options};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use uuid::Uuid;

impl From<rocksdb::Error> for LedgerError {
    fn from(err: rocksdb::Error) -> Self {
        LedgerError::InternalError(Box::new(err))
    }
}

/// Column Family for admitted loans.
pub const CF_LOANS: &str = "loans";

/// A persistent ledger backed by RocksDB.
///
/// Loans live in the `loans` column family keyed by their id bytes, with the
/// record JSON-encoded as the value. Aggregates are computed by a full scan.
///
/// This struct is thread-safe (`Clone` shares the underlying `Arc<DB>`).
#[derive(Clone)]
pub struct RocksDBLedger {
    db: Arc<DB>,
}

impl RocksDBLedger {
    /// Opens or creates a RocksDB instance at the specified path.
    ///
    /// Ensures that the `loans` column family exists.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_loans = ColumnFamilyDescriptor::new(CF_LOANS, Options::default());
        let db = DB::open_cf_descriptors(&opts, path, vec![cf_loans])?;

        Ok(Self { db: Arc::new(db) })
    }

    fn scan(&self) -> Result<Vec<LoanRecord>> {
        let cf = self.db.cf_handle(CF_LOANS).ok_or_else(|| {
            LedgerError::InternalError(Box::new(std::io::Error::other(
                "Loans column family not found",
            )))
        })?;

        let mut loans = Vec::new();
        for item in self.db.iterator_cf(&cf, IteratorMode::Start) {
            let (_key, value) = item?;
            let loan: LoanRecord = serde_json::from_slice(&value)?;
            loans.push(loan);
        }
        Ok(loans)
    }
}

#[async_trait]
impl LoanLedger for RocksDBLedger {
    async fn save(&self, loan: LoanRecord) -> Result<LoanRecord> {
        let cf = self.db.cf_handle(CF_LOANS).ok_or_else(|| {
            LedgerError::InternalError(Box::new(std::io::Error::other(
                "Loans column family not found",
            )))
        })?;

        let stored = loan.persisted(Uuid::new_v4());
        let id = stored.id().ok_or_else(|| {
            LedgerError::InternalError(Box::new(std::io::Error::other("Loan id not assigned")))
        })?;
        let value = serde_json::to_vec(&stored)?;
        self.db.put_cf(&cf, id.as_bytes(), value)?;

        Ok(stored)
    }

    async fn total_amount(&self) -> Result<u64> {
        self.scan()?.iter().try_fold(0u64, |acc, loan| {
            acc.checked_add(loan.amount().value())
                .ok_or(LedgerError::AmountOverflow)
        })
    }

    async fn amount_by_jurisdiction(&self) -> Result<HashMap<Jurisdiction, u64>> {
        let mut totals: HashMap<Jurisdiction, u64> = HashMap::new();
        for loan in self.scan()? {
            let bucket = totals.entry(loan.jurisdiction()).or_default();
            *bucket = bucket
                .checked_add(loan.amount().value())
                .ok_or(LedgerError::AmountOverflow)?;
        }
        Ok(totals)
    }
}
