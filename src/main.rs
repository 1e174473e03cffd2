use clap::Parser;
use loanguard::application::admission::{AdmissionPolicy, LoanAdmission};
use loanguard::application::limit_provider::LimitProvider;
use loanguard::domain::ports::{LimitConfigStoreBox, LoanLedgerRef};
use loanguard::infrastructure::in_memory::{InMemoryLimitStore, InMemoryLoanLedger};
use loanguard::infrastructure::json_limits::JsonLimitStore;
#[cfg(feature = "storage-rocksdb")]
use loanguard::infrastructure::rocksdb::RocksDBLedger;
use loanguard::interfaces::csv::loan_reader::LoanRequestReader;
use loanguard::interfaces::csv::loan_writer::LoanWriter;
use loanguard::interfaces::csv::portfolio_writer::PortfolioWriter;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input loan requests CSV file (`amount,jurisdiction`)
    input: PathBuf,

    /// JSON file with concentration limits. Defaults to 10%, with 20% for SP.
    #[arg(long)]
    limits: Option<PathBuf>,

    /// Seconds a loaded limit configuration is reused before it is re-read.
    #[arg(long, default_value_t = 300)]
    limit_ttl_secs: u64,

    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long)]
    db_path: Option<PathBuf>,

    /// Disable per-jurisdiction admission locking.
    #[arg(long)]
    unsynchronized: bool,

    /// Print the per-jurisdiction portfolio breakdown after processing.
    #[arg(long)]
    summary: bool,
}

#[cfg(feature = "storage-rocksdb")]
fn open_ledger(db_path: Option<&Path>) -> Result<LoanLedgerRef> {
    match db_path {
        Some(path) => Ok(Arc::new(RocksDBLedger::open(path).into_diagnostic()?)),
        None => Ok(Arc::new(InMemoryLoanLedger::new())),
    }
}

#[cfg(not(feature = "storage-rocksdb"))]
fn open_ledger(db_path: Option<&Path>) -> Result<LoanLedgerRef> {
    if db_path.is_some() {
        eprintln!(
            "WARNING: Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to In-Memory storage."
        );
    }
    Ok(Arc::new(InMemoryLoanLedger::new()))
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let ledger = open_ledger(cli.db_path.as_deref())?;
    let limit_store: LimitConfigStoreBox = match cli.limits {
        Some(path) => Box::new(JsonLimitStore::new(path)),
        None => Box::new(InMemoryLimitStore::seeded().into_diagnostic()?),
    };
    let limits = LimitProvider::with_ttl(limit_store, Duration::from_secs(cli.limit_ttl_secs));
    let policy = if cli.unsynchronized {
        AdmissionPolicy::Unsynchronized
    } else {
        AdmissionPolicy::Serialized
    };
    let admission = LoanAdmission::with_policy(ledger, limits, policy);

    // Admit requests in file order
    let file = File::open(cli.input).into_diagnostic()?;
    let reader = LoanRequestReader::new(file);
    {
        let stdout = io::stdout();
        let mut writer = LoanWriter::new(stdout.lock());
        writer.write_header().into_diagnostic()?;
        for request in reader.requests() {
            match request {
                Ok(request) => match admission.admit(request.amount, &request.jurisdiction).await {
                    Ok(loan) => writer.write_loan(&loan).into_diagnostic()?,
                    Err(e) if e.is_business() => eprintln!("Loan rejected: {}", e),
                    Err(e) => return Err(e).into_diagnostic(),
                },
                Err(e) => {
                    eprintln!("Error reading loan request: {}", e);
                }
            }
        }
        writer.flush().into_diagnostic()?;
    }

    if cli.summary {
        let portfolio = admission.aggregator().snapshot().await.into_diagnostic()?;
        let stdout = io::stdout();
        PortfolioWriter::new(stdout.lock())
            .write_portfolio(&portfolio)
            .into_diagnostic()?;
    }

    Ok(())
}
