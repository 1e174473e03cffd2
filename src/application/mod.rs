//! Application layer orchestrating loan admission.
//!
//! `LoanAdmission` is the entry point. It drives the ledger aggregator, the
//! cached limit provider and the pure risk check in a fixed order, and owns
//! the policy for concurrent admissions.

pub mod admission;
pub mod aggregator;
pub mod limit_provider;
