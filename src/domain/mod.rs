//! Domain layer: loan records, limits, and the concentration rule.
//!
//! Nothing here performs I/O. Persistence is reached only through the
//! traits in [`ports`].

pub mod jurisdiction;
pub mod limits;
pub mod loan;
pub mod portfolio;
pub mod ports;
pub mod risk;
