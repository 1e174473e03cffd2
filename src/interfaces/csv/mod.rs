pub mod loan_reader;
pub mod loan_writer;
pub mod portfolio_writer;
