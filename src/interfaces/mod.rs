//! Inbound and outbound adapters for the command-line boundary.

pub mod csv;
