use crate::error::{LedgerError, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;

/// One row of inbound loan requests. Only the shape is checked here;
/// amount and jurisdiction semantics are validated on admission.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoanRequest {
    pub amount: Decimal,
    pub jurisdiction: String,
}

/// Reads loan requests from a CSV source with an `amount,jurisdiction` header.
///
/// This reader wraps `csv::Reader` and provides an iterator over `Result<LoanRequest>`.
/// It handles whitespace trimming and flexible record lengths automatically.
pub struct LoanRequestReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> LoanRequestReader<R> {
    /// Creates a new `LoanRequestReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and deserializes requests.
    pub fn requests(self) -> impl Iterator<Item = Result<LoanRequest>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(LedgerError::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_reader_valid_stream() {
        let data = "amount, jurisdiction\n5000, sp\n1200, RJ";
        let reader = LoanRequestReader::new(data.as_bytes());
        let results: Vec<Result<LoanRequest>> = reader.requests().collect();

        assert_eq!(results.len(), 2);
        let first = results[0].as_ref().unwrap();
        assert_eq!(first.amount, dec!(5000));
        assert_eq!(first.jurisdiction, "sp");
    }

    #[test]
    fn test_reader_keeps_semantically_invalid_rows() {
        let data = "amount,jurisdiction\n-10,XX\n10.5,SP";
        let reader = LoanRequestReader::new(data.as_bytes());
        let results: Vec<Result<LoanRequest>> = reader.requests().collect();

        assert_eq!(results[0].as_ref().unwrap().amount, dec!(-10));
        assert_eq!(results[1].as_ref().unwrap().amount, dec!(10.5));
    }

    #[test]
    fn test_reader_malformed_line() {
        let data = "amount,jurisdiction\nlots,SP";
        let reader = LoanRequestReader::new(data.as_bytes());
        let results: Vec<Result<LoanRequest>> = reader.requests().collect();

        assert!(matches!(results[0], Err(LedgerError::CsvError(_))));
    }
}
