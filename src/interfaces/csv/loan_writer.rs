use crate::domain::loan::LoanRecord;
use crate::error::Result;
use std::io::Write;

const HEADER: [&str; 4] = ["id", "amount", "jurisdiction", "created_at"];

/// Writes admitted loans as `id,amount,jurisdiction,created_at`.
///
/// The header is written by `write_header`, so a batch with no admitted loans
/// still produces it.
pub struct LoanWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> LoanWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(sink),
        }
    }

    pub fn write_header(&mut self) -> Result<()> {
        self.writer.write_record(HEADER)?;
        Ok(())
    }

    pub fn write_loan(&mut self, loan: &LoanRecord) -> Result<()> {
        self.writer.serialize(loan.view())?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
