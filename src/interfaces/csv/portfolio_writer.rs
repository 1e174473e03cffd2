use crate::domain::portfolio::PortfolioAggregate;
use crate::error::Result;
use std::io::Write;

/// Writes a per-jurisdiction breakdown as `jurisdiction,amount,share`,
/// ordered by code, with the share rounded to four places.
pub struct PortfolioWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> PortfolioWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_portfolio(&mut self, portfolio: &PortfolioAggregate) -> Result<()> {
        self.writer.write_record(["jurisdiction", "amount", "share"])?;
        for (jurisdiction, amount) in portfolio.buckets() {
            let share = portfolio.share_of(jurisdiction).round_dp(4).normalize();
            self.writer.write_record([
                jurisdiction.as_str(),
                amount.to_string().as_str(),
                share.to_string().as_str(),
            ])?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
