#![allow(dead_code)]

use std::fs::File;
use std::io::{Error, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Writes an `amount,jurisdiction` request file.
pub fn requests_csv(rows: &[(&str, &str)]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "amount,jurisdiction").unwrap();
    for (amount, jurisdiction) in rows {
        writeln!(file, "{},{}", amount, jurisdiction).unwrap();
    }
    file.flush().unwrap();
    file
}

/// Writes a JSON limit configuration.
pub fn limits_json(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", json).unwrap();
    file.flush().unwrap();
    file
}

/// Generates `rows` small requests spread evenly over a handful of
/// jurisdictions, so that every row stays under the default limit once the
/// book has some volume.
pub fn generate_requests(path: &Path, rows: usize) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);
    wtr.write_record(["amount", "jurisdiction"])?;

    // First row seeds a large base so later rows are never concentrated.
    wtr.write_record(["1000000000", "MG"])?;
    let codes = ["SP", "RJ", "BA", "PR", "RS", "PE", "CE", "GO"];
    for i in 0..rows {
        wtr.write_record(["100", codes[i % codes.len()]])?;
    }

    wtr.flush()?;
    Ok(())
}
