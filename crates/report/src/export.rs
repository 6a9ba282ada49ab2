use std::fs::File;
use std::io::Write;
use std::path::Path;

use thiserror::Error;

use grosz_core::Transaction;

use crate::aggregate::MonthlySummary;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

const UNMATCHED_HEADER: [&str; 6] = [
    "Date",
    "Description",
    "Amount",
    "Location",
    "Operation",
    "Matched",
];

/// Write the monthly summary table: one row per month, columns per
/// `MonthlySummary::header()`, every cell a fixed two-decimal string.
pub fn write_summary<W: Write>(summary: &MonthlySummary, writer: W) -> Result<(), ExportError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(summary.header())?;
    for row in summary.rows() {
        wtr.write_record(&row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_summary_file(summary: &MonthlySummary, path: &Path) -> Result<(), ExportError> {
    write_summary(summary, File::create(path)?)
}

/// Write transactions no rule matched, for manual review. All original
/// fields are retained (amount with its original sign) plus the constant
/// `Matched=false` marker.
pub fn write_unmatched<W: Write>(unmatched: &[Transaction], writer: W) -> Result<(), ExportError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(UNMATCHED_HEADER)?;
    for tx in unmatched {
        wtr.write_record([
            tx.date.to_string().as_str(),
            tx.description.as_deref().unwrap_or(""),
            tx.amount.to_string().as_str(),
            tx.location.as_deref().unwrap_or(""),
            tx.operation.as_deref().unwrap_or(""),
            "false",
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_unmatched_file(unmatched: &[Transaction], path: &Path) -> Result<(), ExportError> {
    write_unmatched(unmatched, File::create(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate;
    use chrono::NaiveDate;
    use grosz_classify::Classification;
    use grosz_core::Money;

    fn tx(day: u32, cents: i64, description: Option<&str>) -> Transaction {
        Transaction {
            date: NaiveDate::from_ymd_opt(2024, 5, day).unwrap(),
            description: description.map(str::to_string),
            location: Some("WARSZAWA".to_string()),
            operation: None,
            amount: Money::from_cents(cents),
        }
    }

    fn matched(category: &str) -> Classification {
        Classification::Matched {
            category: category.to_string(),
            subcategory: "Sub".to_string(),
        }
    }

    fn to_string(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn summary_csv_layout() {
        let entries = vec![
            (tx(1, -4550, Some("LIDL")), matched("Food")),
            (tx(2, -1000, Some("ORLEN")), matched("Transport")),
        ];
        let (summary, _) = aggregate(&entries);

        let mut buf = Vec::new();
        write_summary(&summary, &mut buf).unwrap();
        assert_eq!(
            to_string(buf),
            "Month,Food,Transport,Total\n2024-05,45.50,10.00,55.50\n"
        );
    }

    #[test]
    fn empty_summary_writes_header_only() {
        let (summary, _) = aggregate(&[]);
        let mut buf = Vec::new();
        write_summary(&summary, &mut buf).unwrap();
        assert_eq!(to_string(buf), "Month,Total\n");
    }

    #[test]
    fn unmatched_csv_keeps_original_fields_and_sign() {
        let rows = vec![tx(3, -1337, Some("CINEMA CITY")), tx(4, -250, None)];
        let mut buf = Vec::new();
        write_unmatched(&rows, &mut buf).unwrap();
        assert_eq!(
            to_string(buf),
            "Date,Description,Amount,Location,Operation,Matched\n\
             2024-05-03,CINEMA CITY,-13.37,WARSZAWA,,false\n\
             2024-05-04,,-2.50,WARSZAWA,,false\n"
        );
    }

    #[test]
    fn file_writers_create_files() {
        let dir = tempfile::tempdir().unwrap();
        let summary_path = dir.path().join("summary.csv");
        let unmatched_path = dir.path().join("unmatched.csv");

        let (summary, _) = aggregate(&[(tx(1, -4550, Some("LIDL")), matched("Food"))]);
        write_summary_file(&summary, &summary_path).unwrap();
        write_unmatched_file(&[tx(2, -100, None)], &unmatched_path).unwrap();

        let written = std::fs::read_to_string(&summary_path).unwrap();
        assert!(written.starts_with("Month,Food,Total\n"));
        let written = std::fs::read_to_string(&unmatched_path).unwrap();
        assert!(written.contains("2024-05-02,,-1.00,WARSZAWA,,false"));
    }
}
