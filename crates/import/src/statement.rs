use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use chrono::NaiveDate;
use csv::StringRecord;
use rust_decimal::Decimal;
use thiserror::Error;

use grosz_core::{Money, Transaction};

/// Column layout and parsing options for one bank's CSV export.
#[derive(Debug, Clone)]
pub struct StatementProfile {
    pub date_column: usize,
    pub description_column: usize,
    pub amount_column: usize,
    pub location_column: Option<usize>,
    pub operation_column: Option<usize>,
    pub date_format: String,
    pub delimiter: u8,
    /// Leading lines discarded before the header row.
    pub skip_lines: usize,
    pub has_header: bool,
    /// Exports using "," as the decimal separator (and space as the
    /// thousands separator).
    pub decimal_comma: bool,
    /// Keep only debit rows; the report covers spending.
    pub debits_only: bool,
}

impl Default for StatementProfile {
    fn default() -> Self {
        Self {
            date_column: 0,
            description_column: 1,
            amount_column: 2,
            location_column: None,
            operation_column: None,
            date_format: "%Y-%m-%d".to_string(),
            delimiter: b',',
            skip_lines: 0,
            has_header: true,
            decimal_comma: false,
            debits_only: false,
        }
    }
}

impl StatementProfile {
    /// The PKO BP card/account export: one title line, a header line, then
    /// rows with comma-decimal amounts and the operation date-and-time in a
    /// free-text column.
    pub fn pko_bp() -> Self {
        Self {
            date_column: 0,
            description_column: 6,
            amount_column: 3,
            location_column: Some(7),
            operation_column: Some(8),
            date_format: "%Y-%m-%d".to_string(),
            delimiter: b',',
            skip_lines: 1,
            has_header: true,
            decimal_comma: true,
            debits_only: true,
        }
    }
}

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// A data row that could not be turned into a transaction. Skips never
/// abort the import but must stay visible to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// 1-based line in the source file.
    pub line: u64,
    pub reason: String,
}

#[derive(Debug, Default)]
pub struct ImportOutcome {
    pub transactions: Vec<Transaction>,
    pub skipped: Vec<SkippedRow>,
}

pub fn read_statement<R: Read>(
    data: R,
    profile: &StatementProfile,
) -> Result<ImportOutcome, ImportError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(profile.delimiter)
        .from_reader(data);

    let discard = profile.skip_lines + usize::from(profile.has_header);
    let mut outcome = ImportOutcome::default();

    for (index, result) in reader.records().enumerate() {
        let record = result?;
        if index < discard {
            continue;
        }
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        let date_raw = record.get(profile.date_column).unwrap_or("").trim();
        if date_raw.is_empty() {
            outcome.skipped.push(SkippedRow {
                line,
                reason: "missing date".to_string(),
            });
            continue;
        }
        let date = match NaiveDate::parse_from_str(date_raw, &profile.date_format) {
            Ok(date) => date,
            Err(_) => {
                outcome.skipped.push(SkippedRow {
                    line,
                    reason: format!("invalid date {date_raw:?}"),
                });
                continue;
            }
        };

        let amount_raw = record.get(profile.amount_column).unwrap_or("").trim();
        let Some(amount) = parse_amount(amount_raw, profile.decimal_comma) else {
            outcome.skipped.push(SkippedRow {
                line,
                reason: format!("invalid amount {amount_raw:?}"),
            });
            continue;
        };

        if profile.debits_only && !amount.is_negative() {
            continue;
        }

        outcome.transactions.push(Transaction {
            date,
            description: text_field(&record, Some(profile.description_column)),
            location: text_field(&record, profile.location_column),
            operation: text_field(&record, profile.operation_column),
            amount,
        });
    }

    Ok(outcome)
}

pub fn read_statement_file(
    path: &Path,
    profile: &StatementProfile,
) -> Result<ImportOutcome, ImportError> {
    read_statement(File::open(path)?, profile)
}

fn text_field(record: &StringRecord, column: Option<usize>) -> Option<String> {
    column
        .and_then(|col| record.get(col))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn parse_amount(raw: &str, decimal_comma: bool) -> Option<Money> {
    if raw.is_empty() {
        return None;
    }
    let (negative, raw) = if raw.starts_with('(') && raw.ends_with(')') {
        (true, &raw[1..raw.len() - 1])
    } else {
        (false, raw)
    };
    let cleaned = raw.replace([' ', '\u{a0}'], "");
    let cleaned = if decimal_comma {
        cleaned.replace(',', ".")
    } else {
        cleaned.replace(',', "")
    };
    let mut dec = Decimal::from_str(&cleaned).ok()?;
    if negative {
        dec = -dec;
    }
    Some(Money::from_decimal(dec))
}
