use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::money::Money;
use super::period::Month;

/// One cleaned statement record. The three text fields come straight from
/// the export and any of them may be absent; `amount` keeps the exported
/// sign (debits are negative).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: NaiveDate,
    pub description: Option<String>,
    pub location: Option<String>,
    pub operation: Option<String>,
    pub amount: Money,
}

impl Transaction {
    pub fn month(&self) -> Month {
        Month::from_date(self.date)
    }

    /// Absolute value of the amount, the figure the summary aggregates.
    pub fn magnitude(&self) -> Money {
        self.amount.abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(date: NaiveDate, cents: i64) -> Transaction {
        Transaction {
            date,
            description: Some("LIDL WARSZAWA".to_string()),
            location: None,
            operation: None,
            amount: Money::from_cents(cents),
        }
    }

    #[test]
    fn month_uses_year_and_month_only() {
        let t = tx(NaiveDate::from_ymd_opt(2024, 5, 31).unwrap(), -4550);
        assert_eq!(t.month(), Month::new(2024, 5).unwrap());
    }

    #[test]
    fn magnitude_of_debit_is_positive() {
        let t = tx(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(), -4550);
        assert_eq!(t.magnitude(), Money::from_cents(4550));
    }
}
