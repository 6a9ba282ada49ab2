use std::collections::BTreeMap;

use grosz_classify::Classification;
use grosz_core::{Money, Month, Transaction};

/// Synthetic per-row sum column, always last.
pub const TOTAL_COLUMN: &str = "Total";

/// If this category occurs it is moved immediately before `Total`; every
/// other column keeps its first-seen position.
pub const MISCELLANEOUS: &str = "Miscellaneous";

const MONTH_COLUMN: &str = "Month";

/// Month x category table of summed debit magnitudes. Cell values stay
/// exact `Money` sums; two-decimal strings exist only in the rendered rows.
#[derive(Debug, Clone, Default)]
pub struct MonthlySummary {
    /// Categories in first-seen order, before the Miscellaneous reshuffle.
    categories: Vec<String>,
    cells: BTreeMap<Month, BTreeMap<String, Money>>,
}

impl MonthlySummary {
    fn add(&mut self, month: Month, category: &str, amount: Money) {
        if !self.categories.iter().any(|c| c == category) {
            self.categories.push(category.to_string());
        }
        let row = self.cells.entry(month).or_default();
        let cell = row.entry(category.to_string()).or_insert_with(Money::zero);
        *cell = *cell + amount;
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Months with at least one matched transaction, oldest first.
    pub fn months(&self) -> Vec<Month> {
        self.cells.keys().copied().collect()
    }

    /// Category columns in output order: first-seen, except Miscellaneous
    /// which is relocated to the end (immediately before Total).
    pub fn columns(&self) -> Vec<&str> {
        let mut columns: Vec<&str> = self
            .categories
            .iter()
            .map(String::as_str)
            .filter(|c| *c != MISCELLANEOUS)
            .collect();
        if self.categories.iter().any(|c| c == MISCELLANEOUS) {
            columns.push(MISCELLANEOUS);
        }
        columns
    }

    pub fn cell(&self, month: Month, category: &str) -> Money {
        self.cells
            .get(&month)
            .and_then(|row| row.get(category))
            .copied()
            .unwrap_or_else(Money::zero)
    }

    /// Exact sum of the row's category cells. Rounded only when rendered.
    pub fn row_total(&self, month: Month) -> Money {
        self.cells
            .get(&month)
            .map(|row| row.values().fold(Money::zero(), |acc, v| acc + *v))
            .unwrap_or_else(Money::zero)
    }

    pub fn header(&self) -> Vec<String> {
        let mut header = vec![MONTH_COLUMN.to_string()];
        header.extend(self.columns().iter().map(|c| c.to_string()));
        header.push(TOTAL_COLUMN.to_string());
        header
    }

    /// Rendered rows matching `header()`, every numeric cell formatted to
    /// exactly two decimals.
    pub fn rows(&self) -> Vec<Vec<String>> {
        let columns = self.columns();
        self.cells
            .keys()
            .map(|&month| {
                let mut row = Vec::with_capacity(columns.len() + 2);
                row.push(month.to_string());
                for category in &columns {
                    row.push(self.cell(month, category).to_string());
                }
                row.push(self.row_total(month).to_string());
                row
            })
            .collect()
    }
}

/// Fold classified transactions into the monthly summary, splitting off the
/// unmatched ones. Matched amounts contribute their absolute value; the
/// unmatched list keeps each transaction verbatim, original sign included,
/// and never reaches the table.
pub fn aggregate(entries: &[(Transaction, Classification)]) -> (MonthlySummary, Vec<Transaction>) {
    let mut summary = MonthlySummary::default();
    let mut unmatched = Vec::new();

    for (tx, classification) in entries {
        match classification {
            Classification::Matched { category, .. } => {
                summary.add(tx.month(), category, tx.magnitude());
            }
            Classification::Unmatched => unmatched.push(tx.clone()),
        }
    }

    (summary, unmatched)
}
