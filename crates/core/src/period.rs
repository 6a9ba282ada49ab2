use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Calendar month, the grouping key for summary rows. Ordering is
/// chronological, so a `BTreeMap<Month, _>` iterates oldest-first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Month {
    year: i32,
    month: u32,
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Month {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if (1..=12).contains(&month) {
            Some(Month { year, month })
        } else {
            None
        }
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Month {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(self) -> i32 {
        self.year
    }

    pub fn month(self) -> u32 {
        self.month
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_zero_pads() {
        assert_eq!(Month::new(2024, 3).unwrap().to_string(), "2024-03");
        assert_eq!(Month::new(2024, 11).unwrap().to_string(), "2024-11");
    }

    #[test]
    fn new_rejects_out_of_range() {
        assert!(Month::new(2024, 0).is_none());
        assert!(Month::new(2024, 13).is_none());
        assert!(Month::new(2024, 12).is_some());
    }

    #[test]
    fn from_date_drops_day() {
        let date = NaiveDate::from_ymd_opt(2024, 7, 19).unwrap();
        assert_eq!(Month::from_date(date), Month::new(2024, 7).unwrap());
    }

    #[test]
    fn ordering_is_chronological() {
        let dec_23 = Month::new(2023, 12).unwrap();
        let jan_24 = Month::new(2024, 1).unwrap();
        let feb_24 = Month::new(2024, 2).unwrap();
        assert!(dec_23 < jan_24);
        assert!(jan_24 < feb_24);
    }
}
