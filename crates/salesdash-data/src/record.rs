//! Sale records and the dataset of one upload

use crate::YearMonth;
use chrono::{Datelike, NaiveDate};
use salesdash_common::ContentDigest;
use serde::{Deserialize, Serialize};

/// One row of the sales file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleRecord {
    /// Sale date
    pub date: NaiveDate,
    /// Product label
    pub product: String,
    /// Non-negative amount
    pub total_sale: f64,
    /// Year of `date`
    pub year: i32,
    /// Month of `date`, 1 to 12
    pub month_number: u32,
    /// Localized weekday of `date`
    pub weekday_name: String,
}

impl SaleRecord {
    /// Build a record, deriving the calendar fields from `date`.
    pub fn new(
        date: NaiveDate,
        product: impl Into<String>,
        total_sale: f64,
        weekday_name: impl Into<String>,
    ) -> Self {
        Self {
            date,
            product: product.into(),
            total_sale,
            year: date.year(),
            month_number: date.month(),
            weekday_name: weekday_name.into(),
        }
    }

    /// Calendar month of the sale
    #[must_use]
    pub fn month(&self) -> YearMonth {
        YearMonth {
            year: self.year,
            month: self.month_number,
        }
    }
}

/// The records of one upload, in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    digest: ContentDigest,
    records: Vec<SaleRecord>,
}

impl Dataset {
    /// Wrap loaded records
    #[must_use]
    pub const fn new(digest: ContentDigest, records: Vec<SaleRecord>) -> Self {
        Self { digest, records }
    }

    /// Digest of the bytes the records were parsed from
    #[must_use]
    pub const fn digest(&self) -> ContentDigest {
        self.digest
    }

    /// All records in file order
    #[must_use]
    pub fn records(&self) -> &[SaleRecord] {
        &self.records
    }

    /// Number of records
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the upload had no data rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct products in order of first appearance
    #[must_use]
    pub fn products(&self) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        self.records
            .iter()
            .filter(|r| seen.insert(r.product.as_str()))
            .map(|r| r.product.clone())
            .collect()
    }

    /// Earliest and latest sale date
    #[must_use]
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let min = self.records.iter().map(|r| r.date).min()?;
        let max = self.records.iter().map(|r| r.date).max()?;
        Some((min, max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_derived_fields() {
        let record = SaleRecord::new(date(2024, 2, 10), "A", 150.0, "Sábado");
        assert_eq!(record.year, 2024);
        assert_eq!(record.month_number, 2);
        assert_eq!(record.month().to_string(), "2024-02");
    }

    #[test]
    fn test_products_and_bounds() {
        let dataset = Dataset::new(
            ContentDigest::of(b"x"),
            vec![
                SaleRecord::new(date(2024, 3, 1), "B", 1.0, ""),
                SaleRecord::new(date(2024, 1, 1), "A", 1.0, ""),
                SaleRecord::new(date(2024, 2, 1), "B", 1.0, ""),
            ],
        );

        assert_eq!(dataset.products(), vec!["B".to_string(), "A".to_string()]);
        assert_eq!(dataset.date_bounds(), Some((date(2024, 1, 1), date(2024, 3, 1))));
        assert_eq!(dataset.len(), 3);
    }

    #[test]
    fn test_empty_dataset() {
        let dataset = Dataset::new(ContentDigest::of(b""), Vec::new());
        assert!(dataset.is_empty());
        assert!(dataset.products().is_empty());
        assert_eq!(dataset.date_bounds(), None);
    }
}
