//! Product and date-range filtering

use crate::{Dataset, SaleRecord};
use chrono::NaiveDate;
use salesdash_common::ContentDigest;
use std::collections::BTreeSet;
use std::fmt;

/// Memo key of a filtered view: upload digest plus selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SelectionFingerprint(pub blake3::Hash);

impl fmt::Display for SelectionFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_hex()[..12])
    }
}

/// Allowed products and an inclusive date range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Products to keep
    pub products: BTreeSet<String>,
    /// First day kept
    pub start: NaiveDate,
    /// Last day kept
    pub end: NaiveDate,
}

impl Selection {
    /// Build a selection
    pub fn new<I, S>(products: I, start: NaiveDate, end: NaiveDate) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            products: products.into_iter().map(Into::into).collect(),
            start,
            end,
        }
    }

    /// Every product over the whole date span of `dataset`
    #[must_use]
    pub fn all(dataset: &Dataset) -> Self {
        let (start, end) = dataset
            .date_bounds()
            .unwrap_or((NaiveDate::MIN, NaiveDate::MAX));
        Self::new(dataset.products(), start, end)
    }

    /// Whether `record` passes the filter
    #[must_use]
    pub fn matches(&self, record: &SaleRecord) -> bool {
        record.date >= self.start && record.date <= self.end && self.products.contains(&record.product)
    }

    /// Records passing the filter, in their original order.
    ///
    /// An empty product set or an inverted range keeps nothing.
    #[must_use]
    pub fn apply<'a>(&self, records: &'a [SaleRecord]) -> Vec<&'a SaleRecord> {
        records.iter().filter(|r| self.matches(r)).collect()
    }

    /// Content-addressed key of this selection over the upload `digest`
    #[must_use]
    pub fn fingerprint(&self, digest: ContentDigest) -> SelectionFingerprint {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&digest.0);
        hasher.update(&(self.products.len() as u64).to_le_bytes());
        for product in &self.products {
            hasher.update(&(product.len() as u64).to_le_bytes());
            hasher.update(product.as_bytes());
        }
        hasher.update(self.start.to_string().as_bytes());
        hasher.update(b"..");
        hasher.update(self.end.to_string().as_bytes());
        SelectionFingerprint(hasher.finalize())
    }
}
