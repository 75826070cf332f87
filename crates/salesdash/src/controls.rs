//! User-facing filter controls and their defaults

use chrono::NaiveDate;
use salesdash_data::{Dataset, Selection};

/// Product and date choices as the user left them.
///
/// `None` means "not touched": every product, and the first or last sale
/// date of the loaded data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterControls {
    pub products: Option<Vec<String>>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl FilterControls {
    /// Controls from command-line values; an empty product list means all
    #[must_use]
    pub fn new(products: Vec<String>, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self {
            products: (!products.is_empty()).then_some(products),
            start,
            end,
        }
    }

    /// Fill the untouched controls from `dataset`
    #[must_use]
    pub fn resolve(&self, dataset: &Dataset) -> Selection {
        let defaults = Selection::all(dataset);
        Selection {
            products: self
                .products
                .as_ref()
                .map_or(defaults.products, |p| p.iter().cloned().collect()),
            start: self.start.unwrap_or(defaults.start),
            end: self.end.unwrap_or(defaults.end),
        }
    }
}
