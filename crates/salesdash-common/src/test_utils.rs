//! Test utilities and shared fixtures for the dashboard crates.
//!
//! Available to this crate's own tests and, through the `testing` feature,
//! to the other crates in the workspace.

use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

static INIT: Once = Once::new();

/// Initialize logging for tests. Safe to call from every test.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        let _ = fmt().with_test_writer().with_env_filter(filter).try_init();
    });
}

/// Create a temporary directory that is removed on drop.
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Assert that two floating point numbers are approximately equal within a tolerance.
pub fn assert_approx_eq(left: f64, right: f64, tolerance: f64) {
    let diff = (left - right).abs();
    assert!(
        diff <= tolerance,
        "assertion failed: `{left}` is not approximately equal to `{right}` (tolerance: {tolerance}, diff: {diff})"
    );
}

/// Sales CSV inputs.
pub mod csv_fixtures {
    /// The three-month single-product example: 100, 150, 75.
    pub const THREE_MONTHS: &str = "\
Data,Produto,Venda_Total
2024-01-15,A,100
2024-02-10,A,150
2024-03-05,A,75
";

    /// Two products over four months, with an extra column and shuffled order.
    pub const MULTI_PRODUCT: &str = "\
Regiao,Venda_Total,Produto,Data
Sul,100.0,Camiseta,2024-01-03
Norte,40.5,Boné,2024-01-20
Sul,80.0,Camiseta,2024-02-11
Sul,60.0,Boné,2024-02-28
Leste,120.0,Camiseta,2024-03-09
Oeste,0.5,Boné,2024-04-01
";

    /// Semicolon-separated export with Brazilian number formatting.
    pub const BRAZILIAN_EXPORT: &str = "\
Data;Produto;Venda_Total
15/01/2024;Caneca;R$ 1.234,56
20/02/2024;Caneca;R$ 99,90
";

    /// A month with no sales followed by one with sales.
    pub const ZERO_THEN_SALES: &str = "\
Data,Produto,Venda_Total
2024-01-10,A,0
2024-02-10,A,50
";

    /// Header only.
    pub const HEADER_ONLY: &str = "Data,Produto,Venda_Total\n";

    /// The `Produto` column is absent.
    pub const MISSING_PRODUCT: &str = "\
Data,Venda_Total
2024-01-15,100
";

    /// The second data row carries an unparseable date.
    pub const BAD_DATE: &str = "\
Data,Produto,Venda_Total
2024-01-15,A,100
ontem,A,150
";
}

/// Configuration inputs.
pub mod config_fixtures {
    /// Minimal valid configuration: every section falls back to defaults.
    pub const MINIMAL_YAML: &str = "data:\n  locale: pt-BR\n";

    /// A configuration touching every section.
    pub const FULL_YAML: &str = r##"
data:
  locale: en-US
  delimiter: ";"
  day_first: true
  currency_symbol: "US$"
  preview_rows: 5

charts:
  width: 800
  height: 400
  combined_height: 500
  style:
    font_family: "DejaVu Sans"
    title_size: 24
    label_size: 14
    grid: false
    grid_opacity: 0.2
    background: "#ffffff"
    line_color: "#1f77b4"
    bar_color: "#87ceeb"
    positive_color: "#2ca02c"
    negative_color: "#d62728"
    growth_line_color: "#ff7f0e"

cache:
  max_datasets: 4
  max_reports: 32

logging:
  level: debug
  format: compact

output:
  directory: "out"
"##;
}

/// Property-based testing strategies.
pub mod property_testing {
    use chrono::NaiveDate;
    use proptest::prelude::*;

    /// A date in 2022-2024, so that several months and years appear.
    pub fn date_strategy() -> impl Strategy<Value = NaiveDate> {
        (0i64..(3 * 365)).prop_map(|offset| {
            NaiveDate::from_ymd_opt(2022, 1, 1).expect("valid epoch") + chrono::Duration::days(offset)
        })
    }

    /// One of a handful of product labels.
    pub fn product_strategy() -> impl Strategy<Value = String> {
        prop::sample::select(vec!["Camiseta", "Boné", "Caneca", "Meia"]).prop_map(String::from)
    }

    /// A sale amount in cents precision, from zero to ten thousand.
    pub fn amount_strategy() -> impl Strategy<Value = f64> {
        (0u32..1_000_000).prop_map(|cents| f64::from(cents) / 100.0)
    }

    /// A list of `(date, product, amount)` rows.
    pub fn rows_strategy(max_len: usize) -> impl Strategy<Value = Vec<(NaiveDate, String, f64)>> {
        prop::collection::vec(
            (date_strategy(), product_strategy(), amount_strategy()),
            0..max_len,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_init_logging_multiple_calls() {
        init_test_logging();
        init_test_logging();
    }

    #[test]
    fn test_assert_approx_eq() {
        assert_approx_eq(1.0, 1.0001, 0.001);
        assert_approx_eq(108.333, 325.0 / 3.0, 0.001);
    }

    #[test]
    #[should_panic]
    fn test_assert_approx_eq_fails() {
        assert_approx_eq(1.0, 1.1, 0.05);
    }

    #[test]
    fn test_fixtures_have_required_header() {
        for fixture in [
            csv_fixtures::THREE_MONTHS,
            csv_fixtures::MULTI_PRODUCT,
            csv_fixtures::ZERO_THEN_SALES,
            csv_fixtures::HEADER_ONLY,
        ] {
            let header = fixture.lines().next().unwrap();
            for column in ["Data", "Produto", "Venda_Total"] {
                assert!(header.contains(column), "{column} missing from {header}");
            }
        }
    }

    #[test]
    fn test_temp_dir_is_removed() {
        let dir = create_temp_dir();
        let path = dir.path().to_path_buf();
        assert!(path.exists());
        drop(dir);
        assert!(!path.exists());
    }

    proptest! {
        #[test]
        fn test_property_amounts_are_non_negative(amount in property_testing::amount_strategy()) {
            prop_assert!(amount >= 0.0);
            prop_assert!(amount.is_finite());
        }
    }
}
