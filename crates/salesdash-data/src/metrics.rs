//! Monthly aggregation and summary metrics

use crate::{SaleRecord, YearMonth};
use salesdash_common::{DashError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// Month-over-month change of a monthly total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Growth {
    /// First month of the sequence; nothing to compare against
    Baseline,
    /// Percent change from the previous month
    Change(f64),
    /// The previous month sold nothing, so no percentage exists
    Undefined,
}

impl Growth {
    /// Growth between two consecutive monthly totals
    #[must_use]
    pub fn between(previous: f64, current: f64) -> Self {
        if previous == 0.0 {
            return Self::Undefined;
        }
        let pct = (current / previous - 1.0) * 100.0;
        if pct.is_finite() {
            Self::Change(pct)
        } else {
            Self::Undefined
        }
    }

    /// The percentage, when one exists
    #[must_use]
    pub const fn percent(self) -> Option<f64> {
        match self {
            Self::Change(pct) => Some(pct),
            Self::Baseline | Self::Undefined => None,
        }
    }
}

/// Sales of one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyAggregate {
    /// The month
    pub month: YearMonth,
    /// Sum of the month's sales
    pub total_sales: f64,
    /// Change from the preceding row
    pub growth: Growth,
}

/// Headline figures over the filtered records.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryMetrics {
    /// Sum of every filtered sale
    pub grand_total: f64,
    /// Mean of the monthly totals; `None` without months
    pub monthly_average: Option<f64>,
    /// Last month against first month, in percent.
    ///
    /// `Some(0.0)` with fewer than two months, `None` when the first month
    /// sold nothing.
    pub overall_growth_pct: Option<f64>,
}

/// Monthly rows plus summary; the unit that gets memoized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsReport {
    /// One row per month present, ascending
    pub monthly: Vec<MonthlyAggregate>,
    /// Headline figures
    pub summary: SummaryMetrics,
}

impl MetricsReport {
    /// Report of an empty selection
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            monthly: Vec::new(),
            summary: SummaryMetrics {
                grand_total: 0.0,
                monthly_average: None,
                overall_growth_pct: Some(0.0),
            },
        }
    }

    /// Whether no month is present
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.monthly.is_empty()
    }
}

/// Groups records by month and derives the summary figures.
#[derive(Debug, Default, Clone, Copy)]
pub struct MetricsAggregator;

impl MetricsAggregator {
    /// Create an aggregator
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Aggregate `records`, which need not be sorted.
    ///
    /// Fails only when a total stops being a finite number.
    #[instrument(skip(self, records))]
    pub fn aggregate<'a, I>(&self, records: I) -> Result<MetricsReport>
    where
        I: IntoIterator<Item = &'a SaleRecord>,
    {
        let mut by_month: BTreeMap<YearMonth, f64> = BTreeMap::new();
        let mut grand_total = 0.0;
        let mut count = 0usize;

        for record in records {
            *by_month.entry(record.month()).or_insert(0.0) += record.total_sale;
            grand_total += record.total_sale;
            count += 1;
        }

        if !grand_total.is_finite() {
            return Err(DashError::computation(format!(
                "grand total of {count} records is not finite"
            )));
        }
        if let Some((month, _)) = by_month.iter().find(|(_, total)| !total.is_finite()) {
            return Err(DashError::computation(format!(
                "total for {month} is not finite"
            )));
        }

        let monthly: Vec<MonthlyAggregate> = by_month
            .iter()
            .scan(None, |previous: &mut Option<f64>, (&month, &total_sales)| {
                let growth = previous.map_or(Growth::Baseline, |prev| Growth::between(prev, total_sales));
                *previous = Some(total_sales);
                Some(MonthlyAggregate {
                    month,
                    total_sales,
                    growth,
                })
            })
            .collect();

        let summary = SummaryMetrics {
            grand_total,
            monthly_average: monthly_average(&monthly),
            overall_growth_pct: overall_growth(&monthly),
        };

        debug!(records = count, months = monthly.len(), "Aggregated monthly sales");
        Ok(MetricsReport { monthly, summary })
    }
}

#[allow(clippy::cast_precision_loss)]
fn monthly_average(monthly: &[MonthlyAggregate]) -> Option<f64> {
    if monthly.is_empty() {
        return None;
    }
    let sum: f64 = monthly.iter().map(|m| m.total_sales).sum();
    Some(sum / monthly.len() as f64)
}

fn overall_growth(monthly: &[MonthlyAggregate]) -> Option<f64> {
    match monthly {
        [] | [_] => Some(0.0),
        [first, .., last] => Growth::between(first.total_sales, last.total_sales).percent(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use salesdash_common::test_utils::assert_approx_eq;

    fn record(y: i32, m: u32, d: u32, total: f64) -> SaleRecord {
        SaleRecord::new(NaiveDate::from_ymd_opt(y, m, d).unwrap(), "A", total, "")
    }

    #[test]
    fn test_three_month_example() {
        let records = vec![
            record(2024, 1, 15, 100.0),
            record(2024, 2, 10, 150.0),
            record(2024, 3, 5, 75.0),
        ];
        let report = MetricsAggregator::new().aggregate(&records).unwrap();

        let months: Vec<String> = report.monthly.iter().map(|m| m.month.to_string()).collect();
        assert_eq!(months, vec!["2024-01", "2024-02", "2024-03"]);
        assert_eq!(report.monthly[0].growth, Growth::Baseline);
        assert_approx_eq(report.monthly[1].growth.percent().unwrap(), 50.0, 1e-9);
        assert_approx_eq(report.monthly[2].growth.percent().unwrap(), -50.0, 1e-9);

        assert_approx_eq(report.summary.grand_total, 325.0, 1e-9);
        assert_approx_eq(report.summary.monthly_average.unwrap(), 108.333_333, 1e-5);
        assert_approx_eq(report.summary.overall_growth_pct.unwrap(), -25.0, 1e-9);
    }

    #[test]
    fn test_unsorted_input_groups_by_month() {
        let records = vec![
            record(2024, 3, 5, 5.0),
            record(2024, 1, 1, 1.0),
            record(2024, 3, 20, 5.0),
            record(2023, 12, 31, 2.0),
        ];
        let report = MetricsAggregator::new().aggregate(&records).unwrap();
        let totals: Vec<(String, f64)> = report
            .monthly
            .iter()
            .map(|m| (m.month.to_string(), m.total_sales))
            .collect();
        // no row for the missing February
        assert_eq!(
            totals,
            vec![
                ("2023-12".to_string(), 2.0),
                ("2024-01".to_string(), 1.0),
                ("2024-03".to_string(), 10.0),
            ]
        );
    }

    #[test]
    fn test_zero_month_gives_undefined_growth() {
        let records = vec![record(2024, 1, 10, 0.0), record(2024, 2, 10, 50.0)];
        let report = MetricsAggregator::new().aggregate(&records).unwrap();

        assert_eq!(report.monthly[1].growth, Growth::Undefined);
        assert_eq!(report.monthly[1].growth.percent(), None);
        assert_eq!(report.summary.overall_growth_pct, None);
    }

    #[test]
    fn test_zero_to_zero_is_undefined() {
        assert_eq!(Growth::between(0.0, 0.0), Growth::Undefined);
        assert_eq!(Growth::between(10.0, 0.0), Growth::Change(-100.0));
    }

    #[test]
    fn test_empty_input() {
        let report = MetricsAggregator::new().aggregate(&Vec::<SaleRecord>::new()).unwrap();
        assert!(report.is_empty());
        assert_eq!(report.summary.grand_total, 0.0);
        assert_eq!(report.summary.monthly_average, None);
        assert_eq!(report.summary.overall_growth_pct, Some(0.0));
        assert_eq!(report, MetricsReport::empty());
    }

    #[test]
    fn test_single_month() {
        let records = vec![record(2024, 5, 1, 10.0), record(2024, 5, 2, 20.0)];
        let report = MetricsAggregator::new().aggregate(&records).unwrap();
        assert_eq!(report.monthly.len(), 1);
        assert_eq!(report.summary.overall_growth_pct, Some(0.0));
        assert_approx_eq(report.summary.monthly_average.unwrap(), 30.0, 1e-9);
    }

    #[test]
    fn test_overflow_is_computation_error() {
        let records = vec![record(2024, 1, 1, f64::MAX), record(2024, 1, 2, f64::MAX)];
        let err = MetricsAggregator::new().aggregate(&records).unwrap_err();
        assert!(matches!(err, DashError::Computation { .. }));
    }
}
