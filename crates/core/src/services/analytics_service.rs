use std::collections::HashMap;

use chrono::{Datelike, Months, NaiveDate};

use crate::models::analytics::{CategoryAggregate, ExpenseOverview, RangeSummary, TimeRange};
use crate::models::color::color_for_index;
use crate::models::expense::{Category, Expense};
use crate::services::date_service::DateService;

/// Nominal day counts for the daily burn rate.
///
/// These are fixed per range tier on purpose: the average is a rough
/// "spend per day" figure, not an exact division by elapsed days, so
/// leap years and partial first/last months are not corrected.
const NOMINAL_DAYS_MONTH: f64 = 30.0;
const NOMINAL_DAYS_YEAR: f64 = 365.0;

/// Computes windowed totals and per-category breakdowns over a raw
/// expense list.
///
/// Pure business logic, no I/O. Everything is recomputed in full on
/// each call; realistic lists hold hundreds of records, so there is
/// nothing worth caching incrementally.
///
/// Records whose date string cannot be parsed are excluded from every
/// window (a bad record must not invent spending in the current
/// month). The lone exception is `overview`, which keeps the older
/// default-to-today behavior for its month figure.
pub struct AnalyticsService {
    dates: DateService,
}

impl AnalyticsService {
    pub fn new() -> Self {
        Self {
            dates: DateService::new(),
        }
    }

    /// Whether `date` falls inside `range`, with `today` as the anchor.
    ///
    /// Pure function; both window ends are inclusive. `LastMonths(n)`
    /// is calendar-aligned: from the first day of the month n-1 months
    /// before today's month through the last day of today's month.
    pub fn in_range(&self, date: NaiveDate, range: TimeRange, today: NaiveDate) -> bool {
        match range {
            TimeRange::ThisMonth => {
                date.year() == today.year() && date.month() == today.month()
            }
            TimeRange::LastMonths(n) => {
                let window_start = self
                    .dates
                    .month_start(today)
                    .checked_sub_months(Months::new(n.saturating_sub(1)))
                    .unwrap_or(today);
                let window_end = self
                    .dates
                    .month_start(today)
                    .checked_add_months(Months::new(1))
                    .and_then(|d| d.pred_opt())
                    .unwrap_or(today);
                date >= window_start && date <= window_end
            }
            TimeRange::ThisYear => date.year() == today.year(),
        }
    }

    /// The expenses whose (parseable) date falls inside `range`.
    /// Unparseable dates are skipped.
    pub fn filter_by_range<'a>(
        &self,
        expenses: &'a [Expense],
        range: TimeRange,
        today: NaiveDate,
    ) -> Vec<&'a Expense> {
        expenses
            .iter()
            .filter(|e| {
                self.dates
                    .parse(&e.date)
                    .is_some_and(|date| self.in_range(date, range, today))
            })
            .collect()
    }

    /// Total, count, and daily burn rate for one window.
    /// An empty window yields all zeros (no division faults).
    pub fn summarize(
        &self,
        expenses: &[Expense],
        range: TimeRange,
        today: NaiveDate,
    ) -> RangeSummary {
        let filtered = self.filter_by_range(expenses, range, today);
        if filtered.is_empty() {
            return RangeSummary::empty(range);
        }

        let total: f64 = filtered.iter().map(|e| e.amount).sum();
        RangeSummary {
            range,
            total,
            count: filtered.len(),
            average: total / Self::nominal_days(range),
        }
    }

    /// Per-category totals and shares for one window, largest first.
    ///
    /// Grouping keeps first-encounter order for ties (the sort is
    /// stable), percentages close to 100 across the result, and colors
    /// are assigned by sorted position. A window whose overall total
    /// is zero or negative returns an empty list rather than a set of
    /// meaningless percentages.
    pub fn category_breakdown(
        &self,
        expenses: &[Expense],
        range: TimeRange,
        today: NaiveDate,
    ) -> Vec<CategoryAggregate> {
        let filtered = self.filter_by_range(expenses, range, today);

        // Group in first-encounter order so the later stable sort has
        // a deterministic tie-break.
        let mut order: Vec<Category> = Vec::new();
        let mut totals: HashMap<Category, f64> = HashMap::new();
        for expense in filtered {
            if !totals.contains_key(&expense.category) {
                order.push(expense.category);
            }
            *totals.entry(expense.category).or_insert(0.0) += expense.amount;
        }

        let window_total: f64 = totals.values().sum();
        if window_total <= 0.0 {
            return Vec::new();
        }

        let mut grouped: Vec<(Category, f64)> = order
            .into_iter()
            .map(|category| (category, totals[&category]))
            .collect();
        grouped.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        grouped
            .into_iter()
            .enumerate()
            .map(|(index, (category, total_amount))| CategoryAggregate {
                category,
                total_amount,
                percent: total_amount / window_total * 100.0,
                color: color_for_index(index),
            })
            .collect()
    }

    /// All-time overview for the history screen.
    ///
    /// This is the one aggregation that counts every record: a date
    /// that parses as nothing is treated as today, so the month figure
    /// may include records the windowed summaries skip.
    pub fn overview(&self, expenses: &[Expense], today: NaiveDate) -> ExpenseOverview {
        let overall_total: f64 = expenses.iter().map(|e| e.amount).sum();
        let month_total: f64 = expenses
            .iter()
            .filter(|e| {
                let date = self.dates.parse_or(&e.date, today);
                date.year() == today.year() && date.month() == today.month()
            })
            .map(|e| e.amount)
            .sum();

        ExpenseOverview {
            count: expenses.len(),
            overall_total,
            month_total,
        }
    }

    /// Fixed nominal day count for a range tier. `round(n * 30.5)`
    /// yields the traditional 92 for a quarter and 183 for half a year.
    fn nominal_days(range: TimeRange) -> f64 {
        match range {
            TimeRange::ThisMonth => NOMINAL_DAYS_MONTH,
            TimeRange::LastMonths(n) => (f64::from(n.max(1)) * 30.5).round(),
            TimeRange::ThisYear => NOMINAL_DAYS_YEAR,
        }
    }
}

impl Default for AnalyticsService {
    fn default() -> Self {
        Self::new()
    }
}
