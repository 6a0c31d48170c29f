use serde::{Deserialize, Serialize};

use super::color::Color;
use super::expense::Category;

/// A user-selectable time window, always anchored at "today".
///
/// `LastMonths(n)` is calendar-aligned: it covers `n` whole calendar
/// months ending with the current one, not a rolling n-times-30-days
/// cutoff. Both ends of every window are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeRange {
    /// The current calendar month
    ThisMonth,
    /// A trailing window of N calendar months, current month included
    LastMonths(u32),
    /// The current calendar year
    ThisYear,
}

impl std::fmt::Display for TimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimeRange::ThisMonth => write!(f, "This Month"),
            TimeRange::LastMonths(n) => write!(f, "{n} Months"),
            TimeRange::ThisYear => write!(f, "This Year"),
        }
    }
}

/// Totals for one time window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeSummary {
    /// The window this summary was computed for
    pub range: TimeRange,

    /// Sum of all expense amounts inside the window
    pub total: f64,

    /// Number of expenses inside the window
    pub count: usize,

    /// Daily burn rate: `total` divided by a fixed nominal day count
    /// for the range tier (30 / 92-style / 365). NOT a per-transaction
    /// mean, and deliberately blind to leap years and partial months.
    pub average: f64,
}

impl RangeSummary {
    /// The all-zero summary for an empty window.
    pub fn empty(range: TimeRange) -> Self {
        Self {
            range,
            total: 0.0,
            count: 0,
            average: 0.0,
        }
    }
}

/// One slice of the per-category spending breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryAggregate {
    /// The spending category
    pub category: Category,

    /// Sum of amounts for this category inside the window
    pub total_amount: f64,

    /// Share of the window total, 0..=100. Sums to 100 across all
    /// aggregates of a non-empty window (within float tolerance).
    pub percent: f64,

    /// Presentation color, assigned by sorted position. Can move to a
    /// different category when amounts reorder the breakdown.
    pub color: Color,
}

/// Lightweight all-time overview for the history screen.
///
/// Unlike the windowed summaries, `month_total` here counts records
/// with unreadable dates as if they were spent today (the
/// default-to-today parse fallback), so `count` and `overall_total`
/// always cover the whole list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseOverview {
    /// Total number of recorded expenses
    pub count: usize,

    /// Sum over all expenses, regardless of date
    pub overall_total: f64,

    /// Sum over the current calendar month
    pub month_total: f64,
}
