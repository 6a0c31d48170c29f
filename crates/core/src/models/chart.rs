use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One calendar-month slot in the spending time series.
///
/// The core computes the numbers; the frontend just renders. A series
/// always contains every month of its window in chronological order;
/// months with no spending carry an explicit zero instead of being
/// dropped, so chart axes stay fixed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartBucket {
    /// Three-letter month abbreviation (e.g. "Jan"), for the x axis
    pub label: String,

    /// First day of the bucket's month
    pub period_start: NaiveDate,

    /// Sum of expense amounts dated inside this month
    pub total_amount: f64,
}
