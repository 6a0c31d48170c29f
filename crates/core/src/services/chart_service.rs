use chrono::{Months, NaiveDate};

use crate::models::chart::ChartBucket;
use crate::models::expense::Expense;
use crate::services::date_service::DateService;

/// Builds the fixed monthly spending series for the dashboard chart.
///
/// The window is `months_back + 1` consecutive calendar months ending
/// at the current one. Every month in the window gets a bucket, in
/// ascending order, even when its total is zero; the chart's x axis
/// never shifts with the data.
pub struct ChartService {
    dates: DateService,
}

impl ChartService {
    pub fn new() -> Self {
        Self {
            dates: DateService::new(),
        }
    }

    /// One zero-filled bucket per calendar month, oldest first,
    /// current month last.
    ///
    /// Expenses are dropped into the bucket matching their parsed
    /// year+month. Records with unreadable dates are left out of the
    /// chart entirely (this path never substitutes today), as are
    /// records dated outside the window.
    pub fn monthly_series(
        &self,
        expenses: &[Expense],
        months_back: u32,
        today: NaiveDate,
    ) -> Vec<ChartBucket> {
        let current_month = self.dates.month_start(today);
        let first_month = current_month
            .checked_sub_months(Months::new(months_back))
            .unwrap_or(current_month);

        let mut buckets: Vec<ChartBucket> = Vec::with_capacity(months_back as usize + 1);
        for offset in 0..=months_back {
            let period_start = match first_month.checked_add_months(Months::new(offset)) {
                Some(date) => date,
                None => break,
            };
            buckets.push(ChartBucket {
                label: period_start.format("%b").to_string(),
                period_start,
                total_amount: 0.0,
            });
        }

        for expense in expenses {
            let Some(date) = self.dates.parse(&expense.date) else {
                continue;
            };
            let month = self.dates.month_start(date);
            if let Some(bucket) = buckets.iter_mut().find(|b| b.period_start == month) {
                bucket.total_amount += expense.amount;
            }
        }

        buckets
    }
}

impl Default for ChartService {
    fn default() -> Self {
        Self::new()
    }
}
