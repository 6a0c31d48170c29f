pub mod errors;
pub mod models;
pub mod providers;
pub mod services;

use chrono::NaiveDate;
use tracing::{info, warn};

use errors::CoreError;
use models::analytics::{CategoryAggregate, ExpenseOverview, RangeSummary, TimeRange};
use models::chart::ChartBucket;
use models::expense::{Category, Expense, ExpenseSortOrder};
use models::settings::Settings;
use providers::traits::ExpenseProvider;
use services::analytics_service::AnalyticsService;
use services::chart_service::ChartService;
use services::date_service::DateService;

/// Outcome of the most recent expense fetch.
///
/// This is the single source of truth for what the UI may show:
/// a spinner (`Loading`), the data (`Ready`), or the upstream error
/// message verbatim (`Failed`). Derived analytics exist only in the
/// `Ready` state; after a failure there is nothing stale to read.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState {
    /// Nothing requested yet
    Idle,
    /// A fetch is in flight
    Loading,
    /// The full expense list, as delivered by the provider
    Ready(Vec<Expense>),
    /// The fetch failed; holds the upstream message for display
    Failed(String),
}

/// Everything derived from `(expenses, selected range, today)`.
///
/// Rebuilt in full whenever any of the three inputs changes. The
/// struct is a plain value: observers read a consistent snapshot and
/// never see a half-updated mix of old and new numbers.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsSnapshot {
    /// Current calendar month tier
    pub monthly: RangeSummary,

    /// Trailing "recent" tier (3 calendar months by default)
    pub recent: RangeSummary,

    /// Current calendar year tier
    pub yearly: RangeSummary,

    /// Summary for whatever range is currently selected
    pub active: RangeSummary,

    /// Per-category breakdown of the selected range, largest first
    pub breakdown: Vec<CategoryAggregate>,

    /// Fixed monthly series for the spending chart (6 months default)
    pub chart: Vec<ChartBucket>,

    /// All-time history overview (count, overall and month totals)
    pub overview: ExpenseOverview,
}

/// Main entry point for the ExpenseFlow core library.
///
/// Owns the fetched expense list, the selected time range, and the
/// derived analytics. The caller injects "today" explicitly (at
/// construction and via `set_today`); aggregation never reads the
/// system clock, which keeps every computation reproducible in tests.
///
/// Single-writer: one caller context mutates this, any number of
/// observers read the snapshot between mutations.
#[must_use]
pub struct ExpenseFlow {
    settings: Settings,
    today: NaiveDate,
    selected_range: TimeRange,
    fetch: FetchState,
    snapshot: Option<AnalyticsSnapshot>,
    analytics_service: AnalyticsService,
    chart_service: ChartService,
    date_service: DateService,
}

impl std::fmt::Debug for ExpenseFlow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = match &self.fetch {
            FetchState::Idle => "Idle".to_string(),
            FetchState::Loading => "Loading".to_string(),
            FetchState::Ready(expenses) => format!("Ready({} expenses)", expenses.len()),
            FetchState::Failed(msg) => format!("Failed({msg})"),
        };
        f.debug_struct("ExpenseFlow")
            .field("state", &state)
            .field("selected_range", &self.selected_range)
            .field("today", &self.today)
            .finish()
    }
}

impl ExpenseFlow {
    /// Create a fresh tracker with default settings. `today` is the
    /// device-local calendar date.
    pub fn new(today: NaiveDate) -> Self {
        Self::with_settings(Settings::default(), today)
    }

    pub fn with_settings(settings: Settings, today: NaiveDate) -> Self {
        Self {
            settings,
            today,
            selected_range: TimeRange::ThisMonth,
            fetch: FetchState::Idle,
            snapshot: None,
            analytics_service: AnalyticsService::new(),
            chart_service: ChartService::new(),
            date_service: DateService::new(),
        }
    }

    // ── Fetch State Machine ─────────────────────────────────────────

    /// Mark a fetch as in flight. Clears any previous snapshot so
    /// observers can't read data that is about to be superseded.
    pub fn begin_loading(&mut self) {
        self.fetch = FetchState::Loading;
        self.snapshot = None;
    }

    /// Deliver a fetched expense list and recompute all analytics.
    pub fn on_expenses_loaded(&mut self, expenses: Vec<Expense>) {
        self.fetch = FetchState::Ready(expenses);
        self.recompute();
    }

    /// Record a fetch failure. Analytics become unavailable (not
    /// zeroed, not stale) until a later fetch succeeds.
    pub fn on_fetch_failed(&mut self, message: impl Into<String>) {
        self.fetch = FetchState::Failed(message.into());
        self.snapshot = None;
    }

    /// Drive a full fetch through a provider: loading, then ready or
    /// failed. The error is both recorded in the state and returned.
    pub async fn load_expenses(
        &mut self,
        provider: &dyn ExpenseProvider,
    ) -> Result<(), CoreError> {
        self.begin_loading();
        match provider.fetch_expenses().await {
            Ok(expenses) => {
                info!(
                    "loaded {} expenses from provider {}",
                    expenses.len(),
                    provider.name()
                );
                self.on_expenses_loaded(expenses);
                Ok(())
            }
            Err(e) => {
                warn!("expense fetch via {} failed: {e}", provider.name());
                self.on_fetch_failed(e.to_string());
                Err(e)
            }
        }
    }

    /// Persist a new expense through the provider and fold the stored
    /// record (now carrying its backend id) into the loaded list.
    pub async fn add_expense(
        &mut self,
        provider: &dyn ExpenseProvider,
        expense: Expense,
    ) -> Result<Expense, CoreError> {
        let created = provider.create_expense(&expense).await?;
        if let FetchState::Ready(expenses) = &mut self.fetch {
            expenses.push(created.clone());
            self.recompute();
        }
        Ok(created)
    }

    // ── Range Selection ─────────────────────────────────────────────

    /// Switch the selected time range. Selecting the range that is
    /// already active is a no-op; nothing is recomputed.
    pub fn set_range(&mut self, range: TimeRange) {
        if self.selected_range == range {
            return;
        }
        self.selected_range = range;
        self.recompute();
    }

    /// Move the "today" anchor (e.g. the app stayed open past
    /// midnight). All windows and the chart re-anchor to the new date.
    pub fn set_today(&mut self, today: NaiveDate) {
        if self.today == today {
            return;
        }
        self.today = today;
        self.recompute();
    }

    #[must_use]
    pub fn selected_range(&self) -> TimeRange {
        self.selected_range
    }

    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.today
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    // ── Derived Views ───────────────────────────────────────────────

    #[must_use]
    pub fn state(&self) -> &FetchState {
        &self.fetch
    }

    /// The upstream failure message, if the last fetch failed.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        match &self.fetch {
            FetchState::Failed(msg) => Some(msg),
            _ => None,
        }
    }

    /// The loaded expense list. `None` while nothing is loaded, which
    /// is distinct from an empty list (a valid, zero-expense result).
    #[must_use]
    pub fn expenses(&self) -> Option<&[Expense]> {
        match &self.fetch {
            FetchState::Ready(expenses) => Some(expenses),
            _ => None,
        }
    }

    /// The full derived snapshot, when data is available.
    #[must_use]
    pub fn analytics(&self) -> Option<&AnalyticsSnapshot> {
        self.snapshot.as_ref()
    }

    /// Total spend in the selected range.
    #[must_use]
    pub fn active_total(&self) -> Option<f64> {
        self.snapshot.as_ref().map(|s| s.active.total)
    }

    /// Daily burn rate of the selected range.
    #[must_use]
    pub fn active_average(&self) -> Option<f64> {
        self.snapshot.as_ref().map(|s| s.active.average)
    }

    /// Number of expenses in the selected range.
    #[must_use]
    pub fn active_count(&self) -> Option<usize> {
        self.snapshot.as_ref().map(|s| s.active.count)
    }

    #[must_use]
    pub fn monthly_summary(&self) -> Option<&RangeSummary> {
        self.snapshot.as_ref().map(|s| &s.monthly)
    }

    #[must_use]
    pub fn recent_summary(&self) -> Option<&RangeSummary> {
        self.snapshot.as_ref().map(|s| &s.recent)
    }

    #[must_use]
    pub fn yearly_summary(&self) -> Option<&RangeSummary> {
        self.snapshot.as_ref().map(|s| &s.yearly)
    }

    /// Per-category breakdown of the selected range, largest first.
    #[must_use]
    pub fn category_breakdown(&self) -> Option<&[CategoryAggregate]> {
        self.snapshot.as_ref().map(|s| s.breakdown.as_slice())
    }

    /// The fixed monthly chart series.
    #[must_use]
    pub fn chart_series(&self) -> Option<&[ChartBucket]> {
        self.snapshot.as_ref().map(|s| s.chart.as_slice())
    }

    /// All-time history overview.
    #[must_use]
    pub fn overview(&self) -> Option<&ExpenseOverview> {
        self.snapshot.as_ref().map(|s| &s.overview)
    }

    // ── Listing Helpers ─────────────────────────────────────────────

    /// Search expenses by matching `query` against description and
    /// category label, case-insensitively. Empty until data is loaded.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&Expense> {
        let q = query.to_lowercase();
        self.expenses()
            .unwrap_or(&[])
            .iter()
            .filter(|e| {
                e.description.to_lowercase().contains(&q) || e.category.label().contains(&q)
            })
            .collect()
    }

    /// Expenses belonging to one category, in list order.
    #[must_use]
    pub fn expenses_for_category(&self, category: Category) -> Vec<&Expense> {
        self.expenses()
            .unwrap_or(&[])
            .iter()
            .filter(|e| e.category == category)
            .collect()
    }

    /// Expenses sorted for display. Date sorting parses each record's
    /// date with the default-to-today fallback so unreadable dates
    /// gather at the "newest" end instead of disappearing.
    #[must_use]
    pub fn expenses_sorted(&self, order: &ExpenseSortOrder) -> Vec<&Expense> {
        let mut expenses: Vec<&Expense> = self.expenses().unwrap_or(&[]).iter().collect();
        match order {
            ExpenseSortOrder::DateDesc => expenses.sort_by_key(|e| {
                std::cmp::Reverse(self.date_service.parse_or(&e.date, self.today))
            }),
            ExpenseSortOrder::DateAsc => {
                expenses.sort_by_key(|e| self.date_service.parse_or(&e.date, self.today))
            }
            ExpenseSortOrder::AmountDesc => expenses.sort_by(|a, b| {
                b.amount
                    .partial_cmp(&a.amount)
                    .unwrap_or(std::cmp::Ordering::Equal)
            }),
            ExpenseSortOrder::AmountAsc => expenses.sort_by(|a, b| {
                a.amount
                    .partial_cmp(&b.amount)
                    .unwrap_or(std::cmp::Ordering::Equal)
            }),
        }
        expenses
    }

    /// Export the loaded expense list as pretty JSON (debug/backup).
    pub fn export_expenses_to_json(&self) -> Result<String, CoreError> {
        let expenses = self.expenses().unwrap_or(&[]);
        serde_json::to_string_pretty(expenses)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize expenses: {e}")))
    }

    // ── Internal ────────────────────────────────────────────────────

    /// Rebuild the snapshot from the current inputs, or drop it when
    /// no data is loaded.
    fn recompute(&mut self) {
        self.snapshot = match &self.fetch {
            FetchState::Ready(expenses) => {
                let recent_range = TimeRange::LastMonths(self.settings.recent_window_months);
                let months_back = self.settings.chart_window_months.saturating_sub(1);

                Some(AnalyticsSnapshot {
                    monthly: self.analytics_service.summarize(
                        expenses,
                        TimeRange::ThisMonth,
                        self.today,
                    ),
                    recent: self
                        .analytics_service
                        .summarize(expenses, recent_range, self.today),
                    yearly: self.analytics_service.summarize(
                        expenses,
                        TimeRange::ThisYear,
                        self.today,
                    ),
                    active: self.analytics_service.summarize(
                        expenses,
                        self.selected_range,
                        self.today,
                    ),
                    breakdown: self.analytics_service.category_breakdown(
                        expenses,
                        self.selected_range,
                        self.today,
                    ),
                    chart: self
                        .chart_service
                        .monthly_series(expenses, months_back, self.today),
                    overview: self.analytics_service.overview(expenses, self.today),
                })
            }
            _ => None,
        };
    }
}
