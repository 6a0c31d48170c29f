use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::expense::Expense;

/// Trait abstraction for the remote expense store.
///
/// The production backend is a REST API, but everything above this
/// seam only sees "fetch the list, create a record". Tests plug in
/// mocks, and a different backend replaces one implementation without
/// touching the aggregation code.
#[async_trait]
pub trait ExpenseProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Fetch every stored expense. Records arrive already normalized
    /// to domain enums (unknown labels collapsed to their fallbacks).
    async fn fetch_expenses(&self) -> Result<Vec<Expense>, CoreError>;

    /// Persist a new expense. Returns the stored record, which now
    /// carries the identifier the backend assigned.
    async fn create_expense(&self, expense: &Expense) -> Result<Expense, CoreError>;
}
