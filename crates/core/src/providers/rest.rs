use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::traits::ExpenseProvider;
use crate::errors::CoreError;
use crate::models::expense::{Category, Expense, PaymentMethod};

const PROVIDER_NAME: &str = "ExpenseApi";

/// Wire representation of an expense.
///
/// The backend stores `category` and `payment_method` as free strings,
/// so this type keeps them that way. `into_domain` is the one place
/// where labels are normalized into the closed enums; past that point
/// the rest of the library can rely on every record carrying a known
/// member.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub amount: f64,
    pub category: String,
    pub date: String,
    pub description: String,
    #[serde(rename = "paymentMethod")]
    pub payment_method: String,
}

impl ExpenseDto {
    /// Normalize a wire record into the domain model. Unknown category
    /// labels become `Other`, unknown payment methods become `Cash`.
    pub fn into_domain(self) -> Expense {
        Expense {
            id: self.id,
            amount: self.amount,
            category: Category::from_label(&self.category),
            date: self.date,
            description: self.description,
            payment_method: PaymentMethod::from_label(&self.payment_method),
        }
    }

    /// Wire form of a domain expense.
    pub fn from_domain(expense: &Expense) -> Self {
        Self {
            id: expense.id.clone(),
            amount: expense.amount,
            category: expense.category.label().to_string(),
            date: expense.date.clone(),
            description: expense.description.clone(),
            payment_method: expense.payment_method.label().to_string(),
        }
    }
}

/// REST client for the hosted expense API.
///
/// Endpoints: `GET {base}/expenses`, `POST {base}/expenses`.
/// Authentication and retries live in the layer that owns the session,
/// not here.
pub struct RestExpenseProvider {
    client: Client,
    base_url: String,
}

impl RestExpenseProvider {
    pub fn new(base_url: impl Into<String>) -> Self {
        let builder = Client::builder().timeout(Duration::from_secs(30));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn expenses_url(&self) -> String {
        format!("{}/expenses", self.base_url)
    }
}

#[async_trait]
impl ExpenseProvider for RestExpenseProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn fetch_expenses(&self) -> Result<Vec<Expense>, CoreError> {
        let dtos: Vec<ExpenseDto> = self
            .client
            .get(self.expenses_url())
            .send()
            .await?
            .error_for_status()
            .map_err(|e| CoreError::Api {
                provider: PROVIDER_NAME.into(),
                message: format!("Fetching expenses failed: {e}"),
            })?
            .json()
            .await
            .map_err(|e| CoreError::Api {
                provider: PROVIDER_NAME.into(),
                message: format!("Failed to parse expense list: {e}"),
            })?;

        Ok(dtos.into_iter().map(ExpenseDto::into_domain).collect())
    }

    async fn create_expense(&self, expense: &Expense) -> Result<Expense, CoreError> {
        let created: ExpenseDto = self
            .client
            .post(self.expenses_url())
            .json(&ExpenseDto::from_domain(expense))
            .send()
            .await?
            .error_for_status()
            .map_err(|e| CoreError::Api {
                provider: PROVIDER_NAME.into(),
                message: format!("Creating expense failed: {e}"),
            })?
            .json()
            .await
            .map_err(|e| CoreError::Api {
                provider: PROVIDER_NAME.into(),
                message: format!("Failed to parse created expense: {e}"),
            })?;

        Ok(created.into_domain())
    }
}
