use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Spending category of an expense.
///
/// This is a closed set: the remote API sends categories as free-form
/// lowercase labels, and anything unrecognized collapses to `Other`
/// at the wire boundary (see `from_label`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Food,
    Transport,
    Fun,
    Shopping,
    Health,
    Bills,
    Education,
    Travel,
    Other,
}

impl Category {
    /// All members, in declaration order. Handy for dropdowns and
    /// exhaustive legends.
    pub const ALL: [Category; 9] = [
        Category::Food,
        Category::Transport,
        Category::Fun,
        Category::Shopping,
        Category::Health,
        Category::Bills,
        Category::Education,
        Category::Travel,
        Category::Other,
    ];

    /// The lowercase label used on the wire.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Food => "food",
            Category::Transport => "transport",
            Category::Fun => "fun",
            Category::Shopping => "shopping",
            Category::Health => "health",
            Category::Bills => "bills",
            Category::Education => "education",
            Category::Travel => "travel",
            Category::Other => "other",
        }
    }

    /// Map an incoming label to a category, case-insensitively.
    /// Unknown labels normalize to `Other` so a category is always
    /// resolved to a member of the enum, never left dangling.
    pub fn from_label(label: &str) -> Self {
        let lower = label.trim().to_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.label() == lower)
            .unwrap_or(Category::Other)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Food => write!(f, "Food"),
            Category::Transport => write!(f, "Transport"),
            Category::Fun => write!(f, "Fun"),
            Category::Shopping => write!(f, "Shopping"),
            Category::Health => write!(f, "Health"),
            Category::Bills => write!(f, "Bills"),
            Category::Education => write!(f, "Education"),
            Category::Travel => write!(f, "Travel"),
            Category::Other => write!(f, "Other"),
        }
    }
}

/// How an expense was paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    Cash,
    Card,
    Digital,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 3] = [
        PaymentMethod::Cash,
        PaymentMethod::Card,
        PaymentMethod::Digital,
    ];

    /// The lowercase label used on the wire.
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Card => "card",
            PaymentMethod::Digital => "digital",
        }
    }

    /// Map an incoming label to a payment method, case-insensitively.
    /// Unknown labels normalize to `Cash`.
    pub fn from_label(label: &str) -> Self {
        let lower = label.trim().to_lowercase();
        PaymentMethod::ALL
            .into_iter()
            .find(|m| m.label() == lower)
            .unwrap_or(PaymentMethod::Cash)
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentMethod::Cash => write!(f, "Cash"),
            PaymentMethod::Card => write!(f, "Card"),
            PaymentMethod::Digital => write!(f, "Digital"),
        }
    }
}

/// Sort order for expense listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseSortOrder {
    /// Newest date first (default for display)
    DateDesc,
    /// Oldest date first
    DateAsc,
    /// Largest amount first
    AmountDesc,
    /// Smallest amount first
    AmountAsc,
}

/// A single recorded expense.
///
/// **Important**: `date` stays in its wire string form ("MMM d ,yyyy"
/// family, erratic spacing included). Parsing into a calendar date
/// happens at aggregation time, because the stored strings are not
/// uniformly well-formed and each consumer picks its own fallback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Identifier assigned by the remote API. `None` until the record
    /// has been persisted.
    #[serde(default)]
    pub id: Option<String>,

    /// Monetary amount. Non-negative for records created through
    /// `Expense::new`; aggregation tolerates whatever is already there.
    pub amount: f64,

    /// Spending category, already normalized to a known member.
    pub category: Category,

    /// Human-formatted date string as stored by the API.
    pub date: String,

    /// Free text, used for display and search only. Never aggregated.
    pub description: String,

    /// Payment method, already normalized to a known member.
    pub payment_method: PaymentMethod,
}

impl Expense {
    /// Create a new, not-yet-persisted expense.
    ///
    /// Rejects amounts that are negative or not finite. This is the
    /// creation boundary; lists fetched from the API are taken as-is.
    pub fn new(
        amount: f64,
        category: Category,
        date: impl Into<String>,
        description: impl Into<String>,
        payment_method: PaymentMethod,
    ) -> Result<Self, CoreError> {
        if !amount.is_finite() {
            return Err(CoreError::ValidationError(
                format!("Expense amount must be a finite number, got {amount}"),
            ));
        }
        if amount < 0.0 {
            return Err(CoreError::ValidationError(
                format!("Expense amount must not be negative, got {amount}"),
            ));
        }

        Ok(Self {
            id: None,
            amount,
            category,
            date: date.into(),
            description: description.into(),
            payment_method,
        })
    }
}
