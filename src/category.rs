//! Transaction kinds and the fixed category vocabulary.
//!
//! Each kind has its own closed, ordered list of category labels. The form
//! offers only these labels, with the first entry as the default, but the
//! data model does not enforce membership: a transaction's category is stored
//! as plain text, and unknown labels simply fall back to [FALLBACK_COLOR] in
//! the breakdown chart.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Whether a transaction records money earned or money spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money earned, e.g. wages or interest.
    Income,
    /// Money spent, e.g. groceries or rent.
    Expense,
}

impl TransactionKind {
    /// The category labels that may be used for transactions of this kind,
    /// in the order the form should offer them.
    ///
    /// The first entry is the form default, and the one the form selects
    /// when the user switches kind.
    pub fn categories(self) -> &'static [&'static str] {
        match self {
            TransactionKind::Income => &INCOME_CATEGORIES,
            TransactionKind::Expense => &EXPENSE_CATEGORIES,
        }
    }
}

impl Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionKind::Income => write!(f, "income"),
            TransactionKind::Expense => write!(f, "expense"),
        }
    }
}

/// The categories available for expense transactions.
pub const EXPENSE_CATEGORIES: [&str; 6] = [
    "Food",
    "Transport",
    "Bills",
    "Shopping",
    "Entertainment",
    "Other",
];

/// The categories available for income transactions.
pub const INCOME_CATEGORIES: [&str; 5] = ["Salary", "Freelance", "Investment", "Gift", "Other"];

/// The chart color used for category labels that have no entry in the color
/// table, i.e. the "Other" color.
pub const FALLBACK_COLOR: &str = "#64748b";

/// The display color for each known category label.
const CATEGORY_COLORS: [(&str, &str); 10] = [
    ("Food", "#f97316"),
    ("Transport", "#0ea5e9"),
    ("Bills", "#8b5cf6"),
    ("Shopping", "#d946ef"),
    ("Entertainment", "#ec4899"),
    ("Salary", "#22c55e"),
    ("Freelance", "#14b8a6"),
    ("Investment", "#6366f1"),
    ("Gift", "#facc15"),
    ("Other", FALLBACK_COLOR),
];

/// Look up the chart color for a category label.
///
/// Total over all strings: unrecognized labels map to [FALLBACK_COLOR]
/// rather than an absent value, so callers never have to handle a missing
/// color.
pub fn category_color(label: &str) -> &'static str {
    CATEGORY_COLORS
        .iter()
        .find(|(name, _)| *name == label)
        .map(|(_, color)| *color)
        .unwrap_or(FALLBACK_COLOR)
}
