//! Insightful is the core of a personal finance tracker: users record income
//! and expense transactions, view aggregate totals, a category breakdown
//! chart, and a chronological history, with data persisted locally between
//! sessions.
//!
//! This library owns the data model, the derived-state pipeline (summary
//! totals, category breakdown, pie segments, display ordering) and the
//! persistence round-trip. The presentation layer is an external collaborator:
//! it is handed a [TransactionStore], reads the derived views from it, and
//! dispatches add/remove intents back to it.

#![warn(missing_docs)]

mod aggregation;
mod category;
mod chart;
mod currency;
mod persistence;
mod store;
mod transaction;

pub use aggregation::{
    CategoryTotal, PieSegment, Summary, expenses_by_category, pie_segments,
    sort_by_date_descending, summarize,
};
pub use category::{
    EXPENSE_CATEGORIES, FALLBACK_COLOR, INCOME_CATEGORIES, TransactionKind, category_color,
};
pub use chart::spending_chart;
pub use currency::format_currency;
pub use persistence::{SQLiteSnapshotStore, SnapshotStore};
pub use store::{SubscriptionId, TransactionStore};
pub use transaction::{Transaction, TransactionDraft, TransactionId};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// An empty string was used as a transaction description.
    ///
    /// Raised when constructing a [TransactionDraft], i.e. before the draft
    /// reaches the store. The presentation layer should block submission and
    /// show the message next to the description field.
    #[error("the description cannot be empty")]
    EmptyDescription,

    /// A non-positive or non-finite number was used as a transaction amount.
    ///
    /// Amounts are magnitudes; whether money was spent or earned is carried
    /// by the transaction kind, never by the sign.
    #[error("{0} is not a valid transaction amount")]
    InvalidAmount(f64),

    /// An empty string was used as a transaction category.
    #[error("the category cannot be empty")]
    EmptyCategory,

    /// The saved transaction data could not be parsed.
    ///
    /// Callers should treat this the same as no saved data: start with an
    /// empty collection and let the next save overwrite the bad blob. The
    /// error string should only be logged for diagnostics.
    #[error("the saved transaction data could not be parsed: {0}")]
    CorruptData(String),

    /// An error occurred while serializing the transactions as JSON.
    #[error("could not serialize as JSON: {0}")]
    JsonSerialization(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        tracing::error!("an unhandled SQL error occurred: {}", value);
        Error::SqlError(value)
    }
}
