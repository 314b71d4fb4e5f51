//! The transaction record and the validated draft used to create one.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use time::Date;
use uuid::Uuid;

use crate::{Error, category::TransactionKind};

/// Uniquely identifies a [Transaction].
///
/// IDs are random v4 UUIDs assigned by the store when a draft is accepted,
/// so an ID is never reused, not even after its transaction is deleted and
/// the application restarted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransactionId(Uuid);

impl TransactionId {
    /// Generate a fresh, unique ID.
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// A transaction is an immutable fact: it is created by
/// [TransactionStore::add](crate::TransactionStore::add), never edited in
/// place, and destroyed only by
/// [TransactionStore::remove](crate::TransactionStore::remove).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// A text description of what the transaction was for.
    pub description: String,
    /// The amount of money spent or earned in this transaction.
    ///
    /// Always a positive magnitude; whether the money was spent or earned is
    /// carried by `kind`, never by the sign.
    pub amount: f64,
    /// Whether this transaction is income or an expense.
    pub kind: TransactionKind,
    /// The category the transaction belongs to, e.g. "Food" or "Salary".
    pub category: String,
    /// When the transaction happened, at day granularity.
    pub date: Date,
}

/// A transaction's field set prior to ID assignment, submitted by the
/// presentation layer to request creation.
///
/// Constructing a draft is the validation gate in front of the store: a
/// draft only exists with a non-empty description, a positive finite amount,
/// and a non-empty category, so [TransactionStore::add](crate::TransactionStore::add)
/// has no failure path of its own. A missing or malformed date cannot reach
/// this type at all, because the presentation layer rejects it when parsing
/// the date field into a [Date].
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDraft {
    description: String,
    amount: f64,
    kind: TransactionKind,
    category: String,
    date: Date,
}

impl TransactionDraft {
    /// Create a draft, validating the user-entered fields.
    ///
    /// Leading and trailing whitespace is trimmed from `description` and
    /// `category` before validation.
    ///
    /// # Errors
    ///
    /// This function will return:
    /// - [Error::EmptyDescription] if `description` is empty after trimming,
    /// - [Error::InvalidAmount] if `amount` is not a positive, finite number,
    /// - [Error::EmptyCategory] if `category` is empty after trimming.
    pub fn new(
        description: &str,
        amount: f64,
        kind: TransactionKind,
        category: &str,
        date: Date,
    ) -> Result<Self, Error> {
        let description = description.trim();

        if description.is_empty() {
            return Err(Error::EmptyDescription);
        }

        if !amount.is_finite() || amount <= 0.0 {
            return Err(Error::InvalidAmount(amount));
        }

        let category = category.trim();

        if category.is_empty() {
            return Err(Error::EmptyCategory);
        }

        Ok(Self {
            description: description.to_string(),
            amount,
            kind,
            category: category.to_string(),
            date,
        })
    }

    /// Consume the draft and produce the transaction it described, with a
    /// freshly assigned ID.
    pub(crate) fn finalize(self) -> Transaction {
        Transaction {
            id: TransactionId::new(),
            description: self.description,
            amount: self.amount,
            kind: self.kind,
            category: self.category,
            date: self.date,
        }
    }
}
