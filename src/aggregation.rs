//! Derived views over the transaction collection.
//!
//! Provides pure functions to total income and expenses, group expenses by
//! category for the breakdown chart, convert a breakdown into pie segments,
//! and order transactions for display. None of these mutate their input or
//! touch storage; the store recomputes them after every mutation.

use crate::{
    category::{TransactionKind, category_color},
    transaction::Transaction,
};

/// The transaction collection totalled for the summary cards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    /// The sum of all income amounts.
    pub total_income: f64,
    /// The sum of all expense amounts.
    pub total_expenses: f64,
    /// `total_income - total_expenses`. Negative when more money was spent
    /// than earned.
    pub balance: f64,
}

/// One category's share of total expenses, with its display color.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    /// The category label.
    pub label: String,
    /// The summed expense amounts for this category.
    pub value: f64,
    /// The display color for this category.
    pub color: &'static str,
}

/// A slice of the breakdown pie chart, as a percentage range of the full
/// circle.
///
/// Segments are half-open ranges: each segment starts exactly where the
/// previous one ended, the first starts at 0 and the last ends at 100, so
/// together they tile the circle with no gap or overlap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PieSegment {
    /// The display color for the segment's category.
    pub color: &'static str,
    /// Where the segment starts, as a percentage of the full circle.
    pub start_percent: f64,
    /// Where the segment ends, as a percentage of the full circle.
    pub end_percent: f64,
}

/// Total the collection's income and expenses.
///
/// An empty collection yields an all-zero summary.
pub fn summarize(transactions: &[Transaction]) -> Summary {
    let total_income = transactions
        .iter()
        .filter(|transaction| transaction.kind == TransactionKind::Income)
        .map(|transaction| transaction.amount)
        .sum::<f64>();

    let total_expenses = transactions
        .iter()
        .filter(|transaction| transaction.kind == TransactionKind::Expense)
        .map(|transaction| transaction.amount)
        .sum::<f64>();

    Summary {
        total_income,
        total_expenses,
        balance: total_income - total_expenses,
    }
}

/// Group the collection's expenses by category.
///
/// Income transactions are ignored. Each category present gets exactly one
/// entry; categories with no expense transactions never appear, rather than
/// appearing with a zero value. Entries are ordered by the first occurrence
/// of their category in the collection, not by size. The grouping is a
/// linear scan, so the order is deterministic.
pub fn expenses_by_category(transactions: &[Transaction]) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();

    for transaction in transactions
        .iter()
        .filter(|transaction| transaction.kind == TransactionKind::Expense)
    {
        match totals
            .iter_mut()
            .find(|entry| entry.label == transaction.category)
        {
            Some(entry) => entry.value += transaction.amount,
            None => totals.push(CategoryTotal {
                label: transaction.category.clone(),
                value: transaction.amount,
                color: category_color(&transaction.category),
            }),
        }
    }

    totals
}

/// Convert a category breakdown into pie chart segments.
///
/// An empty breakdown produces no segments; the caller should render an
/// empty-state placeholder instead of a chart. Segments are emitted in
/// breakdown order (no sorting by size) and tile the range 0-100 via a
/// running cumulative sum: the total accumulates in the same order as the
/// cumulative sum, so the last segment ends at exactly 100.
pub fn pie_segments(breakdown: &[CategoryTotal]) -> Vec<PieSegment> {
    let total = breakdown.iter().map(|entry| entry.value).sum::<f64>();

    // Also covers the empty breakdown, whose total is zero.
    if total == 0.0 {
        return Vec::new();
    }

    let mut segments = Vec::with_capacity(breakdown.len());
    let mut cumulative = 0.0;

    for entry in breakdown {
        let start_percent = cumulative / total * 100.0;
        cumulative += entry.value;
        let end_percent = cumulative / total * 100.0;

        segments.push(PieSegment {
            color: entry.color,
            start_percent,
            end_percent,
        });
    }

    segments
}

/// Order transactions for the history view: most recent first.
///
/// Returns a new collection; the input is left untouched. The sort is
/// stable, so transactions sharing a date keep their relative insertion
/// order.
pub fn sort_by_date_descending(transactions: &[Transaction]) -> Vec<Transaction> {
    let mut sorted = transactions.to_vec();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted
}
