//! The authoritative transaction collection and its mutations.

use crate::{
    aggregation::{self, CategoryTotal, PieSegment, Summary},
    persistence::SnapshotStore,
    transaction::{Transaction, TransactionDraft, TransactionId},
};

/// Identifies a subscription so it can be cancelled with
/// [TransactionStore::unsubscribe].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(u64);

struct Observer {
    id: SubscriptionId,
    callback: Box<dyn Fn(&[Transaction])>,
}

/// The single source of truth for the transaction collection.
///
/// The store owns the collection outright: every read goes through it, and
/// the only mutations are [add](TransactionStore::add) and
/// [remove](TransactionStore::remove). Each successful mutation writes the
/// full collection through to the snapshot store and then synchronously
/// notifies subscribers, so the presentation layer re-renders from fresh
/// state before the user intent returns.
///
/// A failed write-through save is logged and otherwise ignored: the
/// in-memory collection stays authoritative for the session, and may differ
/// from the saved data until the next save succeeds. There is no retry.
pub struct TransactionStore<S: SnapshotStore> {
    transactions: Vec<Transaction>,
    persistence: S,
    observers: Vec<Observer>,
    next_subscription: u64,
}

impl<S: SnapshotStore> TransactionStore<S> {
    /// Create the store, loading the saved transaction collection from
    /// `persistence`.
    ///
    /// Missing saved data starts the store with an empty collection. So does
    /// corrupt saved data: the failure is logged, never surfaced to the
    /// user, and heals itself when the next mutation overwrites the bad
    /// snapshot.
    pub fn initialize(persistence: S) -> Self {
        let transactions = match persistence.load() {
            Ok(Some(transactions)) => transactions,
            Ok(None) => Vec::new(),
            Err(error) => {
                tracing::warn!(
                    "could not read the saved transactions, starting with an empty collection: {}",
                    error
                );
                Vec::new()
            }
        };

        Self {
            transactions,
            persistence,
            observers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Accept `draft` as a new transaction.
    ///
    /// The store assigns the transaction a fresh ID and appends it to the
    /// end of the collection, preserving insertion order. The collection is
    /// saved and subscribers are notified before this returns.
    ///
    /// There is no failure path here: field validation already happened when
    /// the draft was constructed, and a failed save is logged rather than
    /// propagated.
    pub fn add(&mut self, draft: TransactionDraft) -> Transaction {
        let transaction = draft.finalize();
        self.transactions.push(transaction.clone());

        self.persist();
        self.notify();

        transaction
    }

    /// Remove the transaction with the matching `id`.
    ///
    /// Removing an ID that is not in the collection is a no-op, not an
    /// error: nothing is saved and nobody is notified.
    pub fn remove(&mut self, id: TransactionId) {
        let count_before = self.transactions.len();
        self.transactions
            .retain(|transaction| transaction.id != id);

        if self.transactions.len() == count_before {
            return;
        }

        self.persist();
        self.notify();
    }

    /// The transaction collection, in insertion order.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// The summary totals for the current collection.
    pub fn summary(&self) -> Summary {
        aggregation::summarize(&self.transactions)
    }

    /// The current collection's expenses grouped by category.
    pub fn category_breakdown(&self) -> Vec<CategoryTotal> {
        aggregation::expenses_by_category(&self.transactions)
    }

    /// The pie chart segments for the current category breakdown.
    pub fn pie_segments(&self) -> Vec<PieSegment> {
        aggregation::pie_segments(&self.category_breakdown())
    }

    /// The current collection ordered for the history view, most recent
    /// first.
    pub fn sorted_by_date(&self) -> Vec<Transaction> {
        aggregation::sort_by_date_descending(&self.transactions)
    }

    /// Register `callback` to be called synchronously after every mutation,
    /// with the mutated collection.
    ///
    /// Callbacks run in subscription order. The returned ID cancels the
    /// subscription via [TransactionStore::unsubscribe].
    pub fn subscribe(&mut self, callback: impl Fn(&[Transaction]) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;

        self.observers.push(Observer {
            id,
            callback: Box::new(callback),
        });

        id
    }

    /// Cancel the subscription with the matching `id`, if it is still
    /// active.
    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.observers.retain(|observer| observer.id != id);
    }

    fn persist(&mut self) {
        if let Err(error) = self.persistence.save(&self.transactions) {
            tracing::error!(
                "could not save the transactions, the saved data will be stale until the next successful save: {}",
                error
            );
        }
    }

    fn notify(&self) {
        for observer in &self.observers {
            (observer.callback)(&self.transactions);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        Error,
        category::TransactionKind,
        persistence::{SQLiteSnapshotStore, SnapshotStore},
        transaction::{Transaction, TransactionDraft, TransactionId},
    };

    use super::TransactionStore;

    /// A [SnapshotStore] double that records saves so tests can observe the
    /// write-through behavior from outside the store.
    #[derive(Default)]
    struct FakeState {
        stored: Option<Vec<Transaction>>,
        save_count: usize,
        fail_saves: bool,
        load_corrupt: bool,
    }

    #[derive(Clone, Default)]
    struct FakeSnapshotStore(Rc<RefCell<FakeState>>);

    impl SnapshotStore for FakeSnapshotStore {
        fn load(&self) -> Result<Option<Vec<Transaction>>, Error> {
            let state = self.0.borrow();

            if state.load_corrupt {
                return Err(Error::CorruptData("expected value at line 1".to_owned()));
            }

            Ok(state.stored.clone())
        }

        fn save(&mut self, transactions: &[Transaction]) -> Result<(), Error> {
            let mut state = self.0.borrow_mut();
            state.save_count += 1;

            if state.fail_saves {
                return Err(Error::JsonSerialization("disk full".to_owned()));
            }

            state.stored = Some(transactions.to_vec());
            Ok(())
        }
    }

    fn coffee_draft() -> TransactionDraft {
        TransactionDraft::new(
            "Coffee",
            50.0,
            TransactionKind::Expense,
            "Food",
            date!(2024 - 01 - 01),
        )
        .unwrap()
    }

    fn salary_draft() -> TransactionDraft {
        TransactionDraft::new(
            "January pay",
            1500.0,
            TransactionKind::Income,
            "Salary",
            date!(2024 - 01 - 31),
        )
        .unwrap()
    }

    #[test]
    fn initialize_starts_empty_without_saved_data() {
        let store = TransactionStore::initialize(FakeSnapshotStore::default());

        assert!(store.transactions().is_empty());
    }

    #[test]
    fn initialize_loads_saved_collection() {
        let persistence = FakeSnapshotStore::default();
        let mut seed_store = TransactionStore::initialize(persistence.clone());
        let transaction = seed_store.add(coffee_draft());

        let store = TransactionStore::initialize(persistence);

        assert_eq!(store.transactions(), [transaction]);
    }

    #[test]
    fn initialize_recovers_from_corrupt_saved_data() {
        let persistence = FakeSnapshotStore::default();
        persistence.0.borrow_mut().load_corrupt = true;

        let store = TransactionStore::initialize(persistence);

        assert!(store.transactions().is_empty());
    }

    #[test]
    fn initialize_recovers_from_corrupt_sqlite_blob() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute(
            "CREATE TABLE snapshot (key TEXT PRIMARY KEY, value TEXT NOT NULL)",
            (),
        )
        .unwrap();
        conn.execute(
            "INSERT INTO snapshot (key, value) VALUES ('transactions', 'corrupted')",
            (),
        )
        .unwrap();

        let store = TransactionStore::initialize(SQLiteSnapshotStore::new(conn).unwrap());

        assert!(store.transactions().is_empty());
    }

    #[test]
    fn add_appends_in_insertion_order() {
        let mut store = TransactionStore::initialize(FakeSnapshotStore::default());

        let first = store.add(coffee_draft());
        let second = store.add(salary_draft());

        assert_eq!(store.transactions(), [first, second]);
    }

    #[test]
    fn add_writes_through_to_persistence() {
        let persistence = FakeSnapshotStore::default();
        let mut store = TransactionStore::initialize(persistence.clone());

        let transaction = store.add(coffee_draft());

        let state = persistence.0.borrow();
        assert_eq!(state.save_count, 1);
        assert_eq!(state.stored, Some(vec![transaction]));
    }

    #[test]
    fn add_keeps_serving_memory_when_save_fails() {
        let persistence = FakeSnapshotStore::default();
        persistence.0.borrow_mut().fail_saves = true;
        let mut store = TransactionStore::initialize(persistence.clone());

        store.add(coffee_draft());

        // The in-memory collection is authoritative for the session even
        // though nothing was saved.
        assert_eq!(store.transactions().len(), 1);
        assert_eq!(persistence.0.borrow().stored, None);
    }

    #[test]
    fn remove_deletes_matching_transaction() {
        let persistence = FakeSnapshotStore::default();
        let mut store = TransactionStore::initialize(persistence.clone());
        let coffee = store.add(coffee_draft());
        let salary = store.add(salary_draft());

        store.remove(coffee.id);

        assert_eq!(store.transactions(), [salary.clone()]);
        assert_eq!(persistence.0.borrow().stored, Some(vec![salary]));
    }

    #[test]
    fn remove_of_unknown_id_is_a_noop() {
        let persistence = FakeSnapshotStore::default();
        let mut store = TransactionStore::initialize(persistence.clone());
        let transaction = store.add(coffee_draft());
        let saves_before = persistence.0.borrow().save_count;

        store.remove(TransactionId::new());

        assert_eq!(store.transactions(), [transaction]);
        assert_eq!(persistence.0.borrow().save_count, saves_before);
    }

    #[test]
    fn observers_are_notified_after_each_mutation() {
        let mut store = TransactionStore::initialize(FakeSnapshotStore::default());
        let seen_counts = Rc::new(RefCell::new(Vec::new()));

        let recorder = seen_counts.clone();
        store.subscribe(move |transactions| recorder.borrow_mut().push(transactions.len()));

        let transaction = store.add(coffee_draft());
        store.add(salary_draft());
        store.remove(transaction.id);

        assert_eq!(*seen_counts.borrow(), vec![1, 2, 1]);
    }

    #[test]
    fn observers_are_not_notified_for_noop_removes() {
        let mut store = TransactionStore::initialize(FakeSnapshotStore::default());
        let seen_counts = Rc::new(RefCell::new(Vec::new()));

        let recorder = seen_counts.clone();
        store.subscribe(move |transactions| recorder.borrow_mut().push(transactions.len()));

        store.remove(TransactionId::new());

        assert!(seen_counts.borrow().is_empty());
    }

    #[test]
    fn observers_run_in_subscription_order() {
        let mut store = TransactionStore::initialize(FakeSnapshotStore::default());
        let order = Rc::new(RefCell::new(Vec::new()));

        let first = order.clone();
        store.subscribe(move |_| first.borrow_mut().push("first"));
        let second = order.clone();
        store.subscribe(move |_| second.borrow_mut().push("second"));

        store.add(coffee_draft());

        assert_eq!(*order.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let mut store = TransactionStore::initialize(FakeSnapshotStore::default());
        let seen_counts = Rc::new(RefCell::new(Vec::new()));

        let recorder = seen_counts.clone();
        let subscription =
            store.subscribe(move |transactions| recorder.borrow_mut().push(transactions.len()));

        store.add(coffee_draft());
        store.unsubscribe(subscription);
        store.add(salary_draft());

        assert_eq!(*seen_counts.borrow(), vec![1]);
    }

    #[test]
    fn sorted_by_date_puts_most_recent_first() {
        let mut store = TransactionStore::initialize(FakeSnapshotStore::default());
        let coffee = store.add(coffee_draft());
        let salary = store.add(salary_draft());

        let sorted = store.sorted_by_date();

        assert_eq!(sorted, vec![salary, coffee]);
    }

    #[test]
    fn add_then_remove_round_trip_restores_the_empty_state() {
        let conn = Connection::open_in_memory().unwrap();
        let mut store = TransactionStore::initialize(SQLiteSnapshotStore::new(conn).unwrap());

        let transaction = store.add(coffee_draft());

        let summary = store.summary();
        assert_eq!(summary.total_income, 0.0);
        assert_eq!(summary.total_expenses, 50.0);
        assert_eq!(summary.balance, -50.0);

        let segments = store.pie_segments();
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].color, "#f97316");
        assert_eq!(segments[0].start_percent, 0.0);
        assert_eq!(segments[0].end_percent, 100.0);

        store.remove(transaction.id);

        assert!(store.transactions().is_empty());
        let summary = store.summary();
        assert_eq!(summary.total_income, 0.0);
        assert_eq!(summary.total_expenses, 0.0);
        assert_eq!(summary.balance, 0.0);
        assert!(store.pie_segments().is_empty());
    }

    #[test]
    fn collection_survives_a_restart() {
        let persistence = FakeSnapshotStore::default();
        let mut store = TransactionStore::initialize(persistence.clone());
        let coffee = store.add(coffee_draft());
        let salary = store.add(salary_draft());
        drop(store);

        let reopened = TransactionStore::initialize(persistence);

        assert_eq!(reopened.transactions(), [coffee, salary]);
    }
}
