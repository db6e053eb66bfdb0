//! The transaction store: the single owner of the transaction list and the views derived from it.

use crate::clock::Clock;
use crate::error::PersistError;
use crate::locale::Localize;
use crate::model::{
    aggregate_by_category, group_by_day, total_expenses, CategoryAggregate, DateWindow, DayGroup,
    Transaction,
};
use crate::storage::KeyValueStore;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, error, trace};
use uuid::Uuid;

/// The storage key the transaction list is written under.
pub const TRANSACTIONS_KEY: &str = "transactions";

/// Owns the list of transactions, persists it after every change, and keeps the day groups and
/// the category aggregates for the current window up to date.
///
/// Every mutation writes the whole list to storage and then recomputes both derived views before
/// returning. Storage failures are logged and otherwise ignored: the in-memory list stays
/// authoritative and the next successful write brings storage back in line.
pub struct TransactionStore {
    storage: Box<dyn KeyValueStore>,
    clock: Box<dyn Clock>,
    locale: Box<dyn Localize>,
    transactions: Vec<Transaction>,
    window: DateWindow,
    by_day: Vec<DayGroup>,
    by_category: Vec<CategoryAggregate>,
}

impl std::fmt::Debug for TransactionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransactionStore")
            .field("transactions", &self.transactions.len())
            .field("window", &self.window)
            .finish_non_exhaustive()
    }
}

impl TransactionStore {
    /// Creates a store and loads whatever `storage` holds.
    pub fn new(
        storage: impl KeyValueStore + 'static,
        clock: impl Clock + 'static,
        locale: impl Localize + 'static,
    ) -> Self {
        let mut store = Self {
            storage: Box::new(storage),
            clock: Box::new(clock),
            locale: Box::new(locale),
            transactions: Vec::new(),
            window: DateWindow::default(),
            by_day: Vec::new(),
            by_category: Vec::new(),
        };
        store.load();
        store
    }

    /// Replaces the in-memory list with the stored one. A missing, unreadable or corrupt blob
    /// leaves the store empty.
    pub fn load(&mut self) {
        self.transactions = match self.read() {
            Ok(Some(transactions)) => {
                debug!("Loaded {} transactions", transactions.len());
                transactions
            }
            Ok(None) => {
                debug!("No stored transactions found, starting empty");
                Vec::new()
            }
            Err(e) => {
                error!("Unable to load transactions, starting empty: {e}");
                Vec::new()
            }
        };
        self.recompute();
    }

    /// Appends `transaction`.
    pub fn add(&mut self, transaction: Transaction) {
        trace!("add {}", transaction.id());
        self.transactions.push(transaction);
        self.commit();
    }

    /// Removes the transaction with `id`. Returns `false` when there was none, in which case the
    /// list is unchanged but is still written out.
    pub fn remove(&mut self, id: Uuid) -> bool {
        trace!("remove {id}");
        let before = self.transactions.len();
        self.transactions.retain(|t| t.id() != id);
        let removed = self.transactions.len() != before;
        self.commit();
        removed
    }

    /// Puts `transaction` in the place of the transaction with `id`. The replacement keeps `id`
    /// and the position in the list. Returns `false` when there was no transaction with `id`, in
    /// which case the list is unchanged but is still written out.
    pub fn replace(&mut self, id: Uuid, transaction: Transaction) -> bool {
        trace!("replace {id}");
        let replaced = match self.transactions.iter_mut().find(|t| t.id() == id) {
            Some(slot) => {
                *slot = transaction.reidentified(id);
                true
            }
            None => false,
        };
        self.commit();
        replaced
    }

    /// Sets the window used for `expenses_by_category` and recomputes it.
    pub fn set_window(&mut self, window: DateWindow) {
        self.window = window;
        self.by_category = aggregate_by_category(&self.transactions, &window, self.now());
    }

    pub fn window(&self) -> DateWindow {
        self.window
    }

    /// The transactions in persistence order.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn get(&self, id: Uuid) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id() == id)
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// The day groups as of the last change.
    pub fn grouped_by_day(&self) -> &[DayGroup] {
        &self.by_day
    }

    /// Category sums for an arbitrary `window`. Does not touch the cached aggregates.
    pub fn aggregate_by_category(&self, window: &DateWindow) -> Vec<CategoryAggregate> {
        aggregate_by_category(&self.transactions, window, self.now())
    }

    /// Category sums for the current window as of the last change.
    pub fn expenses_by_category(&self) -> &[CategoryAggregate] {
        &self.by_category
    }

    /// The sum of the magnitudes of `expenses_by_category`.
    pub fn total_expenses(&self) -> i64 {
        total_expenses(&self.by_category)
    }

    /// The caption for the current window.
    pub fn window_caption(&self) -> String {
        self.window.caption(self.now(), self.locale.as_ref())
    }

    pub fn locale(&self) -> &dyn Localize {
        self.locale.as_ref()
    }

    /// The current time according to the store's clock.
    pub fn now(&self) -> chrono::NaiveDateTime {
        self.clock.now()
    }

    fn commit(&mut self) {
        self.save();
        self.recompute();
    }

    fn recompute(&mut self) {
        let now = self.now();
        self.by_day = group_by_day(&self.transactions, now, self.locale.as_ref());
        self.by_category = aggregate_by_category(&self.transactions, &self.window, now);
    }

    fn save(&mut self) {
        if let Err(e) = self.write() {
            error!("Unable to save transactions: {e}");
        }
    }

    fn read(&self) -> Result<Option<Vec<Transaction>>, PersistError> {
        let bytes = self
            .storage
            .get(TRANSACTIONS_KEY)
            .map_err(|e| PersistError::storage(TRANSACTIONS_KEY, &e))?;
        match bytes {
            Some(bytes) => decode(&bytes).map(Some),
            None => Ok(None),
        }
    }

    fn write(&mut self) -> Result<(), PersistError> {
        let bytes = encode(&self.transactions)?;
        self.storage
            .set(TRANSACTIONS_KEY, &bytes)
            .map_err(|e| PersistError::storage(TRANSACTIONS_KEY, &e))
    }
}

/// Serializes the transaction list into the stored blob format.
pub fn encode(transactions: &[Transaction]) -> Result<Vec<u8>, PersistError> {
    serde_json::to_vec(transactions).map_err(PersistError::Serialization)
}

/// Parses a stored blob back into a transaction list.
pub fn decode(bytes: &[u8]) -> Result<Vec<Transaction>, PersistError> {
    serde_json::from_slice(bytes).map_err(PersistError::Deserialization)
}

/// One `TransactionStore` behind a lock, for hosts that touch the store from several threads.
/// Clones refer to the same store.
#[derive(Debug, Clone)]
pub struct SharedStore {
    inner: Arc<Mutex<TransactionStore>>,
}

impl SharedStore {
    pub fn new(store: TransactionStore) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Runs `f` with shared access to the store.
    pub fn read<R>(&self, f: impl FnOnce(&TransactionStore) -> R) -> R {
        let guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    /// Runs `f` with exclusive access to the store.
    pub fn write<R>(&self, f: impl FnOnce(&mut TransactionStore) -> R) -> R {
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }
}
