use crate::model::{Amount, Category};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single recorded expense or income entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    id: Uuid,
    date: NaiveDateTime,
    amount: Amount,
    category: Category,
}

impl Transaction {
    /// Creates a transaction with a fresh random identifier.
    pub fn new(date: NaiveDateTime, amount: impl Into<Amount>, category: Category) -> Self {
        Self::with_id(Uuid::new_v4(), date, amount, category)
    }

    pub fn with_id(
        id: Uuid,
        date: NaiveDateTime,
        amount: impl Into<Amount>,
        category: Category,
    ) -> Self {
        Self {
            id,
            date,
            amount: amount.into(),
            category,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn date(&self) -> NaiveDateTime {
        self.date
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    /// Returns the same transaction under identifier `id`.
    pub(crate) fn reidentified(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }
}
