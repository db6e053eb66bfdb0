//! Add command handler.

use crate::args::AddArgs;
use crate::commands::Out;
use crate::model::{Category, Transaction};
use crate::store::TransactionStore;
use crate::Result;
use anyhow::ensure;
use tracing::debug;

/// Records a new transaction. The date defaults to the store's current time.
pub fn add(store: &mut TransactionStore, args: AddArgs) -> Result<Out<Transaction>> {
    let title = args.category().trim();
    ensure!(!title.is_empty(), "The category title cannot be empty");

    let category = match args.icon() {
        Some(icon) => Category::new(title, icon),
        None => Category::titled(title),
    };
    let date = args.date().map(|d| d.start()).unwrap_or_else(|| store.now());
    let transaction = Transaction::new(date, args.amount(), category);
    debug!("Adding {transaction:?}");

    store.add(transaction.clone());
    let message = format!(
        "Added {} in {} on {} ({})",
        transaction.amount(),
        transaction.category().title(),
        transaction.date().format("%Y-%m-%d %H:%M"),
        transaction.id()
    );
    Ok(Out::new(message, transaction))
}
