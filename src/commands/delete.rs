//! Delete command handler.

use crate::args::DeleteArgs;
use crate::commands::Out;
use crate::store::TransactionStore;
use crate::Result;

/// Deletes a transaction by ID. An unknown ID is reported in the message rather than as an error.
pub fn delete(store: &mut TransactionStore, args: DeleteArgs) -> Result<Out<String>> {
    let id = args.id();
    if store.remove(id) {
        Ok(Out::new(format!("Deleted transaction {id}"), id.to_string()))
    } else {
        Ok(Out::new_message(format!("No transaction with ID {id}")))
    }
}
