//! Update command handler.

use crate::args::UpdateArgs;
use crate::commands::Out;
use crate::model::{Category, Transaction, DEFAULT_ICON};
use crate::store::TransactionStore;
use crate::Result;
use anyhow::{bail, ensure, Context};
use tracing::debug;

/// Replaces the transaction with the given ID by a copy carrying the requested changes. Fields
/// that are not given keep their current values. When the category title changes and no icon is
/// given, the icon falls back to the default.
pub fn update(store: &mut TransactionStore, args: UpdateArgs) -> Result<Out<Transaction>> {
    let id = args.id();
    let current = store
        .get(id)
        .cloned()
        .with_context(|| format!("No transaction with ID {id}"))?;

    let category = match (args.category().map(str::trim), args.icon()) {
        (Some(""), _) => bail!("The category title cannot be empty"),
        (Some(title), Some(icon)) => Category::new(title, icon),
        (Some(title), None) if title == current.category().title() => current.category().clone(),
        (Some(title), None) => Category::new(title, DEFAULT_ICON),
        (None, Some(icon)) => Category::new(current.category().title(), icon),
        (None, None) => current.category().clone(),
    };
    let amount = args.amount().unwrap_or(current.amount());
    let date = args.date().map(|d| d.start()).unwrap_or(current.date());

    let updated = Transaction::with_id(id, date, amount, category);
    debug!("Replacing {current:?} with {updated:?}");
    ensure!(store.replace(id, updated.clone()), "No transaction with ID {id}");

    Ok(Out::new(format!("Updated transaction {id}"), updated))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::DateArg;
    use crate::model::Amount;
    use crate::test::{at, TestEnv};
    use uuid::Uuid;

    fn seeded(env: &TestEnv) -> (TransactionStore, Transaction) {
        let mut store = env.store();
        let original = Transaction::new(
            at(2025, 3, 20, 10),
            Amount::new(-50),
            Category::new("Coffee", "cup"),
        );
        store.add(original.clone());
        (store, original)
    }

    #[test]
    fn test_update_amount_keeps_id_and_category() {
        let env = TestEnv::new();
        let (mut store, original) = seeded(&env);

        let out = update(
            &mut store,
            UpdateArgs::new(original.id()).with_amount(65, false),
        )
        .unwrap();
        let updated = out.structure().unwrap();

        assert_eq!(updated.id(), original.id());
        assert_eq!(updated.amount(), Amount::new(-65));
        assert_eq!(updated.category().icon(), "cup");
        assert_eq!(store.transactions(), &[updated.clone()]);
        assert_eq!(env.store().transactions(), &[updated.clone()]);
    }

    #[test]
    fn test_update_new_category_resets_icon() {
        let env = TestEnv::new();
        let (mut store, original) = seeded(&env);

        let out = update(
            &mut store,
            UpdateArgs::new(original.id()).with_category("Tea"),
        )
        .unwrap();

        let category = out.structure().unwrap().category();
        assert_eq!(category.title(), "Tea");
        assert_eq!(category.icon(), DEFAULT_ICON);
    }

    #[test]
    fn test_update_icon_and_date() {
        let env = TestEnv::new();
        let (mut store, original) = seeded(&env);

        let out = update(
            &mut store,
            UpdateArgs::new(original.id())
                .with_icon("mug")
                .with_date(DateArg::At(at(2025, 3, 21, 8))),
        )
        .unwrap();
        let updated = out.structure().unwrap();

        assert_eq!(updated.category().title(), "Coffee");
        assert_eq!(updated.category().icon(), "mug");
        assert_eq!(updated.date(), at(2025, 3, 21, 8));
        assert_eq!(updated.amount(), original.amount());
    }

    #[test]
    fn test_update_unknown_id_fails() {
        let env = TestEnv::new();
        let (mut store, original) = seeded(&env);

        let err = update(&mut store, UpdateArgs::new(Uuid::new_v4()).with_amount(1, true));

        assert!(err.unwrap_err().to_string().starts_with("No transaction"));
        assert_eq!(store.transactions(), &[original]);
    }
}
