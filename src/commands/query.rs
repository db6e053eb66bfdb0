//! Read-only command handlers: the day list and the category breakdown.

use crate::args::BreakdownArgs;
use crate::commands::Out;
use crate::model::{Amount, CategoryAggregate, DayGroup};
use crate::store::TransactionStore;

/// Lists every transaction grouped under its day label.
pub fn list(store: &TransactionStore) -> Out<Vec<DayGroup>> {
    let groups = store.grouped_by_day();
    if groups.is_empty() {
        return Out::new_message("No transactions yet");
    }

    let lines: Vec<String> = groups
        .iter()
        .flat_map(|group| {
            std::iter::once(group.label().to_string()).chain(group.transactions().iter().map(|t| {
                format!(
                    "  {:>12}  {:<20} {} {}",
                    t.amount().to_string(),
                    t.category().title(),
                    t.date().format("%H:%M"),
                    t.id()
                )
            }))
        })
        .collect();
    Out::new(lines.join("\n"), groups.to_vec())
}

/// Shows expense totals per category for the window selected by `args`. The window stays set on
/// the store afterwards.
pub fn breakdown(store: &mut TransactionStore, args: BreakdownArgs) -> Out<Vec<CategoryAggregate>> {
    store.set_window(args.window());
    let caption = store.window_caption();
    let aggregates = store.expenses_by_category();

    let total = format!("Total expenses: {}", Amount::new(store.total_expenses()));
    let lines: Vec<String> = [caption, total]
        .into_iter()
        .chain(aggregates.iter().map(|aggregate| {
            format!(
                "  {:<20} {:>12}",
                aggregate.category().title(),
                Amount::new(aggregate.amount().round() as i64).to_string()
            )
        }))
        .collect();
    let message = lines.join("\n");
    Out::new(message, aggregates.to_vec())
}
