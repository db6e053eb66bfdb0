//! The derived views computed from the transaction list: day groups and category aggregates.

use crate::locale::Localize;
use crate::model::{Category, DateWindow, Transaction};
use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::HashMap;

/// Transactions that share a day label such as `Today` or `5 March`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayGroup {
    label: String,
    transactions: Vec<Transaction>,
}

impl DayGroup {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }
}

/// The summed amount of one category within a date window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryAggregate {
    category: Category,
    amount: f64,
}

impl CategoryAggregate {
    pub fn new(category: Category, amount: f64) -> Self {
        Self { category, amount }
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }
}

/// The label a transaction is listed under: `Today`, `Yesterday`, or `<day> <Month>` of its own
/// date. Anything else, including dates after `now`, gets the `<day> <Month>` form.
pub fn day_label(date: NaiveDateTime, now: NaiveDateTime, locale: &dyn Localize) -> String {
    let days = (now.date() - date.date()).num_days();
    match days {
        0 => locale.today().to_string(),
        1 => locale.yesterday().to_string(),
        _ => locale.day_month(date.date()),
    }
}

/// Buckets `transactions` by day label. Transactions keep their relative order inside a group.
///
/// Groups are sorted by label in descending string order, not by date. With English labels this
/// puts `Yesterday` first, then `Today`, then the `<day> <Month>` labels with `9 March` ahead of
/// `10 March`. Callers that display the groups rely on this order, so it is kept as is.
pub fn group_by_day(
    transactions: &[Transaction],
    now: NaiveDateTime,
    locale: &dyn Localize,
) -> Vec<DayGroup> {
    let mut groups: Vec<DayGroup> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for transaction in transactions {
        let label = day_label(transaction.date(), now, locale);
        match index.get(&label) {
            Some(&ix) => groups[ix].transactions.push(transaction.clone()),
            None => {
                index.insert(label.clone(), groups.len());
                groups.push(DayGroup {
                    label,
                    transactions: vec![transaction.clone()],
                });
            }
        }
    }
    groups.sort_by(|a, b| b.label.cmp(&a.label));
    groups
}

/// Sums the transactions inside `window` per category title and sorts the sums from largest to
/// smallest. The category of the first transaction seen for a title supplies the icon.
pub fn aggregate_by_category(
    transactions: &[Transaction],
    window: &DateWindow,
    now: NaiveDateTime,
) -> Vec<CategoryAggregate> {
    let mut aggregates: Vec<CategoryAggregate> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for transaction in transactions
        .iter()
        .filter(|t| window.contains(t.date(), now))
    {
        let title = transaction.category().title();
        match index.get(title) {
            Some(&ix) => aggregates[ix].amount += transaction.amount().as_f64(),
            None => {
                index.insert(title, aggregates.len());
                aggregates.push(CategoryAggregate::new(
                    transaction.category().clone(),
                    transaction.amount().as_f64(),
                ));
            }
        }
    }
    aggregates.sort_by(|a, b| b.amount.total_cmp(&a.amount));
    aggregates
}

/// The total shown above the category chart: each aggregate truncated to whole units, made
/// positive, then summed.
pub fn total_expenses(aggregates: &[CategoryAggregate]) -> i64 {
    aggregates
        .iter()
        .map(|a| (a.amount.trunc() as i64).saturating_abs())
        .fold(0i64, |acc, v| acc.saturating_add(v))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::Locale;
    use crate::model::Amount;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn tx(date: NaiveDateTime, amount: i64, title: &str) -> Transaction {
        Transaction::new(date, amount, Category::titled(title))
    }

    fn now() -> NaiveDateTime {
        at(2025, 3, 28, 12)
    }

    #[test]
    fn test_day_label_relative_and_absolute() {
        let en = Locale::En;
        assert_eq!(day_label(at(2025, 3, 28, 0), now(), &en), "Today");
        assert_eq!(day_label(at(2025, 3, 28, 23), now(), &en), "Today");
        assert_eq!(day_label(at(2025, 3, 27, 23), now(), &en), "Yesterday");
        assert_eq!(day_label(at(2025, 3, 26, 23), now(), &en), "26 March");
        assert_eq!(day_label(at(2025, 3, 29, 9), now(), &en), "29 March");
        assert_eq!(day_label(at(2024, 3, 28, 9), now(), &en), "28 March");
    }

    #[test]
    fn test_day_label_uses_calendar_days_not_elapsed_hours() {
        let late = at(2025, 3, 28, 0) + chrono::Duration::minutes(5);
        let just_before_midnight = at(2025, 3, 27, 23) + chrono::Duration::minutes(59);
        assert_eq!(day_label(just_before_midnight, late, &Locale::En), "Yesterday");
    }

    #[test]
    fn test_day_label_russian() {
        let ru = Locale::Ru;
        assert_eq!(day_label(at(2025, 3, 28, 9), now(), &ru), "Сегодня");
        assert_eq!(day_label(at(2025, 3, 27, 9), now(), &ru), "Вчера");
        assert_eq!(day_label(at(2025, 3, 5, 9), now(), &ru), "5 Марта");
    }

    #[test]
    fn test_single_transaction_today() {
        let t = tx(at(2025, 3, 28, 9), -150, "Groceries");
        let groups = group_by_day(std::slice::from_ref(&t), now(), &Locale::En);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].label(), "Today");
        assert_eq!(groups[0].transactions(), &[t]);
    }

    #[test]
    fn test_groups_sorted_descending_by_label_string() {
        let list = vec![
            tx(at(2025, 3, 10, 9), -1, "A"),
            tx(at(2025, 3, 28, 9), -1, "A"),
            tx(at(2025, 3, 9, 9), -1, "A"),
            tx(at(2025, 3, 27, 9), -1, "A"),
        ];
        let labels: Vec<String> = group_by_day(&list, now(), &Locale::En)
            .iter()
            .map(|g| g.label().to_string())
            .collect();
        assert_eq!(labels, vec!["Yesterday", "Today", "9 March", "10 March"]);
    }

    #[test]
    fn test_groups_partition_input() {
        let list = vec![
            tx(at(2025, 3, 28, 9), -1, "A"),
            tx(at(2025, 3, 20, 9), -2, "B"),
            tx(at(2025, 3, 28, 10), -3, "C"),
            tx(at(2025, 2, 20, 9), -4, "A"),
            tx(at(2025, 3, 27, 9), -5, "B"),
        ];
        let groups = group_by_day(&list, now(), &Locale::En);
        let mut seen: Vec<_> = groups
            .iter()
            .flat_map(|g| g.transactions().iter().map(|t| t.id()))
            .collect();
        let mut expected: Vec<_> = list.iter().map(|t| t.id()).collect();
        seen.sort();
        expected.sort();
        assert_eq!(seen, expected);
    }

    #[test]
    fn test_group_keeps_store_order() {
        let first = tx(at(2025, 3, 28, 11), -1, "A");
        let second = tx(at(2025, 3, 28, 8), -2, "B");
        let groups = group_by_day(&[first.clone(), second.clone()], now(), &Locale::En);
        assert_eq!(groups[0].transactions(), &[first, second]);
    }

    #[test]
    fn test_same_category_sums_into_one_entry() {
        let list = vec![
            tx(at(2025, 3, 28, 9), -100, "Groceries"),
            tx(at(2025, 3, 28, 10), -50, "Groceries"),
        ];
        let aggregates = aggregate_by_category(&list, &DateWindow::current_month(), now());
        assert_eq!(aggregates.len(), 1);
        assert_eq!(aggregates[0].category().title(), "Groceries");
        assert_eq!(aggregates[0].amount(), -150.0);
    }

    #[test]
    fn test_aggregates_sorted_descending() {
        let list = vec![
            tx(at(2025, 3, 1, 9), -300, "Rent"),
            tx(at(2025, 3, 2, 9), -20, "Cafe"),
            tx(at(2025, 3, 3, 9), 500, "Salary"),
            tx(at(2025, 3, 4, 9), -80, "Groceries"),
            tx(at(2025, 3, 5, 9), -30, "Groceries"),
        ];
        let aggregates = aggregate_by_category(&list, &DateWindow::current_month(), now());
        let amounts: Vec<f64> = aggregates.iter().map(|a| a.amount()).collect();
        assert_eq!(amounts, vec![500.0, -20.0, -110.0, -300.0]);
        assert!(aggregates.windows(2).all(|w| w[0].amount() >= w[1].amount()));
    }

    #[test]
    fn test_aggregate_sums_match_filtered_input() {
        let list = vec![
            tx(at(2025, 3, 1, 9), -7, "A"),
            tx(at(2025, 2, 1, 9), -1000, "A"),
            tx(at(2025, 3, 2, 9), -11, "B"),
            tx(at(2025, 3, 3, 9), -13, "A"),
            tx(at(2025, 3, 4, 9), -17, "B"),
        ];
        let aggregates = aggregate_by_category(&list, &DateWindow::current_month(), now());
        let sum = |title: &str| {
            aggregates
                .iter()
                .find(|a| a.category().title() == title)
                .unwrap()
                .amount()
        };
        assert_eq!(sum("A"), -20.0);
        assert_eq!(sum("B"), -28.0);
    }

    #[test]
    fn test_first_category_icon_wins() {
        let list = vec![
            Transaction::new(
                at(2025, 3, 1, 9),
                Amount::new(-1),
                Category::new("Food", "cart.fill"),
            ),
            Transaction::new(at(2025, 3, 2, 9), Amount::new(-1), Category::new("Food", "fork")),
        ];
        let aggregates = aggregate_by_category(&list, &DateWindow::current_month(), now());
        assert_eq!(aggregates[0].category().icon(), "cart.fill");
    }

    #[test]
    fn test_inverted_range_is_empty() {
        let list = vec![tx(at(2025, 3, 15, 9), -1, "A")];
        let window = DateWindow::range(at(2025, 3, 20, 0), at(2025, 3, 10, 0));
        assert!(aggregate_by_category(&list, &window, now()).is_empty());
    }

    #[test]
    fn test_empty_input() {
        assert!(aggregate_by_category(&[], &DateWindow::current_month(), now()).is_empty());
        assert!(group_by_day(&[], now(), &Locale::En).is_empty());
    }

    #[test]
    fn test_total_expenses_uses_magnitudes() {
        let aggregates = vec![
            CategoryAggregate::new(Category::titled("A"), -150.0),
            CategoryAggregate::new(Category::titled("B"), -49.9),
            CategoryAggregate::new(Category::titled("C"), 20.0),
        ];
        assert_eq!(total_expenses(&aggregates), 219);
        assert_eq!(total_expenses(&[]), 0);
    }
}
