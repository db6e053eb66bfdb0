//! Types that represent the core data model, such as `Transaction` and `Category`, and the views
//! derived from them.
mod amount;
mod category;
mod summary;
mod transaction;
mod window;

pub use amount::{Amount, AmountError, CURRENCY};
pub use category::{Category, DEFAULT_ICON};
pub use summary::{
    aggregate_by_category, day_label, group_by_day, total_expenses, CategoryAggregate, DayGroup,
};
pub use transaction::Transaction;
pub use window::{month_bounds, DateWindow};
