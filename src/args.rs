//! These structs provide the CLI interface for the expenses CLI.

use crate::locale::Locale;
use crate::model::{Amount, DateWindow};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use clap::{Parser, Subcommand};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;
use uuid::Uuid;

/// expenses: A small personal expense log.
///
/// Record what you spend, see it grouped by day, and get a per-category breakdown for the current
/// month, a single day, or any date range. Data is kept as JSON in the expenses home directory.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Record a transaction. The amount is treated as an expense unless --income is given.
    Add(AddArgs),
    /// Delete a transaction by its ID.
    Delete(DeleteArgs),
    /// Change the amount, category or date of a transaction.
    Update(UpdateArgs),
    /// List transactions grouped by day.
    List,
    /// Show totals per category for the current month, a single day, or a date range.
    Breakdown(BreakdownArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where data and configuration are held. Defaults to ~/expenses
    #[arg(long, env = "EXPENSES_HOME", default_value_t = default_expenses_home())]
    home: DisplayPath,

    /// The language for day labels. Overrides the config file and the environment.
    #[arg(long, value_enum)]
    locale: Option<Locale>,
}

impl Common {
    pub fn new(log_level: LevelFilter, home: PathBuf, locale: Option<Locale>) -> Self {
        Self {
            log_level,
            home: home.into(),
            locale,
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn home(&self) -> &DisplayPath {
        &self.home
    }

    pub fn locale(&self) -> Option<Locale> {
        self.locale
    }
}

/// Args for the `expenses add` command.
#[derive(Debug, Parser, Clone)]
pub struct AddArgs {
    /// The amount, in whole units. The sign is ignored: it is stored as an expense unless --income
    /// is given.
    #[arg(allow_negative_numbers = true)]
    amount: Amount,

    /// The category title, e.g. "Groceries".
    #[arg(long)]
    category: String,

    /// The icon identifier for the category.
    #[arg(long)]
    icon: Option<String>,

    /// When the transaction happened: YYYY-MM-DD or YYYY-MM-DD HH:MM[:SS]. Defaults to now.
    #[arg(long)]
    date: Option<DateArg>,

    /// Record the amount as income instead of an expense.
    #[arg(long)]
    income: bool,
}

impl AddArgs {
    pub fn new(amount: i64, category: impl Into<String>) -> Self {
        Self {
            amount: Amount::new(amount),
            category: category.into(),
            icon: None,
            date: None,
            income: false,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_date(mut self, date: DateArg) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_income(mut self, income: bool) -> Self {
        self.income = income;
        self
    }

    /// The amount with the sign applied.
    pub fn amount(&self) -> Amount {
        signed(self.amount, self.income)
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    pub fn date(&self) -> Option<DateArg> {
        self.date
    }
}

/// Args for the `expenses delete` command.
#[derive(Debug, Parser, Clone)]
pub struct DeleteArgs {
    /// The ID of the transaction, as shown by `expenses list`.
    id: Uuid,
}

impl DeleteArgs {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }
}

/// Args for the `expenses update` command. Fields that are not given keep their current values.
#[derive(Debug, Parser, Clone)]
pub struct UpdateArgs {
    /// The ID of the transaction, as shown by `expenses list`.
    id: Uuid,

    /// The new amount. Stored as an expense unless --income is given.
    #[arg(long, allow_negative_numbers = true)]
    amount: Option<Amount>,

    /// The new category title.
    #[arg(long)]
    category: Option<String>,

    /// The new icon identifier.
    #[arg(long)]
    icon: Option<String>,

    /// The new date: YYYY-MM-DD or YYYY-MM-DD HH:MM[:SS].
    #[arg(long)]
    date: Option<DateArg>,

    /// Store --amount as income.
    #[arg(long, requires = "amount")]
    income: bool,
}

impl UpdateArgs {
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            amount: None,
            category: None,
            icon: None,
            date: None,
            income: false,
        }
    }

    pub fn with_amount(mut self, amount: i64, income: bool) -> Self {
        self.amount = Some(Amount::new(amount));
        self.income = income;
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_date(mut self, date: DateArg) -> Self {
        self.date = Some(date);
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The new amount with the sign applied, if one was given.
    pub fn amount(&self) -> Option<Amount> {
        self.amount.map(|a| signed(a, self.income))
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    pub fn date(&self) -> Option<DateArg> {
        self.date
    }
}

/// Args for the `expenses breakdown` command. With no dates, the current month is used.
#[derive(Debug, Parser, Clone, Default)]
pub struct BreakdownArgs {
    /// A single day to break down.
    #[arg(long, conflicts_with_all = ["from", "to"])]
    on: Option<DateArg>,

    /// The start of a date range. A bare date starts at midnight.
    #[arg(long, requires = "to")]
    from: Option<DateArg>,

    /// The end of a date range, inclusive. A bare date runs to the end of that day.
    #[arg(long, requires = "from")]
    to: Option<DateArg>,
}

impl BreakdownArgs {
    pub fn new(on: Option<DateArg>, from: Option<DateArg>, to: Option<DateArg>) -> Self {
        Self { on, from, to }
    }

    /// The window these arguments select.
    pub fn window(&self) -> DateWindow {
        match (self.from, self.to, self.on) {
            (Some(from), Some(to), _) => DateWindow::range(from.start(), to.end()),
            (_, _, Some(on)) => DateWindow::day(on.start()),
            _ => DateWindow::current_month(),
        }
    }
}

fn signed(amount: Amount, income: bool) -> Amount {
    if income {
        Amount::income(amount.value())
    } else {
        Amount::expense(amount.value())
    }
}

/// A date given on the command line, either a whole day or a specific time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateArg {
    Day(NaiveDate),
    At(NaiveDateTime),
}

impl DateArg {
    /// The first instant the argument covers.
    pub fn start(&self) -> NaiveDateTime {
        match self {
            DateArg::Day(day) => day.and_time(NaiveTime::MIN),
            DateArg::At(at) => *at,
        }
    }

    /// The last second the argument covers.
    pub fn end(&self) -> NaiveDateTime {
        match self {
            DateArg::Day(day) => day.and_hms_opt(23, 59, 59).unwrap_or(day.and_time(NaiveTime::MIN)),
            DateArg::At(at) => *at,
        }
    }
}

const DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

impl FromStr for DateArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(day) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Ok(DateArg::Day(day));
        }
        DATE_TIME_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
            .map(DateArg::At)
            .ok_or_else(|| format!("'{s}' is not a date, expected YYYY-MM-DD or YYYY-MM-DD HH:MM"))
    }
}

fn default_expenses_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("expenses"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --home or EXPENSES_HOME instead of relying on the default \
                directory. If you continue using the program right now, you may have problems!",
            );
            PathBuf::from("expenses")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn path(&self) -> &Path {
        &self.0
    }
}
