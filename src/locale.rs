//! Localized strings used when labelling days and date windows.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Produces the locale-specific pieces of day labels.
pub trait Localize: Send + Sync {
    /// The label for transactions made today.
    fn today(&self) -> &str;

    /// The label for transactions made yesterday.
    fn yesterday(&self) -> &str;

    /// The month name as it appears after a day number, e.g. `марта` in `5 марта`. `month` is
    /// 1-based. Unknown months produce an empty string.
    fn month_name(&self, month: u32) -> &str;

    /// Formats `date` as `<day> <Month>` with the month capitalized, e.g. `5 Марта`.
    fn day_month(&self, date: NaiveDate) -> String {
        format!("{} {}", date.day(), capitalize(self.month_name(date.month())))
    }
}

/// The locales the app ships labels for.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Ru,
}

serde_plain::derive_display_from_serialize!(Locale);
serde_plain::derive_fromstr_from_deserialize!(Locale);

impl Locale {
    /// Picks `Ru` when the first of `LC_ALL`, `LC_MESSAGES` or `LANG` that is set starts with `ru`.
    pub fn from_env() -> Self {
        let lang = ["LC_ALL", "LC_MESSAGES", "LANG"]
            .iter()
            .filter_map(|key| std::env::var(key).ok())
            .find(|value| !value.is_empty());
        match lang {
            Some(value) => Self::from_language_tag(&value),
            None => Self::default(),
        }
    }

    /// Maps a POSIX or BCP 47 language tag such as `ru_RU.UTF-8` or `en-US` onto a `Locale`.
    pub fn from_language_tag(tag: &str) -> Self {
        if tag.to_lowercase().starts_with("ru") {
            Locale::Ru
        } else {
            Locale::En
        }
    }
}

impl Localize for Locale {
    fn today(&self) -> &str {
        match self {
            Locale::En => "Today",
            Locale::Ru => "Сегодня",
        }
    }

    fn yesterday(&self) -> &str {
        match self {
            Locale::En => "Yesterday",
            Locale::Ru => "Вчера",
        }
    }

    fn month_name(&self, month: u32) -> &str {
        let names = match self {
            Locale::En => &EN_MONTHS,
            Locale::Ru => &RU_MONTHS,
        };
        month
            .checked_sub(1)
            .and_then(|ix| names.get(ix as usize))
            .copied()
            .unwrap_or_default()
    }
}

const EN_MONTHS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

// Genitive forms, which is what follows a day number in Russian.
const RU_MONTHS: [&str; 12] = [
    "января",
    "февраля",
    "марта",
    "апреля",
    "мая",
    "июня",
    "июля",
    "августа",
    "сентября",
    "октября",
    "ноября",
    "декабря",
];

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
