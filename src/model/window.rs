//! The date window used to filter transactions before they are aggregated by category.

use crate::locale::Localize;
use chrono::{Datelike, Duration, Months, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// The active date filter, as selected in the presentation layer.
///
/// The fields are evaluated in a fixed order:
/// 1. `start_date` and `end_date` both set: an inclusive timestamp range.
/// 2. otherwise `single_date` set: the calendar day of `single_date`.
/// 3. otherwise: the calendar month containing "now".
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    single_date: Option<NaiveDateTime>,
    start_date: Option<NaiveDateTime>,
    end_date: Option<NaiveDateTime>,
}

impl DateWindow {
    pub fn new(
        single_date: Option<NaiveDateTime>,
        start_date: Option<NaiveDateTime>,
        end_date: Option<NaiveDateTime>,
    ) -> Self {
        Self {
            single_date,
            start_date,
            end_date,
        }
    }

    /// No dates selected, so the current month applies.
    pub fn current_month() -> Self {
        Self::default()
    }

    /// The calendar day containing `date`.
    pub fn day(date: NaiveDateTime) -> Self {
        Self::new(Some(date), None, None)
    }

    /// The inclusive range `[start, end]`. A range with `start > end` matches nothing.
    pub fn range(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self::new(None, Some(start), Some(end))
    }

    pub fn single_date(&self) -> Option<NaiveDateTime> {
        self.single_date
    }

    pub fn start_date(&self) -> Option<NaiveDateTime> {
        self.start_date
    }

    pub fn end_date(&self) -> Option<NaiveDateTime> {
        self.end_date
    }

    /// Whether a transaction dated `date` falls inside this window, with `now` anchoring the
    /// default month.
    pub fn contains(&self, date: NaiveDateTime, now: NaiveDateTime) -> bool {
        match (self.start_date, self.end_date, self.single_date) {
            (Some(start), Some(end), _) => start <= date && date <= end,
            (_, _, Some(single)) => single.date() == date.date(),
            _ => {
                let (start, end) = month_bounds(now);
                start <= date && date <= end
            }
        }
    }

    /// A caption for the window: `5 March - 9 March` for a range, `5 March` for a single day,
    /// otherwise the `day Month` of `now`. Follows the same precedence as `contains`.
    pub fn caption(&self, now: NaiveDateTime, locale: &dyn Localize) -> String {
        match (self.start_date, self.end_date, self.single_date) {
            (Some(start), Some(end), _) => format!(
                "{} - {}",
                locale.day_month(start.date()),
                locale.day_month(end.date())
            ),
            (_, _, Some(single)) => locale.day_month(single.date()),
            _ => locale.day_month(now.date()),
        }
    }
}

/// The first instant of the month containing `now` and one second before the first instant of the
/// following month.
pub fn month_bounds(now: NaiveDateTime) -> (NaiveDateTime, NaiveDateTime) {
    let first: NaiveDate = now.date() - Duration::days(i64::from(now.day0()));
    let next = first
        .checked_add_months(Months::new(1))
        .unwrap_or(NaiveDate::MAX);
    let start = first.and_time(NaiveTime::MIN);
    let end = next.and_time(NaiveTime::MIN) - Duration::seconds(1);
    (start, end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::Locale;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn test_month_bounds_mid_month() {
        let (start, end) = month_bounds(at(2025, 3, 28, 15, 30, 0));
        assert_eq!(start, at(2025, 3, 1, 0, 0, 0));
        assert_eq!(end, at(2025, 3, 31, 23, 59, 59));
    }

    #[test]
    fn test_month_bounds_december_rolls_into_next_year() {
        let (start, end) = month_bounds(at(2024, 12, 1, 0, 0, 0));
        assert_eq!(start, at(2024, 12, 1, 0, 0, 0));
        assert_eq!(end, at(2024, 12, 31, 23, 59, 59));
    }

    #[test]
    fn test_month_bounds_leap_february() {
        let (_, end) = month_bounds(at(2024, 2, 10, 8, 0, 0));
        assert_eq!(end, at(2024, 2, 29, 23, 59, 59));
    }

    #[test]
    fn test_default_window_is_current_month() {
        let now = at(2025, 3, 28, 12, 0, 0);
        let w = DateWindow::current_month();
        assert!(w.contains(at(2025, 3, 1, 0, 0, 0), now));
        assert!(w.contains(at(2025, 3, 31, 23, 59, 59), now));
        assert!(!w.contains(at(2025, 2, 28, 23, 59, 59), now));
        assert!(!w.contains(at(2025, 4, 1, 0, 0, 0), now));
    }

    #[test]
    fn test_single_day_matches_whole_calendar_day() {
        let now = at(2025, 3, 28, 12, 0, 0);
        let w = DateWindow::day(at(2025, 3, 5, 18, 0, 0));
        assert!(w.contains(at(2025, 3, 5, 0, 0, 0), now));
        assert!(w.contains(at(2025, 3, 5, 23, 59, 59), now));
        assert!(!w.contains(at(2025, 3, 6, 0, 0, 0), now));
    }

    #[test]
    fn test_range_is_inclusive() {
        let now = at(2025, 3, 28, 12, 0, 0);
        let w = DateWindow::range(at(2025, 1, 10, 0, 0, 0), at(2025, 1, 20, 0, 0, 0));
        assert!(w.contains(at(2025, 1, 10, 0, 0, 0), now));
        assert!(w.contains(at(2025, 1, 20, 0, 0, 0), now));
        assert!(!w.contains(at(2025, 1, 20, 0, 0, 1), now));
        assert!(!w.contains(at(2025, 1, 9, 23, 59, 59), now));
    }

    #[test]
    fn test_range_takes_precedence_over_single_date() {
        let now = at(2025, 3, 28, 12, 0, 0);
        let w = DateWindow::new(
            Some(at(2025, 3, 5, 0, 0, 0)),
            Some(at(2025, 1, 1, 0, 0, 0)),
            Some(at(2025, 1, 31, 0, 0, 0)),
        );
        assert!(w.contains(at(2025, 1, 15, 0, 0, 0), now));
        assert!(!w.contains(at(2025, 3, 5, 12, 0, 0), now));
    }

    #[test]
    fn test_end_without_start_falls_back_to_single_date() {
        let now = at(2025, 3, 28, 12, 0, 0);
        let w = DateWindow::new(
            Some(at(2025, 3, 5, 0, 0, 0)),
            None,
            Some(at(2025, 3, 20, 0, 0, 0)),
        );
        assert!(w.contains(at(2025, 3, 5, 9, 0, 0), now));
        assert!(!w.contains(at(2025, 3, 10, 9, 0, 0), now));
    }

    #[test]
    fn test_inverted_range_matches_nothing() {
        let now = at(2025, 3, 28, 12, 0, 0);
        let w = DateWindow::range(at(2025, 3, 20, 0, 0, 0), at(2025, 3, 10, 0, 0, 0));
        assert!(!w.contains(at(2025, 3, 15, 0, 0, 0), now));
        assert!(!w.contains(at(2025, 3, 20, 0, 0, 0), now));
    }

    #[test]
    fn test_captions() {
        let now = at(2025, 3, 28, 12, 0, 0);
        let range = DateWindow::range(at(2025, 3, 5, 0, 0, 0), at(2025, 3, 9, 0, 0, 0));
        assert_eq!(range.caption(now, &Locale::En), "5 March - 9 March");
        assert_eq!(range.caption(now, &Locale::Ru), "5 Марта - 9 Марта");
        let day = DateWindow::day(at(2025, 1, 2, 0, 0, 0));
        assert_eq!(day.caption(now, &Locale::En), "2 January");
        assert_eq!(
            DateWindow::current_month().caption(now, &Locale::En),
            "28 March"
        );
    }

    #[test]
    fn test_caption_matches_contains_for_partial_windows() {
        let now = at(2025, 3, 28, 12, 0, 0);
        let day_with_end = DateWindow::new(
            Some(at(2025, 3, 5, 0, 0, 0)),
            None,
            Some(at(2025, 3, 20, 0, 0, 0)),
        );
        assert_eq!(day_with_end.caption(now, &Locale::En), "5 March");
        assert!(!day_with_end.contains(at(2025, 3, 10, 0, 0, 0), now));
        assert!(day_with_end.contains(at(2025, 3, 5, 18, 0, 0), now));

        let start_only = DateWindow::new(None, Some(at(2025, 3, 5, 0, 0, 0)), None);
        assert_eq!(start_only.caption(now, &Locale::En), "28 March");
        assert!(start_only.contains(at(2025, 3, 1, 0, 0, 0), now));
    }
}
