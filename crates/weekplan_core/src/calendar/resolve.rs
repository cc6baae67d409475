//! Week resolution under the majority-of-days ownership rule.
//!
//! # Responsibility
//! - Resolve any date to the `(year, month, week_number)` of the week that
//!   contains it.
//! - Reconstruct the seven concrete dates of a resolved week.
//! - Derive neighbor weeks for prev/next navigation.
//!
//! # Invariants
//! - Weeks start on Monday; a Sunday belongs to the Monday six days earlier.
//! - A seven-day span touches at most two calendar months; the month holding
//!   at least four of the seven days owns the week.
//! - Week numbers within one owning month run consecutively from 1. A month
//!   whose first Monday falls on day 5 or later owns the partial week before
//!   that Monday, and that spillover week is week 1.
//! - Resolving the Monday of `week_dates(info)` reproduces `info` for every
//!   `info` that resolution produces.
//!
//! # See also
//! - docs/architecture/week-resolution.md

use crate::model::week::WeekInfo;
use chrono::{Datelike, Duration, NaiveDate};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Result type for date-deriving calendar operations.
pub type CalendarResult<T> = Result<T, CalendarError>;

/// Errors from date-deriving calendar operations.
///
/// These arise from caller-supplied `(year, month, week_number)` components
/// and from dates so close to an end of the representable calendar that
/// their week does not fit. Navigation only meets them at those ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarError {
    /// Month component outside `1..=12`.
    MonthOutOfRange(u32),
    /// Week number 0; resolution numbers weeks from 1.
    WeekOutOfRange(u32),
    /// No representable date for the requested components or week span.
    InvalidDate { year: i32, month: u32 },
}

impl Display for CalendarError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MonthOutOfRange(month) => write!(f, "month {month} is outside 1..=12"),
            Self::WeekOutOfRange(week) => write!(f, "week number {week} must be >= 1"),
            Self::InvalidDate { year, month } => {
                write!(f, "no representable date for year {year} month {month}")
            }
        }
    }
}

impl Error for CalendarError {}

/// Monday on or before `date`.
///
/// ISO convention: a Sunday maps to the Monday six days earlier, never to
/// the following Monday. Errs only for dates before the first representable
/// Monday, where that Monday does not exist.
pub fn monday_on_or_before(date: NaiveDate) -> CalendarResult<NaiveDate> {
    let back = Duration::days(i64::from(date.weekday().num_days_from_monday()));
    date.checked_sub_signed(back)
        .ok_or(CalendarError::InvalidDate {
            year: date.year(),
            month: date.month(),
        })
}

/// First Monday on or after the 1st of `(year, month)`.
pub fn first_monday_of_month(year: i32, month: u32) -> CalendarResult<NaiveDate> {
    if !(1..=12).contains(&month) {
        return Err(CalendarError::MonthOutOfRange(month));
    }
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or(CalendarError::InvalidDate { year, month })?;
    Ok(first_monday_on_or_after(first))
}

/// Resolves the week containing `date` to its owning month and week number.
///
/// Every date belongs to exactly one week and every week is owned by
/// exactly one month. Errs only for the handful of days at either end of
/// the representable range whose enclosing Monday-start week does not fit.
pub fn resolve_week(date: NaiveDate) -> CalendarResult<WeekInfo> {
    let monday = monday_on_or_before(date)?;
    let span = week_span(monday).ok_or(CalendarError::InvalidDate {
        year: monday.year(),
        month: monday.month(),
    })?;

    // Monday's month owns the week when it holds at least 4 of the 7 days,
    // otherwise the final day's month does. An exact tie cannot occur for a
    // seven-day span (4/3 at worst); `>= 4` would settle a hypothetical tie
    // toward Monday's earlier month.
    let days_in_mondays_month = span
        .iter()
        .filter(|day| (day.year(), day.month()) == (monday.year(), monday.month()))
        .count();
    let owner = if days_in_mondays_month >= 4 {
        monday
    } else {
        span[6]
    };

    let first_monday = first_monday_on_or_after(first_of_month(owner));
    Ok(WeekInfo::new(
        owner.year(),
        owner.month(),
        week_number_for(monday, first_monday),
    ))
}

/// The seven dates of the week identified by `info`, Monday first.
///
/// Total in the week dimension: a `week_number` past the weeks the month
/// actually owns walks forward into the following month, and resolving the
/// returned Monday re-canonicalizes to that month. Errs on month outside
/// `1..=12`, week 0, or arithmetic past the representable calendar range.
pub fn week_dates(info: &WeekInfo) -> CalendarResult<[NaiveDate; 7]> {
    if info.week_number == 0 {
        return Err(CalendarError::WeekOutOfRange(info.week_number));
    }
    let first_monday = first_monday_of_month(info.year, info.month)?;
    let lead = i64::from(leads_with_spillover(first_monday));
    let week_offset = i64::from(info.week_number) - 1 - lead;
    let target_monday = first_monday
        .checked_add_signed(Duration::days(week_offset * 7))
        .ok_or(CalendarError::InvalidDate {
            year: info.year,
            month: info.month,
        })?;
    week_span(target_monday).ok_or(CalendarError::InvalidDate {
        year: info.year,
        month: info.month,
    })
}

/// Identity of the week before `info`: resolution of its Monday minus seven
/// days.
pub fn previous_week(info: &WeekInfo) -> CalendarResult<WeekInfo> {
    let monday = week_dates(info)?[0];
    let prior = monday
        .checked_sub_signed(Duration::days(7))
        .ok_or(CalendarError::InvalidDate {
            year: info.year,
            month: info.month,
        })?;
    resolve_week(prior)
}

/// Identity of the week after `info`: resolution of its Monday plus seven
/// days.
pub fn next_week(info: &WeekInfo) -> CalendarResult<WeekInfo> {
    let monday = week_dates(info)?[0];
    let following = monday
        .checked_add_signed(Duration::days(7))
        .ok_or(CalendarError::InvalidDate {
            year: info.year,
            month: info.month,
        })?;
    resolve_week(following)
}

/// Two-digit `YY/MM/DD` form used by the week-range caption.
///
/// Display only; store lookups use the canonical `PeriodKey` encoding.
pub fn format_display(date: NaiveDate) -> String {
    format!(
        "{:02}/{:02}/{:02}",
        date.year().rem_euclid(100),
        date.month(),
        date.day()
    )
}

// The representable range runs from a January 1st to a December 31st, so
// first-of-month subtraction and the at-most-six-day step to the next
// Monday both stay in range.
fn first_monday_on_or_after(date: NaiveDate) -> NaiveDate {
    let forward = (7 - date.weekday().num_days_from_monday()) % 7;
    date + Duration::days(i64::from(forward))
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.day0()))
}

/// Week number of the week starting at `monday` within the owning month
/// whose first Monday is `first_monday`.
fn week_number_for(monday: NaiveDate, first_monday: NaiveDate) -> u32 {
    if monday < first_monday {
        // Monday sits in the prior month while the week belongs to this one:
        // the leading spillover week, numbered 1.
        return 1;
    }
    let weeks_past_first = (monday - first_monday).num_days() / 7;
    weeks_past_first as u32 + 1 + u32::from(leads_with_spillover(first_monday))
}

/// A month owns the partial week before its first Monday iff that week holds
/// at least four of its days, i.e. the first Monday falls on day 5 or later.
fn leads_with_spillover(first_monday: NaiveDate) -> bool {
    first_monday.day() >= 5
}

fn week_span(monday: NaiveDate) -> Option<[NaiveDate; 7]> {
    let mut days = [monday; 7];
    for (offset, slot) in days.iter_mut().enumerate().skip(1) {
        *slot = monday.checked_add_signed(Duration::days(offset as i64))?;
    }
    Some(days)
}
