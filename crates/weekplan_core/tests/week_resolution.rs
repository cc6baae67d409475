use chrono::{Duration, NaiveDate};
use std::collections::BTreeMap;
use weekplan_core::{
    first_monday_of_month, monday_on_or_before, next_week, previous_week, resolve_week, week_dates,
    CalendarError, WeekInfo,
};

#[test]
fn resolution_round_trips_across_multiple_years() {
    let start = date(2019, 1, 1);
    let end = date(2026, 12, 31);
    for day in start.iter_days().take_while(|current| *current <= end) {
        let info = resolve_week(day).unwrap();
        let dates = week_dates(&info).unwrap();
        assert_eq!(dates[0], monday_on_or_before(day).unwrap(), "span start for {day}");
        assert_eq!(dates[6], dates[0] + Duration::days(6), "span end for {day}");
        assert_eq!(resolve_week(dates[0]).unwrap(), info, "monday re-resolution for {day}");
    }
}

#[test]
fn resolution_is_deterministic() {
    let day = date(2024, 8, 14);
    let first = resolve_week(day).unwrap();
    assert_eq!(resolve_week(day).unwrap(), first);
    assert_eq!(resolve_week(day).unwrap(), first);
}

#[test]
fn majority_rule_assigns_cross_month_weeks() {
    // 2024-01-29..02-04 holds three January days and four February days,
    // so February owns the week.
    assert_eq!(resolve_week(date(2024, 1, 29)).unwrap(), WeekInfo::new(2024, 2, 1));
    assert_eq!(resolve_week(date(2024, 2, 4)).unwrap(), WeekInfo::new(2024, 2, 1));
    // 2019-01-28..02-03 holds four January days, so January keeps it.
    assert_eq!(resolve_week(date(2019, 1, 28)).unwrap(), WeekInfo::new(2019, 1, 5));
    assert_eq!(resolve_week(date(2019, 2, 3)).unwrap(), WeekInfo::new(2019, 1, 5));
}

#[test]
fn year_boundary_week_belongs_to_january() {
    // 2024-12-30..2025-01-05 holds two December days and five January days.
    let info = resolve_week(date(2024, 12, 30)).unwrap();
    assert_eq!(info, WeekInfo::new(2025, 1, 1));
    assert_eq!(resolve_week(date(2025, 1, 5)).unwrap(), info);
    assert_eq!(info.key().to_string(), "2025-01-w01");
}

#[test]
fn august_2024_numbers_its_leading_week_first() {
    // August 2024 starts on a Thursday, so the Jul 29 week holds four
    // August days and opens the month as week 1.
    let expected = [
        (date(2024, 7, 29), 1),
        (date(2024, 8, 5), 2),
        (date(2024, 8, 12), 3),
        (date(2024, 8, 19), 4),
        (date(2024, 8, 26), 5),
    ];
    for (monday, week_number) in expected {
        assert_eq!(resolve_week(monday).unwrap(), WeekInfo::new(2024, 8, week_number), "{monday}");
    }
}

#[test]
fn september_2024_starts_at_its_first_monday() {
    // September 2024 opens on a Sunday; no leading week.
    assert_eq!(resolve_week(date(2024, 9, 2)).unwrap(), WeekInfo::new(2024, 9, 1));
    assert_eq!(resolve_week(date(2024, 9, 23)).unwrap(), WeekInfo::new(2024, 9, 4));
    // The Sep 30 week holds six October days, so October owns it.
    assert_eq!(resolve_week(date(2024, 9, 30)).unwrap(), WeekInfo::new(2024, 10, 1));
}

#[test]
fn months_number_their_weeks_consecutively_from_one() {
    let mut owned: BTreeMap<(i32, u32), Vec<u32>> = BTreeMap::new();
    let mut monday = monday_on_or_before(date(2018, 12, 1)).unwrap();
    let end = date(2027, 2, 1);
    while monday <= end {
        let info = resolve_week(monday).unwrap();
        owned
            .entry((info.year, info.month))
            .or_default()
            .push(info.week_number);
        monday += Duration::days(7);
    }

    for ((year, month), weeks) in owned {
        // Edge months of the scan are only partially covered.
        if !(2019..=2026).contains(&year) {
            continue;
        }
        let expected: Vec<u32> = (1..=weeks.len() as u32).collect();
        assert_eq!(weeks, expected, "{year}-{month:02}");
    }
}

#[test]
fn week_navigation_is_symmetric() {
    let mut monday = monday_on_or_before(date(2024, 1, 1)).unwrap();
    let end = date(2025, 1, 31);
    while monday <= end {
        let info = resolve_week(monday).unwrap();
        let forward = next_week(&info).unwrap();
        assert_eq!(previous_week(&forward).unwrap(), info, "{monday}");
        let backward = previous_week(&info).unwrap();
        assert_eq!(next_week(&backward).unwrap(), info, "{monday}");
        monday += Duration::days(7);
    }
}

#[test]
fn long_navigation_walk_returns_to_origin() {
    let origin = resolve_week(date(2024, 8, 14)).unwrap();
    let mut cursor = origin;
    for _ in 0..120 {
        cursor = next_week(&cursor).unwrap();
    }
    for _ in 0..120 {
        cursor = previous_week(&cursor).unwrap();
    }
    assert_eq!(cursor, origin);
}

#[test]
fn derivation_rejects_out_of_range_components() {
    assert_eq!(
        week_dates(&WeekInfo::new(2024, 0, 1)),
        Err(CalendarError::MonthOutOfRange(0))
    );
    assert_eq!(
        next_week(&WeekInfo::new(2024, 13, 1)),
        Err(CalendarError::MonthOutOfRange(13))
    );
    assert_eq!(
        previous_week(&WeekInfo::new(2024, 8, 0)),
        Err(CalendarError::WeekOutOfRange(0))
    );
    assert_eq!(
        first_monday_of_month(300_000, 1),
        Err(CalendarError::InvalidDate {
            year: 300_000,
            month: 1
        })
    );
}

#[test]
fn resolution_reports_errors_at_the_calendar_bounds() {
    // Dates before the first representable Monday have no enclosing week.
    assert!(matches!(
        monday_on_or_before(NaiveDate::MIN),
        Err(CalendarError::InvalidDate { .. })
    ));
    assert!(matches!(
        resolve_week(NaiveDate::MIN),
        Err(CalendarError::InvalidDate { .. })
    ));
    // The closing days of the range sit in a week whose later days are not
    // representable.
    assert!(matches!(
        resolve_week(NaiveDate::MAX),
        Err(CalendarError::InvalidDate { .. })
    ));

    // The last week that fully fits still resolves; stepping past it
    // reports an error instead of overflowing.
    let last_monday = monday_on_or_before(NaiveDate::MAX - Duration::days(6)).unwrap();
    let last_week = resolve_week(last_monday).unwrap();
    assert!(matches!(
        next_week(&last_week),
        Err(CalendarError::InvalidDate { .. })
    ));

    // Symmetric at the opening edge.
    let first_monday = monday_on_or_before(NaiveDate::MIN + Duration::days(6)).unwrap();
    let first_week = resolve_week(first_monday).unwrap();
    assert!(matches!(
        previous_week(&first_week),
        Err(CalendarError::InvalidDate { .. })
    ));
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}
