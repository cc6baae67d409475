//! Deterministic planner demo entry point.
//!
//! # Responsibility
//! - Drive the `WeekPlanner` trait end to end with scripted capabilities so
//!   the output is byte-for-byte reproducible.
//! - Keep a quick local sanity check for `weekplan_core` wiring without
//!   logging or filesystem setup.

use chrono::NaiveDate;
use std::error::Error;
use weekplan_core::{
    core_version, format_display, FixedClock, PlannerSession, SequentialTodoIdSource, WeekPlanner,
    Weekday,
};

fn main() -> Result<(), Box<dyn Error>> {
    let demo_day = NaiveDate::from_ymd_opt(2024, 8, 14).ok_or("demo date not representable")?;
    let mut session =
        PlannerSession::start(SequentialTodoIdSource::new(), FixedClock::new(demo_day))?;

    println!("weekplan_core version={}", core_version());
    println!("today={demo_day}");
    run_demo(&mut session)?;
    println!("periods={}", session.store().len());
    Ok(())
}

fn run_demo(planner: &mut dyn WeekPlanner) -> Result<(), Box<dyn Error>> {
    println!("week={}", planner.current_week().key());
    println!("range={}", planner.date_range_label()?);
    for (day, date) in Weekday::ALL.into_iter().zip(planner.current_dates()?) {
        println!("  {} {}", day.label(), format_display(date));
    }

    planner.select_day(Weekday::Wed);
    planner.rename_habit(0, "stretch");
    planner.set_habit_check(0, Weekday::Wed, true);
    planner.add_todo(Weekday::Wed);
    let added = planner
        .current_record()
        .todos(Weekday::Wed)
        .last()
        .map(|todo| todo.id)
        .ok_or("todo bucket cannot be empty")?;
    planner.set_todo_text(Weekday::Wed, added, "ship the weekly report");
    planner.toggle_todo(Weekday::Wed, added);
    planner.set_memo(Weekday::Wed, "errands after lunch");

    let record = planner.current_record();
    println!(
        "day={} habits={} todos={} checked={}",
        planner.selected_day().as_str(),
        record.habits().len(),
        record.total_todos(),
        record.checked_todos()
    );
    for todo in record.todos(Weekday::Wed) {
        println!("  [{}] {}", if todo.checked { 'x' } else { ' ' }, todo.text);
    }
    println!("  memo={}", record.memo(Weekday::Wed));

    planner.go_next_week()?;
    println!("next week={}", planner.current_week().key());
    planner.go_previous_week()?;
    println!("prev week={}", planner.current_week().key());
    planner.select_month(9)?;
    println!("september week={}", planner.current_week().key());
    planner.go_today()?;
    println!("today week={}", planner.current_week().key());
    Ok(())
}
