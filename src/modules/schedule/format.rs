//! Display formatting for schedule values.

use chrono::{NaiveTime, Weekday};

use timetable_models::Teacher;

/// Formats a lesson's time range as `HH:MM-HH:MM`.
///
/// Returns `None` when either bound is missing.
pub fn format_time_range(start: Option<NaiveTime>, end: Option<NaiveTime>) -> Option<String> {
    let (start, end) = (start?, end?);
    Some(format!("{}-{}", start.format("%H:%M"), end.format("%H:%M")))
}

/// Joins a teacher's last, first and middle names with single spaces.
///
/// Blank components are skipped, so a teacher without a middle name renders
/// as `Last First`. The remaining components are kept exactly as stored.
pub fn teacher_full_name(teacher: &Teacher) -> String {
    [
        Some(teacher.last_name.as_str()),
        Some(teacher.first_name.as_str()),
        teacher.middle_name.as_deref(),
    ]
    .into_iter()
    .flatten()
    .filter(|part| !part.trim().is_empty())
    .collect::<Vec<_>>()
    .join(" ")
}

/// English name of a weekday, used when the database has no weekday label.
pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
