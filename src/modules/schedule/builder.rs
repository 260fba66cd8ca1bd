//! Row-to-calendar aggregation.
//!
//! Turns the flat lesson records of one group into a calendar: one
//! [`ScheduleByDateDto`] per date of the range (Sundays excluded), each
//! holding one [`LessonDto`] per time slot, each slot holding one entry per
//! [`GroupPart`].
//!
//! Everything here is pure and infallible. Input order does not matter: days
//! and slots are re-partitioned through ordered maps, so the same set of
//! records always produces the same calendar.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};

use timetable_models::{
    DateRange, GroupPart, LessonDto, LessonPartDto, LessonRecord, ScheduleByDateDto,
};

use super::format::{format_time_range, teacher_full_name, weekday_name};

/// The weekly day that never appears in a calendar.
pub const OFF_DAY: Weekday = Weekday::Sun;

/// Identity of a lesson slot within one day.
///
/// Ordering is lesson number first, then start and end time, which is the
/// order slots are emitted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotKey {
    pub lesson_number: i32,
    pub start: Option<NaiveTime>,
    pub end: Option<NaiveTime>,
}

impl SlotKey {
    pub fn of(record: &LessonRecord) -> Self {
        Self {
            lesson_number: record.time.number,
            start: record.time.start,
            end: record.time.end,
        }
    }
}

/// Builds the calendar for `range` from every record loaded for it.
///
/// Records dated outside the range or on [`OFF_DAY`] are dropped.
pub fn build_schedule(range: DateRange, records: &[LessonRecord]) -> Vec<ScheduleByDateDto> {
    let mut by_date: BTreeMap<NaiveDate, Vec<&LessonRecord>> = BTreeMap::new();
    for record in records {
        by_date.entry(record.lesson_date).or_default().push(record);
    }

    range
        .days()
        .filter(|date| date.weekday() != OFF_DAY)
        .map(|date| match by_date.get(&date) {
            Some(day_records) => build_day(date, day_records),
            None => empty_day(date),
        })
        .collect()
}

/// A date without lessons.
pub fn empty_day(date: NaiveDate) -> ScheduleByDateDto {
    ScheduleByDateDto {
        lesson_date: date,
        weekday: weekday_name(date.weekday()).to_string(),
        lessons: Vec::new(),
    }
}

/// Builds one date from the records dated on it.
pub fn build_day(date: NaiveDate, records: &[&LessonRecord]) -> ScheduleByDateDto {
    let weekday = records
        .iter()
        .find_map(|record| record.weekday_name.clone())
        .unwrap_or_else(|| weekday_name(date.weekday()).to_string());

    let mut slots: BTreeMap<SlotKey, Vec<&LessonRecord>> = BTreeMap::new();
    for &record in records {
        slots.entry(SlotKey::of(record)).or_default().push(record);
    }

    let lessons = slots
        .into_iter()
        .map(|(key, slot_records)| merge_slot(key, &slot_records))
        .collect();

    ScheduleByDateDto {
        lesson_date: date,
        weekday,
        lessons,
    }
}

/// Merges every record of one slot into a single lesson.
///
/// The canonical record is the `FULL` one when present, otherwise the one
/// with the lowest group part. When a group part occurs more than once the
/// first record wins, for the canonical fields and the mapping alike.
pub fn merge_slot(key: SlotKey, records: &[&LessonRecord]) -> LessonDto {
    let canonical = records
        .iter()
        .min_by_key(|record| record.group_part)
        .map(|record| lesson_part(record))
        .unwrap_or_default();

    let mut group_parts: BTreeMap<GroupPart, Option<LessonPartDto>> = BTreeMap::new();
    for record in records {
        group_parts
            .entry(record.group_part)
            .or_insert_with(|| Some(lesson_part(record)));
    }
    for part in GroupPart::ALL {
        group_parts.entry(part).or_insert(None);
    }

    LessonDto {
        lesson_number: key.lesson_number,
        time: format_time_range(key.start, key.end),
        subject: canonical.subject,
        teacher: canonical.teacher,
        teacher_position: canonical.teacher_position,
        classroom: canonical.classroom,
        building: canonical.building,
        address: canonical.address,
        group_parts,
    }
}

/// The display fields a single record contributes.
pub fn lesson_part(record: &LessonRecord) -> LessonPartDto {
    let building = record
        .classroom
        .as_ref()
        .and_then(|classroom| classroom.building.as_ref());

    LessonPartDto {
        subject: record.subject.clone(),
        teacher: record.teacher.as_ref().map(teacher_full_name),
        teacher_position: record
            .teacher
            .as_ref()
            .and_then(|teacher| teacher.position.clone()),
        classroom: record
            .classroom
            .as_ref()
            .map(|classroom| classroom.room_number.clone()),
        building: building.map(|building| building.name.clone()),
        address: building.and_then(|building| building.address.clone()),
    }
}
