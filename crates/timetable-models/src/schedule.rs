//! Schedule domain models and DTOs.
//!
//! Three layers live here:
//!
//! - [`LessonRow`]: one flat row of the schedule join query, exactly as SQLx decodes it
//! - [`LessonRecord`]: the same row with its optional joins folded into nested values
//! - [`ScheduleByDateDto`] / [`LessonDto`] / [`LessonPartDto`]: the calendar-shaped response
//!
//! The row-to-calendar aggregation itself lives in the server crate.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use crate::ids::{BuildingId, ClassroomId, GroupId, ScheduleId, TeacherId};

/// Which part of a student group a lesson applies to.
///
/// Declaration order is significant: it is the ordinal used for sorting, for
/// the canonical-record tie-break, and for the key order of
/// [`LessonDto::group_parts`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, sqlx::Type,
    ToSchema,
)]
#[sqlx(type_name = "lesson_group_part", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum GroupPart {
    /// The whole group attends.
    Full,
    /// First sub-group only.
    Sub1,
    /// Second sub-group only.
    Sub2,
}

impl GroupPart {
    /// Every variant, in declaration order.
    pub const ALL: [GroupPart; 3] = [GroupPart::Full, GroupPart::Sub1, GroupPart::Sub2];
}

/// Inclusive calendar range taken from the query string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema, IntoParams)]
#[validate(schema(function = "validate_date_range"))]
#[into_params(parameter_in = Query)]
pub struct DateRange {
    /// First day of the range (inclusive), `YYYY-MM-DD`
    pub start: NaiveDate,
    /// Last day of the range (inclusive), `YYYY-MM-DD`
    pub end: NaiveDate,
}

pub const INVALID_RANGE_MESSAGE: &str = "Start date must not be after end date";

impl DateRange {
    pub const fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// `false` when `start` is strictly after `end`.
    pub fn is_ordered(&self) -> bool {
        self.start <= self.end
    }

    /// Every date from `start` to `end`, inclusive. Empty when the range is not ordered.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let end = self.end;
        self.start.iter_days().take_while(move |day| *day <= end)
    }
}

fn validate_date_range(range: &DateRange) -> Result<(), ValidationError> {
    if range.is_ordered() {
        return Ok(());
    }

    Err(ValidationError::new("invalid_range").with_message(INVALID_RANGE_MESSAGE.into()))
}

/// One row of the schedule join query.
///
/// Every joined table except `lesson_times` is a `LEFT JOIN`, so their
/// columns are nullable even where the table itself declares `NOT NULL`.
#[derive(Debug, Clone, FromRow)]
pub struct LessonRow {
    pub schedule_id: ScheduleId,
    pub group_id: GroupId,
    pub lesson_date: NaiveDate,
    pub weekday_name: Option<String>,
    pub lesson_number: i32,
    pub time_start: Option<NaiveTime>,
    pub time_end: Option<NaiveTime>,
    pub group_part: GroupPart,
    pub subject_name: Option<String>,
    pub teacher_id: Option<TeacherId>,
    pub teacher_last_name: Option<String>,
    pub teacher_first_name: Option<String>,
    pub teacher_middle_name: Option<String>,
    pub teacher_position: Option<String>,
    pub classroom_id: Option<ClassroomId>,
    pub room_number: Option<String>,
    pub building_id: Option<BuildingId>,
    pub building_name: Option<String>,
    pub building_address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonTime {
    pub number: i32,
    pub start: Option<NaiveTime>,
    pub end: Option<NaiveTime>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Teacher {
    pub last_name: String,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub position: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Building {
    pub name: String,
    pub address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classroom {
    pub room_number: String,
    pub building: Option<Building>,
}

/// A single scheduled lesson for one group part on one date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonRecord {
    pub group_id: GroupId,
    pub lesson_date: NaiveDate,
    pub weekday_name: Option<String>,
    pub time: LessonTime,
    pub group_part: GroupPart,
    pub subject: Option<String>,
    pub teacher: Option<Teacher>,
    pub classroom: Option<Classroom>,
}

impl From<LessonRow> for LessonRecord {
    fn from(row: LessonRow) -> Self {
        let teacher = row.teacher_id.map(|_| Teacher {
            last_name: row.teacher_last_name.unwrap_or_default(),
            first_name: row.teacher_first_name.unwrap_or_default(),
            middle_name: row.teacher_middle_name,
            position: row.teacher_position,
        });

        let building = row.building_id.map(|_| Building {
            name: row.building_name.unwrap_or_default(),
            address: row.building_address,
        });

        let classroom = row.classroom_id.map(|_| Classroom {
            room_number: row.room_number.unwrap_or_default(),
            building,
        });

        Self {
            group_id: row.group_id,
            lesson_date: row.lesson_date,
            weekday_name: row.weekday_name,
            time: LessonTime {
                number: row.lesson_number,
                start: row.time_start,
                end: row.time_end,
            },
            group_part: row.group_part,
            subject: row.subject_name,
            teacher,
            classroom,
        }
    }
}

/// What one group part does during a lesson slot.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub struct LessonPartDto {
    pub subject: Option<String>,
    pub teacher: Option<String>,
    pub teacher_position: Option<String>,
    pub classroom: Option<String>,
    pub building: Option<String>,
    pub address: Option<String>,
}

/// One lesson slot of a day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LessonDto {
    pub lesson_number: i32,
    /// `HH:MM-HH:MM`; `null` when the slot has no start or end time
    pub time: Option<String>,
    pub subject: Option<String>,
    pub teacher: Option<String>,
    pub teacher_position: Option<String>,
    pub classroom: Option<String>,
    pub building: Option<String>,
    pub address: Option<String>,
    /// Always holds every [`GroupPart`]; `null` means the part has no lesson in this slot
    #[schema(value_type = BTreeMap<GroupPart, LessonPartDto>)]
    pub group_parts: BTreeMap<GroupPart, Option<LessonPartDto>>,
}

/// One calendar date of a group's schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ScheduleByDateDto {
    pub lesson_date: NaiveDate,
    pub weekday: String,
    pub lessons: Vec<LessonDto>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn row() -> LessonRow {
        LessonRow {
            schedule_id: ScheduleId::new(1),
            group_id: GroupId::new(2),
            lesson_date: date(2024, 9, 2),
            weekday_name: Some("Понедельник".into()),
            lesson_number: 1,
            time_start: NaiveTime::from_hms_opt(8, 30, 0),
            time_end: NaiveTime::from_hms_opt(10, 0, 0),
            group_part: GroupPart::Full,
            subject_name: Some("Mathematics".into()),
            teacher_id: Some(TeacherId::new(3)),
            teacher_last_name: Some("Ivanov".into()),
            teacher_first_name: Some("Ivan".into()),
            teacher_middle_name: None,
            teacher_position: Some("Lecturer".into()),
            classroom_id: Some(ClassroomId::new(4)),
            room_number: Some("101".into()),
            building_id: Some(BuildingId::new(5)),
            building_name: Some("Main".into()),
            building_address: Some("1 College St".into()),
        }
    }

    #[test]
    fn test_group_part_order_matches_declaration() {
        let mut parts = vec![GroupPart::Sub2, GroupPart::Full, GroupPart::Sub1];
        parts.sort();
        assert_eq!(parts, GroupPart::ALL.to_vec());
    }

    #[test]
    fn test_group_part_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&GroupPart::Full).unwrap(), r#""FULL""#);
        assert_eq!(serde_json::to_string(&GroupPart::Sub1).unwrap(), r#""SUB1""#);
        let part: GroupPart = serde_json::from_str(r#""SUB2""#).unwrap();
        assert_eq!(part, GroupPart::Sub2);
    }

    #[test]
    fn test_date_range_validation() {
        let ok = DateRange::new(date(2024, 9, 2), date(2024, 9, 2));
        assert!(ok.validate().is_ok());

        let reversed = DateRange::new(date(2024, 9, 3), date(2024, 9, 2));
        let errors = reversed.validate().unwrap_err();
        assert!(errors.to_string().contains(INVALID_RANGE_MESSAGE));
    }

    #[test]
    fn test_date_range_days_inclusive() {
        let range = DateRange::new(date(2024, 2, 27), date(2024, 3, 1));
        let days: Vec<_> = range.days().collect();
        assert_eq!(
            days,
            vec![
                date(2024, 2, 27),
                date(2024, 2, 28),
                date(2024, 2, 29),
                date(2024, 3, 1)
            ]
        );
    }

    #[test]
    fn test_date_range_days_empty_when_reversed() {
        let range = DateRange::new(date(2024, 3, 2), date(2024, 3, 1));
        assert_eq!(range.days().count(), 0);
    }

    #[test]
    fn test_row_into_record_nests_joins() {
        let record = LessonRecord::from(row());

        assert_eq!(record.time.number, 1);
        assert_eq!(record.subject.as_deref(), Some("Mathematics"));
        let teacher = record.teacher.unwrap();
        assert_eq!(teacher.last_name, "Ivanov");
        assert_eq!(teacher.position.as_deref(), Some("Lecturer"));
        let classroom = record.classroom.unwrap();
        assert_eq!(classroom.room_number, "101");
        assert_eq!(classroom.building.unwrap().name, "Main");
    }

    #[test]
    fn test_row_without_joins_into_record() {
        let mut row = row();
        row.teacher_id = None;
        row.teacher_last_name = None;
        row.teacher_first_name = None;
        row.classroom_id = None;
        row.building_id = None;

        let record = LessonRecord::from(row);
        assert!(record.teacher.is_none());
        assert!(record.classroom.is_none());
    }

    #[test]
    fn test_lesson_dto_keeps_null_group_parts() {
        let mut group_parts = BTreeMap::new();
        group_parts.insert(GroupPart::Full, Some(LessonPartDto::default()));
        group_parts.insert(GroupPart::Sub1, None);
        group_parts.insert(GroupPart::Sub2, None);

        let dto = LessonDto {
            lesson_number: 1,
            time: None,
            subject: None,
            teacher: None,
            teacher_position: None,
            classroom: None,
            building: None,
            address: None,
            group_parts,
        };

        let json = serde_json::to_value(&dto).unwrap();
        let parts = json["group_parts"].as_object().unwrap();
        assert_eq!(parts.len(), 3);
        assert!(parts["FULL"].is_object());
        assert!(parts["SUB1"].is_null());
        assert!(parts["SUB2"].is_null());

        let back: LessonDto = serde_json::from_value(json).unwrap();
        assert_eq!(back, dto);
    }
}
