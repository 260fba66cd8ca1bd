//! Seeding configuration and the rows generated before insertion.

use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Weekday};
use std::collections::HashMap;
use timetable_models::{
    ClassroomId, GroupId, GroupPart, LessonTimeId, SpecialtyId, SubjectId, TeacherId, WeekdayId,
};

pub struct SpecialtySeed {
    pub code: String,
    pub name: String,
    /// Prefix of the group names in this specialty, e.g. `IS`.
    pub abbreviation: String,
}

pub struct GroupSeed {
    pub group_name: String,
    pub course: i32,
    pub specialty_id: SpecialtyId,
}

pub struct LessonTimeSeed {
    pub lesson_number: i32,
    pub time_start: NaiveTime,
    pub time_end: NaiveTime,
}

pub struct TeacherSeed {
    pub last_name: String,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub position: String,
}

pub struct BuildingSeed {
    pub name: String,
    pub address: String,
}

/// One `schedules` row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleSeed {
    pub group_id: GroupId,
    pub lesson_date: NaiveDate,
    pub weekday_id: Option<WeekdayId>,
    pub lesson_time_id: LessonTimeId,
    pub group_part: GroupPart,
    pub subject_id: SubjectId,
    pub teacher_id: TeacherId,
    pub classroom_id: ClassroomId,
}

/// IDs of the reference rows a schedule row may point at.
#[derive(Debug, Clone, Default)]
pub struct ReferenceIds {
    pub weekdays: HashMap<Weekday, WeekdayId>,
    /// Ordered by lesson number.
    pub lesson_times: Vec<LessonTimeId>,
    pub subjects: Vec<SubjectId>,
    pub teachers: Vec<TeacherId>,
    pub classrooms: Vec<ClassroomId>,
}

/// How much data `seed_all` generates.
#[derive(Debug, Clone)]
pub struct SeedConfig {
    pub groups: usize,
    pub teachers: usize,
    pub buildings: usize,
    pub classrooms_per_building: usize,
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Chance that a lesson is taught to both sub-groups separately.
    pub split_probability: f64,
    pub min_lessons_per_day: usize,
    pub max_lessons_per_day: usize,
}

impl SeedConfig {
    /// Default volumes over the inclusive range `start..=end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            groups: 8,
            teachers: 20,
            buildings: 2,
            classrooms_per_building: 10,
            start,
            end,
            split_probability: 0.3,
            min_lessons_per_day: 2,
            max_lessons_per_day: 4,
        }
    }

    /// `weeks` whole weeks starting from the Monday of the week containing `today`.
    pub fn from_week_of(today: NaiveDate, weeks: u32) -> Self {
        let monday = today - Duration::days(today.weekday().num_days_from_monday() as i64);
        let end = monday + Duration::days(7 * weeks.max(1) as i64 - 1);
        Self::new(monday, end)
    }

    pub fn with_groups(mut self, groups: usize) -> Self {
        self.groups = groups;
        self
    }

    pub fn with_teachers(mut self, teachers: usize) -> Self {
        self.teachers = teachers;
        self
    }

    pub fn with_classrooms(mut self, buildings: usize, per_building: usize) -> Self {
        self.buildings = buildings;
        self.classrooms_per_building = per_building;
        self
    }

    pub fn with_split_probability(mut self, probability: f64) -> Self {
        self.split_probability = if probability.is_nan() {
            0.0
        } else {
            probability.clamp(0.0, 1.0)
        };
        self
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let end = self.end;
        self.start.iter_days().take_while(move |date| *date <= end)
    }
}
