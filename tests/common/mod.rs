#![allow(dead_code)]

use axum::Router;
use chrono::{NaiveDate, NaiveTime};
use sqlx::{PgPool, Postgres, Transaction};
use timetable::router::init_router;
use timetable::state::AppState;
use timetable_models::{
    BuildingId, ClassroomId, GroupId, GroupPart, LessonTimeId, SpecialtyId, SubjectId, TeacherId,
    WeekdayId,
};

pub fn setup_test_app(pool: PgPool) -> Router {
    init_router(AppState::new(pool))
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

pub async fn create_specialty(tx: &mut Transaction<'_, Postgres>, name: &str) -> SpecialtyId {
    sqlx::query_scalar("INSERT INTO specialties (code, name) VALUES ('00.00.00', $1) RETURNING specialty_id")
        .bind(name)
        .fetch_one(&mut **tx)
        .await
        .unwrap()
}

/// Creates a group (and a specialty for it) and returns its ID.
pub async fn create_group(tx: &mut Transaction<'_, Postgres>, group_name: &str) -> GroupId {
    let specialty_id = create_specialty(tx, "Information Systems").await;
    create_group_in(tx, group_name, 2, specialty_id).await
}

pub async fn create_group_in(
    tx: &mut Transaction<'_, Postgres>,
    group_name: &str,
    course: i32,
    specialty_id: SpecialtyId,
) -> GroupId {
    sqlx::query_scalar(
        "INSERT INTO student_groups (group_name, course, specialty_id) VALUES ($1, $2, $3) RETURNING group_id",
    )
    .bind(group_name)
    .bind(course)
    .bind(specialty_id)
    .fetch_one(&mut **tx)
    .await
    .unwrap()
}

pub async fn create_weekday(tx: &mut Transaction<'_, Postgres>, name: &str) -> WeekdayId {
    sqlx::query_scalar("INSERT INTO weekdays (name) VALUES ($1) RETURNING weekday_id")
        .bind(name)
        .fetch_one(&mut **tx)
        .await
        .unwrap()
}

pub async fn create_lesson_time(
    tx: &mut Transaction<'_, Postgres>,
    lesson_number: i32,
    start: Option<NaiveTime>,
    end: Option<NaiveTime>,
) -> LessonTimeId {
    sqlx::query_scalar(
        "INSERT INTO lesson_times (lesson_number, time_start, time_end) VALUES ($1, $2, $3) RETURNING lesson_time_id",
    )
    .bind(lesson_number)
    .bind(start)
    .bind(end)
    .fetch_one(&mut **tx)
    .await
    .unwrap()
}

pub async fn create_subject(tx: &mut Transaction<'_, Postgres>, name: &str) -> SubjectId {
    sqlx::query_scalar("INSERT INTO subjects (name) VALUES ($1) RETURNING subject_id")
        .bind(name)
        .fetch_one(&mut **tx)
        .await
        .unwrap()
}

pub async fn create_teacher(
    tx: &mut Transaction<'_, Postgres>,
    last_name: &str,
    first_name: &str,
    middle_name: Option<&str>,
    position: Option<&str>,
) -> TeacherId {
    sqlx::query_scalar(
        "INSERT INTO teachers (last_name, first_name, middle_name, position) VALUES ($1, $2, $3, $4) RETURNING teacher_id",
    )
    .bind(last_name)
    .bind(first_name)
    .bind(middle_name)
    .bind(position)
    .fetch_one(&mut **tx)
    .await
    .unwrap()
}

pub async fn create_classroom(
    tx: &mut Transaction<'_, Postgres>,
    room_number: &str,
    building: Option<(&str, Option<&str>)>,
) -> ClassroomId {
    let building_id: Option<BuildingId> = match building {
        Some((name, address)) => Some(
            sqlx::query_scalar(
                "INSERT INTO buildings (name, address) VALUES ($1, $2) RETURNING building_id",
            )
            .bind(name)
            .bind(address)
            .fetch_one(&mut **tx)
            .await
            .unwrap(),
        ),
        None => None,
    };

    sqlx::query_scalar(
        "INSERT INTO classrooms (room_number, building_id) VALUES ($1, $2) RETURNING classroom_id",
    )
    .bind(room_number)
    .bind(building_id)
    .fetch_one(&mut **tx)
    .await
    .unwrap()
}

/// A `schedules` row; optional references stay NULL unless set.
pub struct TestLesson {
    pub group_id: GroupId,
    pub lesson_date: NaiveDate,
    pub lesson_time_id: LessonTimeId,
    pub group_part: GroupPart,
    pub weekday_id: Option<WeekdayId>,
    pub subject_id: Option<SubjectId>,
    pub teacher_id: Option<TeacherId>,
    pub classroom_id: Option<ClassroomId>,
}

impl TestLesson {
    pub fn new(
        group_id: GroupId,
        lesson_date: NaiveDate,
        lesson_time_id: LessonTimeId,
        group_part: GroupPart,
    ) -> Self {
        Self {
            group_id,
            lesson_date,
            lesson_time_id,
            group_part,
            weekday_id: None,
            subject_id: None,
            teacher_id: None,
            classroom_id: None,
        }
    }

    pub fn subject(mut self, subject_id: SubjectId) -> Self {
        self.subject_id = Some(subject_id);
        self
    }

    pub fn teacher(mut self, teacher_id: TeacherId) -> Self {
        self.teacher_id = Some(teacher_id);
        self
    }

    pub fn classroom(mut self, classroom_id: ClassroomId) -> Self {
        self.classroom_id = Some(classroom_id);
        self
    }

    pub fn weekday(mut self, weekday_id: WeekdayId) -> Self {
        self.weekday_id = Some(weekday_id);
        self
    }

    pub async fn insert(self, tx: &mut Transaction<'_, Postgres>) {
        sqlx::query(
            r#"INSERT INTO schedules
                (group_id, lesson_date, weekday_id, lesson_time_id, group_part, subject_id, teacher_id, classroom_id)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8)"#,
        )
        .bind(self.group_id)
        .bind(self.lesson_date)
        .bind(self.weekday_id)
        .bind(self.lesson_time_id)
        .bind(self.group_part)
        .bind(self.subject_id)
        .bind(self.teacher_id)
        .bind(self.classroom_id)
        .execute(&mut **tx)
        .await
        .unwrap();
    }
}
