//! Reference data seeding: weekdays, lesson times, specialties, groups,
//! subjects, teachers, buildings and classrooms.

use chrono::{NaiveTime, Weekday};
use fake::Fake;
use fake::faker::address::en::{BuildingNumber, CityName, StreetName};
use fake::faker::name::en::{FirstName, LastName};
use rand::Rng;
use rayon::prelude::*;
use sqlx::{PgPool, Postgres, QueryBuilder, Transaction};
use std::collections::HashMap;
use std::time::Instant;
use timetable_models::{
    BuildingId, ClassroomId, GroupId, LessonTimeId, SpecialtyId, SubjectId, TeacherId, WeekdayId,
};

use super::models::{
    BuildingSeed, GroupSeed, LessonTimeSeed, ReferenceIds, SeedConfig, SpecialtySeed, TeacherSeed,
};

type SeedResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Teaching days, Monday through Saturday.
pub const TEACHING_DAYS: [Weekday; 6] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

const SUBJECTS: &[&str] = &[
    "Mathematics",
    "Physics",
    "Chemistry",
    "History",
    "Literature",
    "English",
    "Physical Education",
    "Computer Networks",
    "Databases",
    "Operating Systems",
    "Programming Fundamentals",
    "Web Development",
    "Economics",
    "Law Basics",
    "Technical Drawing",
];

const POSITIONS: &[&str] = &["Lecturer", "Senior Lecturer", "Head of Department", "Teacher"];

pub fn weekday_label(weekday: Weekday) -> &'static str {
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

/// The college bell schedule: 90-minute lessons with a long break after the second.
pub fn lesson_times() -> Vec<LessonTimeSeed> {
    [
        (1, (8, 30), (10, 0)),
        (2, (10, 10), (11, 40)),
        (3, (12, 10), (13, 40)),
        (4, (13, 50), (15, 20)),
        (5, (15, 30), (17, 0)),
        (6, (17, 10), (18, 40)),
    ]
    .into_iter()
    .filter_map(|(lesson_number, (sh, sm), (eh, em))| {
        Some(LessonTimeSeed {
            lesson_number,
            time_start: NaiveTime::from_hms_opt(sh, sm, 0)?,
            time_end: NaiveTime::from_hms_opt(eh, em, 0)?,
        })
    })
    .collect()
}

pub fn specialties() -> Vec<SpecialtySeed> {
    [
        ("09.02.07", "Information Systems and Programming", "IS"),
        ("09.02.06", "Network and System Administration", "SA"),
        ("38.02.01", "Economics and Accounting", "EC"),
        ("40.02.01", "Law and Social Security", "LW"),
    ]
    .into_iter()
    .map(|(code, name, abbreviation)| SpecialtySeed {
        code: code.into(),
        name: name.into(),
        abbreviation: abbreviation.into(),
    })
    .collect()
}

/// Names groups `<abbreviation>-<course><n>`, cycling through specialties and courses 1..=4.
pub fn generate_groups(
    count: usize,
    specialties: &[(SpecialtyId, String)],
) -> Vec<GroupSeed> {
    if specialties.is_empty() {
        return Vec::new();
    }

    (0..count)
        .map(|i| {
            let (specialty_id, abbreviation) = &specialties[i % specialties.len()];
            let course = (i / specialties.len()) % 4 + 1;
            let stream = i / (specialties.len() * 4) + 1;
            GroupSeed {
                group_name: format!("{}-{}{}", abbreviation, course, stream),
                course: course as i32,
                specialty_id: *specialty_id,
            }
        })
        .collect()
}

/// Generates teacher data in parallel using Rayon
pub fn generate_teachers(count: usize) -> Vec<TeacherSeed> {
    (0..count)
        .into_par_iter()
        .map(|i| {
            let mut rng = rand::thread_rng();
            TeacherSeed {
                last_name: LastName().fake(),
                first_name: FirstName().fake(),
                middle_name: rng.gen_bool(0.7).then(|| FirstName().fake()),
                position: POSITIONS[i % POSITIONS.len()].to_string(),
            }
        })
        .collect()
}

pub fn generate_buildings(count: usize) -> Vec<BuildingSeed> {
    (0..count)
        .map(|i| {
            let city: String = CityName().fake();
            let street: String = StreetName().fake();
            let number: String = BuildingNumber().fake();
            BuildingSeed {
                name: format!("Building {}", i + 1),
                address: format!("{} {}, {}", number, street, city),
            }
        })
        .collect()
}

/// Seeds every reference table and returns the IDs schedules may use.
pub async fn seed_reference_data(
    db: &PgPool,
    config: &SeedConfig,
) -> SeedResult<(Vec<GroupId>, ReferenceIds)> {
    let start_time = Instant::now();
    println!("📚 Seeding reference data...");

    let mut tx = db.begin().await?;

    let weekdays = insert_weekdays(&mut tx).await?;
    let lesson_times = insert_lesson_times(&mut tx, &lesson_times()).await?;
    let specialties = insert_specialties(&mut tx, &specialties()).await?;
    let groups = insert_groups(&mut tx, &generate_groups(config.groups, &specialties)).await?;
    let subjects = insert_subjects(&mut tx, SUBJECTS).await?;
    let teachers = insert_teachers(&mut tx, &generate_teachers(config.teachers)).await?;
    let buildings = insert_buildings(&mut tx, &generate_buildings(config.buildings)).await?;
    let classrooms =
        insert_classrooms(&mut tx, &buildings, config.classrooms_per_building).await?;

    tx.commit().await?;

    println!(
        "   ✓ {} groups, {} subjects, {} teachers, {} classrooms in {:?}",
        groups.len(),
        subjects.len(),
        teachers.len(),
        classrooms.len(),
        start_time.elapsed()
    );

    Ok((
        groups,
        ReferenceIds {
            weekdays,
            lesson_times,
            subjects,
            teachers,
            classrooms,
        },
    ))
}

async fn insert_weekdays(
    tx: &mut Transaction<'_, Postgres>,
) -> SeedResult<HashMap<Weekday, WeekdayId>> {
    let mut builder = QueryBuilder::<Postgres>::new("INSERT INTO weekdays (name) ");
    builder.push_values(TEACHING_DAYS, |mut row, weekday| {
        row.push_bind(weekday_label(weekday));
    });
    builder.push(
        " ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name RETURNING weekday_id, name",
    );

    let rows: Vec<(WeekdayId, String)> = builder.build_query_as().fetch_all(&mut **tx).await?;
    Ok(rows
        .into_iter()
        .filter_map(|(id, name)| {
            TEACHING_DAYS
                .into_iter()
                .find(|&day| weekday_label(day) == name)
                .map(|day| (day, id))
        })
        .collect())
}

async fn insert_lesson_times(
    tx: &mut Transaction<'_, Postgres>,
    times: &[LessonTimeSeed],
) -> SeedResult<Vec<LessonTimeId>> {
    let mut builder =
        QueryBuilder::<Postgres>::new("INSERT INTO lesson_times (lesson_number, time_start, time_end) ");
    builder.push_values(times, |mut row, time| {
        row.push_bind(time.lesson_number)
            .push_bind(time.time_start)
            .push_bind(time.time_end);
    });
    builder.push(" RETURNING lesson_time_id");

    Ok(builder.build_query_scalar().fetch_all(&mut **tx).await?)
}

async fn insert_specialties(
    tx: &mut Transaction<'_, Postgres>,
    specialties: &[SpecialtySeed],
) -> SeedResult<Vec<(SpecialtyId, String)>> {
    let mut builder = QueryBuilder::<Postgres>::new("INSERT INTO specialties (code, name) ");
    builder.push_values(specialties, |mut row, specialty| {
        row.push_bind(&specialty.code).push_bind(&specialty.name);
    });
    builder.push(" RETURNING specialty_id");

    let ids: Vec<SpecialtyId> = builder.build_query_scalar().fetch_all(&mut **tx).await?;
    Ok(ids
        .into_iter()
        .zip(specialties.iter().map(|s| s.abbreviation.clone()))
        .collect())
}

async fn insert_groups(
    tx: &mut Transaction<'_, Postgres>,
    groups: &[GroupSeed],
) -> SeedResult<Vec<GroupId>> {
    if groups.is_empty() {
        return Ok(Vec::new());
    }

    let mut builder =
        QueryBuilder::<Postgres>::new("INSERT INTO student_groups (group_name, course, specialty_id) ");
    builder.push_values(groups, |mut row, group| {
        row.push_bind(&group.group_name)
            .push_bind(group.course)
            .push_bind(group.specialty_id);
    });
    builder.push(" RETURNING group_id");

    Ok(builder.build_query_scalar().fetch_all(&mut **tx).await?)
}

async fn insert_subjects(
    tx: &mut Transaction<'_, Postgres>,
    subjects: &[&str],
) -> SeedResult<Vec<SubjectId>> {
    let mut builder = QueryBuilder::<Postgres>::new("INSERT INTO subjects (name) ");
    builder.push_values(subjects, |mut row, subject| {
        row.push_bind(*subject);
    });
    builder.push(" RETURNING subject_id");

    Ok(builder.build_query_scalar().fetch_all(&mut **tx).await?)
}

async fn insert_teachers(
    tx: &mut Transaction<'_, Postgres>,
    teachers: &[TeacherSeed],
) -> SeedResult<Vec<TeacherId>> {
    if teachers.is_empty() {
        return Ok(Vec::new());
    }

    let mut builder = QueryBuilder::<Postgres>::new(
        "INSERT INTO teachers (last_name, first_name, middle_name, position) ",
    );
    builder.push_values(teachers, |mut row, teacher| {
        row.push_bind(&teacher.last_name)
            .push_bind(&teacher.first_name)
            .push_bind(&teacher.middle_name)
            .push_bind(&teacher.position);
    });
    builder.push(" RETURNING teacher_id");

    Ok(builder.build_query_scalar().fetch_all(&mut **tx).await?)
}

async fn insert_buildings(
    tx: &mut Transaction<'_, Postgres>,
    buildings: &[BuildingSeed],
) -> SeedResult<Vec<BuildingId>> {
    if buildings.is_empty() {
        return Ok(Vec::new());
    }

    let mut builder = QueryBuilder::<Postgres>::new("INSERT INTO buildings (name, address) ");
    builder.push_values(buildings, |mut row, building| {
        row.push_bind(&building.name).push_bind(&building.address);
    });
    builder.push(" RETURNING building_id");

    Ok(builder.build_query_scalar().fetch_all(&mut **tx).await?)
}

/// Rooms are numbered `<building><floor><nn>`, e.g. `1203`.
async fn insert_classrooms(
    tx: &mut Transaction<'_, Postgres>,
    buildings: &[BuildingId],
    per_building: usize,
) -> SeedResult<Vec<ClassroomId>> {
    let rooms: Vec<(String, BuildingId)> = buildings
        .iter()
        .enumerate()
        .flat_map(|(b, &building_id)| {
            (0..per_building).map(move |i| {
                let floor = i / 10 + 1;
                (format!("{}{}{:02}", b + 1, floor, i % 10 + 1), building_id)
            })
        })
        .collect();

    if rooms.is_empty() {
        return Ok(Vec::new());
    }

    let mut builder =
        QueryBuilder::<Postgres>::new("INSERT INTO classrooms (room_number, building_id) ");
    builder.push_values(&rooms, |mut row, (room_number, building_id)| {
        row.push_bind(room_number).push_bind(*building_id);
    });
    builder.push(" RETURNING classroom_id");

    Ok(builder.build_query_scalar().fetch_all(&mut **tx).await?)
}
