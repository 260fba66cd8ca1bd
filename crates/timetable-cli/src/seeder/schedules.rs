//! Schedule seeding: lesson rows for every group over a date range.

use chrono::{Datelike, NaiveDate, Weekday};
use rand::Rng;
use rand::seq::SliceRandom;
use rayon::prelude::*;
use sqlx::{PgPool, Postgres, QueryBuilder, Transaction};
use std::time::Instant;
use timetable_models::{GroupId, GroupPart};

use super::models::{ReferenceIds, ScheduleSeed, SeedConfig};

/// Eight bound columns per row keeps a chunk well under the Postgres bind limit.
const BATCH_SIZE: usize = 1000;

/// Generates lessons for every group in parallel using Rayon.
///
/// Each teaching day gets a run of consecutive lesson slots. A slot is either
/// one `FULL` lesson or, with `config.split_probability`, a `SUB1`/`SUB2`
/// pair with independently drawn subject, teacher and classroom. Sundays get
/// nothing.
pub fn generate_schedules(
    config: &SeedConfig,
    groups: &[GroupId],
    refs: &ReferenceIds,
) -> Vec<ScheduleSeed> {
    if refs.lesson_times.is_empty()
        || refs.subjects.is_empty()
        || refs.teachers.is_empty()
        || refs.classrooms.is_empty()
    {
        return Vec::new();
    }

    let dates: Vec<NaiveDate> = config
        .days()
        .filter(|date| date.weekday() != Weekday::Sun)
        .collect();

    groups
        .par_iter()
        .flat_map_iter(|&group_id| {
            let mut rng = rand::thread_rng();
            let mut rows = Vec::new();
            for &date in &dates {
                generate_day(config, refs, group_id, date, &mut rng, &mut rows);
            }
            rows
        })
        .collect()
}

fn generate_day(
    config: &SeedConfig,
    refs: &ReferenceIds,
    group_id: GroupId,
    date: NaiveDate,
    rng: &mut impl Rng,
    rows: &mut Vec<ScheduleSeed>,
) {
    let slots = refs.lesson_times.len();
    let max = config.max_lessons_per_day.min(slots);
    let min = config.min_lessons_per_day.min(max);
    let count = rng.gen_range(min..=max);
    if count == 0 {
        return;
    }
    let first = rng.gen_range(0..=slots - count);

    for &lesson_time_id in &refs.lesson_times[first..first + count] {
        let parts: &[GroupPart] = if rng.gen_bool(config.split_probability) {
            &[GroupPart::Sub1, GroupPart::Sub2]
        } else {
            &[GroupPart::Full]
        };

        for &group_part in parts {
            let (Some(&subject_id), Some(&teacher_id), Some(&classroom_id)) = (
                refs.subjects.choose(rng),
                refs.teachers.choose(rng),
                refs.classrooms.choose(rng),
            ) else {
                return;
            };

            rows.push(ScheduleSeed {
                group_id,
                lesson_date: date,
                weekday_id: refs.weekdays.get(&date.weekday()).copied(),
                lesson_time_id,
                group_part,
                subject_id,
                teacher_id,
                classroom_id,
            });
        }
    }
}

/// Seeds schedules into the database
pub async fn seed_schedules(
    db: &PgPool,
    config: &SeedConfig,
    groups: &[GroupId],
    refs: &ReferenceIds,
) -> Result<u64, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!(
        "🗓️  Seeding schedules for {} groups from {} to {}...",
        groups.len(),
        config.start,
        config.end
    );

    let rows = generate_schedules(config, groups, refs);
    let inserted = insert_schedules_batch(db, &rows).await?;

    println!(
        "   ✓ Inserted {} lesson rows in {:?}",
        inserted,
        start_time.elapsed()
    );

    Ok(inserted)
}

/// Inserts schedules in batches inside one transaction
pub async fn insert_schedules_batch(
    db: &PgPool,
    rows: &[ScheduleSeed],
) -> Result<u64, Box<dyn std::error::Error>> {
    let mut tx = db.begin().await?;
    let mut inserted = 0;

    for chunk in rows.chunks(BATCH_SIZE) {
        inserted += insert_schedules_chunk(&mut tx, chunk).await?;
    }

    tx.commit().await?;
    Ok(inserted)
}

async fn insert_schedules_chunk(
    tx: &mut Transaction<'_, Postgres>,
    rows: &[ScheduleSeed],
) -> Result<u64, Box<dyn std::error::Error>> {
    if rows.is_empty() {
        return Ok(0);
    }

    let mut builder = QueryBuilder::<Postgres>::new(
        "INSERT INTO schedules (group_id, lesson_date, weekday_id, lesson_time_id, group_part, subject_id, teacher_id, classroom_id) ",
    );
    builder.push_values(rows, |mut row, seed| {
        row.push_bind(seed.group_id)
            .push_bind(seed.lesson_date)
            .push_bind(seed.weekday_id)
            .push_bind(seed.lesson_time_id)
            .push_bind(seed.group_part)
            .push_bind(seed.subject_id)
            .push_bind(seed.teacher_id)
            .push_bind(seed.classroom_id);
    });
    builder.push(" ON CONFLICT DO NOTHING");

    let result = builder.build().execute(&mut **tx).await?;
    Ok(result.rows_affected())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use timetable_models::{ClassroomId, LessonTimeId, SubjectId, TeacherId, WeekdayId};

    fn refs() -> ReferenceIds {
        ReferenceIds {
            weekdays: HashMap::from([(Weekday::Mon, WeekdayId::new(1))]),
            lesson_times: (1..=6).map(LessonTimeId::new).collect(),
            subjects: (1..=5).map(SubjectId::new).collect(),
            teachers: (1..=5).map(TeacherId::new).collect(),
            classrooms: (1..=5).map(ClassroomId::new).collect(),
        }
    }

    fn week() -> SeedConfig {
        SeedConfig::new(
            NaiveDate::from_ymd_opt(2024, 9, 2).unwrap(),
            NaiveDate::from_ymd_opt(2024, 9, 8).unwrap(),
        )
    }

    #[test]
    fn test_no_lessons_on_sunday() {
        let rows = generate_schedules(&week(), &[GroupId::new(1), GroupId::new(2)], &refs());

        assert!(!rows.is_empty());
        assert!(rows.iter().all(|r| r.lesson_date.weekday() != Weekday::Sun));
    }

    #[test]
    fn test_lessons_per_day_within_bounds() {
        let config = week().with_split_probability(0.0);
        let rows = generate_schedules(&config, &[GroupId::new(1)], &refs());

        let mut per_day: HashMap<NaiveDate, usize> = HashMap::new();
        for row in &rows {
            assert_eq!(row.group_part, GroupPart::Full);
            *per_day.entry(row.lesson_date).or_default() += 1;
        }
        assert_eq!(per_day.len(), 6);
        assert!(per_day.values().all(|&n| (2..=4).contains(&n)));
    }

    #[test]
    fn test_split_lessons_come_in_pairs() {
        let config = week().with_split_probability(1.0);
        let rows = generate_schedules(&config, &[GroupId::new(1)], &refs());

        assert!(rows.iter().all(|r| r.group_part != GroupPart::Full));
        let sub1 = rows.iter().filter(|r| r.group_part == GroupPart::Sub1).count();
        let sub2 = rows.iter().filter(|r| r.group_part == GroupPart::Sub2).count();
        assert_eq!(sub1, sub2);
    }

    #[test]
    fn test_weekday_label_is_linked_when_known() {
        let rows = generate_schedules(&week(), &[GroupId::new(1)], &refs());

        for row in rows {
            if row.lesson_date.weekday() == Weekday::Mon {
                assert_eq!(row.weekday_id, Some(WeekdayId::new(1)));
            } else {
                assert_eq!(row.weekday_id, None);
            }
        }
    }

    #[test]
    fn test_empty_reference_data_generates_nothing() {
        let mut refs = refs();
        refs.teachers.clear();
        assert!(generate_schedules(&week(), &[GroupId::new(1)], &refs).is_empty());
    }
}
