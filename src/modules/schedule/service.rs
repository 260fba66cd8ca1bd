use sqlx::PgPool;
use tracing::{Instrument, instrument, warn};

use timetable_cache::{RedisCache, keys};
use timetable_core::AppError;
use timetable_models::{
    DateRange, GroupId, INVALID_RANGE_MESSAGE, LessonRecord, LessonRow, ScheduleByDateDto,
};

use crate::db_operation_span;
use crate::metrics::{
    ScheduleOutcome, track_schedule_built, track_schedule_cache, track_schedule_outcome,
};
use crate::modules::schedule::builder::build_schedule;
use crate::utils::tracing::{ErrorExt, record_error, record_success};

const LESSONS_QUERY: &str = r#"
    SELECT
        s.schedule_id,
        s.group_id,
        s.lesson_date,
        w.name AS weekday_name,
        lt.lesson_number,
        lt.time_start,
        lt.time_end,
        s.group_part,
        sub.name AS subject_name,
        t.teacher_id,
        t.last_name AS teacher_last_name,
        t.first_name AS teacher_first_name,
        t.middle_name AS teacher_middle_name,
        t.position AS teacher_position,
        c.classroom_id,
        c.room_number,
        b.building_id,
        b.name AS building_name,
        b.address AS building_address
    FROM schedules s
    JOIN lesson_times lt ON lt.lesson_time_id = s.lesson_time_id
    LEFT JOIN weekdays w ON w.weekday_id = s.weekday_id
    LEFT JOIN subjects sub ON sub.subject_id = s.subject_id
    LEFT JOIN teachers t ON t.teacher_id = s.teacher_id
    LEFT JOIN classrooms c ON c.classroom_id = s.classroom_id
    LEFT JOIN buildings b ON b.building_id = c.building_id
    WHERE s.group_id = $1
      AND s.lesson_date BETWEEN $2 AND $3
    ORDER BY s.lesson_date, lt.lesson_number, s.group_part
"#;

pub struct ScheduleService;

impl ScheduleService {
    /// Builds the calendar of `group_name` for every date of `range`.
    ///
    /// Fails with 400 when the range is reversed and 404 when no group has
    /// exactly this name. Successful results are cached when Redis is
    /// configured.
    #[instrument(
        skip(db, cache),
        fields(otel.status_code = tracing::field::Empty, error.message = tracing::field::Empty)
    )]
    pub async fn get_schedule_for_group(
        db: &PgPool,
        cache: Option<&RedisCache>,
        group_name: &str,
        range: DateRange,
    ) -> Result<Vec<ScheduleByDateDto>, AppError> {
        let result = Self::fetch_or_build(db, cache, group_name, range).await;

        let outcome = match &result {
            Ok((_, true)) => ScheduleOutcome::Cached,
            Ok((_, false)) => ScheduleOutcome::Ok,
            Err(e) => ScheduleOutcome::from_status(e.status),
        };
        track_schedule_outcome(outcome);

        match &result {
            Ok(_) => record_success(),
            Err(e) => record_error(&e.error.to_string()),
        }

        result.map(|(schedule, _)| schedule)
    }

    /// Cached calendar when present, otherwise a freshly built one.
    /// The flag is `true` for a cache hit.
    async fn fetch_or_build(
        db: &PgPool,
        cache: Option<&RedisCache>,
        group_name: &str,
        range: DateRange,
    ) -> Result<(Vec<ScheduleByDateDto>, bool), AppError> {
        Self::validate_dates(range)?;

        let cache_key = keys::schedule::by_group_range(group_name, range.start, range.end);
        if let Some(cache) = cache {
            let cached: Option<Vec<ScheduleByDateDto>> = cache.get(&cache_key).await;
            track_schedule_cache(cached.is_some());
            if let Some(schedule) = cached {
                return Ok((schedule, true));
            }
        }

        let group_id = Self::get_group_id_by_name(db, group_name).await?;
        let records = Self::load_lessons(db, group_id, range).await?;
        let schedule = build_schedule(range, &records);

        track_schedule_built(&schedule);

        if let Some(cache) = cache
            && let Err(e) = cache.set(&cache_key, &schedule).await
        {
            warn!(error = %e, cache.key = %cache_key, "Failed to cache schedule");
        }

        Ok((schedule, false))
    }

    /// Rejects a range whose start is after its end.
    pub fn validate_dates(range: DateRange) -> Result<(), AppError> {
        if !range.is_ordered() {
            return Err(AppError::bad_request(anyhow::anyhow!(
                INVALID_RANGE_MESSAGE
            )));
        }

        Ok(())
    }

    /// Resolves a group name to its ID. The match is exact and case-sensitive.
    #[instrument(skip(db))]
    pub async fn get_group_id_by_name(db: &PgPool, group_name: &str) -> Result<GroupId, AppError> {
        let group_id = sqlx::query_scalar::<_, GroupId>(
            "SELECT group_id FROM student_groups WHERE group_name = $1",
        )
        .bind(group_name)
        .fetch_optional(db)
        .instrument(db_operation_span!("SELECT", "student_groups"))
        .await
        .log_error("resolving group by name")?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Group {} not found", group_name)))?;

        Ok(group_id)
    }

    /// Loads every lesson of a group dated within `range`, with its reference data joined.
    ///
    /// Rows come back ordered by date, lesson number and group part.
    #[instrument(skip(db))]
    pub async fn load_lessons(
        db: &PgPool,
        group_id: GroupId,
        range: DateRange,
    ) -> Result<Vec<LessonRecord>, AppError> {
        let rows = sqlx::query_as::<_, LessonRow>(LESSONS_QUERY)
            .bind(group_id)
            .bind(range.start)
            .bind(range.end)
            .fetch_all(db)
            .instrument(db_operation_span!("SELECT", "schedules", group.id = %group_id))
            .await
            .log_error("loading lessons")?;

        Ok(rows.into_iter().map(LessonRecord::from).collect())
    }
}
