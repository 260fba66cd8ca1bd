use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;

use timetable_core::{AppError, ErrorResponse};

use crate::modules::schedule::model::{DateRange, ScheduleByDateDto};
use crate::modules::schedule::service::ScheduleService;
use crate::state::AppState;
use crate::validator::ValidatedQuery;

/// Get a group's schedule for a date range
///
/// Returns one entry per date from `start` to `end` inclusive, Sundays
/// excluded. Dates without lessons are present with an empty `lessons` list.
#[utoipa::path(
    get,
    path = "/api/schedule/group/{group_name}",
    params(
        ("group_name" = String, Path, description = "Exact, case-sensitive group name"),
        DateRange
    ),
    responses(
        (status = 200, description = "Schedule by date", body = Vec<ScheduleByDateDto>),
        (status = 400, description = "Start date is after end date, or a date is malformed", body = ErrorResponse),
        (status = 404, description = "Group not found", body = ErrorResponse)
    ),
    tag = "Schedule"
)]
#[instrument(skip(state))]
pub async fn get_group_schedule(
    State(state): State<AppState>,
    Path(group_name): Path<String>,
    ValidatedQuery(range): ValidatedQuery<DateRange>,
) -> Result<Json<Vec<ScheduleByDateDto>>, AppError> {
    let schedule =
        ScheduleService::get_schedule_for_group(&state.db, state.cache.as_ref(), &group_name, range)
            .await?;

    Ok(Json(schedule))
}
