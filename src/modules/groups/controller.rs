use axum::{Json, extract::State};
use tracing::instrument;

use timetable_core::AppError;

use crate::modules::groups::model::GroupDto;
use crate::modules::groups::service::GroupService;
use crate::state::AppState;

/// List all groups, sorted by name
#[utoipa::path(
    get,
    path = "/api/groups",
    responses(
        (status = 200, description = "All groups", body = Vec<GroupDto>)
    ),
    tag = "Groups"
)]
#[instrument(skip(state))]
pub async fn get_groups(State(state): State<AppState>) -> Result<Json<Vec<GroupDto>>, AppError> {
    let groups = GroupService::get_all_groups(&state.db).await?;

    Ok(Json(groups))
}
