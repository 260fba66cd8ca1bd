use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::get_group_schedule;

pub fn init_schedule_router() -> Router<AppState> {
    Router::new().route("/group/{group_name}", get(get_group_schedule))
}
