use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::get_groups;

pub fn init_groups_router() -> Router<AppState> {
    Router::new().route("/", get(get_groups))
}
