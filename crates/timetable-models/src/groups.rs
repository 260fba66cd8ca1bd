//! Student group models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::ids::GroupId;

/// A student group as listed by `GET /api/groups`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct GroupDto {
    pub group_id: GroupId,
    /// Display name, e.g. `ИС-21`. Unique and matched exactly by the schedule endpoint.
    pub group_name: String,
    pub course: i32,
    /// Name of the specialty the group studies.
    pub specialty: String,
}
