use utoipa::OpenApi;

use crate::modules::health::controller::HealthResponse;
use timetable_core::ErrorResponse;
use timetable_models::{DateRange, GroupDto, GroupPart, LessonDto, LessonPartDto, ScheduleByDateDto};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::groups::controller::get_groups,
        crate::modules::schedule::controller::get_group_schedule,
        crate::modules::health::controller::health_check,
    ),
    components(
        schemas(
            GroupDto,
            GroupPart,
            DateRange,
            LessonPartDto,
            LessonDto,
            ScheduleByDateDto,
            HealthResponse,
            ErrorResponse,
        )
    ),
    tags(
        (name = "Groups", description = "Student groups"),
        (name = "Schedule", description = "Per-group lesson calendars"),
        (name = "Health", description = "Service liveness")
    ),
    info(
        title = "Timetable API",
        version = "0.1.0",
        description = "Read-only class schedule API. Lessons are stored one row per group part and served as a per-day calendar.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;
