use sqlx::PgPool;
use tracing::{Instrument, instrument};

use timetable_core::AppError;

use crate::db_operation_span;
use crate::modules::groups::model::GroupDto;
use crate::utils::tracing::ErrorExt;

pub struct GroupService;

impl GroupService {
    #[instrument(skip(db))]
    pub async fn get_all_groups(db: &PgPool) -> Result<Vec<GroupDto>, AppError> {
        let groups = sqlx::query_as::<_, GroupDto>(
            r#"SELECT
                g.group_id,
                g.group_name,
                g.course,
                sp.name AS specialty
               FROM student_groups g
               JOIN specialties sp ON sp.specialty_id = g.specialty_id
               ORDER BY g.group_name"#,
        )
        .fetch_all(db)
        .instrument(db_operation_span!("SELECT", "student_groups"))
        .await
        .log_error("listing groups")?;

        Ok(groups)
    }
}
