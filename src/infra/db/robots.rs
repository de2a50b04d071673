use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    application::repos::{RepoError, RobotsRepo},
    domain::entities::RobotsDirectiveRecord,
};

use super::{PostgresRepositories, map_sqlx_error};

#[derive(sqlx::FromRow)]
struct RobotsDirectiveRow {
    id: Uuid,
    user_agent: String,
    directive: String,
    value: String,
    priority: i32,
    is_active: bool,
}

impl From<RobotsDirectiveRow> for RobotsDirectiveRecord {
    fn from(row: RobotsDirectiveRow) -> Self {
        Self {
            id: row.id,
            user_agent: row.user_agent,
            directive: row.directive,
            value: row.value,
            priority: row.priority,
            is_active: row.is_active,
        }
    }
}

#[async_trait]
impl RobotsRepo for PostgresRepositories {
    async fn list_active_directives(&self) -> Result<Vec<RobotsDirectiveRecord>, RepoError> {
        let rows = sqlx::query_as::<_, RobotsDirectiveRow>(
            "SELECT id, user_agent, directive, value, priority, is_active \
             FROM robots_directives \
             WHERE is_active \
             ORDER BY priority, created_at",
        )
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(RobotsDirectiveRecord::from).collect())
    }
}
