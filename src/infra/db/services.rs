use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
    application::repos::{RepoError, ServicesRepo},
    domain::entities::ServiceRecord,
};

use super::{PostgresRepositories, map_sqlx_error};

#[derive(sqlx::FromRow)]
struct ServiceRow {
    id: Uuid,
    slug: String,
    title: String,
    description: Option<String>,
    image_url: Option<String>,
    gallery: Vec<Option<String>>,
    is_active: bool,
    updated_at: OffsetDateTime,
}

impl From<ServiceRow> for ServiceRecord {
    fn from(row: ServiceRow) -> Self {
        Self {
            id: row.id,
            slug: row.slug,
            title: row.title,
            description: row.description,
            image_url: row.image_url,
            gallery: row.gallery,
            is_active: row.is_active,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl ServicesRepo for PostgresRepositories {
    async fn list_active_services(&self) -> Result<Vec<ServiceRecord>, RepoError> {
        let rows = sqlx::query_as::<_, ServiceRow>(
            "SELECT id, slug, title, description, image_url, gallery, is_active, updated_at \
             FROM services \
             WHERE is_active \
             ORDER BY sort_order, title",
        )
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(ServiceRecord::from).collect())
    }
}
