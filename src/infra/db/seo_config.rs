use std::collections::BTreeMap;

use async_trait::async_trait;
use serde_json::Value;
use sqlx::{Postgres, QueryBuilder, types::Json};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
    application::repos::{RepoError, SeoConfigRepo, SeoConfigurationParams},
    domain::entities::SeoConfigurationRecord,
};

use super::{PostgresRepositories, map_sqlx_error};

const CONFIGURATION_COLUMNS: &str = "id, page_type, page_id, title, description, keywords, \
     canonical_url, robots, og_title, og_description, og_image, og_type, twitter_card, \
     twitter_title, twitter_description, twitter_image, structured_data, custom_meta, \
     is_active, created_at, updated_at";

#[derive(sqlx::FromRow)]
struct SeoConfigurationRow {
    id: Uuid,
    page_type: String,
    page_id: Option<String>,
    title: Option<String>,
    description: Option<String>,
    keywords: Option<Vec<String>>,
    canonical_url: Option<String>,
    robots: Option<String>,
    og_title: Option<String>,
    og_description: Option<String>,
    og_image: Option<String>,
    og_type: Option<String>,
    twitter_card: Option<String>,
    twitter_title: Option<String>,
    twitter_description: Option<String>,
    twitter_image: Option<String>,
    structured_data: Option<Json<Value>>,
    custom_meta: Option<Json<BTreeMap<String, String>>>,
    is_active: bool,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl From<SeoConfigurationRow> for SeoConfigurationRecord {
    fn from(row: SeoConfigurationRow) -> Self {
        Self {
            id: row.id,
            page_type: row.page_type,
            page_id: row.page_id,
            title: row.title,
            description: row.description,
            keywords: row.keywords,
            canonical_url: row.canonical_url,
            robots: row.robots,
            og_title: row.og_title,
            og_description: row.og_description,
            og_image: row.og_image,
            og_type: row.og_type,
            twitter_card: row.twitter_card,
            twitter_title: row.twitter_title,
            twitter_description: row.twitter_description,
            twitter_image: row.twitter_image,
            structured_data: row.structured_data.map(|Json(value)| value),
            custom_meta: row.custom_meta.map(|Json(map)| map),
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Bind every writable column in declaration order, comma separated.
fn push_params<'q>(qb: &mut QueryBuilder<'q, Postgres>, params: SeoConfigurationParams) {
    let mut values = qb.separated(", ");
    values.push_bind(params.page_type);
    values.push_bind(params.page_id);
    values.push_bind(params.title);
    values.push_bind(params.description);
    values.push_bind(params.keywords);
    values.push_bind(params.canonical_url);
    values.push_bind(params.robots);
    values.push_bind(params.og_title);
    values.push_bind(params.og_description);
    values.push_bind(params.og_image);
    values.push_bind(params.og_type);
    values.push_bind(params.twitter_card);
    values.push_bind(params.twitter_title);
    values.push_bind(params.twitter_description);
    values.push_bind(params.twitter_image);
    values.push_bind(params.structured_data.map(Json));
    values.push_bind(params.custom_meta.map(Json));
    values.push_bind(params.is_active);
}

#[async_trait]
impl SeoConfigRepo for PostgresRepositories {
    async fn find_active_configuration(
        &self,
        page_type: &str,
        page_id: Option<&str>,
    ) -> Result<Option<SeoConfigurationRecord>, RepoError> {
        let sql = format!(
            "SELECT {CONFIGURATION_COLUMNS} FROM seo_configurations \
             WHERE is_active AND page_type = $1 AND (page_id = $2 OR page_id IS NULL) \
             ORDER BY (page_id IS NULL) ASC \
             LIMIT 1"
        );
        let row = sqlx::query_as::<_, SeoConfigurationRow>(&sql)
            .bind(page_type)
            .bind(page_id)
            .fetch_optional(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.map(SeoConfigurationRecord::from))
    }

    async fn list_configurations(&self) -> Result<Vec<SeoConfigurationRecord>, RepoError> {
        let sql = format!(
            "SELECT {CONFIGURATION_COLUMNS} FROM seo_configurations \
             ORDER BY page_type, page_id NULLS FIRST"
        );
        let rows = sqlx::query_as::<_, SeoConfigurationRow>(&sql)
            .fetch_all(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(SeoConfigurationRecord::from).collect())
    }

    async fn create_configuration(
        &self,
        params: SeoConfigurationParams,
    ) -> Result<SeoConfigurationRecord, RepoError> {
        let mut qb = QueryBuilder::<Postgres>::new(
            "INSERT INTO seo_configurations (page_type, page_id, title, description, keywords, \
             canonical_url, robots, og_title, og_description, og_image, og_type, twitter_card, \
             twitter_title, twitter_description, twitter_image, structured_data, custom_meta, \
             is_active) VALUES (",
        );
        push_params(&mut qb, params);
        qb.push(") RETURNING ");
        qb.push(CONFIGURATION_COLUMNS);

        let row = qb
            .build_query_as::<SeoConfigurationRow>()
            .fetch_one(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.into())
    }

    async fn update_configuration(
        &self,
        id: Uuid,
        params: SeoConfigurationParams,
    ) -> Result<SeoConfigurationRecord, RepoError> {
        let mut qb = QueryBuilder::<Postgres>::new(
            "UPDATE seo_configurations SET (page_type, page_id, title, description, keywords, \
             canonical_url, robots, og_title, og_description, og_image, og_type, twitter_card, \
             twitter_title, twitter_description, twitter_image, structured_data, custom_meta, \
             is_active) = (",
        );
        push_params(&mut qb, params);
        qb.push("), updated_at = now() WHERE id = ");
        qb.push_bind(id);
        qb.push(" RETURNING ");
        qb.push(CONFIGURATION_COLUMNS);

        let row = qb
            .build_query_as::<SeoConfigurationRow>()
            .fetch_one(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.into())
    }
}
