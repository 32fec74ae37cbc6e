//! SurrealDB implementation of [`ResourceRepository`].

use chrono::{DateTime, Utc};
use healthflow_core::error::{HealthflowError, HealthflowResult};
use healthflow_core::models::resource::{
    CreateResource, Resource, UpdateResource, validate_counts,
};
use healthflow_core::repository::ResourceRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::DbError;

/// DB-side row for queries where the UUID is already known.
#[derive(Debug, SurrealValue)]
struct ResourceRow {
    name: String,
    resource_type: String,
    total_count: u32,
    available_count: u32,
    location: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// DB-side row that includes the record key via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct ResourceRowWithId {
    record_id: String,
    name: String,
    resource_type: String,
    total_count: u32,
    available_count: u32,
    location: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ResourceRow {
    fn into_resource(self, id: Uuid) -> Resource {
        Resource {
            id,
            name: self.name,
            resource_type: self.resource_type,
            total_count: self.total_count,
            available_count: self.available_count,
            location: self.location,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl ResourceRowWithId {
    fn try_into_resource(self) -> Result<Resource, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Decode(format!("invalid resource UUID: {e}")))?;
        Ok(Resource {
            id,
            name: self.name,
            resource_type: self.resource_type,
            total_count: self.total_count,
            available_count: self.available_count,
            location: self.location,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

fn not_found(id: String) -> DbError {
    DbError::NotFound {
        entity: "resource".into(),
        id,
    }
}

/// SurrealDB implementation of the Resource repository.
#[derive(Clone)]
pub struct SurrealResourceRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealResourceRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> ResourceRepository for SurrealResourceRepository<C> {
    async fn create(&self, input: CreateResource) -> HealthflowResult<Resource> {
        validate_counts(input.total_count, input.available_count)?;

        // v7 keys sort by creation time, which keeps `list` ordering stable.
        let id = Uuid::now_v7();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('resource', $id) SET \
                 name = $name, \
                 resource_type = $resource_type, \
                 total_count = $total_count, \
                 available_count = $available_count, \
                 location = $location",
            )
            .bind(("id", id_str.clone()))
            .bind(("name", input.name))
            .bind(("resource_type", input.resource_type))
            .bind(("total_count", input.total_count))
            .bind(("available_count", input.available_count))
            .bind(("location", input.location))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<ResourceRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| not_found(id_str))?;

        info!(resource_id = %id, "Created resource");
        Ok(row.into_resource(id))
    }

    async fn get_by_id(&self, id: Uuid) -> HealthflowResult<Resource> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('resource', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<ResourceRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| not_found(id_str))?;

        Ok(row.into_resource(id))
    }

    async fn update(&self, id: Uuid, input: UpdateResource) -> HealthflowResult<Resource> {
        if let (Some(total), Some(available)) = (input.total_count, input.available_count) {
            validate_counts(total, available)?;
        }

        let id_str = id.to_string();

        // Omitted fields keep their stored value on both sides of the guard.
        let total_expr = if input.total_count.is_some() {
            "$total_count"
        } else {
            "total_count"
        };
        let available_expr = if input.available_count.is_some() {
            "$available_count"
        } else {
            "available_count"
        };

        // The capacity check runs inside the UPDATE so it sees the row
        // being written, not an earlier read.
        let query = format!(
            "UPDATE type::record('resource', $id) SET \
             total_count = {total_expr}, \
             available_count = {available_expr}, \
             updated_at = time::now() \
             WHERE {total_expr} >= {available_expr}"
        );

        let mut builder = self.db.query(&query).bind(("id", id_str.clone()));
        if let Some(total) = input.total_count {
            builder = builder.bind(("total_count", total));
        }
        if let Some(available) = input.available_count {
            builder = builder.bind(("available_count", available));
        }

        let result = builder.await.map_err(DbError::from)?;
        let mut result = result.check().map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<ResourceRow> = result.take(0).map_err(DbError::from)?;
        let Some(row) = rows.into_iter().next() else {
            // Either the record is missing or the guard rejected the write.
            let current = self.get_by_id(id).await?;
            input.merge_counts(&current)?;
            return Err(HealthflowError::validation(format!(
                "resource {id} changed concurrently; retry the update"
            )));
        };
        let updated = row.into_resource(id);

        debug!(
            resource_id = %id,
            total_count = updated.total_count,
            available_count = updated.available_count,
            status = updated.status().as_str(),
            "Updated resource"
        );
        Ok(updated)
    }

    async fn list(&self) -> HealthflowResult<Vec<Resource>> {
        let mut result = self
            .db
            .query("SELECT meta::id(id) AS record_id, * FROM resource ORDER BY id ASC")
            .await
            .map_err(DbError::from)?;

        let rows: Vec<ResourceRowWithId> = result.take(0).map_err(DbError::from)?;

        rows.into_iter()
            .map(|row| row.try_into_resource())
            .collect::<Result<Vec<_>, DbError>>()
            .map_err(Into::into)
    }
}
