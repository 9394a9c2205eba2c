// src/db/catalog_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::{
        db_utils::{map_fk_violation, map_unique_violation},
        error::AppError,
    },
    models::catalog::{Package, PackageFilter, PackagePayload, PackageType, PackageTypePayload},
};

const PACKAGE_TYPE_COLUMNS: &str = "id, name, description, created_at, updated_at";
const PACKAGE_COLUMNS: &str =
    "id, outlet_id, package_type_id, name, unit, price, created_at, updated_at";

#[derive(Clone)]
pub struct CatalogRepository {
    pool: PgPool,
}

impl CatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  JENIS PAKET
    // =========================================================================

    pub async fn list_package_types(&self) -> Result<Vec<PackageType>, AppError> {
        let sql = format!("SELECT {PACKAGE_TYPE_COLUMNS} FROM package_types ORDER BY name ASC");
        let types = sqlx::query_as::<_, PackageType>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(types)
    }

    pub async fn find_package_type(&self, id: Uuid) -> Result<Option<PackageType>, AppError> {
        let sql = format!("SELECT {PACKAGE_TYPE_COLUMNS} FROM package_types WHERE id = $1");
        let found = sqlx::query_as::<_, PackageType>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(found)
    }

    pub async fn create_package_type(&self, payload: &PackageTypePayload) -> Result<PackageType, AppError> {
        let sql = format!(
            "INSERT INTO package_types (name, description) VALUES ($1, $2) \
             RETURNING {PACKAGE_TYPE_COLUMNS}"
        );
        sqlx::query_as::<_, PackageType>(&sql)
            .bind(&payload.name)
            .bind(&payload.description)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_unique_violation(e, format!("Jenis paket '{}' sudah ada.", payload.name)))
    }

    pub async fn update_package_type(
        &self,
        id: Uuid,
        payload: &PackageTypePayload,
    ) -> Result<Option<PackageType>, AppError> {
        let sql = format!(
            "UPDATE package_types SET name = $2, description = $3, updated_at = NOW() \
             WHERE id = $1 RETURNING {PACKAGE_TYPE_COLUMNS}"
        );
        sqlx::query_as::<_, PackageType>(&sql)
            .bind(id)
            .bind(&payload.name)
            .bind(&payload.description)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_unique_violation(e, format!("Jenis paket '{}' sudah ada.", payload.name)))
    }

    pub async fn delete_package_type(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM package_types WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_fk_violation(e, "Jenis paket masih dipakai oleh paket."))?;
        Ok(result.rows_affected() > 0)
    }

    // =========================================================================
    //  PAKET
    // =========================================================================

    pub async fn list_packages(
        &self,
        scope: Option<Vec<Uuid>>,
        filter: &PackageFilter,
    ) -> Result<Vec<Package>, AppError> {
        let sql = format!(
            "SELECT {PACKAGE_COLUMNS} FROM packages \
             WHERE ($1::uuid[] IS NULL OR outlet_id = ANY($1)) \
               AND ($2::uuid IS NULL OR package_type_id = $2) \
             ORDER BY name ASC"
        );
        let packages = sqlx::query_as::<_, Package>(&sql)
            .bind(scope)
            .bind(filter.package_type_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(packages)
    }

    pub async fn get_package(&self, id: Uuid) -> Result<Option<Package>, AppError> {
        self.find_package(&self.pool, id).await
    }

    pub async fn find_package<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Package>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!("SELECT {PACKAGE_COLUMNS} FROM packages WHERE id = $1");
        let found = sqlx::query_as::<_, Package>(&sql)
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(found)
    }

    /// Carrega vários pacotes de uma vez (itens de uma transação).
    pub async fn find_packages<'e, E>(&self, executor: E, ids: &[Uuid]) -> Result<Vec<Package>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!("SELECT {PACKAGE_COLUMNS} FROM packages WHERE id = ANY($1)");
        let packages = sqlx::query_as::<_, Package>(&sql)
            .bind(ids)
            .fetch_all(executor)
            .await?;
        Ok(packages)
    }

    pub async fn create_package(&self, payload: &PackagePayload) -> Result<Package, AppError> {
        let sql = format!(
            "INSERT INTO packages (outlet_id, package_type_id, name, unit, price) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {PACKAGE_COLUMNS}"
        );
        sqlx::query_as::<_, Package>(&sql)
            .bind(payload.outlet_id)
            .bind(payload.package_type_id)
            .bind(&payload.name)
            .bind(payload.unit)
            .bind(payload.price)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_unique_violation(e, format!("Paket '{}' sudah ada di outlet ini.", payload.name)))
    }

    pub async fn update_package(&self, id: Uuid, payload: &PackagePayload) -> Result<Option<Package>, AppError> {
        let sql = format!(
            "UPDATE packages SET outlet_id = $2, package_type_id = $3, name = $4, unit = $5, \
                 price = $6, updated_at = NOW() \
             WHERE id = $1 RETURNING {PACKAGE_COLUMNS}"
        );
        sqlx::query_as::<_, Package>(&sql)
            .bind(id)
            .bind(payload.outlet_id)
            .bind(payload.package_type_id)
            .bind(&payload.name)
            .bind(payload.unit)
            .bind(payload.price)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_unique_violation(e, format!("Paket '{}' sudah ada di outlet ini.", payload.name)))
    }

    pub async fn delete_package(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM packages WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_fk_violation(e, "Paket sudah dipakai di transaksi."))?;
        Ok(result.rows_affected() > 0)
    }
}
