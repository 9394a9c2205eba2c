// src/db/outlet_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::{
        db_utils::{map_fk_violation, map_unique_violation},
        error::AppError,
    },
    models::outlet::{Outlet, OutletPayload},
};

const OUTLET_COLUMNS: &str =
    "id, name, address, phone, latitude, longitude, price_per_km, created_at, updated_at";

#[derive(Clone)]
pub struct OutletRepository {
    pool: PgPool,
}

impl OutletRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Outlet>, AppError> {
        let sql = format!("SELECT {OUTLET_COLUMNS} FROM outlets WHERE id = $1");
        let outlet = sqlx::query_as::<_, Outlet>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(outlet)
    }

    /// Lista outlets; `scope = None` devolve todos.
    pub async fn list(&self, scope: Option<Vec<Uuid>>) -> Result<Vec<Outlet>, AppError> {
        let sql = format!(
            "SELECT {OUTLET_COLUMNS} FROM outlets \
             WHERE ($1::uuid[] IS NULL OR id = ANY($1)) \
             ORDER BY name ASC"
        );
        let outlets = sqlx::query_as::<_, Outlet>(&sql)
            .bind(scope)
            .fetch_all(&self.pool)
            .await?;
        Ok(outlets)
    }

    pub async fn all_ids(&self) -> Result<Vec<Uuid>, AppError> {
        let ids = sqlx::query_scalar::<_, Uuid>("SELECT id FROM outlets")
            .fetch_all(&self.pool)
            .await?;
        Ok(ids)
    }

    pub async fn create(&self, payload: &OutletPayload) -> Result<Outlet, AppError> {
        let sql = format!(
            "INSERT INTO outlets (name, address, phone, latitude, longitude, price_per_km) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {OUTLET_COLUMNS}"
        );
        sqlx::query_as::<_, Outlet>(&sql)
            .bind(&payload.name)
            .bind(&payload.address)
            .bind(&payload.phone)
            .bind(payload.latitude)
            .bind(payload.longitude)
            .bind(payload.price_per_km)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_unique_violation(e, format!("Outlet '{}' sudah ada.", payload.name)))
    }

    pub async fn update(&self, id: Uuid, payload: &OutletPayload) -> Result<Option<Outlet>, AppError> {
        let sql = format!(
            "UPDATE outlets SET name = $2, address = $3, phone = $4, latitude = $5, \
                 longitude = $6, price_per_km = $7, updated_at = NOW() \
             WHERE id = $1 RETURNING {OUTLET_COLUMNS}"
        );
        sqlx::query_as::<_, Outlet>(&sql)
            .bind(id)
            .bind(&payload.name)
            .bind(&payload.address)
            .bind(&payload.phone)
            .bind(payload.latitude)
            .bind(payload.longitude)
            .bind(payload.price_per_km)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_unique_violation(e, format!("Outlet '{}' sudah ada.", payload.name)))
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM outlets WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_fk_violation(e, "Outlet masih memiliki paket atau transaksi."))?;
        Ok(result.rows_affected() > 0)
    }
}
