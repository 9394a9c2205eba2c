// src/db/crm_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::{db_utils::{map_fk_violation, map_unique_violation}, error::AppError},
    models::crm::{Customer, CustomerFilter, CustomerPayload},
};

const CUSTOMER_COLUMNS: &str =
    "id, name, phone, address, gender, latitude, longitude, created_at, updated_at";

#[derive(Clone)]
pub struct CrmRepository {
    pool: PgPool,
}

impl CrmRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_customers(&self, filter: &CustomerFilter) -> Result<Vec<Customer>, AppError> {
        // Busca simples por nome ou telefone (ILIKE)
        let pattern = filter
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| format!("%{}%", s));

        let sql = format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customers \
             WHERE ($1::text IS NULL OR name ILIKE $1 OR phone ILIKE $1) \
             ORDER BY name ASC"
        );
        let customers = sqlx::query_as::<_, Customer>(&sql)
            .bind(pattern)
            .fetch_all(&self.pool)
            .await?;
        Ok(customers)
    }

    pub async fn find_customer<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Customer>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!("SELECT {CUSTOMER_COLUMNS} FROM customers WHERE id = $1");
        let customer = sqlx::query_as::<_, Customer>(&sql)
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(customer)
    }

    pub async fn create_customer(&self, payload: &CustomerPayload) -> Result<Customer, AppError> {
        let sql = format!(
            "INSERT INTO customers (name, phone, address, gender, latitude, longitude) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {CUSTOMER_COLUMNS}"
        );
        sqlx::query_as::<_, Customer>(&sql)
            .bind(&payload.name)
            .bind(&payload.phone)
            .bind(&payload.address)
            .bind(payload.gender)
            .bind(payload.latitude)
            .bind(payload.longitude)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_unique_violation(e, format!("Nomor telepon {} sudah terdaftar.", payload.phone)))
    }

    pub async fn update_customer(&self, id: Uuid, payload: &CustomerPayload) -> Result<Option<Customer>, AppError> {
        let sql = format!(
            "UPDATE customers SET name = $2, phone = $3, address = $4, gender = $5, \
                 latitude = $6, longitude = $7, updated_at = NOW() \
             WHERE id = $1 RETURNING {CUSTOMER_COLUMNS}"
        );
        sqlx::query_as::<_, Customer>(&sql)
            .bind(id)
            .bind(&payload.name)
            .bind(&payload.phone)
            .bind(&payload.address)
            .bind(payload.gender)
            .bind(payload.latitude)
            .bind(payload.longitude)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_unique_violation(e, format!("Nomor telepon {} sudah terdaftar.", payload.phone)))
    }

    pub async fn delete_customer(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_fk_violation(e, "Pelanggan masih memiliki transaksi."))?;
        Ok(result.rows_affected() > 0)
    }
}
