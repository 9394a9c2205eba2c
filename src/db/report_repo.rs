// src/db/report_repo.rs

use chrono::FixedOffset;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{report::ReportRow, transaction::TransactionFilter},
};

#[derive(Clone)]
pub struct ReportRepository {
    pool: PgPool,
}

impl ReportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn transaction_rows(
        &self,
        scope: Option<Vec<Uuid>>,
        filter: &TransactionFilter,
        offset: FixedOffset,
    ) -> Result<Vec<ReportRow>, AppError> {
        // Período em dias do fuso do relatório, o mesmo usado para imprimir as datas
        let (from, until) = filter.utc_bounds(offset);
        let rows = sqlx::query_as::<_, ReportRow>(
            r#"
            SELECT t.id, t.invoice_code, t.transaction_date,
                   c.name AS customer_name, o.name AS outlet_name,
                   t.status::text AS status, t.payment_status::text AS payment_status,
                   t.total
            FROM transactions t
            JOIN customers c ON c.id = t.customer_id
            JOIN outlets o ON o.id = t.outlet_id
            WHERE ($1::uuid[] IS NULL OR t.outlet_id = ANY($1))
              AND ($2::timestamptz IS NULL OR t.transaction_date >= $2)
              AND ($3::timestamptz IS NULL OR t.transaction_date < $3)
              AND ($4::transaction_status IS NULL OR t.status = $4)
              AND ($5::payment_status IS NULL OR t.payment_status = $5)
            ORDER BY t.transaction_date ASC, t.invoice_code ASC
            "#,
        )
        .bind(scope)
        .bind(from)
        .bind(until)
        .bind(filter.status)
        .bind(filter.payment_status)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
