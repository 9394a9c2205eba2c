// src/db/dashboard_repo.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{common::error::AppError, models::dashboard::DashboardSummary};

#[derive(Clone)]
pub struct DashboardRepository {
    pool: PgPool,
}

impl DashboardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_summary(
        &self,
        scope: Option<Vec<Uuid>>,
        today: (DateTime<Utc>, DateTime<Utc>),
    ) -> Result<DashboardSummary, AppError> {
        // Iniciamos uma transação (Snapshot consistente dos dados)
        let mut tx = self.pool.begin().await?;

        // A. Movimento de hoje
        let (revenue_today, transactions_today) = sqlx::query_as::<_, (Decimal, i64)>(
            r#"
            SELECT COALESCE(SUM(total), 0), COUNT(*)
            FROM transactions
            WHERE ($1::uuid[] IS NULL OR outlet_id = ANY($1))
              AND transaction_date >= $2 AND transaction_date < $3
              AND status <> 'batal'
            "#,
        )
        .bind(&scope)
        .bind(today.0)
        .bind(today.1)
        .fetch_one(&mut *tx)
        .await?;

        // B. Pendências
        let (unpaid_transactions, in_progress) = sqlx::query_as::<_, (i64, i64)>(
            r#"
            SELECT
                COUNT(*) FILTER (WHERE payment_status = 'belum_dibayar' AND status <> 'batal'),
                COUNT(*) FILTER (WHERE status IN ('baru', 'proses'))
            FROM transactions
            WHERE ($1::uuid[] IS NULL OR outlet_id = ANY($1))
            "#,
        )
        .bind(&scope)
        .fetch_one(&mut *tx)
        .await?;

        // C. Outlets visíveis
        let outlet_count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM outlets WHERE ($1::uuid[] IS NULL OR id = ANY($1))",
        )
        .bind(&scope)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(DashboardSummary {
            revenue_today,
            transactions_today,
            unpaid_transactions,
            in_progress,
            outlet_count,
        })
    }
}
