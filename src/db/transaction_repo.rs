// src/db/transaction_repo.rs

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::{db_utils::map_unique_violation, error::AppError},
    models::transaction::{
        PaymentStatus, Transaction, TransactionFilter, TransactionItem, TransactionStatus,
    },
};

const TRANSACTION_COLUMNS: &str = "id, outlet_id, customer_id, user_id, invoice_code, \
     transaction_date, due_date, paid_at, status, payment_status, subtotal, discount, tax, \
     additional_cost, is_delivery, shipping_distance, shipping_cost, total, notes, \
     created_at, updated_at";

/// Dados já calculados pelo serviço, prontos para o INSERT.
#[derive(Debug)]
pub struct NewTransaction<'a> {
    pub outlet_id: Uuid,
    pub customer_id: Uuid,
    pub user_id: Uuid,
    pub invoice_code: &'a str,
    pub transaction_date: DateTime<Utc>,
    pub due_date: Option<DateTime<Utc>>,
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub tax: Decimal,
    pub additional_cost: Decimal,
    pub is_delivery: bool,
    pub shipping_distance: Option<f64>,
    pub shipping_cost: Decimal,
    pub total: Decimal,
    pub notes: Option<&'a str>,
}

#[derive(Debug)]
pub struct NewTransactionItem<'a> {
    pub package_id: Uuid,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub subtotal: Decimal,
    pub notes: Option<&'a str>,
}

#[derive(Debug, sqlx::FromRow)]
pub struct TransactionNames {
    pub customer_name: String,
    pub outlet_name: String,
}

#[derive(Clone)]
pub struct TransactionRepository {
    pool: PgPool,
}

impl TransactionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Reserva o próximo número de fatura do dia.
    /// A linha do contador fica travada até o commit, então criações
    /// concorrentes no mesmo dia saem em fila.
    pub async fn next_invoice_sequence<'e, E>(&self, executor: E, day: NaiveDate) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let next = sqlx::query_scalar::<_, i64>(
            "INSERT INTO invoice_sequences (day, last_value) VALUES ($1, 1) \
             ON CONFLICT (day) DO UPDATE SET last_value = invoice_sequences.last_value + 1 \
             RETURNING last_value",
        )
        .bind(day)
        .fetch_one(executor)
        .await?;
        Ok(next)
    }

    pub async fn insert_transaction<'e, E>(
        &self,
        executor: E,
        new: &NewTransaction<'_>,
    ) -> Result<Transaction, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            "INSERT INTO transactions (outlet_id, customer_id, user_id, invoice_code, \
                 transaction_date, due_date, status, payment_status, subtotal, discount, tax, \
                 additional_cost, is_delivery, shipping_distance, shipping_cost, total, notes) \
             VALUES ($1, $2, $3, $4, $5, $6, 'baru', 'belum_dibayar', $7, $8, $9, $10, $11, $12, $13, $14, $15) \
             RETURNING {TRANSACTION_COLUMNS}"
        );
        sqlx::query_as::<_, Transaction>(&sql)
            .bind(new.outlet_id)
            .bind(new.customer_id)
            .bind(new.user_id)
            .bind(new.invoice_code)
            .bind(new.transaction_date)
            .bind(new.due_date)
            .bind(new.subtotal)
            .bind(new.discount)
            .bind(new.tax)
            .bind(new.additional_cost)
            .bind(new.is_delivery)
            .bind(new.shipping_distance)
            .bind(new.shipping_cost)
            .bind(new.total)
            .bind(new.notes)
            .fetch_one(executor)
            .await
            .map_err(|e| map_unique_violation(e, "Kode invoice bentrok, silakan coba lagi."))
    }

    pub async fn insert_item<'e, E>(
        &self,
        executor: E,
        transaction_id: Uuid,
        item: &NewTransactionItem<'_>,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            "INSERT INTO transaction_items (transaction_id, package_id, quantity, unit_price, subtotal, notes) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(transaction_id)
        .bind(item.package_id)
        .bind(item.quantity)
        .bind(item.unit_price)
        .bind(item.subtotal)
        .bind(item.notes)
        .execute(executor)
        .await?;
        Ok(())
    }

    /// Busca respeitando o escopo: fora do escopo é indistinguível de inexistente.
    pub async fn find_by_id(
        &self,
        id: Uuid,
        scope: Option<Vec<Uuid>>,
    ) -> Result<Option<Transaction>, AppError> {
        let sql = format!(
            "SELECT {TRANSACTION_COLUMNS} FROM transactions \
             WHERE id = $1 AND ($2::uuid[] IS NULL OR outlet_id = ANY($2))"
        );
        let tx = sqlx::query_as::<_, Transaction>(&sql)
            .bind(id)
            .bind(scope)
            .fetch_optional(&self.pool)
            .await?;
        Ok(tx)
    }

    pub async fn find_names(&self, id: Uuid) -> Result<TransactionNames, AppError> {
        let names = sqlx::query_as::<_, TransactionNames>(
            "SELECT c.name AS customer_name, o.name AS outlet_name \
             FROM transactions t \
             JOIN customers c ON c.id = t.customer_id \
             JOIN outlets o ON o.id = t.outlet_id \
             WHERE t.id = $1",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(names)
    }

    pub async fn list_items(&self, transaction_id: Uuid) -> Result<Vec<TransactionItem>, AppError> {
        let items = sqlx::query_as::<_, TransactionItem>(
            "SELECT ti.id, ti.transaction_id, ti.package_id, p.name AS package_name, \
                    ti.quantity, ti.unit_price, ti.subtotal, ti.notes \
             FROM transaction_items ti \
             JOIN packages p ON p.id = ti.package_id \
             WHERE ti.transaction_id = $1 \
             ORDER BY p.name ASC",
        )
        .bind(transaction_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    pub async fn list(
        &self,
        scope: Option<Vec<Uuid>>,
        filter: &TransactionFilter,
        offset: FixedOffset,
    ) -> Result<Vec<Transaction>, AppError> {
        let (from, until) = filter.utc_bounds(offset);
        let sql = format!(
            "SELECT {TRANSACTION_COLUMNS} FROM transactions \
             WHERE ($1::uuid[] IS NULL OR outlet_id = ANY($1)) \
               AND ($2::timestamptz IS NULL OR transaction_date >= $2) \
               AND ($3::timestamptz IS NULL OR transaction_date < $3) \
               AND ($4::transaction_status IS NULL OR status = $4) \
               AND ($5::payment_status IS NULL OR payment_status = $5) \
             ORDER BY transaction_date DESC"
        );
        let rows = sqlx::query_as::<_, Transaction>(&sql)
            .bind(scope)
            .bind(from)
            .bind(until)
            .bind(filter.status)
            .bind(filter.payment_status)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Só grava se o status ainda for `expected`; `None` quando outra
    /// requisição mudou a transação no meio do caminho.
    pub async fn update_status(
        &self,
        id: Uuid,
        expected: TransactionStatus,
        next: TransactionStatus,
    ) -> Result<Option<Transaction>, AppError> {
        let sql = format!(
            "UPDATE transactions SET status = $2, updated_at = NOW() \
             WHERE id = $1 AND status = $3 RETURNING {TRANSACTION_COLUMNS}"
        );
        let tx = sqlx::query_as::<_, Transaction>(&sql)
            .bind(id)
            .bind(next)
            .bind(expected)
            .fetch_optional(&self.pool)
            .await?;
        Ok(tx)
    }

    /// Marca como pago apenas o que ainda está em aberto e não foi cancelado.
    pub async fn mark_paid(&self, id: Uuid, paid_at: DateTime<Utc>) -> Result<Option<Transaction>, AppError> {
        let sql = format!(
            "UPDATE transactions SET payment_status = $2, paid_at = $3, updated_at = NOW() \
             WHERE id = $1 AND payment_status = $4 AND status <> $5 \
             RETURNING {TRANSACTION_COLUMNS}"
        );
        let tx = sqlx::query_as::<_, Transaction>(&sql)
            .bind(id)
            .bind(PaymentStatus::Dibayar)
            .bind(paid_at)
            .bind(PaymentStatus::BelumDibayar)
            .bind(TransactionStatus::Batal)
            .fetch_optional(&self.pool)
            .await?;
        Ok(tx)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        // transaction_items cai junto (ON DELETE CASCADE)
        let result = sqlx::query("DELETE FROM transactions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
