// src/models/report.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::transaction::{payment_label, status_label};

// Uma linha do relatório de transações (JOIN com cliente e outlet).
// Status vêm como texto cru para que o vocabulário de exibição trate
// qualquer valor, inclusive os que não conhecemos.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportRow {
    pub id: Uuid,
    #[schema(example = "INV-20240115-0001")]
    pub invoice_code: String,
    pub transaction_date: DateTime<Utc>,
    pub customer_name: String,
    pub outlet_name: String,
    #[schema(example = "proses")]
    pub status: String,
    #[schema(example = "belum_dibayar")]
    pub payment_status: String,
    pub total: Decimal,
}

impl ReportRow {
    pub fn status_label(&self) -> &str {
        status_label(&self.status)
    }

    pub fn payment_label(&self) -> &'static str {
        payment_label(&self.payment_status)
    }

    pub fn is_paid(&self) -> bool {
        self.payment_status == "dibayar"
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub total_revenue: Decimal,
    pub transaction_count: usize,
    pub paid_count: usize,
    pub unpaid_count: usize,
}

impl ReportSummary {
    pub fn from_rows(rows: &[ReportRow]) -> Self {
        rows.iter().fold(Self::default(), |mut acc, row| {
            acc.total_revenue += row.total;
            acc.transaction_count += 1;
            if row.is_paid() {
                acc.paid_count += 1;
            } else {
                acc.unpaid_count += 1;
            }
            acc
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReport {
    pub rows: Vec<ReportRow>,
    pub summary: ReportSummary,
}
