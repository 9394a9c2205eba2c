// src/models/transaction.rs

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::models::catalog::validate_non_negative;

// --- Enums ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "transaction_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Baru,
    Proses,
    Selesai,
    Diambil,
    Dikirim,
    Diterima,
    Batal,
}

impl TransactionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionStatus::Baru => "baru",
            TransactionStatus::Proses => "proses",
            TransactionStatus::Selesai => "selesai",
            TransactionStatus::Diambil => "diambil",
            TransactionStatus::Dikirim => "dikirim",
            TransactionStatus::Diterima => "diterima",
            TransactionStatus::Batal => "batal",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TransactionStatus::Baru => "Baru",
            TransactionStatus::Proses => "Proses",
            TransactionStatus::Selesai => "Selesai",
            TransactionStatus::Diambil => "Diambil",
            TransactionStatus::Dikirim => "Dikirim",
            TransactionStatus::Diterima => "Diterima",
            TransactionStatus::Batal => "Batal",
        }
    }

    /// Transições permitidas no ciclo de vida da cucian.
    pub fn can_transition_to(self, next: TransactionStatus) -> bool {
        use TransactionStatus::*;
        matches!(
            (self, next),
            (Baru, Proses)
                | (Baru, Batal)
                | (Proses, Selesai)
                | (Proses, Batal)
                | (Selesai, Diambil)
                | (Selesai, Dikirim)
                | (Dikirim, Diterima)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "payment_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Dibayar,
    BelumDibayar,
}

impl PaymentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentStatus::Dibayar => "dibayar",
            PaymentStatus::BelumDibayar => "belum_dibayar",
        }
    }
}

// Vocabulário de exibição usado na tela e no Excel.
// Valores desconhecidos passam sem alteração.
pub fn status_label(raw: &str) -> &str {
    match raw {
        "baru" => "Baru",
        "proses" => "Proses",
        "selesai" => "Selesai",
        "diambil" => "Diambil",
        "dikirim" => "Dikirim",
        "diterima" => "Diterima",
        "batal" => "Batal",
        other => other,
    }
}

pub fn payment_label(raw: &str) -> &'static str {
    if raw == "dibayar" { "Lunas" } else { "Belum Lunas" }
}

// --- Structs de Operação ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: Uuid,
    pub outlet_id: Uuid,
    pub customer_id: Uuid,
    pub user_id: Uuid,
    #[schema(example = "INV-20240115-0001")]
    pub invoice_code: String,
    pub transaction_date: DateTime<Utc>,
    pub due_date: Option<DateTime<Utc>>,
    pub paid_at: Option<DateTime<Utc>>,
    pub status: TransactionStatus,
    pub payment_status: PaymentStatus,
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub tax: Decimal,
    pub additional_cost: Decimal,
    pub is_delivery: bool,
    pub shipping_distance: Option<f64>,
    pub shipping_cost: Decimal,
    pub total: Decimal,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransactionItem {
    pub id: Uuid,
    pub transaction_id: Uuid,
    pub package_id: Uuid,
    // Nome do paket no momento da venda (JOIN)
    pub package_name: String,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub subtotal: Decimal,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDetail {
    #[serde(flatten)]
    pub transaction: Transaction,
    pub customer_name: String,
    pub outlet_name: String,
    pub items: Vec<TransactionItem>,
}

// --- Payloads ---

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransactionItemPayload {
    pub package_id: Uuid,
    #[validate(custom(function = "validate_positive"))]
    #[schema(example = 3.5)]
    pub quantity: Decimal,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransactionPayload {
    // Kasir: ignorado, sempre o outlet do próprio usuário
    pub outlet_id: Option<Uuid>,
    pub customer_id: Uuid,

    #[validate(length(min = 1, message = "Minimal satu paket."), nested)]
    pub items: Vec<TransactionItemPayload>,

    #[serde(default)]
    #[validate(custom(function = "validate_non_negative"))]
    pub discount: Decimal,

    #[serde(default)]
    #[validate(custom(function = "validate_percent"))]
    #[schema(example = 11.0)]
    pub tax_percent: Decimal,

    #[serde(default)]
    #[validate(custom(function = "validate_non_negative"))]
    pub additional_cost: Decimal,

    pub due_date: Option<DateTime<Utc>>,

    #[serde(default)]
    pub delivery: bool,
    // Sem destino explícito, usa as coordenadas do cliente
    pub destination_latitude: Option<f64>,
    pub destination_longitude: Option<f64>,

    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusPayload {
    pub status: TransactionStatus,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct TransactionFilter {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub outlet_id: Option<Uuid>,
    pub status: Option<TransactionStatus>,
    pub payment_status: Option<PaymentStatus>,
}

impl TransactionFilter {
    /// Converte o período (datas no fuso local) em instantes UTC:
    /// `[início do startDate, início do dia seguinte ao endDate)`.
    pub fn utc_bounds(&self, offset: FixedOffset) -> (Option<DateTime<Utc>>, Option<DateTime<Utc>>) {
        let from = self.start_date.and_then(|d| local_midnight(d, offset));
        let until = self
            .end_date
            .and_then(|d| d.succ_opt())
            .and_then(|d| local_midnight(d, offset));
        (from, until)
    }
}

/// Meia-noite de `date` no fuso `offset`, em UTC.
pub fn local_midnight(date: NaiveDate, offset: FixedOffset) -> Option<DateTime<Utc>> {
    offset
        .from_local_datetime(&date.and_time(NaiveTime::MIN))
        .single()
        .map(|dt| dt.with_timezone(&Utc))
}

fn validate_positive(value: &Decimal) -> Result<(), validator::ValidationError> {
    if *value <= Decimal::ZERO {
        let mut err = validator::ValidationError::new("positive");
        err.message = Some("Jumlah harus lebih dari nol.".into());
        return Err(err);
    }
    Ok(())
}

fn validate_percent(value: &Decimal) -> Result<(), validator::ValidationError> {
    if *value < Decimal::ZERO || *value > Decimal::ONE_HUNDRED {
        let mut err = validator::ValidationError::new("percent");
        err.message = Some("Persentase pajak harus 0 - 100.".into());
        return Err(err);
    }
    Ok(())
}
